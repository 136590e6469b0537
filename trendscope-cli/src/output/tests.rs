//! Output formatter tests.

use trendscope_core::{Article, DailyTrendingTopics, TrendingStory};

use super::{JsonFormatter, TextFormatter};

fn topics() -> DailyTrendingTopics {
    vec![
        TrendingStory {
            title: "rust".to_string(),
            traffic: "20000".to_string(),
            articles: vec![Article {
                title: "Rust 2.0".to_string(),
                source: "Example".to_string(),
                ..Default::default()
            }],
            start_time: 1_700_000_000,
            ..Default::default()
        },
        TrendingStory {
            title: "cargo".to_string(),
            traffic: "500".to_string(),
            ..Default::default()
        },
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_text_without_colors() {
    let out = TextFormatter::new(false).format_topics(&topics(), "US", None);

    assert!(out.starts_with("Trending in US\n"));
    assert!(out.contains("  1. rust  20000+"));
    assert!(out.contains("     - Rust 2.0 (Example)"));
    assert!(out.contains("  2. cargo  500+"));
    assert!(!out.contains('\x1b'));
}

#[test]
fn test_text_limit() {
    let out = TextFormatter::new(false).format_topics(&topics(), "US", Some(1));
    assert!(out.contains("rust"));
    assert!(!out.contains("cargo"));
}

#[test]
fn test_text_empty() {
    let out = TextFormatter::new(false).format_topics(&DailyTrendingTopics::new(), "DE", None);
    assert!(out.contains("No trending searches"));
}

#[test]
fn test_text_colors() {
    let out = TextFormatter::new(true).format_suggestions(&["Rust".to_string()]);
    assert!(out.contains("\x1b[36mRust\x1b[0m"));
}

#[test]
fn test_json_topics() {
    let out = JsonFormatter::new(false).format_topics(&topics()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["allTrendingStories"][0]["title"], "rust");
    assert_eq!(value["summary"][1]["traffic"], "500");
    assert!(value["allTrendingStories"][1].get("endTime").is_none());
}

#[test]
fn test_json_suggestions() {
    let out = JsonFormatter::new(false)
        .format_suggestions(&["a".to_string(), "b".to_string()])
        .unwrap();
    assert_eq!(out, r#"{"suggestions":["a","b"]}"#);
}
