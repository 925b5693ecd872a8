//! Configuration persistence tests.
//!
//! A resolver built from a saved and reloaded TOML config must behave exactly
//! like one built from the in-memory config it was saved from.

use page_sentinel::config::ResolverConfig;
use page_sentinel::dom::PageDocument;
use page_sentinel::error::ConfigError;
use page_sentinel::page::PageType;
use page_sentinel::resolver::Resolver;

#[test]
fn custom_domains_survive_save_and_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("sentinel.toml");

    let mut config = ResolverConfig::default();
    config.domains.news.push("dailyplanet".into());
    config.include_debug = false;
    config.save(&path).unwrap();

    let loaded = ResolverConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let page = PageDocument::parse("https://www.dailyplanet.example/", "<p>Headlines</p>").unwrap();
    let ctx = Resolver::new(&loaded).unwrap().resolve(&page);
    assert_eq!(ctx.page_type, PageType::News);
    assert_eq!(ctx.intent_labels(), vec!["url:known-news-domain"]);
    assert!(ctx.debug.is_none());
}

#[test]
fn partial_file_overrides_only_named_thresholds() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("strict.toml");
    std::fs::write(
        &path,
        r#"
[thresholds]
popups_max = 0
threaded_comments_min = 1
"#,
    )
    .unwrap();

    let config = ResolverConfig::load(&path).unwrap();
    let resolver = Resolver::new(&config).unwrap();
    let page = PageDocument::parse(
        "https://example.org/",
        r#"<div class="modal"></div><div class="comment">a</div><div class="comment">b</div>"#,
    )
    .unwrap();
    let ctx = resolver.resolve(&page);
    assert_eq!(ctx.risk_labels(), vec!["risk:excessive-popups"]);
    assert_eq!(
        ctx.intent_labels(),
        vec!["dom:threaded-comments (2 comments)"]
    );
}

#[test]
fn damping_constant_changes_confidence() {
    let mut config = ResolverConfig::default();
    config.thresholds.confidence_damping = 1.0;
    let page = PageDocument::parse("https://example.org/", "<article></article>").unwrap();
    let ctx = Resolver::new(&config).unwrap().resolve(&page);
    assert_eq!(ctx.confidence, 0.5);
}

#[test]
fn malformed_toml_reports_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "include_debug = [not toml").unwrap();

    match ResolverConfig::load(&path) {
        Err(ConfigError::Parse { path: reported, .. }) => {
            assert!(reported.ends_with("broken.toml"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn default_config_prints_as_toml_and_parses_back() {
    let config = ResolverConfig::default();
    let text = config.to_toml().unwrap();
    assert!(text.contains("[thresholds]"));
    let back = ResolverConfig::from_toml_str(&text, "printed").unwrap();
    assert_eq!(back, config);
}
