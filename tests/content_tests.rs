//! Integration tests for the content document and configuration files.

use std::fs;
use std::path::PathBuf;

use folio::content::parse_hex_color;
use folio::field::FieldConfig;
use folio::{Content, FolioConfig};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("folio-it-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Content
// ============================================================================

#[test]
fn test_embedded_content_is_complete() {
    let content = Content::embedded().unwrap();
    assert!(!content.profile.name.is_empty());
    assert_eq!(content.skills.len(), 11);
    assert_eq!(content.projects.len(), 5);
    assert_eq!(content.education.len(), 4);
    assert_eq!(content.hackathons.len(), 5);
    assert_eq!(content.blog.len(), 3);
    assert_eq!(content.marquees.len(), 2);
    assert!(content.marquees[1].reverse);
    assert_eq!(content.terminal.len(), 6);
}

#[test]
fn test_every_colour_parses() {
    let content = Content::embedded().unwrap();
    for skill in &content.skills {
        assert!(parse_hex_color(&skill.color).is_some(), "{}", skill.color);
    }
    for project in &content.projects {
        assert!(parse_hex_color(&project.color).is_some(), "{}", project.color);
    }
}

#[test]
fn test_nav_links_point_at_sections() {
    let content = Content::embedded().unwrap();
    for link in &content.nav {
        assert!(folio::nav::SECTION_IDS.contains(&link.id.as_str()), "{}", link.id);
    }
}

#[test]
fn test_content_file_overrides_embedded() {
    let dir = scratch("content");
    let path = dir.join("content.json");
    let mut content = Content::embedded().unwrap();
    content.profile.name = "Someone Else".into();
    fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

    let loaded = Content::load_or_embedded(Some(path.as_path())).unwrap();
    assert_eq!(loaded.profile.name, "Someone Else");
    assert_eq!(Content::load_or_embedded(None).unwrap(), Content::embedded().unwrap());
}

#[test]
fn test_bad_content_is_an_error() {
    assert!(Content::from_json("{ \"profile\": 3 }").is_err());
    assert!(Content::load("/nonexistent/folio/content.json").is_err());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_save_and_load() {
    let dir = scratch("config");
    let path = dir.join("folio.json");
    let config = FolioConfig::default()
        .with_window(1600, 900)
        .with_field(FieldConfig::default().with_count(120));
    config.save(&path).unwrap();

    let loaded = FolioConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.field.count, 120);
}

#[test]
fn test_partial_config_takes_defaults() {
    let config = FolioConfig::from_json(r#"{ "field": { "count": 10 } }"#).unwrap();
    assert_eq!(config.field.count, 10);
    assert_eq!(config.field.damping, FieldConfig::default().damping);
    assert_eq!(config.window, FolioConfig::default().window);
}

#[test]
fn test_explicit_config_path_wins() {
    let dir = scratch("discover");
    let path = dir.join("explicit.json");
    fs::write(&path, r#"{ "window": { "width": 640 } }"#).unwrap();
    let config = FolioConfig::discover(Some(path)).unwrap();
    assert_eq!(config.window.width, 640);
}
