//! Integration tests for vidtrack CLI commands.
//!
//! Uses tempfile for the JSON record files.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use std::path::PathBuf;
use tempfile::TempDir;
use vidtrack::cli::{
    CliError, cmd_aspects, cmd_fields, cmd_overview, cmd_progress, cmd_validate, load_video,
};
use vidtrack_core::AspectService;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn service() -> AspectService {
    AspectService::standard().unwrap()
}

/// Write a record file and return its path.
fn write_record(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A record that passes every type validator.
fn valid_record(dir: &TempDir) -> PathBuf {
    write_record(
        dir,
        "valid.json",
        r#"{
            "name": "crossplane-intro",
            "projectName": "Crossplane",
            "projectURL": "https://crossplane.io",
            "date": "2025-03-01T14:30",
            "category": "kubernetes",
            "title": "Crossplane in 10 minutes",
            "language": "en",
            "uploadVideo": "final.mp4",
            "videoId": "abc123",
            "hugoPath": "content/crossplane.md"
        }"#,
    )
}

// =============================================================================
// METADATA COMMANDS
// =============================================================================

#[test]
fn test_aspects_json_lists_every_aspect() {
    let report = cmd_aspects(&service(), true).unwrap();
    assert!(report.ok);

    let json: serde_json::Value = serde_json::from_str(&report.output).unwrap();
    let aspects = json.as_array().unwrap();
    assert_eq!(aspects.len(), 6);
    assert_eq!(aspects[0]["key"], "initial-details");
    assert_eq!(aspects[5]["key"], "post-publish");
    assert_eq!(aspects[0]["fields"][0]["key"], "projectName");
    assert_eq!(aspects[0]["fields"][0]["order"], 1);
}

#[test]
fn test_aspects_text_mentions_criteria() {
    let report = cmd_aspects(&service(), false).unwrap();
    assert!(report.output.contains("1. Initial Details (initial-details)"));
    assert!(report.output.contains("conditional:sponsors_notified"));
}

#[test]
fn test_overview_json_counts_fields() {
    let report = cmd_overview(&service(), true).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.output).unwrap();
    let total: u64 = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["fieldCount"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 49);
}

#[test]
fn test_fields_json_for_known_aspect() {
    let report = cmd_fields(&service(), "publishing", true).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.output).unwrap();
    assert_eq!(json["aspectKey"], "publishing");
    assert_eq!(json["fields"].as_array().unwrap().len(), 3);
}

#[test]
fn test_fields_text_shows_select_options() {
    let report = cmd_fields(&service(), "definition", false).unwrap();
    assert!(report.output.contains("options: en, es"));
}

#[test]
fn test_fields_unknown_aspect_fails() {
    let result = cmd_fields(&service(), "editing", false);
    assert!(matches!(result, Err(CliError::Aspect(_))));
}

// =============================================================================
// RECORD COMMANDS
// =============================================================================

#[test]
fn test_load_video_accepts_partial_record() {
    let temp = create_temp_dir();
    let path = write_record(&temp, "partial.json", r#"{"name": "demo"}"#);

    let video = load_video(&path).unwrap();
    assert_eq!(video.name, "demo");
    assert!(video.project_name.is_empty());
}

#[test]
fn test_load_video_missing_file() {
    let temp = create_temp_dir();
    let result = load_video(&temp.path().join("missing.json"));
    assert!(matches!(result, Err(CliError::Io { .. })));
}

#[test]
fn test_load_video_malformed_json() {
    let temp = create_temp_dir();
    let path = write_record(&temp, "broken.json", "{ not json");
    let result = load_video(&path);
    assert!(matches!(result, Err(CliError::Record { .. })));
}

#[test]
fn test_progress_text_summary() {
    let temp = create_temp_dir();
    let path = valid_record(&temp);

    let report = cmd_progress(&service(), &path, false).unwrap();
    assert!(report.ok);
    assert!(report.output.starts_with("crossplane-intro: "));
    assert_eq!(report.output.lines().count(), 7);
}

#[test]
fn test_progress_json_publishing_complete() {
    let temp = create_temp_dir();
    let path = valid_record(&temp);

    let report = cmd_progress(&service(), &path, true).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.output).unwrap();
    let publishing = &json["aspects"][4];
    assert_eq!(publishing["key"], "publishing");
    assert_eq!(publishing["completedFieldCount"], 3);
    assert_eq!(json["totalFieldCount"], 49);
}

#[test]
fn test_validate_clean_record() {
    let temp = create_temp_dir();
    let path = valid_record(&temp);

    let report = cmd_validate(&service(), &path, false).unwrap();
    assert!(report.ok);
    assert_eq!(report.output, "No issues found\n");
}

#[test]
fn test_validate_reports_issues() {
    let temp = create_temp_dir();
    let path = write_record(
        &temp,
        "bad.json",
        r#"{
            "projectName": "Crossplane",
            "title": "Intro",
            "date": "next week",
            "language": "fr"
        }"#,
    );

    let report = cmd_validate(&service(), &path, false).unwrap();
    assert!(!report.ok);
    assert!(report.output.starts_with("2 issue(s):"));
    assert!(report.output.contains("  initial-details.date: "));
    assert!(report.output.contains("  definition.language: "));
}

#[test]
fn test_validate_json_carries_rule() {
    let temp = create_temp_dir();
    let path = write_record(&temp, "empty.json", "{}");

    let report = cmd_validate(&service(), &path, true).unwrap();
    assert!(!report.ok);
    let json: serde_json::Value = serde_json::from_str(&report.output).unwrap();
    let first = &json[0];
    assert_eq!(first["fieldKey"], "projectName");
    assert_eq!(first["violation"]["rule"], "required");
}
