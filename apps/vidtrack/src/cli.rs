//! # CLI Commands
//!
//! Each command renders its result into a [`Report`]; `main` prints it and
//! maps `ok == false` to a failing exit code.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use vidtrack_core::{AspectError, AspectService, Video};

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid video record in {path}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode JSON output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Aspect(#[from] AspectError),
}

/// Rendered command output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: String,
    pub ok: bool,
}

impl Report {
    fn ok(output: String) -> Self {
        Self { output, ok: true }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Read a video record from a JSON file.
pub fn load_video(path: &Path) -> Result<Video, CliError> {
    debug!("Loading video record from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Record {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Full metadata of every aspect.
pub fn cmd_aspects(service: &AspectService, json: bool) -> Result<Report, CliError> {
    let aspects = service.full_aspects();
    if json {
        return Ok(Report::ok(to_json(aspects)?));
    }

    let mut out = String::new();
    for aspect in aspects {
        out.push_str(&format!(
            "{}. {} ({})\n   {}\n",
            aspect.order, aspect.title, aspect.key, aspect.description
        ));
        for field in &aspect.fields {
            out.push_str(&format!(
                "   {:>2}. {:<22} {:<8} {}\n",
                field.order,
                field.key,
                field.semantic_type.as_str(),
                field.completion_criterion
            ));
        }
    }
    Ok(Report::ok(out))
}

/// Aspect summaries with field counts.
pub fn cmd_overview(service: &AspectService, json: bool) -> Result<Report, CliError> {
    let overview = service.aspects_overview();
    if json {
        return Ok(Report::ok(to_json(&overview)?));
    }

    let mut out = String::new();
    for summary in &overview {
        out.push_str(&format!(
            "{}. {:<16} {:<16} {:>2} fields\n",
            summary.order, summary.title, summary.key, summary.field_count
        ));
    }
    Ok(Report::ok(out))
}

/// Fields of one aspect.
pub fn cmd_fields(service: &AspectService, key: &str, json: bool) -> Result<Report, CliError> {
    debug!("Listing fields of aspect '{}'", key);
    let detail = service.aspect_fields(key)?;
    if json {
        return Ok(Report::ok(to_json(&detail)?));
    }

    let mut out = format!("{} ({})\n", detail.aspect_title, detail.aspect_key);
    for field in &detail.fields {
        let required = if field.required { ", required" } else { "" };
        out.push_str(&format!(
            "{:>2}. {} [{}{}] {} -> {}\n",
            field.order,
            field.display_name,
            field.semantic_type.as_str(),
            required,
            field.property_path,
            field.completion_criterion
        ));
        if !field.options.is_empty() {
            out.push_str(&format!("    options: {}\n", field.options.join(", ")));
        }
    }
    Ok(Report::ok(out))
}

/// Completion progress of a record file.
pub fn cmd_progress(service: &AspectService, path: &Path, json: bool) -> Result<Report, CliError> {
    let video = load_video(path)?;
    let progress = service.progress(&video);
    if json {
        return Ok(Report::ok(to_json(&progress)?));
    }

    let name = if video.name.is_empty() {
        "video"
    } else {
        video.name.as_str()
    };
    let mut out = format!(
        "{}: {}/{} fields complete ({}%)\n",
        name,
        progress.completed_field_count,
        progress.total_field_count,
        progress.percent()
    );
    for aspect in &progress.aspects {
        out.push_str(&format!(
            "{}. {:<16} {:>2}/{:<2}\n",
            aspect.order, aspect.title, aspect.completed_field_count, aspect.field_count
        ));
    }
    Ok(Report::ok(out))
}

/// Field type violations of a record file. Not ok when any are found.
pub fn cmd_validate(service: &AspectService, path: &Path, json: bool) -> Result<Report, CliError> {
    let video = load_video(path)?;
    let issues = service.validate(&video);
    let ok = issues.is_empty();

    let output = if json {
        to_json(&issues)?
    } else if ok {
        "No issues found\n".to_string()
    } else {
        let mut out = format!("{} issue(s):\n", issues.len());
        for issue in &issues {
            out.push_str(&format!(
                "  {}.{}: {}\n",
                issue.aspect_key, issue.field_key, issue.message
            ));
        }
        out
    };
    Ok(Report { output, ok })
}

// =============================================================================
// TESTS
// =============================================================================
