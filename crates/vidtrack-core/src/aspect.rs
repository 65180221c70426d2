//! # Aspect Module
//!
//! The six production phases and the descriptor types published for them.
//!
//! Descriptors are metadata only. Completion state is never stored here;
//! it is computed against a live [`Video`](crate::Video) by the service.

use crate::field_types::{FieldKind, FieldType, SemanticType, UiHints, ValidationHints};
use crate::{AspectError, CompletionCriterion, Value};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ASPECT KEY
// =============================================================================

/// One of the six production phases, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectKey {
    InitialDetails,
    WorkProgress,
    Definition,
    PostProduction,
    Publishing,
    PostPublish,
}

impl AspectKey {
    /// All aspects in canonical order.
    pub const ALL: [AspectKey; 6] = [
        AspectKey::InitialDetails,
        AspectKey::WorkProgress,
        AspectKey::Definition,
        AspectKey::PostProduction,
        AspectKey::Publishing,
        AspectKey::PostPublish,
    ];

    /// Kebab-case key used in URLs and payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialDetails => "initial-details",
            Self::WorkProgress => "work-progress",
            Self::Definition => "definition",
            Self::PostProduction => "post-production",
            Self::Publishing => "publishing",
            Self::PostPublish => "post-publish",
        }
    }

    /// 1-based position in the canonical sequence.
    #[must_use]
    pub fn order(self) -> u32 {
        match self {
            Self::InitialDetails => 1,
            Self::WorkProgress => 2,
            Self::Definition => 3,
            Self::PostProduction => 4,
            Self::Publishing => 5,
            Self::PostPublish => 6,
        }
    }

    /// Record-editing endpoint for this aspect.
    #[must_use]
    pub fn endpoint(self) -> String {
        format!("/api/videos/{{videoName}}/{}", self.as_str())
    }
}

impl fmt::Display for AspectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AspectKey {
    type Err = AspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| AspectError::NotFound { key: s.to_string() })
    }
}

// =============================================================================
// FIELD DESCRIPTOR
// =============================================================================

/// Metadata for one editable attribute of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub key: String,
    pub display_name: String,
    /// Attribute path on [`Video`](crate::Video), e.g. `Sponsorship.Amount`.
    pub property_path: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    pub required: bool,
    /// 1-based position within the aspect.
    pub order: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub ui_hints: UiHints,
    pub validation_hints: ValidationHints,
    pub default_value: Value,
    pub completion_criterion: CompletionCriterion,
    #[serde(skip)]
    pub field_type: FieldType,
}

impl FieldDescriptor {
    /// Run the field's type validator.
    pub fn validate(&self, value: &Value) -> Result<(), crate::FieldViolation> {
        self.field_type.validate(value)
    }
}

// =============================================================================
// ASPECT DESCRIPTOR / SUMMARY / DETAIL
// =============================================================================

/// Full metadata for one aspect, fields included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectDescriptor {
    pub key: AspectKey,
    pub title: String,
    pub description: String,
    pub endpoint: String,
    pub icon: String,
    pub order: u32,
    pub fields: Vec<FieldDescriptor>,
}

impl AspectDescriptor {
    /// Find a field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Summary with the completed count left at zero.
    #[must_use]
    pub fn summary(&self) -> AspectSummary {
        AspectSummary {
            key: self.key,
            title: self.title.clone(),
            description: self.description.clone(),
            endpoint: self.endpoint.clone(),
            icon: self.icon.clone(),
            order: self.order,
            field_count: self.fields.len(),
            completed_field_count: 0,
        }
    }
}

/// Lightweight view of an aspect: counts instead of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectSummary {
    pub key: AspectKey,
    pub title: String,
    pub description: String,
    pub endpoint: String,
    pub icon: String,
    pub order: u32,
    pub field_count: usize,
    /// Only filled when a record was supplied.
    pub completed_field_count: usize,
}

/// The fields of a single aspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectDetail {
    pub aspect_key: AspectKey,
    pub aspect_title: String,
    pub fields: Vec<FieldDescriptor>,
}

// =============================================================================
// TESTS
// =============================================================================
