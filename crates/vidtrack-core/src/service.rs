//! # Aspect Service
//!
//! Read-only queries over the aspect table.
//!
//! The service owns the built descriptors and never mutates them, so a
//! shared reference can be used from any number of threads. Queries that
//! take a [`Video`] compute completion on the fly; nothing is cached.

use crate::aspect::{AspectDescriptor, AspectDetail, AspectKey, AspectSummary};
use crate::mapping::standard_aspects;
use crate::{AspectError, CompletionCriterion, FieldViolation, MappingError, Value, Video};
use serde::Serialize;

/// Completion state of one field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCompletion {
    pub aspect_key: AspectKey,
    pub field_key: String,
    pub complete: bool,
}

/// Per-aspect completion counts for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProgress {
    pub aspects: Vec<AspectSummary>,
    pub completed_field_count: usize,
    pub total_field_count: usize,
}

impl RecordProgress {
    /// Whole-record completion as an integer percentage (0-100).
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.completed_field_count
            .saturating_mul(100)
            .checked_div(self.total_field_count)
            .map_or(0, |percent| percent.min(100) as u8)
    }
}

/// A validation failure of one field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    pub aspect_key: AspectKey,
    pub field_key: String,
    pub message: String,
    pub violation: FieldViolation,
}

/// Query façade over the aspect descriptors.
#[derive(Debug, Clone)]
pub struct AspectService {
    aspects: Vec<AspectDescriptor>,
}

impl AspectService {
    /// Create a service over already-built descriptors.
    #[must_use]
    pub fn new(aspects: Vec<AspectDescriptor>) -> Self {
        Self { aspects }
    }

    /// Create a service over the standard table.
    ///
    /// Fails only if the static table is inconsistent.
    pub fn standard() -> Result<Self, MappingError> {
        Ok(Self::new(standard_aspects()?.to_vec()))
    }

    /// Every aspect with every field, ordered by `order`.
    #[must_use]
    pub fn full_aspects(&self) -> &[AspectDescriptor] {
        &self.aspects
    }

    /// Every aspect with field counts only.
    ///
    /// `completed_field_count` stays zero; see [`AspectService::progress`]
    /// for counts against a record.
    #[must_use]
    pub fn aspects_overview(&self) -> Vec<AspectSummary> {
        self.aspects.iter().map(AspectDescriptor::summary).collect()
    }

    /// The fields of one aspect.
    pub fn aspect_fields(&self, key: &str) -> Result<AspectDetail, AspectError> {
        let aspect = self.find(key)?;
        Ok(AspectDetail {
            aspect_key: aspect.key,
            aspect_title: aspect.title.clone(),
            fields: aspect.fields.clone(),
        })
    }

    /// Look up one aspect by key.
    pub fn find(&self, key: &str) -> Result<&AspectDescriptor, AspectError> {
        self.aspects
            .iter()
            .find(|a| a.key.as_str() == key)
            .ok_or_else(|| AspectError::NotFound {
                key: key.to_string(),
            })
    }

    /// The criterion of a field, `FilledOnly` if the pair is unknown.
    #[must_use]
    pub fn criterion_for(&self, aspect_key: &str, field_key: &str) -> CompletionCriterion {
        self.find(aspect_key)
            .ok()
            .and_then(|aspect| aspect.field(field_key))
            .map(|field| field.completion_criterion)
            .unwrap_or_default()
    }

    /// Whether `value` completes the given field of `video`.
    #[must_use]
    pub fn is_field_complete(
        &self,
        aspect_key: &str,
        field_key: &str,
        value: &Value,
        video: &Video,
    ) -> bool {
        self.criterion_for(aspect_key, field_key)
            .is_complete(value, video)
    }

    /// Completion state of every field of `video`, in table order.
    #[must_use]
    pub fn field_completion(&self, video: &Video) -> Vec<FieldCompletion> {
        self.aspects
            .iter()
            .flat_map(|aspect| {
                aspect.fields.iter().map(move |field| FieldCompletion {
                    aspect_key: aspect.key,
                    field_key: field.key.clone(),
                    complete: field
                        .completion_criterion
                        .is_complete(&video.value_at(&field.property_path), video),
                })
            })
            .collect()
    }

    /// Per-aspect completed/total counts for `video`.
    #[must_use]
    pub fn progress(&self, video: &Video) -> RecordProgress {
        let aspects: Vec<AspectSummary> = self
            .aspects
            .iter()
            .map(|aspect| {
                let completed = aspect
                    .fields
                    .iter()
                    .filter(|field| {
                        field
                            .completion_criterion
                            .is_complete(&video.value_at(&field.property_path), video)
                    })
                    .count();
                AspectSummary {
                    completed_field_count: completed,
                    ..aspect.summary()
                }
            })
            .collect();

        RecordProgress {
            completed_field_count: aspects.iter().map(|a| a.completed_field_count).sum(),
            total_field_count: aspects.iter().map(|a| a.field_count).sum(),
            aspects,
        }
    }

    /// Run every field's type validator against `video`.
    #[must_use]
    pub fn validate(&self, video: &Video) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        for aspect in &self.aspects {
            for field in &aspect.fields {
                if let Err(violation) = field.validate(&video.value_at(&field.property_path)) {
                    issues.push(FieldIssue {
                        aspect_key: aspect.key,
                        field_key: field.key.clone(),
                        message: violation.to_string(),
                        violation,
                    });
                }
            }
        }
        issues
    }
}

// =============================================================================
// TESTS
// =============================================================================
