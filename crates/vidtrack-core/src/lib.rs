//! # vidtrack-core
//!
//! Aspect field metadata and completion engine for the video production
//! workflow.
//!
//! A [`Video`] accumulates attributes over six ordered production phases
//! ("aspects"). This crate describes those attributes and judges them:
//!
//! - [`field_types`]: the six semantic field kinds, each a validator plus
//!   UI hints, validation hints and a default value.
//! - [`mapping`]: the static table binding record attributes to field
//!   descriptors, grouped into aspects, checked when it is built.
//! - [`completion`]: decides whether a field's value counts as done,
//!   including the sponsorship-dependent rules.
//! - [`service`]: read-only queries over the built table.
//!
//! Everything here is pure and synchronous. No I/O, no persistence.
//!
//! ```
//! use vidtrack_core::{AspectService, Video};
//!
//! let service = AspectService::standard().expect("static table is consistent");
//! let detail = service.aspect_fields("initial-details").expect("canonical key");
//! assert_eq!(detail.fields[0].order, 1);
//!
//! let mut video = Video::new("intro");
//! video.sponsorship.amount = "500".to_string();
//! let progress = service.progress(&video);
//! assert_eq!(progress.aspects.len(), 6);
//! ```

pub mod aspect;
pub mod completion;
pub mod error;
pub mod field_types;
pub mod mapping;
pub mod service;
pub mod value;
pub mod video;

pub use aspect::{AspectDescriptor, AspectDetail, AspectKey, AspectSummary, FieldDescriptor};
pub use completion::{CompletionCriterion, ConditionalRule};
pub use error::{AspectError, FieldViolation, MappingError};
pub use field_types::{FieldKind, FieldType, SemanticType, UiHints, ValidationHints};
pub use service::{AspectService, FieldCompletion, FieldIssue, RecordProgress};
pub use value::Value;
pub use video::{Sponsorship, Video};
