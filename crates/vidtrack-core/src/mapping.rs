//! # Mapping Module
//!
//! The declarative table binding video attributes to aspect fields.
//!
//! [`ASPECTS`] lists, per aspect and in canonical order, every field's key,
//! property path, semantic type, required flag, explicit 1-based order and
//! completion criterion. [`build_aspects`] turns the table into descriptors
//! and rejects any inconsistency: aspect sequence, field order against
//! position, duplicate keys, dangling property paths, option lists.
//!
//! The built table is process-wide and immutable; [`standard_aspects`]
//! builds it once on first access.

use crate::aspect::{AspectDescriptor, AspectKey, FieldDescriptor};
use crate::completion::CompletionCriterion::{
    EmptyOrFilled, FalseOnly, FilledOnly, FilledRequired, NoFixme, TrueOnly,
};
use crate::completion::{CompletionCriterion, ConditionalRule};
use crate::field_types::SemanticType::{Boolean, Date, Select, Text};
use crate::field_types::{FieldKind, FieldType, SemanticType};
use crate::{MappingError, Video};
use std::collections::BTreeSet;
use std::sync::OnceLock;

// =============================================================================
// TABLE ENTRY TYPES
// =============================================================================

/// One row of the field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub path: &'static str,
    pub semantic: SemanticType,
    pub order: u32,
    pub criterion: CompletionCriterion,
    pub required: bool,
    pub options: &'static [&'static str],
    pub description: &'static str,
}

impl FieldSpec {
    const fn new(
        order: u32,
        key: &'static str,
        name: &'static str,
        path: &'static str,
        semantic: SemanticType,
        criterion: CompletionCriterion,
    ) -> Self {
        Self {
            key,
            name,
            path,
            semantic,
            order,
            criterion,
            required: false,
            options: &[],
            description: "",
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// One aspect of the field table.
#[derive(Debug, Clone, Copy)]
pub struct AspectSpec {
    pub key: AspectKey,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub order: u32,
    pub fields: &'static [FieldSpec],
}

// =============================================================================
// THE TABLE
// =============================================================================

const SPONSOR_EMAILS: CompletionCriterion =
    CompletionCriterion::Conditional(ConditionalRule::SponsorEmails);
const SPONSORS_NOTIFIED: CompletionCriterion =
    CompletionCriterion::Conditional(ConditionalRule::SponsorsNotified);

/// Categories a video can be filed under.
pub const CATEGORIES: &[&str] = &[
    "ai",
    "app-dev",
    "ci-cd",
    "databases",
    "devex",
    "internal-developer-platforms",
    "kubernetes",
    "misc",
    "observability",
    "security",
    "terminal",
];

/// Languages a video can be recorded in.
pub const LANGUAGES: &[&str] = &["en", "es"];

#[rustfmt::skip]
const INITIAL_DETAILS: &[FieldSpec] = &[
    FieldSpec::new(1, "projectName", "Project Name", "ProjectName", SemanticType::String, FilledOnly)
        .required()
        .describe("Name of the project the video is about"),
    FieldSpec::new(2, "projectURL", "Project URL", "ProjectURL", SemanticType::String, FilledOnly)
        .describe("Home page or repository of the project"),
    FieldSpec::new(3, "sponsorshipAmount", "Sponsorship Amount", "Sponsorship.Amount", SemanticType::String, FilledOnly)
        .describe("Sponsorship amount, N/A or - when there is no sponsor"),
    FieldSpec::new(4, "sponsorshipEmails", "Sponsorship Emails", "Sponsorship.Emails", SemanticType::String, SPONSOR_EMAILS)
        .describe("Sponsor contacts, needed only when the video is sponsored"),
    FieldSpec::new(5, "sponsorshipBlocked", "Sponsorship Blocked", "Sponsorship.Blocked", SemanticType::String, EmptyOrFilled)
        .describe("Why the sponsorship is blocked; leave empty when it is not"),
    FieldSpec::new(6, "date", "Publish Date", "Date", Date, FilledOnly)
        .describe("Planned publish date and time"),
    FieldSpec::new(7, "delayed", "Delayed", "Delayed", Boolean, FalseOnly)
        .describe("Whether publishing is delayed"),
    FieldSpec::new(8, "gist", "Gist", "Gist", SemanticType::String, FilledOnly)
        .describe("Path to the gist with the commands used in the video"),
];

#[rustfmt::skip]
const WORK_PROGRESS: &[FieldSpec] = &[
    FieldSpec::new(1, "code", "Code Done", "Code", Boolean, TrueOnly),
    FieldSpec::new(2, "head", "Talking Head Done", "Head", Boolean, TrueOnly),
    FieldSpec::new(3, "screen", "Screen Recording Done", "Screen", Boolean, TrueOnly),
    FieldSpec::new(4, "relatedVideos", "Related Videos", "RelatedVideos", Text, FilledOnly)
        .describe("Videos to link from this one, one per line"),
    FieldSpec::new(5, "thumbnails", "Thumbnails Done", "Thumbnails", Boolean, TrueOnly),
    FieldSpec::new(6, "diagrams", "Diagrams Done", "Diagrams", Boolean, TrueOnly),
    FieldSpec::new(7, "screenshots", "Screenshots Done", "Screenshots", Boolean, TrueOnly),
    FieldSpec::new(8, "location", "Files Location", "Location", SemanticType::String, FilledOnly)
        .describe("Where the recorded material is stored"),
    FieldSpec::new(9, "tagline", "Tagline", "Tagline", SemanticType::String, FilledOnly),
    FieldSpec::new(10, "taglineIdeas", "Tagline Ideas", "TaglineIdeas", Text, FilledOnly),
    FieldSpec::new(11, "otherLogos", "Other Logos", "OtherLogos", SemanticType::String, FilledOnly)
        .describe("Logos to show besides the project's own"),
];

#[rustfmt::skip]
const DEFINITION: &[FieldSpec] = &[
    FieldSpec::new(1, "category", "Category", "Category", Select, FilledOnly).options(CATEGORIES),
    FieldSpec::new(2, "title", "Title", "Title", SemanticType::String, FilledRequired)
        .required()
        .describe("Video title as published"),
    FieldSpec::new(3, "description", "Description", "Description", Text, FilledOnly),
    FieldSpec::new(4, "highlight", "Highlight", "Highlight", SemanticType::String, FilledOnly)
        .describe("Segment to feature as a short"),
    FieldSpec::new(5, "tags", "Tags", "Tags", Text, FilledOnly)
        .describe("Comma-separated video tags"),
    FieldSpec::new(6, "descriptionTags", "Description Tags", "DescriptionTags", Text, FilledOnly)
        .describe("Hashtags appended to the description"),
    FieldSpec::new(7, "tweet", "Tweet", "Tweet", Text, FilledOnly),
    FieldSpec::new(8, "animations", "Animations Script", "Animations", Text, NoFixme)
        .describe("Animation instructions; entries marked FIXME: are unfinished"),
    FieldSpec::new(9, "requestThumbnail", "Request Thumbnail Generation", "RequestThumbnail", Boolean, TrueOnly),
    FieldSpec::new(10, "language", "Language", "Language", Select, FilledOnly).options(LANGUAGES),
];

#[rustfmt::skip]
const POST_PRODUCTION: &[FieldSpec] = &[
    FieldSpec::new(1, "thumbnail", "Thumbnail Path", "Thumbnail", SemanticType::String, FilledOnly),
    FieldSpec::new(2, "members", "Members", "Members", SemanticType::String, FilledOnly)
        .describe("Channel members to thank"),
    FieldSpec::new(3, "requestEdit", "Edit Requested", "RequestEdit", Boolean, TrueOnly),
    FieldSpec::new(4, "timecodes", "Timecodes", "Timecodes", Text, NoFixme)
        .describe("Chapter timecodes; entries marked FIXME: are unfinished"),
    FieldSpec::new(5, "movie", "Movie Done", "Movie", Boolean, TrueOnly),
    FieldSpec::new(6, "slides", "Slides Done", "Slides", Boolean, TrueOnly),
];

#[rustfmt::skip]
const PUBLISHING: &[FieldSpec] = &[
    FieldSpec::new(1, "uploadVideo", "Video File Path", "UploadVideo", SemanticType::String, FilledOnly)
        .describe("Path of the final video file to upload"),
    FieldSpec::new(2, "videoId", "YouTube Video ID", "VideoId", SemanticType::String, FilledOnly),
    FieldSpec::new(3, "hugoPath", "Hugo Post Path", "HugoPath", SemanticType::String, FilledOnly)
        .describe("Path of the blog post for the video"),
];

#[rustfmt::skip]
const POST_PUBLISH: &[FieldSpec] = &[
    FieldSpec::new(1, "dotPosted", "DevOps Toolkit Posted", "DOTPosted", Boolean, TrueOnly),
    FieldSpec::new(2, "blueSkyPosted", "BlueSky Posted", "BlueSkyPosted", Boolean, TrueOnly),
    FieldSpec::new(3, "linkedInPosted", "LinkedIn Posted", "LinkedInPosted", Boolean, TrueOnly),
    FieldSpec::new(4, "slackPosted", "Slack Posted", "SlackPosted", Boolean, TrueOnly),
    FieldSpec::new(5, "hnPosted", "Hacker News Posted", "HNPosted", Boolean, TrueOnly),
    FieldSpec::new(6, "youTubeHighlight", "YouTube Highlight", "YouTubeHighlight", Boolean, TrueOnly),
    FieldSpec::new(7, "youTubeComment", "YouTube Comment", "YouTubeComment", Boolean, TrueOnly),
    FieldSpec::new(8, "youTubeCommentReply", "YouTube Comment Replies", "YouTubeCommentReply", Boolean, TrueOnly),
    FieldSpec::new(9, "gde", "GDE Advocu Posted", "GDE", Boolean, TrueOnly),
    FieldSpec::new(10, "repo", "Code Repository", "Repo", SemanticType::String, FilledOnly),
    FieldSpec::new(11, "notifiedSponsors", "Notify Sponsors", "NotifiedSponsors", Boolean, SPONSORS_NOTIFIED)
        .describe("Sponsors were told the video is live; not needed without a sponsor"),
];

/// The field table, one entry per aspect in canonical order.
pub const ASPECTS: &[AspectSpec] = &[
    AspectSpec {
        key: AspectKey::InitialDetails,
        title: "Initial Details",
        description: "Project information, sponsorship and publish date",
        icon: "info",
        order: 1,
        fields: INITIAL_DETAILS,
    },
    AspectSpec {
        key: AspectKey::WorkProgress,
        title: "Work Progress",
        description: "Recording and material preparation",
        icon: "work",
        order: 2,
        fields: WORK_PROGRESS,
    },
    AspectSpec {
        key: AspectKey::Definition,
        title: "Definition",
        description: "Title, description, tags and other metadata",
        icon: "edit",
        order: 3,
        fields: DEFINITION,
    },
    AspectSpec {
        key: AspectKey::PostProduction,
        title: "Post-Production",
        description: "Editing, thumbnail and timecodes",
        icon: "film",
        order: 4,
        fields: POST_PRODUCTION,
    },
    AspectSpec {
        key: AspectKey::Publishing,
        title: "Publishing",
        description: "Upload and blog post",
        icon: "upload",
        order: 5,
        fields: PUBLISHING,
    },
    AspectSpec {
        key: AspectKey::PostPublish,
        title: "Post-Publish",
        description: "Promotion and sponsor follow-up",
        icon: "share",
        order: 6,
        fields: POST_PUBLISH,
    },
];

// =============================================================================
// TABLE BUILD
// =============================================================================

/// Build descriptors for a whole table.
///
/// The table must list exactly the canonical aspects, in canonical order,
/// each declaring its 1-based position as its order.
pub fn build_aspects(specs: &[AspectSpec]) -> Result<Vec<AspectDescriptor>, MappingError> {
    if specs.len() != AspectKey::ALL.len() {
        return Err(MappingError::AspectCount {
            expected: AspectKey::ALL.len(),
            found: specs.len(),
        });
    }

    specs
        .iter()
        .zip(AspectKey::ALL)
        .enumerate()
        .map(|(position, (spec, expected))| {
            if spec.key != expected {
                return Err(MappingError::AspectSequence {
                    position,
                    expected: expected.to_string(),
                    found: spec.key.to_string(),
                });
            }
            build_aspect(spec)
        })
        .collect()
}

/// Build the descriptor of a single aspect.
pub fn build_aspect(spec: &AspectSpec) -> Result<AspectDescriptor, MappingError> {
    if spec.order != spec.key.order() {
        return Err(MappingError::AspectOrder {
            key: spec.key.to_string(),
            declared: spec.order,
            expected: spec.key.order(),
        });
    }

    let blank = Video::default();
    let mut seen = BTreeSet::new();
    let mut fields = Vec::with_capacity(spec.fields.len());

    for (index, field) in spec.fields.iter().enumerate() {
        let expected = index as u32 + 1;
        if field.order != expected {
            return Err(MappingError::FieldOrder {
                aspect: spec.key.to_string(),
                field: field.key.to_string(),
                declared: field.order,
                expected,
            });
        }
        if !seen.insert(field.key) {
            return Err(MappingError::DuplicateField {
                aspect: spec.key.to_string(),
                field: field.key.to_string(),
            });
        }
        if blank.resolve(field.path).is_none() {
            return Err(MappingError::DanglingPath {
                aspect: spec.key.to_string(),
                field: field.key.to_string(),
                path: field.path.to_string(),
            });
        }
        match (field.semantic, field.options.is_empty()) {
            (SemanticType::Select, true) => {
                return Err(MappingError::MissingOptions {
                    aspect: spec.key.to_string(),
                    field: field.key.to_string(),
                });
            }
            (semantic, false) if semantic != SemanticType::Select => {
                return Err(MappingError::UnexpectedOptions {
                    aspect: spec.key.to_string(),
                    field: field.key.to_string(),
                });
            }
            _ => {}
        }

        fields.push(describe_field(field));
    }

    Ok(AspectDescriptor {
        key: spec.key,
        title: spec.title.to_string(),
        description: spec.description.to_string(),
        endpoint: spec.key.endpoint(),
        icon: spec.icon.to_string(),
        order: spec.order,
        fields,
    })
}

fn describe_field(spec: &FieldSpec) -> FieldDescriptor {
    let field_type = FieldType::of(spec.semantic, spec.required, spec.options);
    let mut ui_hints = field_type.ui_hints();
    ui_hints.help_text = spec.description.to_string();

    FieldDescriptor {
        key: spec.key.to_string(),
        display_name: spec.name.to_string(),
        property_path: spec.path.to_string(),
        semantic_type: field_type.semantic_type(),
        required: spec.required,
        order: spec.order,
        description: spec.description.to_string(),
        options: field_type.options().to_vec(),
        ui_hints,
        validation_hints: field_type.validation_hints(),
        default_value: field_type.default_value(),
        completion_criterion: spec.criterion,
        field_type,
    }
}

/// The standard table, built on first access and shared afterwards.
pub fn standard_aspects() -> Result<&'static [AspectDescriptor], MappingError> {
    static TABLE: OnceLock<Result<Vec<AspectDescriptor>, MappingError>> = OnceLock::new();

    match TABLE.get_or_init(|| build_aspects(ASPECTS)) {
        Ok(aspects) => Ok(aspects.as_slice()),
        Err(e) => Err(e.clone()),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aspect_with(fields: &'static [FieldSpec]) -> AspectSpec {
        AspectSpec {
            fields,
            ..ASPECTS[0]
        }
    }

    #[test]
    fn standard_table_builds() {
        let aspects = standard_aspects().unwrap();
        assert_eq!(aspects.len(), 6);
        let total: usize = aspects.iter().map(|a| a.fields.len()).sum();
        assert_eq!(total, 49);
    }

    #[test]
    fn aspect_orders_are_one_to_six() {
        let orders: Vec<u32> = standard_aspects()
            .unwrap()
            .iter()
            .map(|a| a.order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn field_orders_are_contiguous_from_one() {
        for aspect in standard_aspects().unwrap() {
            let orders: Vec<u32> = aspect.fields.iter().map(|f| f.order).collect();
            let expected: Vec<u32> = (1..=aspect.fields.len() as u32).collect();
            assert_eq!(orders, expected, "aspect {}", aspect.key);
        }
    }

    #[test]
    fn field_keys_are_unique_per_aspect() {
        for aspect in standard_aspects().unwrap() {
            let keys: BTreeSet<&str> = aspect.fields.iter().map(|f| f.key.as_str()).collect();
            assert_eq!(keys.len(), aspect.fields.len(), "aspect {}", aspect.key);
        }
    }

    #[test]
    fn every_path_resolves() {
        let video = Video::default();
        for aspect in standard_aspects().unwrap() {
            for field in &aspect.fields {
                assert!(
                    video.resolve(&field.property_path).is_some(),
                    "{}",
                    field.property_path
                );
            }
        }
    }

    #[test]
    fn descriptors_carry_type_metadata() {
        let aspects = standard_aspects().unwrap();
        let definition = &aspects[2];

        let category = definition.field("category").unwrap();
        assert_eq!(category.semantic_type, SemanticType::Select);
        assert_eq!(category.options.len(), CATEGORIES.len());
        assert_eq!(category.default_value, crate::Value::text("ai"));
        assert_eq!(category.ui_hints.input_type, "select");

        let title = definition.field("title").unwrap();
        assert!(title.required);
        assert!(title.validation_hints.required);
        assert_eq!(title.completion_criterion, FilledRequired);

        let description = definition.field("description").unwrap();
        assert_eq!(description.ui_hints.rows, Some(3));

        let emails = aspects[0].field("sponsorshipEmails").unwrap();
        assert_eq!(emails.completion_criterion, SPONSOR_EMAILS);
        assert_eq!(emails.property_path, "Sponsorship.Emails");
    }

    #[test]
    fn canonical_field_keys_have_no_aliases() {
        let aspects = standard_aspects().unwrap();
        assert!(aspects[0].field("sponsorshipBlocked").is_some());
        assert!(aspects[0].field("sponsorshipBlockedReason").is_none());
        assert!(aspects[5].field("notifiedSponsors").is_some());
        assert!(aspects[5].field("notifySponsors").is_none());
    }

    static MISORDERED: &[FieldSpec] = &[
        FieldSpec::new(1, "a", "A", "Title", SemanticType::String, FilledOnly),
        FieldSpec::new(3, "b", "B", "Tags", Text, FilledOnly),
    ];

    static DUPLICATED: &[FieldSpec] = &[
        FieldSpec::new(1, "a", "A", "Title", SemanticType::String, FilledOnly),
        FieldSpec::new(2, "a", "A again", "Tags", Text, FilledOnly),
    ];

    static DANGLING: &[FieldSpec] = &[FieldSpec::new(
        1,
        "a",
        "A",
        "Sponsorship.Budget",
        SemanticType::String,
        FilledOnly,
    )];

    static EMPTY_SELECT: &[FieldSpec] =
        &[FieldSpec::new(1, "a", "A", "Language", Select, FilledOnly)];

    const LANGUAGE_AS_STRING: FieldSpec =
        FieldSpec::new(1, "a", "A", "Language", SemanticType::String, FilledOnly);

    static OPTIONS_ON_TEXT: &[FieldSpec] = &[LANGUAGE_AS_STRING.options(LANGUAGES)];

    #[test]
    fn field_order_mismatch_fails() {
        let err = build_aspect(&aspect_with(MISORDERED)).unwrap_err();
        assert_eq!(
            err,
            MappingError::FieldOrder {
                aspect: "initial-details".to_string(),
                field: "b".to_string(),
                declared: 3,
                expected: 2,
            }
        );
    }

    #[test]
    fn duplicate_key_fails() {
        let err = build_aspect(&aspect_with(DUPLICATED)).unwrap_err();
        assert!(matches!(err, MappingError::DuplicateField { .. }));
    }

    #[test]
    fn dangling_path_fails() {
        let err = build_aspect(&aspect_with(DANGLING)).unwrap_err();
        let MappingError::DanglingPath { path, .. } = &err else {
            panic!("expected a dangling path, got {err:?}");
        };
        assert_eq!(path, "Sponsorship.Budget");
    }

    #[test]
    fn option_lists_are_checked() {
        assert!(matches!(
            build_aspect(&aspect_with(EMPTY_SELECT)),
            Err(MappingError::MissingOptions { .. })
        ));
        assert!(matches!(
            build_aspect(&aspect_with(OPTIONS_ON_TEXT)),
            Err(MappingError::UnexpectedOptions { .. })
        ));
    }

    #[test]
    fn aspect_order_mismatch_fails() {
        let spec = AspectSpec {
            order: 4,
            ..ASPECTS[0]
        };
        assert!(matches!(
            build_aspect(&spec),
            Err(MappingError::AspectOrder { .. })
        ));
    }

    #[test]
    fn aspect_sequence_is_enforced() {
        let mut specs = ASPECTS.to_vec();
        specs.swap(0, 1);
        assert!(matches!(
            build_aspects(&specs),
            Err(MappingError::AspectSequence { position: 0, .. })
        ));

        assert!(matches!(
            build_aspects(&ASPECTS[..5]),
            Err(MappingError::AspectCount {
                expected: 6,
                found: 5
            })
        ));
    }

    proptest! {
        #[test]
        fn unknown_paths_never_resolve(path in "[a-z]{1,12}(\\.[a-z]{1,12})?") {
            // Every real path starts with an upper-case letter.
            prop_assert!(Video::default().resolve(&path).is_none());
        }
    }
}
