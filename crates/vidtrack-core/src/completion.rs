//! # Completion Module
//!
//! Decides whether a field's current value counts as "done".
//!
//! Every field carries one [`CompletionCriterion`]. Most criteria look at
//! the value alone. [`CompletionCriterion::Conditional`] also reads the
//! record, through an explicit two-argument predicate selected by its
//! [`ConditionalRule`].
//!
//! Anything that cannot be resolved falls back to
//! [`CompletionCriterion::FilledOnly`], so a misconfigured field is stricter
//! rather than always complete.

use crate::{Value, Video};
use serde::{Serialize, Serializer};
use std::fmt;

/// Marker that keeps a text field incomplete.
pub const FIXME_MARKER: &str = "FIXME:";

/// Text that counts as "not filled in" besides blank.
const PLACEHOLDER_DASH: &str = "-";

// =============================================================================
// PRIMITIVE CHECKS
// =============================================================================

/// Non-blank text other than `-`, or boolean `true`.
#[must_use]
pub fn is_filled(value: &Value) -> bool {
    match value {
        Value::Text(s) => {
            let s = s.trim();
            !s.is_empty() && s != PLACEHOLDER_DASH
        }
        Value::Bool(b) => *b,
        _ => false,
    }
}

/// Blank text, boolean `false`, or no value.
#[must_use]
pub fn is_empty_or_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(s) => s.trim().is_empty(),
        Value::Bool(b) => !b,
        Value::Integer(_) => false,
    }
}

/// Non-blank text without a [`FIXME_MARKER`].
#[must_use]
pub fn has_no_fixme(value: &Value) -> bool {
    match value {
        Value::Text(s) => !s.trim().is_empty() && !s.contains(FIXME_MARKER),
        _ => false,
    }
}

// =============================================================================
// CONDITIONAL RULES
// =============================================================================

/// A completion check that needs the record as well as the value.
pub type ConditionalPredicate = fn(&Value, &Video) -> bool;

/// The cross-field rules.
///
/// Both encode "sponsored implies obligation met": without a sponsor the
/// field is vacuously complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalRule {
    /// Sponsor contact emails must be filled in when there is a sponsor.
    SponsorEmails,
    /// Sponsors must have been notified when there is a sponsor.
    SponsorsNotified,
}

impl ConditionalRule {
    /// Stable snake_case name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::SponsorEmails => "sponsor_emails",
            Self::SponsorsNotified => "sponsors_notified",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "sponsor_emails" => Some(Self::SponsorEmails),
            "sponsors_notified" => Some(Self::SponsorsNotified),
            _ => None,
        }
    }

    /// The predicate implementing this rule.
    #[must_use]
    pub fn predicate(self) -> ConditionalPredicate {
        match self {
            Self::SponsorEmails => sponsor_emails_complete,
            Self::SponsorsNotified => sponsors_notified_complete,
        }
    }
}

fn sponsor_emails_complete(value: &Value, video: &Video) -> bool {
    !video.sponsorship.is_sponsored() || is_filled(value)
}

fn sponsors_notified_complete(value: &Value, video: &Video) -> bool {
    !video.sponsorship.is_sponsored() || value.as_bool() == Some(true)
}

// =============================================================================
// COMPLETION CRITERION
// =============================================================================

/// How a field's value is judged complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompletionCriterion {
    /// Non-blank text other than `-`, or `true`.
    #[default]
    FilledOnly,
    /// Blank, `false` or absent. For fields whose absence is the healthy state.
    EmptyOrFilled,
    /// Same as `FilledOnly`; kept distinct for stricter rules later.
    FilledRequired,
    /// Exactly `true`.
    TrueOnly,
    /// Exactly `false`.
    FalseOnly,
    /// Non-blank text without `FIXME:`.
    NoFixme,
    /// Depends on another attribute of the record.
    Conditional(ConditionalRule),
}

impl CompletionCriterion {
    /// Stable snake_case name. Both conditional rules share `conditional`.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::FilledOnly => "filled_only",
            Self::EmptyOrFilled => "empty_or_filled",
            Self::FilledRequired => "filled_required",
            Self::TrueOnly => "true_only",
            Self::FalseOnly => "false_only",
            Self::NoFixme => "no_fixme",
            Self::Conditional(_) => "conditional",
        }
    }

    /// Resolve a tag, falling back to `FilledOnly` for anything unknown.
    ///
    /// Conditional criteria are written `conditional:<rule>`; a bare
    /// `conditional` does not name a rule and falls back too.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::parse_tag(tag).unwrap_or_default()
    }

    /// Resolve a tag strictly.
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        let criterion = match tag.trim() {
            "filled_only" => Self::FilledOnly,
            "empty_or_filled" => Self::EmptyOrFilled,
            "filled_required" => Self::FilledRequired,
            "true_only" => Self::TrueOnly,
            "false_only" => Self::FalseOnly,
            "no_fixme" => Self::NoFixme,
            other => {
                let rule = other.strip_prefix("conditional:")?;
                Self::Conditional(ConditionalRule::from_tag(rule)?)
            }
        };
        Some(criterion)
    }

    /// Judge `value`, reading `video` for conditional rules.
    #[must_use]
    pub fn is_complete(self, value: &Value, video: &Video) -> bool {
        match self {
            Self::FilledOnly | Self::FilledRequired => is_filled(value),
            Self::EmptyOrFilled => is_empty_or_unset(value),
            Self::TrueOnly => value.as_bool() == Some(true),
            Self::FalseOnly => value.as_bool() == Some(false),
            Self::NoFixme => has_no_fixme(value),
            Self::Conditional(rule) => (rule.predicate())(value, video),
        }
    }
}

impl fmt::Display for CompletionCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conditional(rule) => write!(f, "conditional:{}", rule.tag()),
            other => f.write_str(other.tag()),
        }
    }
}

impl Serialize for CompletionCriterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
