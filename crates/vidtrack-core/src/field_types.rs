//! # Field Types
//!
//! The six semantic field kinds an aspect field can have.
//!
//! Each kind is a plain configuration value plus four pure functions:
//! validate a value, describe how to render it, describe how it is
//! validated, and produce its default. [`FieldType`] is the closed set of
//! kinds; it dispatches to the per-kind structs through [`FieldKind`].

use crate::{FieldViolation, Value};
use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// The single textual layout accepted by date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Human-readable form of [`DATE_FORMAT`], shown as a placeholder.
pub const DATE_PLACEHOLDER: &str = "YYYY-MM-DDTHH:MM";

/// Regex equivalent of [`DATE_FORMAT`], published in validation hints.
const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$";

/// Rows shown for a multi-line text field unless overridden.
pub const DEFAULT_TEXT_ROWS: u32 = 3;

// =============================================================================
// SEMANTIC TYPE
// =============================================================================

/// Name of a field kind, as published in descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Text,
    Boolean,
    Date,
    Number,
    Select,
}

impl SemanticType {
    /// Lowercase name used in payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Number => "number",
            Self::Select => "select",
        }
    }
}

// =============================================================================
// HINTS
// =============================================================================

/// Rendering metadata for a form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiHints {
    /// Widget to render (`text`, `textarea`, `checkbox`, `datetime`, `number`, `select`).
    pub input_type: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub help_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    pub multiline: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// The rules a validator enforces, published so clients can pre-validate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationHints {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

// =============================================================================
// FIELD KIND TRAIT
// =============================================================================

/// Behaviour shared by every field kind.
///
/// Implementations are stateless functions of their own configuration.
pub trait FieldKind {
    /// The kind's published name.
    fn semantic_type(&self) -> SemanticType;

    /// Check a value against the kind's rules.
    fn validate(&self, value: &Value) -> Result<(), FieldViolation>;

    /// Rendering metadata.
    fn ui_hints(&self) -> UiHints;

    /// Validation metadata.
    fn validation_hints(&self) -> ValidationHints;

    /// The value a fresh form starts with.
    fn default_value(&self) -> Value;
}

fn wrong_type(expected: &'static str, value: &Value) -> FieldViolation {
    FieldViolation::WrongType {
        expected,
        actual: value.kind(),
    }
}

// =============================================================================
// STRING
// =============================================================================

/// Single-line text.
#[derive(Debug, Clone, Default)]
pub struct StringField {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pattern: Option<Regex>,
}

impl StringField {
    #[must_use]
    pub fn new(required: bool) -> Self {
        Self {
            required,
            ..Self::default()
        }
    }

    /// Constrain the length in characters.
    #[must_use]
    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Require non-blank values to match `pattern`.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// The configured pattern, if any.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    fn check(&self, value: &Value) -> Result<(), FieldViolation> {
        let Value::Text(s) = value else {
            return Err(wrong_type("string", value));
        };

        if s.trim().is_empty() {
            return if self.required {
                Err(FieldViolation::Required)
            } else {
                Ok(())
            };
        }

        let length = s.chars().count();
        if let Some(min) = self.min_length
            && length < min
        {
            return Err(FieldViolation::TooShort {
                min,
                actual: length,
            });
        }
        if let Some(max) = self.max_length
            && length > max
        {
            return Err(FieldViolation::TooLong {
                max,
                actual: length,
            });
        }
        if let Some(re) = &self.pattern
            && !re.is_match(s)
        {
            return Err(FieldViolation::PatternMismatch {
                pattern: re.as_str().to_string(),
            });
        }
        Ok(())
    }

    fn hints(&self) -> ValidationHints {
        ValidationHints {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern: self.pattern().map(str::to_string),
            ..ValidationHints::default()
        }
    }
}

// Regex has no PartialEq; compare by source.
impl PartialEq for StringField {
    fn eq(&self, other: &Self) -> bool {
        self.required == other.required
            && self.min_length == other.min_length
            && self.max_length == other.max_length
            && self.pattern() == other.pattern()
    }
}

impl Eq for StringField {}

impl FieldKind for StringField {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::String
    }

    fn validate(&self, value: &Value) -> Result<(), FieldViolation> {
        self.check(value)
    }

    fn ui_hints(&self) -> UiHints {
        UiHints {
            input_type: "text",
            ..UiHints::default()
        }
    }

    fn validation_hints(&self) -> ValidationHints {
        self.hints()
    }

    fn default_value(&self) -> Value {
        Value::text("")
    }
}

// =============================================================================
// TEXT
// =============================================================================

/// Multi-line text. Validates exactly like [`StringField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub base: StringField,
    pub rows: u32,
}

impl TextField {
    #[must_use]
    pub fn new(required: bool) -> Self {
        Self {
            base: StringField::new(required),
            rows: DEFAULT_TEXT_ROWS,
        }
    }

    #[must_use]
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows.max(1);
        self
    }
}

impl FieldKind for TextField {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Text
    }

    fn validate(&self, value: &Value) -> Result<(), FieldViolation> {
        self.base.check(value)
    }

    fn ui_hints(&self) -> UiHints {
        UiHints {
            input_type: "textarea",
            rows: Some(self.rows),
            multiline: true,
            ..UiHints::default()
        }
    }

    fn validation_hints(&self) -> ValidationHints {
        self.base.hints()
    }

    fn default_value(&self) -> Value {
        Value::text("")
    }
}

// =============================================================================
// BOOLEAN
// =============================================================================

/// Checkbox. A required boolean must be confirmed (set to `true`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanField {
    pub required: bool,
}

impl FieldKind for BooleanField {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Boolean
    }

    fn validate(&self, value: &Value) -> Result<(), FieldViolation> {
        match value {
            Value::Bool(false) if self.required => Err(FieldViolation::Required),
            Value::Bool(_) => Ok(()),
            other => Err(wrong_type("boolean", other)),
        }
    }

    fn ui_hints(&self) -> UiHints {
        UiHints {
            input_type: "checkbox",
            ..UiHints::default()
        }
    }

    fn validation_hints(&self) -> ValidationHints {
        ValidationHints {
            required: self.required,
            ..ValidationHints::default()
        }
    }

    fn default_value(&self) -> Value {
        Value::Bool(false)
    }
}

// =============================================================================
// DATE
// =============================================================================

/// Compiled [`DATE_PATTERN`], shared by every date field.
fn date_layout() -> Option<&'static Regex> {
    static LAYOUT: OnceLock<Option<Regex>> = OnceLock::new();
    LAYOUT.get_or_init(|| Regex::new(DATE_PATTERN).ok()).as_ref()
}

/// Date and time in [`DATE_FORMAT`]. Blank is allowed unless required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateField {
    pub required: bool,
}

impl FieldKind for DateField {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Date
    }

    fn validate(&self, value: &Value) -> Result<(), FieldViolation> {
        let Value::Text(s) = value else {
            return Err(wrong_type("string", value));
        };
        if s.trim().is_empty() {
            return if self.required {
                Err(FieldViolation::Required)
            } else {
                Ok(())
            };
        }
        let invalid = || FieldViolation::InvalidDate { value: s.clone() };
        // chrono alone accepts short fields and signs; the layout is checked first.
        if !date_layout().is_some_and(|re| re.is_match(s)) {
            return Err(invalid());
        }
        NaiveDateTime::parse_from_str(s, DATE_FORMAT)
            .map(|_| ())
            .map_err(|_| invalid())
    }

    fn ui_hints(&self) -> UiHints {
        UiHints {
            input_type: "datetime",
            placeholder: DATE_PLACEHOLDER.to_string(),
            ..UiHints::default()
        }
    }

    fn validation_hints(&self) -> ValidationHints {
        ValidationHints {
            required: self.required,
            pattern: Some(DATE_PATTERN.to_string()),
            ..ValidationHints::default()
        }
    }

    fn default_value(&self) -> Value {
        Value::text("")
    }
}

// =============================================================================
// NUMBER
// =============================================================================

/// Integer, given either as a number or as a decimal-integer string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberField {
    pub required: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl NumberField {
    #[must_use]
    pub fn new(required: bool) -> Self {
        Self {
            required,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

impl FieldKind for NumberField {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Number
    }

    fn validate(&self, value: &Value) -> Result<(), FieldViolation> {
        let n = match value {
            Value::Integer(n) => *n,
            Value::Text(s) if s.trim().is_empty() => {
                return if self.required {
                    Err(FieldViolation::Required)
                } else {
                    Ok(())
                };
            }
            Value::Text(s) => match s.parse::<i64>() {
                Ok(n) => n,
                Err(_) => return Err(FieldViolation::NotAnInteger { value: s.clone() }),
            },
            other => return Err(wrong_type("number", other)),
        };

        if let Some(min) = self.min
            && n < min
        {
            return Err(FieldViolation::BelowMinimum { min, actual: n });
        }
        if let Some(max) = self.max
            && n > max
        {
            return Err(FieldViolation::AboveMaximum { max, actual: n });
        }
        Ok(())
    }

    fn ui_hints(&self) -> UiHints {
        UiHints {
            input_type: "number",
            ..UiHints::default()
        }
    }

    fn validation_hints(&self) -> ValidationHints {
        ValidationHints {
            required: self.required,
            min: self.min,
            max: self.max,
            ..ValidationHints::default()
        }
    }

    fn default_value(&self) -> Value {
        Value::Integer(0)
    }
}

// =============================================================================
// SELECT
// =============================================================================

/// One value out of a fixed option list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectField {
    pub required: bool,
    pub options: Vec<String>,
}

impl SelectField {
    #[must_use]
    pub fn new<I, S>(required: bool, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required,
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

impl FieldKind for SelectField {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Select
    }

    fn validate(&self, value: &Value) -> Result<(), FieldViolation> {
        match value {
            // Blank text is an unselected value.
            v if v.is_null() || v.is_blank_text() => {
                if self.required {
                    Err(FieldViolation::Required)
                } else {
                    Ok(())
                }
            }
            Value::Text(s) if self.options.iter().any(|o| o == s) => Ok(()),
            other => Err(FieldViolation::InvalidOption {
                value: other.to_string(),
            }),
        }
    }

    fn ui_hints(&self) -> UiHints {
        UiHints {
            input_type: "select",
            options: self.options.clone(),
            ..UiHints::default()
        }
    }

    fn validation_hints(&self) -> ValidationHints {
        ValidationHints {
            required: self.required,
            ..ValidationHints::default()
        }
    }

    fn default_value(&self) -> Value {
        self.options
            .first()
            .map(|o| Value::text(o.as_str()))
            .unwrap_or_default()
    }
}

// =============================================================================
// FIELD TYPE (closed set)
// =============================================================================

/// A configured field kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String(StringField),
    Text(TextField),
    Boolean(BooleanField),
    Date(DateField),
    Number(NumberField),
    Select(SelectField),
}

impl FieldType {
    /// Default configuration of `semantic` with the given required flag.
    ///
    /// `options` is only used for [`SemanticType::Select`].
    #[must_use]
    pub fn of(semantic: SemanticType, required: bool, options: &[&str]) -> Self {
        match semantic {
            SemanticType::String => Self::String(StringField::new(required)),
            SemanticType::Text => Self::Text(TextField::new(required)),
            SemanticType::Boolean => Self::Boolean(BooleanField { required }),
            SemanticType::Date => Self::Date(DateField { required }),
            SemanticType::Number => Self::Number(NumberField::new(required)),
            SemanticType::Select => {
                Self::Select(SelectField::new(required, options.iter().copied()))
            }
        }
    }

    fn kind(&self) -> &dyn FieldKind {
        match self {
            Self::String(f) => f,
            Self::Text(f) => f,
            Self::Boolean(f) => f,
            Self::Date(f) => f,
            Self::Number(f) => f,
            Self::Select(f) => f,
        }
    }

    /// Whether the kind is configured as required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.kind().validation_hints().required
    }

    /// Options of a select kind; empty for every other kind.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match self {
            Self::Select(f) => &f.options,
            _ => &[],
        }
    }
}

impl FieldKind for FieldType {
    fn semantic_type(&self) -> SemanticType {
        self.kind().semantic_type()
    }

    fn validate(&self, value: &Value) -> Result<(), FieldViolation> {
        self.kind().validate(value)
    }

    fn ui_hints(&self) -> UiHints {
        self.kind().ui_hints()
    }

    fn validation_hints(&self) -> ValidationHints {
        self.kind().validation_hints()
    }

    fn default_value(&self) -> Value {
        self.kind().default_value()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_requires_text_shape() {
        let field = StringField::new(false);
        assert_eq!(
            field.validate(&Value::Bool(true)),
            Err(FieldViolation::WrongType {
                expected: "string",
                actual: "boolean"
            })
        );
        assert!(field.validate(&Value::text("")).is_ok());
    }

    #[test]
    fn required_string_rejects_blank() {
        let field = StringField::new(true);
        assert_eq!(
            field.validate(&Value::text("   ")),
            Err(FieldViolation::Required)
        );
        assert!(field.validate(&Value::text("x")).is_ok());
    }

    #[test]
    fn string_length_bounds_count_characters() {
        let field = StringField::new(false).with_length(Some(2), Some(4));
        assert_eq!(
            field.validate(&Value::text("a")),
            Err(FieldViolation::TooShort { min: 2, actual: 1 })
        );
        assert_eq!(
            field.validate(&Value::text("abcde")),
            Err(FieldViolation::TooLong { max: 4, actual: 5 })
        );
        // Four characters, more than four bytes.
        assert!(field.validate(&Value::text("ñañá")).is_ok());
    }

    #[test]
    fn string_pattern_applies_to_non_blank_values() {
        let field = StringField::new(false)
            .with_pattern(r"^https?://")
            .unwrap();
        assert!(field.validate(&Value::text("https://example.com")).is_ok());
        assert!(field.validate(&Value::text("")).is_ok());
        assert_eq!(
            field.validate(&Value::text("ftp://x")),
            Err(FieldViolation::PatternMismatch {
                pattern: "^https?://".to_string()
            })
        );
        assert_eq!(
            field.validation_hints().pattern.as_deref(),
            Some("^https?://")
        );
    }

    #[test]
    fn invalid_pattern_is_rejected_at_configuration() {
        assert!(StringField::new(false).with_pattern("(").is_err());
    }

    #[test]
    fn text_is_multiline_with_default_rows() {
        let field = TextField::new(false);
        let hints = field.ui_hints();
        assert_eq!(hints.input_type, "textarea");
        assert!(hints.multiline);
        assert_eq!(hints.rows, Some(DEFAULT_TEXT_ROWS));
        assert_eq!(TextField::new(false).with_rows(8).ui_hints().rows, Some(8));
    }

    #[test]
    fn text_validates_like_string() {
        let field = TextField::new(true);
        assert_eq!(
            field.validate(&Value::text("")),
            Err(FieldViolation::Required)
        );
        assert!(field.validate(&Value::text("line one\nline two")).is_ok());
    }

    #[test]
    fn required_boolean_must_be_confirmed() {
        let optional = BooleanField { required: false };
        let required = BooleanField { required: true };

        assert!(optional.validate(&Value::Bool(false)).is_ok());
        assert_eq!(
            required.validate(&Value::Bool(false)),
            Err(FieldViolation::Required)
        );
        assert!(required.validate(&Value::Bool(true)).is_ok());
        assert!(optional.validate(&Value::text("true")).is_err());
    }

    #[test]
    fn date_accepts_only_the_fixed_layout() {
        let field = DateField { required: false };
        assert!(field.validate(&Value::text("2025-03-14T09:30")).is_ok());
        assert!(field.validate(&Value::text("")).is_ok());
        assert!(matches!(
            field.validate(&Value::text("2025-03-14 09:30")),
            Err(FieldViolation::InvalidDate { .. })
        ));
        assert!(matches!(
            field.validate(&Value::text("2025-13-01T00:00")),
            Err(FieldViolation::InvalidDate { .. })
        ));
        assert!(matches!(
            field.validate(&Value::Integer(20250314)),
            Err(FieldViolation::WrongType { .. })
        ));
    }

    #[test]
    fn date_rejects_loose_layouts() {
        let field = DateField { required: false };
        let layout = Regex::new(DATE_PATTERN).unwrap();
        for input in [
            "2025-3-1T9:30",
            "25-03-01T09:30",
            "+2025-03-01T09:30",
            "2025-03-01T09:30 ",
            " 2025-03-01T09:30",
        ] {
            assert!(!layout.is_match(input));
            assert_eq!(
                field.validate(&Value::text(input)),
                Err(FieldViolation::InvalidDate {
                    value: input.to_string()
                }),
                "{input:?}"
            );
        }
    }

    #[test]
    fn date_layout_matches_published_pattern() {
        let field = DateField { required: false };
        let hints = field.validation_hints();
        let published = Regex::new(hints.pattern.as_deref().unwrap()).unwrap();
        for input in ["2025-03-14T09:30", "2024-02-29T23:59", "2025-02-29T10:00"] {
            if field.validate(&Value::text(input)).is_ok() {
                assert!(published.is_match(input));
            }
        }
        assert!(field.validate(&Value::text("2025-02-29T10:00")).is_err());
    }

    #[test]
    fn required_date_rejects_blank() {
        let field = DateField { required: true };
        assert_eq!(
            field.validate(&Value::text(" ")),
            Err(FieldViolation::Required)
        );
    }

    #[test]
    fn number_accepts_integers_and_integer_strings() {
        let field = NumberField::new(false).with_bounds(Some(0), Some(100));
        assert!(field.validate(&Value::Integer(50)).is_ok());
        assert!(field.validate(&Value::text("42")).is_ok());
        assert!(field.validate(&Value::text("")).is_ok());
        assert_eq!(
            field.validate(&Value::text("4.5")),
            Err(FieldViolation::NotAnInteger {
                value: "4.5".to_string()
            })
        );
        assert_eq!(
            field.validate(&Value::Integer(-1)),
            Err(FieldViolation::BelowMinimum { min: 0, actual: -1 })
        );
        assert_eq!(
            field.validate(&Value::text("101")),
            Err(FieldViolation::AboveMaximum {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn required_number_rejects_blank_string() {
        let field = NumberField::new(true);
        assert_eq!(
            field.validate(&Value::text("")),
            Err(FieldViolation::Required)
        );
    }

    #[test]
    fn select_checks_membership() {
        let field = SelectField::new(false, ["en", "es"]);
        assert!(field.validate(&Value::text("es")).is_ok());
        assert!(field.validate(&Value::Null).is_ok());
        assert_eq!(
            field.validate(&Value::text("fr")),
            Err(FieldViolation::InvalidOption {
                value: "fr".to_string()
            })
        );

        let required = SelectField::new(true, ["en"]);
        assert_eq!(
            required.validate(&Value::Null),
            Err(FieldViolation::Required)
        );
    }

    #[test]
    fn blank_select_is_unselected() {
        let optional = SelectField::new(false, ["en"]);
        let required = SelectField::new(true, ["en"]);
        assert!(optional.validate(&Value::text("")).is_ok());
        assert_eq!(
            required.validate(&Value::text("  ")),
            Err(FieldViolation::Required)
        );
    }

    #[test]
    fn select_default_is_first_option_or_null() {
        let languages = SelectField::new(false, ["en", "es"]);
        let empty = SelectField::new(false, Vec::<String>::new());
        assert_eq!(languages.default_value(), Value::text("en"));
        assert_eq!(empty.default_value(), Value::Null);
    }

    #[test]
    fn defaults_per_kind() {
        let cases = [
            (SemanticType::String, Value::text("")),
            (SemanticType::Text, Value::text("")),
            (SemanticType::Boolean, Value::Bool(false)),
            (SemanticType::Date, Value::text("")),
            (SemanticType::Number, Value::Integer(0)),
        ];
        for (semantic, expected) in cases {
            let field = FieldType::of(semantic, false, &[]);
            assert_eq!(field.default_value(), expected, "{semantic:?}");
        }
    }

    #[test]
    fn field_type_dispatch_preserves_kind() {
        for semantic in [
            SemanticType::String,
            SemanticType::Text,
            SemanticType::Boolean,
            SemanticType::Date,
            SemanticType::Number,
            SemanticType::Select,
        ] {
            let field = FieldType::of(semantic, true, &["a"]);
            assert_eq!(field.semantic_type(), semantic);
            assert!(field.is_required());
        }
        let select = FieldType::of(SemanticType::Select, false, &["a", "b"]);
        let string = FieldType::of(SemanticType::String, false, &["a"]);
        assert_eq!(select.options().len(), 2);
        assert!(string.options().is_empty());
    }
}
