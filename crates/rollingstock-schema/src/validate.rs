//! # Schema Validation
//!
//! A single recursive walker interprets any [`Schema`] against any JSON
//! value. There is no per-field validation code: the rolling resistance and
//! effort curve rules live entirely in the schema trees of
//! [`catalog`](crate::catalog).
//!
//! ## Reporting
//!
//! Every violation names a JSON pointer into the validated value (RFC 6901,
//! the root is `""`) and a [`ViolationReason`]. By default all violations are
//! collected; [`ValidationOptions::fail_fast`] stops at the first one.
//!
//! A missing required key is reported once and its sub-schema is skipped.
//! A value of the wrong type is reported once and not descended into.
//!
//! ## Ordering
//!
//! Declared properties are visited in declaration order, then undeclared
//! keys in the value's key order, array elements by index. The output is
//! therefore deterministic for a given `(schema, value)` pair.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{AdditionalProperties, ObjectSchema, Schema};

/// Why a value failed its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    /// A key listed in `required` is absent.
    MissingRequiredField,
    /// The value's JSON type does not match `type`.
    WrongType,
    /// A number under `minimum`, an array under `minItems`, or a string
    /// under `minLength`.
    BelowMinimum,
    /// A string over `maxLength`.
    AboveMaximum,
    /// A string not written in its declared `format`.
    InvalidFormat,
    /// The value differs from `const`.
    ConstMismatch,
    /// An undeclared key, rejected by `additionalProperties: false` or strict
    /// mode.
    UnexpectedExtraField,
    /// A scalar that is NaN or infinite.
    NotFinite,
}

impl ViolationReason {
    /// The snake_case reason code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::WrongType => "wrong_type",
            Self::BelowMinimum => "below_minimum",
            Self::AboveMaximum => "above_maximum",
            Self::InvalidFormat => "invalid_format",
            Self::ConstMismatch => "const_mismatch",
            Self::UnexpectedExtraField => "unexpected_extra_field",
            Self::NotFinite => "not_finite",
        }
    }
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mismatch between a value and its schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON pointer to the offending value (or the missing key).
    pub path: String,
    /// Machine-readable reason code.
    pub reason: ViolationReason,
    /// Human-readable description, e.g. `expected number, found string`.
    pub detail: String,
}

impl Violation {
    /// Build a violation.
    pub fn new(path: impl Into<String>, reason: ViolationReason, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {} ({})", self.reason, self.detail)
        } else {
            write!(f, "{}: {} ({})", self.path, self.reason, self.detail)
        }
    }
}

/// Outcome of validating one value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    /// At least one violation, in visiting order.
    Invalid(Vec<Violation>),
}

impl ValidationResult {
    /// Whether the value satisfied the schema.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The violations; empty when valid.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Valid => &[],
            Self::Invalid(violations) => violations,
        }
    }

    /// Convert into a `Result`, keeping the violations as the error.
    pub fn into_result(self) -> Result<(), Vec<Violation>> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(violations) => Err(violations),
        }
    }
}

/// Validator switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationOptions {
    /// Report undeclared object keys as `unexpected_extra_field` even when
    /// the schema allows them. Keys covered by a map-valued
    /// `additionalProperties` schema are never reported.
    pub strict: bool,
    /// Stop after the first violation.
    pub fail_fast: bool,
}

/// Validate `value` against `schema` with default options (non-strict,
/// collect every violation).
pub fn validate(schema: &Schema, value: &Value) -> ValidationResult {
    validate_with(schema, value, &ValidationOptions::default())
}

/// Validate `value` against `schema` with explicit options.
pub fn validate_with(schema: &Schema, value: &Value, options: &ValidationOptions) -> ValidationResult {
    let mut walker = Walker {
        options,
        violations: Vec::new(),
    };
    walker.visit(schema, value, "");
    if walker.violations.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(walker.violations)
    }
}

/// Escape one JSON pointer reference token (`~` → `~0`, `/` → `~1`).
pub fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn child_path(parent: &str, token: &str) -> String {
    format!("{parent}/{}", escape_token(token))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct Walker<'o> {
    options: &'o ValidationOptions,
    violations: Vec<Violation>,
}

impl Walker<'_> {
    fn done(&self) -> bool {
        self.options.fail_fast && !self.violations.is_empty()
    }

    fn report(&mut self, path: &str, reason: ViolationReason, detail: String) {
        if !self.done() {
            self.violations.push(Violation::new(path, reason, detail));
        }
    }

    fn wrong_type(&mut self, path: &str, expected: &str, value: &Value) {
        self.report(
            path,
            ViolationReason::WrongType,
            format!("expected {expected}, found {}", type_name(value)),
        );
    }

    fn check_minimum(&mut self, path: &str, n: f64, minimum: Option<f64>) {
        if let Some(min) = minimum {
            if n < min {
                self.report(
                    path,
                    ViolationReason::BelowMinimum,
                    format!("{n} is less than the minimum of {min}"),
                );
            }
        }
    }

    fn visit(&mut self, schema: &Schema, value: &Value, path: &str) {
        if self.done() {
            return;
        }
        match schema {
            Schema::Any => {}
            Schema::Number { minimum } => match value.as_f64() {
                Some(n) => self.check_minimum(path, n, *minimum),
                None => self.wrong_type(path, "number", value),
            },
            Schema::Integer { minimum } => match value.as_f64() {
                Some(n) if n.fract() == 0.0 => self.check_minimum(path, n, *minimum),
                Some(n) => self.report(
                    path,
                    ViolationReason::WrongType,
                    format!("expected integer, found {n}"),
                ),
                None => self.wrong_type(path, "integer", value),
            },
            Schema::String {
                min_length,
                max_length,
                format,
            } => match value.as_str() {
                Some(s) => {
                    let len = s.chars().count();
                    if let Some(min) = min_length {
                        if len < *min {
                            self.report(
                                path,
                                ViolationReason::BelowMinimum,
                                format!("string of length {len} is shorter than {min}"),
                            );
                        }
                    }
                    if let Some(max) = max_length {
                        if len > *max {
                            self.report(
                                path,
                                ViolationReason::AboveMaximum,
                                format!("string of length {len} is longer than {max}"),
                            );
                        }
                    }
                    if let Some(f) = format {
                        if !f.accepts(s) {
                            self.report(
                                path,
                                ViolationReason::InvalidFormat,
                                format!("{s:?} is not a valid {}", f.as_str()),
                            );
                        }
                    }
                }
                None => self.wrong_type(path, "string", value),
            },
            Schema::Boolean => {
                if !value.is_boolean() {
                    self.wrong_type(path, "boolean", value);
                }
            }
            Schema::Const(expected) => {
                if value != expected {
                    self.report(
                        path,
                        ViolationReason::ConstMismatch,
                        format!("expected {expected}, found {value}"),
                    );
                }
            }
            Schema::Object(object) => match value.as_object() {
                Some(map) => self.visit_object(object, map, path),
                None => self.wrong_type(path, "object", value),
            },
            Schema::Array { items, min_items } => match value.as_array() {
                Some(elements) => {
                    if let Some(min) = min_items {
                        if elements.len() < *min {
                            self.report(
                                path,
                                ViolationReason::BelowMinimum,
                                format!(
                                    "array of {} item(s) is shorter than {min}",
                                    elements.len()
                                ),
                            );
                        }
                    }
                    for (index, element) in elements.iter().enumerate() {
                        self.visit(items, element, &child_path(path, &index.to_string()));
                    }
                }
                None => self.wrong_type(path, "array", value),
            },
        }
    }

    fn visit_object(&mut self, object: &ObjectSchema, map: &Map<String, Value>, path: &str) {
        for (key, sub) in &object.properties {
            match map.get(key) {
                Some(child) => self.visit(sub, child, &child_path(path, key)),
                None if object.required.contains(key) => self.report(
                    &child_path(path, key),
                    ViolationReason::MissingRequiredField,
                    format!("\"{key}\" is a required property"),
                ),
                None => {}
            }
        }

        for key in &object.required {
            if object.property(key).is_none() && !map.contains_key(key) {
                self.report(
                    &child_path(path, key),
                    ViolationReason::MissingRequiredField,
                    format!("\"{key}\" is a required property"),
                );
            }
        }

        for (key, child) in map {
            if object.property(key).is_some() {
                continue;
            }
            match &object.additional {
                AdditionalProperties::Schema(values) => {
                    self.visit(values, child, &child_path(path, key))
                }
                AdditionalProperties::Forbidden => self.report(
                    &child_path(path, key),
                    ViolationReason::UnexpectedExtraField,
                    format!("\"{key}\" is not a declared property"),
                ),
                AdditionalProperties::Allowed if self.options.strict => self.report(
                    &child_path(path, key),
                    ViolationReason::UnexpectedExtraField,
                    format!("\"{key}\" is not a declared property (strict mode)"),
                ),
                AdditionalProperties::Allowed => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample() -> Schema {
        ObjectSchema::new()
            .required("kind", Schema::constant("davis"))
            .required("value", Schema::number_at_least(0.0))
            .optional("tags", Schema::array_of(Schema::string()))
            .into()
    }

    fn reasons(result: &ValidationResult) -> Vec<(&str, ViolationReason)> {
        result
            .violations()
            .iter()
            .map(|v| (v.path.as_str(), v.reason))
            .collect()
    }

    #[test]
    fn accepts_matching_value() {
        let result = validate(&sample(), &json!({"kind": "davis", "value": 0, "tags": ["x"]}));
        assert!(result.is_valid());
        assert!(result.violations().is_empty());
    }

    #[test]
    fn collects_all_violations_in_declaration_order() {
        let result = validate(&sample(), &json!({"kind": "other", "tags": ["ok", 3]}));
        assert_eq!(
            reasons(&result),
            [
                ("/kind", ViolationReason::ConstMismatch),
                ("/value", ViolationReason::MissingRequiredField),
                ("/tags/1", ViolationReason::WrongType),
            ]
        );
    }

    #[test]
    fn fail_fast_stops_at_first_violation() {
        let options = ValidationOptions {
            fail_fast: true,
            ..Default::default()
        };
        let result = validate_with(&sample(), &json!({"kind": "other", "value": -1}), &options);
        assert_eq!(reasons(&result), [("/kind", ViolationReason::ConstMismatch)]);
    }

    #[test]
    fn wrong_type_is_not_descended_into() {
        let result = validate(&sample(), &json!([1, 2]));
        assert_eq!(reasons(&result), [("", ViolationReason::WrongType)]);
        assert_eq!(result.violations()[0].detail, "expected object, found array");
    }

    #[test]
    fn extra_keys_allowed_unless_strict() {
        let value = json!({"kind": "davis", "value": 1, "extra": true});
        assert!(validate(&sample(), &value).is_valid());

        let strict = ValidationOptions {
            strict: true,
            ..Default::default()
        };
        let result = validate_with(&sample(), &value, &strict);
        assert_eq!(reasons(&result), [("/extra", ViolationReason::UnexpectedExtraField)]);
    }

    #[test]
    fn forbidden_additional_properties_rejects_extra_keys() {
        let schema: Schema = ObjectSchema::new()
            .optional("a", Schema::Any)
            .additional(AdditionalProperties::Forbidden)
            .into();
        let result = validate(&schema, &json!({"a": 1, "b": 2}));
        assert_eq!(reasons(&result), [("/b", ViolationReason::UnexpectedExtraField)]);
    }

    #[test]
    fn strict_mode_does_not_flag_map_entries() {
        let schema = Schema::map_of(Schema::number());
        let strict = ValidationOptions {
            strict: true,
            ..Default::default()
        };
        assert!(validate_with(&schema, &json!({"a": 1, "b": 2}), &strict).is_valid());
    }

    #[test]
    fn map_values_validated_with_escaped_paths() {
        let schema = Schema::map_of(Schema::number());
        let result = validate(&schema, &json!({"a/b": "x", "c~d": 1, "e": null}));
        assert_eq!(
            reasons(&result),
            [
                ("/a~1b", ViolationReason::WrongType),
                ("/e", ViolationReason::WrongType),
            ]
        );
    }

    #[test]
    fn required_key_without_declared_property() {
        let schema: Schema = ObjectSchema {
            required: vec!["id".into()],
            ..Default::default()
        }
        .into();
        let result = validate(&schema, &json!({}));
        assert_eq!(reasons(&result), [("/id", ViolationReason::MissingRequiredField)]);
    }

    #[test]
    fn integer_rejects_fractions_and_accepts_whole_floats() {
        let schema = Schema::integer_at_least(0.0);
        assert!(validate(&schema, &json!(3)).is_valid());
        assert!(validate(&schema, &json!(3.0)).is_valid());
        assert_eq!(reasons(&validate(&schema, &json!(3.5))), [("", ViolationReason::WrongType)]);
        assert_eq!(reasons(&validate(&schema, &json!(-1))), [("", ViolationReason::BelowMinimum)]);
    }

    #[test]
    fn min_items_and_min_length() {
        let array = Schema::non_empty_array_of(Schema::Any);
        assert_eq!(reasons(&validate(&array, &json!([]))), [("", ViolationReason::BelowMinimum)]);
        let string = Schema::non_empty_string();
        assert_eq!(reasons(&validate(&string, &json!(""))), [("", ViolationReason::BelowMinimum)]);
        assert!(validate(&string, &json!("é")).is_valid());
    }

    #[test]
    fn max_length_counts_characters() {
        let schema = Schema::bounded_string(1, 3);
        assert!(validate(&schema, &json!("ééé")).is_valid());
        let result = validate(&schema, &json!("abcd"));
        assert_eq!(reasons(&result), [("", ViolationReason::AboveMaximum)]);
        assert_eq!(result.violations()[0].detail, "string of length 4 is longer than 3");
    }

    #[test]
    fn uuid_format_is_checked() {
        let schema = Schema::uuid();
        assert!(validate(&schema, &json!("00000000-0000-0000-0000-000000000000")).is_valid());
        assert_eq!(
            reasons(&validate(&schema, &json!("bob"))),
            [("", ViolationReason::InvalidFormat)]
        );
        assert_eq!(
            reasons(&validate(&schema, &json!(7))),
            [("", ViolationReason::WrongType)]
        );
    }

    #[test]
    fn boolean_and_any() {
        assert!(validate(&Schema::Boolean, &json!(false)).is_valid());
        assert!(!validate(&Schema::Boolean, &json!("false")).is_valid());
        assert!(validate(&Schema::Any, &json!(null)).is_valid());
    }

    #[test]
    fn minimum_is_inclusive() {
        let schema = Schema::number_at_least(0.0);
        assert!(validate(&schema, &json!(0)).is_valid());
        assert!(validate(&schema, &json!(0.0)).is_valid());
        assert!(!validate(&schema, &json!(-0.0001)).is_valid());
    }

    #[test]
    fn violation_display_format() {
        let v = Violation::new("/C", ViolationReason::BelowMinimum, "-0.1 is less than the minimum of 0");
        assert_eq!(v.to_string(), "/C: below_minimum (-0.1 is less than the minimum of 0)");
        let root = Violation::new("", ViolationReason::WrongType, "expected object, found null");
        assert!(root.to_string().starts_with("(root): wrong_type"));
    }

    #[test]
    fn reason_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_value(ViolationReason::MissingRequiredField).unwrap(),
            "missing_required_field"
        );
        assert_eq!(ViolationReason::UnexpectedExtraField.to_string(), "unexpected_extra_field");
    }

    #[test]
    fn into_result_keeps_violations() {
        assert_eq!(ValidationResult::Valid.into_result(), Ok(()));
        let err = validate(&Schema::Boolean, &json!(1)).into_result().unwrap_err();
        assert_eq!(err.len(), 1);
    }

    fn arbitrary_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
            "[a-z]{0,6}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// Validation is deterministic and leaves its input untouched.
        #[test]
        fn validation_is_idempotent(value in arbitrary_json()) {
            let schema = Schema::map_of(Schema::non_empty_array_of(sample()));
            let before = value.clone();
            let first = validate(&schema, &value);
            let second = validate(&schema, &value);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&value, &before);
        }

        /// Fail-fast reports a prefix of the full report.
        #[test]
        fn fail_fast_reports_first_of_full(value in arbitrary_json()) {
            let schema = sample();
            let full = validate(&schema, &value);
            let options = ValidationOptions { fail_fast: true, ..Default::default() };
            let fast = validate_with(&schema, &value, &options);
            prop_assert_eq!(fast.violations().first(), full.violations().first());
            prop_assert!(fast.violations().len() <= 1);
        }
    }
}
