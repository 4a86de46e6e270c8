//! # Schema Tree
//!
//! A typed representation of the JSON Schema subset rolling stock documents
//! need: `type`, `const`, `minimum`, `minLength`, `maxLength`, `format`
//! (`uuid` only), `minItems`, `required`, `properties`, `items`, and
//! `additionalProperties`.
//!
//! Schemas are built in code with the constructors below, or parsed from a
//! JSON Schema document with [`Schema::from_json_schema`]. Both directions
//! are lossless for the supported subset; annotation keywords (`title`,
//! `description`, `$schema`, `$id`) are accepted on input and dropped.

use serde_json::{json, Map, Value};

use crate::error::SchemaError;

/// Annotation keywords that carry no validation meaning.
const ANNOTATION_KEYWORDS: &[&str] = &["title", "description", "$schema", "$id", "$comment"];

/// A node of a declarative schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Accepts every value (`{}`).
    Any,
    /// A JSON number, optionally bounded below (inclusive).
    Number {
        /// Inclusive lower bound.
        minimum: Option<f64>,
    },
    /// A JSON number with no fractional part, optionally bounded below.
    Integer {
        /// Inclusive lower bound.
        minimum: Option<f64>,
    },
    /// A JSON string, optionally bounded in length (characters) and
    /// restricted to a [`StringFormat`].
    String {
        /// Minimum number of characters.
        min_length: Option<usize>,
        /// Maximum number of characters.
        max_length: Option<usize>,
        format: Option<StringFormat>,
    },
    Boolean,
    /// Exactly this value.
    Const(Value),
    Object(ObjectSchema),
    /// A JSON array whose every element satisfies `items`.
    Array {
        /// Schema applied to each element.
        items: Box<Schema>,
        /// Minimum number of elements.
        min_items: Option<usize>,
    },
}

/// Value of the `format` keyword on a string node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// Hyphenated UUID, e.g. `00000000-0000-0000-0000-000000000000`.
    Uuid,
}

impl StringFormat {
    /// The keyword value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
        }
    }

    /// Whether `s` is written in this format.
    pub fn accepts(&self, s: &str) -> bool {
        match self {
            // Only the 36-character hyphenated form; `Uuid::try_parse` also
            // takes simple, braced and urn spellings.
            Self::Uuid => s.len() == 36 && uuid::Uuid::try_parse(s).is_ok(),
        }
    }
}

/// Policy for object keys not listed in `properties`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AdditionalProperties {
    /// Extra keys are accepted unless the validator runs in strict mode.
    #[default]
    Allowed,
    /// Extra keys are always rejected (`additionalProperties: false`).
    Forbidden,
    /// Every extra key's value must satisfy this schema. Used for maps.
    Schema(Box<Schema>),
}

/// Shape of a JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Declared properties, in declaration order.
    pub properties: Vec<(String, Schema)>,
    /// Keys that must be present.
    pub required: Vec<String>,
    /// What to do with undeclared keys.
    pub additional: AdditionalProperties,
}

impl ObjectSchema {
    /// An object with no declared properties that accepts any key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property that must be present.
    pub fn required(mut self, name: &str, schema: Schema) -> Self {
        self.properties.push((name.to_string(), schema));
        self.required.push(name.to_string());
        self
    }

    /// Declare a property that may be absent.
    pub fn optional(mut self, name: &str, schema: Schema) -> Self {
        self.properties.push((name.to_string(), schema));
        self
    }

    /// Set the policy for undeclared keys.
    pub fn additional(mut self, additional: AdditionalProperties) -> Self {
        self.additional = additional;
        self
    }

    /// Look up the schema of a declared property.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

impl Schema {
    /// Any number.
    pub fn number() -> Self {
        Schema::Number { minimum: None }
    }

    /// A number `>= minimum`.
    pub fn number_at_least(minimum: f64) -> Self {
        Schema::Number {
            minimum: Some(minimum),
        }
    }

    /// An integer `>= minimum`.
    pub fn integer_at_least(minimum: f64) -> Self {
        Schema::Integer {
            minimum: Some(minimum),
        }
    }

    /// Any string.
    pub fn string() -> Self {
        Schema::String {
            min_length: None,
            max_length: None,
            format: None,
        }
    }

    /// A string with at least one character.
    pub fn non_empty_string() -> Self {
        Schema::String {
            min_length: Some(1),
            max_length: None,
            format: None,
        }
    }

    /// A string of at most `max` characters.
    pub fn string_up_to(max: usize) -> Self {
        Schema::String {
            min_length: None,
            max_length: Some(max),
            format: None,
        }
    }

    /// A string of `min..=max` characters.
    pub fn bounded_string(min: usize, max: usize) -> Self {
        Schema::String {
            min_length: Some(min),
            max_length: Some(max),
            format: None,
        }
    }

    /// A hyphenated UUID string.
    pub fn uuid() -> Self {
        Schema::String {
            min_length: None,
            max_length: None,
            format: Some(StringFormat::Uuid),
        }
    }

    /// Exactly `value`.
    pub fn constant(value: impl Into<Value>) -> Self {
        Schema::Const(value.into())
    }

    /// An array of `items`, possibly empty.
    pub fn array_of(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
            min_items: None,
        }
    }

    /// An array of `items` with at least one element.
    pub fn non_empty_array_of(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
            min_items: Some(1),
        }
    }

    /// An object used as a map: any keys, every value satisfies `values`.
    pub fn map_of(values: Schema) -> Self {
        ObjectSchema::new()
            .additional(AdditionalProperties::Schema(Box::new(values)))
            .into()
    }

    /// Render this schema as a JSON Schema document.
    pub fn to_json_schema(&self) -> Value {
        match self {
            Schema::Any => json!({}),
            Schema::Number { minimum } => with_minimum(json!({"type": "number"}), *minimum),
            Schema::Integer { minimum } => with_minimum(json!({"type": "integer"}), *minimum),
            Schema::String {
                min_length,
                max_length,
                format,
            } => {
                let mut out = json!({"type": "string"});
                if let Some(n) = min_length {
                    out["minLength"] = json!(n);
                }
                if let Some(n) = max_length {
                    out["maxLength"] = json!(n);
                }
                if let Some(format) = format {
                    out["format"] = json!(format.as_str());
                }
                out
            }
            Schema::Boolean => json!({"type": "boolean"}),
            Schema::Const(value) => json!({"const": value}),
            Schema::Object(object) => {
                let mut out = Map::new();
                out.insert("type".into(), json!("object"));
                if !object.properties.is_empty() {
                    let properties: Map<String, Value> = object
                        .properties
                        .iter()
                        .map(|(key, schema)| (key.clone(), schema.to_json_schema()))
                        .collect();
                    out.insert("properties".into(), Value::Object(properties));
                }
                if !object.required.is_empty() {
                    out.insert("required".into(), json!(object.required));
                }
                match &object.additional {
                    AdditionalProperties::Allowed => {}
                    AdditionalProperties::Forbidden => {
                        out.insert("additionalProperties".into(), json!(false));
                    }
                    AdditionalProperties::Schema(values) => {
                        out.insert("additionalProperties".into(), values.to_json_schema());
                    }
                }
                Value::Object(out)
            }
            Schema::Array { items, min_items } => {
                let mut out = json!({"type": "array", "items": items.to_json_schema()});
                if let Some(n) = min_items {
                    out["minItems"] = json!(n);
                }
                out
            }
        }
    }

    /// Parse a JSON Schema document restricted to the supported subset.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnsupportedKeyword` for keywords outside the
    /// subset and `SchemaError::InvalidKeyword` for malformed keyword values.
    pub fn from_json_schema(document: &Value) -> Result<Self, SchemaError> {
        parse_node(document, "")
    }
}

fn with_minimum(mut out: Value, minimum: Option<f64>) -> Value {
    if let Some(m) = minimum {
        out["minimum"] = json!(m);
    }
    out
}

fn invalid(path: &str, keyword: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::InvalidKeyword {
        path: path.to_string(),
        keyword: keyword.to_string(),
        reason: reason.into(),
    }
}

fn parse_node(node: &Value, path: &str) -> Result<Schema, SchemaError> {
    let Some(node) = node.as_object() else {
        return Err(invalid(path, "", "schema node must be an object"));
    };

    let allowed: &[&str] = match node.get("type").and_then(Value::as_str) {
        _ if node.contains_key("const") => &["const"],
        Some("number") | Some("integer") => &["type", "minimum"],
        Some("string") => &["type", "minLength", "maxLength", "format"],
        Some("boolean") => &["type"],
        Some("object") => &["type", "properties", "required", "additionalProperties"],
        Some("array") => &["type", "items", "minItems"],
        Some(other) => return Err(invalid(path, "type", format!("unsupported type '{other}'"))),
        None if node.contains_key("type") => {
            return Err(invalid(path, "type", "must be a string"))
        }
        None => &[],
    };
    if let Some(keyword) = node
        .keys()
        .find(|k| !allowed.contains(&k.as_str()) && !ANNOTATION_KEYWORDS.contains(&k.as_str()))
    {
        return Err(SchemaError::UnsupportedKeyword {
            path: path.to_string(),
            keyword: keyword.clone(),
        });
    }

    if let Some(value) = node.get("const") {
        return Ok(Schema::Const(value.clone()));
    }

    match node.get("type").and_then(Value::as_str) {
        None => Ok(Schema::Any),
        Some("number") => Ok(Schema::Number {
            minimum: parse_minimum(node, path)?,
        }),
        Some("integer") => Ok(Schema::Integer {
            minimum: parse_minimum(node, path)?,
        }),
        Some("string") => Ok(Schema::String {
            min_length: parse_count(node, path, "minLength")?,
            max_length: parse_count(node, path, "maxLength")?,
            format: parse_format(node, path)?,
        }),
        Some("boolean") => Ok(Schema::Boolean),
        Some("array") => {
            let items = match node.get("items") {
                Some(items) => parse_node(items, &format!("{path}/items"))?,
                None => Schema::Any,
            };
            Ok(Schema::Array {
                items: Box::new(items),
                min_items: parse_count(node, path, "minItems")?,
            })
        }
        _ => parse_object(node, path),
    }
}

fn parse_minimum(node: &Map<String, Value>, path: &str) -> Result<Option<f64>, SchemaError> {
    match node.get("minimum") {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(path, "minimum", "must be a number")),
    }
}

fn parse_count(
    node: &Map<String, Value>,
    path: &str,
    keyword: &str,
) -> Result<Option<usize>, SchemaError> {
    match node.get(keyword) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(path, keyword, "must be a non-negative integer")),
    }
}

fn parse_format(node: &Map<String, Value>, path: &str) -> Result<Option<StringFormat>, SchemaError> {
    match node.get("format") {
        None => Ok(None),
        Some(Value::String(f)) if f == StringFormat::Uuid.as_str() => Ok(Some(StringFormat::Uuid)),
        Some(Value::String(f)) => Err(invalid(path, "format", format!("unsupported format '{f}'"))),
        Some(_) => Err(invalid(path, "format", "must be a string")),
    }
}

fn parse_object(node: &Map<String, Value>, path: &str) -> Result<Schema, SchemaError> {
    let mut object = ObjectSchema::new();

    if let Some(properties) = node.get("properties") {
        let properties = properties
            .as_object()
            .ok_or_else(|| invalid(path, "properties", "must be an object"))?;
        for (key, sub) in properties {
            let sub_path = format!("{path}/properties/{}", crate::validate::escape_token(key));
            object
                .properties
                .push((key.clone(), parse_node(sub, &sub_path)?));
        }
    }

    if let Some(required) = node.get("required") {
        let required = required
            .as_array()
            .ok_or_else(|| invalid(path, "required", "must be an array of strings"))?;
        for key in required {
            let key = key
                .as_str()
                .ok_or_else(|| invalid(path, "required", "must be an array of strings"))?;
            object.required.push(key.to_string());
        }
    }

    object.additional = match node.get("additionalProperties") {
        None | Some(Value::Bool(true)) => AdditionalProperties::Allowed,
        Some(Value::Bool(false)) => AdditionalProperties::Forbidden,
        Some(sub) => AdditionalProperties::Schema(Box::new(parse_node(
            sub,
            &format!("{path}/additionalProperties"),
        )?)),
    };

    Ok(Schema::Object(object))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_object() -> Schema {
        ObjectSchema::new()
            .required("type", Schema::constant("davis"))
            .required("A", Schema::number_at_least(0.0))
            .optional("label", Schema::non_empty_string())
            .into()
    }

    #[test]
    fn object_builder_records_required_keys() {
        let Schema::Object(object) = sample_object() else {
            panic!("expected object schema");
        };
        assert_eq!(object.required, ["type", "A"]);
        assert_eq!(object.properties.len(), 3);
        assert_eq!(object.property("A"), Some(&Schema::number_at_least(0.0)));
        assert_eq!(object.property("missing"), None);
    }

    #[test]
    fn exports_json_schema_keywords() {
        let exported = sample_object().to_json_schema();
        assert_eq!(exported["type"], "object");
        assert_eq!(exported["properties"]["type"], json!({"const": "davis"}));
        assert_eq!(exported["properties"]["A"], json!({"type": "number", "minimum": 0.0}));
        assert_eq!(exported["properties"]["label"]["minLength"], 1);
        assert_eq!(exported["required"], json!(["type", "A"]));
        assert!(exported.get("additionalProperties").is_none());
    }

    #[test]
    fn exports_map_as_additional_properties() {
        let exported = Schema::map_of(Schema::non_empty_array_of(Schema::Any)).to_json_schema();
        assert_eq!(
            exported,
            json!({
                "type": "object",
                "additionalProperties": {"type": "array", "items": {}, "minItems": 1}
            })
        );
    }

    #[test]
    fn parses_its_own_export() {
        let schemas = [
            Schema::map_of(Schema::non_empty_array_of(
                ObjectSchema::new()
                    .required("max_effort", Schema::number())
                    .required("speed", Schema::number())
                    .into(),
            )),
            Schema::integer_at_least(0.0),
            Schema::array_of(Schema::Boolean),
            Schema::array_of(Schema::string_up_to(255)),
            Schema::bounded_string(1, 128),
            Schema::uuid(),
            ObjectSchema::new()
                .additional(AdditionalProperties::Forbidden)
                .into(),
        ];
        for schema in schemas {
            assert_eq!(Schema::from_json_schema(&schema.to_json_schema()).unwrap(), schema);
        }
    }

    #[test]
    fn parses_declarative_document_with_annotations() {
        let schema = Schema::from_json_schema(&json!({
            "title": "schema",
            "type": "array",
            "items": {
                "type": "object",
                "properties": {"speed": {"type": "number"}},
                "required": ["speed"]
            }
        }))
        .unwrap();
        let Schema::Array { items, min_items } = schema else {
            panic!("expected array schema");
        };
        assert_eq!(min_items, None);
        assert!(matches!(*items, Schema::Object(ref o) if o.required == ["speed"]));
    }

    #[test]
    fn exports_length_bounds_and_format() {
        assert_eq!(
            Schema::bounded_string(1, 255).to_json_schema(),
            json!({"type": "string", "minLength": 1, "maxLength": 255})
        );
        assert_eq!(
            Schema::uuid().to_json_schema(),
            json!({"type": "string", "format": "uuid"})
        );
        assert_eq!(
            Schema::from_json_schema(&json!({"type": "string", "maxLength": 128})).unwrap(),
            Schema::string_up_to(128)
        );
    }

    #[test]
    fn uuid_format_takes_hyphenated_form_only() {
        assert!(StringFormat::Uuid.accepts("0b9a1e2c-3d4f-4a5b-8c6d-7e8f9a0b1c2d"));
        assert!(!StringFormat::Uuid.accepts("0b9a1e2c3d4f4a5b8c6d7e8f9a0b1c2d"));
        assert!(!StringFormat::Uuid.accepts("{0b9a1e2c-3d4f-4a5b-8c6d-7e8f9a0b1c2d}"));
        assert!(!StringFormat::Uuid.accepts("bob"));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = Schema::from_json_schema(&json!({"type": "string", "format": "email"}))
            .unwrap_err();
        assert!(
            matches!(err, SchemaError::InvalidKeyword { ref keyword, .. } if keyword == "format"),
            "{err}"
        );
    }

    #[test]
    fn empty_document_is_any() {
        assert_eq!(Schema::from_json_schema(&json!({})).unwrap(), Schema::Any);
    }

    #[test]
    fn rejects_unsupported_keyword() {
        let err = Schema::from_json_schema(&json!({
            "type": "object",
            "properties": {"name": {"type": "string", "pattern": "^[a-z]+$"}}
        }))
        .unwrap_err();
        match err {
            SchemaError::UnsupportedKeyword { path, keyword } => {
                assert_eq!(path, "/properties/name");
                assert_eq!(keyword, "pattern");
            }
            other => panic!("expected UnsupportedKeyword, got: {other}"),
        }
    }

    #[test]
    fn rejects_malformed_keyword_values() {
        assert!(matches!(
            Schema::from_json_schema(&json!({"type": "number", "minimum": "zero"})),
            Err(SchemaError::InvalidKeyword { .. })
        ));
        assert!(matches!(
            Schema::from_json_schema(&json!({"type": "tuple"})),
            Err(SchemaError::InvalidKeyword { .. })
        ));
        assert!(matches!(
            Schema::from_json_schema(&json!({"type": "object", "required": [1]})),
            Err(SchemaError::InvalidKeyword { .. })
        ));
        assert!(matches!(
            Schema::from_json_schema(&json!(true)),
            Err(SchemaError::InvalidKeyword { .. })
        ));
    }
}
