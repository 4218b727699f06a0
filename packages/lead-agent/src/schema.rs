//! Extraction schema described as plain data.
//!
//! The shape sent to the extraction service is a table of fields rendered to
//! JSON Schema on demand, so it crosses the process boundary unchanged and
//! does not depend on any derive machinery.

use serde_json::{json, Map, Value};

/// Type of a single schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    StringList,
}

impl FieldKind {
    fn json_schema(self) -> Value {
        match self {
            FieldKind::String => json!({ "type": "string" }),
            FieldKind::Integer => json!({ "type": "integer" }),
            FieldKind::StringList => json!({ "type": "array", "items": { "type": "string" } }),
        }
    }
}

/// One field of a record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    pub description: &'static str,
}

impl SchemaField {
    pub fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description,
        }
    }

    pub fn optional(
        name: &'static str,
        kind: FieldKind,
        default: Value,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
            description,
        }
    }

    fn json_schema(&self) -> Value {
        let mut schema = self.kind.json_schema();
        if let Value::Object(map) = &mut schema {
            map.insert("description".into(), Value::String(self.description.into()));
            if let Some(default) = &self.default {
                map.insert("default".into(), default.clone());
            }
        }
        schema
    }
}

/// A list of records, each described by `fields`, stored under `list_field`
/// of the top-level object.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub list_field: &'static str,
    pub list_description: &'static str,
    pub fields: Vec<SchemaField>,
}

impl RecordSchema {
    /// The schema of a Q&A page: a list of user interactions.
    pub fn interactions() -> Self {
        Self {
            list_field: "interactions",
            list_description:
                "List of all user interactions (questions and answers) on the page",
            fields: vec![
                SchemaField::required(
                    "username",
                    FieldKind::String,
                    "The username of the user who posted the question or answer",
                ),
                SchemaField::required(
                    "bio",
                    FieldKind::String,
                    "The bio or description of the user",
                ),
                SchemaField::required(
                    "post_type",
                    FieldKind::String,
                    "The type of post, either 'question' or 'answer'",
                ),
                SchemaField::required(
                    "timestamp",
                    FieldKind::String,
                    "When the question or answer was posted",
                ),
                SchemaField::optional(
                    "upvotes",
                    FieldKind::Integer,
                    json!(0),
                    "Number of upvotes received",
                ),
                SchemaField::optional(
                    "links",
                    FieldKind::StringList,
                    json!([]),
                    "Any links included in the post",
                ),
            ],
        }
    }

    /// Names of the fields every record must carry.
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }

    /// Render as a JSON Schema object.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.json_schema()))
            .collect();

        json!({
            "type": "object",
            "properties": {
                self.list_field: {
                    "type": "array",
                    "description": self.list_description,
                    "items": {
                        "type": "object",
                        "properties": properties,
                        "required": self.required_fields(),
                    }
                }
            },
            "required": [self.list_field],
        })
    }
}
