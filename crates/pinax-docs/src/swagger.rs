//! Swagger 2.0 document types.
//!
//! The types in this module follow the Swagger 2.0 specification:
//! <https://swagger.io/specification/v2/>
//!
//! Every object keeps the keys it does not model explicitly in a flattened
//! `extensions` map, so annotations using less common fields (or `x-` vendor
//! extensions) survive a round trip unchanged. Parameters and responses may
//! be [`Reference`]s instead of inline objects; model definitions are kept as
//! raw JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version string carried by every generated document.
pub const SWAGGER_VERSION: &str = "2.0";

/// Swagger document root object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swagger {
    /// Specification version, always `"2.0"`.
    pub swagger: String,
    /// API metadata.
    pub info: Info,
    /// Host (name or IP) serving the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Base path the API is served under.
    #[serde(default, rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Transfer protocols.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// MIME types consumed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// MIME types produced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// API paths and operations.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Model definitions, as configured.
    #[serde(default)]
    pub definitions: IndexMap<String, Value>,
    /// Security scheme definitions.
    #[serde(
        default,
        rename = "securityDefinitions",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_definitions: IndexMap<String, Value>,
    /// Global security requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<Value>,
    /// Tag declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// External documentation.
    #[serde(default, rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Vendor extensions and unmodelled fields.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms of service URL.
    #[serde(default, rename = "termsOfService", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Contact information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    /// Vendor extensions and unmodelled fields.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// Contact information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// License information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// License name.
    pub name: String,
    /// License URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// HTTP methods a path item can carry, in document order.
pub const METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// Parameters shared by all operations of the path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Vendor extensions.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl PathItem {
    /// Returns the operation slot for a lower-case method name.
    pub fn operation_mut(&mut self, method: &str) -> Option<&mut Option<Operation>> {
        match method {
            "get" => Some(&mut self.get),
            "put" => Some(&mut self.put),
            "post" => Some(&mut self.post),
            "delete" => Some(&mut self.delete),
            "options" => Some(&mut self.options),
            "head" => Some(&mut self.head),
            "patch" => Some(&mut self.patch),
            _ => None,
        }
    }

    /// Iterates over the defined operations with their method names.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

/// An API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Tags for grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// External documentation.
    #[serde(default, rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// Unique operation identifier.
    #[serde(default, rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// MIME types consumed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// MIME types produced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Responses keyed by status code (or `default`).
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
    /// Transfer protocols.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// Whether deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Security requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<Value>,
    /// Vendor extensions and unmodelled fields.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// A JSON reference (`{"$ref": "#/parameters/limit"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reference {
    /// Reference target.
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// Either a reference or an inline object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// Reference to an object declared elsewhere in the document.
    Ref(Reference),
    /// Inline object.
    Inline(T),
}

impl<T> RefOr<T> {
    /// Returns the inline object, if this is not a reference.
    pub fn as_inline(&self) -> Option<&T> {
        match self {
            Self::Ref(_) => None,
            Self::Inline(inline) => Some(inline),
        }
    }

    /// Returns the reference target, if this is a reference.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Ref(reference) => Some(&reference.reference),
            Self::Inline(_) => None,
        }
    }
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterIn {
    /// Query string parameter.
    #[serde(rename = "query")]
    Query,
    /// HTTP header.
    #[serde(rename = "header")]
    Header,
    /// URL path parameter.
    #[serde(rename = "path")]
    Path,
    /// Form field.
    #[serde(rename = "formData")]
    FormData,
    /// Request body.
    #[serde(rename = "body")]
    Body,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Body schema (for `in: body`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Primitive type (for every other location).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Primitive format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Vendor extensions and unmodelled fields (`items`, `enum`, ...).
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// Response definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Description (required by Swagger, omitted when the annotation has none).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Response body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Response headers.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Value>,
    /// Examples by MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Value>,
    /// Vendor extensions and unmodelled fields.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// JSON Schema subset used by Swagger 2.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Reference to another schema.
    #[serde(default, rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Schema type (`object`, `array`, `string`, ...).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Schema format (e.g., "date-time", "int64").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Required properties, or a property-level flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Required>,
    /// Array item schema(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaItems>,
    /// Enum values.
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// allOf schemas.
    #[serde(default, rename = "allOf", skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,
    /// Vendor extensions and unmodelled fields.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// The `required` keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Required {
    /// Names of the required properties of an object schema.
    Properties(Vec<String>),
    /// Flag set on the property itself (`required: true`).
    Flag(bool),
}

/// The `items` keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaItems {
    /// One schema for every item.
    Single(Box<Schema>),
    /// One schema per position.
    Tuple(Vec<Schema>),
}

impl SchemaItems {
    /// Returns the item schema when every item shares one.
    pub fn single(&self) -> Option<&Schema> {
        match self {
            Self::Single(schema) => Some(schema),
            Self::Tuple(_) => None,
        }
    }
}

/// API tag for grouping operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// External documentation.
    #[serde(default, rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

/// External documentation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocs {
    /// URL.
    pub url: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_in_serialization() {
        let param = Parameter {
            name: "avatar".to_string(),
            location: ParameterIn::FormData,
            description: None,
            required: false,
            schema: None,
            param_type: Some("file".to_string()),
            format: None,
            extensions: IndexMap::new(),
        };

        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json, json!({ "name": "avatar", "in": "formData", "type": "file" }));
    }

    #[test]
    fn test_schema_reference_serialization() {
        let schema = Schema {
            schema_type: Some("array".to_string()),
            items: Some(SchemaItems::Single(Box::new(Schema {
                reference: Some("#/definitions/pet".to_string()),
                ..Schema::default()
            }))),
            ..Schema::default()
        };
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            json!({ "type": "array", "items": { "$ref": "#/definitions/pet" } })
        );
    }

    #[test]
    fn test_schema_accepts_required_flag_and_tuple_items() {
        let raw = json!({
            "type": "array",
            "items": [{ "type": "number" }, { "type": "number" }],
            "properties": { "name": { "type": "string", "required": true } }
        });

        let schema: Schema = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(&schema.items, Some(SchemaItems::Tuple(items)) if items.len() == 2));
        assert_eq!(schema.properties["name"].required, Some(Required::Flag(true)));
        assert_eq!(serde_json::to_value(&schema).unwrap(), raw);
    }

    #[test]
    fn test_references_round_trip() {
        let raw = json!({
            "parameters": [
                { "$ref": "#/parameters/limit" },
                { "name": "id", "in": "path", "required": true, "type": "integer" }
            ],
            "responses": {
                "200": { "description": "ok" },
                "404": { "$ref": "#/responses/NotFound" }
            }
        });

        let op: Operation = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(op.parameters[0].reference(), Some("#/parameters/limit"));
        assert_eq!(op.parameters[1].as_inline().unwrap().location, ParameterIn::Path);
        assert_eq!(op.responses["404"].reference(), Some("#/responses/NotFound"));
        assert_eq!(serde_json::to_value(&op).unwrap(), raw);
    }

    #[test]
    fn test_unmodelled_fields_round_trip() {
        let raw = json!({
            "summary": "List pets",
            "x-rate-limit": 10,
            "parameters": [
                { "name": "limit", "in": "query", "type": "array", "items": { "type": "integer" } }
            ],
            "responses": { "200": { "description": "ok", "x-cache": true } }
        });

        let op: Operation = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(op.extensions["x-rate-limit"], json!(10));
        let limit = op.parameters[0].as_inline().unwrap();
        assert_eq!(limit.extensions["items"], json!({ "type": "integer" }));
        assert_eq!(serde_json::to_value(&op).unwrap(), raw);
    }

    #[test]
    fn test_path_item_operations_in_document_order() {
        let mut item = PathItem::default();
        item.post = Some(Operation::default());
        item.get = Some(Operation::default());

        let methods: Vec<&str> = item.operations().map(|(method, _)| method).collect();
        assert_eq!(methods, vec!["get", "post"]);
        assert!(item.operation_mut("trace").is_none());
    }

    #[test]
    fn test_document_always_serializes_paths_and_definitions() {
        let doc = Swagger {
            swagger: SWAGGER_VERSION.to_string(),
            info: Info {
                title: "Test API".to_string(),
                version: "1.0.0".to_string(),
                description: None,
                terms_of_service: None,
                contact: None,
                license: None,
                extensions: IndexMap::new(),
            },
            host: None,
            base_path: Some("/api".to_string()),
            schemes: vec![],
            consumes: vec![],
            produces: vec![],
            paths: IndexMap::new(),
            definitions: IndexMap::new(),
            security_definitions: IndexMap::new(),
            security: vec![],
            tags: vec![],
            external_docs: None,
            extensions: IndexMap::new(),
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["swagger"], "2.0");
        assert_eq!(json["basePath"], "/api");
        assert_eq!(json["paths"], json!({}));
        assert_eq!(json["definitions"], json!({}));
        assert!(json.get("host").is_none());
    }
}
