//! Swagger document builder.
//!
//! Turns the configured `swagger` section and the route table into a
//! [`Swagger`] document. The transformation is best effort: annotations that
//! cannot be read are skipped with a warning and never fail the build.
//!
//! ## Route annotations
//!
//! Every route whose configuration carries a `swagger` object becomes one
//! operation per HTTP method:
//!
//! - the verb is stripped from the route key (`"GET /users/:id"`) and
//!   `:param` tokens become `{param}`
//! - the methods come from the annotation's `methods` list, else from the
//!   verb in the route key, else `get`
//! - string schemas (`schema = "User"`) become `#/definitions/user` references
//! - operations without `responses` or `summary` receive defaults
//!
//! Operations for the same path are deep-merged, later routes winning.

use std::sync::OnceLock;

use indexmap::IndexMap;
use pinax_config::{PackageInfo, PinaxConfig, Routes, SwaggerSection};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::error::DocsResult;
use crate::merge::deep_merge;
use crate::swagger::{
    Contact, Info, Parameter, PathItem, RefOr, Response, Swagger, METHODS, SWAGGER_VERSION,
};

/// Prefix of every model definition reference.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Summary given to operations that do not declare one.
const METHOD_SUMMARIES: [(&str, &str); 7] = [
    ("post", "Create Object(s)"),
    ("get", "Read Object(s)"),
    ("put", "Update Object(s)"),
    ("patch", "Update Object(s)"),
    ("delete", "Destroy Object(s)"),
    ("options", "Get Resource Options"),
    ("head", "Get Resource headers"),
];

/// Responses given to operations that do not declare any.
const DEFAULT_RESPONSES: [(&str, &str); 3] = [
    ("200", "The requested resource"),
    ("404", "Resource not found"),
    ("500", "Internal server error"),
];

/// Builds the Swagger document from configuration.
///
/// # Example
///
/// ```
/// use pinax_config::{Routes, SwaggerSection};
/// use pinax_docs::DocumentBuilder;
///
/// let section = SwaggerSection::default();
/// let routes = Routes::new();
///
/// let doc = DocumentBuilder::new(&section, &routes).build();
/// assert_eq!(doc.swagger, "2.0");
/// assert_eq!(doc.info.title, "No package information");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DocumentBuilder<'a> {
    section: &'a SwaggerSection,
    routes: &'a Routes,
}

impl<'a> DocumentBuilder<'a> {
    /// Creates a builder over a swagger section and a route table.
    #[must_use]
    pub fn new(section: &'a SwaggerSection, routes: &'a Routes) -> Self {
        Self { section, routes }
    }

    /// Creates a builder over a loaded configuration.
    #[must_use]
    pub fn from_config(config: &'a PinaxConfig) -> Self {
        Self::new(&config.swagger, &config.routes)
    }

    /// Builds the document.
    ///
    /// The configured top-level fields are copied as they are; `swagger`,
    /// `info`, `definitions` and `paths` are computed and win over any
    /// configured value of the same name.
    #[must_use]
    pub fn build(&self) -> Swagger {
        let section = self.section;
        let paths = build_paths(self.routes, &section.paths);
        let definitions = build_definitions(section);

        debug!(
            paths = paths.len(),
            definitions = definitions.len(),
            "Built Swagger document"
        );

        Swagger {
            swagger: SWAGGER_VERSION.to_string(),
            info: build_info(&section.pkg, &section.info),
            host: section.host.clone(),
            base_path: section.base_path.clone(),
            schemes: section.schemes.clone(),
            consumes: section.consumes.clone(),
            produces: section.produces.clone(),
            paths,
            definitions,
            security_definitions: section
                .security_definitions
                .iter()
                .map(|(name, scheme)| (name.clone(), scheme.clone()))
                .collect(),
            security: section.security.clone(),
            tags: section
                .tags
                .iter()
                .filter_map(|tag| typed("tag", "tags", tag.clone()))
                .collect(),
            external_docs: section
                .external_docs
                .clone()
                .and_then(|docs| typed("externalDocs", "swagger", docs)),
            extensions: section
                .extensions
                .iter()
                .filter(|(key, _)| key.as_str() != "swagger")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    /// Builds the document and serializes it to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn build_json(&self) -> DocsResult<String> {
        to_json(&self.build())
    }

    /// Builds the document and serializes it to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn build_json_pretty(&self) -> DocsResult<String> {
        to_json_pretty(&self.build())
    }
}

/// Serializes a document to compact JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(doc: &Swagger) -> DocsResult<String> {
    Ok(serde_json::to_string(doc)?)
}

/// Serializes a document to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_pretty(doc: &Swagger) -> DocsResult<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Builds the `info` object from package metadata.
///
/// `overrides` is deep-merged over the derived object. If the merged object
/// is not a valid `info` object it is ignored.
#[must_use]
pub fn build_info(pkg: &PackageInfo, overrides: &Map<String, Value>) -> Info {
    let contact = Contact {
        name: pkg.author.clone().filter(|author| !author.is_empty()),
        url: None,
        email: pkg.email.clone().filter(|email| !email.is_empty()),
    };

    let info = Info {
        title: pkg.name.clone(),
        version: pkg.version.clone(),
        description: Some(pkg.description.clone()),
        terms_of_service: None,
        contact: (contact != Contact::default()).then_some(contact),
        license: None,
        extensions: IndexMap::new(),
    };

    if overrides.is_empty() {
        return info;
    }

    let mut merged = match serde_json::to_value(&info) {
        Ok(value) => value,
        Err(error) => {
            warn!(error = %error, "Ignoring swagger.info overrides");
            return info;
        }
    };
    deep_merge(&mut merged, &Value::Object(overrides.clone()));

    typed("info", "swagger.info", merged).unwrap_or(info)
}

/// Returns the configured model definitions, unchanged.
#[must_use]
pub fn build_definitions(section: &SwaggerSection) -> IndexMap<String, Value> {
    section
        .definitions
        .iter()
        .map(|(name, schema)| (name.clone(), schema.clone()))
        .collect()
}

/// Builds the `paths` object from the route table.
///
/// `static_paths` are the base the route-derived operations are merged over.
#[must_use]
pub fn build_paths(routes: &Routes, static_paths: &Map<String, Value>) -> IndexMap<String, PathItem> {
    let mut merged: IndexMap<String, Value> = IndexMap::new();

    for (path, item) in static_paths {
        let entry = merged
            .entry(convert_path_params(path))
            .or_insert_with(|| Value::Object(Map::new()));
        deep_merge(entry, item);
    }

    for (key, target) in routes {
        let Some(annotation) = target.swagger() else {
            continue;
        };
        let Some(annotation) = annotation.as_object() else {
            warn!(route = %key, "Skipping route whose swagger annotation is not an object");
            continue;
        };

        let (verb, path) = split_route_key(key);
        if path.is_empty() {
            warn!(route = %key, "Skipping route without a path");
            continue;
        }
        let path = convert_path_params(path);

        let mut operation = annotation.clone();
        let methods = resolve_methods(key, operation.remove("methods"), verb.as_deref());
        normalize_responses(&mut operation);
        normalize_parameters(&mut operation);
        let operation = Value::Object(operation);

        let entry = merged
            .entry(path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        for method in &methods {
            let mut item = Map::new();
            item.insert(method.clone(), operation.clone());
            deep_merge(entry, &Value::Object(item));
        }

        debug!(route = %key, path = %path, methods = ?methods, "Documented route");
    }

    merged
        .into_iter()
        .filter_map(|(path, item)| path_item(&path, item).map(|item| (path, item)))
        .collect()
}

/// Splits a route key into its lower-cased verb and its path.
///
/// Keys without a leading verb are returned whole (trimmed).
///
/// ```
/// use pinax_docs::split_route_key;
///
/// assert_eq!(split_route_key("GET /users"), (Some("get".to_string()), "/users"));
/// assert_eq!(split_route_key("/users"), (None, "/users"));
/// ```
#[must_use]
pub fn split_route_key(key: &str) -> (Option<String>, &str) {
    match route_key_regex().captures(key) {
        Some(captures) => {
            let verb = captures
                .get(1)
                .map(|verb| verb.as_str().to_ascii_lowercase());
            let path = captures.get(2).map_or("", |path| path.as_str()).trim();
            (verb, path)
        }
        None => (None, key.trim()),
    }
}

/// Rewrites `:param` (and optional `:param?`) tokens into `{param}`.
///
/// ```
/// use pinax_docs::convert_path_params;
///
/// assert_eq!(convert_path_params("/users/:id/posts/:post?"), "/users/{id}/posts/{post}");
/// ```
#[must_use]
pub fn convert_path_params(path: &str) -> String {
    path_param_regex().replace_all(path, "{${1}}").into_owned()
}

/// Returns the reference to a model definition.
///
/// Model names are lower-cased, matching how definitions are keyed.
#[must_use]
pub fn definition_ref(name: &str) -> String {
    format!("{DEFINITIONS_PREFIX}{}", name.to_lowercase())
}

fn route_key_regex() -> &'static Regex {
    static ROUTE_KEY: OnceLock<Regex> = OnceLock::new();
    ROUTE_KEY.get_or_init(|| {
        Regex::new(r"^\s*(?i:(get|post|put|patch|delete|options|head|all))\s+(.*)$")
            .expect("valid regex")
    })
}

fn path_param_regex() -> &'static Regex {
    static PATH_PARAM: OnceLock<Regex> = OnceLock::new();
    PATH_PARAM.get_or_init(|| Regex::new(r":(\w+)\??").expect("valid regex"))
}

fn resolve_methods(route: &str, methods: Option<Value>, verb: Option<&str>) -> Vec<String> {
    let listed: Vec<String> = match methods {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(method)) => vec![method],
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(method) => Some(method),
                _ => None,
            })
            .collect(),
        Some(other) => {
            warn!(route, methods = %other, "Ignoring malformed methods list");
            Vec::new()
        }
    };

    let mut candidates: Vec<String> = listed
        .iter()
        .map(|method| method.trim().to_ascii_lowercase())
        .filter(|method| !method.is_empty())
        .collect();
    if candidates.is_empty() {
        candidates.push(verb.unwrap_or("get").to_string());
    }

    let mut resolved: Vec<String> = Vec::with_capacity(candidates.len());
    for method in candidates {
        let method = if method == "all" { "get".to_string() } else { method };
        if !METHODS.contains(&method.as_str()) {
            warn!(route, method = %method, "Skipping unsupported method");
            continue;
        }
        if !resolved.contains(&method) {
            resolved.push(method);
        }
    }
    resolved
}

fn normalize_responses(operation: &mut Map<String, Value>) {
    let Some(Value::Object(responses)) = operation.get_mut("responses") else {
        return;
    };

    for response in responses.values_mut() {
        if let Value::String(description) = response {
            let description = std::mem::take(description);
            *response = json!({ "description": description });
        }
        let Value::Object(response) = response else {
            continue;
        };

        let model = response.remove("model");
        match response.get_mut("schema") {
            Some(schema) => *schema = normalize_schema(std::mem::take(schema)),
            None => {
                if let Some(model) = model {
                    response.insert("schema".to_string(), normalize_schema(model));
                }
            }
        }
    }
}

fn normalize_parameters(operation: &mut Map<String, Value>) {
    let Some(Value::Array(parameters)) = operation.get_mut("parameters") else {
        return;
    };

    for parameter in parameters.iter_mut().filter_map(Value::as_object_mut) {
        if let Some(schema) = parameter.get_mut("schema") {
            *schema = normalize_schema(std::mem::take(schema));
        }
    }
}

fn normalize_schema(schema: Value) -> Value {
    match schema {
        Value::String(name) => json!({ "$ref": definition_ref(&name) }),
        Value::Object(mut schema) => {
            let is_array = schema
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|kind| kind.eq_ignore_ascii_case("array"));
            if is_array {
                schema.insert("type".to_string(), json!("array"));
                let item_ref = schema
                    .get("items")
                    .and_then(|items| items.get("schema"))
                    .and_then(Value::as_str)
                    .map(definition_ref);
                if let Some(item_ref) = item_ref {
                    schema.insert("items".to_string(), json!({ "$ref": item_ref }));
                }
            }
            Value::Object(schema)
        }
        other => other,
    }
}

fn apply_defaults(method: &str, operation: &mut Map<String, Value>) {
    let lacks_responses = match operation.get("responses") {
        None | Some(Value::Null) => true,
        Some(Value::Object(responses)) => responses.is_empty(),
        Some(_) => false,
    };
    if lacks_responses {
        let responses: Map<String, Value> = DEFAULT_RESPONSES
            .iter()
            .map(|(code, description)| (code.to_string(), json!({ "description": description })))
            .collect();
        operation.insert("responses".to_string(), Value::Object(responses));
    }

    if operation.get("summary").map_or(true, Value::is_null) {
        if let Some((_, summary)) = METHOD_SUMMARIES.iter().find(|(name, _)| *name == method) {
            operation.insert("summary".to_string(), json!(summary));
        }
    }
}

fn path_item(path: &str, item: Value) -> Option<PathItem> {
    let Value::Object(fields) = item else {
        warn!(path, "Skipping path item that is not an object");
        return None;
    };

    let mut path_item = PathItem::default();
    for (key, value) in fields {
        if key == "parameters" {
            let Value::Array(parameters) = value else {
                warn!(path, "Skipping path parameters that are not a list");
                continue;
            };
            path_item.parameters = parameters
                .into_iter()
                .filter_map(|parameter| typed::<RefOr<Parameter>>("parameter", path, parameter))
                .collect();
        } else if key.starts_with("x-") {
            path_item.extensions.insert(key, value);
        } else if let Some(slot) = path_item.operation_mut(&key) {
            let Value::Object(mut operation) = value else {
                warn!(path, method = %key, "Skipping operation that is not an object");
                continue;
            };
            let location = format!("{key} {path}");
            apply_defaults(&key, &mut operation);
            drop_malformed_items(&location, &mut operation);
            *slot = typed("operation", &location, Value::Object(operation));
        } else {
            warn!(path, key = %key, "Dropping unknown path item field");
        }
    }
    Some(path_item)
}

/// Removes parameters and responses that cannot be read, so one bad entry
/// does not cost the whole operation.
fn drop_malformed_items(location: &str, operation: &mut Map<String, Value>) {
    if let Some(Value::Array(parameters)) = operation.get_mut("parameters") {
        parameters.retain(|parameter| {
            typed::<RefOr<Parameter>>("parameter", location, parameter.clone()).is_some()
        });
    }

    if let Some(Value::Object(responses)) = operation.get_mut("responses") {
        responses.retain(|code, response| {
            typed::<RefOr<Response>>("response", &format!("{code} {location}"), response.clone())
                .is_some()
        });
    }
}

fn typed<T: DeserializeOwned>(kind: &str, name: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(typed) => Some(typed),
        Err(error) => {
            warn!(kind, name, error = %error, "Skipping malformed Swagger object");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::{ParameterIn, SchemaItems};
    use proptest::prelude::*;

    fn section(value: Value) -> SwaggerSection {
        serde_json::from_value(value).unwrap()
    }

    fn routes(value: Value) -> Routes {
        serde_json::from_value(value).unwrap()
    }

    fn build(section_value: Value, routes_value: Value) -> Swagger {
        let section = section(section_value);
        let routes = routes(routes_value);
        DocumentBuilder::new(&section, &routes).build()
    }

    #[test]
    fn test_empty_config_builds_default_document() {
        let doc = build(json!({}), json!({}));

        assert_eq!(doc.swagger, "2.0");
        assert_eq!(doc.info.title, "No package information");
        assert_eq!(doc.info.version, "0.0.0");
        assert!(doc.info.contact.is_none());
        assert!(doc.paths.is_empty());
        assert!(doc.definitions.is_empty());
    }

    #[test]
    fn test_info_from_package() {
        let pkg = PackageInfo {
            name: "petstore".to_string(),
            version: "1.2.0".to_string(),
            description: "Pets".to_string(),
            author: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
        };

        let info = build_info(&pkg, &Map::new());
        assert_eq!(info.title, "petstore");
        assert_eq!(info.version, "1.2.0");
        assert_eq!(info.description.as_deref(), Some("Pets"));
        let contact = info.contact.unwrap();
        assert_eq!(contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(contact.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_info_overrides_are_merged() {
        let overrides = json!({
            "title": "Pet Store API",
            "license": { "name": "MIT" },
            "x-audience": "public"
        });
        let pkg = PackageInfo {
            author: Some("Jane Doe".to_string()),
            ..PackageInfo::default()
        };

        let info = build_info(&pkg, overrides.as_object().unwrap());
        assert_eq!(info.title, "Pet Store API");
        assert_eq!(info.version, "0.0.0");
        assert_eq!(info.license.unwrap().name, "MIT");
        assert_eq!(info.contact.unwrap().name.as_deref(), Some("Jane Doe"));
        assert_eq!(info.extensions["x-audience"], json!("public"));
    }

    #[test]
    fn test_malformed_info_overrides_fall_back() {
        let overrides = json!({ "title": 42 });
        let info = build_info(&PackageInfo::default(), overrides.as_object().unwrap());
        assert_eq!(info.title, "No package information");
    }

    #[test]
    fn test_split_route_key() {
        assert_eq!(
            split_route_key("GET /users"),
            (Some("get".to_string()), "/users")
        );
        assert_eq!(
            split_route_key("  post   /users  "),
            (Some("post".to_string()), "/users")
        );
        assert_eq!(split_route_key("All /x"), (Some("all".to_string()), "/x"));
        assert_eq!(split_route_key(" /users "), (None, "/users"));
        assert_eq!(split_route_key("/targets/get"), (None, "/targets/get"));
        assert_eq!(split_route_key("getaway /x"), (None, "getaway /x"));
    }

    #[test]
    fn test_convert_path_params() {
        assert_eq!(convert_path_params("/users/:id"), "/users/{id}");
        assert_eq!(convert_path_params("/users/:id?"), "/users/{id}");
        assert_eq!(
            convert_path_params("/a/:first/b/:second_id"),
            "/a/{first}/b/{second_id}"
        );
        assert_eq!(convert_path_params("/users/{id}"), "/users/{id}");
        assert_eq!(convert_path_params("/Users/Profile"), "/Users/Profile");
    }

    #[test]
    fn test_definition_ref_lowercases() {
        assert_eq!(definition_ref("UserProfile"), "#/definitions/userprofile");
    }

    #[test]
    fn test_route_annotation_becomes_operation() {
        let doc = build(
            json!({}),
            json!({
                "GET /users/:id": {
                    "controller": "UserController",
                    "swagger": {
                        "summary": "Find a user",
                        "responses": { "200": { "description": "ok", "schema": "User" } }
                    }
                }
            }),
        );

        let item = &doc.paths["/users/{id}"];
        let op = item.get.as_ref().unwrap();
        assert_eq!(op.summary.as_deref(), Some("Find a user"));
        let schema = op.responses["200"].as_inline().unwrap().schema.as_ref().unwrap();
        assert_eq!(schema.reference.as_deref(), Some("#/definitions/user"));
        assert!(item.post.is_none());
    }

    #[test]
    fn test_routes_without_annotation_are_ignored() {
        let doc = build(
            json!({}),
            json!({
                "GET /health": "HealthController.check",
                "POST /users": { "controller": "UserController", "action": "create" }
            }),
        );
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn test_methods_list_overrides_verb() {
        let doc = build(
            json!({}),
            json!({
                "GET /users": { "swagger": { "methods": ["POST", " put ", "", "post"] } }
            }),
        );

        let item = &doc.paths["/users"];
        assert!(item.get.is_none());
        assert_eq!(item.post.as_ref().unwrap().summary.as_deref(), Some("Create Object(s)"));
        assert_eq!(item.put.as_ref().unwrap().summary.as_deref(), Some("Update Object(s)"));
        assert!(!item.post.as_ref().unwrap().extensions.contains_key("methods"));
    }

    #[test]
    fn test_method_defaults() {
        let doc = build(
            json!({}),
            json!({
                "/plain": { "swagger": {} },
                "delete /users/:id": { "swagger": {} },
                "ALL /any": { "swagger": {} }
            }),
        );

        assert!(doc.paths["/plain"].get.is_some());
        assert!(doc.paths["/any"].get.is_some());
        let op = doc.paths["/users/{id}"].delete.as_ref().unwrap();
        assert_eq!(op.summary.as_deref(), Some("Destroy Object(s)"));
        let codes: Vec<&str> = op.responses.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["200", "404", "500"]);
        assert_eq!(op.responses["404"].as_inline().unwrap().description, "Resource not found");
    }

    #[test]
    fn test_model_and_array_schemas() {
        let doc = build(
            json!({}),
            json!({
                "GET /pets": {
                    "swagger": {
                        "responses": {
                            "200": {
                                "description": "all pets",
                                "schema": { "type": "Array", "items": { "schema": "Pet" } }
                            },
                            "201": { "description": "one pet", "model": "Pet" },
                            "204": { "description": "nothing" },
                            "400": "Bad request"
                        }
                    }
                }
            }),
        );

        let op = doc.paths["/pets"].get.as_ref().unwrap();
        let response = |code: &str| op.responses[code].as_inline().unwrap();
        let list = response("200").schema.as_ref().unwrap();
        assert_eq!(list.schema_type.as_deref(), Some("array"));
        let item = list.items.as_ref().and_then(SchemaItems::single).unwrap();
        assert_eq!(item.reference.as_deref(), Some("#/definitions/pet"));

        let single = response("201");
        assert_eq!(
            single.schema.as_ref().unwrap().reference.as_deref(),
            Some("#/definitions/pet")
        );
        assert!(!single.extensions.contains_key("model"));

        assert!(response("204").schema.is_none());
        assert_eq!(response("400").description, "Bad request");
    }

    #[test]
    fn test_parameter_schema_reference() {
        let doc = build(
            json!({}),
            json!({
                "POST /pets": {
                    "swagger": {
                        "parameters": [
                            { "name": "body", "in": "body", "required": true, "schema": "Pet" },
                            { "name": "dryRun", "in": "query", "type": "boolean" }
                        ]
                    }
                }
            }),
        );

        let op = doc.paths["/pets"].post.as_ref().unwrap();
        let body = op.parameters[0].as_inline().unwrap();
        assert_eq!(body.location, ParameterIn::Body);
        assert_eq!(
            body.schema.as_ref().unwrap().reference.as_deref(),
            Some("#/definitions/pet")
        );
        let dry_run = op.parameters[1].as_inline().unwrap();
        assert_eq!(dry_run.param_type.as_deref(), Some("boolean"));
    }

    #[test]
    fn test_same_path_routes_are_merged() {
        let doc = build(
            json!({}),
            json!({
                "GET /users/:id": { "swagger": { "summary": "Find", "tags": ["users"] } },
                "PUT /users/:id": { "swagger": { "summary": "Update" } },
                "get /users/{id}": { "swagger": { "summary": "Find a user" } }
            }),
        );

        assert_eq!(doc.paths.len(), 1);
        let item = &doc.paths["/users/{id}"];
        let get = item.get.as_ref().unwrap();
        assert_eq!(get.summary.as_deref(), Some("Find a user"));
        assert_eq!(get.tags, vec!["users"]);
        assert_eq!(item.put.as_ref().unwrap().summary.as_deref(), Some("Update"));
    }

    #[test]
    fn test_static_paths_are_the_base() {
        let doc = build(
            json!({
                "paths": {
                    "/status": { "get": { "summary": "Status", "x-internal": true } },
                    "/users/:id": {
                        "x-owner": "accounts",
                        "get": { "description": "static description" }
                    }
                }
            }),
            json!({
                "GET /users/:id": { "swagger": { "summary": "Find a user" } }
            }),
        );

        assert_eq!(doc.paths["/status"].get.as_ref().unwrap().summary.as_deref(), Some("Status"));
        let item = &doc.paths["/users/{id}"];
        assert_eq!(item.extensions["x-owner"], json!("accounts"));
        let get = item.get.as_ref().unwrap();
        assert_eq!(get.summary.as_deref(), Some("Find a user"));
        assert_eq!(get.description.as_deref(), Some("static description"));
    }

    #[test]
    fn test_malformed_annotations_are_skipped() {
        let doc = build(
            json!({}),
            json!({
                "GET /broken": { "swagger": "not an object" },
                "GET /bad-summary": { "swagger": { "summary": 5 } },
                "GET /fine": { "swagger": { "summary": "ok" } }
            }),
        );

        assert!(!doc.paths.contains_key("/broken"));
        assert!(doc.paths["/bad-summary"].get.is_none());
        assert!(doc.paths["/fine"].get.is_some());
    }

    #[test]
    fn test_reference_parameters_and_responses_are_kept() {
        let doc = build(
            json!({}),
            json!({
                "GET /pets": {
                    "swagger": {
                        "summary": "List pets",
                        "parameters": [{ "$ref": "#/parameters/limit" }],
                        "responses": {
                            "200": { "description": "ok", "schema": "Pet" },
                            "404": { "$ref": "#/responses/NotFound" }
                        }
                    }
                }
            }),
        );

        let op = doc.paths["/pets"].get.as_ref().unwrap();
        assert_eq!(op.summary.as_deref(), Some("List pets"));
        assert_eq!(op.parameters[0].reference(), Some("#/parameters/limit"));

        let json = serde_json::to_value(&doc.paths["/pets"]).unwrap();
        assert_eq!(json["get"]["parameters"], json!([{ "$ref": "#/parameters/limit" }]));
        assert_eq!(
            json["get"]["responses"]["404"],
            json!({ "$ref": "#/responses/NotFound" })
        );
    }

    #[test]
    fn test_malformed_items_are_dropped_individually() {
        let doc = build(
            json!({
                "paths": {
                    "/pets/:id": { "parameters": [{ "$ref": "#/parameters/id" }, { "in": "path" }] }
                }
            }),
            json!({
                "GET /pets/:id": {
                    "swagger": {
                        "summary": "Find a pet",
                        "parameters": [
                            { "in": "query" },
                            { "name": "expand", "in": "query", "type": "boolean" }
                        ],
                        "responses": {
                            "200": { "description": "ok" },
                            "500": { "description": 5 }
                        }
                    }
                }
            }),
        );

        let item = &doc.paths["/pets/{id}"];
        assert_eq!(item.parameters.len(), 1);
        assert_eq!(item.parameters[0].reference(), Some("#/parameters/id"));

        let op = item.get.as_ref().unwrap();
        assert_eq!(op.summary.as_deref(), Some("Find a pet"));
        assert_eq!(op.parameters.len(), 1);
        assert_eq!(op.parameters[0].as_inline().unwrap().name, "expand");
        let codes: Vec<&str> = op.responses.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["200"]);
    }

    #[test]
    fn test_definitions_pass_through_unchanged() {
        let definitions = json!({
            "user": {
                "properties": { "name": { "type": "string", "required": true } }
            },
            "point": {
                "type": "array",
                "items": [{ "type": "number" }, { "type": "number" }]
            },
            "legacy": { "type": "object", "x-orm": { "table": "legacy" }, "required": "yes" }
        });
        let doc = build(json!({ "definitions": definitions.clone() }), json!({}));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["definitions"], definitions);
    }

    #[test]
    fn test_passthrough_fields() {
        let doc = build(
            json!({
                "pkg": { "name": "petstore" },
                "ui": { "url": "https://petstore.swagger.io/" },
                "host": "api.example.com",
                "basePath": "/api",
                "schemes": ["https"],
                "definitions": { "user": { "type": "object", "properties": { "id": { "type": "integer" } } } },
                "tags": [{ "name": "users" }],
                "x-logo": { "url": "logo.png" },
                "swagger": "1.2"
            }),
            json!({}),
        );

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["swagger"], "2.0");
        assert_eq!(json["host"], "api.example.com");
        assert_eq!(json["basePath"], "/api");
        assert_eq!(json["schemes"], json!(["https"]));
        assert_eq!(json["definitions"]["user"]["properties"]["id"]["type"], "integer");
        assert_eq!(json["tags"][0]["name"], "users");
        assert_eq!(json["x-logo"]["url"], "logo.png");
        assert!(json.get("pkg").is_none());
        assert!(json.get("ui").is_none());
    }

    #[test]
    fn test_build_is_deterministic() {
        let section = section(json!({ "pkg": { "name": "petstore" } }));
        let routes = routes(json!({
            "GET /users/:id": { "swagger": { "responses": { "200": { "schema": "User" } } } },
            "POST /users": { "swagger": {} }
        }));
        let builder = DocumentBuilder::new(&section, &routes);

        assert_eq!(builder.build(), builder.build());
        assert_eq!(builder.build_json().unwrap(), builder.build_json().unwrap());
    }

    #[test]
    fn test_built_paths_merge_over_themselves_unchanged() {
        let doc = build(
            json!({}),
            json!({
                "GET /users/:id": { "swagger": { "responses": { "200": { "schema": "User" } } } },
                "POST /users": { "swagger": { "parameters": [{ "name": "body", "in": "body", "schema": "User" }] } }
            }),
        );

        let paths = serde_json::to_value(&doc.paths).unwrap();
        let again = build(json!({ "paths": paths.clone() }), json!({}));
        assert_eq!(serde_json::to_value(&again.paths).unwrap(), paths);
    }

    #[test]
    fn test_build_json_pretty() {
        let section = SwaggerSection::default();
        let routes = Routes::new();
        let json = DocumentBuilder::new(&section, &routes)
            .build_json_pretty()
            .unwrap();
        assert!(json.contains("\"swagger\": \"2.0\""));
    }

    fn arb_segment() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z0-9_-]{1,8}",
            "[a-zA-Z_][a-zA-Z0-9_]{0,7}".prop_map(|name| format!(":{name}")),
            "[a-zA-Z_][a-zA-Z0-9_]{0,7}".prop_map(|name| format!(":{name}?")),
        ]
    }

    proptest! {
        #[test]
        fn test_path_conversion_is_idempotent(segments in prop::collection::vec(arb_segment(), 0..6)) {
            let path = format!("/{}", segments.join("/"));
            let once = convert_path_params(&path);
            prop_assert!(!once.contains(':'));
            prop_assert_eq!(convert_path_params(&once), once.clone());

            let params = segments.iter().filter(|segment| segment.starts_with(':')).count();
            prop_assert_eq!(once.matches('{').count(), params);
        }
    }
}
