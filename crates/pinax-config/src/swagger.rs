//! The `swagger` and `routes` configuration sections.
//!
//! The swagger section holds the package metadata used to build the `info`
//! object, the viewer settings, the model definitions and any top-level
//! Swagger 2.0 fields that should be copied into the served document. The
//! routes section mirrors the application's route table: each key is a
//! `"<verb> <path>"` pattern and each value either names the target action or
//! carries a route configuration, optionally with a `swagger` annotation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Package metadata the document `info` object is derived from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageInfo {
    /// Package name, becomes `info.title`.
    #[serde(default = "default_pkg_name")]
    pub name: String,

    /// Package version, becomes `info.version`.
    #[serde(default = "default_pkg_version")]
    pub version: String,

    /// Package description, becomes `info.description`.
    #[serde(default = "default_pkg_description")]
    pub description: String,

    /// Package author, becomes `info.contact.name`.
    #[serde(default)]
    pub author: Option<String>,

    /// Contact email, becomes `info.contact.email`.
    #[serde(default)]
    pub email: Option<String>,
}

impl Default for PackageInfo {
    fn default() -> Self {
        Self {
            name: default_pkg_name(),
            version: default_pkg_version(),
            description: default_pkg_description(),
            author: None,
            email: None,
        }
    }
}

fn default_pkg_name() -> String {
    "No package information".to_string()
}

fn default_pkg_version() -> String {
    "0.0.0".to_string()
}

fn default_pkg_description() -> String {
    "You should set swagger.pkg to the content of your package metadata".to_string()
}

/// Documentation viewer settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// External viewer to redirect to. The document URL is appended as
    /// `?url=...`. When unset, the bundled ReDoc page is served.
    #[serde(default)]
    pub url: Option<String>,

    /// Title of the bundled viewer page.
    #[serde(default)]
    pub title: Option<String>,

    /// ReDoc release loaded by the bundled viewer page.
    #[serde(default)]
    pub redoc_version: Option<String>,

    /// Responses ReDoc expands initially: `"all"` or a list of status codes
    /// such as `"200,201"`.
    #[serde(default)]
    pub expand_responses: Option<String>,

    /// Hide the ReDoc download button.
    #[serde(default)]
    pub hide_download_button: bool,

    /// Hide the host name in operation URLs.
    #[serde(default)]
    pub hide_hostname: bool,

    /// Disable the ReDoc search box.
    #[serde(default)]
    pub disable_search: bool,
}

/// The `swagger` configuration section.
///
/// Fields other than `pkg` and `ui` are copied into the served document.
/// Unknown keys (such as `x-` vendor extensions) are kept in
/// [`extensions`](Self::extensions) and copied as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SwaggerSection {
    /// Package metadata.
    #[serde(default)]
    pub pkg: PackageInfo,

    /// Overrides deep-merged over the `info` object built from `pkg`.
    #[serde(default)]
    pub info: Map<String, Value>,

    /// Viewer settings.
    #[serde(default)]
    pub ui: UiConfig,

    /// Host (name or IP) serving the API.
    #[serde(default)]
    pub host: Option<String>,

    /// Base path the API is served under, also used to build the document URL.
    #[serde(default, alias = "basePath")]
    pub base_path: Option<String>,

    /// Transfer protocols of the API.
    #[serde(default)]
    pub schemes: Vec<String>,

    /// MIME types the API consumes.
    #[serde(default)]
    pub consumes: Vec<String>,

    /// MIME types the API produces.
    #[serde(default)]
    pub produces: Vec<String>,

    /// Model definitions, passed through to the document unchanged.
    #[serde(default)]
    pub definitions: Map<String, Value>,

    /// Statically declared path items that route annotations are merged over.
    #[serde(default)]
    pub paths: Map<String, Value>,

    /// Tag declarations.
    #[serde(default)]
    pub tags: Vec<Value>,

    /// Security scheme definitions.
    #[serde(default, alias = "securityDefinitions")]
    pub security_definitions: Map<String, Value>,

    /// Global security requirements.
    #[serde(default)]
    pub security: Vec<Value>,

    /// External documentation object.
    #[serde(default, alias = "externalDocs")]
    pub external_docs: Option<Value>,

    /// Any other key, copied verbatim into the document.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// Target of a route entry.
///
/// Route tables accept a bare action reference (`"UserController.find"`),
/// a full route configuration, or any other target the host framework
/// understands (such as a policy chain).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RouteTarget {
    /// Bare action reference, never documented.
    Action(String),
    /// Route configuration object.
    Config(RouteConfig),
    /// Any other target, never documented.
    Other(Value),
}

impl RouteTarget {
    /// Returns the swagger annotation of this route, if any.
    #[must_use]
    pub fn swagger(&self) -> Option<&Value> {
        match self {
            Self::Config(config) => config.swagger.as_ref(),
            Self::Action(_) | Self::Other(_) => None,
        }
    }
}

/// Configuration of a single route.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteConfig {
    /// Controller handling the route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,

    /// Action of the controller handling the route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Swagger operation annotation. Routes without one are not documented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger: Option<Value>,

    /// Remaining route options, ignored by the documentation builder.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// The route table, in declaration order.
pub type Routes = IndexMap<String, RouteTarget>;
