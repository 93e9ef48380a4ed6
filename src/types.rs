//! Shared types exchanged with the host application.
//!
//! Sections and the post context arrive as JSON from the content store. Field
//! names follow the store's camelCase convention so payloads can be passed
//! through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One content block of a post.
///
/// The core treats a section list as an immutable snapshot per render pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Opaque unique identifier assigned by the store.
    pub id: String,
    /// Key into the template registry. Several ids may alias the same kind.
    pub template_id: String,
    /// Display order. Not guaranteed contiguous or unique.
    #[serde(default)]
    pub position: i64,
    /// Inactive sections never reach the rendered page.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Optional title override, merged into the payload before dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Template-specific payload.
    #[serde(default = "empty_object")]
    pub data: Value,
}

fn default_active() -> bool {
    true
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Section {
    /// The payload with `title` overridden by the section-level title, if any.
    ///
    /// Non-object payloads are replaced by an object so renderers always see
    /// a map.
    pub fn merged_payload(&self) -> Value {
        let mut payload = match &self.data {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            payload.insert("title".to_string(), Value::String(title.to_string()));
        }
        Value::Object(payload)
    }

    /// A string field of the raw payload, if present.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// Author metadata attached to a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// The post a section list belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostContext {
    pub title: String,
    pub excerpt: Option<String>,
    pub slug: String,
    pub author: Option<Author>,
}

/// Whether diagnostics are surfaced in the rendered page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// End users never see template ids, payloads or error details.
    #[default]
    Production,
    /// Editors see labeled diagnostic blocks in place of dropped sections.
    Development,
}

impl RenderMode {
    pub fn is_development(self) -> bool {
        self == RenderMode::Development
    }
}

/// Everything a section renderer may read besides its own payload.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub post: PostContext,
    /// Active locale, e.g. `"en"` or `"es"`.
    pub language: String,
    pub mode: RenderMode,
}

impl RenderContext {
    pub fn new(post: PostContext, language: impl Into<String>, mode: RenderMode) -> Self {
        Self {
            post,
            language: language.into(),
            mode,
        }
    }
}

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id, without the leading `#`.
    pub id: String,
    pub title: String,
    /// Heading level, 2 through 6.
    pub level: u8,
}

impl TocEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
        }
    }
}
