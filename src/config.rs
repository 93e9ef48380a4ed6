//! Renderer configuration.
//!
//! Handles loading, validating, and merging `config.toml`. User files are
//! sparse: they are merged over the stock defaults, so a file only needs the
//! keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! mode = "production"            # or "development" to show diagnostics
//!
//! [filters]
//! faq_min_question_chars = 10    # Shorter questions count as placeholders...
//! faq_min_answer_chars = 20      # ...when the answer is also this short
//! faq_placeholder_questions = ["What is the best time to visit?", ...]
//! faq_placeholder_answers = ["Add your answer here", ...]
//! starter_pack_placeholder_descriptions = ["Everything you need to know", ...]
//!
//! [[filters.starter_pack_placeholder_highlights]]
//! title = "Best Time to Visit"
//! value = "Spring"
//! description = "Mild weather and fewer crowds"
//!
//! [layout]
//! extra_html_template_ids = []   # Raw ids that force the HTML layout
//!
//! [[templates.aliases]]          # Highest-precedence alias table
//! id = "map-embed"
//! name = "Map Embed"
//! kind = "MapEmbedSection"
//! category = "content"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::registry::{
    AliasTable, Category, ComponentKind, TemplateDescriptor, TemplateRegistry, builtin_tables,
};
use crate::types::RenderMode;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Renderer configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Production hides diagnostics; development shows them inline.
    pub mode: RenderMode,
    /// Generic-content filter thresholds and denylists.
    pub filters: FilterConfig,
    /// Layout classification overrides.
    pub layout: LayoutConfig,
    /// Extra template aliases, merged after the built-in tables.
    pub templates: TemplatesConfig,
}

impl RendererConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filters.faq_min_question_chars == 0 {
            return Err(ConfigError::Validation(
                "filters.faq_min_question_chars must be non-zero".into(),
            ));
        }
        if self.filters.faq_min_answer_chars == 0 {
            return Err(ConfigError::Validation(
                "filters.faq_min_answer_chars must be non-zero".into(),
            ));
        }
        for alias in &self.templates.aliases {
            if alias.id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "templates.aliases entries need a non-empty id".into(),
                ));
            }
            if alias.kind.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "templates.aliases entry '{}' needs a kind",
                    alias.id
                )));
            }
        }
        Ok(())
    }

    /// Registry of the built-in tables plus this config's aliases.
    pub fn registry(&self) -> TemplateRegistry {
        let mut tables = builtin_tables();
        tables.push(self.templates.alias_table());
        TemplateRegistry::from_tables(tables)
    }
}

/// A placeholder highlight compared field by field, case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceholderHighlight {
    pub title: String,
    pub value: String,
    pub description: String,
}

impl PlaceholderHighlight {
    fn new(title: &str, value: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            description: description.to_string(),
        }
    }
}

/// Generic-content filter settings.
///
/// The stock values are the phrases the section templates ship with. They are
/// heuristics, so every one can be overridden.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub faq_min_question_chars: usize,
    pub faq_min_answer_chars: usize,
    pub faq_placeholder_questions: Vec<String>,
    pub faq_placeholder_answers: Vec<String>,
    pub starter_pack_placeholder_descriptions: Vec<String>,
    pub starter_pack_placeholder_highlights: Vec<PlaceholderHighlight>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            faq_min_question_chars: 10,
            faq_min_answer_chars: 20,
            faq_placeholder_questions: [
                "What is the best time to visit?",
                "How do I get there?",
                "Is it safe to travel here?",
                "What should I pack?",
                "Question goes here",
            ]
            .map(String::from)
            .to_vec(),
            faq_placeholder_answers: [
                "Add your answer here",
                "Answer goes here",
                "Lorem ipsum",
            ]
            .map(String::from)
            .to_vec(),
            starter_pack_placeholder_descriptions: [
                "Everything you need to know before your trip",
                "Your essential guide to planning the perfect visit",
                "Add a short description of this destination",
            ]
            .map(String::from)
            .to_vec(),
            starter_pack_placeholder_highlights: vec![
                PlaceholderHighlight::new(
                    "Best Time to Visit",
                    "Spring",
                    "Mild weather and fewer crowds",
                ),
                PlaceholderHighlight::new("Budget", "$$", "Mid-range prices for most travelers"),
                PlaceholderHighlight::new("Duration", "3-5 days", "Enough time to see the highlights"),
                PlaceholderHighlight::new(
                    "Getting Around",
                    "Public transport",
                    "Efficient and affordable",
                ),
            ],
        }
    }
}

/// Layout classification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Raw template ids that force the HTML layout in addition to the
    /// built-in legacy id.
    pub extra_html_template_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    pub aliases: Vec<AliasConfig>,
}

impl TemplatesConfig {
    pub fn alias_table(&self) -> AliasTable {
        AliasTable {
            version: "config".to_string(),
            entries: self
                .aliases
                .iter()
                .map(|alias| {
                    let name = if alias.name.is_empty() {
                        alias.id.clone()
                    } else {
                        alias.name.clone()
                    };
                    let descriptor = TemplateDescriptor {
                        name,
                        kind: ComponentKind::from_name(&alias.kind),
                        category: alias.category,
                    };
                    (alias.id.clone(), descriptor)
                })
                .collect(),
        }
    }
}

/// One `[[templates.aliases]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Component name, e.g. `"FAQSection"`.
    pub kind: String,
    #[serde(default)]
    pub category: Category,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(RendererConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<RendererConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: RendererConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a config file. A missing path yields the stock defaults.
pub fn load_config(path: &Path) -> Result<RendererConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Waypage Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# "production" drops unresolved or failing sections silently.
# "development" shows a labeled diagnostic block in their place.
mode = "production"

# ---------------------------------------------------------------------------
# Generic content filters
# ---------------------------------------------------------------------------
[filters]
# An FAQ list is hidden when every entry has a question shorter than
# faq_min_question_chars AND an answer shorter than faq_min_answer_chars.
faq_min_question_chars = 10
faq_min_answer_chars = 20

# An FAQ list is also hidden when every entry is one of these placeholders
# (question match is exact, answer match is a substring; both ignore case).
faq_placeholder_questions = [
    "What is the best time to visit?",
    "How do I get there?",
    "Is it safe to travel here?",
    "What should I pack?",
    "Question goes here",
]
faq_placeholder_answers = ["Add your answer here", "Answer goes here", "Lorem ipsum"]

# A starter pack is hidden when its description is empty or contains one of
# these phrases AND every highlight is one of the placeholder highlights.
starter_pack_placeholder_descriptions = [
    "Everything you need to know before your trip",
    "Your essential guide to planning the perfect visit",
    "Add a short description of this destination",
]

[[filters.starter_pack_placeholder_highlights]]
title = "Best Time to Visit"
value = "Spring"
description = "Mild weather and fewer crowds"

[[filters.starter_pack_placeholder_highlights]]
title = "Budget"
value = "$$"
description = "Mid-range prices for most travelers"

[[filters.starter_pack_placeholder_highlights]]
title = "Duration"
value = "3-5 days"
description = "Enough time to see the highlights"

[[filters.starter_pack_placeholder_highlights]]
title = "Getting Around"
value = "Public transport"
description = "Efficient and affordable"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Raw template ids that force the single-container HTML layout.
extra_html_template_ids = []

# ---------------------------------------------------------------------------
# Template aliases
# ---------------------------------------------------------------------------
# Merged after the built-in tables, so these win on collision.
# [[templates.aliases]]
# id = "faq-2024"
# name = "FAQ (2024 editor)"
# kind = "FAQSection"
# category = "content"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SectionKind;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_production() {
        let config = RendererConfig::default();
        assert_eq!(config.mode, RenderMode::Production);
        assert_eq!(config.filters.faq_min_question_chars, 10);
        assert_eq!(config.filters.faq_min_answer_chars, 20);
        assert_eq!(config.filters.starter_pack_placeholder_highlights.len(), 4);
    }

    #[test]
    fn parse_partial_config() {
        let value: toml::Value = toml::from_str(
            r#"
mode = "development"
[filters]
faq_min_question_chars = 5
"#,
        )
        .unwrap();
        let config = resolve_config(Some(value)).unwrap();
        assert_eq!(config.mode, RenderMode::Development);
        assert_eq!(config.filters.faq_min_question_chars, 5);
        // Defaults preserved
        assert_eq!(config.filters.faq_min_answer_chars, 20);
        assert!(!config.filters.faq_placeholder_questions.is_empty());
    }

    #[test]
    fn unknown_keys_rejected() {
        let value: toml::Value = toml::from_str("[filters]\nfaq_min_chars = 3").unwrap();
        assert!(matches!(resolve_config(Some(value)), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn zero_threshold_fails_validation() {
        let value: toml::Value = toml::from_str("[filters]\nfaq_min_answer_chars = 0").unwrap();
        assert!(matches!(
            resolve_config(Some(value)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn merge_toml_replaces_arrays() {
        let base: toml::Value = toml::from_str("a = [1, 2]\n[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("a = [3]\n[t]\ny = 5").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_array().unwrap().len(), 1);
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(5));
    }

    #[test]
    fn config_aliases_override_builtin() {
        let value: toml::Value = toml::from_str(
            r#"
[[templates.aliases]]
id = "faq"
name = "Tips instead"
kind = "TipBoxesSection"

[[templates.aliases]]
id = "map-embed"
kind = "MapEmbedSection"
"#,
        )
        .unwrap();
        let config = resolve_config(Some(value)).unwrap();
        let registry = config.registry();
        assert_eq!(registry.kind_of("faq"), Some(SectionKind::TipBoxes));
        let map = registry.resolve("map-embed").unwrap();
        assert_eq!(map.name, "map-embed");
        assert_eq!(map.kind, ComponentKind::Unsupported("MapEmbedSection".into()));
    }

    #[test]
    fn alias_without_kind_fails_validation() {
        let value: toml::Value =
            toml::from_str("[[templates.aliases]]\nid = \"x\"\nkind = \"  \"").unwrap();
        assert!(matches!(
            resolve_config(Some(value)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.mode, RenderMode::Production);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[layout]\nextra_html_template_ids = [\"abc\"]").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.layout.extra_html_template_ids, vec!["abc".to_string()]);
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(Some(value)).unwrap();
        let defaults = RendererConfig::default();
        assert_eq!(
            config.filters.faq_placeholder_questions,
            defaults.filters.faq_placeholder_questions
        );
        assert_eq!(
            config.filters.starter_pack_placeholder_highlights,
            defaults.filters.starter_pack_placeholder_highlights
        );
    }
}
