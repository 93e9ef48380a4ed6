//! Page layout classification.
//!
//! A post renders either in the **HTML layout** (one contiguous white
//! container for everything below the hero) or in the **legacy layout** (the
//! card-style panel used by migrated posts). The choice is made once per page
//! from the set of template ids present, never per section, so a post that
//! mixes migrated and newly authored sections still renders consistently.
//!
//! Inactive sections take part in the decision.

use crate::registry::{LEGACY_HTML_TEMPLATE_ID, TemplateRegistry};
use crate::types::Section;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDecision {
    pub use_html_layout: bool,
    /// Template id of the first section that selected the HTML layout.
    pub trigger: Option<String>,
}

impl LayoutDecision {
    pub fn legacy() -> Self {
        Self {
            use_html_layout: false,
            trigger: None,
        }
    }

    pub fn name(&self) -> &'static str {
        if self.use_html_layout {
            "html"
        } else {
            "legacy"
        }
    }
}

/// Whether one template id selects the HTML layout on its own.
pub fn selects_html_layout(
    template_id: &str,
    registry: &TemplateRegistry,
    extra_html_ids: &[String],
) -> bool {
    template_id == LEGACY_HTML_TEMPLATE_ID
        || extra_html_ids.iter().any(|id| id == template_id)
        || registry
            .kind_of(template_id)
            .is_some_and(|kind| kind.requires_html_layout())
}

/// Choose the layout for a full, unfiltered section list.
pub fn classify(
    sections: &[Section],
    registry: &TemplateRegistry,
    extra_html_ids: &[String],
) -> LayoutDecision {
    sections
        .iter()
        .find(|s| selects_html_layout(&s.template_id, registry, extra_html_ids))
        .map(|s| LayoutDecision {
            use_html_layout: true,
            trigger: Some(s.template_id.clone()),
        })
        .unwrap_or_else(LayoutDecision::legacy)
}
