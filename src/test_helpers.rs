//! Shared test utilities.
//!
//! Builders for sections and render contexts, plus lookups over composed
//! pages that panic with a clear message on a miss.

use serde_json::Value;

use crate::compose::{ComposedPage, SlotOutcome};
use crate::types::{Author, PostContext, RenderContext, RenderMode, Section};

// =========================================================================
// Builders
// =========================================================================

/// An active section with no title override.
pub fn section(id: &str, template_id: &str, position: i64, data: Value) -> Section {
    Section {
        id: id.to_string(),
        template_id: template_id.to_string(),
        position,
        is_active: true,
        title: None,
        data,
    }
}

/// Same as [`section`] but inactive.
pub fn inactive(id: &str, template_id: &str, position: i64, data: Value) -> Section {
    Section {
        is_active: false,
        ..section(id, template_id, position, data)
    }
}

pub fn post() -> PostContext {
    PostContext {
        title: "Three Days in Porto".to_string(),
        excerpt: Some("Tiles, trams and port cellars.".to_string()),
        slug: "three-days-in-porto".to_string(),
        author: Some(Author {
            name: "Rita Alves".to_string(),
            bio: Some("Writes about slow travel in Iberia.".to_string()),
            avatar_url: None,
        }),
    }
}

pub fn production() -> RenderContext {
    RenderContext::new(post(), "en", RenderMode::Production)
}

pub fn development() -> RenderContext {
    RenderContext::new(post(), "en", RenderMode::Development)
}

// =========================================================================
// Composed page lookups
// =========================================================================

/// Outcome recorded for a section id. Panics if the section has no slot.
pub fn slot_of<'a>(page: &'a ComposedPage, section_id: &str) -> &'a SlotOutcome {
    page.slots
        .iter()
        .find(|s| s.section_id == section_id)
        .map(|s| &s.outcome)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = page.slots.iter().map(|s| s.section_id.as_str()).collect();
            panic!("no slot for section '{section_id}'. Available: {ids:?}")
        })
}

/// Section ids whose output made it into the page, in page order.
pub fn rendered_ids(page: &ComposedPage) -> Vec<&str> {
    page.slots
        .iter()
        .filter(|s| s.outcome.is_visible())
        .map(|s| s.section_id.as_str())
        .collect()
}
