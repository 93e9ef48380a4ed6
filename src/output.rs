//! CLI output formatting.
//!
//! Output is **section-centric**: every section is shown by its position in
//! the page and its resolved kind, with the template id and the outcome as
//! secondary context. This reads as an inventory of what a post will show.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! Layout: html (trigger: toc)
//!
//! Sections
//! 001 HeroSection [hero] → rendered
//!     Template: hero
//! 002 FAQSection → omitted (generic FAQ content)
//!     Template: faq
//!
//! Table of contents
//!     best-time-to-visit  Best Time to Visit
//!         tips  Tips
//!
//! Rendered 1 of 2 sections, 2 TOC entries
//! ```
//!
//! ## Templates
//!
//! ```text
//! FAQSection (2 ids)
//!     7b8c9d0e-1f2a-4b3c-9d4e-5f6a7b8c9d03  FAQ [content]
//!     faq  FAQ [content]
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use std::collections::BTreeMap;
use std::path::Path;

use crate::compose::{ComposedPage, SlotOutcome};
use crate::diagnostics::FilterReason;
use crate::layout::LayoutDecision;
use crate::registry::{TemplateDescriptor, TemplateRegistry};
use crate::render::OmitReason;
use crate::types::{Section, TocEntry};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn outcome_label(outcome: &SlotOutcome) -> String {
    match outcome {
        SlotOutcome::Rendered => "rendered".to_string(),
        SlotOutcome::Diagnostic => "diagnostic block".to_string(),
        SlotOutcome::Failed => "failed (notice shown)".to_string(),
        SlotOutcome::Omitted(reason) => format!("omitted ({})", omit_label(reason)),
    }
}

fn omit_label(reason: &OmitReason) -> &'static str {
    match reason {
        OmitReason::Filtered(FilterReason::Inactive) => "inactive",
        OmitReason::Filtered(reason) => reason.as_str(),
        OmitReason::Unresolved => "unresolved template",
        OmitReason::Unsupported => "no renderer",
        OmitReason::Skip => "skip template",
        OmitReason::ComposerOwned => "rendered by the page",
        OmitReason::Empty => "nothing to show",
    }
}

fn layout_line(layout: &LayoutDecision) -> String {
    match &layout.trigger {
        Some(trigger) => format!("Layout: {} (trigger: {})", layout.name(), trigger),
        None => format!("Layout: {}", layout.name()),
    }
}

/// TOC entries indented by heading depth below level 2.
fn toc_lines(toc: &[TocEntry]) -> Vec<String> {
    toc.iter()
        .map(|entry| {
            let depth = 1 + usize::from(entry.level.saturating_sub(2));
            format!("{}{}  {}", indent(depth), entry.id, entry.title)
        })
        .collect()
}

// ============================================================================
// Render
// ============================================================================

pub fn format_render_output(
    page: &ComposedPage,
    sections: &[Section],
    written_to: Option<&Path>,
) -> Vec<String> {
    let mut lines = vec![layout_line(&page.layout), String::new(), "Sections".to_string()];

    for (i, slot) in page.slots.iter().enumerate() {
        let kind = slot
            .kind
            .map(|k| k.component_name().to_string())
            .unwrap_or_else(|| "(unresolved)".to_string());
        let hero = if slot.hero { " [hero]" } else { "" };
        lines.push(format!(
            "{} {}{} → {}",
            format_index(i + 1),
            kind,
            hero,
            outcome_label(&slot.outcome)
        ));
        if let Some(section) = sections.iter().find(|s| s.id == slot.section_id) {
            lines.push(format!("{}Template: {}", indent(1), section.template_id));
        }
    }

    if !page.toc.is_empty() {
        lines.push(String::new());
        lines.push("Table of contents".to_string());
        lines.extend(toc_lines(&page.toc));
    }

    lines.push(String::new());
    lines.push(format!(
        "Rendered {} of {} sections, {} TOC entries",
        page.visible_count(),
        page.slots.len(),
        page.toc.len()
    ));
    if let Some(path) = written_to {
        lines.push(format!("Wrote {}", path.display()));
    }
    lines
}

pub fn print_render_output(page: &ComposedPage, sections: &[Section], written_to: Option<&Path>) {
    for line in format_render_output(page, sections, written_to) {
        println!("{}", line);
    }
}

// ============================================================================
// Classify
// ============================================================================

pub fn format_classify_output(layout: &LayoutDecision, sections: &[Section]) -> Vec<String> {
    let active = sections.iter().filter(|s| s.is_active).count();
    vec![
        layout_line(layout),
        format!(
            "{}{} sections ({} active, {} inactive)",
            indent(1),
            sections.len(),
            active,
            sections.len() - active
        ),
    ]
}

pub fn print_classify_output(layout: &LayoutDecision, sections: &[Section]) {
    for line in format_classify_output(layout, sections) {
        println!("{}", line);
    }
}

// ============================================================================
// Templates
// ============================================================================

pub fn format_templates_output(registry: &TemplateRegistry) -> Vec<String> {
    let mut groups: BTreeMap<&str, Vec<(&str, &TemplateDescriptor)>> = BTreeMap::new();
    for (id, descriptor) in registry.entries() {
        groups
            .entry(descriptor.kind.name())
            .or_default()
            .push((id, descriptor));
    }

    let mut lines = Vec::new();
    for (kind, entries) in &groups {
        lines.push(format!("{} ({} ids)", kind, entries.len()));
        for (id, descriptor) in entries {
            lines.push(format!(
                "{}{}  {} [{}]",
                indent(1),
                id,
                descriptor.name,
                descriptor.category.as_str()
            ));
        }
    }
    lines.push(String::new());
    lines.push(format!("{} template ids, {} kinds", registry.len(), groups.len()));
    lines
}

pub fn print_templates_output(registry: &TemplateRegistry) {
    for line in format_templates_output(registry) {
        println!("{}", line);
    }
}
