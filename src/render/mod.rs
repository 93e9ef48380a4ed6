//! Per-section render dispatch.
//!
//! [`render_section`] resolves a section's template, applies the generic
//! content filters, and hands the merged payload to the kind's renderer in
//! [`components`]. Failures stay inside the section: a renderer error becomes
//! a muted notice in that slot and the rest of the page renders normally.
//!
//! ```text
//! inactive ─────────────► Omitted(Filtered(Inactive))
//! unresolved ───────────► Diagnostic (dev) / Omitted (prod)
//! unsupported kind ─────► Diagnostic (dev) / Omitted (prod)
//! Skip ─────────────────► Omitted(Skip)
//! retired kind ─────────► Omitted(Filtered(RetiredKind))
//! placeholder content ──► Omitted(Filtered(..))
//! renderer Err or panic ► Failed(notice)
//! otherwise ────────────► Rendered
//! ```

pub mod components;
pub mod labels;

use std::panic::{AssertUnwindSafe, catch_unwind};

use maud::{Markup, html};
use serde_json::Value;
use thiserror::Error;

use crate::config::FilterConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, FilterReason};
use crate::filter::{is_generic_faq_content, is_generic_starter_pack_content, is_suppressed_kind};
use crate::payload::{self, FaqPayload, ReasonsPayload, StarterPackPayload};
use crate::registry::{ComponentKind, SectionKind, TemplateRegistry};
use crate::types::{RenderContext, Section};
use labels::labels;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("invalid content: {0}")]
    Invalid(String),
    #[error("renderer panicked: {0}")]
    Panicked(String),
}

/// Why a section produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmitReason {
    Filtered(FilterReason),
    Unresolved,
    Unsupported,
    Skip,
    /// The composer renders this kind itself (the table of contents).
    ComposerOwned,
    /// The renderer had nothing to show.
    Empty,
}

#[derive(Debug, Clone)]
pub enum SectionOutcome {
    Rendered(Markup),
    Omitted(OmitReason),
    /// Development-only block describing why the section is missing.
    Diagnostic(Markup),
    /// Notice standing in for a section whose renderer failed.
    Failed(Markup),
}

impl SectionOutcome {
    pub fn markup(&self) -> Option<&Markup> {
        match self {
            SectionOutcome::Rendered(m) | SectionOutcome::Diagnostic(m) | SectionOutcome::Failed(m) => Some(m),
            SectionOutcome::Omitted(_) => None,
        }
    }
}

/// Heading level for a section's own title, from `headingLevel` (2–6).
pub fn heading_level(payload: &Value) -> u8 {
    payload
        .get("headingLevel")
        .and_then(Value::as_u64)
        .filter(|level| (2..=6).contains(level))
        .map(|level| level as u8)
        .unwrap_or(2)
}

/// Render one section.
pub fn render_section(
    section: &Section,
    registry: &TemplateRegistry,
    ctx: &RenderContext,
    filters: &FilterConfig,
    sink: &dyn DiagnosticSink,
) -> SectionOutcome {
    let descriptor = registry.resolve(&section.template_id);

    if !section.is_active {
        return filtered(section, descriptor.and_then(|d| d.kind.known()), FilterReason::Inactive, sink);
    }

    let Some(descriptor) = descriptor else {
        sink.emit(&Diagnostic::UnresolvedTemplate {
            section_id: section.id.clone(),
            template_id: section.template_id.clone(),
        });
        return dev_or_omit(ctx, OmitReason::Unresolved, || unresolved_block(section));
    };

    let kind = match &descriptor.kind {
        ComponentKind::Known(kind) => *kind,
        ComponentKind::Unsupported(name) => {
            sink.emit(&Diagnostic::UnsupportedKind {
                section_id: section.id.clone(),
                kind_name: name.clone(),
            });
            return dev_or_omit(ctx, OmitReason::Unsupported, || unsupported_block(section, name));
        }
    };

    if kind == SectionKind::Skip {
        sink.emit(&Diagnostic::SkippedTemplate {
            section_id: section.id.clone(),
            template_id: section.template_id.clone(),
        });
        return SectionOutcome::Omitted(OmitReason::Skip);
    }
    if is_suppressed_kind(kind) {
        return filtered(section, Some(kind), FilterReason::RetiredKind, sink);
    }
    if kind == SectionKind::TableOfContents {
        return SectionOutcome::Omitted(OmitReason::ComposerOwned);
    }

    let payload = section.merged_payload();
    match guarded(|| dispatch(kind, &payload, ctx, filters)) {
        Ok(Dispatched::Markup(markup)) if markup.0.trim().is_empty() => {
            SectionOutcome::Omitted(OmitReason::Empty)
        }
        Ok(Dispatched::Markup(markup)) => SectionOutcome::Rendered(markup),
        Ok(Dispatched::Filtered(reason)) => filtered(section, Some(kind), reason, sink),
        Err(err) => {
            let message = err.to_string();
            sink.emit(&Diagnostic::RenderFailed {
                section_id: section.id.clone(),
                kind,
                message: message.clone(),
            });
            SectionOutcome::Failed(failure_notice(ctx, kind, &message))
        }
    }
}

enum Dispatched {
    Markup(Markup),
    Filtered(FilterReason),
}

/// Run a renderer, turning a panic into [`RenderError::Panicked`].
fn guarded<T>(render: impl FnOnce() -> Result<T, RenderError>) -> Result<T, RenderError> {
    catch_unwind(AssertUnwindSafe(render)).unwrap_or_else(|panic| {
        let message = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(RenderError::Panicked(message))
    })
}

fn dispatch(
    kind: SectionKind,
    payload: &Value,
    ctx: &RenderContext,
    filters: &FilterConfig,
) -> Result<Dispatched, RenderError> {
    let level = heading_level(payload);
    let markup = match kind {
        SectionKind::Hero => components::hero(&payload::parse(payload)?, ctx),
        SectionKind::HeroHtml => components::hero_html(&payload::parse(payload)?, ctx),
        SectionKind::AuthorBio => components::author_bio(&payload::parse(payload)?, ctx, level),
        SectionKind::Faq => {
            let faq: FaqPayload = payload::parse(payload)?;
            if is_generic_faq_content(&faq.faqs, filters) {
                return Ok(Dispatched::Filtered(FilterReason::GenericFaq));
            }
            components::faq(&faq, level)
        }
        SectionKind::HotelCarousel => {
            components::hotel_carousel(&payload::parse(payload)?, ctx, level)
        }
        SectionKind::StarterPack => {
            let pack: StarterPackPayload = payload::parse(payload)?;
            if is_generic_starter_pack_content(&pack, filters) {
                return Ok(Dispatched::Filtered(FilterReason::GenericStarterPack));
            }
            components::starter_pack(&pack, level)
        }
        SectionKind::Activities => components::activities(&payload::parse(payload)?, ctx, level),
        SectionKind::WhyChoose => {
            let reasons: ReasonsPayload = payload::parse(payload)?;
            components::reasons(&reasons, "why-choose", level)
        }
        SectionKind::WhyDifferent => {
            let reasons: ReasonsPayload = payload::parse(payload)?;
            components::reasons(&reasons, "why-different", level)
        }
        SectionKind::ComparisonTable => {
            components::comparison_table(&payload::parse(payload)?, level)?
        }
        SectionKind::TipBoxes => components::tip_boxes(&payload::parse(payload)?, level),
        SectionKind::BudgetTimeline => {
            components::budget_timeline(&payload::parse(payload)?, ctx, level)?
        }
        SectionKind::HtmlContent => components::html_content(&payload::parse(payload)?, level),
        // Handled before dispatch.
        SectionKind::TableOfContents | SectionKind::RelatedArticles | SectionKind::Skip => {
            html! {}
        }
    };
    Ok(Dispatched::Markup(markup))
}

fn filtered(
    section: &Section,
    kind: Option<SectionKind>,
    reason: FilterReason,
    sink: &dyn DiagnosticSink,
) -> SectionOutcome {
    sink.emit(&Diagnostic::SectionFiltered {
        section_id: section.id.clone(),
        kind,
        reason,
    });
    SectionOutcome::Omitted(OmitReason::Filtered(reason))
}

fn dev_or_omit(ctx: &RenderContext, reason: OmitReason, block: impl FnOnce() -> Markup) -> SectionOutcome {
    if ctx.mode.is_development() {
        SectionOutcome::Diagnostic(block())
    } else {
        SectionOutcome::Omitted(reason)
    }
}

fn unresolved_block(section: &Section) -> Markup {
    html! {
        div.dev-diagnostic data-section=(section.id) {
            p.dev-diagnostic-title { "Unresolved template" }
            p { "Section " code { (section.id) } " uses template id " code { (section.template_id) } ", which is not in the registry." }
        }
    }
}

fn unsupported_block(section: &Section, kind_name: &str) -> Markup {
    let raw = serde_json::to_string_pretty(&section.data).unwrap_or_else(|_| section.data.to_string());
    html! {
        div.dev-diagnostic data-section=(section.id) {
            p.dev-diagnostic-title { "No renderer for " code { (kind_name) } }
            p { "Template id " code { (section.template_id) } }
            pre.dev-diagnostic-payload { (raw) }
        }
    }
}

fn failure_notice(ctx: &RenderContext, kind: SectionKind, message: &str) -> Markup {
    html! {
        div.section-error role="note" {
            p { (labels(&ctx.language).unavailable) }
            @if ctx.mode.is_development() {
                p.section-error-detail { code { (kind.component_name()) } ": " (message) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::registry::{AliasTable, Category, TemplateDescriptor};
    use crate::test_helpers::{development, inactive, production, section};
    use serde_json::json;

    fn render(section: &Section, ctx: &RenderContext) -> (SectionOutcome, CollectingSink) {
        let sink = CollectingSink::new();
        let outcome = render_section(
            section,
            &TemplateRegistry::builtin(),
            ctx,
            &FilterConfig::default(),
            &sink,
        );
        (outcome, sink)
    }

    fn rendered_html(outcome: &SectionOutcome) -> String {
        match outcome {
            SectionOutcome::Rendered(m) => m.0.clone(),
            other => panic!("expected rendered output, got {other:?}"),
        }
    }

    #[test]
    fn heading_level_defaults_and_clamps() {
        assert_eq!(heading_level(&json!({})), 2);
        assert_eq!(heading_level(&json!({ "headingLevel": 4 })), 4);
        assert_eq!(heading_level(&json!({ "headingLevel": 1 })), 2);
        assert_eq!(heading_level(&json!({ "headingLevel": "3" })), 2);
    }

    #[test]
    fn panicking_renderer_becomes_an_error() {
        let result: Result<(), RenderError> = guarded(|| panic!("row {} out of range", 3));
        assert!(matches!(result, Err(RenderError::Panicked(ref m)) if m == "row 3 out of range"));
        let ok = guarded(|| Ok::<_, RenderError>(7));
        assert!(matches!(ok, Ok(7)));
    }

    #[test]
    fn out_of_range_heading_level_still_renders_html_content() {
        let s = section(
            "c",
            "html-content",
            0,
            json!({ "title": "Getting Around", "headingLevel": 300, "content": "<p>Take the metro.</p>" }),
        );
        let (outcome, _) = render(&s, &production());
        let html = rendered_html(&outcome);
        assert!(html.contains(r#"<h2 class="section-title" id="getting-around">"#));
        assert!(html.contains("Take the metro."));
    }

    #[test]
    fn html_content_with_content_and_html_prefers_content() {
        let s = section(
            "c",
            "html-content",
            0,
            json!({ "content": "<p>Current copy</p>", "html": "<p>Legacy copy</p>" }),
        );
        let (outcome, _) = render(&s, &production());
        let html = rendered_html(&outcome);
        assert!(html.contains("Current copy"));
        assert!(!html.contains("Legacy copy"));
    }

    #[test]
    fn inactive_is_omitted() {
        let (outcome, sink) = render(&inactive("s", "faq", 0, json!({})), &production());
        assert!(matches!(outcome, SectionOutcome::Omitted(OmitReason::Filtered(FilterReason::Inactive))));
        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn unresolved_is_silent_in_production() {
        let (outcome, sink) = render(&section("s", "nope", 0, json!({})), &production());
        assert!(matches!(outcome, SectionOutcome::Omitted(OmitReason::Unresolved)));
        assert_eq!(
            sink.events(),
            vec![Diagnostic::UnresolvedTemplate {
                section_id: "s".into(),
                template_id: "nope".into()
            }]
        );
    }

    #[test]
    fn unresolved_names_the_id_in_development() {
        let (outcome, _) = render(&section("s", "nope", 0, json!({})), &development());
        let SectionOutcome::Diagnostic(markup) = outcome else {
            panic!("expected a diagnostic block");
        };
        assert!(markup.0.contains("Unresolved template"));
        assert!(markup.0.contains("<code>nope</code>"));
    }

    #[test]
    fn unsupported_kind_dumps_payload_in_development() {
        let registry = TemplateRegistry::from_tables([AliasTable::new("test").with(
            "map",
            TemplateDescriptor {
                name: "Map".into(),
                kind: ComponentKind::from_name("MapSection"),
                category: Category::Travel,
            },
        )]);
        let s = section("s", "map", 0, json!({ "lat": 41.15 }));
        let sink = CollectingSink::new();
        let dev = render_section(&s, &registry, &development(), &FilterConfig::default(), &sink);
        let SectionOutcome::Diagnostic(markup) = dev else {
            panic!("expected a diagnostic block");
        };
        assert!(markup.0.contains("MapSection"));
        assert!(markup.0.contains("41.15"));

        let prod = render_section(&s, &registry, &production(), &FilterConfig::default(), &sink);
        assert!(matches!(prod, SectionOutcome::Omitted(OmitReason::Unsupported)));
    }

    #[test]
    fn skip_and_retired_kinds_are_omitted() {
        let (skip, _) = render(
            &section("s", crate::registry::LEGACY_HTML_TEMPLATE_ID, 0, json!({})),
            &production(),
        );
        assert!(matches!(skip, SectionOutcome::Omitted(OmitReason::Skip)));

        let (retired, _) = render(&section("r", "related-articles", 0, json!({})), &production());
        assert!(matches!(
            retired,
            SectionOutcome::Omitted(OmitReason::Filtered(FilterReason::RetiredKind))
        ));
    }

    #[test]
    fn table_of_contents_is_left_to_the_composer() {
        let (outcome, _) = render(&section("t", "toc", 0, json!({})), &production());
        assert!(matches!(outcome, SectionOutcome::Omitted(OmitReason::ComposerOwned)));
    }

    #[test]
    fn empty_faq_is_filtered() {
        let (outcome, _) = render(&section("f", "faq", 0, json!({ "faqs": [] })), &production());
        assert!(matches!(
            outcome,
            SectionOutcome::Omitted(OmitReason::Filtered(FilterReason::GenericFaq))
        ));
    }

    #[test]
    fn section_title_overrides_payload_title() {
        let mut s = section(
            "f",
            "faq",
            0,
            json!({
                "title": "Old",
                "faqs": [{ "question": "Can I pay by card on trams?", "answer": "Yes, contactless works on every line." }]
            }),
        );
        s.title = Some("Porto FAQ".into());
        let (outcome, _) = render(&s, &production());
        let html = rendered_html(&outcome);
        assert!(html.contains(r#"id="porto-faq""#));
        assert!(!html.contains("Old"));
    }

    #[test]
    fn wrong_payload_type_becomes_notice() {
        let s = section("f", "faq", 0, json!({ "faqs": "not a list" }));
        let (prod, sink) = render(&s, &production());
        let SectionOutcome::Failed(markup) = prod else {
            panic!("expected a failure notice");
        };
        assert!(markup.0.contains("This content is currently unavailable."));
        assert!(!markup.0.contains("FAQSection"));
        assert_eq!(
            sink.count(|d| matches!(d, Diagnostic::RenderFailed { .. })),
            1
        );

        let (dev, _) = render(&s, &development());
        assert!(dev.markup().is_some_and(|m| m.0.contains("FAQSection")));
    }

    #[test]
    fn empty_renderer_output_is_omitted() {
        let (outcome, _) = render(&section("h", "hotel-carousel", 0, json!({})), &production());
        assert!(matches!(outcome, SectionOutcome::Omitted(OmitReason::Empty)));
    }

    #[test]
    fn notice_is_localized() {
        let ctx = RenderContext::new(crate::test_helpers::post(), "es", crate::types::RenderMode::Production);
        let s = section("b", "budget-timeline", 0, json!({ "items": [{ "label": "x", "amount": -1 }] }));
        let (outcome, _) = render(&s, &ctx);
        assert!(outcome.markup().is_some_and(|m| m.0.contains("no está disponible")));
    }
}
