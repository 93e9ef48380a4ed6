//! Page composition.
//!
//! [`compose`] turns a section snapshot into one page:
//!
//! ```text
//! sections ──► classify (all sections, inactive included)
//!          ──► stable sort by position
//!          ──► render each section ──► hero slots   ──► full-bleed, in order
//!                                  └─► content slots ──► TOC + spaced slots in
//!                                                       one container / panel
//! ```
//!
//! Omitted sections leave no wrapper, and `data-slot` indices stay contiguous
//! over the slots that did render. Rendered content is mounted in a
//! [`MarkupDocument`] so every heading leaves with an anchor id, and the TOC
//! is built from those ids.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::config::RendererConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, FilterReason};
use crate::layout::{LayoutDecision, classify};
use crate::registry::{SectionKind, TemplateRegistry};
use crate::render::{OmitReason, SectionOutcome, render_section};
use crate::toc::{MarkupDocument, assign_heading_ids, extract_headings, merge_headings, render_toc};
use crate::types::{RenderContext, Section, TocEntry};

/// What happened to one section, without its markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    Rendered,
    Diagnostic,
    Failed,
    Omitted(OmitReason),
}

impl SlotOutcome {
    /// Whether the section left anything on the page.
    pub fn is_visible(&self) -> bool {
        !matches!(self, SlotOutcome::Omitted(_))
    }

    fn of(outcome: &SectionOutcome) -> Self {
        match outcome {
            SectionOutcome::Rendered(_) => SlotOutcome::Rendered,
            SectionOutcome::Diagnostic(_) => SlotOutcome::Diagnostic,
            SectionOutcome::Failed(_) => SlotOutcome::Failed,
            SectionOutcome::Omitted(reason) => SlotOutcome::Omitted(*reason),
        }
    }
}

/// One section's place in the composed page, in display order.
#[derive(Debug, Clone)]
pub struct Slot {
    pub section_id: String,
    pub kind: Option<SectionKind>,
    pub hero: bool,
    pub outcome: SlotOutcome,
}

#[derive(Debug, Clone)]
pub struct ComposedPage {
    pub layout: LayoutDecision,
    pub toc: Vec<TocEntry>,
    /// Heroes followed by the content container, without a document shell.
    pub markup: Markup,
    pub slots: Vec<Slot>,
}

impl ComposedPage {
    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|s| s.outcome.is_visible()).count()
    }
}

pub fn compose(
    sections: &[Section],
    ctx: &RenderContext,
    registry: &TemplateRegistry,
    config: &RendererConfig,
    sink: &dyn DiagnosticSink,
) -> ComposedPage {
    let layout = classify(sections, registry, &config.layout.extra_html_template_ids);
    sink.emit(&Diagnostic::LayoutChosen {
        use_html_layout: layout.use_html_layout,
        trigger: layout.trigger.clone(),
    });

    let mut ordered: Vec<&Section> = sections.iter().collect();
    ordered.sort_by_key(|s| s.position);

    let mut slots = Vec::with_capacity(ordered.len());
    let mut heroes: Vec<Markup> = Vec::new();
    let mut content: Vec<Markup> = Vec::new();
    let mut rendered_content: Vec<Section> = Vec::new();
    let mut seen_why_different = false;

    for section in ordered {
        let kind = registry.kind_of(&section.template_id);
        let hero = kind.is_some_and(|k| k.is_hero());

        let outcome = if section.is_active && kind == Some(SectionKind::WhyDifferent) && seen_why_different {
            sink.emit(&Diagnostic::SectionFiltered {
                section_id: section.id.clone(),
                kind,
                reason: FilterReason::DuplicateWhyDifferent,
            });
            SectionOutcome::Omitted(OmitReason::Filtered(FilterReason::DuplicateWhyDifferent))
        } else {
            if section.is_active && kind == Some(SectionKind::WhyDifferent) {
                seen_why_different = true;
            }
            render_section(section, registry, ctx, &config.filters, sink)
        };

        if let Some(markup) = outcome.markup() {
            if hero {
                heroes.push(markup.clone());
            } else {
                content.push(markup.clone());
                if matches!(outcome, SectionOutcome::Rendered(_)) {
                    rendered_content.push(section.clone());
                }
            }
        }
        slots.push(Slot {
            section_id: section.id.clone(),
            kind,
            hero,
            outcome: SlotOutcome::of(&outcome),
        });
    }

    let spaced = html! {
        @for (index, markup) in content.iter().enumerate() {
            div.section-slot data-slot=(index) { (markup) }
        }
    };
    let document = MarkupDocument::new(spaced.into_string());
    let discovered = assign_heading_ids(&document);
    let toc = merge_headings(&extract_headings(&rendered_content), &discovered);
    sink.emit(&Diagnostic::TocExtracted { entries: toc.len() });

    let body = PreEscaped(document.html());
    let has_body = !content.is_empty() || !toc.is_empty();
    let toc_markup = render_toc(&toc, &ctx.language);

    let markup = html! {
        div.post-page data-layout=(layout.name()) {
            @for hero in &heroes {
                div.hero-slot { (hero) }
            }
            @if has_body {
                @if layout.use_html_layout {
                    main.content-container {
                        (toc_markup)
                        (body)
                    }
                } @else {
                    main.content-panel {
                        (toc_markup)
                        (body)
                    }
                }
            }
        }
    };

    ComposedPage {
        layout,
        toc,
        markup,
        slots,
    }
}

/// Wrap a composed page in a standalone HTML document.
pub fn render_document(page: &ComposedPage, ctx: &RenderContext, css: &str) -> Markup {
    let description = ctx.post.excerpt.as_deref().filter(|e| !e.trim().is_empty());
    html! {
        (DOCTYPE)
        html lang=(ctx.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                title { (ctx.post.title) }
                style { (PreEscaped(css)) }
            }
            body class=(format!("layout-{}", page.layout.name())) {
                (page.markup)
            }
        }
    }
}
