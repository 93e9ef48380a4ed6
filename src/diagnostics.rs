//! Diagnostic events emitted while resolving and composing a page.
//!
//! The core never logs on its own. Callers hand it a [`DiagnosticSink`] and
//! decide where events go: `tracing` for the CLI, a [`CollectingSink`] in
//! tests, or [`NullSink`] to drop them.

use std::cell::RefCell;

use crate::registry::SectionKind;

/// Why a section was removed from the page without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    Inactive,
    GenericFaq,
    GenericStarterPack,
    RetiredKind,
    DuplicateWhyDifferent,
}

impl FilterReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterReason::Inactive => "inactive",
            FilterReason::GenericFaq => "generic FAQ content",
            FilterReason::GenericStarterPack => "generic starter pack content",
            FilterReason::RetiredKind => "retired section kind",
            FilterReason::DuplicateWhyDifferent => "duplicate why-different block",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    UnresolvedTemplate {
        section_id: String,
        template_id: String,
    },
    SkippedTemplate {
        section_id: String,
        template_id: String,
    },
    SectionFiltered {
        section_id: String,
        kind: Option<SectionKind>,
        reason: FilterReason,
    },
    UnsupportedKind {
        section_id: String,
        kind_name: String,
    },
    RenderFailed {
        section_id: String,
        kind: SectionKind,
        message: String,
    },
    LayoutChosen {
        use_html_layout: bool,
        trigger: Option<String>,
    },
    TocExtracted {
        entries: usize,
    },
}

pub trait DiagnosticSink {
    fn emit(&self, diagnostic: &Diagnostic);
}

impl<F: Fn(&Diagnostic)> DiagnosticSink for F {
    fn emit(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Discards every event.
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}

/// Routes events to `tracing` with structured fields.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::UnresolvedTemplate {
                section_id,
                template_id,
            } => tracing::warn!(section = %section_id, template = %template_id, "unresolved template"),
            Diagnostic::SkippedTemplate {
                section_id,
                template_id,
            } => tracing::debug!(section = %section_id, template = %template_id, "skip template, rendering nothing"),
            Diagnostic::SectionFiltered {
                section_id,
                kind,
                reason,
            } => tracing::debug!(
                section = %section_id,
                kind = kind.as_ref().map(SectionKind::component_name).unwrap_or("-"),
                reason = reason.as_str(),
                "section filtered"
            ),
            Diagnostic::UnsupportedKind {
                section_id,
                kind_name,
            } => tracing::warn!(section = %section_id, kind = %kind_name, "no renderer for section kind"),
            Diagnostic::RenderFailed {
                section_id,
                kind,
                message,
            } => tracing::warn!(
                section = %section_id,
                kind = kind.component_name(),
                error = %message,
                "section render failed"
            ),
            Diagnostic::LayoutChosen {
                use_html_layout,
                trigger,
            } => tracing::debug!(
                html_layout = use_html_layout,
                trigger = trigger.as_deref().unwrap_or("-"),
                "layout chosen"
            ),
            Diagnostic::TocExtracted { entries } => {
                tracing::debug!(entries, "table of contents extracted")
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Default)]
pub struct CollectingSink {
    events: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.borrow().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Diagnostic) -> bool) -> usize {
        self.events.borrow().iter().filter(|d| predicate(d)).count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.events.borrow_mut().push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_records_in_order() {
        let sink = CollectingSink::new();
        sink.emit(&Diagnostic::TocExtracted { entries: 2 });
        sink.emit(&Diagnostic::LayoutChosen {
            use_html_layout: false,
            trigger: None,
        });
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Diagnostic::TocExtracted { entries: 2 });
    }

    #[test]
    fn closures_are_sinks() {
        let seen = RefCell::new(0);
        let sink = |_: &Diagnostic| *seen.borrow_mut() += 1;
        sink.emit(&Diagnostic::TocExtracted { entries: 0 });
        sink.emit(&Diagnostic::TocExtracted { entries: 1 });
        assert_eq!(*seen.borrow(), 2);
    }
}
