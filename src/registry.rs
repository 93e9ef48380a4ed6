//! Template registry: template id → section kind.
//!
//! Template ids are opaque strings stored on every section row. Over the
//! platform's lifetime they have been UUIDs, short aliases, and duplicates of
//! each other, and a few UUIDs were reassigned to a different kind between
//! versions. The registry makes that history explicit: it is built by merging
//! an ordered list of [`AliasTable`]s, and a later table always wins over an
//! earlier one for the same id.
//!
//! ```text
//! legacy-v1  →  v2  →  current  →  config.toml aliases
//! (oldest)                          (highest precedence)
//! ```
//!
//! A handful of ids resolve to [`SectionKind::Skip`]. Those are legacy
//! duplicates that must render nothing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical semantic type of a section. Dispatch matches on this enum
/// exhaustively, so adding a kind forces a renderer to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    HeroHtml,
    AuthorBio,
    Faq,
    HotelCarousel,
    StarterPack,
    Activities,
    TableOfContents,
    WhyChoose,
    WhyDifferent,
    ComparisonTable,
    TipBoxes,
    BudgetTimeline,
    HtmlContent,
    RelatedArticles,
    Skip,
}

impl SectionKind {
    pub const ALL: [SectionKind; 16] = [
        SectionKind::Hero,
        SectionKind::HeroHtml,
        SectionKind::AuthorBio,
        SectionKind::Faq,
        SectionKind::HotelCarousel,
        SectionKind::StarterPack,
        SectionKind::Activities,
        SectionKind::TableOfContents,
        SectionKind::WhyChoose,
        SectionKind::WhyDifferent,
        SectionKind::ComparisonTable,
        SectionKind::TipBoxes,
        SectionKind::BudgetTimeline,
        SectionKind::HtmlContent,
        SectionKind::RelatedArticles,
        SectionKind::Skip,
    ];

    /// Component name as stored in config files and shown in diagnostics.
    pub fn component_name(&self) -> &'static str {
        match self {
            SectionKind::Hero => "HeroSection",
            SectionKind::HeroHtml => "HeroHtmlSection",
            SectionKind::AuthorBio => "AuthorBioSection",
            SectionKind::Faq => "FAQSection",
            SectionKind::HotelCarousel => "HotelCarouselSection",
            SectionKind::StarterPack => "StarterPackSection",
            SectionKind::Activities => "ActivitiesSection",
            SectionKind::TableOfContents => "TableOfContentsSection",
            SectionKind::WhyChoose => "WhyChooseSection",
            SectionKind::WhyDifferent => "WhyDifferentSection",
            SectionKind::ComparisonTable => "ComparisonTableSection",
            SectionKind::TipBoxes => "TipBoxesSection",
            SectionKind::BudgetTimeline => "BudgetTimelineSection",
            SectionKind::HtmlContent => "HtmlContentSection",
            SectionKind::RelatedArticles => "RelatedArticlesSection",
            SectionKind::Skip => "Skip",
        }
    }

    /// Parse a component name. Matching is case-insensitive so `FaqSection`
    /// and `FAQSection` are the same kind.
    pub fn from_component_name(name: &str) -> Option<SectionKind> {
        let name = name.trim();
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.component_name().eq_ignore_ascii_case(name))
    }

    /// Hero kinds render full-bleed above the content container.
    pub fn is_hero(&self) -> bool {
        matches!(self, SectionKind::Hero | SectionKind::HeroHtml)
    }

    /// Kinds whose presence switches the whole page to the HTML layout.
    pub fn requires_html_layout(&self) -> bool {
        matches!(
            self,
            SectionKind::HeroHtml
                | SectionKind::TableOfContents
                | SectionKind::WhyChoose
                | SectionKind::ComparisonTable
                | SectionKind::TipBoxes
                | SectionKind::BudgetTimeline
                | SectionKind::HtmlContent
        )
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

/// Resolved kind of a registry entry.
///
/// Config-supplied aliases may name a component this build has no renderer
/// for; those resolve to `Unsupported` rather than failing config loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
    Known(SectionKind),
    Unsupported(String),
}

impl ComponentKind {
    pub fn from_name(name: &str) -> Self {
        match SectionKind::from_component_name(name) {
            Some(kind) => ComponentKind::Known(kind),
            None => ComponentKind::Unsupported(name.trim().to_string()),
        }
    }

    pub fn known(&self) -> Option<SectionKind> {
        match self {
            ComponentKind::Known(kind) => Some(*kind),
            ComponentKind::Unsupported(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ComponentKind::Known(kind) => kind.component_name(),
            ComponentKind::Unsupported(name) => name,
        }
    }
}

/// Cosmetic grouping shown in the admin template picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hero,
    #[default]
    Content,
    Travel,
    Navigation,
    Legacy,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hero => "hero",
            Category::Content => "content",
            Category::Travel => "travel",
            Category::Navigation => "navigation",
            Category::Legacy => "legacy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub name: String,
    pub kind: ComponentKind,
    pub category: Category,
}

impl TemplateDescriptor {
    pub fn new(name: impl Into<String>, kind: SectionKind, category: Category) -> Self {
        Self {
            name: name.into(),
            kind: ComponentKind::Known(kind),
            category,
        }
    }
}

/// One versioned namespace of template ids.
#[derive(Debug, Clone)]
pub struct AliasTable {
    pub version: String,
    pub entries: Vec<(String, TemplateDescriptor)>,
}

impl AliasTable {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, id: impl Into<String>, descriptor: TemplateDescriptor) -> Self {
        self.entries.push((id.into(), descriptor));
        self
    }

    fn from_static(version: &str, entries: &[StaticEntry]) -> Self {
        Self {
            version: version.to_string(),
            entries: entries
                .iter()
                .map(|&(id, name, kind, category)| {
                    (id.to_string(), TemplateDescriptor::new(name, kind, category))
                })
                .collect(),
        }
    }
}

/// `(template id, display name, kind, category)`
type StaticEntry = (&'static str, &'static str, SectionKind, Category);

/// Raw id of the first-generation "HTML article" wrapper. It now resolves to
/// [`SectionKind::Skip`] but posts that still carry it must keep the HTML
/// layout.
pub const LEGACY_HTML_TEMPLATE_ID: &str = "9f1e7c2a-4b3d-4a8e-b5c6-0d1e2f3a4b5c";

const LEGACY_V1: &[StaticEntry] = &[
    ("3c2f8a91-6d4e-4b7a-9e1f-5a6b7c8d9e01", "Hero Banner", SectionKind::Hero, Category::Hero),
    ("5e7a1b2c-3d4e-4f5a-8b9c-0d1e2f3a4b02", "Author Bio", SectionKind::AuthorBio, Category::Content),
    ("7b8c9d0e-1f2a-4b3c-9d4e-5f6a7b8c9d03", "FAQ", SectionKind::Faq, Category::Content),
    ("8c9d0e1f-2a3b-4c4d-8e5f-6a7b8c9d0e04", "Hotel Carousel", SectionKind::HotelCarousel, Category::Travel),
    ("9d0e1f2a-3b4c-4d5e-9f6a-7b8c9d0e1f05", "Starter Pack", SectionKind::StarterPack, Category::Travel),
    ("a0e1f2a3-4c5d-4e6f-8a7b-8c9d0e1f2a06", "Things To Do", SectionKind::Activities, Category::Travel),
    ("b1f2a3b4-5d6e-4f7a-9b8c-9d0e1f2a3b07", "Why Different", SectionKind::WhyDifferent, Category::Content),
    ("c2a3b4c5-6e7f-4a8b-8c9d-0e1f2a3b4c08", "Related Articles", SectionKind::RelatedArticles, Category::Navigation),
    (LEGACY_HTML_TEMPLATE_ID, "HTML Article (legacy)", SectionKind::Skip, Category::Legacy),
    // Duplicate author block emitted by the first migration.
    ("d3b4c5d6-7f8a-4b9c-9d0e-1f2a3b4c5d09", "Author Bio (duplicate)", SectionKind::Skip, Category::Legacy),
];

const V2: &[StaticEntry] = &[
    ("e4c5d6e7-8a9b-4c0d-8e1f-2a3b4c5d6e10", "Hero (HTML)", SectionKind::HeroHtml, Category::Hero),
    ("f5d6e7f8-9b0c-4d1e-9f2a-3b4c5d6e7f11", "Table of Contents", SectionKind::TableOfContents, Category::Navigation),
    ("06e7f8a9-0c1d-4e2f-8a3b-4c5d6e7f8a12", "Why Choose", SectionKind::WhyChoose, Category::Content),
    ("17f8a9b0-1d2e-4f3a-9b4c-5d6e7f8a9b13", "Comparison Table", SectionKind::ComparisonTable, Category::Content),
    ("28a9b0c1-2e3f-4a4b-8c5d-6e7f8a9b0c14", "Tip Boxes", SectionKind::TipBoxes, Category::Content),
    ("39b0c1d2-3f4a-4b5c-9d6e-7f8a9b0c1d15", "HTML Content", SectionKind::HtmlContent, Category::Content),
    // Second starter pack template, introduced with the v2 editor.
    ("4ac1d2e3-4a5b-4c6d-8e7f-8a9b0c1d2e16", "Starter Pack (v2)", SectionKind::StarterPack, Category::Travel),
    // Reassigned in the current table.
    ("5bd2e3f4-5b6c-4d7e-9f8a-9b0c1d2e3f17", "Comparison Table (v2)", SectionKind::ComparisonTable, Category::Content),
];

const CURRENT: &[StaticEntry] = &[
    ("5bd2e3f4-5b6c-4d7e-9f8a-9b0c1d2e3f17", "Budget Timeline", SectionKind::BudgetTimeline, Category::Travel),
    ("hero", "Hero Banner", SectionKind::Hero, Category::Hero),
    ("hero-html", "Hero (HTML)", SectionKind::HeroHtml, Category::Hero),
    ("author-bio", "Author Bio", SectionKind::AuthorBio, Category::Content),
    ("faq", "FAQ", SectionKind::Faq, Category::Content),
    ("hotel-carousel", "Hotel Carousel", SectionKind::HotelCarousel, Category::Travel),
    ("starter-pack", "Starter Pack", SectionKind::StarterPack, Category::Travel),
    ("activities", "Things To Do", SectionKind::Activities, Category::Travel),
    ("table-of-contents", "Table of Contents", SectionKind::TableOfContents, Category::Navigation),
    ("toc", "Table of Contents", SectionKind::TableOfContents, Category::Navigation),
    ("why-choose", "Why Choose", SectionKind::WhyChoose, Category::Content),
    ("why-different", "Why Different", SectionKind::WhyDifferent, Category::Content),
    ("comparison-table", "Comparison Table", SectionKind::ComparisonTable, Category::Content),
    ("tip-boxes", "Tip Boxes", SectionKind::TipBoxes, Category::Content),
    ("budget-timeline", "Budget Timeline", SectionKind::BudgetTimeline, Category::Travel),
    ("html-content", "HTML Content", SectionKind::HtmlContent, Category::Content),
    ("related-articles", "Related Articles", SectionKind::RelatedArticles, Category::Navigation),
];

/// The built-in alias tables, oldest first.
pub fn builtin_tables() -> Vec<AliasTable> {
    vec![
        AliasTable::from_static("legacy-v1", LEGACY_V1),
        AliasTable::from_static("v2", V2),
        AliasTable::from_static("current", CURRENT),
    ]
}

/// Flat lookup from template id to descriptor.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateDescriptor>,
}

impl TemplateRegistry {
    /// Merge tables in order; later tables override earlier ones.
    pub fn from_tables(tables: impl IntoIterator<Item = AliasTable>) -> Self {
        let mut templates = BTreeMap::new();
        for table in tables {
            for (id, descriptor) in table.entries {
                templates.insert(id, descriptor);
            }
        }
        Self { templates }
    }

    /// Registry of the built-in tables only.
    pub fn builtin() -> Self {
        Self::from_tables(builtin_tables())
    }

    pub fn resolve(&self, template_id: &str) -> Option<&TemplateDescriptor> {
        self.templates.get(template_id)
    }

    /// Resolve straight to a known kind, if the id has one.
    pub fn kind_of(&self, template_id: &str) -> Option<SectionKind> {
        self.resolve(template_id).and_then(|d| d.kind.known())
    }

    /// All entries ordered by template id.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TemplateDescriptor)> {
        self.templates.iter().map(|(id, d)| (id.as_str(), d))
    }

    /// Every id that resolves to `kind`.
    pub fn ids_for(&self, kind: SectionKind) -> Vec<&str> {
        self.entries()
            .filter(|(_, d)| d.kind == ComponentKind::Known(kind))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
