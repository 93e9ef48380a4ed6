//! Table-of-contents extraction.
//!
//! Headings reach the TOC from two places:
//!
//! 1. **Declared**: raw HTML stored in a section payload (`content`/`html`)
//!    and `title` + `headingLevel` metadata. Extracted by [`extract_headings`]
//!    without rendering anything.
//! 2. **Discovered**: headings present in the rendered output. A
//!    [`HeadingHost`] exposes them; [`assign_heading_ids`] gives every heading
//!    without an id a slug id and writes it back so anchors resolve.
//!
//! Both lists are merged by [`merge_headings`], which keeps the first
//! occurrence of each `(id, title, level)`.
//!
//! Rendered content can change after the first pass (content mounted late).
//! [`TocObserver`] subscribes to a host, rescans on every change and keeps the
//! merged list current. Its own id writes are changes too; they converge
//! because a rescan only writes ids that were missing.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};
use std::sync::LazyLock;

use maud::{Markup, html};
use regex::Regex;

use crate::render::labels::labels;
use crate::types::{Section, TocEntry};

pub const MAX_SLUG_CHARS: usize = 50;
pub const MIN_LEVEL: u8 = 2;
pub const MAX_LEVEL: u8 = 6;
const FALLBACK_ID: &str = "heading";

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h([2-6])(\s[^>]*)?>(.*?)</h[2-6]\s*>").expect("heading regex")
});

static ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("id regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// Derive an anchor id from heading text.
///
/// Lowercases, drops everything but alphanumerics, whitespace and `-`,
/// collapses whitespace runs into single hyphens, and truncates to
/// [`MAX_SLUG_CHARS`] characters. Applying it to its own output is a no-op.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(MAX_SLUG_CHARS)
        .collect()
}

/// Anchor id for a heading: its slug, or `heading` when the text has no
/// alphanumerics (emoji, punctuation).
pub fn anchor_id(title: &str) -> String {
    let slug = slugify(title);
    if slug.trim_matches('-').is_empty() {
        FALLBACK_ID.to_string()
    } else {
        slug
    }
}

/// Plain text of an HTML fragment: tags removed, common entities decoded,
/// whitespace collapsed.
pub fn heading_text(inner_html: &str) -> String {
    let stripped = TAG_RE.replace_all(inner_html, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn id_attribute(attrs: &str) -> Option<String> {
    let caps = ID_ATTR_RE.captures(attrs)?;
    let value = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str()
        .trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Headings level 2–6 in a raw HTML string, in document order.
///
/// An existing `id` attribute is kept; otherwise the id is the slug of the
/// heading text. Headings without text are skipped.
pub fn extract_html_headings(html: &str) -> Vec<TocEntry> {
    HEADING_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let level = caps[1].parse::<u8>().ok()?;
            let title = heading_text(&caps[3]);
            if title.is_empty() {
                return None;
            }
            let id = caps
                .get(2)
                .and_then(|attrs| id_attribute(attrs.as_str()))
                .unwrap_or_else(|| anchor_id(&title));
            Some(TocEntry::new(id, title, level))
        })
        .collect()
}

/// The heading a section declares through `title` + `headingLevel`.
pub fn declared_heading(section: &Section) -> Option<TocEntry> {
    let payload = section.merged_payload();
    let level = payload
        .get("headingLevel")
        .and_then(serde_json::Value::as_u64)
        .and_then(|l| u8::try_from(l).ok())
        .filter(|l| (MIN_LEVEL..=MAX_LEVEL).contains(l))?;
    let title = payload.get("title")?.as_str()?.trim();
    if title.is_empty() {
        return None;
    }
    Some(TocEntry::new(anchor_id(title), title, level))
}

/// Raw HTML carried by a section payload, if any.
pub fn section_html(section: &Section) -> Option<&str> {
    let non_empty = |html: &&str| !html.trim().is_empty();
    section
        .data_str("content")
        .filter(non_empty)
        .or_else(|| section.data_str("html").filter(non_empty))
}

/// Static extraction over a section list.
///
/// Only active sections count. Sections are visited in display order; each
/// contributes its declared heading first, then the headings in its HTML.
pub fn extract_headings(sections: &[Section]) -> Vec<TocEntry> {
    let mut ordered: Vec<&Section> = sections.iter().filter(|s| s.is_active).collect();
    ordered.sort_by_key(|s| s.position);

    let mut entries = Vec::new();
    for section in ordered {
        entries.extend(declared_heading(section));
        if let Some(html) = section_html(section) {
            entries.extend(extract_html_headings(html));
        }
    }
    dedup_headings(entries)
}

/// Drop repeated `(id, title, level)` entries, keeping first-seen order.
pub fn dedup_headings(entries: impl IntoIterator<Item = TocEntry>) -> Vec<TocEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

/// Concatenate declared and discovered headings, then dedup.
pub fn merge_headings(declared: &[TocEntry], discovered: &[TocEntry]) -> Vec<TocEntry> {
    dedup_headings(declared.iter().chain(discovered).cloned())
}

// ============================================================================
// Host port
// ============================================================================

/// A heading as seen in mounted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRef {
    pub level: u8,
    pub id: Option<String>,
    pub text: String,
}

/// Access to rendered output, implemented per host environment.
///
/// Methods take `&self`: hosts notify listeners synchronously, and a listener
/// may call back into the host while being notified.
pub trait HeadingHost {
    /// Headings level 2–6 in document order.
    fn scan(&self) -> Vec<HeadingRef>;
    /// Set the id of the `index`-th heading returned by [`scan`](Self::scan).
    fn set_id(&self, index: usize, id: &str);
    /// Call `callback` after every mutation until the subscription drops.
    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription;
}

/// Handle for a host listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unsubscribe now rather than at drop.
    pub fn cancel(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Give every heading lacking an id a slug id, write it back through the
/// host, and return the headings as TOC entries.
///
/// Repeated slugs get the lowest free numeric suffix: `tips`, `tips-1`,
/// `tips-2`. Ids already present in the host are never reused.
pub fn assign_heading_ids<H: HeadingHost + ?Sized>(host: &H) -> Vec<TocEntry> {
    let headings = host.scan();
    let mut taken: HashSet<String> = headings
        .iter()
        .filter_map(|h| h.id.clone())
        .filter(|id| !id.is_empty())
        .collect();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut entries = Vec::new();
    for (index, heading) in headings.into_iter().enumerate() {
        let title = heading.text.trim();
        if title.is_empty() {
            continue;
        }
        let id = match heading.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let base = anchor_id(title);
                let suffix = next_suffix.entry(base.clone()).or_insert(0);
                let mut id = base.clone();
                while taken.contains(&id) {
                    *suffix += 1;
                    id = format!("{base}-{suffix}");
                }
                taken.insert(id.clone());
                host.set_id(index, &id);
                id
            }
        };
        entries.push(TocEntry::new(id, title, heading.level));
    }
    entries
}

// ============================================================================
// In-memory HTML host
// ============================================================================

struct DocumentInner {
    html: RefCell<String>,
    listeners: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    next_listener: Cell<u64>,
}

/// A [`HeadingHost`] over an HTML string.
///
/// Clones share the same document. Used by the composer to anchor rendered
/// headings, and by callers that mount content after the first render.
#[derive(Clone)]
pub struct MarkupDocument {
    inner: Rc<DocumentInner>,
}

impl MarkupDocument {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(DocumentInner {
                html: RefCell::new(html.into()),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn html(&self) -> String {
        self.inner.html.borrow().clone()
    }

    /// Append content and notify listeners.
    pub fn mount(&self, html: &str) {
        self.inner.html.borrow_mut().push_str(html);
        self.notify();
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl HeadingHost for MarkupDocument {
    fn scan(&self) -> Vec<HeadingRef> {
        let html = self.inner.html.borrow();
        HEADING_RE
            .captures_iter(&html)
            .filter_map(|caps| {
                Some(HeadingRef {
                    level: caps[1].parse().ok()?,
                    id: caps.get(2).and_then(|a| id_attribute(a.as_str())),
                    text: heading_text(&caps[3]),
                })
            })
            .collect()
    }

    fn set_id(&self, index: usize, id: &str) {
        let rewritten = {
            let html = self.inner.html.borrow();
            let Some(caps) = HEADING_RE.captures_iter(&html).nth(index) else {
                return;
            };
            let Some(whole) = caps.get(0) else {
                return;
            };
            let escaped = id.replace('&', "&amp;").replace('"', "&quot;");
            let level = &caps[1];
            let attrs = caps.get(2).map(|a| a.as_str()).unwrap_or("");
            let attrs = if ID_ATTR_RE.is_match(attrs) {
                ID_ATTR_RE
                    .replace(attrs, |c: &regex::Captures| {
                        let lead = if c[0].starts_with(char::is_whitespace) {
                            " "
                        } else {
                            ""
                        };
                        format!("{lead}id=\"{escaped}\"")
                    })
                    .into_owned()
            } else {
                format!(" id=\"{escaped}\"{attrs}")
            };
            let open_end = caps.get(3).map(|m| m.start()).unwrap_or(whole.end());
            let opening = format!("<h{level}{attrs}>");
            if html[whole.start()..open_end] == opening {
                return;
            }
            let mut out = String::with_capacity(html.len() + id.len() + 8);
            out.push_str(&html[..whole.start()]);
            out.push_str(&opening);
            out.push_str(&html[open_end..]);
            out
        };
        *self.inner.html.borrow_mut() = rewritten;
        self.notify();
    }

    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription {
        let key = self.inner.next_listener.get();
        self.inner.next_listener.set(key + 1);
        self.inner.listeners.borrow_mut().push((key, callback));
        let weak: Weak<DocumentInner> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().retain(|(k, _)| *k != key);
            }
        })
    }
}

// ============================================================================
// Observer
// ============================================================================

struct ObserverState {
    declared: Vec<TocEntry>,
    entries: RefCell<Vec<TocEntry>>,
    refreshing: Cell<bool>,
    dirty: Cell<bool>,
    passes: Cell<usize>,
}

impl ObserverState {
    fn refresh<H: HeadingHost + ?Sized>(&self, host: &H) {
        if self.refreshing.get() {
            // Change caused by our own id writes; the running pass rescans.
            self.dirty.set(true);
            return;
        }
        self.refreshing.set(true);
        loop {
            self.dirty.set(false);
            let discovered = assign_heading_ids(host);
            self.passes.set(self.passes.get() + 1);
            *self.entries.borrow_mut() = merge_headings(&self.declared, &discovered);
            if !self.dirty.get() {
                break;
            }
        }
        self.refreshing.set(false);
    }
}

/// Keeps a merged TOC in sync with a host's mounted content.
///
/// Scans once on construction and again after every host change. Dropping
/// the observer disconnects it from the host.
pub struct TocObserver {
    state: Rc<ObserverState>,
    _subscription: Subscription,
}

impl TocObserver {
    pub fn observe<H: HeadingHost + 'static>(host: &Rc<H>, declared: Vec<TocEntry>) -> Self {
        let state = Rc::new(ObserverState {
            declared,
            entries: RefCell::new(Vec::new()),
            refreshing: Cell::new(false),
            dirty: Cell::new(false),
            passes: Cell::new(0),
        });
        let weak_host: Weak<H> = Rc::downgrade(host);
        let weak_state: Weak<ObserverState> = Rc::downgrade(&state);
        let subscription = host.on_change(Rc::new(move || {
            if let (Some(host), Some(state)) = (weak_host.upgrade(), weak_state.upgrade()) {
                state.refresh(&*host);
            }
        }));
        state.refresh(&**host);
        Self {
            state,
            _subscription: subscription,
        }
    }

    /// The current merged TOC.
    pub fn entries(&self) -> Vec<TocEntry> {
        self.state.entries.borrow().clone()
    }

    /// Number of scans run so far.
    pub fn passes(&self) -> usize {
        self.state.passes.get()
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the TOC. Empty lists render nothing.
///
/// The label is not a heading element so the TOC never lists itself.
pub fn render_toc(entries: &[TocEntry], language: &str) -> Markup {
    let label = labels(language).toc;
    html! {
        @if !entries.is_empty() {
            nav.toc aria-label=(label) {
                p.toc-title { (label) }
                ol.toc-list {
                    @for entry in entries {
                        li class={ "toc-level-" (entry.level) } {
                            a href={ "#" (entry.id) } { (entry.title) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::section;
    use serde_json::json;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Best Time to Visit"), "best-time-to-visit");
        assert_eq!(slugify("  Where   to Eat?! "), "where-to-eat");
        assert_eq!(slugify("Café & Bar"), "café-bar");
    }

    #[test]
    fn slugify_truncates_to_fifty_chars() {
        let long = "word ".repeat(30);
        assert_eq!(slugify(&long).chars().count(), MAX_SLUG_CHARS);
    }

    #[test]
    fn slugify_is_idempotent() {
        let long = "long heading text ".repeat(10);
        let samples = [
            "Best Time to Visit",
            "  Leading and trailing  ",
            "Already-a-slug",
            "Mixed—dash – and  (parens)",
            "ÜBER Straße 12",
            "",
            "!!!",
            long.as_str(),
        ];
        for sample in samples {
            let once = slugify(sample);
            assert_eq!(slugify(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn extracts_headings_with_and_without_ids() {
        let html = "<h2>Best Time to Visit</h2><p>...</p><h3 id='custom'>Tips</h3>";
        assert_eq!(
            extract_html_headings(html),
            vec![
                TocEntry::new("best-time-to-visit", "Best Time to Visit", 2),
                TocEntry::new("custom", "Tips", 3),
            ]
        );
    }

    #[test]
    fn ignores_h1_and_empty_headings() {
        let html = "<h1>Title</h1><h2> </h2><h4 class=\"x\">Deep <em>dive</em></h4>";
        assert_eq!(
            extract_html_headings(html),
            vec![TocEntry::new("deep-dive", "Deep dive", 4)]
        );
    }

    #[test]
    fn heading_text_decodes_entities() {
        assert_eq!(heading_text("Fish &amp; Chips"), "Fish & Chips");
    }

    #[test]
    fn declared_heading_needs_valid_level() {
        let declared = section("a", "faq", 1, json!({ "title": "Questions", "headingLevel": 3 }));
        assert_eq!(
            declared_heading(&declared),
            Some(TocEntry::new("questions", "Questions", 3))
        );
        let no_level = section("b", "faq", 1, json!({ "title": "Questions" }));
        assert_eq!(declared_heading(&no_level), None);
        let bad_level = section("c", "faq", 1, json!({ "title": "Q", "headingLevel": 1 }));
        assert_eq!(declared_heading(&bad_level), None);
    }

    #[test]
    fn extract_headings_skips_inactive_and_orders_by_position() {
        let mut hidden = section("h", "html-content", 0, json!({ "content": "<h2>Hidden</h2>" }));
        hidden.is_active = false;
        let sections = vec![
            section("b", "html-content", 2, json!({ "content": "<h2>Second</h2>" })),
            section("a", "html-content", 1, json!({ "html": "<h2>First</h2>" })),
            hidden,
        ];
        let titles: Vec<String> = extract_headings(&sections)
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn extract_headings_is_idempotent() {
        let sections = vec![section(
            "a",
            "html-content",
            1,
            json!({ "title": "Intro", "headingLevel": 2, "content": "<h2>Intro</h2><h2>Intro</h2>" }),
        )];
        let first = extract_headings(&sections);
        assert_eq!(first, vec![TocEntry::new("intro", "Intro", 2)]);
        assert_eq!(extract_headings(&sections), first);
    }

    #[test]
    fn merge_keeps_shared_entry_once_in_first_seen_order() {
        let shared = TocEntry::new("tips", "Tips", 2);
        let declared = vec![TocEntry::new("intro", "Intro", 2), shared.clone()];
        let discovered = vec![shared.clone(), TocEntry::new("faq", "FAQ", 2)];
        let merged = merge_headings(&declared, &discovered);
        assert_eq!(
            merged,
            vec![
                TocEntry::new("intro", "Intro", 2),
                shared,
                TocEntry::new("faq", "FAQ", 2),
            ]
        );
    }

    #[test]
    fn merge_keeps_entries_differing_in_level() {
        let merged = merge_headings(
            &[TocEntry::new("tips", "Tips", 2)],
            &[TocEntry::new("tips", "Tips", 3)],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn assigns_disambiguated_ids_and_writes_back() {
        let doc = MarkupDocument::new("<h2>Tips</h2><h2>Tips</h2><h3 id=\"keep\">Tips</h3><h2>Tips</h2>");
        let entries = assign_heading_ids(&doc);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["tips", "tips-1", "keep", "tips-2"]);
        let html = doc.html();
        assert!(html.contains(r#"<h2 id="tips">Tips</h2>"#));
        assert!(html.contains(r#"<h2 id="tips-1">Tips</h2>"#));
        assert!(html.contains(r#"<h2 id="tips-2">Tips</h2>"#));
    }

    #[test]
    fn reassigning_is_a_no_op() {
        let doc = MarkupDocument::new("<h2 class=\"a\">One</h2><h3>Two</h3>");
        let first = assign_heading_ids(&doc);
        let html = doc.html();
        let second = assign_heading_ids(&doc);
        assert_eq!(first, second);
        assert_eq!(doc.html(), html);
        assert!(html.contains(r#"<h2 id="one" class="a">One</h2>"#));
    }

    #[test]
    fn set_id_replaces_existing_id() {
        let doc = MarkupDocument::new("<h2 class='x' id='old'>One</h2>");
        doc.set_id(0, "new");
        assert_eq!(doc.scan()[0].id.as_deref(), Some("new"));
        assert!(doc.html().contains("class='x'"));
    }

    #[test]
    fn observer_tracks_mounted_content() {
        let doc = Rc::new(MarkupDocument::new("<h2>Intro</h2>"));
        let declared = vec![TocEntry::new("overview", "Overview", 2)];
        let observer = TocObserver::observe(&doc, declared);
        assert_eq!(
            observer.entries(),
            vec![
                TocEntry::new("overview", "Overview", 2),
                TocEntry::new("intro", "Intro", 2),
            ]
        );

        doc.mount("<section><h3>Late Arrival</h3></section>");
        let ids: Vec<String> = observer.entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["overview", "intro", "late-arrival"]);
    }

    #[test]
    fn observer_converges_after_its_own_writes() {
        let doc = Rc::new(MarkupDocument::new(""));
        let observer = TocObserver::observe(&doc, Vec::new());
        assert_eq!(observer.passes(), 1);

        doc.mount("<h2>A</h2><h2>B</h2><h2>C</h2>");
        // One pass for the mount, one more to confirm nothing is left to write.
        assert_eq!(observer.passes(), 3);
        assert_eq!(observer.entries().len(), 3);

        doc.mount("<p>no headings</p>");
        assert_eq!(observer.passes(), 4);
    }

    #[test]
    fn symbol_only_heading_gets_fallback_id() {
        assert_eq!(anchor_id("🌴🌴"), "heading");
        assert_eq!(anchor_id("Best Time"), "best-time");
        assert_eq!(
            extract_html_headings("<h2>🌴🌴</h2>"),
            vec![TocEntry::new("heading", "🌴🌴", 2)]
        );

        let doc = MarkupDocument::new("<h2>🌴🌴</h2><h2>!!!</h2>");
        let ids: Vec<String> = assign_heading_ids(&doc).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["heading", "heading-1"]);
        assert!(!doc.html().contains(r#"id="""#));
    }

    #[test]
    fn observer_converges_on_symbol_only_heading() {
        let doc = Rc::new(MarkupDocument::new(""));
        let observer = TocObserver::observe(&doc, Vec::new());
        doc.mount("<h2>🌴🌴</h2>");
        assert_eq!(observer.passes(), 3);
        assert_eq!(observer.entries(), vec![TocEntry::new("heading", "🌴🌴", 2)]);
        assert!(doc.html().contains(r#"<h2 id="heading">"#));
    }

    #[test]
    fn set_id_with_current_value_does_not_notify() {
        let doc = MarkupDocument::new(r#"<h2 id="tips">Tips</h2>"#);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _subscription = doc.on_change(Rc::new(move || counter.set(counter.get() + 1)));
        doc.set_id(0, "tips");
        assert_eq!(calls.get(), 0);
        doc.set_id(0, "other");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn generated_ids_skip_ids_already_in_the_document() {
        let doc = MarkupDocument::new(r#"<h2>Tips</h2><h2 id="tips">Tips</h2><h3 id="tips-1">More</h3>"#);
        let ids: Vec<String> = assign_heading_ids(&doc).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["tips-2", "tips", "tips-1"]);
        assert_eq!(doc.html().matches(r#"id="tips""#).count(), 1);
    }

    #[test]
    fn dropping_observer_unsubscribes() {
        let doc = Rc::new(MarkupDocument::new("<h2>A</h2>"));
        {
            let _observer = TocObserver::observe(&doc, Vec::new());
            assert_eq!(doc.listener_count(), 1);
        }
        assert_eq!(doc.listener_count(), 0);
        doc.mount("<h2>B</h2>");
        assert!(doc.scan()[1].id.is_none());
    }

    #[test]
    fn cancel_unsubscribes_early() {
        let doc = MarkupDocument::new("");
        let subscription = doc.on_change(Rc::new(|| {}));
        assert_eq!(doc.listener_count(), 1);
        subscription.cancel();
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn empty_toc_renders_nothing() {
        assert_eq!(render_toc(&[], "en").into_string(), "");
    }

    #[test]
    fn toc_renders_anchor_links() {
        let html = render_toc(&[TocEntry::new("tips", "Tips & Tricks", 3)], "es").into_string();
        assert!(html.contains(r##"href="#tips""##));
        assert!(html.contains("toc-level-3"));
        assert!(html.contains("Tips &amp; Tricks"));
        assert!(html.contains("En este artículo"));
        assert!(!html.contains("<h"));
    }
}
