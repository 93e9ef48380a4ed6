//! # Waypage
//!
//! Template resolution and page composition for travel-blog posts. A post is
//! stored as an ordered list of sections; each section names a template id and
//! carries a free-form JSON payload. Waypage turns that list into one page of
//! HTML with a consistent layout and an in-page table of contents.
//!
//! # Architecture: One Pass Per Snapshot
//!
//! ```text
//! sections ─► registry    template id → section kind (versioned alias tables)
//!          ─► layout      html or legacy, decided once from every section
//!          ─► render      per section: filter, dispatch, isolate failures
//!          ─► toc         anchor ids on rendered headings, merged TOC
//!          ─► compose     heroes + one container (or one panel)
//! ```
//!
//! Every step is a pure function of the section snapshot, the post context,
//! and the config. A new section list means a full recompute; nothing is
//! patched incrementally.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | `SectionKind`, alias tables, and the merged `TemplateRegistry` |
//! | [`filter`] | Placeholder-content predicates for FAQ and starter pack sections |
//! | [`layout`] | Page-level layout classification |
//! | [`toc`] | Slugs, static heading extraction, the heading host port and TOC observer |
//! | [`render`] | Per-section dispatch and the per-kind Maud renderers |
//! | [`compose`] | Full-page composition and the standalone document shell |
//! | [`payload`] | Typed, defaulting views of section payloads |
//! | [`diagnostics`] | Diagnostic events and sinks (`tracing`, collecting, null) |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`input`] | JSON loading of section lists and post context for the CLI |
//! | [`types`] | Shared types: `Section`, `PostContext`, `RenderContext`, `TocEntry` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Versioned Alias Tables
//!
//! Template ids have been UUIDs, short aliases and duplicates of each other,
//! and a few were reassigned between editor versions. Instead of one flat map
//! that pretends ids are unique, the registry is built by merging ordered
//! tables (`legacy-v1`, `v2`, `current`, then config aliases) with later tables
//! winning. Precedence is explicit and testable.
//!
//! ## Closed Dispatch
//!
//! Section kinds are an enum, and dispatch is an exhaustive `match`. Adding a
//! kind without a renderer is a build error. Config aliases may still name a
//! component this build does not know; those resolve to
//! [`registry::ComponentKind::Unsupported`] and are handled like unresolved
//! templates.
//!
//! ## Failures Stay in Their Slot
//!
//! A renderer returns `Result<Markup, RenderError>`, and a panic is caught and
//! turned into one. An error becomes a muted "content unavailable" notice in
//! that section's slot; the rest of the page renders. End users never see payloads or error details. Development mode
//! shows template ids, payload dumps and error messages inline.
//!
//! ## Diagnostics Are Injected
//!
//! The core never logs. It reports [`diagnostics::Diagnostic`] events to a
//! caller-supplied sink, so the CLI routes them to `tracing`, tests collect
//! them, and embedders may drop them.
//!
//! ## Headings Through a Port
//!
//! Giving headings anchor ids is a write into mounted output. The TOC logic
//! depends only on the [`toc::HeadingHost`] trait; [`toc::MarkupDocument`] is
//! the in-memory adapter used during composition and by callers that mount
//! content later.

pub mod compose;
pub mod config;
pub mod diagnostics;
pub mod filter;
pub mod input;
pub mod layout;
pub mod output;
pub mod payload;
pub mod registry;
pub mod render;
pub mod toc;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
