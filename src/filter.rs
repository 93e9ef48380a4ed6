//! Generic-content filters.
//!
//! New sections are created from templates that ship with placeholder
//! content. These predicates decide whether a payload is still that untouched
//! boilerplate and must stay hidden. They are conservative: any sign of
//! editing, even one custom entry among placeholders, keeps the section
//! visible.

use crate::config::{FilterConfig, PlaceholderHighlight};
use crate::payload::{FaqEntry, Highlight, StarterPackPayload};
use crate::registry::SectionKind;

/// Kinds that are never rendered, whatever their payload.
///
/// Related articles were retired without deleting historical rows.
pub fn is_suppressed_kind(kind: SectionKind) -> bool {
    matches!(kind, SectionKind::RelatedArticles)
}

/// True if an FAQ list is placeholder content and should be hidden.
///
/// Hidden when the list is empty, when every entry is a known placeholder, or
/// when every entry has both a very short question and a very short answer.
pub fn is_generic_faq_content(faqs: &[FaqEntry], config: &FilterConfig) -> bool {
    if faqs.is_empty() {
        return true;
    }
    let all_placeholders = faqs.iter().all(|faq| is_placeholder_faq(faq, config));
    let all_trivial = faqs.iter().all(|faq| {
        faq.question.trim().chars().count() < config.faq_min_question_chars
            && faq.answer.trim().chars().count() < config.faq_min_answer_chars
    });
    all_placeholders || all_trivial
}

fn is_placeholder_faq(faq: &FaqEntry, config: &FilterConfig) -> bool {
    let question = faq.question.trim().to_lowercase();
    let answer = faq.answer.trim().to_lowercase();
    let question_matches = config
        .faq_placeholder_questions
        .iter()
        .any(|p| p.trim().to_lowercase() == question);
    let answer_matches = answer.is_empty()
        || config
            .faq_placeholder_answers
            .iter()
            .any(|p| answer.contains(&p.trim().to_lowercase()));
    question_matches && answer_matches
}

/// True if a starter pack is placeholder content and should be hidden.
///
/// Requires BOTH a boilerplate description AND a highlight list that is empty
/// or made only of the stock placeholder highlights.
pub fn is_generic_starter_pack_content(payload: &StarterPackPayload, config: &FilterConfig) -> bool {
    let description = payload.description.trim().to_lowercase();
    let generic_description = description.is_empty()
        || config
            .starter_pack_placeholder_descriptions
            .iter()
            .any(|p| description.contains(&p.trim().to_lowercase()));
    if !generic_description {
        return false;
    }
    payload.highlights.iter().all(|h| {
        config
            .starter_pack_placeholder_highlights
            .iter()
            .any(|p| highlight_matches(h, p))
    })
}

fn highlight_matches(highlight: &Highlight, placeholder: &PlaceholderHighlight) -> bool {
    eq_ignore_case(&highlight.title, &placeholder.title)
        && eq_ignore_case(&highlight.value, &placeholder.value)
        && eq_ignore_case(&highlight.description, &placeholder.description)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
