//! Presentational renderers, one per section kind.
//!
//! Each takes the typed payload and the render context. Missing fields were
//! already defaulted by [`crate::payload`]; a renderer only fails on data it
//! cannot present honestly (a table row wider than its header, a negative
//! budget line).

use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};

use super::RenderError;
use super::labels::labels;
use crate::payload::{
    ActivitiesPayload, AuthorBioPayload, BudgetTimelinePayload, ComparisonTablePayload,
    ContentFormat, FaqPayload, HeroHtmlPayload, HeroPayload, HotelCarouselPayload,
    HtmlContentPayload, ReasonsPayload, StarterPackPayload, TipBoxesPayload,
};
use crate::toc::anchor_id;
use crate::types::RenderContext;

/// Section title as an anchored heading of the given level (2–6).
pub fn title_heading(title: &str, level: u8) -> Markup {
    let title = title.trim();
    if title.is_empty() {
        return html! {};
    }
    let id = anchor_id(title);
    match level {
        3 => html! { h3.section-title id=(id) { (title) } },
        4 => html! { h4.section-title id=(id) { (title) } },
        5 => html! { h5.section-title id=(id) { (title) } },
        6 => html! { h6.section-title id=(id) { (title) } },
        _ => html! { h2.section-title id=(id) { (title) } },
    }
}

fn non_empty(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

pub fn hero(payload: &HeroPayload, ctx: &RenderContext) -> Markup {
    let title = non_empty(&payload.title).unwrap_or(&ctx.post.title);
    let alt = non_empty(&payload.image_alt).unwrap_or(title);
    html! {
        section.hero {
            @if let Some(src) = payload.image_url.as_deref().and_then(non_empty) {
                img.hero-image src=(src) alt=(alt);
            }
            div.hero-inner {
                @if let Some(location) = non_empty(&payload.location) {
                    span.hero-location { (location) }
                }
                h1.hero-title { (title) }
                @if let Some(subtitle) = non_empty(&payload.subtitle) {
                    p.hero-subtitle { (subtitle) }
                }
            }
        }
    }
}

pub fn hero_html(payload: &HeroHtmlPayload, ctx: &RenderContext) -> Markup {
    let title = non_empty(&payload.title).unwrap_or(&ctx.post.title);
    let style = payload
        .background_image
        .as_deref()
        .and_then(non_empty)
        .map(|url| format!("background-image: url('{}');", url.replace('\'', "%27")));
    html! {
        section.hero.hero-html style=[style] {
            div.hero-inner {
                h1.hero-title { (title) }
                @if let Some(subtitle) = non_empty(&payload.subtitle) {
                    p.hero-subtitle { (subtitle) }
                }
                @if let Some(body) = non_empty(&payload.html) {
                    div.hero-body { (PreEscaped(body)) }
                }
            }
        }
    }
}

/// Falls back to the post author when the payload names nobody.
pub fn author_bio(payload: &AuthorBioPayload, ctx: &RenderContext, level: u8) -> Markup {
    let author = ctx.post.author.as_ref();
    let name = non_empty(&payload.name).or_else(|| author.and_then(|a| non_empty(&a.name)));
    let Some(name) = name else {
        return html! {};
    };
    let bio = non_empty(&payload.bio).or_else(|| author.and_then(|a| a.bio.as_deref()).and_then(non_empty));
    let avatar = payload
        .avatar_url
        .as_deref()
        .or_else(|| author.and_then(|a| a.avatar_url.as_deref()))
        .and_then(non_empty);
    let title = non_empty(&payload.title).unwrap_or(labels(&ctx.language).about_author);
    html! {
        section.author-bio {
            (title_heading(title, level))
            div.author-card {
                @if let Some(src) = avatar {
                    img.author-avatar src=(src) alt=(name) loading="lazy";
                }
                div.author-text {
                    p.author-name { (name) }
                    @if let Some(bio) = bio {
                        p.author-description { (bio) }
                    }
                    @if !payload.links.is_empty() {
                        ul.author-links {
                            @for link in payload.links.iter().filter(|l| !l.url.trim().is_empty()) {
                                li { a href=(link.url) rel="noopener" { (non_empty(&link.label).unwrap_or(&link.url)) } }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn faq(payload: &FaqPayload, level: u8) -> Markup {
    html! {
        section.faq {
            (title_heading(&payload.title, level))
            div.faq-list {
                @for entry in payload.faqs.iter().filter(|f| !f.question.trim().is_empty()) {
                    details.faq-item {
                        summary.faq-question { (entry.question.trim()) }
                        div.faq-answer { p { (entry.answer.trim()) } }
                    }
                }
            }
        }
    }
}

pub fn hotel_carousel(payload: &HotelCarouselPayload, ctx: &RenderContext, level: u8) -> Markup {
    let hotels: Vec<_> = payload
        .hotels
        .iter()
        .filter(|h| !h.name.trim().is_empty())
        .collect();
    if hotels.is_empty() {
        return html! {};
    }
    let book = labels(&ctx.language).book;
    html! {
        section.hotel-carousel {
            (title_heading(&payload.title, level))
            ul.hotel-track {
                @for hotel in hotels {
                    li.hotel-card {
                        @if let Some(src) = hotel.image_url.as_deref().and_then(non_empty) {
                            img.hotel-image src=(src) alt=(hotel.name) loading="lazy";
                        }
                        p.hotel-name { strong { (hotel.name) } }
                        @if let Some(location) = non_empty(&hotel.location) {
                            p.hotel-location { (location) }
                        }
                        @if let Some(rating) = hotel.rating.filter(|r| r.is_finite() && *r > 0.0) {
                            p.hotel-rating { "★ " (format!("{rating:.1}")) }
                        }
                        @if let Some(description) = non_empty(&hotel.description) {
                            p.hotel-description { (description) }
                        }
                        @if let Some(price) = non_empty(&hotel.price) {
                            p.hotel-price { (price) }
                        }
                        @if let Some(url) = hotel.booking_url.as_deref().and_then(non_empty) {
                            a.hotel-book href=(url) target="_blank" rel="sponsored noopener" { (book) }
                        }
                    }
                }
            }
        }
    }
}

pub fn starter_pack(payload: &StarterPackPayload, level: u8) -> Markup {
    html! {
        section.starter-pack {
            (title_heading(&payload.title, level))
            @if let Some(description) = non_empty(&payload.description) {
                p.starter-pack-description { (description) }
            }
            @if !payload.highlights.is_empty() {
                dl.starter-pack-highlights {
                    @for highlight in &payload.highlights {
                        div.highlight {
                            dt.highlight-title { (highlight.title) }
                            dd.highlight-value { (highlight.value) }
                            @if let Some(description) = non_empty(&highlight.description) {
                                dd.highlight-description { (description) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn activities(payload: &ActivitiesPayload, ctx: &RenderContext, level: u8) -> Markup {
    let activities: Vec<_> = payload
        .activities
        .iter()
        .filter(|a| !a.name.trim().is_empty())
        .collect();
    if activities.is_empty() {
        return html! {};
    }
    let duration_label = labels(&ctx.language).duration;
    html! {
        section.activities {
            (title_heading(&payload.title, level))
            ol.activity-list {
                @for activity in activities {
                    li.activity {
                        p.activity-name { strong { (activity.name) } }
                        @if let Some(description) = non_empty(&activity.description) {
                            p.activity-description { (description) }
                        }
                        @if let Some(duration) = non_empty(&activity.duration) {
                            span.activity-duration { (duration_label) ": " (duration) }
                        }
                        @if let Some(price) = non_empty(&activity.price) {
                            span.activity-price { (price) }
                        }
                    }
                }
            }
        }
    }
}

/// "Why choose" and "why different" blocks share a shape; `class` tells them
/// apart.
pub fn reasons(payload: &ReasonsPayload, class: &str, level: u8) -> Markup {
    html! {
        section class=(class) {
            (title_heading(&payload.title, level))
            @if let Some(intro) = non_empty(&payload.intro) {
                p.reasons-intro { (intro) }
            }
            ul.reasons {
                @for reason in payload.reasons.iter().filter(|r| !r.title.trim().is_empty() || !r.description.trim().is_empty()) {
                    li.reason {
                        @if let Some(title) = non_empty(&reason.title) {
                            strong.reason-title { (title) }
                        }
                        @if let Some(description) = non_empty(&reason.description) {
                            p.reason-description { (description) }
                        }
                    }
                }
            }
        }
    }
}

pub fn comparison_table(payload: &ComparisonTablePayload, level: u8) -> Result<Markup, RenderError> {
    let columns = payload
        .headers
        .len()
        .max(payload.rows.iter().map(Vec::len).max().unwrap_or(0));
    if !payload.headers.is_empty() {
        if let Some((index, row)) = payload
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() > payload.headers.len())
        {
            return Err(RenderError::Invalid(format!(
                "comparison row {} has {} cells but the table has {} columns",
                index + 1,
                row.len(),
                payload.headers.len()
            )));
        }
    }
    Ok(html! {
        section.comparison-table {
            (title_heading(&payload.title, level))
            div.table-scroll {
                table {
                    @if !payload.headers.is_empty() {
                        thead { tr { @for header in &payload.headers { th scope="col" { (header) } } } }
                    }
                    tbody {
                        @for row in &payload.rows {
                            tr {
                                @for i in 0..columns {
                                    td { (row.get(i).map(String::as_str).unwrap_or("")) }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

fn tip_variant(variant: &str) -> &'static str {
    match variant.trim().to_ascii_lowercase().as_str() {
        "warning" => "tip-warning",
        "success" => "tip-success",
        _ => "tip-info",
    }
}

pub fn tip_boxes(payload: &TipBoxesPayload, level: u8) -> Markup {
    html! {
        section.tip-boxes {
            (title_heading(&payload.title, level))
            div.tip-grid {
                @for tip in payload.tips.iter().filter(|t| !t.content.trim().is_empty() || !t.title.trim().is_empty()) {
                    aside class={ "tip " (tip_variant(&tip.variant)) } {
                        @if let Some(title) = non_empty(&tip.title) {
                            p.tip-title { strong { (title) } }
                        }
                        @if let Some(content) = non_empty(&tip.content) {
                            p.tip-content { (content) }
                        }
                    }
                }
            }
        }
    }
}

/// Whole amounts without decimals, anything else with two.
pub fn format_amount(currency: &str, amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{currency}{amount:.0}")
    } else {
        format!("{currency}{amount:.2}")
    }
}

pub fn budget_timeline(
    payload: &BudgetTimelinePayload,
    ctx: &RenderContext,
    level: u8,
) -> Result<Markup, RenderError> {
    if let Some(item) = payload
        .items
        .iter()
        .find(|i| !i.amount.is_finite() || i.amount < 0.0)
    {
        return Err(RenderError::Invalid(format!(
            "budget item '{}' has amount {}",
            item.label, item.amount
        )));
    }
    let total: f64 = payload.items.iter().map(|i| i.amount).sum();
    let currency = payload.currency.trim();
    Ok(html! {
        section.budget-timeline {
            (title_heading(&payload.title, level))
            ol.budget-steps {
                @for item in &payload.items {
                    li.budget-step {
                        span.budget-label { (item.label) }
                        span.budget-amount { (format_amount(currency, item.amount)) }
                        @if let Some(note) = non_empty(&item.note) {
                            p.budget-note { (note) }
                        }
                    }
                }
            }
            @if !payload.items.is_empty() {
                p.budget-total {
                    (labels(&ctx.language).total) ": "
                    strong { (format_amount(currency, total)) }
                }
            }
        }
    })
}

pub fn html_content(payload: &HtmlContentPayload, level: u8) -> Markup {
    let source = payload.body();
    let body = match payload.format {
        ContentFormat::Html => source.to_string(),
        ContentFormat::Markdown => {
            let mut out = String::new();
            md_html::push_html(&mut out, Parser::new_ext(source, Options::ENABLE_TABLES));
            out
        }
    };
    html! {
        section.html-content {
            (title_heading(&payload.title, level))
            div.prose { (PreEscaped(body)) }
        }
    }
}
