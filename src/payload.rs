//! Typed views of section payloads.
//!
//! Every struct defaults every field, so a payload missing `faqs`, `hotels`,
//! `activities`, etc. parses to empty lists instead of failing. Explicit JSON
//! `null`s are treated as missing. A field of the wrong JSON type is still an
//! error; the renderer turns it into a section-scoped notice.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a merged section payload into its typed view.
pub fn parse<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(strip_nulls(value.clone()))
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroPayload {
    pub title: String,
    pub subtitle: String,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroHtmlPayload {
    pub title: String,
    pub subtitle: String,
    pub background_image: Option<String>,
    pub html: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorBioPayload {
    pub title: String,
    pub name: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqPayload {
    pub title: String,
    pub faqs: Vec<FaqEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HotelCarouselPayload {
    pub title: String,
    pub hotels: Vec<Hotel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    pub location: String,
    pub description: String,
    pub price: String,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub booking_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StarterPackPayload {
    pub title: String,
    pub description: String,
    #[serde(alias = "items")]
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub title: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivitiesPayload {
    pub title: String,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub duration: String,
    pub price: String,
}

/// Shared by the "why choose" and "why different" blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReasonsPayload {
    pub title: String,
    pub intro: String,
    #[serde(alias = "points")]
    pub reasons: Vec<Reason>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Reason {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparisonTablePayload {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TipBoxesPayload {
    pub title: String,
    pub tips: Vec<Tip>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tip {
    pub title: String,
    pub content: String,
    /// `"info"`, `"warning"` or `"success"`; anything else renders as info.
    pub variant: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetTimelinePayload {
    pub title: String,
    pub currency: String,
    pub items: Vec<BudgetItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BudgetItem {
    pub label: String,
    pub amount: f64,
    pub note: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Html,
    Markdown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlContentPayload {
    pub title: String,
    pub content: String,
    /// Older editor field, used when `content` is empty.
    pub html: String,
    pub format: ContentFormat,
}

impl HtmlContentPayload {
    /// The body source: `content`, else `html`.
    pub fn body(&self) -> &str {
        if self.content.trim().is_empty() {
            &self.html
        } else {
            &self.content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_lists_default_to_empty() {
        let faq: FaqPayload = parse(&json!({})).unwrap();
        assert!(faq.faqs.is_empty());
        let hotels: HotelCarouselPayload = parse(&json!({ "title": "Stay" })).unwrap();
        assert!(hotels.hotels.is_empty());
        assert_eq!(hotels.title, "Stay");
    }

    #[test]
    fn nulls_are_treated_as_missing() {
        let hero: HeroPayload =
            parse(&json!({ "title": "Lisbon", "subtitle": null, "imageUrl": null })).unwrap();
        assert_eq!(hero.subtitle, "");
        assert!(hero.image_url.is_none());
    }

    #[test]
    fn nested_nulls_are_stripped() {
        let faq: FaqPayload =
            parse(&json!({ "faqs": [{ "question": "Where?", "answer": null }] })).unwrap();
        assert_eq!(faq.faqs[0].answer, "");
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(parse::<HotelCarouselPayload>(&json!({ "hotels": "none" })).is_err());
    }

    #[test]
    fn starter_pack_accepts_items_alias() {
        let pack: StarterPackPayload =
            parse(&json!({ "items": [{ "title": "Budget", "value": "$", "description": "" }] }))
                .unwrap();
        assert_eq!(pack.highlights.len(), 1);
    }

    #[test]
    fn html_content_falls_back_to_html_field() {
        let content: HtmlContentPayload =
            parse(&json!({ "html": "<p>x</p>", "format": "markdown" })).unwrap();
        assert_eq!(content.body(), "<p>x</p>");
        assert_eq!(content.format, ContentFormat::Markdown);
    }

    #[test]
    fn html_content_with_both_fields_prefers_content() {
        let content: HtmlContentPayload =
            parse(&json!({ "content": "<p>new</p>", "html": "<p>old</p>" })).unwrap();
        assert_eq!(content.body(), "<p>new</p>");
    }

    #[test]
    fn html_content_ignores_out_of_range_heading_level() {
        let content: HtmlContentPayload =
            parse(&json!({ "content": "<p>x</p>", "headingLevel": 300 })).unwrap();
        assert_eq!(content.body(), "<p>x</p>");
    }
}
