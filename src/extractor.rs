use crate::models::MetaTags;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

// Cached selectors to avoid repeated parsing and eliminate unwrap() calls
static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta").expect("meta selector should be valid"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static CANONICAL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("link[rel='canonical']").expect("canonical selector should be valid")
});

/// Synthetic key holding the `<title>` fallback
pub const TITLE_KEY: &str = "title";
/// Synthetic key holding the canonical link href
pub const CANONICAL_KEY: &str = "canonical";

/// Extracts preview-relevant metadata from an HTML document.
///
/// Parsing is lenient: malformed markup never fails, missing elements simply
/// leave their keys absent.
pub fn extract_meta(html: &str) -> MetaTags {
    let document = Html::parse_document(html);
    let mut meta = MetaTags::new();

    for element in document.select(&META_SELECTOR) {
        let attrs = element.value();
        let property = attrs
            .attr("property")
            .filter(|p| !p.is_empty())
            .or_else(|| attrs.attr("name"));

        let (Some(property), Some(content)) = (property, attrs.attr("content")) else {
            continue;
        };
        if property.is_empty() || content.is_empty() {
            continue;
        }

        let key = property.to_lowercase();
        if key.starts_with("og:") || key.starts_with("twitter:") {
            meta.insert(key, content.trim().to_string());
        }
    }

    if let Some(title) = extract_title(&document)
        && !meta.get("og:title").is_some_and(|og_title| !og_title.is_empty())
    {
        meta.insert(TITLE_KEY.to_string(), title);
    }

    if let Some(canonical) = extract_canonical(&document) {
        meta.insert(CANONICAL_KEY.to_string(), canonical);
    }

    meta
}

fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

fn extract_canonical(document: &Html) -> Option<String> {
    document
        .select(&CANONICAL_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(|href| href.to_string())
}
