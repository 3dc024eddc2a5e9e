pub mod ocr;

use crate::client::HttpClient;
use crate::records::ImageRecord;
use crate::scrape::elements::element_text;
use crate::scrape::images;
use crate::utils;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Tags that count as a block-level container for context purposes
const CONTAINER_TAGS: [&str; 5] = ["div", "article", "section", "p", "main"];

/// Locate images and harvest the page context around each one
///
/// Purely synchronous; `ocr_text` is left empty for every record. Use
/// [`recognize_batch`] or [`enrich`] to fill it in.
pub fn harvest(
    document: &Html,
    base_url: &Url,
    selector: Option<&str>,
    limit: usize,
) -> Vec<ImageRecord> {
    let located = images::locate(document, base_url, selector, limit);
    let mut records = Vec::with_capacity(located.len());

    for (position, image) in located.into_iter().enumerate() {
        let index = position + 1;
        let context = harvest_context(image.element);

        records.push(ImageRecord {
            index,
            filename: utils::filename_from_url(&image.url, index),
            image_url: image.url.to_string(),
            alt: context.alt,
            title: context.title,
            caption: context.caption,
            parent_text: context.parent_text,
            prev_sibling_text: context.prev_sibling_text,
            next_sibling_text: context.next_sibling_text,
            container_text: context.container_text,
            ocr_text: String::new(),
        });
    }

    records
}

/// Fill each record's `ocr_text` by fetching and recognizing its image
///
/// The recognition capability is probed once for the whole batch; when it is
/// unavailable every record is left untouched. A fetch, decode, or
/// recognition failure affects only that one record.
pub async fn recognize_batch(http: &HttpClient, records: &mut [ImageRecord]) {
    let Some(recognizer) = ocr::Recognizer::probe() else {
        return;
    };

    for record in records.iter_mut() {
        let Some(data) = http.fetch_bytes(&record.image_url).await else {
            continue;
        };
        if let Some(text) = recognizer.recognize(&data).await {
            record.ocr_text = text;
        }
    }
}

/// Locate, harvest, and optionally recognize in one call
pub async fn enrich(
    http: &HttpClient,
    document: &Html,
    base_url: &Url,
    selector: Option<&str>,
    limit: usize,
    use_recognition: bool,
) -> Vec<ImageRecord> {
    let mut records = harvest(document, base_url, selector, limit);
    if use_recognition && !records.is_empty() {
        recognize_batch(http, &mut records).await;
    }
    records
}

/// Context harvested from the tree relationships of one image element
#[derive(Default)]
struct ImageContext {
    alt: String,
    title: String,
    caption: String,
    parent_text: String,
    prev_sibling_text: String,
    next_sibling_text: String,
    container_text: String,
}

/// Walk an image element's relationships and collect nearby text
///
/// Every relationship that does not exist yields an empty string.
fn harvest_context(element: ElementRef<'_>) -> ImageContext {
    let alt = element.value().attr("alt").unwrap_or_default().to_string();
    let title = element.value().attr("title").unwrap_or_default().to_string();

    let parent_text = element
        .parent()
        .and_then(ElementRef::wrap)
        .map(element_text)
        .unwrap_or_default();

    // Nearest sibling *elements*; bare text siblings are covered by the parent
    let prev_sibling_text = element
        .prev_siblings()
        .find_map(ElementRef::wrap)
        .map(element_text)
        .unwrap_or_default();
    let next_sibling_text = element
        .next_siblings()
        .find_map(ElementRef::wrap)
        .map(element_text)
        .unwrap_or_default();

    let caption = enclosing_figure_caption(element).unwrap_or_default();

    let container_text = element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| CONTAINER_TAGS.contains(&ancestor.value().name()))
        .map(element_text)
        .unwrap_or_default();

    ImageContext {
        alt,
        title,
        caption,
        parent_text,
        prev_sibling_text,
        next_sibling_text,
        container_text,
    }
}

/// Caption text of the nearest enclosing `figure`, if both exist
fn enclosing_figure_caption(element: ElementRef<'_>) -> Option<String> {
    let figure = element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "figure")?;

    let caption_selector = Selector::parse("figcaption").ok()?;
    figure.select(&caption_selector).next().map(element_text)
}
