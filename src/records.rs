use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single element matched by the caller's selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Visible text with whitespace runs collapsed to single spaces
    pub text: String,

    /// Serialized markup of the element, including the element itself
    pub html: String,

    /// Attribute name/value pairs, ordered by name for stable export columns
    pub attrs: BTreeMap<String, String>,
}

/// One located image together with the context harvested around it
///
/// Every contextual field defaults to the empty string when the corresponding
/// relationship does not exist, so all records of a run share one field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// 1-based position among the located images
    pub index: usize,

    /// Absolute URL, resolved against the page URL
    pub image_url: String,

    /// Basename of the URL path, or `image_<index>.jpg` when the path has none
    pub filename: String,

    /// The element's `alt` attribute
    pub alt: String,

    /// The element's `title` attribute
    pub title: String,

    /// Caption text of the nearest enclosing `figure`, if any
    pub caption: String,

    /// Visible text of the immediate parent element
    pub parent_text: String,

    /// Visible text of the nearest preceding sibling element
    pub prev_sibling_text: String,

    /// Visible text of the nearest following sibling element
    pub next_sibling_text: String,

    /// Visible text of the nearest enclosing block-level container
    pub container_text: String,

    /// Text recognized inside the image pixels, when recognition ran
    pub ocr_text: String,
}

/// Everything one extraction run produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Records for the elements matching the selector
    pub elements: Vec<ElementRecord>,

    /// Records for the located images (empty unless image scraping was requested)
    pub images: Vec<ImageRecord>,
}

/// A downloaded file destined for one archive entry
#[derive(Debug, Clone)]
pub struct NamedBlob {
    /// Entry name inside the archive
    pub filename: String,

    /// Raw file bytes
    pub data: Vec<u8>,
}

/// Row view consumed by the tabular exporters
///
/// Keys must be identical for every record of a collection; the CSV header is
/// taken from the first record.
pub trait Rowable {
    /// Column names, in output order
    fn keys(&self) -> Vec<&'static str>;

    /// Cell values matching `keys`, one string per column
    fn values(&self) -> Vec<String>;
}

impl Rowable for ElementRecord {
    fn keys(&self) -> Vec<&'static str> {
        vec!["text", "html", "attrs"]
    }

    fn values(&self) -> Vec<String> {
        // The attribute map flattens to a single JSON cell
        let attrs = serde_json::to_string(&self.attrs).unwrap_or_default();
        vec![self.text.clone(), self.html.clone(), attrs]
    }
}

impl Rowable for ImageRecord {
    fn keys(&self) -> Vec<&'static str> {
        vec![
            "index",
            "image_url",
            "filename",
            "alt",
            "title",
            "caption",
            "parent_text",
            "prev_sibling_text",
            "next_sibling_text",
            "container_text",
            "ocr_text",
        ]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.image_url.clone(),
            self.filename.clone(),
            self.alt.clone(),
            self.title.clone(),
            self.caption.clone(),
            self.parent_text.clone(),
            self.prev_sibling_text.clone(),
            self.next_sibling_text.clone(),
            self.container_text.clone(),
            self.ocr_text.clone(),
        ]
    }
}
