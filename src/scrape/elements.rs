use crate::records::ElementRecord;
use scraper::ElementRef;

/// Visible text of an element with whitespace runs collapsed to single spaces
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert matched elements into flat records, preserving input order
pub fn extract(elements: &[ElementRef<'_>]) -> Vec<ElementRecord> {
    elements
        .iter()
        .map(|element| ElementRecord {
            text: element_text(*element),
            html: element.html(),
            attrs: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
        .collect()
}
