use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// An image reference resolved to an absolute URL, still attached to the
/// element it came from so context can be harvested without re-walking the
/// tree
pub(crate) struct LocatedImage<'a> {
    pub url: Url,
    pub element: ElementRef<'a>,
}

/// Locate image references and resolve them against the base URL
///
/// With a selector, every `img` descendant of each matching node is gathered
/// in node order within selection order; without one the whole document is
/// scanned in document order. References lacking a `src` are skipped. The
/// result is deduplicated by URL preserving first occurrence, then truncated
/// to `limit` when positive.
pub(crate) fn locate<'a>(
    document: &'a Html,
    base_url: &Url,
    selector: Option<&str>,
    limit: usize,
) -> Vec<LocatedImage<'a>> {
    let img_selector = match Selector::parse("img") {
        Ok(compiled) => compiled,
        Err(_) => return Vec::new(),
    };

    let mut found = Vec::new();
    match selector {
        Some(scope_selector) if !scope_selector.is_empty() => {
            for scope in super::select(document, scope_selector, 0) {
                for img in scope.select(&img_selector) {
                    push_resolved(&mut found, img, base_url);
                }
            }
        }
        _ => {
            for img in document.select(&img_selector) {
                push_resolved(&mut found, img, base_url);
            }
        }
    }

    // Deduplicate by resolved URL, keeping the first occurrence
    let mut seen = HashSet::new();
    let mut unique: Vec<LocatedImage<'a>> = Vec::new();
    for image in found {
        if seen.insert(image.url.to_string()) {
            unique.push(image);
        }
    }

    if limit > 0 {
        unique.truncate(limit);
    }
    unique
}

/// Public form of [`locate`]: the absolute URLs only
pub fn locate_urls(
    document: &Html,
    base_url: &Url,
    selector: Option<&str>,
    limit: usize,
) -> Vec<String> {
    locate(document, base_url, selector, limit)
        .into_iter()
        .map(|image| image.url.to_string())
        .collect()
}

fn push_resolved<'a>(out: &mut Vec<LocatedImage<'a>>, img: ElementRef<'a>, base_url: &Url) {
    let Some(src) = img.value().attr("src") else {
        return;
    };

    match base_url.join(src) {
        Ok(url) => out.push(LocatedImage { url, element: img }),
        Err(e) => {
            ::log::debug!("skipping unresolvable image source {:?}: {}", src, e);
        }
    }
}
