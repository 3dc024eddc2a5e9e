pub mod elements;
pub mod images;

#[cfg(test)]
mod tests;

use crate::client::HttpClient;
use crate::config::ScrapeConfig;
use crate::enrich;
use crate::records::{ElementRecord, ImageRecord, NamedBlob};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Parse raw HTML into a navigable tree
///
/// Parsing is lenient; malformed markup is recovered best-effort and never
/// produces a failure state.
pub fn parse(html: &str) -> Html {
    Html::parse_document(html)
}

/// Apply a CSS selector against a parsed document
///
/// Invalid selector syntax yields an empty result rather than an error. A
/// positive `limit` truncates to the first matches in document order; `0`
/// means unbounded.
pub fn select<'a>(document: &'a Html, selector: &str, limit: usize) -> Vec<ElementRef<'a>> {
    let compiled = match Selector::parse(selector) {
        Ok(compiled) => compiled,
        Err(_) => {
            ::log::debug!("invalid selector {:?}, returning no matches", selector);
            return Vec::new();
        }
    };

    let matches = document.select(&compiled);
    if limit > 0 {
        matches.take(limit).collect()
    } else {
        matches.collect()
    }
}

/// High-level scraping facade over the fetch client and the extraction steps
pub struct Scraper {
    http: HttpClient,
}

impl Scraper {
    /// Create a scraper with default configuration
    pub fn new() -> Self {
        Self::with_config(&ScrapeConfig::default())
    }

    /// Create a scraper with the given configuration
    pub fn with_config(config: &ScrapeConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// The underlying fetch client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch a page and parse it
    ///
    /// Returns `None` when the fetch permanently fails.
    pub async fn fetch_document(&self, url: &str) -> Option<Html> {
        let html = self.http.fetch_text(url).await?;
        Some(parse(&html))
    }

    /// Apply a selector against a document
    pub fn select<'a>(&self, document: &'a Html, selector: &str, limit: usize) -> Vec<ElementRef<'a>> {
        select(document, selector, limit)
    }

    /// Convert matched elements into flat records
    pub fn extract_elements(&self, matched: &[ElementRef<'_>]) -> Vec<ElementRecord> {
        elements::extract(matched)
    }

    /// Locate image URLs in a document, scoped to a selector when given
    pub fn locate_images(
        &self,
        document: &Html,
        base_url: &Url,
        selector: Option<&str>,
        limit: usize,
    ) -> Vec<String> {
        images::locate_urls(document, base_url, selector, limit)
    }

    /// Build enriched image records, optionally running recognition
    pub async fn enrich_images(
        &self,
        document: &Html,
        base_url: &Url,
        selector: Option<&str>,
        limit: usize,
        use_recognition: bool,
    ) -> Vec<ImageRecord> {
        enrich::enrich(&self.http, document, base_url, selector, limit, use_recognition).await
    }

    /// Download each record's image, one at a time, in record order
    ///
    /// Failed downloads are logged and skipped; the remaining blobs keep
    /// their order.
    pub async fn download_images(&self, records: &[ImageRecord]) -> Vec<NamedBlob> {
        let mut blobs = Vec::new();

        for record in records {
            match self.http.fetch_bytes(&record.image_url).await {
                Some(data) => blobs.push(NamedBlob {
                    filename: record.filename.clone(),
                    data,
                }),
                None => {
                    ::log::warn!("failed to download {}", record.image_url);
                }
            }
        }

        blobs
    }
}

impl Default for Scraper {
    fn default() -> Self {
        Self::new()
    }
}
