// Re-export modules
pub mod client;
pub mod config;
pub mod enrich;
pub mod export;
pub mod records;
pub mod scrape;
pub mod utils;

// Re-export commonly used types for convenience
pub use records::{ElementRecord, ExtractionResult, ImageRecord, NamedBlob, Rowable};
pub use scrape::Scraper;

use config::ScrapeConfig;
use url::Url;

/// Builder for a single-page extraction run
///
/// Fetches one page, extracts the elements matching the selector, and
/// optionally locates and enriches the page's images. The run yields `None`
/// only when the page fetch permanently fails; everything past that point
/// degrades to empty results instead of erroring.
pub struct Extraction {
    url: String,
    selector: Option<String>,
    element_limit: usize,
    scrape_images: bool,
    image_limit: usize,
    use_recognition: bool,
    config: Option<ScrapeConfig>,
}

impl Extraction {
    /// Create a new extraction for the given page URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            selector: None,
            element_limit: 0,
            scrape_images: false,
            image_limit: 0,
            use_recognition: false,
            config: None,
        }
    }

    /// Set the CSS selector applied to the page
    ///
    /// Without a selector the whole page is extracted as a single record.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Cap the number of element records; `0` means unbounded
    pub fn with_element_limit(mut self, limit: usize) -> Self {
        self.element_limit = limit;
        self
    }

    /// Enable or disable image scraping
    pub fn with_images(mut self, scrape_images: bool) -> Self {
        self.scrape_images = scrape_images;
        self
    }

    /// Cap the number of image records; `0` means unbounded
    pub fn with_image_limit(mut self, limit: usize) -> Self {
        self.image_limit = limit;
        self
    }

    /// Enable recognition of text embedded in image pixels
    ///
    /// Recognition runs only when the external capability is present;
    /// otherwise every record's `ocr_text` stays empty.
    pub fn with_recognition(mut self, use_recognition: bool) -> Self {
        self.use_recognition = use_recognition;
        self
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: ScrapeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        mut self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        self.config = Some(ScrapeConfig::from_file(path)?);
        Ok(self)
    }

    /// Apply configuration from a JSON string
    pub fn with_config_str(mut self, json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        self.config = Some(ScrapeConfig::from_json(json)?);
        Ok(self)
    }

    /// Run the extraction
    pub async fn run(self) -> Option<ExtractionResult> {
        let config = self.config.unwrap_or_default();
        let scraper = Scraper::with_config(&config);

        ::log::info!("starting extraction for {}", self.url);

        let html = scraper.http().fetch_text(&self.url).await?;
        let base_url = Url::parse(&self.url).ok()?;

        // The parsed tree stays inside this block so the returned future
        // remains Send
        let (elements, mut images) = {
            let document = scrape::parse(&html);

            let selector = self.selector.as_deref().filter(|s| !s.is_empty());
            let matched = match selector {
                Some(selector) => scrape::select(&document, selector, self.element_limit),
                // No selector extracts the whole page as one record
                None => vec![document.root_element()],
            };
            let elements = scrape::elements::extract(&matched);

            let images = if self.scrape_images {
                enrich::harvest(&document, &base_url, selector, self.image_limit)
            } else {
                Vec::new()
            };

            (elements, images)
        };

        if self.use_recognition && !images.is_empty() {
            enrich::recognize_batch(scraper.http(), &mut images).await;
        }

        ::log::info!(
            "extracted {} elements and {} images from {}",
            elements.len(),
            images.len(),
            self.url
        );

        Some(ExtractionResult { elements, images })
    }
}

/// Run an extraction with every parameter supplied up front
///
/// Flat wrapper over [`Extraction`] for callers that do not need the builder.
pub async fn run_extraction(
    url: &str,
    selector: Option<&str>,
    element_limit: usize,
    scrape_images: bool,
    image_limit: usize,
    use_recognition: bool,
) -> Option<ExtractionResult> {
    let mut extraction = Extraction::new(url)
        .with_element_limit(element_limit)
        .with_images(scrape_images)
        .with_image_limit(image_limit)
        .with_recognition(use_recognition);

    if let Some(selector) = selector {
        extraction = extraction.with_selector(selector);
    }

    extraction.run().await
}
