use crate::config::ScrapeConfig;
use crate::export;
use crate::scrape::Scraper;
use crate::{Extraction, run_extraction};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_PAGE: &str = r#"<html><body>
        <article>
            <p>First paragraph.</p>
            <p>Second paragraph.</p>
            <p>Third paragraph.</p>
            <img src="pic.png" alt="illustration">
        </article>
    </body></html>"#;

    fn fast_config() -> ScrapeConfig {
        let mut config = ScrapeConfig::default();
        config.backoff_ms = 1;
        config
    }

    async fn serve_article() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_PAGE))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_selector_extraction_end_to_end() {
        let server = serve_article().await;
        let url = format!("{}/page", server.uri());

        let result = Extraction::new(&url)
            .with_selector("p")
            .with_config(fast_config())
            .run()
            .await
            .expect("extraction should succeed");

        assert_eq!(result.elements.len(), 3);
        assert_eq!(result.elements[0].text, "First paragraph.");
        assert_eq!(result.elements[1].text, "Second paragraph.");
        assert_eq!(result.elements[2].text, "Third paragraph.");
        assert!(result.images.is_empty());
    }

    #[tokio::test]
    async fn test_image_scrape_end_to_end() {
        let server = serve_article().await;
        let url = format!("{}/page", server.uri());

        let result = Extraction::new(&url)
            .with_selector("p")
            .with_images(true)
            .with_config(fast_config())
            .run()
            .await
            .expect("extraction should succeed");

        // With a selector the image scan stays inside the matched nodes,
        // and no paragraph holds an image; a selector-less run scans the
        // whole page
        let whole_page = Extraction::new(&url)
            .with_images(true)
            .with_config(fast_config())
            .run()
            .await
            .expect("extraction should succeed");

        assert!(result.images.is_empty());
        assert_eq!(whole_page.images.len(), 1);

        let image = &whole_page.images[0];
        assert_eq!(image.image_url, format!("{}/pic.png", server.uri()));
        assert_eq!(image.filename, "pic.png");
        assert_eq!(image.alt, "illustration");
        assert_eq!(
            image.container_text,
            "First paragraph. Second paragraph. Third paragraph."
        );
    }

    #[tokio::test]
    async fn test_run_extraction_flat_signature() {
        let server = serve_article().await;
        let url = format!("{}/page", server.uri());

        let result = run_extraction(&url, Some("p"), 2, false, 0, false)
            .await
            .expect("extraction should succeed");

        assert_eq!(result.elements.len(), 2);
        assert_eq!(result.elements[0].text, "First paragraph.");
    }

    #[tokio::test]
    async fn test_missing_selector_extracts_whole_page() {
        let server = serve_article().await;
        let url = format!("{}/page", server.uri());

        let result = Extraction::new(&url)
            .with_config(fast_config())
            .run()
            .await
            .expect("extraction should succeed");

        assert_eq!(result.elements.len(), 1);
        assert!(result.elements[0].text.contains("First paragraph."));
        assert!(result.elements[0].text.contains("Third paragraph."));
    }

    #[tokio::test]
    async fn test_unreachable_page_yields_absence() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = Extraction::new(format!("{}/gone", server.uri()))
            .with_selector("p")
            .with_config(fast_config())
            .run()
            .await;

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_download_and_archive_flow() {
        let server = serve_article().await;
        let image_bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 1, 2, 3, 4];
        Mock::given(method("GET"))
            .and(path("/pic.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(image_bytes.clone()))
            .mount(&server)
            .await;

        let url = format!("{}/page", server.uri());
        let result = Extraction::new(&url)
            .with_images(true)
            .with_config(fast_config())
            .run()
            .await
            .expect("extraction should succeed");

        let scraper = Scraper::with_config(&fast_config());
        let blobs = scraper.download_images(&result.images).await;
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].filename, "pic.png");
        assert_eq!(blobs[0].data, image_bytes);

        let archive_bytes = export::to_zip(&blobs);
        let mut archive =
            zip::ZipArchive::new(std::io::Cursor::new(archive_bytes)).unwrap();
        assert!(archive.by_name("pic.png").is_ok());
    }

    #[tokio::test]
    async fn test_failed_downloads_are_skipped_not_fatal() {
        let server = serve_article().await;
        // No mock for /pic.png, so the download fails after retries

        let url = format!("{}/page", server.uri());
        let result = Extraction::new(&url)
            .with_images(true)
            .with_config(fast_config())
            .run()
            .await
            .expect("extraction should succeed");
        assert_eq!(result.images.len(), 1);

        let scraper = Scraper::with_config(&fast_config());
        let blobs = scraper.download_images(&result.images).await;
        assert!(blobs.is_empty());
    }
}
