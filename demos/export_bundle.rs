use clap::Parser;
use page_harvest::config::ScrapeConfig;
use page_harvest::{Extraction, Scraper, export};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the page to extract from
    #[arg(short, long)]
    url: String,

    /// CSS selector scoping the image scan
    #[arg(short, long)]
    selector: Option<String>,

    /// Path to a JSON scrape configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Where to write the image metadata spreadsheet
    #[arg(long, default_value = "images.xlsx")]
    xlsx_out: String,

    /// Where to write the downloaded image archive
    #[arg(long, default_value = "images.zip")]
    zip_out: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from file when given
    let config = match &args.config {
        Some(path) => {
            println!("Loading configuration from file: {}", path);
            ScrapeConfig::from_file(path)?
        }
        None => ScrapeConfig::default(),
    };

    let mut extraction = Extraction::new(&args.url)
        .with_images(true)
        .with_config(config.clone());
    if let Some(selector) = &args.selector {
        extraction = extraction.with_selector(selector);
    }

    let Some(result) = extraction.run().await else {
        eprintln!("Failed to fetch the page. Check the URL or network.");
        return Ok(());
    };

    println!("Found {} images.", result.images.len());
    if result.images.is_empty() {
        return Ok(());
    }

    // Spreadsheet of image metadata
    let xlsx_bytes = export::to_xlsx(&result.images);
    std::fs::write(&args.xlsx_out, xlsx_bytes)?;
    println!("Wrote image metadata to {}", args.xlsx_out);

    // Download the images one at a time and archive them
    let scraper = Scraper::with_config(&config);
    let blobs = scraper.download_images(&result.images).await;
    println!("Downloaded {} of {} images.", blobs.len(), result.images.len());

    let zip_bytes = export::to_zip(&blobs);
    std::fs::write(&args.zip_out, zip_bytes)?;
    println!("Wrote image archive to {}", args.zip_out);

    Ok(())
}
