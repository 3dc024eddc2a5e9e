use clap::Parser;
use page_harvest::{Extraction, export};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the page to extract from
    #[arg(short, long)]
    url: String,

    /// CSS selector to apply (omit to extract the whole page)
    #[arg(short, long)]
    selector: Option<String>,

    /// Maximum number of element records (0 = all)
    #[arg(short, long, default_value_t = 0)]
    limit: usize,

    /// Also scrape images and their context
    #[arg(short, long)]
    images: bool,

    /// Maximum number of images (0 = all)
    #[arg(long, default_value_t = 0)]
    image_limit: usize,

    /// Recognize text embedded in images (needs tesseract on PATH)
    #[arg(long)]
    recognize: bool,

    /// Write element records to this CSV file
    #[arg(short, long)]
    out: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    println!("Extracting from: {}", args.url);

    let mut extraction = Extraction::new(&args.url)
        .with_element_limit(args.limit)
        .with_images(args.images)
        .with_image_limit(args.image_limit)
        .with_recognition(args.recognize);

    if let Some(selector) = &args.selector {
        println!("Using selector: {}", selector);
        extraction = extraction.with_selector(selector);
    }

    let Some(result) = extraction.run().await else {
        eprintln!("Failed to fetch the page. Check the URL or network.");
        return Ok(());
    };

    println!("Found {} elements.", result.elements.len());
    for record in result.elements.iter().take(5) {
        println!("  {}", record.text);
    }

    if args.images {
        println!("Found {} images.", result.images.len());
        for image in &result.images {
            println!("  [{}] {} ({})", image.index, image.image_url, image.filename);
        }
    }

    if let Some(out) = &args.out {
        let csv_bytes = export::to_csv(&result.elements);
        std::fs::write(out, csv_bytes)?;
        println!("Wrote element records to {}", out);
    }

    Ok(())
}
