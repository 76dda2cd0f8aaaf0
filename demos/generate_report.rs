//! Medical Report Analysis Example
//!
//! Sends a photo or scan of a medical document to Gemini and writes the HTML analysis
//! next to it. Without an image path, asks for a demonstration report instead.
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY=your_key_here
//! cargo run --example generate_report -- path/to/labs.png
//! cargo run --example generate_report -- "Explain a lipid panel"
//! ```

use medreport::logging::{LogLevel, init_logging};
use medreport::{Attachment, GeminiClient, ReportGenerator, ReportRequest};
use std::env;
use std::path::Path;

fn media_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "image/png",
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Info)?;

    let arg = env::args().nth(1).unwrap_or_default();
    let path = Path::new(&arg);

    let (request, output) = if path.is_file() {
        let bytes = std::fs::read(path)?;
        println!("Read {} bytes from {}", bytes.len(), path.display());
        let mut request = ReportRequest::new("");
        request.attachment = Attachment::from_bytes(&bytes, media_type_for(path));
        (request, path.with_extension("html"))
    } else {
        (ReportRequest::new(arg.as_str()), "report.html".into())
    };

    println!("Analyzing with Gemini...");
    let generator = ReportGenerator::new(GeminiClient::from_env()?);
    let html = generator.generate_report(&request).await?;

    std::fs::write(&output, &html)?;
    println!("Wrote {} ({} bytes)", output.display(), html.len());
    Ok(())
}
