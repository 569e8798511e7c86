use std::panic::{self, AssertUnwindSafe};

use anyhow::{Context, Result};
use lopdf::Document;

/// Extract cleaned text from PDF bytes on the blocking pool.
///
/// Returns an empty string when nothing could be extracted; unreadable pages
/// contribute nothing instead of failing the document.
pub async fn extract_text(pdf_bytes: Vec<u8>) -> Result<String> {
    let size = pdf_bytes.len();
    tracing::debug!("extract_text: parsing {size} bytes");

    let text = tokio::task::spawn_blocking(move || extract_text_sync(&pdf_bytes))
        .await
        .context("PDF extraction task panicked")?;

    tracing::info!("extract_text: {} chars from {size} bytes", text.chars().count());
    Ok(text)
}

pub fn extract_text_sync(pdf_bytes: &[u8]) -> String {
    let pages = match Document::load_mem(pdf_bytes) {
        Ok(doc) => extract_pages(&doc),
        Err(e) => {
            tracing::warn!("lopdf could not load document: {e}");
            Vec::new()
        }
    };

    let text = clean_text(&pages.join("\n"));
    if !text.is_empty() {
        return text;
    }

    tracing::info!("Per-page extraction produced no text, falling back to pdf_extract");
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(pdf_bytes)) {
        Ok(Ok(raw)) => clean_text(&raw),
        Ok(Err(e)) => {
            tracing::warn!("pdf_extract failed: {e}");
            String::new()
        }
        Err(_) => {
            tracing::warn!("pdf_extract panicked");
            String::new()
        }
    }
}

fn extract_pages(doc: &Document) -> Vec<String> {
    let pages: Vec<u32> = doc.get_pages().into_keys().collect();
    extract_each_page(&pages, |page| doc.extract_text(&[page]))
}

/// Run `extract_page` for every page in order. A page that errors or panics
/// yields an empty string and the remaining pages still run.
fn extract_each_page<F, E>(pages: &[u32], extract_page: F) -> Vec<String>
where
    F: Fn(u32) -> Result<String, E>,
    E: std::fmt::Display,
{
    pages
        .iter()
        .map(|&page| {
            match panic::catch_unwind(AssertUnwindSafe(|| extract_page(page))) {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    tracing::warn!(page, "Page extraction failed: {e}");
                    String::new()
                }
                Err(_) => {
                    tracing::warn!(page, "Page extraction panicked");
                    String::new()
                }
            }
        })
        .collect()
}

/// Trim every line and drop the empty ones.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
