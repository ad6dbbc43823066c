//! Resume text extraction from uploaded PDF bytes.
//!
//! Extraction never fails: anything pdf-extract cannot read (corrupt streams,
//! image-only scans, encrypted files) yields an empty string, and callers treat
//! a blank result as "no text could be extracted". No OCR is attempted.

use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use tracing::{debug, warn};

/// Returns the text of every page that has any, each followed by a newline.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed documents instead of returning an error.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    let pages = match pages {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            warn!("PDF text extraction failed: {e}");
            return String::new();
        }
        Err(_) => {
            warn!("PDF text extraction panicked; treating document as unreadable");
            return String::new();
        }
    };

    let mut text = String::new();
    for page in pages.iter().filter(|p| !p.trim().is_empty()) {
        text.push_str(page);
        text.push('\n');
    }

    debug!(
        "Extracted {} chars from {} page(s)",
        text.len(),
        pages.len()
    );
    text
}

/// Runs [`extract_pdf_text`] on the blocking pool.
pub async fn extract_pdf_text_blocking(bytes: Bytes) -> String {
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .unwrap_or_else(|e| {
            warn!("PDF extraction task failed: {e}");
            String::new()
        })
}
