//! Text extraction seam.
//!
//! Turning raw document bytes into text is an external concern. The cache
//! only needs something that implements [`TextExtractor`].

use crate::error::ServiceError;

pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ServiceError>;
}

impl<F> TextExtractor for F
where
    F: Fn(&[u8]) -> Result<String, ServiceError> + Send + Sync,
{
    fn extract(&self, bytes: &[u8]) -> Result<String, ServiceError> {
        self(bytes)
    }
}

/// Treats the bytes as UTF-8 text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ServiceError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| ServiceError::new("Content must be valid UTF-8"))
    }
}

#[cfg(feature = "pdf")]
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

#[cfg(feature = "pdf")]
impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ServiceError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ServiceError::new(e.to_string()))
    }
}
