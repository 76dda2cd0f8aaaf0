use async_trait::async_trait;
use std::sync::Arc;

use crate::backend::media::ContentPart;
use crate::error::Result;

/// A provider-neutral generation request: one system instruction plus an ordered list
/// of user content parts.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub parts: Vec<ContentPart>,
    pub temperature: f32,
}

impl GenerationRequest {
    /// The first text part, if any.
    pub fn instruction(&self) -> Option<&str> {
        self.parts.iter().find_map(ContentPart::as_text)
    }

    /// True if any part carries inline binary data.
    pub fn has_inline_data(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, ContentPart::InlineData(_)))
    }
}

/// LLMClient trait defines the interface to a hosted generative model.
///
/// Implementations send one request and return the generated text. `Ok(None)` means the
/// service answered but produced no text; every other failure is an `Err`.
///
/// The library ships `GeminiClient`. Any other provider, or a scripted stand-in for
/// tests, can be plugged into [`ReportGenerator`](crate::ReportGenerator) by
/// implementing this trait.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use medreport::{GenerationRequest, LLMClient, Result};
///
/// struct Canned;
///
/// #[async_trait]
/// impl LLMClient for Canned {
///     async fn generate_content(&self, _request: &GenerationRequest) -> Result<Option<String>> {
///         Ok(Some("<!DOCTYPE html><html></html>".to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Send a single generation request and return the generated text, if any.
    async fn generate_content(&self, request: &GenerationRequest) -> Result<Option<String>>;
}

#[async_trait]
impl<T: LLMClient + ?Sized> LLMClient for &T {
    async fn generate_content(&self, request: &GenerationRequest) -> Result<Option<String>> {
        (**self).generate_content(request).await
    }
}

#[async_trait]
impl<T: LLMClient + ?Sized> LLMClient for Arc<T> {
    async fn generate_content(&self, request: &GenerationRequest) -> Result<Option<String>> {
        (**self).generate_content(request).await
    }
}
