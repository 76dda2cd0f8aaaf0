//! medreport: preliminary analyses of medical documents from multimodal LLMs
//!
//! # Overview
//!
//! medreport sends a photographed or scanned medical document (lab results, imaging
//! notes) to a hosted multimodal model together with a fixed system instruction, and
//! returns the self-contained HTML report the model writes: disclaimer banner, report
//! summary, color-coded anomaly table, differential diagnosis and next steps.
//!
//! Key features:
//! - `ReportGenerator`, a single request/response operation with no hidden state
//! - Built-in Gemini client (`generateContent` REST API) with inline image support
//! - A pluggable `LLMClient` trait for other providers or scripted tests
//! - Cleanup of markdown code fences around the returned HTML
//!
//! The output is informational only and is not validated by this crate.
//!
//! # Quick Start
//!
//! ```no_run
//! use medreport::{GeminiClient, ReportGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = ReportGenerator::new(GeminiClient::from_env()?);
//!
//!     // No attachment: the prompt is forwarded as-is
//!     let html = generator
//!         .generate("Explain what a high ALT value can indicate", None, None)
//!         .await?;
//!
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```

mod backend;
mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod report;

// Re-exports for convenience
pub use error::{ApiErrorKind, ReportError, Result};
pub use report::{
    ATTACHMENT_INSTRUCTION, DEFAULT_TEMPERATURE, DEMO_INSTRUCTION, DISCLAIMER,
    FAILURE_PLACEHOLDER, ReportGenerator, ReportRequest, SystemContract, effective_instruction,
    strip_code_fences,
};

pub use backend::{Attachment, ContentPart, GenerationRequest, InlineData, LLMClient};

#[cfg(feature = "gemini")]
pub use backend::{GeminiClient, GeminiConfig, GeminiModel, ThinkingLevel};
