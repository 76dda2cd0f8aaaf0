pub mod client;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod media;
#[cfg(feature = "gemini")]
mod utils;

pub use client::{GenerationRequest, LLMClient};
#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiConfig, Model as GeminiModel, ThinkingLevel};
pub use media::{Attachment, ContentPart, InlineData};
