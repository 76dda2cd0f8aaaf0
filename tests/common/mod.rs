#![allow(dead_code)]

use async_trait::async_trait;
use medreport::{ApiErrorKind, GenerationRequest, LLMClient, ReportError, Result};
use std::sync::Mutex;

/// 1x1 transparent PNG, base64-encoded.
pub const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

type Reply = Box<dyn Fn() -> Result<Option<String>> + Send + Sync>;

/// An `LLMClient` that records every request and answers from a script.
pub struct ScriptedClient {
    reply: Reply,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedClient {
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::with_reply(move || Ok(Some(text.clone())))
    }

    pub fn silent() -> Self {
        Self::with_reply(|| Ok(None))
    }

    pub fn failing_with_quota_error() -> Self {
        Self::with_reply(|| {
            Err(ReportError::api_error(
                "Gemini",
                ApiErrorKind::RateLimited {
                    details: "Resource has been exhausted".to_string(),
                },
            ))
        })
    }

    pub fn with_reply(reply: impl Fn() -> Result<Option<String>> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests()
            .pop()
            .expect("the client should have received a request")
    }
}

#[async_trait]
impl LLMClient for ScriptedClient {
    async fn generate_content(&self, request: &GenerationRequest) -> Result<Option<String>> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());
        (self.reply)()
    }
}
