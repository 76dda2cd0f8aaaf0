use tracing::{debug, error, info, instrument};

use crate::backend::{Attachment, ContentPart, GenerationRequest, LLMClient};
use crate::error::Result;
use crate::report::cleanup::strip_code_fences;
use crate::report::contract::SystemContract;

/// Instruction sent whenever an attachment is present. The caller's prompt is not forwarded.
pub const ATTACHMENT_INSTRUCTION: &str =
    "Analyze this medical report/image. Provide a structured analysis as a styled HTML page.";

/// Instruction sent when there is neither an attachment nor a prompt.
pub const DEMO_INSTRUCTION: &str =
    "Create a dummy medical analysis report for demonstration purposes.";

/// Returned in place of a report when the model produced no text.
pub const FAILURE_PLACEHOLDER: &str = "<!-- Failed to generate content -->";

/// Sampling temperature used unless overridden; kept low for reproducible analyses.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// A prompt plus an optional attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRequest {
    pub prompt: String,
    pub attachment: Option<Attachment>,
}

impl ReportRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Pick the instruction text forwarded to the model.
pub fn effective_instruction<'a>(prompt: &'a str, attachment: Option<&Attachment>) -> &'a str {
    if attachment.is_some() {
        ATTACHMENT_INSTRUCTION
    } else if !prompt.is_empty() {
        prompt
    } else {
        DEMO_INSTRUCTION
    }
}

/// Turns a prompt and an optional scan of a medical document into an HTML analysis page.
///
/// Each call makes exactly one request through the wrapped [`LLMClient`]. Nothing is
/// retried and nothing is kept between calls, so one generator can serve concurrent
/// callers.
///
/// # Examples
///
/// ```no_run
/// use medreport::{Attachment, GeminiClient, ReportGenerator, ReportRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = ReportGenerator::new(GeminiClient::from_env()?);
///
/// let scan = std::fs::read("labs.png")?;
/// let mut request = ReportRequest::new("Check my labs");
/// request.attachment = Attachment::from_bytes(&scan, "image/png");
///
/// let html = generator.generate_report(&request).await?;
/// std::fs::write("labs.html", html)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReportGenerator<C> {
    client: C,
    contract: SystemContract,
    temperature: f32,
}

impl<C: LLMClient> ReportGenerator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            contract: SystemContract::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set the sampling temperature (lower = more deterministic)
    #[instrument(skip(self))]
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = self.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.temperature = temp;
        self
    }

    /// Replace the system instruction sent with every request.
    #[instrument(skip(self, contract), fields(version = contract.version))]
    pub fn system_contract(mut self, contract: SystemContract) -> Self {
        debug!(previous_version = self.contract.version, "Setting system contract");
        self.contract = contract;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Assemble the request for `request` without sending it.
    pub fn build_request(&self, request: &ReportRequest) -> GenerationRequest {
        let attachment = request.attachment.as_ref();
        let instruction = effective_instruction(&request.prompt, attachment);

        let mut parts = vec![ContentPart::text(instruction)];
        parts.extend(attachment.map(ContentPart::from));

        GenerationRequest {
            system_instruction: self.contract.text.to_string(),
            parts,
            temperature: self.temperature,
        }
    }

    /// Generate a report from a prompt and an optional base64 attachment.
    ///
    /// The attachment is only used when both its data and media type are given;
    /// a half-supplied pair is ignored.
    pub async fn generate(
        &self,
        prompt: &str,
        attachment_data: Option<&str>,
        attachment_media_type: Option<&str>,
    ) -> Result<String> {
        let request = ReportRequest {
            prompt: prompt.to_string(),
            attachment: Attachment::from_parts(attachment_data, attachment_media_type),
        };
        self.generate_report(&request).await
    }

    /// Generate a report for a typed request.
    #[instrument(
        name = "generate_report",
        skip(self, request),
        fields(
            contract_version = self.contract.version,
            prompt_len = request.prompt.len(),
            media_type = request.attachment.as_ref().map(Attachment::media_type)
        )
    )]
    pub async fn generate_report(&self, request: &ReportRequest) -> Result<String> {
        info!("Generating medical report analysis");
        let generation = self.build_request(request);

        let text = match self.client.generate_content(&generation).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Report generation failed");
                return Err(e);
            }
        };

        let text = match text {
            Some(text) if !text.is_empty() => text,
            _ => {
                info!("Model returned no text, substituting placeholder");
                FAILURE_PLACEHOLDER.to_string()
            }
        };

        let html = strip_code_fences(&text);
        debug!(
            raw_len = text.len(),
            cleaned_len = html.len(),
            "Cleaned model output"
        );
        Ok(html)
    }
}
