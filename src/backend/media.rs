use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

/// A binary attachment (usually a photo or scan of a medical document) sent inline
/// with the request.
///
/// The data and its media type always travel together: an `Attachment` cannot exist
/// with only one of them, and constructors return `None` for an incomplete pair.
///
/// # Examples
///
/// ```
/// use medreport::Attachment;
///
/// let scan = Attachment::from_bytes(b"abc", "image/png").unwrap();
/// assert_eq!(scan.data(), "YWJj");
/// assert_eq!(scan.media_type(), "image/png");
///
/// // A half-supplied pair is no attachment at all
/// assert!(Attachment::from_parts(Some("YWJj"), None::<&str>).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    data: String,
    media_type: String,
}

impl Attachment {
    /// Create an attachment from already base64-encoded data.
    ///
    /// Returns `None` if either field is empty.
    pub fn new(data: impl Into<String>, media_type: impl Into<String>) -> Option<Self> {
        let data = data.into();
        let media_type = media_type.into();
        if data.is_empty() || media_type.is_empty() {
            return None;
        }
        Some(Self { data, media_type })
    }

    /// Encode raw bytes (standard base64 alphabet, padded).
    pub fn from_bytes(bytes: &[u8], media_type: impl Into<String>) -> Option<Self> {
        Self::new(STANDARD.encode(bytes), media_type)
    }

    /// Build an attachment from two independently optional values.
    ///
    /// Only a complete pair yields an attachment; anything else is treated as absent.
    pub fn from_parts<D, M>(data: Option<D>, media_type: Option<M>) -> Option<Self>
    where
        D: Into<String>,
        M: Into<String>,
    {
        match (data, media_type) {
            (Some(data), Some(media_type)) => Self::new(data, media_type),
            _ => None,
        }
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }
}

/// Inline binary payload in the shape the Gemini API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// One element of a request's ordered content.
///
/// Serializes to `{"text": ...}` or `{"inlineData": {"mimeType": ..., "data": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentPart {
    Text(String),
    InlineData(InlineData),
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text(text) => Some(text),
            ContentPart::InlineData(_) => None,
        }
    }
}

impl From<&Attachment> for ContentPart {
    fn from(attachment: &Attachment) -> Self {
        ContentPart::InlineData(InlineData {
            mime_type: attachment.media_type.clone(),
            data: attachment.data.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_pairs_are_absent() {
        assert!(Attachment::from_parts(None::<&str>, Some("image/png")).is_none());
        assert!(Attachment::from_parts(Some("YWJj"), None::<&str>).is_none());
        assert!(Attachment::from_parts(None::<&str>, None::<&str>).is_none());
        assert!(Attachment::from_parts(Some(""), Some("image/png")).is_none());
        assert!(Attachment::from_parts(Some("YWJj"), Some("")).is_none());
        assert!(Attachment::from_bytes(b"", "image/png").is_none());
    }

    #[test]
    fn test_complete_pair() {
        let attachment =
            Attachment::from_parts(Some("YWJj"), Some("image/jpeg")).expect("pair is complete");
        assert_eq!(attachment.data(), "YWJj");
        assert_eq!(attachment.media_type(), "image/jpeg");
    }

    #[test]
    fn test_text_part_wire_shape() {
        let json = serde_json::to_value(ContentPart::text("hello")).expect("part should serialize");
        assert_eq!(json, serde_json::json!({ "text": "hello" }));
    }

    #[test]
    fn test_inline_part_wire_shape() {
        let attachment = Attachment::from_bytes(b"abc", "image/png").expect("non-empty bytes");
        let json =
            serde_json::to_value(ContentPart::from(&attachment)).expect("part should serialize");
        assert_eq!(
            json,
            serde_json::json!({ "inlineData": { "mimeType": "image/png", "data": "YWJj" } })
        );
    }
}
