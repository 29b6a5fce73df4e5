//! Request and response models for the AI text assistant gateway.
//!
//! The gateway exposes two endpoints that forward to a chat-completion API:
//!
//! - `/functions/simplify-text` takes `{ text, level }` and returns
//!   `{ simplifiedText }`.
//! - `/functions/analyze-image` takes `{ imageData }` (a data URL) and
//!   returns `{ extractedText }`.
//!
//! Failures come back as `{ error }` with a non-2xx status. This module only
//! builds and parses those bodies; sending them is left to the caller.
//! Levels and languages are closed enums, so an unknown value fails at
//! construction instead of silently falling back to a default.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AssistError, AssistResult};

/// Chat model used when none is configured.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Gateway path for text simplification.
pub const SIMPLIFY_ENDPOINT: &str = "/functions/simplify-text";

/// Gateway path for image text extraction.
pub const ANALYZE_IMAGE_ENDPOINT: &str = "/functions/analyze-image";

const IMAGE_SYSTEM_PROMPT: &str = "You are an educational content extraction expert. \
Extract all text from the image. If it contains educational content like formulas, diagrams, \
or structured information, describe them clearly. Return only the extracted text and \
descriptions, maintaining the original structure as much as possible.";

const IMAGE_USER_PROMPT: &str = "Please extract all text and educational content from this image:";

/// Target reading level for simplification.
///
/// Serialized on the wire as its number (1--3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SimplificationLevel {
    /// Elementary school (ages 8--10).
    Basic,
    /// Middle school (ages 11--14).
    #[default]
    Intermediate,
    /// High school (ages 15--18).
    Advanced,
}

impl SimplificationLevel {
    /// Wire number for this level.
    pub const fn number(self) -> u8 {
        match self {
            Self::Basic => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Audience description embedded in the system prompt.
    pub const fn audience(self) -> &'static str {
        match self {
            Self::Basic => {
                "elementary school level (ages 8-10). Use very simple words, short sentences, \
                 and basic concepts."
            }
            Self::Intermediate => {
                "middle school level (ages 11-14). Use clear language, moderate complexity, \
                 and well-explained concepts."
            }
            Self::Advanced => {
                "high school level (ages 15-18). Maintain academic language but improve \
                 clarity and structure."
            }
        }
    }
}

impl From<SimplificationLevel> for u8 {
    fn from(level: SimplificationLevel) -> Self {
        level.number()
    }
}

impl TryFrom<u8> for SimplificationLevel {
    type Error = AssistError;

    fn try_from(value: u8) -> AssistResult<Self> {
        match value {
            1 => Ok(Self::Basic),
            2 => Ok(Self::Intermediate),
            3 => Ok(Self::Advanced),
            other => Err(AssistError::UnknownLevel {
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for SimplificationLevel {
    type Err = AssistError;

    fn from_str(s: &str) -> AssistResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "basic" => Ok(Self::Basic),
            "2" | "intermediate" => Ok(Self::Intermediate),
            "3" | "advanced" => Ok(Self::Advanced),
            _ => Err(AssistError::UnknownLevel {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SimplificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Target language for translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Language {
    /// Spanish.
    #[default]
    Es,
    /// French.
    Fr,
    /// German.
    De,
    /// Italian.
    It,
    /// Portuguese.
    Pt,
    /// Chinese.
    Zh,
    /// Japanese.
    Ja,
    /// Korean.
    Ko,
    /// Arabic.
    Ar,
    /// Hindi.
    Hi,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Self; 10] = [
        Self::Es,
        Self::Fr,
        Self::De,
        Self::It,
        Self::Pt,
        Self::Zh,
        Self::Ja,
        Self::Ko,
        Self::Ar,
        Self::Hi,
    ];

    /// ISO 639-1 code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Pt => "pt",
            Self::Zh => "zh",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Ar => "ar",
            Self::Hi => "hi",
        }
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::De => "German",
            Self::It => "Italian",
            Self::Pt => "Portuguese",
            Self::Zh => "Chinese",
            Self::Ja => "Japanese",
            Self::Ko => "Korean",
            Self::Ar => "Arabic",
            Self::Hi => "Hindi",
        }
    }
}

impl FromStr for Language {
    type Err = AssistError;

    /// Accepts a code ("fr") or an English name ("French"), case-insensitive.
    fn from_str(s: &str) -> AssistResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| {
                lang.code().eq_ignore_ascii_case(wanted) || lang.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| AssistError::UnknownLanguage {
                value: s.to_string(),
                available: Self::ALL.map(Self::code).join(", "),
            })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn require_text(text: impl Into<String>) -> AssistResult<String> {
    let text = text.into();
    if text.trim().is_empty() {
        return Err(AssistError::EmptyText);
    }
    Ok(text)
}

/// Body of a simplification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyRequest {
    /// Text to simplify.
    pub text: String,
    /// Target reading level.
    pub level: SimplificationLevel,
}

impl SimplifyRequest {
    /// Build a request, rejecting empty text.
    pub fn new(text: impl Into<String>, level: SimplificationLevel) -> AssistResult<Self> {
        Ok(Self {
            text: require_text(text)?,
            level,
        })
    }
}

/// Body of an image text extraction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    /// Image as a `data:` URL.
    pub image_data: String,
}

impl ImageRequest {
    /// Build a request, rejecting empty image data.
    pub fn new(image_data: impl Into<String>) -> AssistResult<Self> {
        let image_data = image_data.into();
        if image_data.is_empty() {
            return Err(AssistError::MissingImageData);
        }
        Ok(Self { image_data })
    }
}

/// Body of a translation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Text to translate.
    pub text: String,
    /// Language to translate into.
    pub target_language: Language,
}

impl TranslateRequest {
    /// Build a request, rejecting empty text.
    pub fn new(text: impl Into<String>, target_language: Language) -> AssistResult<Self> {
        Ok(Self {
            text: require_text(text)?,
            target_language,
        })
    }
}

/// Successful simplification response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyResponse {
    /// Simplified text.
    pub simplified_text: String,
}

/// Successful image extraction response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    /// Text extracted from the image.
    pub extracted_text: String,
}

/// Error body returned with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message.
    pub error: String,
}

impl From<&AssistError> for ErrorBody {
    fn from(err: &AssistError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// A chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model.
    System,
    /// End-user input.
    User,
    /// Model output.
    Assistant,
}

/// One part of a multi-part message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
    /// An image reference.
    ImageUrl {
        /// The image location.
        image_url: ImageUrl,
    },
}

/// Image location inside a [`ContentPart::ImageUrl`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// URL or data URL.
    pub url: String,
}

/// Message content: a plain string or a list of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),
    /// Multi-part content.
    Parts(Vec<ContentPart>),
}

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent the message.
    pub role: Role,
    /// Message body.
    pub content: MessageContent,
}

/// Upstream chat-completion request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation to complete.
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Completion request that simplifies text for the requested level.
    #[tracing::instrument(skip_all, fields(level = request.level.number()))]
    pub fn simplify(request: &SimplifyRequest, model: &str) -> Self {
        let system = format!(
            "You are an educational content simplification expert. Simplify the given text to {} \
             Maintain the core educational message and accuracy while making it more accessible. \
             Only return the simplified text, nothing else.",
            request.level.audience()
        );
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: MessageContent::Text(system),
                },
                ChatMessage {
                    role: Role::User,
                    content: MessageContent::Text(request.text.clone()),
                },
            ],
        }
    }

    /// Completion request that extracts text from an image.
    #[tracing::instrument(skip_all, fields(data_len = request.image_data.len()))]
    pub fn extract_text(request: &ImageRequest, model: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: MessageContent::Text(IMAGE_SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: Role::User,
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: IMAGE_USER_PROMPT.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: request.image_data.clone(),
                            },
                        },
                    ]),
                },
            ],
        }
    }
}

/// Upstream chat-completion response body (only the fields read here).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    /// Completion choices.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChoiceMessage,
}

/// Generated message inside a [`ChatChoice`].
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice.
    pub fn into_content(self) -> AssistResult<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AssistError::EmptyCompletion)
    }

    /// Wrap the first choice as a simplification response.
    pub fn into_simplify_response(self) -> AssistResult<SimplifyResponse> {
        Ok(SimplifyResponse {
            simplified_text: self.into_content()?,
        })
    }

    /// Wrap the first choice as an image extraction response.
    pub fn into_image_response(self) -> AssistResult<ImageResponse> {
        Ok(ImageResponse {
            extracted_text: self.into_content()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn level_wire_format_is_numeric() {
        let req = SimplifyRequest::new("Photosynthesis converts light.", SimplificationLevel::Basic)
            .unwrap();
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({ "text": "Photosynthesis converts light.", "level": 1 }));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = serde_json::from_value::<SimplifyRequest>(json!({ "text": "x", "level": 7 }))
            .unwrap_err();
        assert!(err.to_string().contains("unknown simplification level"));
        assert!(SimplificationLevel::try_from(0).is_err());
        assert!("expert".parse::<SimplificationLevel>().is_err());
    }

    #[test]
    fn level_parses_names_and_numbers() {
        assert_eq!("basic".parse(), Ok(SimplificationLevel::Basic));
        assert_eq!("Advanced".parse(), Ok(SimplificationLevel::Advanced));
        assert_eq!("2".parse(), Ok(SimplificationLevel::Intermediate));
        assert_eq!(SimplificationLevel::default(), SimplificationLevel::Intermediate);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(
            SimplifyRequest::new("  ", SimplificationLevel::Basic),
            Err(AssistError::EmptyText)
        );
        assert_eq!(ImageRequest::new(""), Err(AssistError::MissingImageData));
        assert_eq!(TranslateRequest::new("", Language::Fr), Err(AssistError::EmptyText));
    }

    #[test]
    fn language_parses_code_or_name() {
        assert_eq!("fr".parse(), Ok(Language::Fr));
        assert_eq!("Japanese".parse(), Ok(Language::Ja));
        assert_eq!("HI".parse(), Ok(Language::Hi));
        let err = "klingon".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("es, fr, de"));
    }

    #[test]
    fn translate_request_wire_format() {
        let req = TranslateRequest::new("Hello", Language::De).unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "text": "Hello", "targetLanguage": "de" })
        );
    }

    #[test]
    fn image_request_uses_camel_case() {
        let req = ImageRequest::new("data:image/png;base64,AAAA").unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "imageData": "data:image/png;base64,AAAA" })
        );
    }

    #[test]
    fn simplify_chat_request_embeds_audience() {
        let req = SimplifyRequest::new("Mitochondria produce ATP.", SimplificationLevel::Advanced)
            .unwrap();
        let chat = ChatRequest::simplify(&req, DEFAULT_MODEL);
        let value = serde_json::to_value(&chat).unwrap();

        assert_eq!(value["model"], DEFAULT_MODEL);
        assert_eq!(value["messages"][0]["role"], "system");
        let system = value["messages"][0]["content"].as_str().unwrap();
        assert!(system.contains("high school level (ages 15-18)"));
        assert_eq!(value["messages"][1]["content"], "Mitochondria produce ATP.");
    }

    #[test]
    fn image_chat_request_has_two_parts() {
        let req = ImageRequest::new("data:image/png;base64,AAAA").unwrap();
        let value = serde_json::to_value(ChatRequest::extract_text(&req, "m")).unwrap();
        let parts = &value["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn chat_response_content() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Plants eat light." } }]
        }))
        .unwrap();
        let simplified = resp.into_simplify_response().unwrap();
        assert_eq!(simplified.simplified_text, "Plants eat light.");
        assert_eq!(
            serde_json::to_value(&simplified).unwrap(),
            json!({ "simplifiedText": "Plants eat light." })
        );
    }

    #[test]
    fn chat_response_without_choices_errors() {
        let resp: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(resp.into_content(), Err(AssistError::EmptyCompletion));
        let err = ErrorBody::from(&AssistError::MissingImageData);
        assert_eq!(err.error, "missing required parameter: imageData");
    }
}
