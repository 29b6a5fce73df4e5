//! Core library for readably.
//!
//! This crate provides readability scoring and the typed models used by the
//! `readably` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`readability`] - Flesch Reading Ease, Flesch-Kincaid grade, reading levels
//! - [`text`] / [`syllables`] - Tokenization and syllable estimates
//! - [`document`] - Reading text, markdown and images from disk
//! - [`assist`] - Request/response bodies for the AI assistant gateway
//! - [`speech`] - Speech recognition and playback sessions
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use readably_core::readability::{self, ReadingLevel};
//!
//! let report = readability::analyze("The cat sat on the mat.");
//! assert_eq!(report.word_count, 6);
//! assert_eq!(report.level, ReadingLevel::VeryEasy);
//! ```
#![deny(unsafe_code)]

pub mod assist;
pub mod config;
pub mod document;
pub mod error;
pub mod readability;
pub mod speech;
pub mod syllables;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use document::DEFAULT_MAX_INPUT_BYTES;
pub use error::{AssistError, AssistResult, ConfigError, ConfigResult, DocumentError, DocumentResult};
pub use readability::{ReadabilityReport, ReadingLevel, analyze};
