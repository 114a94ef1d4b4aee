//! AI collaborator implementations for KFDB.
//!
//! This crate owns the outbound side of the `SuggestionService` seam:
//! the Gemini REST client and the response-intake sanitization/validation.

pub mod gemini;
pub mod intake;

pub use gemini::GeminiSuggestionService;
