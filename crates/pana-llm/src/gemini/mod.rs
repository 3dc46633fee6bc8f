mod client;

pub use client::{GeminiClient, DEFAULT_MODEL, GEMINI_API_BASE};
