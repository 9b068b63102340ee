//! AI-assisted flows: DSKP extraction from uploaded documents, curriculum
//! suggestions, and student-roster extraction, all backed by a hosted
//! generative-AI endpoint.

pub mod api;
pub mod key_store;

pub use api::{AssistApi, AssistError};
pub use key_store::{ApiKeyStore, ApiKeyStoreError};
