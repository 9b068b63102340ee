//! Library exports for reuse in integration tests.
/// Per-user directories for config and logs.
pub mod app_dirs;
/// Gemini-backed PDF extraction and curriculum suggestions.
pub mod assist;
/// Persisted application configuration.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared HTTP agent and response handling.
pub mod http_client;
/// File logging setup.
pub mod logging;
/// School data model and REST client.
pub mod school;
