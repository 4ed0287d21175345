//! Produce ripeness classification service.
//!
//! Accepts a base64-encoded photo of produce and returns a ripeness class
//! with confidence scores. The pipeline runs base64 decode → image decode →
//! resize/normalize → model inference → labeled response. When no real
//! model artifact is available the registry degrades to synthetic mock
//! predictions so the service never goes down with the model.

pub mod codec;
pub mod config;
pub mod error;
pub mod http;
#[cfg(feature = "real-models")]
pub mod model;
pub mod predictor;
pub mod preprocess;
pub mod registry;
pub mod response;
pub mod service;
pub mod types;
