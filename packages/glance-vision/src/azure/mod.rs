mod client;
pub(crate) mod wire;

pub use client::{AzureVisionClient, VisionConfig, API_VERSION};
