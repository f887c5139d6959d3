//! Image metadata handed to conventions by the caller.
//!
//! Resolution (registry lookups, SBOM extraction) happens outside the engine;
//! conventions only read these values.

use serde::{Deserialize, Serialize};

/// ImageMetadata describes one resolved container image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub image: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boms: Vec<Bom>,

    /// OCI image config, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl ImageMetadata {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }
}

/// A bill of materials attached to an image (base64 payload as sent on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bom {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}
