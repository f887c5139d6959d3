//! PodConventionContext - the webhook request/response envelope.
//!
//! The request carries `spec.template` and `spec.imageConfig`; the response
//! echoes the envelope back with `status` filled in.

use conventions_core::domain::{ImageMetadata, WorkloadTemplate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodConventionContext {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,

    #[serde(default)]
    pub spec: PodConventionContextSpec,

    #[serde(default)]
    pub status: PodConventionContextStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodConventionContextSpec {
    #[serde(default)]
    pub template: WorkloadTemplate,

    #[serde(default)]
    pub image_config: Vec<ImageMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodConventionContextStatus {
    #[serde(default)]
    pub applied_conventions: Vec<String>,

    #[serde(default)]
    pub template: WorkloadTemplate,
}
