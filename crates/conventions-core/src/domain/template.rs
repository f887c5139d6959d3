//! Workload template model (a Kubernetes `PodTemplateSpec`).
//!
//! Only the fields conventions read or write are typed. Everything else is
//! kept in `extra` maps so a template survives decode/encode untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::probe::Probe;

/// WorkloadTemplate is the pod template a request asks us to mutate.
///
/// # Usage
/// ```ignore
/// let template = WorkloadTemplate::new(vec![Container::new("app")])
///     .with_label("carto.run/workload-name", "my-app");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadTemplate {
    #[serde(default)]
    pub metadata: TemplateMetadata,

    #[serde(default)]
    pub spec: PodSpec,
}

impl WorkloadTemplate {
    pub fn new(containers: Vec<Container>) -> Self {
        Self {
            metadata: TemplateMetadata::default(),
            spec: PodSpec {
                containers,
                extra: Map::new(),
            },
        }
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn containers(&self) -> &[Container] {
        &self.spec.containers
    }

    pub fn container(&self, name: &str) -> Option<&Container> {
        self.spec.containers.iter().find(|c| c.name == name)
    }
}

/// Template metadata. `None` maps stand for maps absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodSpec {
    #[serde(default)]
    pub containers: Vec<Container>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// `None` when the list is absent on the wire, so `[]` survives re-encoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_probe: Option<Probe>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn env_vars(&self) -> &[EnvVar] {
        self.env.as_deref().unwrap_or_default()
    }

    pub fn env_var(&self, name: &str) -> Option<&EnvVar> {
        self.env_vars().iter().find(|e| e.name == name)
    }
}

/// EnvVar is a (name, value) pair. `valueFrom` and friends stay in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let raw = json!({
            "metadata": {
                "labels": { "app": "web" },
                "creationTimestamp": null
            },
            "spec": {
                "serviceAccountName": "default",
                "containers": [{
                    "name": "app",
                    "image": "registry.example.com/app@sha256:abc",
                    "resources": {},
                    "env": [{ "name": "SECRET", "valueFrom": { "secretKeyRef": { "name": "s", "key": "k" } } }]
                }]
            }
        });

        let template: WorkloadTemplate = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(template.containers().len(), 1);
        assert_eq!(template.containers()[0].env_vars()[0].value, None);

        let back = serde_json::to_value(&template).expect("serialize");
        assert_eq!(back, raw);
    }

    #[test]
    fn empty_lists_survive_roundtrip() {
        let raw = json!({
            "spec": {
                "containers": [{
                    "name": "app",
                    "env": [],
                    "readinessProbe": { "exec": { "command": [] } },
                    "livenessProbe": { "httpGet": { "port": 8080, "httpHeaders": [] } }
                }]
            }
        });

        let template: WorkloadTemplate = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(template.containers()[0].env, Some(vec![]));

        let back = serde_json::to_value(&template).expect("serialize");
        assert_eq!(back, raw);
    }

    #[test]
    fn absent_env_stays_absent() {
        let raw = json!({ "spec": { "containers": [{ "name": "app" }] } });

        let template: WorkloadTemplate = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(template.containers()[0].env, None);
        assert!(template.containers()[0].env_vars().is_empty());
        assert_eq!(serde_json::to_value(&template).expect("serialize"), raw);
    }

    #[test]
    fn absent_metadata_maps_stay_absent() {
        let template: WorkloadTemplate =
            serde_json::from_value(json!({ "spec": { "containers": [] } })).expect("deserialize");
        assert_eq!(template.metadata.labels, None);
        assert_eq!(template.metadata.annotations, None);
    }

    #[test]
    fn builders_fill_metadata_maps() {
        let template = WorkloadTemplate::new(vec![Container::new("app")])
            .with_annotation("a", "1")
            .with_label("l", "2");

        assert_eq!(template.metadata.annotations.as_ref().and_then(|m| m.get("a")).map(String::as_str), Some("1"));
        assert_eq!(template.metadata.labels.as_ref().and_then(|m| m.get("l")).map(String::as_str), Some("2"));
        assert!(template.container("app").is_some());
        assert!(template.container("sidecar").is_none());
    }
}
