//! Read-only lookups over template annotations and labels.
//!
//! A missing map and a missing key both read as `""`, so predicates only ever
//! test for emptiness.

use crate::domain::WorkloadTemplate;

/// Which metadata map a lookup reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    Annotations,
    Labels,
}

impl MetadataSource {
    pub fn get<'a>(self, template: &'a WorkloadTemplate, key: &str) -> &'a str {
        let map = match self {
            Self::Annotations => template.metadata.annotations.as_ref(),
            Self::Labels => template.metadata.labels.as_ref(),
        };
        map.and_then(|m| m.get(key)).map(String::as_str).unwrap_or("")
    }
}

pub fn annotation<'a>(template: &'a WorkloadTemplate, key: &str) -> &'a str {
    MetadataSource::Annotations.get(template, key)
}

pub fn label<'a>(template: &'a WorkloadTemplate, key: &str) -> &'a str {
    MetadataSource::Labels.get(template, key)
}
