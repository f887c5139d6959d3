//! ConventionRegistry - ordered, immutable set of conventions.
//!
//! # Lifecycle
//! - Built once at startup through `RegistryBuilder` (mutable).
//! - Shared read-only afterwards, usually behind an `Arc`.
//!
//! Registration order is evaluation order. There is no priority system.

use std::fmt;
use std::sync::Arc;

use crate::convention::Convention;
use crate::error::RegistryError;

/// ConventionRegistry holds conventions in registration order.
///
/// # Usage
/// ```ignore
/// let registry = ConventionRegistry::builder()
///     .register(ProbeRule::with_prefix("example.org", ProbeKind::Readiness))?
///     .expect_conventions(&["example.org-readiness"])
///     .build()?;
///
/// for convention in registry.list() {
///     println!("{}", convention.id());
/// }
/// ```
pub struct ConventionRegistry {
    conventions: Vec<Arc<dyn Convention>>,
}

impl ConventionRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Conventions in evaluation order.
    pub fn list(&self) -> &[Arc<dyn Convention>] {
        &self.conventions
    }

    pub fn ids(&self) -> Vec<String> {
        self.conventions.iter().map(|c| c.id().to_string()).collect()
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Convention>> {
        self.conventions.iter().find(|c| c.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }
}

impl fmt::Debug for ConventionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionRegistry")
            .field("conventions", &self.ids())
            .finish()
    }
}

/// RegistryBuilder validates conventions as they are registered.
///
/// # Fail-fast checks
/// - `register()` rejects an id that is already present.
/// - `build()` rejects a registry missing any id passed to `expect_conventions()`.
#[derive(Default)]
pub struct RegistryBuilder {
    conventions: Vec<Arc<dyn Convention>>,
    expected: Option<Vec<String>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            conventions: Vec::new(),
            expected: None,
        }
    }

    pub fn register<C: Convention + 'static>(self, convention: C) -> Result<Self, RegistryError> {
        self.register_arc(Arc::new(convention))
    }

    pub fn register_arc(mut self, convention: Arc<dyn Convention>) -> Result<Self, RegistryError> {
        let id = convention.id();
        if self.conventions.iter().any(|c| c.id() == id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        self.conventions.push(convention);
        Ok(self)
    }

    pub fn expect_conventions(mut self, ids: &[&str]) -> Self {
        self.expected = Some(ids.iter().map(|id| id.to_string()).collect());
        self
    }

    pub fn build(self) -> Result<ConventionRegistry, RegistryError> {
        if let Some(expected) = &self.expected {
            let missing: Vec<String> = expected
                .iter()
                .filter(|id| !self.conventions.iter().any(|c| c.id() == id.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(RegistryError::MissingConventions(missing));
            }
        }
        Ok(ConventionRegistry {
            conventions: self.conventions,
        })
    }
}
