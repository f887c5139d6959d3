//! Evaluator - runs a registry against one workload template.
//!
//! # Algorithm
//! 1. Walk the registry in order.
//! 2. Skip conventions whose predicate is false.
//! 3. Apply the rest; record each id once, after its `apply` succeeds.
//! 4. Stop at the first error. Nothing is rolled back: earlier conventions
//!    (and containers the failing one already touched) stay mutated.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{ImageMetadata, WorkloadTemplate};
use crate::error::DecodeError;
use crate::registry::ConventionRegistry;

/// Failure records which convention stopped an evaluation.
#[derive(Debug)]
pub struct Failure {
    pub convention: String,
    pub error: DecodeError,
}

/// Evaluation is the full report of one run, including partial progress.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub applied: Vec<String>,
    pub failure: Option<Failure>,
}

impl Evaluation {
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }

    /// Applied ids, or the convention's error as it was raised.
    pub fn into_result(self) -> Result<Vec<String>, DecodeError> {
        match self.failure {
            Some(failure) => Err(failure.error),
            None => Ok(self.applied),
        }
    }
}

/// Runs every convention of `registry` against `template`.
pub fn run(
    registry: &ConventionRegistry,
    template: &mut WorkloadTemplate,
    images: &[ImageMetadata],
) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for convention in registry.list() {
        let id = convention.id();
        if !convention.is_applicable(template, images) {
            debug!(convention = %id, "not applicable");
            continue;
        }

        match convention.apply(template, images) {
            Ok(()) => {
                info!(convention = %id, "applied");
                evaluation.applied.push(id.to_string());
            }
            Err(error) => {
                warn!(convention = %id, %error, "convention failed, stopping evaluation");
                evaluation.failure = Some(Failure {
                    convention: id.to_string(),
                    error,
                });
                break;
            }
        }
    }
    evaluation
}

/// Same as [`run`], reduced to `(applied ids | error)`.
pub fn evaluate(
    registry: &ConventionRegistry,
    template: &mut WorkloadTemplate,
    images: &[ImageMetadata],
) -> Result<Vec<String>, DecodeError> {
    run(registry, template, images).into_result()
}

/// Evaluator owns a shared handle to the registry it evaluates.
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: Arc<ConventionRegistry>,
}

impl Evaluator {
    pub fn new(registry: Arc<ConventionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ConventionRegistry {
        &self.registry
    }

    pub fn run(&self, template: &mut WorkloadTemplate, images: &[ImageMetadata]) -> Evaluation {
        run(&self.registry, template, images)
    }

    pub fn evaluate(
        &self,
        template: &mut WorkloadTemplate,
        images: &[ImageMetadata],
    ) -> Result<Vec<String>, DecodeError> {
        evaluate(&self.registry, template, images)
    }
}
