//! ConventionHandler - the entry point transports call.
//!
//! Input: the template (mutated in place) and the resolved image metadata.
//! Output: the applied convention ids, or the error that stopped evaluation.

use crate::domain::{ImageMetadata, WorkloadTemplate};
use crate::engine::Evaluator;
use crate::error::DecodeError;

pub trait ConventionHandler: Send + Sync {
    fn handle(
        &self,
        template: &mut WorkloadTemplate,
        images: &[ImageMetadata],
    ) -> Result<Vec<String>, DecodeError>;
}

impl ConventionHandler for Evaluator {
    fn handle(
        &self,
        template: &mut WorkloadTemplate,
        images: &[ImageMetadata],
    ) -> Result<Vec<String>, DecodeError> {
        self.evaluate(template, images)
    }
}

/// Plain functions work as handlers too, which keeps transport tests small.
impl<F> ConventionHandler for F
where
    F: Fn(&mut WorkloadTemplate, &[ImageMetadata]) -> Result<Vec<String>, DecodeError>
        + Send
        + Sync,
{
    fn handle(
        &self,
        template: &mut WorkloadTemplate,
        images: &[ImageMetadata],
    ) -> Result<Vec<String>, DecodeError> {
        self(template, images)
    }
}
