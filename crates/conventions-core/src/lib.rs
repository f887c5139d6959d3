//! conventions-core
//!
//! Convention engine for pod templates: rules triggered by annotations or
//! labels that add probes and env vars to containers.
//!
//! # Modules
//! - **domain**: template, container, probe and image metadata model
//! - **metadata**: annotation / label lookups (`""` when absent)
//! - **codec**: probe annotation JSON -> `ProbeHandler`
//! - **env**: idempotent env var merge
//! - **convention**: `Convention` trait, `ProbeRule`, `EnvVarRule`, `Rule`
//! - **registry**: `ConventionRegistry` + fail-fast `RegistryBuilder`
//! - **engine**: `Evaluator`, ordered evaluation with stop-on-error
//! - **builtin**: the default rule set
//! - **handler**: `ConventionHandler`, the contract transports call

pub mod builtin;
pub mod codec;
pub mod convention;
pub mod domain;
pub mod engine;
pub mod env;
pub mod error;
pub mod handler;
pub mod metadata;
pub mod registry;

pub use self::convention::{Convention, EnvVarRule, ProbeKind, ProbeRule, Rule};
pub use self::engine::{Evaluation, Evaluator, Failure};
pub use self::error::{DecodeError, RegistryError};
pub use self::handler::ConventionHandler;
pub use self::registry::{ConventionRegistry, RegistryBuilder};
