//! Built-in conventions: probes from annotations, workload name from a label.
//!
//! | id                                  | trigger                          | effect                         |
//! |-------------------------------------|----------------------------------|--------------------------------|
//! | `<prefix>-readiness`                | annotation `<prefix>/readinessProbe` | sets `readinessProbe`      |
//! | `<prefix>-liveness`                 | annotation `<prefix>/livenessProbe`  | sets `livenessProbe`       |
//! | `<prefix>-startup`                  | annotation `<prefix>/startupProbe`   | sets `startupProbe`        |
//! | `<prefix>-carto-run-workload-name`  | label `carto.run/workload-name`      | env `CARTO_RUN_WORKLOAD_NAME` |

use crate::convention::{EnvVarRule, ProbeKind, ProbeRule, Rule};
use crate::error::RegistryError;
use crate::registry::ConventionRegistry;

pub const PREFIX: &str = "garethjevans.org";

pub const WORKLOAD_NAME_LABEL: &str = "carto.run/workload-name";

pub const WORKLOAD_NAME_ENV: &str = "CARTO_RUN_WORKLOAD_NAME";

/// The built-in rules for `prefix`, in evaluation order.
pub fn rules(prefix: &str) -> Vec<Rule> {
    vec![
        ProbeRule::with_prefix(prefix, ProbeKind::Readiness).into(),
        ProbeRule::with_prefix(prefix, ProbeKind::Liveness).into(),
        ProbeRule::with_prefix(prefix, ProbeKind::Startup).into(),
        EnvVarRule::new(
            format!("{prefix}-carto-run-workload-name"),
            WORKLOAD_NAME_LABEL,
            WORKLOAD_NAME_ENV,
        )
        .into(),
    ]
}

pub fn registry_with_prefix(prefix: &str) -> Result<ConventionRegistry, RegistryError> {
    rules(prefix)
        .into_iter()
        .try_fold(ConventionRegistry::builder(), |builder, rule| builder.register(rule))?
        .build()
}

/// The default registry, using [`PREFIX`].
pub fn default_registry() -> Result<ConventionRegistry, RegistryError> {
    registry_with_prefix(PREFIX)
}
