//! Environment variable merging.

use crate::domain::{Container, EnvVar};

/// Appends `candidate` unless a variable with the same name already exists.
///
/// Existing entries win regardless of their value, so repeated merges are
/// no-ops. Returns whether the variable was inserted.
pub fn merge(container: &mut Container, candidate: EnvVar) -> bool {
    if container.env_var(&candidate.name).is_some() {
        return false;
    }
    container.env.get_or_insert_with(Vec::new).push(candidate);
    true
}
