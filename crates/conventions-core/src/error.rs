use thiserror::Error;

/// DecodeError is the one error a convention can raise while applying.
///
/// It aborts the evaluation it happened in and reaches the caller as is.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("probe handler is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("probe handler must set exactly one of exec, httpGet, tcpSocket, grpc (found {found})")]
    Mechanism { found: usize },
}

/// RegistryError is raised while building a `ConventionRegistry`.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("convention '{0}' is already registered")]
    DuplicateId(String),

    #[error("missing conventions: {0:?}. These conventions were expected but not registered.")]
    MissingConventions(Vec<String>),
}
