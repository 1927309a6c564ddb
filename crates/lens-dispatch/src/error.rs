use thiserror::Error;

/// Startup-time configuration failures. Fatal to initialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("panel '{key}' is registered more than once")]
    DuplicatePanel { key: &'static str },
    #[error("panel '{key}' has no registered descriptor")]
    MissingPanel { key: &'static str },
    #[error("derived input '{input}' has more than one projection")]
    DuplicateProjection { input: &'static str },
    #[error("panel '{panel}' requires derived input '{input}' which has no projection")]
    UnknownRequiredInput {
        panel: &'static str,
        input: &'static str,
    },
    #[error("derived input '{input}' has no projection")]
    UnknownInput { input: &'static str },
    #[error("default panel '{key}' cannot also be disabled")]
    DisabledDefault { key: &'static str },
}

/// Failures surfaced by a single dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("panel '{panel}' failed to render: {source}")]
    Render {
        panel: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
