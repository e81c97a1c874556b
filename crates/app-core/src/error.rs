use thiserror::Error;

/// Failures that abort scene construction. Everything past setup is
/// infallible by design; misses and expired effects are normal outcomes,
/// and repeated teardown is a no-op rather than an error.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("mount target not found in document")]
    NoMountTarget,
    #[error("graphics context unavailable: {reason}")]
    NoGraphicsContext { reason: String },
}
