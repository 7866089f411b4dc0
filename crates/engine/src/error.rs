use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine was constructed without anywhere to draw.
    #[error("no render surface was provided")]
    MissingSurface,
    /// The render surface failed to present a frame.
    #[error(transparent)]
    Surface(#[from] anyhow::Error),
}
