use thiserror::Error;

/// Everything that can go wrong while setting up or manipulating a hologram.
#[derive(Error, Debug)]
pub enum ManipulatorError {
    /// No settings on the entity and no default settings on the manipulator
    #[error("No ManipulatorSettings found on the hologram and no default settings were provided")]
    MissingSettings,
    /// Neither the hologram nor its children have any render bounds
    #[error("The hologram has no RenderBounds on itself or on any of its children")]
    MissingRenderBounds,
    /// An interactive operation was attempted on a hologram that never finished initializing
    #[error("The hologram has not been initialized")]
    NotInitialized,
    /// A face highlight was requested with the wrong number of points
    #[error("A face is highlighted with exactly 4 points, got {points}")]
    InvalidFaceHighlight {
        /// How many points were provided
        points: usize,
    },
    /// Cuboids have faces 0 to 5
    #[error("A cuboid has 6 faces, there is no face {index}")]
    InvalidFace {
        /// The requested face
        index: usize,
    },
    /// The handle does not exist on this hologram
    #[error("The hologram has no such handle")]
    InvalidHandle,
    /// Division by a zero valued axis
    #[error("Attempted to divide by a zero valued axis")]
    DivideByZero,
    /// The box collapsed on every axis
    #[error("The bounding box is degenerate")]
    DegenerateBounds,
    /// A component lookup failed
    #[error(transparent)]
    Component(#[from] hecs::ComponentError),
    /// The entity was despawned
    #[error(transparent)]
    NoSuchEntity(#[from] hecs::NoSuchEntity),
    /// The entity is missing one of the queried components
    #[error(transparent)]
    QueryOne(#[from] hecs::QueryOneError),
    /// Settings could not be parsed
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Anything else
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
