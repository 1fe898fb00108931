#![allow(missing_docs)]
pub mod gesture_input;
pub mod hologram_registry;
pub mod viewer;

pub use gesture_input::GestureInput;
pub use hologram_registry::HologramRegistry;
pub use viewer::Viewer;
