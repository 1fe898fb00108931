#![deny(missing_docs)]

//! Bounding boxes, gesture manipulation and snapping for holograms on head-mounted AR displays.
//!
//! A *hologram* is an entity in a [`hecs::World`] that the user can select, see a bounding box
//! around, and then scale, rotate or drag with hand gestures. While dragging, the hologram can snap
//! its pivot or one of its faces onto other holograms or onto spatial surfaces.
//!
//! Rendering and input devices belong to the host. Each frame the host:
//!
//! 1. forwards focus/click events with [`Manipulator::handle_event`]
//! 1. forwards gesture start/update/end callbacks with [`Manipulator::gesture_start`] and friends
//! 1. calls [`Manipulator::update`], then reads [`components::HologramVisuals`] to draw handles,
//!    outlines and menus.
//!
//! Highlighting and menus go through the [`components::Highlightable`] and
//! [`components::MenuController`] capabilities, so the core never draws anything itself.

pub use glam;
pub use hecs;

pub use engine::{Manipulator, ManipulatorBuilder};
pub use manipulator_error::ManipulatorError;

/// Components are data attached to holograms, their content and spatial surfaces
pub mod components;
/// Contexts hold state shared between holograms, like the registry and the viewer pose
pub mod contexts;
mod engine;
mod manipulator_error;
/// Settings recognised by the manipulator
pub mod settings;
/// Cuboid/face model used to snap holograms onto each other and onto spatial surfaces
pub mod snapping;
/// Systems are functions called each frame (or on input events) to update holograms
pub mod systems;
/// Kitchen sink geometry functions
pub mod util;

/// Manipulator result type
pub type ManipulatorResult<T> = std::result::Result<T, ManipulatorError>;

/// Direction the viewer (and any other posed object) faces when its rotation is identity.
/// Follows the OpenXR convention of looking down negative Z.
pub const FORWARD: glam::Vec3 = glam::Vec3::NEG_Z;

/// World up.
pub const UP: glam::Vec3 = glam::Vec3::Y;
