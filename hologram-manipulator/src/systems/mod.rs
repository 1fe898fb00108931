#![allow(missing_docs)]
pub mod gestures;
pub mod hologram;
pub mod init_hologram;
pub mod interaction;
pub mod pivot;
pub mod update_global_transform;

pub use gestures::{gesture_end, gesture_start, gesture_update};
pub use hologram::{hologram_system, menu_placement};
pub use init_hologram::{destroy_hologram, init_hologram, local_bounds};
pub use interaction::{handle_interaction, set_hologram_state, InteractionEvent};
pub use pivot::{original_pivot, relocate_pivot, set_world_pose};
pub use update_global_transform::update_global_transform_system;
