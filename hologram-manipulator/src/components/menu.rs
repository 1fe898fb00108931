use glam::{Quat, Vec3};

/// Where a hologram's menu should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPlacement {
    /// World position
    pub position: Vec3,
    /// World rotation; the menu faces away from the hologram, toward the viewer
    pub rotation: Quat,
    /// Uniform scale
    pub scale: f32,
}

/// Something that shows a menu next to a hologram.
pub trait MenuController: Send + Sync + std::fmt::Debug {
    /// Enable or disable the menu. Disabled during gestures.
    fn set_state(&mut self, enabled: bool);
    /// Move the menu. Called every frame.
    fn place(&mut self, placement: MenuPlacement);
}

/// The menu capability of a hologram, as a component.
#[derive(Debug, Default)]
pub enum Menu {
    /// No menu
    #[default]
    NoMenu,
    /// Remembers where the menu should be so the host can read it back
    Tracked(TrackedMenu),
    /// Host supplied implementation
    Custom(Box<dyn MenuController>),
}

/// A menu that just records its state and placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedMenu {
    /// Is the menu interactive?
    pub enabled: bool,
    /// Last placement, `None` until the first frame
    pub placement: Option<MenuPlacement>,
}

impl Default for TrackedMenu {
    fn default() -> Self {
        Self {
            enabled: true,
            placement: None,
        }
    }
}

impl MenuController for TrackedMenu {
    fn set_state(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn place(&mut self, placement: MenuPlacement) {
        self.placement = Some(placement);
    }
}

impl MenuController for Menu {
    fn set_state(&mut self, enabled: bool) {
        match self {
            Menu::NoMenu => {}
            Menu::Tracked(m) => m.set_state(enabled),
            Menu::Custom(m) => m.set_state(enabled),
        }
    }

    fn place(&mut self, placement: MenuPlacement) {
        match self {
            Menu::NoMenu => {}
            Menu::Tracked(m) => m.place(placement),
            Menu::Custom(m) => m.place(placement),
        }
    }
}
