use glam::Vec3;

/// One sample of a hand gesture, as reported by the host's input system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureInput {
    /// Hand movement since the gesture started. Rotate gestures read x/y, scale gestures read z.
    pub cumulative_delta: Vec3,
    /// Hand position in world space. Drags follow it.
    pub hand_position: Vec3,
    /// Where the user's gaze hit the hologram. Only read when a drag starts.
    pub gaze_hit: Vec3,
}

impl GestureInput {
    pub fn from_delta(cumulative_delta: Vec3) -> Self {
        Self {
            cumulative_delta,
            ..Default::default()
        }
    }

    pub fn from_hand(hand_position: Vec3, gaze_hit: Vec3) -> Self {
        Self {
            hand_position,
            gaze_hit,
            ..Default::default()
        }
    }
}
