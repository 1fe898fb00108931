use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{ManipulatorError, ManipulatorResult};

/// A linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Default outline color
    pub const CYAN: Color = Color::rgb(0., 1., 1.);
    /// Active controller color
    pub const YELLOW: Color = Color::rgb(1., 0.92, 0.016);
    /// Highlighted face color
    pub const RED: Color = Color::rgb(1., 0., 0.);
    /// Snapped pivot color
    pub const ORANGE: Color = Color::rgb(1., 0.5, 0.);

    /// An opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1. }
    }
}

/// Something that can visually highlight a hologram's outline.
///
/// The manipulator never draws. It tells a `Highlightable` what should be highlighted and the
/// host decides what that looks like.
pub trait Highlightable: Send + Sync + std::fmt::Debug {
    /// Show the whole outline
    fn show_highlight(&mut self);
    /// Hide the whole outline
    fn hide_highlight(&mut self);
    /// Recolor the whole outline
    fn change_highlight_color(&mut self, color: Color);
    /// Highlight (or stop highlighting) the face with these corners. Exactly 4 points are
    /// expected, anything else is [`ManipulatorError::InvalidFaceHighlight`].
    fn highlight_face(
        &mut self,
        points: &[Vec3],
        highlight: bool,
        normal: Vec3,
    ) -> ManipulatorResult<()>;
    /// Called each frame with the outline segments in world space
    fn place_outline(&mut self, _segments: &[(Vec3, Vec3)], _line_width: f32) {}
}

/// Check the face highlight contract shared by every implementation.
pub fn validate_face_points(points: &[Vec3]) -> ManipulatorResult<[Vec3; 4]> {
    <[Vec3; 4]>::try_from(points).map_err(|_| ManipulatorError::InvalidFaceHighlight {
        points: points.len(),
    })
}

/// The highlight capability of a hologram, as a component.
#[derive(Debug, Default)]
pub enum Highlight {
    /// Ignores every request, apart from validating face highlights
    #[default]
    NoHighlight,
    /// Keeps a colored outline the host can draw
    Outline(OutlineHighlight),
    /// Host supplied implementation
    Custom(Box<dyn Highlightable>),
}

impl Highlightable for Highlight {
    fn show_highlight(&mut self) {
        match self {
            Highlight::NoHighlight => {}
            Highlight::Outline(o) => o.show_highlight(),
            Highlight::Custom(c) => c.show_highlight(),
        }
    }

    fn hide_highlight(&mut self) {
        match self {
            Highlight::NoHighlight => {}
            Highlight::Outline(o) => o.hide_highlight(),
            Highlight::Custom(c) => c.hide_highlight(),
        }
    }

    fn change_highlight_color(&mut self, color: Color) {
        match self {
            Highlight::NoHighlight => {}
            Highlight::Outline(o) => o.change_highlight_color(color),
            Highlight::Custom(c) => c.change_highlight_color(color),
        }
    }

    fn highlight_face(
        &mut self,
        points: &[Vec3],
        highlight: bool,
        normal: Vec3,
    ) -> ManipulatorResult<()> {
        match self {
            Highlight::NoHighlight => validate_face_points(points).map(|_| ()),
            Highlight::Outline(o) => o.highlight_face(points, highlight, normal),
            Highlight::Custom(c) => c.highlight_face(points, highlight, normal),
        }
    }

    fn place_outline(&mut self, segments: &[(Vec3, Vec3)], line_width: f32) {
        match self {
            Highlight::NoHighlight => {}
            Highlight::Outline(o) => o.place_outline(segments, line_width),
            Highlight::Custom(c) => c.place_outline(segments, line_width),
        }
    }
}

/// One drawable line of an outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineSegment {
    /// Start point in world space
    pub start: Vec3,
    /// End point in world space
    pub end: Vec3,
    /// Current color
    pub color: Color,
}

/// Colored line segments around a hologram, ready for the host to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineHighlight {
    /// Segments of the outline
    pub segments: Vec<OutlineSegment>,
    /// Width of each line
    pub line_width: f32,
    /// Should the outline be drawn at all?
    pub visible: bool,
    /// Color of segments that aren't part of a highlighted face
    pub color: Color,
    /// Color of segments bordering a highlighted face
    pub face_color: Color,
    highlighted_face: Option<[Vec3; 4]>,
}

const SEGMENT_MATCH_EPSILON: f32 = 1e-4;

impl OutlineHighlight {
    /// An empty, visible outline
    pub fn new(color: Color, face_color: Color) -> Self {
        Self {
            segments: Vec::new(),
            line_width: 0.,
            visible: true,
            color,
            face_color,
            highlighted_face: None,
        }
    }

    /// Corners of the face currently highlighted, if any
    pub fn highlighted_face(&self) -> Option<[Vec3; 4]> {
        self.highlighted_face
    }

    fn recolor(&mut self) {
        let face_edges = self.highlighted_face.map(|c| {
            [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
        });
        for segment in &mut self.segments {
            let on_face = face_edges.map_or(false, |edges| {
                edges.iter().any(|(a, b)| {
                    (segment.start.abs_diff_eq(*a, SEGMENT_MATCH_EPSILON)
                        && segment.end.abs_diff_eq(*b, SEGMENT_MATCH_EPSILON))
                        || (segment.start.abs_diff_eq(*b, SEGMENT_MATCH_EPSILON)
                            && segment.end.abs_diff_eq(*a, SEGMENT_MATCH_EPSILON))
                })
            });
            segment.color = if on_face { self.face_color } else { self.color };
        }
    }
}

impl Highlightable for OutlineHighlight {
    fn show_highlight(&mut self) {
        self.visible = true;
    }

    fn hide_highlight(&mut self) {
        self.visible = false;
    }

    fn change_highlight_color(&mut self, color: Color) {
        self.color = color;
        self.recolor();
    }

    fn highlight_face(
        &mut self,
        points: &[Vec3],
        highlight: bool,
        _normal: Vec3,
    ) -> ManipulatorResult<()> {
        let corners = validate_face_points(points)?;
        self.highlighted_face = highlight.then_some(corners);
        self.recolor();
        Ok(())
    }

    fn place_outline(&mut self, segments: &[(Vec3, Vec3)], line_width: f32) {
        self.line_width = line_width;
        self.segments = segments
            .iter()
            .map(|(start, end)| OutlineSegment {
                start: *start,
                end: *end,
                color: self.color,
            })
            .collect();
        self.recolor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_highlight_requires_four_points() {
        let mut highlight = Highlight::NoHighlight;
        let result = highlight.highlight_face(&[Vec3::ZERO; 3], true, Vec3::Y);
        assert!(matches!(
            result,
            Err(ManipulatorError::InvalidFaceHighlight { points: 3 })
        ));
        assert!(highlight.highlight_face(&[Vec3::ZERO; 4], true, Vec3::Y).is_ok());

        let mut outline = OutlineHighlight::new(Color::CYAN, Color::RED);
        assert!(outline.highlight_face(&[Vec3::ZERO; 5], true, Vec3::Y).is_err());
        assert!(outline.highlighted_face().is_none());
    }

    #[test]
    fn test_outline_colors_face_edges() {
        let square = [
            Vec3::new(1., 0., 1.),
            Vec3::new(-1., 0., 1.),
            Vec3::new(-1., 0., -1.),
            Vec3::new(1., 0., -1.),
        ];
        let raised = Vec3::new(1., 1., 1.);
        let mut outline = OutlineHighlight::new(Color::CYAN, Color::RED);
        outline.place_outline(
            &[
                (square[0], square[1]),
                (square[2], square[1]),
                (square[0], raised),
            ],
            0.01,
        );

        outline.highlight_face(&square, true, Vec3::Y).unwrap();
        assert_eq!(outline.segments[0].color, Color::RED);
        // Reversed segments still match
        assert_eq!(outline.segments[1].color, Color::RED);
        assert_eq!(outline.segments[2].color, Color::CYAN);

        outline.change_highlight_color(Color::ORANGE);
        assert_eq!(outline.segments[0].color, Color::RED);
        assert_eq!(outline.segments[2].color, Color::ORANGE);

        outline.highlight_face(&square, false, Vec3::Y).unwrap();
        assert!(outline
            .segments
            .iter()
            .all(|segment| segment.color == Color::ORANGE));
    }
}
