//! Drawing surfaces the renderer paints on.

use crate::geometry::Point;

/// A 2D drawing target measured in pixels.
///
/// Coordinates passed to the drawing calls are model coordinates; a surface
/// multiplies them by every scale currently opened with
/// [`Surface::with_scale`].
pub trait Surface {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    /// Called when the host resizes the surface.
    fn set_size(&mut self, width: f64, height: f64);

    /// Erases everything drawn so far.
    fn clear(&mut self);

    fn stroke_circle(&mut self, center: Point, radius: f64);

    fn fill_circle(&mut self, center: Point, radius: f64);

    fn draw_centered_text(&mut self, position: Point, text: &str);

    fn stroke_line(&mut self, from: Point, to: Point);

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point);

    /// Runs `draw` with an extra uniform scale applied, then restores the
    /// previous transform.
    fn with_scale(&mut self, factor: f64, draw: &mut dyn FnMut(&mut dyn Surface));
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    StrokeCircle { center: Point, radius: f64 },
    FillCircle { center: Point, radius: f64 },
    Text { position: Point, text: String },
    Line { from: Point, to: Point },
    Triangle { points: [Point; 3] },
    PushScale(f64),
    PopScale,
}

/// Keeps the commands of the latest frame instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Commands recorded since the last [`Surface::clear`], starting with it.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of times the surface has been cleared, i.e. frames started.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn triangles(&self) -> Vec<[Point; 3]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Triangle { points } => Some(*points),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius });
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        self.commands.push(DrawCommand::FillCircle { center, radius });
    }

    fn draw_centered_text(&mut self, position: Point, text: &str) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point) {
        self.commands.push(DrawCommand::Triangle { points: [a, b, c] });
    }

    fn with_scale(&mut self, factor: f64, draw: &mut dyn FnMut(&mut dyn Surface)) {
        self.commands.push(DrawCommand::PushScale(factor));
        draw(self);
        self.commands.push(DrawCommand::PopScale);
    }
}
