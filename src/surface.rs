// Seams to the host environment. The browser implementations live in
// `renderer` and `lib`; tests substitute their own.

use crate::color::Color;
use vecmath::Vector2;

/// A 2D drawing target with a settable pixel size.
pub trait Surface {
    type Error;

    fn set_size(&mut self, width: u32, height: u32);

    fn clear(&mut self, width: f64, height: f64);

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    ) -> Result<(), Self::Error>;

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        width: f64,
    ) -> Result<(), Self::Error>;
}

/// Rendered size of the element hosting the surface.
pub trait Viewport {
    fn client_size(&self) -> (u32, u32);
}

/// A frame clock. `next_frame` waits for the next frame and returns false
/// once the host is done producing them.
pub trait FrameSource {
    fn next_frame(&mut self) -> bool;
}

/// Frame source that yields a fixed number of frames back to back.
pub struct FixedFrames {
    remaining: usize,
}

impl FixedFrames {
    pub fn new(frames: usize) -> Self {
        FixedFrames { remaining: frames }
    }
}

impl FrameSource for FixedFrames {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Circle { center: Vector2<f64>, radius: f64, color: Color },
    Line { from: Vector2<f64>, to: Vector2<f64>, color: Color, width: f64 },
}

/// Headless surface that keeps the draw calls of the last frame.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> Vec<DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .copied()
            .collect()
    }
}

impl Surface for RecordingSurface {
    type Error = std::convert::Infallible;

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Circle { center, radius, color });
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        width: f64,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Line { from, to, color, width });
        Ok(())
    }
}
