//! Turtle state and operations for bend drawing.

use crate::drawing::Point;
use glam::DVec2;

/// The drawing cursor.
///
/// Tracks position and absolute heading. Headings are in degrees, measured
/// from the positive x-axis, with y growing downward (canvas convention), so
/// positive turns rotate clockwise on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BendTurtle {
    /// Current canvas-space position of the cursor.
    pub position: DVec2,

    /// Current absolute heading in degrees. Never normalized.
    pub heading: f64,
}

impl BendTurtle {
    pub fn new(position: Point, heading: f64) -> Self {
        Self {
            position: position.to_glam(),
            heading,
        }
    }

    /// Unit vector for an absolute heading in degrees.
    pub fn direction(heading: f64) -> DVec2 {
        DVec2::from_angle(heading.to_radians())
    }

    /// The point reached by travelling `length` along `heading` from the cursor.
    pub fn endpoint(&self, length: f64, heading: f64) -> DVec2 {
        self.position + Self::direction(heading) * length
    }

    /// Sets the heading to `heading` and moves `length` along it.
    /// Returns the new position.
    pub fn advance(&mut self, length: f64, heading: f64) -> DVec2 {
        self.position = self.endpoint(length, heading);
        self.heading = heading;
        self.position
    }

    pub fn point(&self) -> Point {
        Point::from_glam(self.position)
    }
}
