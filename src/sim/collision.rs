//! Collision detection for the ball game
//!
//! Everything is an axis-aligned rectangle in screen space (y grows downward).
//! A paddle contact reports where on the paddle the ball struck and how far it
//! sank past the face, so the caller can push it back out.

use glam::Vec2;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True when the vertical spans touch or overlap
    #[inline]
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.max.y >= other.min.y && self.min.y <= other.max.y
    }

    #[inline]
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.max.x >= other.min.x && self.min.x <= other.max.x
    }
}

/// Which way a paddle's hitting face points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Left-side paddle, ball arrives from the right
    Right,
    /// Right-side paddle, ball arrives from the left
    Left,
}

impl Face {
    /// Sign of the x push that moves a ball off this face
    pub fn outward(self) -> f32 {
        match self {
            Face::Right => 1.0,
            Face::Left => -1.0,
        }
    }
}

/// Result of a ball/paddle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Ball centre along the paddle span: 0 = top edge, 1 = bottom edge
    pub relative_impact: f32,
    /// How far the ball has crossed the face (for position correction)
    pub penetration: f32,
}

/// Check a ball against a paddle.
///
/// Contact needs the ball inside the paddle's horizontal band (at or past the
/// face but not wholly behind the paddle) and overlapping its vertical span.
pub fn paddle_contact(ball: &Rect, paddle: &Rect, face: Face) -> Option<Contact> {
    if !ball.overlaps_horizontally(paddle) || !ball.overlaps_vertically(paddle) {
        return None;
    }

    let penetration = match face {
        Face::Right => paddle.max.x - ball.min.x,
        Face::Left => ball.max.x - paddle.min.x,
    };
    let relative_impact = ((ball.center().y - paddle.min.y) / paddle.height()).clamp(0.0, 1.0);

    Some(Contact {
        relative_impact,
        penetration: penetration.max(0.0),
    })
}
