//! Display geometry: which monitor the kiosk window is on and where it goes
//! next.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A rectangle in physical screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (i64, i64) {
        (
            i64::from(self.x) + i64::from(self.width) / 2,
            i64::from(self.y) + i64::from(self.height) / 2,
        )
    }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbouring display.
    pub fn contains(&self, point: (i64, i64)) -> bool {
        let (px, py) = point;
        let left = i64::from(self.x);
        let top = i64::from(self.y);
        px >= left
            && px < left + i64::from(self.width)
            && py >= top
            && py < top + i64::from(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction '{0}', expected 'left' or 'right'")]
pub struct DirectionParseError(pub String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(DirectionParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Index of the first display containing the window's center, 0 if none.
pub fn locate(window: &Rect, displays: &[Rect]) -> usize {
    let center = window.center();
    displays
        .iter()
        .position(|display| display.contains(center))
        .unwrap_or(0)
}

/// Neighbouring display index with wraparound. `None` when there is nowhere
/// to go.
pub fn adjacent(current: usize, direction: Direction, count: usize) -> Option<usize> {
    if count <= 1 {
        return None;
    }
    let current = current % count;
    Some(match direction {
        Direction::Right => (current + 1) % count,
        Direction::Left => (current + count - 1) % count,
    })
}

/// Stale indices (a monitor was unplugged) fall back to the first display.
pub fn clamp_index(index: usize, count: usize) -> usize {
    if index < count {
        index
    } else {
        0
    }
}
