use super::bounds::Bounds;
use ratatui::layout::Position;

/// A heading on the grid.  North is up the screen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that would leave a non-wrapping grid
    pub(crate) fn advance(self, pos: Position, bounds: Bounds) -> Option<Position> {
        let Position { x, y } = pos;
        let pos = match self {
            Direction::North => Position::new(x, step_back(y, bounds.height, bounds.wrap)?),
            Direction::East => Position::new(step_forward(x, bounds.width, bounds.wrap)?, y),
            Direction::South => Position::new(x, step_forward(y, bounds.height, bounds.wrap)?),
            Direction::West => Position::new(step_back(x, bounds.width, bounds.wrap)?, y),
        };
        Some(pos)
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The direction as seen on a board flipped left-to-right
    pub(crate) fn mirror(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            d => d,
        }
    }
}

fn step_back(v: u16, len: u16, wrap: bool) -> Option<u16> {
    match v.checked_sub(1) {
        Some(v) => Some(v),
        None => wrap.then(|| len.saturating_sub(1)),
    }
}

fn step_forward(v: u16, len: u16, wrap: bool) -> Option<u16> {
    match v.checked_add(1).filter(|&v| v < len) {
        Some(v) => Some(v),
        None => wrap.then_some(0),
    }
}
