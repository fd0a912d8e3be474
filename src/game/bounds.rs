use ratatui::layout::{Position, Positions, Rect, Size};

/// The playing grid's dimensions and edge behavior
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,

    /// Do positions leaving one edge come back in on the opposite edge?
    pub(crate) wrap: bool,
}

impl Bounds {
    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Iterate over every cell of the grid, row by row
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Manhattan distance between two cells.  When wrapping, each axis is
    /// measured the shorter way around.
    pub(crate) fn distance(self, a: Position, b: Position) -> u32 {
        let axis = |p: u16, q: u16, len: u16| {
            let d = p.abs_diff(q);
            if self.wrap {
                d.min(len.saturating_sub(d))
            } else {
                d
            }
        };
        u32::from(axis(a.x, b.x, self.width)) + u32::from(axis(a.y, b.y, self.height))
    }
}

impl From<(Size, bool)> for Bounds {
    fn from((size, wrap): (Size, bool)) -> Bounds {
        Bounds {
            width: size.width,
            height: size.height,
            wrap,
        }
    }
}
