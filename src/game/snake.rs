use super::bounds::Bounds;
use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.
///
/// All positions are relative to the top-left corner of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of the cells in the snake's body, with the most recent
    /// at the end
    pub(super) body: VecDeque<Position>,

    /// The maximum length of the snake, head included
    pub(super) max_len: usize,

    /// The direction in which the snake moved on the last tick
    pub(super) direction: Direction,

    /// The direction in which the snake will move on the next tick
    pub(super) next_direction: Direction,
}

impl Snake {
    /// Create a new snake with its head at `head` and facing in `direction`.
    /// The body will be empty, and `max_len` will be set to
    /// [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH].
    pub(super) fn new(head: Position, direction: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            max_len: consts::INITIAL_SNAKE_LENGTH,
            direction,
            next_direction: direction,
        }
    }

    pub(crate) fn head(&self) -> Position {
        self.head
    }

    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Current length, head included
    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterate over every cell the snake occupies, head first
    pub(crate) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().rev().copied())
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    pub(crate) fn bites_itself(&self) -> bool {
        self.body.contains(&self.head)
    }

    /// Glyph for the snake's head.  On a mirrored board, east and west
    /// trade places.
    pub(crate) fn head_symbol(&self, mirrored: bool) -> char {
        let dir = if mirrored {
            self.direction.mirror()
        } else {
            self.direction
        };
        match dir {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Queue a turn for the next tick.  Turning back the way the snake is
    /// currently moving is ignored, even if another turn is already queued.
    pub(super) fn turn(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.next_direction = direction;
        }
    }

    /// Move the snake forwards one cell within `bounds`, first applying any
    /// queued turn.  Returns `false` if the snake was unable to advance due to
    /// hitting a non-wraparound edge, in which case it stays where it is.
    pub(super) fn advance(&mut self, bounds: Bounds) -> bool {
        self.direction = self.next_direction;
        let Some(pos) = self.direction.advance(self.head, bounds) else {
            return false;
        };
        self.body.push_back(self.head);
        self.head = pos;
        while self.body.len() >= self.max_len {
            if self.body.pop_front().is_none() {
                break;
            }
        }
        true
    }

    /// Extend the snake's maximum length in response to eating food
    pub(super) fn grow(&mut self) {
        self.max_len += consts::SNAKE_GROWTH;
    }
}
