use super::bounds::Bounds;
use crate::consts;
use enum_map::Enum;
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    seq::IteratorRandom,
    Rng,
};
use ratatui::{layout::Position, style::Style};

/// The kinds of food that can appear on the grid
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum FoodKind {
    Normal,
    /// Worth extra points
    Special,
    /// Runs away when the snake gets close
    Fugitive,
    /// Flips the board left-to-right for a while after being eaten
    Mirror,
}

impl FoodKind {
    /// Choose the kind of the next food to spawn.  If `specials` is false,
    /// this is always `Normal`.
    pub(crate) fn draw<R: Rng>(rng: &mut R, specials: bool) -> FoodKind {
        if !specials {
            return FoodKind::Normal;
        }
        let dist = WeightedIndex::new(consts::FOOD_SPAWN_WEIGHTS)
            .expect("FOOD_SPAWN_WEIGHTS should be valid weights");
        FoodKind::from_usize(dist.sample(rng))
    }

    pub(crate) fn points(self) -> u32 {
        match self {
            FoodKind::Normal => consts::NORMAL_FOOD_POINTS,
            FoodKind::Special => consts::SPECIAL_FOOD_POINTS,
            FoodKind::Fugitive => consts::FUGITIVE_FOOD_POINTS,
            FoodKind::Mirror => consts::MIRROR_FOOD_POINTS,
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            FoodKind::Normal => consts::FRUIT_SYMBOL,
            FoodKind::Special => consts::SPECIAL_FRUIT_SYMBOL,
            FoodKind::Fugitive => consts::FUGITIVE_FRUIT_SYMBOL,
            FoodKind::Mirror => consts::MIRROR_FRUIT_SYMBOL,
        }
    }

    pub(crate) fn style(self) -> Style {
        match self {
            FoodKind::Normal => consts::FRUIT_STYLE,
            FoodKind::Special => consts::SPECIAL_FRUIT_STYLE,
            FoodKind::Fugitive => consts::FUGITIVE_FRUIT_STYLE,
            FoodKind::Mirror => consts::MIRROR_FRUIT_STYLE,
        }
    }
}

/// A piece of food on the grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) kind: FoodKind,
    pub(crate) pos: Position,

    /// Ticks remaining before a fugitive may escape again
    pub(crate) cooldown: u32,
}

impl Food {
    pub(crate) fn new(kind: FoodKind, pos: Position) -> Food {
        Food {
            kind,
            pos,
            cooldown: 0,
        }
    }

    /// Place food of the given kind on a random cell for which `occupied`
    /// returns false.  Returns `None` if every cell is occupied.
    pub(crate) fn place<R, F>(
        rng: &mut R,
        kind: FoodKind,
        bounds: Bounds,
        occupied: F,
    ) -> Option<Food>
    where
        R: Rng,
        F: Fn(Position) -> bool,
    {
        random_free_cell(rng, bounds, occupied).map(|pos| Food::new(kind, pos))
    }

    /// Run one tick of fugitive evasion against the snake's cells.  Returns
    /// `true` if the food moved.
    pub(crate) fn evade<R: Rng>(
        &mut self,
        rng: &mut R,
        bounds: Bounds,
        snake: &[Position],
    ) -> bool {
        if self.kind != FoodKind::Fugitive {
            return false;
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return false;
        }
        let nearest = |pos: Position| {
            snake
                .iter()
                .map(|&cell| bounds.distance(pos, cell))
                .min()
                .unwrap_or(u32::MAX)
        };
        if nearest(self.pos) > consts::FUGITIVE_DANGER_RADIUS {
            return false;
        }
        let best = (0..consts::FUGITIVE_ESCAPE_ATTEMPTS)
            .map(|_| random_cell(rng, bounds))
            .filter(|&pos| pos != self.pos && !snake.contains(&pos))
            .map(|pos| (nearest(pos), pos))
            .max_by_key(|&(dist, _)| dist);
        match best {
            Some((dist, pos)) if dist >= consts::FUGITIVE_MIN_ESCAPE_DISTANCE => {
                self.pos = pos;
                self.cooldown = consts::FUGITIVE_COOLDOWN_TICKS;
                true
            }
            _ => false,
        }
    }
}

fn random_cell<R: Rng>(rng: &mut R, bounds: Bounds) -> Position {
    Position::new(
        rng.random_range(0..bounds.width),
        rng.random_range(0..bounds.height),
    )
}

/// Pick a uniformly random free cell, trying random cells first and falling
/// back to a scan of the whole grid
fn random_free_cell<R, F>(rng: &mut R, bounds: Bounds, occupied: F) -> Option<Position>
where
    R: Rng,
    F: Fn(Position) -> bool,
{
    if bounds.width == 0 || bounds.height == 0 {
        return None;
    }
    for _ in 0..consts::MAX_SPAWN_ATTEMPTS {
        let pos = random_cell(rng, bounds);
        if !occupied(pos) {
            return Some(pos);
        }
    }
    bounds.positions().filter(|&pos| !occupied(pos)).choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::EnumExt;
    use enum_map::EnumMap;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Size;
    use std::cell::Cell;

    #[test]
    fn no_specials_means_normal() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x5EED);
        assert!((0..500).all(|_| FoodKind::draw(&mut rng, false) == FoodKind::Normal));
    }

    #[test]
    fn draw_follows_weights() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0F00D);
        let mut counts = EnumMap::<FoodKind, u32>::default();
        for _ in 0..10_000 {
            counts[FoodKind::draw(&mut rng, true)] += 1;
        }
        for (kind, weight) in FoodKind::iter().zip(consts::FOOD_SPAWN_WEIGHTS) {
            let expected = weight * 100;
            assert!(
                counts[kind].abs_diff(expected) < 400,
                "{kind:?}: got {}, expected about {expected}",
                counts[kind]
            );
        }
    }

    #[test]
    fn place_avoids_occupied() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let bounds = Bounds::from((Size::new(4, 3), false));
        let free = Position::new(2, 1);
        for _ in 0..20 {
            let food = Food::place(&mut rng, FoodKind::Special, bounds, |p| p != free).unwrap();
            assert_eq!(food.pos, free);
            assert_eq!(food.kind, FoodKind::Special);
        }
    }

    #[test]
    fn place_scans_after_random_misses() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        let bounds = Bounds::from((Size::new(4, 3), false));
        let free = Position::new(3, 0);
        // Every random try lands on an "occupied" cell, forcing the scan.
        let checks = Cell::new(0);
        let occupied = |p: Position| {
            checks.set(checks.get() + 1);
            checks.get() <= consts::MAX_SPAWN_ATTEMPTS || p != free
        };
        let food = Food::place(&mut rng, FoodKind::Normal, bounds, occupied).unwrap();
        assert_eq!(food.pos, free);
        assert!(checks.get() > consts::MAX_SPAWN_ATTEMPTS);
    }

    #[test]
    fn place_on_full_board() {
        let mut rng = ChaCha12Rng::seed_from_u64(2);
        let bounds = Bounds::from((Size::new(4, 3), false));
        assert_eq!(Food::place(&mut rng, FoodKind::Normal, bounds, |_| true), None);
    }

    #[test]
    fn fugitive_flees_when_close() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let bounds = Bounds::from((Size::new(20, 10), false));
        let snake = [Position::new(4, 4), Position::new(3, 4)];
        let mut food = Food::new(FoodKind::Fugitive, Position::new(6, 4));
        assert!(food.evade(&mut rng, bounds, &snake));
        assert!(snake.iter().all(|&p| bounds.distance(p, food.pos) >= 3));
        assert_eq!(food.cooldown, consts::FUGITIVE_COOLDOWN_TICKS);
    }

    #[test]
    fn fugitive_stays_without_a_far_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(8);
        let bounds = Bounds::from((Size::new(3, 3), false));
        let snake = [Position::new(1, 1)];
        let mut food = Food::new(FoodKind::Fugitive, Position::new(2, 1));
        assert!(!food.evade(&mut rng, bounds, &snake));
        assert_eq!(food.pos, Position::new(2, 1));
        assert_eq!(food.cooldown, 0);
    }

    #[test]
    fn fugitive_sees_across_wrapped_edge() {
        let snake = [Position::new(0, 4)];
        let start = Position::new(19, 4);

        let mut rng = ChaCha12Rng::seed_from_u64(9);
        let walled = Bounds::from((Size::new(20, 10), false));
        let mut food = Food::new(FoodKind::Fugitive, start);
        assert!(!food.evade(&mut rng, walled, &snake));
        assert_eq!(food.pos, start);

        let wrapped = Bounds::from((Size::new(20, 10), true));
        let mut food = Food::new(FoodKind::Fugitive, start);
        assert!(food.evade(&mut rng, wrapped, &snake));
        assert!(wrapped.distance(snake[0], food.pos) >= consts::FUGITIVE_MIN_ESCAPE_DISTANCE);
    }

    #[test]
    fn fugitive_ignores_distant_snake() {
        let mut rng = ChaCha12Rng::seed_from_u64(4);
        let bounds = Bounds::from((Size::new(20, 10), false));
        let snake = [Position::new(4, 4)];
        let mut food = Food::new(FoodKind::Fugitive, Position::new(8, 4));
        assert!(!food.evade(&mut rng, bounds, &snake));
        assert_eq!(food.pos, Position::new(8, 4));
    }

    #[test]
    fn fugitive_cooldown() {
        let mut rng = ChaCha12Rng::seed_from_u64(5);
        let bounds = Bounds::from((Size::new(20, 10), false));
        let snake = [Position::new(4, 4)];
        let mut food = Food {
            kind: FoodKind::Fugitive,
            pos: Position::new(5, 4),
            cooldown: 2,
        };
        assert!(!food.evade(&mut rng, bounds, &snake));
        assert!(!food.evade(&mut rng, bounds, &snake));
        assert_eq!(food.cooldown, 0);
        assert!(food.evade(&mut rng, bounds, &snake));
    }

    #[test]
    fn other_kinds_stay_put() {
        let mut rng = ChaCha12Rng::seed_from_u64(6);
        let bounds = Bounds::from((Size::new(20, 10), false));
        let snake = [Position::new(4, 4)];
        let mut food = Food::new(FoodKind::Special, Position::new(5, 4));
        assert!(!food.evade(&mut rng, bounds, &snake));
        assert_eq!(food.pos, Position::new(5, 4));
    }
}
