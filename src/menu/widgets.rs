use crate::consts;
use crate::game::FoodKind;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// The title shown at the top of the main menu, with a little snake chasing
/// one of each kind of fruit underneath
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const FRUIT_WIDTH: u16 = 24;
    const SNAKE_WIDTH: u16 = 28;
    const SNAKE_BODY_LENGTH: u16 = 12;
    const SNAKE_FRUIT_GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::FRUIT_WIDTH + Self::SNAKE_WIDTH;

    #[rustfmt::skip]
    const FRUIT: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " _____           _ _    ",
         "|  ___| __ _   _(_) |_  ",
         "| |_ | '__| | | | | __| ",
         "|  _|| |  | |_| | | |_  ",
        r"|_|  |_|   \__,_|_|\__| ",
    ];

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];

    /// Width of the row of fruit in the diagram: one glyph per kind, with
    /// spaces in between
    #[allow(clippy::cast_possible_truncation)]
    const FRUIT_ROW_WIDTH: u16 = (FoodKind::LENGTH as u16) * 2 - 1;
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [fruit_area, snake_area] = Layout::horizontal([Self::FRUIT_WIDTH, Self::SNAKE_WIDTH])
            .flex(Flex::Start)
            .areas(words_area);
        Text::from_iter(Self::FRUIT)
            .style(consts::FRUIT_STYLE)
            .render(fruit_area, buf);
        Text::from_iter(Self::SNAKE)
            .style(consts::SNAKE_STYLE)
            .render(snake_area, buf);
        let [body_area, head_area, _, fruits_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::SNAKE_FRUIT_GUTTER),
            Constraint::Length(Self::FRUIT_ROW_WIDTH),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        let mut put = |x: u16, y: u16, symbol: char, style: Style| {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(symbol);
                cell.set_style(style);
            }
        };
        for p in body_area.positions() {
            put(p.x, p.y, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        for p in head_area.positions() {
            put(p.x, p.y, consts::SNAKE_HEAD_EAST_SYMBOL, consts::SNAKE_STYLE);
        }
        for (kind, x) in FoodKind::iter().zip((fruits_area.left()..fruits_area.right()).step_by(2)) {
            put(x, fruits_area.y, kind.symbol(), kind.style());
        }
    }
}

/// How to play
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 7;
    pub(super) const WIDTH: u16 = 20;

    fn keys(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
        let mut line = Line::raw(prefix);
        for (i, k) in keys.into_iter().enumerate() {
            if i > 0 {
                line.push_span(" ");
            }
            line.push_span(Span::styled(k, consts::KEY_STYLE));
        }
        line
    }
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            Self::keys("       ", ["←", "↓", "↑", "→"]),
            Self::keys("   or: ", ["h", "j", "k", "l"]),
            Self::keys("   or: ", ["a", "s", "w", "d"]),
            Line::from_iter([
                Span::raw("Pause: "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(" or "),
                Span::styled("Space", consts::KEY_STYLE),
            ]),
            Line::from("Eat the fruit, but"),
            Line::from("don't hit yourself!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
