mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::util::{get_display_area, EnumExt, Globals};
use crate::warning::Warning;
use crossterm::event::{read, Event};
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};

/// The title screen, where the player picks options and starts a game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: Selection,
    options: OptionsMenu,
    globals: Globals,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> Self {
        MainMenu {
            selection: Selection::default(),
            options: OptionsMenu::new(globals.options),
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match cmd {
            Command::Quit | Command::Q => return Some(Screen::Quit),
            Command::P => return Some(Screen::Game(self.play())),
            Command::Home => self.select(Selection::PlayButton, None),
            Command::End => self.select(Selection::QuitButton, None),
            _ => match self.selection {
                Selection::PlayButton => return self.on_play_button(cmd),
                Selection::Options => self.on_options(cmd),
                Selection::QuitButton => return self.on_quit_button(cmd),
            },
        }
        None
    }

    fn on_play_button(&mut self, cmd: Command) -> Option<Screen> {
        match cmd {
            Command::Enter => return Some(Screen::Game(self.play())),
            Command::Prev => self.select(Selection::QuitButton, None),
            Command::Down | Command::Next => self.select(Selection::Options, Some(true)),
            _ => (),
        }
        None
    }

    fn on_quit_button(&mut self, cmd: Command) -> Option<Screen> {
        match cmd {
            Command::Enter => return Some(Screen::Quit),
            Command::Next => self.select(Selection::PlayButton, None),
            Command::Up | Command::Prev => self.select(Selection::Options, Some(false)),
            _ => (),
        }
        None
    }

    /// Moving past either end of the options list lands on the neighboring
    /// button
    fn on_options(&mut self, cmd: Command) {
        let leave = match cmd {
            Command::Up | Command::Prev => self.options.step(false),
            Command::Down | Command::Next => self.options.step(true),
            Command::Left => {
                self.options.adjust(OptValue::decrease);
                None
            }
            Command::Right => {
                self.options.adjust(OptValue::increase);
                None
            }
            Command::Space | Command::Enter => {
                self.options.adjust(OptValue::toggle);
                None
            }
            _ => None,
        };
        if let Some(sel) = leave {
            self.select(sel, None);
        }
    }

    /// Start a game with the chosen options, first saving them to disk if so
    /// configured
    fn play(&self) -> Game {
        let mut globals = self.globals.clone();
        globals.options = self.options.to_options();
        let warning = globals
            .config
            .save_options(globals.options)
            .err()
            .map(|e| Warning::from_error(&e));
        Game::new(globals).with_warning(warning)
    }

    fn select(&mut self, selection: Selection, first_option: Option<bool>) {
        self.selection = selection;
        self.options.selection = match (selection, first_option) {
            (Selection::Options, Some(true)) => Some(OptKey::min()),
            (Selection::Options, Some(false)) => Some(OptKey::max()),
            _ => None,
        };
    }

    /// The line under the options panel reporting the high score for the
    /// options as currently set
    fn best_line(&self) -> Line<'static> {
        match self.globals.high_scores.get(self.options.to_options()) {
            Some(best) => Line::from(format!("Your best: {best}")),
            None => Line::from("No high score yet"),
        }
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, options_area, best_area, quit_area] =
            Layout::vertical([
                Logo::HEIGHT,
                Instructions::HEIGHT,
                1,
                OptionsMenu::HEIGHT,
                1,
                1,
            ])
            .flex(Flex::Start)
            .spacing(1)
            .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        button("Play", "p", self.selection == Selection::PlayButton).render(play_area, buf);

        let [options_area] = Layout::horizontal([OptionsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(options_area);
        (&self.options).render(options_area, buf);

        self.best_line().centered().render(best_area, buf);

        button("Quit", "q", self.selection == Selection::QuitButton).render(quit_area, buf);
    }
}

/// A centered `[Label (k)]` button
fn button(label: &'static str, key: &'static str, selected: bool) -> Line<'static> {
    let style = if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    };
    Line::from_iter([
        Span::styled("[", style),
        Span::styled(label, style),
        Span::styled(" (", style),
        Span::styled(key, consts::KEY_STYLE.patch(style)),
        Span::styled(")]", style),
    ])
    .centered()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    Options,
    QuitButton,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct OptionsMenu {
    /// The key of the selected row, if the cursor is inside the panel
    selection: Option<OptKey>,
    settings: EnumMap<OptKey, OptValue>,
}

impl OptionsMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2;
    const HORIZONTAL_PADDING: u16 = 1;
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const WIDTH: u16 = 2
        + 2 * Self::HORIZONTAL_PADDING
        + Self::POINTER_WIDTH
        + OptKey::DISPLAY_WIDTH
        + Self::LABEL_VALUE_GUTTER
        + OptValue::DISPLAY_WIDTH;

    fn new(options: Options) -> Self {
        OptionsMenu {
            selection: None,
            settings: EnumMap::from_fn(|key| options.get(key)),
        }
    }

    fn to_options(&self) -> Options {
        let mut opts = Options::default();
        for (key, &value) in &self.settings {
            opts.set(key, value);
        }
        opts
    }

    /// Move the cursor one row up or down.  Returns the button to select
    /// when the cursor runs off the end of the list.
    fn step(&mut self, down: bool) -> Option<Selection> {
        let cur = self.selection?;
        self.selection = if down { cur.next() } else { cur.prev() };
        match (self.selection, down) {
            (Some(_), _) => None,
            (None, false) => Some(Selection::PlayButton),
            (None, true) => Some(Selection::QuitButton),
        }
    }

    /// Change the value in the selected row
    fn adjust(&mut self, edit: fn(&mut OptValue)) {
        if let Some(key) = self.selection {
            edit(&mut self.settings[key]);
        }
    }
}

impl Widget for &OptionsMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(OptionsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for ((key, value), row) in self.settings.iter().zip(menu_area.rows()) {
            let selected = Some(key) == self.selection;
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(OptionsMenu::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(OptionsMenu::LABEL_VALUE_GUTTER),
            );
            if selected {
                Span::styled(s, consts::MENU_SELECTION_STYLE).render(row, buf);
            } else {
                Span::raw(s).render(row, buf);
            }
        }
    }
}
