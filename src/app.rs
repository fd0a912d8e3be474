use crate::command::Command;
use crate::game::Game;
use crate::menu::MainMenu;
use crate::util::{get_display_area, Globals};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::read;
use ratatui::{backend::Backend, Frame, Terminal};
use std::collections::VecDeque;
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,

    /// Errors waiting to be shown to the user, oldest first.  The front one
    /// is drawn over the current screen and receives all input.
    warnings: VecDeque<Warning>,
}

impl App {
    pub(crate) fn new(globals: Globals, warnings: Vec<Warning>) -> App {
        App {
            screen: Screen::Main(MainMenu::new(globals)),
            warnings: warnings.into(),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        match self.screen {
            Screen::Main(ref menu) => menu.draw(frame),
            Screen::Game(ref game) => game.draw(frame),
            Screen::Quit => return,
        }
        if let Some(warning) = self.warnings.front() {
            let area = get_display_area(frame.area());
            frame.render_widget(warning, area);
        }
    }

    fn process_input(&mut self) -> io::Result<()> {
        if let Some(warning) = self.warnings.front_mut() {
            if let Some(cmd) = read()?
                .as_key_press_event()
                .and_then(Command::from_key_event)
            {
                match warning.handle_command(cmd) {
                    Some(WarningOutcome::Dismissed) => {
                        self.warnings.pop_front();
                    }
                    Some(WarningOutcome::Quit) => self.screen = Screen::Quit,
                    None => (),
                }
            }
            return Ok(());
        }
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        if let Screen::Game(ref mut game) = self.screen {
            self.warnings.extend(game.take_warning());
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

/// The screen currently being shown
#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(Game),
    Quit,
}
