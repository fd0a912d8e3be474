use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// The popup shown over the board while the game is paused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    selection: PauseOpt,
}

impl Paused {
    /// Size of the popup, border included
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 19;

    pub(super) fn new() -> Paused {
        Paused {
            selection: PauseOpt::min(),
        }
    }

    /// Handle a command.  Returns `Some` if the user made a choice.
    pub(super) fn handle_command(&mut self, cmd: Command) -> Option<PauseOpt> {
        match cmd {
            Command::Esc | Command::Space => return Some(PauseOpt::Resume),
            Command::R => return Some(PauseOpt::Restart),
            Command::M => return Some(PauseOpt::MainMenu),
            Command::Q | Command::Quit => return Some(PauseOpt::Quit),
            Command::Enter => return Some(self.selection),
            Command::Up => self.selection = self.selection.prev().unwrap_or(self.selection),
            Command::Down => self.selection = self.selection.next().unwrap_or(self.selection),
            Command::Next => self.selection = self.selection.next().unwrap_or_else(PauseOpt::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(PauseOpt::max),
            Command::Home => self.selection = PauseOpt::min(),
            Command::End => self.selection = PauseOpt::max(),
            _ => (),
        }
        None
    }
}

/// The choices in the pause menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    Resume,
    Restart,
    MainMenu,
    Quit,
}

impl PauseOpt {
    /// The option's label and its shortcut key
    fn label(self) -> (&'static str, &'static str) {
        match self {
            PauseOpt::Resume => ("Resume", "Esc"),
            PauseOpt::Restart => ("Restart", "r"),
            PauseOpt::MainMenu => ("Main Menu", "m"),
            PauseOpt::Quit => ("Quit", "q"),
        }
    }

    fn to_line(self, selected: bool) -> Line<'static> {
        let (name, key) = self.label();
        let line = Line::from_iter([
            Span::raw(if selected { "» " } else { "  " }),
            Span::raw(name),
            Span::raw(" ("),
            Span::styled(key, consts::KEY_STYLE),
            Span::raw(")"),
        ]);
        if selected {
            line.style(consts::MENU_SELECTION_STYLE)
        } else {
            line
        }
    }
}

impl Widget for Paused {
    /*
     * ┌──── PAUSED ─────┐
     * │ » Resume (Esc)  │
     * │   Restart (r)   │
     * │   Main Menu (m) │
     * │   Quit (q)      │
     * └─────────────────┘
     */
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts() {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_command(Command::Space), Some(PauseOpt::Resume));
        assert_eq!(paused.handle_command(Command::Esc), Some(PauseOpt::Resume));
        assert_eq!(paused.handle_command(Command::R), Some(PauseOpt::Restart));
        assert_eq!(paused.handle_command(Command::M), Some(PauseOpt::MainMenu));
        assert_eq!(paused.handle_command(Command::Q), Some(PauseOpt::Quit));
    }

    #[test]
    fn navigate_and_select() {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_command(Command::Up), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::Resume));
        assert_eq!(paused.handle_command(Command::Down), None);
        assert_eq!(paused.handle_command(Command::Down), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::MainMenu));
        assert_eq!(paused.handle_command(Command::End), None);
        assert_eq!(paused.handle_command(Command::Down), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::Quit));
        assert_eq!(paused.handle_command(Command::Next), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::Resume));
        assert_eq!(paused.handle_command(Command::Prev), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::Quit));
    }
}
