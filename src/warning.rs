use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::borrow::Cow;
use std::error::Error;

/// A popup describing an error and its chain of causes.  While shown, it
/// takes all input until dismissed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll_offset: usize,
    max_scroll: usize,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Build a warning from an error, following its `source()` chain
    pub(crate) fn from_error(e: &dyn Error) -> Warning {
        tracing::warn!(error = %e, "showing warning");
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_messages(msgs)
    }

    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<WarningOutcome> {
        match (cmd, self.scrolling()) {
            (Command::Enter, _) => return Some(WarningOutcome::Dismissed),
            (Command::Quit, _) => return Some(WarningOutcome::Quit),
            (Command::Up, true) => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            (Command::Down, true) => {
                if self.scroll_offset < self.max_scroll.saturating_sub(1) {
                    self.scroll_offset += 1;
                }
            }
            (Command::Home, true) => self.scroll_offset = 0,
            (Command::End, true) => self.scroll_offset = self.max_scroll.saturating_sub(1),
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.lines.len() > usize::from(Self::MAX_LINES)
    }

    fn wrap_into(lines: &mut Vec<String>, text: &str, first: &str, rest: &str) {
        let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
            .break_words(true)
            .initial_indent(first)
            .subsequent_indent(rest);
        lines.extend(textwrap::wrap(text, opts).into_iter().map(Cow::into_owned));
    }

    fn from_messages(msgs: Vec<String>) -> Warning {
        let mut lines = Vec::new();
        let mut iter = msgs.into_iter();
        let Some(head) = iter.next() else {
            return Warning {
                lines,
                scroll_offset: 0,
                max_scroll: 0,
            };
        };
        Warning::wrap_into(&mut lines, &head, "", "");
        let causes = iter.collect::<Vec<_>>();
        if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            if let [cause] = causes.as_slice() {
                Warning::wrap_into(&mut lines, cause, "    ", "    ");
            } else {
                for (i, cause) in causes.iter().enumerate() {
                    Warning::wrap_into(&mut lines, cause, &format!("{i:>5}: "), "       ");
                }
            }
        }
        let max_scroll = lines
            .len()
            .saturating_sub(usize::from(Warning::MAX_LINES) - 1);
        Warning {
            lines,
            scroll_offset: 0,
            max_scroll,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl Widget for &Warning {
    // `area` is the whole display area; the popup centers itself within it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH.saturating_add(u16::from(self.scrolling()) * 2),
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        let visible = self
            .lines
            .iter()
            .skip(self.scroll_offset)
            .take(usize::from(Warning::MAX_LINES))
            .map(String::as_str);
        if self.scrolling() {
            let [text_area, scrollbar_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                    .flex(Flex::Start)
                    .spacing(1)
                    .areas(text_area);
            Text::from_iter(visible).render(text_area, buf);
            let mut scroll_state =
                ScrollbarState::new(self.max_scroll).position(self.scroll_offset);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(ratatui::symbols::shade::MEDIUM))
                .render(scrollbar_area, buf, &mut scroll_state);
        } else {
            Text::from_iter(visible).render(text_area, buf);
        }
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}
