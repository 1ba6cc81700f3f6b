//! Scrollable, wrapped text panel used for the report and the prompt.

use super::panel_block;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget, Wrap},
};

pub struct TextView<'a> {
    title: &'a str,
    text: &'a str,
    offset: usize,
    muted: bool,
    theme: &'a Theme,
}

impl<'a> TextView<'a> {
    pub fn new(title: &'a str, text: &'a str, offset: usize, theme: &'a Theme) -> Self {
        Self { title, text, offset, muted: false, theme }
    }

    /// Render the text with the muted style (placeholders).
    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }
}

impl Widget for TextView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block(self.title, self.theme);
        let mut paragraph = Paragraph::new(self.text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.offset.min(u16::MAX as usize) as u16, 0));
        if self.muted {
            paragraph = paragraph.style(self.theme.muted);
        }
        paragraph.render(area, buf);

        let lines = self.text.lines().count();
        if lines > area.height.saturating_sub(2) as usize {
            let mut state = ScrollbarState::new(lines).position(self.offset);
            Scrollbar::new(ScrollbarOrientation::VerticalRight).render(area, buf, &mut state);
        }
    }
}
