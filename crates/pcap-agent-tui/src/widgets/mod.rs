//! Ratatui widgets for the pcap-agent dashboard.

pub mod alerts;
pub mod flows_table;
pub mod help;
pub mod overview;
pub mod tab_bar;
pub mod text_view;

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Paragraph, Widget},
};

/// Bordered block with the theme's title style applied.
pub(crate) fn panel_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::bordered()
        .title(format!(" {title} "))
        .title_style(theme.title)
        .border_style(theme.border(true))
}

/// Render a muted one-line message inside `block`, used for empty panels.
pub(crate) fn render_empty(block: Block<'_>, message: &str, theme: &Theme, area: Rect, buf: &mut Buffer) {
    Paragraph::new(message)
        .style(theme.muted)
        .block(block)
        .render(area, buf);
}
