//! Alerts panel.

use super::{panel_block, render_empty};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, Widget},
};

pub struct AlertsList<'a> {
    alerts: &'a [String],
    offset: usize,
    theme: &'a Theme,
}

impl<'a> AlertsList<'a> {
    pub fn new(alerts: &'a [String], offset: usize, theme: &'a Theme) -> Self {
        Self { alerts, offset, theme }
    }
}

impl Widget for AlertsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!("Alerts ({})", self.alerts.len());
        let block = panel_block(&title, self.theme);
        if self.alerts.is_empty() {
            render_empty(block, "No alerts.", self.theme, area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .alerts
            .iter()
            .skip(self.offset)
            .map(|a| {
                ListItem::new(Line::from(vec![
                    Span::styled("! ", self.theme.alert),
                    Span::raw(a.as_str()),
                ]))
            })
            .collect();

        List::new(items).block(block).render(area, buf);
    }
}
