//! Flows panel: one table row per reported flow.

use super::{panel_block, render_empty};
use crate::theme::Theme;
use pcap_agent_core::charts::FlowRow;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Row, Table, Widget},
};

pub struct FlowsTable<'a> {
    rows: &'a [FlowRow],
    offset: usize,
    theme: &'a Theme,
}

impl<'a> FlowsTable<'a> {
    pub fn new(rows: &'a [FlowRow], offset: usize, theme: &'a Theme) -> Self {
        Self { rows, offset, theme }
    }
}

impl Widget for FlowsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!("Flows ({})", self.rows.len());
        let block = panel_block(&title, self.theme);
        if self.rows.is_empty() {
            render_empty(block, "No flows reported.", self.theme, area, buf);
            return;
        }

        let header = Row::new(["Source", "Destination", "Protocol", "Bytes", "Packets"])
            .style(self.theme.table_header);
        let rows = self.rows.iter().skip(self.offset).map(|f| {
            Row::new([
                f.src.as_str(),
                f.dst.as_str(),
                f.protocol.as_str(),
                f.bytes.as_str(),
                f.packets.as_str(),
            ])
        });
        let widths = [
            Constraint::Fill(3),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(10),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .render(area, buf);
    }
}
