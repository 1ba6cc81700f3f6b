//! Overview panel: stat cards on top, protocol and talker bar charts below.

use super::{panel_block, render_empty};
use crate::theme::Theme;
use pcap_agent_core::charts::{ChartData, ChartPoint};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Paragraph, Widget},
};

pub struct Overview<'a> {
    data: &'a ChartData,
    theme: &'a Theme,
}

impl<'a> Overview<'a> {
    pub fn new(data: &'a ChartData, theme: &'a Theme) -> Self {
        Self { data, theme }
    }

    fn render_stats(&self, area: Rect, buf: &mut Buffer) {
        if self.data.stats.is_empty() {
            return;
        }
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(self.data.stats.iter().map(|_| Constraint::Fill(1)))
            .split(area);

        for (card, rect) in self.data.stats.iter().zip(cards.iter()) {
            let block = panel_block(card.label, self.theme)
                .title_style(self.theme.stat_label)
                .border_style(self.theme.border(false));
            Paragraph::new(card.value.as_str())
                .style(self.theme.stat_value)
                .block(block)
                .render(*rect, buf);
        }
    }
}

impl Widget for Overview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Fill(1)])
            .split(area);
        self.render_stats(vert[0], buf);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(vert[1]);

        HorizontalBars {
            title: "Protocols",
            empty: "No protocol data.",
            points: &self.data.protocols,
            max: self.data.max_protocol_value(),
            bar: self.theme.protocol_bar,
            value: self.theme.protocol_value,
            theme: self.theme,
        }
        .render(charts[0], buf);

        HorizontalBars {
            title: "Top talkers",
            empty: "No talker data.",
            points: &self.data.talkers,
            max: self.data.max_talker_value(),
            bar: self.theme.talker_bar,
            value: self.theme.talker_value,
            theme: self.theme,
        }
        .render(charts[1], buf);
    }
}

struct HorizontalBars<'a> {
    title: &'a str,
    empty: &'a str,
    points: &'a [ChartPoint],
    max: u64,
    bar: Style,
    value: Style,
    theme: &'a Theme,
}

impl Widget for HorizontalBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block(self.title, self.theme);
        if self.points.is_empty() {
            render_empty(block, self.empty, self.theme, area, buf);
            return;
        }

        let bars: Vec<Bar> = self
            .points
            .iter()
            .map(|p| {
                Bar::default()
                    .value(p.value)
                    .label(Line::from(p.label.clone()))
                    .text_value(p.display.clone())
                    .style(self.bar)
                    .value_style(self.value)
            })
            .collect();

        BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .max(self.max.max(1))
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}
