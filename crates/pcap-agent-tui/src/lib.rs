//! pcap-agent TUI — ratatui dashboard for a finished analysis.
//!
//! The dashboard is read-only: it shows the chart data, the prompt that was
//! sent and the model's report. It never talks to the network.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use pcap_agent_core::ChartData;

/// Everything the dashboard displays.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    /// Shown in the tab bar, usually the capture file name.
    pub title: String,
    pub charts: ChartData,
    pub prompt: String,
    pub report: Option<String>,
}

/// Open the dashboard and block until the user quits.
pub fn run(dashboard: Dashboard, theme_name: &str) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(theme_name);
    App::new(dashboard, theme).run()
}
