//! Channel panel - state, frequency, and gain for one side

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use duotone::{engine::ChannelPath, ChannelState};

pub fn render_channel(frame: &mut Frame, area: Rect, path: &ChannelPath, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(format!(" {} ", path.channel()))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // State
            Constraint::Length(1), // Frequency
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Gain
        ])
        .split(inner);

    let (symbol, label, color) = match path.state() {
        ChannelState::Running => ("▶", "Running", Color::Green),
        ChannelState::Idle => ("■", "Idle", Color::Yellow),
    };
    let state = Line::from(vec![Span::styled(
        format!(" {symbol} {label}  (starts: {})", path.starts()),
        Style::default().fg(color),
    )]);
    frame.render_widget(Paragraph::new(state), rows[0]);

    let frequency = Line::from(vec![Span::styled(
        format!(" {:.1} Hz", path.frequency()),
        Style::default().fg(Color::White),
    )]);
    frame.render_widget(Paragraph::new(frequency), rows[1]);

    // Requested gain, not a measured level; idle channels show it dimmed
    let volume = path.volume();
    let gain_color = if path.is_running() {
        Color::Magenta
    } else {
        Color::DarkGray
    };
    let gain = Gauge::default()
        .gauge_style(Style::default().fg(gain_color))
        .ratio(volume.clamp(0.0, 1.0) as f64)
        .label(format!("gain {volume:.2}"));
    frame.render_widget(gain, rows[3]);
}
