//! Status bar - volume, sample rate, and device health

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use duotone::StereoEngine;

pub fn render_status(frame: &mut Frame, area: Rect, engine: &StereoEngine) {
    let block = Block::default().title(" duotone ").borders(Borders::ALL);

    // Format sample rate nicely (e.g., 48000 -> "48.0kHz")
    let sample_rate_khz = engine.sample_rate() / 1000.0;

    let health = if engine.is_faulted() {
        Span::styled(
            "Device error - restart to reopen output",
            Style::default().fg(Color::Red),
        )
    } else {
        Span::styled("Output OK", Style::default().fg(Color::Green))
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Volume: {:>3.0}%  ", engine.volume() * 100.0),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{sample_rate_khz:.1}kHz  "),
            Style::default().fg(Color::DarkGray),
        ),
        health,
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
