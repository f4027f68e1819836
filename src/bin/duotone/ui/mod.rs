//! TUI module for duotone
//!
//! One panel per channel, a status bar, and a help line.

mod channel;
mod status;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::ControlSurface;
use channel::render_channel;
use duotone::Channel;
use status::render_status;

/// Render the whole control surface
pub fn render(frame: &mut Frame, surface: &ControlSurface) {
    let area = frame.area();

    // Main layout: status, channels, help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(8),    // Channel panels
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_status(frame, chunks[0], surface.engine());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_channel(
        frame,
        columns[0],
        surface.engine().left(),
        surface.selected() == Channel::Left,
    );
    render_channel(
        frame,
        columns[1],
        surface.engine().right(),
        surface.selected() == Channel::Right,
    );

    let help = Paragraph::new(
        " [l/r/b] Start  [L/R/B] Stop  [Tab] Select  [↑↓] ±1Hz  [[ ]] ±100Hz  [+/-] Volume  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}
