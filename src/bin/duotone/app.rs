//! ControlSurface - keyboard control over a running StereoEngine
//!
//! Owns the engine for the length of the session. Every key press maps to
//! one call into the engine's control API; typed frequencies are kept inside
//! the [0, 25000] Hz contract here, since the engine does not check them.

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

use duotone::{Channel, StereoEngine, FREQUENCY_RANGE};

use super::ui;

const FINE_STEP_HZ: f32 = 1.0;
const COARSE_STEP_HZ: f32 = 100.0;
const VOLUME_STEP: f32 = 0.05;

/// Keep a typed frequency inside the accepted range.
pub fn clamp_frequency(hz: f32) -> f32 {
    if hz.is_nan() {
        *FREQUENCY_RANGE.start()
    } else {
        hz.clamp(*FREQUENCY_RANGE.start(), *FREQUENCY_RANGE.end())
    }
}

pub struct ControlSurface {
    engine: StereoEngine,
    selected: Channel,
    should_quit: bool,
}

impl ControlSurface {
    pub fn new(engine: StereoEngine) -> Self {
        Self {
            engine,
            selected: Channel::Left,
            should_quit: false,
        }
    }

    /// Run the UI event loop, then end the audio session.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        let result = self.event_loop(&mut terminal);
        self.engine.end_session();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            let view = &*self;
            terminal.draw(|frame| ui::render(frame, view))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Char('l') => self.engine.start_left(),
            KeyCode::Char('r') => self.engine.start_right(),
            KeyCode::Char('b') => self.engine.start_both(),
            KeyCode::Char('L') => self.engine.stop_left(),
            KeyCode::Char('R') => self.engine.stop_right(),
            KeyCode::Char('B') | KeyCode::Char(' ') => self.engine.stop_both(),

            KeyCode::Tab => {
                self.selected = match self.selected {
                    Channel::Left => Channel::Right,
                    Channel::Right => Channel::Left,
                }
            }
            KeyCode::Up => self.nudge_frequency(FINE_STEP_HZ),
            KeyCode::Down => self.nudge_frequency(-FINE_STEP_HZ),
            KeyCode::Char(']') | KeyCode::PageUp => self.nudge_frequency(COARSE_STEP_HZ),
            KeyCode::Char('[') | KeyCode::PageDown => self.nudge_frequency(-COARSE_STEP_HZ),

            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.engine.set_volumes(self.engine.volume() + VOLUME_STEP)
            }
            KeyCode::Char('-') => self.engine.set_volumes(self.engine.volume() - VOLUME_STEP),
            _ => {}
        }
    }

    fn nudge_frequency(&mut self, delta: f32) {
        let current = self.engine.channel(self.selected).frequency();
        self.engine
            .set_frequency(self.selected, clamp_frequency(current + delta));
    }

    pub fn engine(&self) -> &StereoEngine {
        &self.engine
    }

    pub fn selected(&self) -> Channel {
        self.selected
    }
}
