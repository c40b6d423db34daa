use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::Result;
use crate::session;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Windows reports releases too
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(AppEvent::Key(key));
                }
                Event::Resize(width, height) => return Ok(AppEvent::Resize(width, height)),
                _ => {}
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    First,
    Last,
    Open,
    Refresh,
    Filter,
    ClearFilter,
    MarkAllSeen,
    ToggleHelp,
    None,
}

impl Action {
    pub fn into_event(self) -> Option<session::Event> {
        let event = match self {
            Action::Quit => session::Event::Quit,
            Action::MoveUp => session::Event::MoveUp,
            Action::MoveDown => session::Event::MoveDown,
            Action::NextPage => session::Event::PageDown,
            Action::PrevPage => session::Event::PageUp,
            Action::First => session::Event::First,
            Action::Last => session::Event::Last,
            Action::Open => session::Event::OpenSelected,
            Action::Refresh => session::Event::Refresh,
            Action::Filter => session::Event::BeginFilter,
            Action::ClearFilter => session::Event::ClearFilter,
            Action::MarkAllSeen => session::Event::MarkAllSeen,
            Action::ToggleHelp => session::Event::ToggleHelp,
            Action::None => return None,
        };
        Some(event)
    }
}

/// Keys while the filter prompt is open. Bypasses the configured bindings so
/// every printable character reaches the input buffer.
pub fn filter_key_event(key: &KeyEvent) -> Option<session::Event> {
    match key.code {
        KeyCode::Enter => Some(session::Event::ConfirmFilter),
        KeyCode::Esc => Some(session::Event::CancelFilter),
        KeyCode::Backspace => Some(session::Event::FilterBackspace),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(session::Event::CancelFilter)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(session::Event::FilterInput(c))
        }
        _ => None,
    }
}
