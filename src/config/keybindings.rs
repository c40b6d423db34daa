//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub first: Vec<String>,
    pub last: Vec<String>,
    pub open: Vec<String>,
    pub refresh: Vec<String>,
    pub filter: Vec<String>,
    pub clear_filter: Vec<String>,
    pub mark_all_seen: Vec<String>,
    pub toggle_help: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: vec!["q".to_string(), "Ctrl+c".to_string()],
            move_up: vec!["k".to_string(), "Up".to_string()],
            move_down: vec!["j".to_string(), "Down".to_string()],
            next_page: vec!["PageDown".to_string()],
            prev_page: vec!["PageUp".to_string()],
            first: vec!["g".to_string(), "Home".to_string()],
            last: vec!["G".to_string(), "End".to_string()],
            open: vec!["Enter".to_string()],
            refresh: vec!["r".to_string()],
            filter: vec!["f".to_string()],
            clear_filter: vec!["c".to_string()],
            mark_all_seen: vec!["n".to_string()],
            toggle_help: vec!["h".to_string()],
        }
    }
}

impl KeybindingConfig {
    /// Actions in lookup order; the first action with a matching binding wins.
    fn table(&self) -> [(Action, &[String]); 13] {
        [
            (Action::Quit, self.quit.as_slice()),
            (Action::MoveUp, self.move_up.as_slice()),
            (Action::MoveDown, self.move_down.as_slice()),
            (Action::NextPage, self.next_page.as_slice()),
            (Action::PrevPage, self.prev_page.as_slice()),
            (Action::First, self.first.as_slice()),
            (Action::Last, self.last.as_slice()),
            (Action::Open, self.open.as_slice()),
            (Action::Refresh, self.refresh.as_slice()),
            (Action::Filter, self.filter.as_slice()),
            (Action::ClearFilter, self.clear_filter.as_slice()),
            (Action::MarkAllSeen, self.mark_all_seen.as_slice()),
            (Action::ToggleHelp, self.toggle_help.as_slice()),
        ]
    }

    pub fn get_action(&self, key: &KeyEvent) -> Action {
        self.table()
            .into_iter()
            .find(|(_, bindings)| {
                bindings
                    .iter()
                    .filter_map(|b| parse_key_string(b).ok())
                    .any(|binding| binding.matches(key))
            })
            .map_or(Action::None, |(action, _)| action)
    }

    /// Display label for an action: its first configured binding.
    pub fn label<'a>(&self, bindings: &'a [String]) -> &'a str {
        bindings.first().map(String::as_str).unwrap_or("-")
    }

    /// Reject the first binding string that does not name a key.
    pub fn validate(&self) -> Result<(), String> {
        for (action, bindings) in self.table() {
            for binding in bindings {
                parse_key_string(binding).map_err(|e| format!("{:?}: {}", action, e))?;
            }
        }
        Ok(())
    }
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored on the event side so `G` matches a shifted `g` press.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

const NAMED_KEYS: [(&str, KeyCode); 11] = [
    ("enter", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("space", KeyCode::Char(' ')),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
];

/// Parse `"q"`, `"G"`, `"PageDown"` or `"Ctrl+c"` style strings.
///
/// Named keys are matched case-insensitively; single characters are taken
/// literally.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (mods, key) = match s.rsplit_once('+') {
        // a lone "+" or a trailing "++" binds the plus key itself
        Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
        Some(split) => split,
        None => ("", s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in mods.split('+').filter(|p| !p.is_empty()) {
        modifiers |= match part.to_ascii_lowercase().as_str() {
            "ctrl" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    let mut chars = key.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::Char(c),
        _ => NAMED_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, code)| *code)
            .ok_or_else(|| format!("Unknown key: {}", key))?,
    };

    Ok(KeyBinding { code, modifiers })
}
