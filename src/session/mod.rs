//! Interactive session controller.
//!
//! [`Session::update`] is a pure transition: it consumes the current session
//! and one [`Event`], and returns the next session plus at most one
//! [`Effect`] for the caller to carry out. Nothing here touches the terminal,
//! the network or the filesystem.

use chrono::{DateTime, Utc};

use crate::domain::{Item, SeenState};
use crate::filter::{filter_items, parse_days};
use crate::sync::synchronize;

/// Rows taken by one list entry: three lines of text plus a spacer.
pub const ITEM_HEIGHT: u16 = 4;

/// Rows reserved for the title bar, borders and status line.
const CHROME_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Loading,
    Error(String),
    Browsing,
    EnteringFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    FetchCompleted(Vec<Item>),
    FetchFailed(String),
    Refresh,
    OpenSelected,
    MarkAllSeen,
    ClearFilter,
    BeginFilter,
    FilterInput(char),
    FilterBackspace,
    ConfirmFilter,
    CancelFilter,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    First,
    Last,
    ToggleHelp,
    Resize(u16, u16),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start one fetch; its outcome comes back as `FetchCompleted`/`FetchFailed`.
    Fetch,
    /// Hand a link to the system opener.
    OpenUrl(String),
    /// End the session. Carries the GUIDs to prune against, or `None` when
    /// no usable snapshot exists and the stored state must be left alone.
    Quit(Option<Vec<String>>),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub mode: SessionMode,
    pub items: Vec<Item>,
    pub seen: SeenState,
    pub filter_days: u32,
    pub filter_input: String,
    pub selected: usize,
    pub show_help: bool,
    pub page_size: usize,
    fetched: bool,
}

impl Session {
    /// A session in `Loading` together with the fetch that drives it out.
    pub fn start(seen: SeenState) -> (Self, Option<Effect>) {
        let session = Self {
            seen,
            page_size: 1,
            ..Default::default()
        };
        (session, Some(Effect::Fetch))
    }

    /// The items currently on screen, newest first.
    pub fn visible(&self) -> Vec<&Item> {
        self.visible_at(Utc::now())
    }

    pub fn visible_at(&self, now: DateTime<Utc>) -> Vec<&Item> {
        filter_items(&self.items, self.filter_days, now)
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.visible().get(self.selected).copied()
    }

    pub fn new_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_new).count()
    }

    /// GUIDs to prune against at exit, if this session has a usable snapshot.
    ///
    /// Only a successful, non-empty fetch counts.
    pub fn prune_snapshot(&self) -> Option<Vec<String>> {
        if !self.fetched || self.items.is_empty() {
            return None;
        }
        Some(self.items.iter().map(|item| item.guid.clone()).collect())
    }

    pub fn update(mut self, event: Event) -> (Self, Option<Effect>) {
        if let Event::Resize(_, height) = event {
            self.page_size = usize::from((height.saturating_sub(CHROME_HEIGHT) / ITEM_HEIGHT).max(1));
            return (self, None);
        }

        match self.mode {
            SessionMode::Loading => self.update_loading(event),
            SessionMode::Error(_) => self.update_error(event),
            SessionMode::Browsing => self.update_browsing(event),
            SessionMode::EnteringFilter => self.update_filter_entry(event),
        }
    }

    fn update_loading(mut self, event: Event) -> (Self, Option<Effect>) {
        match event {
            Event::FetchCompleted(items) => {
                self.items = synchronize(items, &self.seen);
                self.fetched = true;
                self.mode = SessionMode::Browsing;
                self.clamp_selection();
                (self, None)
            }
            Event::FetchFailed(message) => {
                self.mode = SessionMode::Error(message);
                (self, None)
            }
            Event::Quit => self.quit(),
            _ => (self, None),
        }
    }

    fn update_error(self, event: Event) -> (Self, Option<Effect>) {
        match event {
            Event::Refresh => self.refresh(),
            Event::Quit => self.quit(),
            _ => (self, None),
        }
    }

    fn update_browsing(mut self, event: Event) -> (Self, Option<Effect>) {
        match event {
            Event::Refresh => return self.refresh(),
            Event::Quit => return self.quit(),
            Event::OpenSelected => return self.open_selected(),
            Event::MarkAllSeen => {
                self.seen
                    .mark_all_seen(self.items.iter().map(|item| item.guid.as_str()));
                for item in &mut self.items {
                    item.is_new = false;
                }
                self.clamp_selection();
            }
            Event::ClearFilter => {
                self.filter_days = 0;
                self.clamp_selection();
            }
            Event::BeginFilter => {
                self.filter_input.clear();
                self.mode = SessionMode::EnteringFilter;
            }
            Event::MoveUp => self.selected = self.selected.saturating_sub(1),
            Event::MoveDown => self.select(self.selected.saturating_add(1)),
            Event::PageUp => self.selected = self.selected.saturating_sub(self.page_size),
            Event::PageDown => self.select(self.selected.saturating_add(self.page_size)),
            Event::First => self.selected = 0,
            Event::Last => self.select(usize::MAX),
            Event::ToggleHelp => self.show_help = !self.show_help,
            _ => {}
        }
        (self, None)
    }

    fn update_filter_entry(mut self, event: Event) -> (Self, Option<Effect>) {
        match event {
            Event::FilterInput(c) => self.filter_input.push(c),
            Event::FilterBackspace => {
                self.filter_input.pop();
            }
            Event::ConfirmFilter => {
                self.filter_days = parse_days(&self.filter_input);
                self.mode = SessionMode::Browsing;
                self.clamp_selection();
            }
            Event::CancelFilter => self.mode = SessionMode::Browsing,
            _ => {}
        }
        (self, None)
    }

    fn refresh(mut self) -> (Self, Option<Effect>) {
        self.mode = SessionMode::Loading;
        (self, Some(Effect::Fetch))
    }

    fn quit(self) -> (Self, Option<Effect>) {
        let snapshot = self.prune_snapshot();
        (self, Some(Effect::Quit(snapshot)))
    }

    /// Mark the selected item seen and ask for its link to be opened.
    fn open_selected(mut self) -> (Self, Option<Effect>) {
        let Some((guid, link)) = self
            .selected_item()
            .map(|item| (item.guid.clone(), item.link.clone()))
        else {
            return (self, None);
        };

        self.seen.mark_seen(&guid);
        if let Some(item) = self.items.iter_mut().find(|item| item.guid == guid) {
            item.is_new = false;
        }
        self.clamp_selection();

        let effect = (!link.is_empty()).then_some(Effect::OpenUrl(link));
        (self, effect)
    }

    fn select(&mut self, index: usize) {
        let len = self.visible().len();
        self.selected = index.min(len.saturating_sub(1));
    }

    fn clamp_selection(&mut self) {
        self.select(self.selected);
    }
}
