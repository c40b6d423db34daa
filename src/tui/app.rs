use ratatui::widgets::ListState;

use crate::domain::SeenState;
use crate::session::{Effect, Event, Session, SessionMode};

pub struct TuiApp {
    pub session: Session,
    pub list_state: ListState,
    pub should_quit: bool,
}

impl TuiApp {
    /// A new app in `Loading`, together with the initial fetch effect.
    pub fn new(seen: SeenState) -> (Self, Option<Effect>) {
        let (session, effect) = Session::start(seen);
        let mut app = Self {
            session,
            list_state: ListState::default(),
            should_quit: false,
        };
        app.sync_list_state();
        (app, effect)
    }

    /// Feed one event through the session and keep the list widget in step.
    pub fn dispatch(&mut self, event: Event) -> Option<Effect> {
        let session = std::mem::take(&mut self.session);
        let (session, effect) = session.update(event);
        self.session = session;
        self.sync_list_state();
        effect
    }

    pub fn is_entering_filter(&self) -> bool {
        self.session.mode == SessionMode::EnteringFilter
    }

    fn sync_list_state(&mut self) {
        if self.session.visible().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.session.selected));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use chrono::Utc;

    fn item(guid: &str) -> Item {
        Item {
            guid: guid.into(),
            title: guid.into(),
            link: format!("https://example.com/{}", guid),
            summary: String::new(),
            pub_date: Utc::now(),
            is_new: false,
        }
    }

    #[test]
    fn test_new_starts_loading_with_fetch() {
        let (app, effect) = TuiApp::new(SeenState::default());
        assert_eq!(effect, Some(Effect::Fetch));
        assert_eq!(app.session.mode, SessionMode::Loading);
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn test_dispatch_tracks_selection() {
        let (mut app, _) = TuiApp::new(SeenState::default());
        app.dispatch(Event::FetchCompleted(vec![item("a"), item("b")]));
        assert_eq!(app.list_state.selected(), Some(0));

        app.dispatch(Event::MoveDown);
        assert_eq!(app.list_state.selected(), Some(1));

        app.dispatch(Event::BeginFilter);
        assert!(app.is_entering_filter());
    }
}
