pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::session::{Effect, Event};

use self::app::TuiApp;
use self::event::{filter_key_event, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<Event>();

    let (mut tui_app, effect) = TuiApp::new(ctx.store.load());
    tracing::info!(
        "Loaded seen-state with {} entries",
        tui_app.session.seen.len()
    );
    if let Ok((width, height)) = terminal::size() {
        tui_app.dispatch(Event::Resize(width, height));
    }
    run_effect(&mut tui_app, effect, &ctx, &fetch_tx);

    while !tui_app.should_quit {
        drain_fetch_results(&mut tui_app, &mut fetch_rx, &ctx, &fetch_tx);
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config))?;

        let event = match event_handler.next()? {
            AppEvent::Key(key) if tui_app.is_entering_filter() => filter_key_event(&key),
            AppEvent::Key(key) => config.keybindings.get_action(&key).into_event(),
            AppEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            AppEvent::Tick => None,
        };

        if let Some(event) = event {
            let effect = tui_app.dispatch(event);
            run_effect(&mut tui_app, effect, &ctx, &fetch_tx);
        }
    }

    Ok(())
}

/// Apply every fetch outcome that has arrived since the last frame.
fn drain_fetch_results(
    tui_app: &mut TuiApp,
    fetch_rx: &mut mpsc::UnboundedReceiver<Event>,
    ctx: &Arc<AppContext>,
    fetch_tx: &mpsc::UnboundedSender<Event>,
) {
    while let Ok(event) = fetch_rx.try_recv() {
        let effect = tui_app.dispatch(event);
        run_effect(tui_app, effect, ctx, fetch_tx);
    }
}

fn run_effect(
    tui_app: &mut TuiApp,
    effect: Option<Effect>,
    ctx: &Arc<AppContext>,
    fetch_tx: &mpsc::UnboundedSender<Event>,
) {
    match effect {
        None => {}
        Some(Effect::Fetch) => spawn_fetch(ctx.clone(), fetch_tx.clone()),
        Some(Effect::OpenUrl(url)) => {
            tracing::debug!("Opening {}", url);
            if let Err(e) = open::that_detached(&url) {
                tracing::warn!("Failed to open {}: {}", url, e);
            }
        }
        Some(Effect::Quit(snapshot)) => {
            match snapshot {
                Some(guids) => {
                    if let Err(e) = ctx.store.prune_and_save(&tui_app.session.seen, &guids) {
                        tracing::warn!("Failed to save seen-state: {}", e);
                    }
                }
                None => tracing::info!("No feed snapshot this session, leaving seen-state untouched"),
            }
            tui_app.should_quit = true;
        }
    }
}

fn spawn_fetch(ctx: Arc<AppContext>, tx: mpsc::UnboundedSender<Event>) {
    tokio::spawn(async move {
        let event = match ctx.fetch_items().await {
            Ok(items) => Event::FetchCompleted(items),
            Err(e) => {
                tracing::warn!("Feed fetch failed: {}", e);
                Event::FetchFailed(e.to_string())
            }
        };
        // receiver gone means the session already ended
        let _ = tx.send(event);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BreezeError;
    use crate::domain::{Item, SeenState};
    use crate::fetcher::Fetcher;
    use crate::session::SessionMode;
    use crate::store::StateStore;
    use async_trait::async_trait;
    use chrono::Utc;

    struct OfflineFetcher;

    #[async_trait]
    impl Fetcher for OfflineFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Err(BreezeError::HttpStatus(503))
        }
    }

    struct MemoryStore;

    impl StateStore for MemoryStore {
        fn load(&self) -> SeenState {
            SeenState::default()
        }

        fn save(&self, _state: &SeenState) -> Result<()> {
            Ok(())
        }
    }

    fn context() -> Arc<AppContext> {
        Arc::new(AppContext::with_parts(
            "https://example.com/feed",
            Arc::new(OfflineFetcher),
            Arc::new(MemoryStore),
        ))
    }

    #[tokio::test]
    async fn test_drain_applies_pending_fetch_results() {
        let ctx = context();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mut tui_app, _) = TuiApp::new(SeenState::default());

        tx.send(Event::FetchCompleted(vec![Item {
            guid: "a".into(),
            title: "Launch".into(),
            link: "https://example.com/a".into(),
            summary: String::new(),
            pub_date: Utc::now(),
            is_new: false,
        }]))
        .unwrap();

        drain_fetch_results(&mut tui_app, &mut rx, &ctx, &tx);
        assert_eq!(tui_app.session.mode, SessionMode::Browsing);
        assert_eq!(tui_app.session.items.len(), 1);
        assert_eq!(tui_app.list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_drain_with_nothing_pending_keeps_loading() {
        let ctx = context();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mut tui_app, _) = TuiApp::new(SeenState::default());

        drain_fetch_results(&mut tui_app, &mut rx, &ctx, &tx);
        assert_eq!(tui_app.session.mode, SessionMode::Loading);
    }

    #[tokio::test]
    async fn test_spawned_fetch_failure_reaches_session() {
        let ctx = context();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mut tui_app, effect) = TuiApp::new(SeenState::default());

        run_effect(&mut tui_app, effect, &ctx, &tx);
        let event = rx.recv().await.unwrap();
        tui_app.dispatch(event);
        assert!(matches!(tui_app.session.mode, SessionMode::Error(_)));
    }
}
