use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::config::{ColorConfig, Config, KeybindingConfig};
use crate::domain::Item;
use crate::session::{Session, SessionMode};
use crate::tui::app::TuiApp;

const SUMMARY_WIDTH: usize = 80;
const FILTER_PLACEHOLDER: &str = "Enter number of days (e.g., 7)";

pub fn render(frame: &mut Frame, app: &mut TuiApp, config: &Config) {
    match app.session.mode.clone() {
        SessionMode::Loading => {
            let text = format!(
                "Fetching AWS news...\n\nPress '{}' to quit",
                config.keybindings.label(&config.keybindings.quit)
            );
            frame.render_widget(Paragraph::new(text), frame.area());
        }
        SessionMode::Error(message) => {
            let text = format!(
                "Error: {}\n\nPress '{}' to retry or '{}' to quit",
                message,
                config.keybindings.label(&config.keybindings.refresh),
                config.keybindings.label(&config.keybindings.quit)
            );
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(config.colors.error))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, frame.area());
        }
        SessionMode::Browsing | SessionMode::EnteringFilter => render_browser(frame, app, config),
    }
}

fn render_browser(frame: &mut Frame, app: &mut TuiApp, config: &Config) {
    let colors = &config.colors;
    let footer = footer_lines(&app.session, &config.keybindings);
    let prompt_height = if app.is_entering_filter() { 7 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                   // Title bar
            Constraint::Min(1),                      // Item list
            Constraint::Length(prompt_height),       // Filter prompt
            Constraint::Length(footer.len() as u16), // Status or help
        ])
        .split(frame.area());

    render_title(frame, &app.session, &config.feed.title, chunks[0], colors);
    render_items(frame, app, chunks[1], colors);
    if app.is_entering_filter() {
        render_filter_prompt(frame, &app.session, chunks[2], colors);
    }

    let footer = Paragraph::new(Text::from(footer)).style(Style::default().fg(colors.status_fg));
    frame.render_widget(footer, chunks[3]);
}

fn render_title(frame: &mut Frame, session: &Session, feed_title: &str, area: Rect, colors: &ColorConfig) {
    let visible = session.visible().len();
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", list_title(feed_title, session.filter_days)),
            Style::default()
                .fg(colors.title_fg)
                .bg(colors.title_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} items, {} new", visible, session.new_count()),
            Style::default().fg(colors.item_summary),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_items(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let items: Vec<ListItem> = app
        .session
        .visible()
        .into_iter()
        .map(|item| list_entry(item, colors))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors.border)),
        )
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn list_entry<'a>(item: &'a Item, colors: &ColorConfig) -> ListItem<'a> {
    let title = if item.is_new {
        Span::styled(
            format!("● {}", item.display_title()),
            Style::default()
                .fg(colors.new_item)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(item.display_title(), Style::default().fg(colors.item_title))
    };

    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::styled(
            truncate_summary(&item.summary),
            Style::default().fg(colors.item_summary),
        )),
        Line::from(Span::styled(
            item.pub_date.format("%b %-d, %Y").to_string(),
            Style::default().fg(colors.item_date),
        )),
        Line::from(""),
    ])
}

fn render_filter_prompt(frame: &mut Frame, session: &Session, area: Rect, colors: &ColorConfig) {
    let input = if session.filter_input.is_empty() {
        Span::styled(FILTER_PLACEHOLDER, Style::default().fg(colors.item_summary))
    } else {
        Span::raw(session.filter_input.as_str())
    };

    let text = Text::from(vec![
        Line::from("Filter by days:"),
        Line::from(vec![Span::raw("> "), input]),
        Line::from(""),
        Line::from("Press Enter to apply, Esc to cancel"),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.prompt_border))
        .padding(Padding::horizontal(1));

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn footer_lines(session: &Session, keys: &KeybindingConfig) -> Vec<Line<'static>> {
    if !session.show_help {
        return vec![Line::from(format!(
            "Press '{}' for help",
            keys.label(&keys.toggle_help)
        ))];
    }

    let rows = [
        (
            format!("{}/{}", keys.label(&keys.move_up), keys.label(&keys.move_down)),
            "Navigate items",
        ),
        (
            format!("{}/{}", keys.label(&keys.prev_page), keys.label(&keys.next_page)),
            "Page up/down",
        ),
        (
            format!("{}/{}", keys.label(&keys.first), keys.label(&keys.last)),
            "First/last item",
        ),
        (keys.label(&keys.open).to_string(), "Open selected item in browser"),
        (keys.label(&keys.refresh).to_string(), "Refresh news"),
        (keys.label(&keys.filter).to_string(), "Filter by date (days)"),
        (keys.label(&keys.clear_filter).to_string(), "Clear all filters"),
        (
            keys.label(&keys.mark_all_seen).to_string(),
            "Mark all as seen (clear new indicators)",
        ),
        (keys.label(&keys.toggle_help).to_string(), "Toggle this help"),
        (keys.label(&keys.quit).to_string(), "Quit"),
    ];

    let mut lines = vec![Line::from("Controls:")];
    lines.extend(
        rows.into_iter()
            .map(|(key, what)| Line::from(format!("  {:<12}- {}", key, what))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from("● Green dots indicate new items since last run"));
    lines
}

pub fn list_title(feed_title: &str, filter_days: u32) -> String {
    if filter_days > 0 {
        format!("{} (Last {} days)", feed_title, filter_days)
    } else {
        feed_title.to_string()
    }
}

/// Cut summaries longer than one line down to 77 characters plus an ellipsis.
pub fn truncate_summary(summary: &str) -> String {
    if summary.chars().count() > SUMMARY_WIDTH {
        let mut cut: String = summary.chars().take(SUMMARY_WIDTH - 3).collect();
        cut.push_str("...");
        cut
    } else {
        summary.to_string()
    }
}
