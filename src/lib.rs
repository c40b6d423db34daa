//! # awsbreeze
//!
//! A terminal reader for the AWS "What's New" announcement feed that
//! remembers which announcements you have already looked at.
//!
//! ## Architecture
//!
//! awsbreeze follows a pipeline architecture:
//!
//! ```text
//! Fetcher → Normalizer → Synchronizer → Filter → Session → UI
//!                             ↑                      │
//!                           Store ←──── prune on quit ┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! awsbreeze
//!
//! # Print the last week of announcements
//! awsbreeze list --days 7
//!
//! # Read a different feed
//! awsbreeze --url https://example.com/feed.xml
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`domain`]: Core domain models (RawEntry, Item, SeenState)
//! - [`fetcher`]: HTTP retrieval and channel decoding
//! - [`normalizer`]: Entry cleanup and date parsing
//! - [`sync`]: New-item detection
//! - [`filter`]: Day-window filtering
//! - [`session`]: Interactive session state machine
//! - [`store`]: Seen-state persistence
//! - [`tui`]: Terminal user interface

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// normalizer and seen-state store.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `list [--days N] [--new]` - Print the feed without saving state
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/awsbreeze/config.toml`, supporting:
/// - Feed URL and title
/// - Custom colors (named, indexed or hex)
/// - Custom keybindings
pub mod config;

/// Core domain models.
///
/// - [`RawEntry`](domain::RawEntry): One `<item>` as it appears in the feed
/// - [`Item`](domain::Item): A normalized announcement
/// - [`SeenState`](domain::SeenState): Acknowledged GUIDs and the last run time
pub mod domain;

/// Feed retrieval.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for retrieving the raw document
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

pub mod filter;

/// Converts raw entries into [`Item`](domain::Item)s, newest first.
pub mod normalizer;

pub mod session;

/// Seen-state persistence.
///
/// - [`StateStore`](store::StateStore): Load, save and prune-on-exit
/// - [`JsonStore`](store::JsonStore): Single JSON file in the cache directory
pub mod store;

pub mod sync;

/// Terminal user interface built with ratatui.
///
/// Keybindings: j/k navigate, Enter opens, r refreshes, f filters by days,
/// c clears the filter, n marks everything seen, h toggles help, q quits.
pub mod tui;
