//! pyrev — AI-assisted Python code review TUI.
//!
//! Entry point for the `pyrev` binary. Wires together the terminal lifecycle
//! (`tui`), unified event bus (`event`), the two-view UI (`ui`), the theme
//! system (`theme`), and the review engine (`pyrev-core`).
//!
//! # Startup sequence (order matters)
//!
//! 1. Load config from XDG path — read-only, safe before terminal init.
//! 2. `install_panic_hook()` — installed first so it is the innermost hook.
//!    Restores the terminal before the panic message prints.
//! 3. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the event loop.
//! 4. `highlight::warm_up()` — loads the syntect syntax/theme sets once so the
//!    first submission does not pay the multi-hundred-ms load inside a frame.
//! 5. `init_tui()` — enters alternate screen and enables raw mode.
//! 6. Create event channel, `spawn_event_task()`, and spawn the review worker
//!    thread. The blocking HTTP client is built inside the worker thread and
//!    never touches the tokio runtime.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (normal quit, 'q' key,
//! SIGTERM, or `None` channel close). The `?` operator is only used before
//! `init_tui()` or inside the Render arm — draw errors propagate out of the
//! loop and reach `restore_tui()` after `break`. The panic hook covers
//! unexpected panics.

mod app;
mod event;
mod highlight;
mod review;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use serde::Deserialize;

use pyrev_core::review::{ReviewClient, API_KEY_ENV, DEFAULT_API_BASE, DEFAULT_MODEL};

/// Optional settings read from `~/.config/pyrev/config.toml`.
///
/// Every field falls back to a default, so a missing or partial file is
/// always valid.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    /// Theme name passed to `Theme::from_name` (`dark` default).
    theme: Option<String>,
    /// Model identifier sent with every review request.
    model: Option<String>,
    /// Base URL of the chat-completions service.
    api_base: Option<String>,
}

/// Returns the path to the pyrev config file.
///
/// Prefers `$XDG_CONFIG_HOME/pyrev/config.toml`; falls back to
/// `~/.config/pyrev/config.toml` when the env var is absent.
fn config_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| std::path::PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| std::path::PathBuf::from(".config"));
    base.join("pyrev").join("config.toml")
}

/// Loads [`Config`] from disk.
///
/// Returns the default config if the file does not exist or cannot be parsed.
/// Never panics — config errors are soft failures printed to stderr.
fn load_config() -> Config {
    let path = config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pyrev: config parse error in {path:?}: {e}");
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 0: load config — read-only, safe before terminal init.
    let config = load_config();
    let theme = theme::Theme::from_name(config.theme.as_deref().unwrap_or("dark"));
    let model = config.model.unwrap_or_else(|| DEFAULT_MODEL.to_owned());
    let api_base = config.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_owned());

    let mut state = app::AppState::default();
    state.key_configured = std::env::var(API_KEY_ENV).is_ok_and(|k| !k.is_empty());

    // Step 1: panic hook installed first — innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 2: SIGTERM flag — polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 3: pre-load the syntect syntax and theme sets.
    highlight::warm_up();

    // Step 4: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 5: create event channel and spawn the background event task.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    // Step 6: spawn the review worker thread. The blocking reqwest client is
    // not async-safe, so it is constructed inside the thread that drives it.
    let (review_tx, review_rx) = crossbeam_channel::unbounded();
    let worker_event_tx = handler.tx.clone();
    std::thread::spawn(move || {
        let client = ReviewClient::from_env(model, api_base);
        review::worker::review_worker_loop(client, review_rx, worker_event_tx);
    });
    state.review_tx = Some(review_tx);

    // Event loop — exits only via `break`, never via `?` (except the Render
    // arm, whose draw errors break out and still reach restore_tui()).
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms,
            // even when no crossterm/tick/render events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        // Exactly one draw() call per Render event — never elsewhere.
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if ui::keybindings::handle_key(key, &mut state)
                            == ui::keybindings::KeyAction::Quit
                        {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        let _ = ui::keybindings::handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::Tick) => {
                        state.on_tick();
                    }
                    Some(event::AppEvent::ReviewResult(payload)) => {
                        state.apply_review_result(*payload);
                    }
                    Some(event::AppEvent::Resize(_, _)) => {
                        // Handled automatically by ratatui on the next Render:
                        // frame.area() returns the new terminal size.
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                // Check SIGTERM after every event too, not just on the heartbeat,
                // so quit latency is at most one event cycle rather than 50ms.
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Restore the terminal at the single exit point of the loop.
    // Covers normal quit, 'q' key, SIGTERM, and channel close. The panic hook
    // handles the panic path separately.
    tui::restore_tui()?;
    Ok(())
}
