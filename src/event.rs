//! Terminal event handling for the interactive timers.
//!
//! This module provides an event loop that delivers key presses and periodic
//! tick events for redrawing. Events are polled in a background thread and
//! delivered through a channel; the thread exits once the receiver is dropped.

use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Terminal events that drive the timers.
#[derive(Debug)]
pub enum Event {
    /// Keyboard input event.
    Key(KeyEvent),
    /// Periodic tick for redraws.
    Tick,
}

/// Handles terminal events in a background thread.
///
/// Spawns a thread that polls for key presses and sends them through a
/// channel, along with periodic tick events.
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Creates a new event handler with the specified tick rate.
    ///
    /// # Arguments
    ///
    /// * `tick_rate_ms` - Milliseconds between tick events
    #[must_use]
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    if let Ok(CrosstermEvent::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press && sender.send(Event::Key(key)).is_err() {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { receiver }
    }

    /// Blocks until the next event is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is disconnected.
    pub fn next(&self) -> Result<Event> {
        Ok(self.receiver.recv()?)
    }
}

/// Whether a key press should stop a running timer.
#[must_use]
pub fn is_cancel(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Raw mode for the lifetime of the guard.
///
/// Raw mode disables line buffering and echo so single key presses arrive
/// immediately. It is restored on drop, including on early returns.
pub struct RawModeGuard;

impl RawModeGuard {
    /// Enables raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal does not support raw mode.
    pub fn enable() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// Whether stdin is attached to a terminal.
#[must_use]
pub fn stdin_is_terminal() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdin())
}

/// Prompts on stderr and reads a line without echoing it.
///
/// When stdin is not a terminal the line is read as-is, so secrets can be
/// piped in.
///
/// # Errors
///
/// Returns an error if reading stdin fails or input is cancelled.
pub fn prompt_hidden(prompt: &str) -> Result<String> {
    use std::io::{BufRead, Write};

    eprint!("{prompt}: ");
    std::io::stderr().flush()?;

    if !stdin_is_terminal() {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    let mut secret = String::new();
    {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let CrosstermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Enter => break,
                    KeyCode::Backspace => {
                        secret.pop();
                    }
                    KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        if c == 'c' || c == 'd' {
                            eprintln!();
                            color_eyre::eyre::bail!("Input cancelled");
                        }
                    }
                    KeyCode::Char(c) => secret.push(c),
                    KeyCode::Esc => {
                        eprintln!();
                        color_eyre::eyre::bail!("Input cancelled");
                    }
                    _ => {}
                }
            }
        }
    }
    eprintln!();
    Ok(secret)
}
