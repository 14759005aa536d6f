//! Countdown timer and stopwatch.
//!
//! On a terminal both run in raw mode, redrawing on tick events from
//! [`EventHandler`] and reacting to key presses. Otherwise they fall back to
//! plain sleeping and line reads so they work in pipes and scripts.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::KeyCode;

use crate::constants;
use crate::event::{self, Event, EventHandler, RawModeGuard};

/// How a countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Finished,
    Cancelled,
}

fn remaining_line(remaining: f64) -> String {
    format!("\rRemaining: {remaining:5.1} s")
}

/// Counts down `seconds`, redrawing the remaining time in place.
///
/// # Errors
///
/// Returns an error if the terminal or output fails.
pub fn timer(out: &mut dyn Write, seconds: f64) -> Result<()> {
    writeln!(out, "Timer started for {seconds} seconds...")?;
    let outcome = if event::stdin_is_terminal() {
        countdown_interactive(out, seconds)?
    } else {
        countdown_plain(out, seconds)?
    };
    match outcome {
        Countdown::Finished => writeln!(out, "\r{:<24}", constants::MSG_TIMES_UP)?,
        Countdown::Cancelled => writeln!(out, "\r{:<24}", "Timer cancelled.")?,
    }
    Ok(())
}

fn countdown_plain(out: &mut dyn Write, seconds: f64) -> Result<Countdown> {
    let start = Instant::now();
    let tick = Duration::from_millis(constants::COUNTDOWN_TICK_MS);
    loop {
        let remaining = seconds - start.elapsed().as_secs_f64();
        if remaining <= 0.0 {
            return Ok(Countdown::Finished);
        }
        write!(out, "{}", remaining_line(remaining))?;
        out.flush()?;
        thread::sleep(tick);
    }
}

fn countdown_interactive(out: &mut dyn Write, seconds: f64) -> Result<Countdown> {
    if seconds <= 0.0 {
        return Ok(Countdown::Finished);
    }
    let start = Instant::now();
    let _raw = RawModeGuard::enable()?;
    let events = EventHandler::new(constants::COUNTDOWN_TICK_MS);
    loop {
        match events.next()? {
            Event::Tick => {
                let remaining = seconds - start.elapsed().as_secs_f64();
                if remaining <= 0.0 {
                    return Ok(Countdown::Finished);
                }
                write!(out, "{}", remaining_line(remaining))?;
                out.flush()?;
            }
            Event::Key(key) if event::is_cancel(&key) => return Ok(Countdown::Cancelled),
            Event::Key(_) => {}
        }
    }
}

/// The final stopwatch line.
#[must_use]
pub fn elapsed_line(elapsed: Duration) -> String {
    format!("Elapsed time: {:.2} seconds", elapsed.as_secs_f64())
}

/// Runs until Enter is pressed, then prints the elapsed time.
///
/// # Errors
///
/// Returns an error if the terminal or stdin fails.
pub fn stopwatch(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Press Enter to stop the stopwatch...")?;
    let start = Instant::now();
    if event::stdin_is_terminal() {
        run_until_enter(out, start)?;
    } else {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
    }
    writeln!(out, "{}", elapsed_line(start.elapsed()))?;
    Ok(())
}

fn run_until_enter(out: &mut dyn Write, start: Instant) -> Result<()> {
    {
        let _raw = RawModeGuard::enable()?;
        let events = EventHandler::new(constants::COUNTDOWN_TICK_MS);
        loop {
            match events.next()? {
                Event::Tick => {
                    write!(out, "\rElapsed: {:.1} s", start.elapsed().as_secs_f64())?;
                    out.flush()?;
                }
                Event::Key(key) if key.code == KeyCode::Enter || event::is_cancel(&key) => break,
                Event::Key(_) => {}
            }
        }
    }
    writeln!(out)?;
    Ok(())
}
