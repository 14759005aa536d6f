//! Banners, jokes, fortunes and quotes.

use std::io::Write;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use figlet_rs::FIGfont;
use rand::seq::IndexedRandom;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{constants, http};

/// Renders `text` with the FIGlet standard font.
///
/// # Errors
///
/// Returns an error if the font cannot be loaded or the text cannot be
/// rendered.
pub fn render_banner(text: &str) -> Result<String> {
    let font = FIGfont::standard().map_err(|e| eyre!("ASCII art generation failed: {e}"))?;
    let figure = font
        .convert(text)
        .ok_or_else(|| eyre!("ASCII art generation failed: unsupported text"))?;
    Ok(figure.to_string())
}

/// Prints `text` as a FIGlet banner.
///
/// # Errors
///
/// Returns an error if the banner cannot be rendered.
pub fn ascii_art(out: &mut dyn Write, text: &str) -> Result<()> {
    writeln!(out, "{}", render_banner(text)?)?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Joke {
    setup: String,
    punchline: String,
}

/// Fetches and prints a random joke.
///
/// # Errors
///
/// Returns an error on request failure or an unexpected response.
pub fn joke(out: &mut dyn Write, client: &Client, url: &str) -> Result<()> {
    let joke: Joke = http::get_json(client, url).wrap_err("Failed to fetch joke")?;
    writeln!(out, "{}\n{}", joke.setup, joke.punchline)?;
    Ok(())
}

/// Picks one of the built-in fortunes.
#[must_use]
pub fn pick_fortune() -> &'static str {
    constants::FORTUNES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(constants::FORTUNES[0])
}

/// Prints a random fortune.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn fortune(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", pick_fortune())?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Quote {
    content: String,
    author: String,
}

/// Fetches and prints a random quote with its author.
///
/// # Errors
///
/// Returns an error on request failure or an unexpected response.
pub fn quote(out: &mut dyn Write, client: &Client, url: &str) -> Result<()> {
    let quote: Quote = http::get_json(client, url).wrap_err("Failed to fetch quote")?;
    writeln!(out, "{}\n— {}", quote.content, quote.author)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::serve_once;
    use serde_json::json;

    #[test]
    fn test_banner_is_multiline() {
        let banner = render_banner("Hi").unwrap();
        assert!(banner.lines().count() >= 4);
        assert!(banner.contains('|'));
    }

    #[test]
    fn test_fortune_is_builtin() {
        assert!(constants::FORTUNES.contains(&pick_fortune()));
    }

    #[test]
    fn test_joke_against_local_server() {
        let body = json!({
            "type": "general",
            "setup": "Why did the scarecrow win an award?",
            "punchline": "He was outstanding in his field.",
            "id": 1
        })
        .to_string();
        let (base, server) = serve_once("200 OK", "application/json", body);
        let client = http::client(5).unwrap();

        let mut out = Vec::new();
        joke(&mut out, &client, &format!("{base}/jokes/random")).unwrap();
        assert_eq!(server.join().unwrap(), "GET /jokes/random HTTP/1.1");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Why did the scarecrow win an award?\nHe was outstanding in his field.\n"
        );
    }

    #[test]
    fn test_quote_against_local_server() {
        let body = json!({"content": "Stay hungry.", "author": "Someone", "tags": []}).to_string();
        let (base, server) = serve_once("200 OK", "application/json", body);
        let client = http::client(5).unwrap();

        let mut out = Vec::new();
        quote(&mut out, &client, &base).unwrap();
        server.join().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Stay hungry.\n— Someone\n");
    }

    #[test]
    fn test_joke_server_error() {
        let (base, server) = serve_once("500 Internal Server Error", "text/plain", String::new());
        let client = http::client(5).unwrap();

        let mut out = Vec::new();
        assert!(joke(&mut out, &client, &base).is_err());
        server.join().unwrap();
    }
}
