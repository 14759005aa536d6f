//! Random numbers, strings and picks.

use std::io::Write;

use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use rand::distr::Alphanumeric;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Orders the bounds and draws uniformly from `[min, max]`.
///
/// # Errors
///
/// Returns an error if either bound is not finite.
pub fn number_between(max: f64, min: f64) -> Result<(f64, f64, f64)> {
    if !(max.is_finite() && min.is_finite()) {
        bail!("Provide numeric max (and optional min) values.");
    }
    let (low, high) = if min > max { (max, min) } else { (min, max) };
    let value = rand::rng().random_range(low..=high);
    Ok((low, high, value))
}

/// Prints a uniform float between the bounds with four decimals.
///
/// # Errors
///
/// Returns an error if either bound is not finite.
pub fn random_number(out: &mut dyn Write, max: f64, min: f64) -> Result<()> {
    let (low, high, value) = number_between(max, min)?;
    writeln!(out, "Random number between {low} and {high}: {value:.4}")?;
    Ok(())
}

/// An ASCII letters-and-digits string of `length` characters.
#[must_use]
pub fn alphanumeric(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Prints a random alphanumeric string.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn random_string(out: &mut dyn Write, length: usize) -> Result<()> {
    writeln!(out, "{}", alphanumeric(length))?;
    Ok(())
}

/// Trimmed, non-empty items of a comma-separated list.
#[must_use]
pub fn parse_choices(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Prints one item picked uniformly from a comma-separated list.
///
/// # Errors
///
/// Returns an error if the list has no non-blank items.
pub fn random_choice(out: &mut dyn Write, list: &str) -> Result<()> {
    let choices = parse_choices(list);
    let pick = choices
        .choose(&mut rand::rng())
        .ok_or_else(|| eyre!("No valid choices provided."))?;
    writeln!(out, "{pick}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_bounds_are_swapped() {
        for _ in 0..100 {
            let (low, high, value) = number_between(1.0, 10.0).unwrap();
            assert_eq!((low, high), (1.0, 10.0));
            assert!((1.0..=10.0).contains(&value));
        }
    }

    #[test]
    fn test_number_with_equal_bounds() {
        let (_, _, value) = number_between(5.0, 5.0).unwrap();
        assert!((value - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_number_rejects_nan() {
        assert!(number_between(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_random_number_output() {
        let mut out = Vec::new();
        random_number(&mut out, 3.0, 0.0).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("Random number between 0 and 3: "));
        let decimals = line.trim_end().rsplit('.').next().unwrap();
        assert_eq!(decimals.len(), 4);
    }

    #[test]
    fn test_alphanumeric() {
        let s = alphanumeric(32);
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(alphanumeric(0).is_empty());
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(parse_choices(" apple, ,banana ,, cherry"), vec!["apple", "banana", "cherry"]);
        assert!(parse_choices(" , ,").is_empty());
    }

    #[test]
    fn test_random_choice() {
        let mut out = Vec::new();
        random_choice(&mut out, "a,b,c").unwrap();
        let pick = String::from_utf8(out).unwrap();
        assert!(["a\n", "b\n", "c\n"].contains(&pick.as_str()));

        let mut out = Vec::new();
        assert!(random_choice(&mut out, ",,").is_err());
    }
}
