//! Password generation and strength checking.

use std::io::Write;

use color_eyre::eyre::bail;
use color_eyre::Result;
use rand::seq::IndexedRandom;

use crate::{output, theme};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Character classes enabled for generation. Lowercase is always included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub upper: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl PasswordPolicy {
    fn alphabet(&self) -> Vec<char> {
        let mut alphabet: Vec<char> = LOWERCASE.chars().collect();
        if self.upper {
            alphabet.extend(UPPERCASE.chars());
        }
        if self.digits {
            alphabet.extend(DIGITS.chars());
        }
        if self.symbols {
            alphabet.extend(PUNCTUATION.chars());
        }
        alphabet
    }
}

/// Draws a password uniformly from the policy's alphabet.
///
/// `rand::rng()` is a CSPRNG reseeded from the operating system.
///
/// # Errors
///
/// Returns an error if the requested length is zero.
pub fn generate(policy: &PasswordPolicy) -> Result<String> {
    if policy.length == 0 {
        bail!("Password length must be positive.");
    }
    let alphabet = policy.alphabet();
    let mut rng = rand::rng();
    Ok((0..policy.length)
        .filter_map(|_| alphabet.choose(&mut rng).copied())
        .collect())
}

/// Prints a freshly generated password.
///
/// # Errors
///
/// Returns an error if the requested length is zero.
pub fn generate_password(out: &mut dyn Write, policy: &PasswordPolicy) -> Result<()> {
    writeln!(out, "{}", generate(policy)?)?;
    Ok(())
}

/// Outcome of the strength heuristics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strength {
    pub score: u8,
    pub suggestions: Vec<&'static str>,
}

impl Strength {
    /// Human label for the score.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self.score {
            5 => "Strong",
            4 => "Good",
            3 => "Fair",
            2 => "Weak",
            1 => "Very weak",
            _ => "Extremely weak",
        }
    }

    fn color(&self) -> crossterm::style::Color {
        match self.score {
            4 | 5 => theme::SUCCESS,
            2 | 3 => theme::WARNING,
            _ => theme::ERROR,
        }
    }
}

/// Scores a password one point per satisfied criterion.
#[must_use]
pub fn assess(password: &str) -> Strength {
    let checks: [(bool, &'static str); 5] = [
        (password.chars().count() >= 8, "Make it at least 8 characters."),
        (password.chars().any(char::is_lowercase), "Add some lowercase letters."),
        (password.chars().any(char::is_uppercase), "Add some uppercase letters."),
        (password.chars().any(|c| c.is_ascii_digit()), "Include digits."),
        (password.chars().any(|c| c.is_ascii_punctuation()), "Include special characters."),
    ];

    let mut score = 0u8;
    let mut suggestions = Vec::new();
    for (passed, hint) in checks {
        if passed {
            score += 1;
        } else {
            suggestions.push(hint);
        }
    }
    Strength { score, suggestions }
}

/// Prints the score, label and suggestions for `password`.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn check_password(out: &mut dyn Write, password: &str) -> Result<()> {
    let strength = assess(password);
    writeln!(
        out,
        "Score: {}/5 -> {}",
        strength.score,
        output::paint(strength.label(), strength.color())
    )?;
    if !strength.suggestions.is_empty() {
        writeln!(out, "Suggestions:")?;
        for msg in &strength.suggestions {
            writeln!(out, "  • {msg}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(length: usize, upper: bool, digits: bool, symbols: bool) -> PasswordPolicy {
        PasswordPolicy {
            length,
            upper,
            digits,
            symbols,
        }
    }

    #[test]
    fn test_punctuation_set_is_ascii_punctuation() {
        assert_eq!(PUNCTUATION.len(), 32);
        assert!(PUNCTUATION.chars().all(|c| c.is_ascii_punctuation()));
    }

    #[test]
    fn test_generate_respects_length_and_classes() {
        let pw = generate(&policy(64, false, false, false)).unwrap();
        assert_eq!(pw.chars().count(), 64);
        assert!(pw.chars().all(|c| c.is_ascii_lowercase()));

        let pw = generate(&policy(200, true, true, false)).unwrap();
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_rejects_zero_length() {
        assert!(generate(&policy(0, true, true, true)).is_err());
    }

    #[test]
    fn test_assess_strong() {
        let strength = assess("Tr0ub4dor&3");
        assert_eq!(strength.score, 5);
        assert_eq!(strength.label(), "Strong");
        assert!(strength.suggestions.is_empty());
    }

    #[test]
    fn test_assess_weak() {
        let strength = assess("abc");
        assert_eq!(strength.score, 1);
        assert_eq!(strength.label(), "Very weak");
        assert_eq!(
            strength.suggestions,
            vec![
                "Make it at least 8 characters.",
                "Add some uppercase letters.",
                "Include digits.",
                "Include special characters.",
            ]
        );
    }

    #[test]
    fn test_assess_empty() {
        let strength = assess("");
        assert_eq!(strength.score, 0);
        assert_eq!(strength.label(), "Extremely weak");
        assert_eq!(strength.suggestions.len(), 5);
    }

    #[test]
    fn test_check_password_output() {
        let mut out = Vec::new();
        check_password(&mut out, "password1").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Score: 3/5 -> "));
        assert!(text.contains("Fair"));
        assert!(text.contains("Suggestions:\n  • Add some uppercase letters.\n"));
    }
}
