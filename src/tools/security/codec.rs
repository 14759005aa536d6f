//! Digests and reversible text transforms.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::constants;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl FromStr for HashAlgorithm {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            _ => Err(eyre!("Unsupported algorithm. Choose from: md5, sha1, sha256")),
        }
    }
}

/// Incremental hasher over any of the supported algorithms.
enum Hasher {
    Md5(md5::Context),
    Sha1(Sha1),
    Sha256(Sha256),
}

impl Hasher {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Md5(md5::Context::new()),
            HashAlgorithm::Sha1 => Self::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(ctx) => ctx.consume(data),
            Self::Sha1(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
        }
    }

    fn hex(self) -> String {
        match self {
            Self::Md5(ctx) => format!("{:x}", ctx.compute()),
            Self::Sha1(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
        }
    }
}

/// Hex digest of an in-memory buffer.
#[must_use]
pub fn digest_bytes(algorithm: HashAlgorithm, data: &[u8]) -> String {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.hex()
}

/// Hex digest of a file, streamed in fixed-size chunks.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn digest_file(algorithm: HashAlgorithm, path: &Path) -> Result<String> {
    let file = File::open(path).wrap_err_with(|| format!("Failed to read file: {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new(algorithm);
    let mut buf = vec![0u8; constants::IO_CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.hex())
}

/// Prints the digest of `file` if given, else of `text`.
///
/// # Errors
///
/// Returns an error for an unknown algorithm, missing input, or an
/// unreadable file.
pub fn hash(out: &mut dyn Write, text: Option<&str>, file: Option<&Path>, algorithm: &str) -> Result<()> {
    let algorithm: HashAlgorithm = algorithm.parse()?;
    let digest = match (file, text) {
        (Some(path), _) => digest_file(algorithm, path)?,
        (None, Some(text)) => digest_bytes(algorithm, text.as_bytes()),
        (None, None) => bail!("You must provide either --text or --file."),
    };
    writeln!(out, "{digest}")?;
    Ok(())
}

/// Standard base64 with padding.
#[must_use]
pub fn base64_encode(data: &str) -> String {
    STANDARD.encode(data.as_bytes())
}

/// Decodes standard base64, replacing invalid UTF-8 with U+FFFD.
///
/// # Errors
///
/// Returns an error if `data` is not valid base64.
pub fn base64_decode(data: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(data.trim())
        .wrap_err("Decoding failed")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Shifts ASCII letters by `shift` positions, preserving case.
#[must_use]
pub fn caesar(text: &str, shift: i64) -> String {
    let offset = u8::try_from(shift.rem_euclid(26)).unwrap_or(0);
    text.chars()
        .map(|c| {
            let base = if c.is_ascii_lowercase() {
                b'a'
            } else if c.is_ascii_uppercase() {
                b'A'
            } else {
                return c;
            };
            char::from((c as u8 - base + offset) % 26 + base)
        })
        .collect()
}
