//! Security tools: passwords, hashing, encodings and file hygiene.

pub mod archive;
pub mod codec;
pub mod files;
pub mod password;
