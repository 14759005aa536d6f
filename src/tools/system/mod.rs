//! System tools: disks, processes, host details, files and the clipboard.

pub mod clipboard;
pub mod files;
pub mod info;
pub mod monitor;
