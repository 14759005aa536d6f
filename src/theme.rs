//! Nordic Frost color palette for terminal output.
//!
//! Semantic colors used when printing status lines, based on the Nord
//! Aurora shades.

use crossterm::style::Color;

// === Nord Aurora (Status colors) ===

/// Aurora red - errors.
pub const NORD_RED: Color = Color::Rgb { r: 191, g: 97, b: 106 };
/// Aurora yellow - caution/empty results.
pub const NORD_YELLOW: Color = Color::Rgb { r: 235, g: 203, b: 139 };
/// Aurora green - success.
pub const NORD_GREEN: Color = Color::Rgb { r: 163, g: 190, b: 140 };

// === Semantic Color Aliases ===

/// Success state color.
pub const SUCCESS: Color = NORD_GREEN;
/// Warning state color.
pub const WARNING: Color = NORD_YELLOW;
/// Error state color.
pub const ERROR: Color = NORD_RED;
