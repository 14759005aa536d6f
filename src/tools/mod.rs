//! The individual tools, grouped by category.
//!
//! Every tool is a plain function that performs one operation and writes its
//! result to the supplied writer. Tools never share state with each other.

pub mod fun;
pub mod network;
pub mod security;
pub mod system;
pub mod utility;
