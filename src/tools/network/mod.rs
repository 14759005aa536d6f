//! Network tools: port scanning, ping, DNS, WHOIS and web lookups.

pub mod lookup;
pub mod probe;
pub mod scan;
pub mod web;
