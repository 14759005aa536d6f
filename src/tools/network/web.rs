//! HTTP-backed network tools: geolocation, headers, speed test, MAC vendors.

use std::io::Write;

use color_eyre::eyre::bail;
use color_eyre::Result;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::http;

/// Fields printed by `ip-geo`, in order.
const GEO_FIELDS: [&str; 8] = [
    "ip", "hostname", "city", "region", "country", "loc", "org", "timezone",
];

/// Upper-cases the first letter and lower-cases the rest.
fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `Key: value` lines for the geolocation fields present in `data`.
#[must_use]
pub fn geo_lines(data: &Value) -> Vec<String> {
    GEO_FIELDS
        .iter()
        .filter_map(|key| {
            let value = match data.get(key)? {
                Value::String(s) if !s.is_empty() => s.clone(),
                Value::Null | Value::String(_) => return None,
                other => other.to_string(),
            };
            Some(format!("{}: {value}", title_case(key)))
        })
        .collect()
}

/// Looks up approximate location data for an IP address.
///
/// # Errors
///
/// Returns an error on request failure or a non-success status.
pub fn ip_geo(out: &mut dyn Write, client: &Client, base_url: &str, ip: &str) -> Result<()> {
    let url = format!("{}/{}/json", base_url.trim_end_matches('/'), urlencoding::encode(ip));
    let data: Value = http::get_json(client, &url)?;
    for line in geo_lines(&data) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Prints the status line and response headers for `url`.
///
/// # Errors
///
/// Returns an error if the request cannot be sent.
pub fn http_headers(out: &mut dyn Write, client: &Client, url: &str) -> Result<()> {
    let response = http::get(client, url)?;
    let status = response.status();
    writeln!(
        out,
        "Status: {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )?;
    writeln!(out, "Headers:")?;
    for (name, value) in response.headers() {
        writeln!(out, "  {}: {}", name, String::from_utf8_lossy(value.as_bytes()))?;
    }
    Ok(())
}

/// Downloads `url` and reports the average throughput.
///
/// # Errors
///
/// Returns an error if the download fails.
pub fn speed_test(out: &mut dyn Write, client: &Client, url: &str) -> Result<()> {
    writeln!(out, "Downloading test file from {url} ...")?;
    out.flush()?;
    let transfer = http::measure_download(client, url)?;
    writeln!(
        out,
        "Downloaded {:.2} MB in {:.2} s -> {:.2} Mbps",
        transfer.megabytes(),
        transfer.elapsed.as_secs_f64(),
        transfer.megabits_per_sec()
    )?;
    Ok(())
}

/// Canonical form used for vendor lookups: trimmed, lower-case, `:`-separated.
#[must_use]
pub fn normalize_mac(mac: &str) -> String {
    mac.trim().to_lowercase().replace('-', ":")
}

/// Looks up the manufacturer registered for a MAC address prefix.
///
/// # Errors
///
/// Returns an error on request failure or a non-success status.
pub fn mac_vendor(out: &mut dyn Write, client: &Client, base_url: &str, mac: &str) -> Result<()> {
    let cleaned = normalize_mac(mac);
    let url = format!("{}/{}", base_url.trim_end_matches('/'), cleaned);
    let response = http::get(client, &url)?;
    if !response.status().is_success() {
        bail!("Lookup failed: HTTP {}", response.status().as_u16());
    }
    let vendor = response.text()?;
    writeln!(out, "Vendor: {}", vendor.trim())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::serve_once;
    use serde_json::json;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ip"), "Ip");
        assert_eq!(title_case("timezone"), "Timezone");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_geo_lines_skip_missing_and_empty() {
        let data = json!({
            "ip": "8.8.8.8",
            "city": "Mountain View",
            "region": "",
            "country": "US",
            "org": null,
            "readme": "https://ipinfo.io/missingauth"
        });
        assert_eq!(
            geo_lines(&data),
            vec!["Ip: 8.8.8.8", "City: Mountain View", "Country: US"]
        );
    }

    #[test]
    fn test_normalize_mac() {
        assert_eq!(normalize_mac(" 00-1A-2B-3C-4D-5E "), "00:1a:2b:3c:4d:5e");
    }

    #[test]
    fn test_ip_geo_against_local_server() {
        let body = json!({"ip": "1.2.3.4", "city": "Testville", "timezone": "UTC"}).to_string();
        let (base, server) = serve_once("200 OK", "application/json", body);
        let client = http::client(5).unwrap();

        let mut out = Vec::new();
        ip_geo(&mut out, &client, &base, "1.2.3.4").unwrap();
        assert_eq!(server.join().unwrap(), "GET /1.2.3.4/json HTTP/1.1");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Ip: 1.2.3.4\nCity: Testville\nTimezone: UTC\n"
        );
    }

    #[test]
    fn test_mac_vendor_against_local_server() {
        let (base, server) = serve_once("200 OK", "text/plain", "Acme Corp\n".to_string());
        let client = http::client(5).unwrap();

        let mut out = Vec::new();
        mac_vendor(&mut out, &client, &base, "00-1A-2B-3C-4D-5E").unwrap();
        assert_eq!(server.join().unwrap(), "GET /00:1a:2b:3c:4d:5e HTTP/1.1");
        assert_eq!(String::from_utf8(out).unwrap(), "Vendor: Acme Corp\n");
    }

    #[test]
    fn test_mac_vendor_not_found() {
        let (base, server) = serve_once("404 Not Found", "text/plain", "{}".to_string());
        let client = http::client(5).unwrap();

        let mut out = Vec::new();
        let err = mac_vendor(&mut out, &client, &base, "ff:ff:ff").unwrap_err();
        assert_eq!(err.to_string(), "Lookup failed: HTTP 404");
        server.join().unwrap();
    }

    #[test]
    fn test_http_headers_lists_headers() {
        let (base, server) = serve_once("200 OK", "text/plain", "hi".to_string());
        let client = http::client(5).unwrap();

        let mut out = Vec::new();
        http_headers(&mut out, &client, &base).unwrap();
        server.join().unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Status: 200 OK\nHeaders:\n"));
        assert!(text.contains("  x-test: yes\n"));
        assert!(text.contains("  content-type: text/plain\n"));
    }
}
