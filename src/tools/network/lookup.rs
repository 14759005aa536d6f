//! Name resolution tools: DNS lookup, subdomain probing and WHOIS.

use std::fs;
use std::io::{Read, Write};
use std::net::{IpAddr, TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;

use crate::{constants, output};

/// Resolves `name` with the system resolver, returning unique addresses in
/// resolver order.
///
/// # Errors
///
/// Returns an error if resolution fails.
pub fn resolve_all(name: &str) -> Result<Vec<IpAddr>> {
    let mut ips: Vec<IpAddr> = Vec::new();
    for addr in (name, 0)
        .to_socket_addrs()
        .wrap_err_with(|| format!("DNS lookup failed for {name}"))?
    {
        if !ips.contains(&addr.ip()) {
            ips.push(addr.ip());
        }
    }
    Ok(ips)
}

fn record_type(ip: &IpAddr) -> &'static str {
    match ip {
        IpAddr::V4(_) => "A",
        IpAddr::V6(_) => "AAAA",
    }
}

/// Prints the A and AAAA records for `domain`.
///
/// # Errors
///
/// Returns an error if resolution fails or output cannot be written.
pub fn dns_lookup(out: &mut dyn Write, domain: &str) -> Result<()> {
    let ips = resolve_all(domain)?;
    if ips.is_empty() {
        output::notice(out, constants::MSG_NO_DNS_RECORDS)?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = ips
        .iter()
        .map(|ip| vec![record_type(ip).to_string(), ip.to_string()])
        .collect();
    write!(out, "{}", output::render_table(&["Record", "IP Address"], &rows))?;
    Ok(())
}

/// Words to try: the wordlist's trimmed non-empty lines, or the built-in
/// list.
///
/// # Errors
///
/// Returns an error if the wordlist cannot be read.
pub fn load_wordlist(path: Option<&Path>) -> Result<Vec<String>> {
    match path {
        None => Ok(constants::DEFAULT_SUBDOMAINS
            .iter()
            .map(|w| (*w).to_string())
            .collect()),
        Some(path) => {
            let raw = fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read wordlist {}", path.display()))?;
            Ok(raw
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(ToString::to_string)
                .collect())
        }
    }
}

/// Tries `<word>.<domain>` for every word and prints those that resolve.
///
/// # Errors
///
/// Returns an error if the wordlist cannot be read.
pub fn subdomains(out: &mut dyn Write, domain: &str, wordlist: Option<&Path>) -> Result<()> {
    let words = load_wordlist(wordlist)?;
    let mut found = 0usize;
    for word in words {
        let fqdn = format!("{word}.{domain}");
        match resolve_all(&fqdn) {
            Ok(ips) if !ips.is_empty() => {
                writeln!(out, "{fqdn} -> resolves")?;
                found += 1;
            }
            _ => tracing::debug!(%fqdn, "does not resolve"),
        }
    }
    if found == 0 {
        output::notice(out, constants::MSG_NO_SUBDOMAINS)?;
    }
    Ok(())
}

/// Splits `host[:port]`, defaulting to the WHOIS port.
fn split_server(server: &str) -> (&str, u16) {
    if let Some((host, port)) = server.rsplit_once(':') {
        if let Ok(port) = port.parse() {
            return (host, port);
        }
    }
    (server, constants::WHOIS_PORT)
}

/// Sends one WHOIS query and returns the raw response.
///
/// # Errors
///
/// Returns an error if the server cannot be reached or the exchange fails.
pub fn whois_query(server: &str, query: &str, timeout: Duration) -> Result<String> {
    let (host, port) = split_server(server);
    tracing::debug!(host, port, query, "WHOIS query");
    let addr = (host, port)
        .to_socket_addrs()
        .wrap_err_with(|| format!("Failed to resolve WHOIS server {host}"))?
        .next()
        .ok_or_else(|| eyre!("Failed to resolve WHOIS server {host}"))?;

    let mut stream = TcpStream::connect_timeout(&addr, timeout)
        .wrap_err_with(|| format!("Failed to connect to {host}:{port}"))?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;
    stream.write_all(format!("{query}\r\n").as_bytes())?;

    let mut raw = Vec::new();
    stream
        .read_to_end(&mut raw)
        .wrap_err("WHOIS lookup failed")?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Extracts the referral server from an IANA-style response.
#[must_use]
pub fn find_referral(response: &str) -> Option<String> {
    response.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if (key == "refer" || key == "whois") && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// `key: value` lines of a response, skipping comments and notices.
#[must_use]
pub fn key_value_lines(response: &str) -> Vec<(String, String)> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('%') && !line.starts_with('#') && !line.starts_with(">>>"))
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() || key.contains("  ") {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Queries the root server, follows one referral, and prints the record.
///
/// # Errors
///
/// Returns an error if either WHOIS exchange fails or nothing useful comes
/// back.
pub fn whois(out: &mut dyn Write, domain: &str, root_server: &str) -> Result<()> {
    let first = whois_query(root_server, domain, constants::WHOIS_TIMEOUT)?;
    let response = match find_referral(&first) {
        Some(server) if server != root_server => {
            whois_query(&server, domain, constants::WHOIS_TIMEOUT)?
        }
        _ => first,
    };

    let pairs = key_value_lines(&response);
    if pairs.is_empty() {
        return Err(eyre!("WHOIS lookup returned no records for {domain}"));
    }
    for (key, value) in pairs {
        writeln!(out, "{key}: {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;
    use std::thread;

    const IANA_RESPONSE: &str = "% IANA WHOIS server\n\
        % for more information on IANA, visit http://www.iana.org\n\
        \n\
        refer:        whois.verisign-grs.com\n\
        \n\
        domain:       COM\n";

    #[test]
    fn test_find_referral() {
        assert_eq!(
            find_referral(IANA_RESPONSE),
            Some("whois.verisign-grs.com".to_string())
        );
        assert_eq!(find_referral("domain: COM\n"), None);
    }

    #[test]
    fn test_key_value_lines_skip_comments() {
        let pairs = key_value_lines(IANA_RESPONSE);
        assert_eq!(
            pairs,
            vec![
                ("refer".to_string(), "whois.verisign-grs.com".to_string()),
                ("domain".to_string(), "COM".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_server() {
        assert_eq!(split_server("whois.iana.org"), ("whois.iana.org", 43));
        assert_eq!(split_server("127.0.0.1:4343"), ("127.0.0.1", 4343));
    }

    #[test]
    fn test_load_wordlist_default_and_file() {
        assert_eq!(load_wordlist(None).unwrap().len(), 6);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "  www \n\nmail\n   \n").unwrap();
        assert_eq!(load_wordlist(Some(&path)).unwrap(), vec!["www", "mail"]);
    }

    #[test]
    fn test_subdomains_reports_when_nothing_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "www\napi\n").unwrap();

        let mut out = Vec::new();
        subdomains(&mut out, "example.invalid", Some(&path)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("-> resolves"));
        assert!(text.contains(constants::MSG_NO_SUBDOMAINS));
    }

    #[test]
    fn test_subdomains_missing_wordlist() {
        let mut out = Vec::new();
        let err = subdomains(&mut out, "example.invalid", Some(Path::new("/no/such/words.txt")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read wordlist"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_dns_lookup_localhost() {
        let mut out = Vec::new();
        dns_lookup(&mut out, "localhost").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Record"));
        assert!(text.contains("127.0.0.1") || text.contains("::1"));
    }

    #[test]
    fn test_whois_against_local_server() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut query = String::new();
            BufReader::new(stream.try_clone().unwrap())
                .read_line(&mut query)
                .unwrap();
            stream
                .write_all(b"% local\r\nDomain Name: EXAMPLE.COM\r\nRegistrar: Test Registrar\r\n")
                .unwrap();
            query
        });

        let mut out = Vec::new();
        whois(&mut out, "example.com", &addr.to_string()).unwrap();
        assert_eq!(server.join().unwrap(), "example.com\r\n");

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Domain Name: EXAMPLE.COM\nRegistrar: Test Registrar\n");
    }
}
