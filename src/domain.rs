/// Hostname extraction and counting logic for Tab Pilot
use std::collections::HashMap;

use url::Url;

/// Extract the hostname from a URL
///
/// Returns `None` when the URL does not parse or has no host component
/// (`about:blank`, `data:` URLs, plain words).
///
/// Examples:
/// - https://www.google.com/search → www.google.com
/// - http://localhost:3000/ → localhost
/// - chrome://extensions → extensions
pub fn extract_hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;

    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

/// Display label for a URL: its hostname, or the raw text when there is none
pub fn hostname_label(url: &str) -> String {
    extract_hostname(url).unwrap_or_else(|| url.to_string())
}

/// Count hostname occurrences, remembering the order each was first seen
pub fn count_hostnames(urls: &[String]) -> Vec<(String, usize)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for hostname in urls.iter().filter_map(|url| extract_hostname(url)) {
        match positions.get(&hostname) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                positions.insert(hostname.clone(), counts.len());
                counts.push((hostname, 1));
            }
        }
    }

    counts
}

/// Get the top N hostnames by count
///
/// Ties keep first-encountered order.
pub fn get_top_hostnames(urls: &[String], n: usize) -> Vec<(String, usize)> {
    let mut counts = count_hostnames(urls);

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);

    counts
}
