use std::sync::LazyLock;
use regex::Regex;

static POSTAL_CODE_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{5}\b").unwrap());

/// Pull a US postal code out of a free-text address line.
///
/// Every non-overlapping run of exactly five digits qualifies; the word
/// boundary also fires before a hyphen, so the `12345` prefix of a ZIP+4
/// token qualifies while five digits embedded in a longer run do not.
/// When several runs qualify the **last** one wins: street numbers lead an
/// address, the zip trails it.
pub fn extract_postal_code(address: &str) -> Option<&str> {
    POSTAL_CODE_REG.find_iter(address).last().map(|m| m.as_str())
}
