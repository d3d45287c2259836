//! Lexical features computed from the URL string alone.
//!
//! Total over any input: no network access, no failure path. Counts and
//! ratios follow the character classes the training pipeline used
//! (`[a-zA-Z]`, `[0-9]`, the literal `=` `?` `&`, and everything else as
//! "other special").

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use super::domain;
use super::manifest::{Feature, FeatureBag};

// Same loose pattern the training extractor matched against the registrable
// domain: anchored at the start only, octets unbounded.
static DOTTED_QUAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+").expect("static pattern"));

// The training extractor counted digits with a Unicode-aware `\d` (decimal
// digits in any script), while its letter class was explicitly ASCII.
static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("static pattern"));

/// Write every lexical feature for `url` into the bag.
pub fn extract_into(url: &str, bag: &mut FeatureBag) {
    let url_len = url.chars().count();
    bag.set(Feature::UrlLength, url_len as f64);

    let parts = domain::decompose(url);
    let registrable = parts.registrable();
    bag.set(Feature::DomainLength, registrable.chars().count() as f64);
    bag.set_flag(Feature::IsDomainIp, DOTTED_QUAD.is_match(&registrable));
    bag.set(Feature::TldLength, parts.suffix.chars().count() as f64);
    bag.set(Feature::NoOfSubDomain, parts.subdomain_labels() as f64);

    let letters = url.chars().filter(char::is_ascii_alphabetic).count();
    let digits = DECIMAL_DIGIT.find_iter(url).count();
    bag.set(Feature::NoOfLettersInUrl, letters as f64);
    bag.set(Feature::LetterRatioInUrl, ratio(letters, url_len));
    bag.set(Feature::NoOfDigitsInUrl, digits as f64);
    bag.set(Feature::DigitRatioInUrl, ratio(digits, url_len));

    bag.set(Feature::NoOfEqualsInUrl, char_count(url, '=') as f64);
    bag.set(Feature::NoOfQMarkInUrl, char_count(url, '?') as f64);
    bag.set(Feature::NoOfAmpersandInUrl, char_count(url, '&') as f64);

    let special = url
        .chars()
        .filter(|c| !c.is_ascii_alphanumeric() && !matches!(c, '=' | '?' | '&'))
        .count();
    bag.set(Feature::NoOfOtherSpecialCharsInUrl, special as f64);
    bag.set(Feature::SpecialCharRatioInUrl, ratio(special, url_len));

    bag.set_flag(Feature::IsHttps, scheme_of(url).as_deref() == Some("https"));
}

fn char_count(url: &str, needle: char) -> usize {
    url.chars().filter(|&c| c == needle).count()
}

// Ratios over an empty URL are defined as 0 rather than NaN; the scaled
// vector must stay finite for every input string.
fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// The URL scheme, lowercased, as a generous URL parser reports it.
/// `None` when the input has no recognizable scheme.
fn scheme_of(url: &str) -> Option<String> {
    if let Ok(parsed) = Url::parse(url) {
        return Some(parsed.scheme().to_string());
    }

    let (candidate, _) = url.split_once(':')?;
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        Some(candidate.to_ascii_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(url: &str) -> FeatureBag {
        let mut bag = FeatureBag::new();
        extract_into(url, &mut bag);
        bag
    }

    #[test]
    fn test_query_url_counts() {
        let bag = extract("http://example.com/test?a=1&b=2");

        assert_eq!(bag.get(Feature::UrlLength), 31.0);
        assert_eq!(bag.get(Feature::NoOfEqualsInUrl), 2.0);
        assert_eq!(bag.get(Feature::NoOfQMarkInUrl), 1.0);
        assert_eq!(bag.get(Feature::NoOfAmpersandInUrl), 1.0);
        assert_eq!(bag.get(Feature::NoOfLettersInUrl), 20.0);
        assert_eq!(bag.get(Feature::NoOfDigitsInUrl), 2.0);
        // ':' '/' '/' '.' '/' are the remaining specials.
        assert_eq!(bag.get(Feature::NoOfOtherSpecialCharsInUrl), 5.0);
        assert!((bag.get(Feature::SpecialCharRatioInUrl) - 5.0 / 31.0).abs() < 1e-12);
        assert_eq!(bag.get(Feature::IsHttps), 0.0);
    }

    #[test]
    fn test_https_flag_only_for_https_scheme() {
        assert_eq!(extract("https://example.com").get(Feature::IsHttps), 1.0);
        assert_eq!(extract("HTTPS://example.com").get(Feature::IsHttps), 1.0);
        assert_eq!(extract("http://example.com").get(Feature::IsHttps), 0.0);
        assert_eq!(extract("ftp://example.com").get(Feature::IsHttps), 0.0);
        assert_eq!(extract("example.com").get(Feature::IsHttps), 0.0);
    }

    #[test]
    fn test_https_leaves_other_lexical_features_unchanged() {
        let http = extract("http://example.com/test?a=1&b=2");
        let https = extract("https://example.com/test?a=1&b=2");

        assert_eq!(https.get(Feature::IsHttps), 1.0);
        assert_eq!(
            https.get(Feature::NoOfEqualsInUrl),
            http.get(Feature::NoOfEqualsInUrl)
        );
        assert_eq!(
            https.get(Feature::NoOfQMarkInUrl),
            http.get(Feature::NoOfQMarkInUrl)
        );
        assert_eq!(
            https.get(Feature::NoOfAmpersandInUrl),
            http.get(Feature::NoOfAmpersandInUrl)
        );
        // One extra letter ("s") and one extra character overall.
        assert_eq!(https.get(Feature::UrlLength), 32.0);
        assert_eq!(https.get(Feature::NoOfLettersInUrl), 21.0);
    }

    #[test]
    fn test_digit_count_includes_unicode_decimal_digits() {
        // Arabic-Indic ٣ and ٤ are decimal digits, and at the same time fall
        // outside [A-Za-z0-9=?&], so they also count as special characters —
        // both exactly as at training time.
        let bag = extract("http://x.test/٣٤5");
        assert_eq!(bag.get(Feature::NoOfDigitsInUrl), 3.0);
        assert_eq!(bag.get(Feature::NoOfOtherSpecialCharsInUrl), 7.0);
        assert_eq!(bag.get(Feature::UrlLength), 17.0);
    }

    #[test]
    fn test_domain_features() {
        let bag = extract("https://www.example.co.uk/login");
        assert_eq!(bag.get(Feature::DomainLength), 13.0); // example.co.uk
        assert_eq!(bag.get(Feature::TldLength), 5.0); // co.uk
        assert_eq!(bag.get(Feature::NoOfSubDomain), 1.0);
        assert_eq!(bag.get(Feature::IsDomainIp), 0.0);
    }

    #[test]
    fn test_ip_domain_flag() {
        let bag = extract("http://192.168.1.1/admin");
        assert_eq!(bag.get(Feature::IsDomainIp), 1.0);
    }

    #[test]
    fn test_empty_url_has_zero_ratios() {
        let bag = extract("");
        assert_eq!(bag.get(Feature::UrlLength), 0.0);
        assert_eq!(bag.get(Feature::LetterRatioInUrl), 0.0);
        assert_eq!(bag.get(Feature::DigitRatioInUrl), 0.0);
        assert_eq!(bag.get(Feature::SpecialCharRatioInUrl), 0.0);
        assert!(bag.to_vector().iter().all(|v| v.is_finite()));
    }
}
