//! Content features parsed out of a fetched page body.
//!
//! Only runs when the fetch produced a body. Parsing is best-effort: the
//! HTML parser is lenient and never fails, and any element that is simply
//! absent leaves its feature at the bag default of 0.

use scraper::{Html, Selector};

use super::manifest::{Feature, FeatureBag};

const BANK_TERMS: &[&str] = &["bank", "banking", "account"];
const PAY_TERMS: &[&str] = &["pay", "payment", "credit"];
const CRYPTO_TERMS: &[&str] = &["crypto", "bitcoin", "wallet"];
const SOCIAL_TERMS: &[&str] = &["facebook", "twitter", "instagram"];

// Selector literals below are known-valid.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Write every content feature for `body` into the bag.
pub fn extract_into(body: &str, bag: &mut FeatureBag) {
    let doc = Html::parse_document(body);

    let has = |css: &str| doc.select(&selector(css)).next().is_some();
    let count = |css: &str| doc.select(&selector(css)).count();

    bag.set_flag(Feature::HasTitle, has("title"));
    bag.set_flag(Feature::HasFavicon, has(r#"link[rel~="icon"]"#));
    bag.set_flag(Feature::HasDescription, has(r#"meta[name="description"]"#));
    bag.set_flag(Feature::HasPasswordField, has(r#"input[type="password"]"#));
    bag.set_flag(Feature::HasHiddenFields, has(r#"input[type="hidden"]"#));
    bag.set_flag(
        Feature::HasSubmitButton,
        has(r#"button[type="submit"], input[type="submit"]"#),
    );

    bag.set(Feature::NoOfImage, count("img") as f64);
    bag.set(Feature::NoOfPopup, count("popup, dialog") as f64);
    bag.set(Feature::NoOfIframe, count("iframe") as f64);
    bag.set(Feature::NoOfCss, count(r#"link[rel~="stylesheet"]"#) as f64);
    bag.set(Feature::NoOfJs, count("script") as f64);

    let mut self_refs = 0usize;
    let mut empty_refs = 0usize;
    let mut external_refs = 0usize;
    for anchor in doc.select(&selector("a")) {
        match anchor.value().attr("href") {
            None => empty_refs += 1,
            Some("") => empty_refs += 1,
            Some(href) if href.starts_with('#') => self_refs += 1,
            Some(href) if href.starts_with("http") => external_refs += 1,
            Some(_) => {}
        }
    }
    bag.set(Feature::NoOfSelfRef, self_refs as f64);
    bag.set(Feature::NoOfEmptyRef, empty_refs as f64);
    bag.set(Feature::NoOfExternalRef, external_refs as f64);

    let text: String = doc
        .root_element()
        .text()
        .collect::<String>()
        .to_lowercase();
    let contains_any = |terms: &[&str]| terms.iter().any(|t| text.contains(t));
    bag.set_flag(Feature::Bank, contains_any(BANK_TERMS));
    bag.set_flag(Feature::Pay, contains_any(PAY_TERMS));
    bag.set_flag(Feature::Crypto, contains_any(CRYPTO_TERMS));

    // The mojibake literal "Â©" is carried over from the training extractor;
    // after lowercasing it can never match, so in practice only the word
    // "copyright" fires this flag. Kept as-is for training parity.
    bag.set_flag(
        Feature::HasCopyrightInfo,
        text.contains("Â©") || text.contains("copyright"),
    );

    // Social links were checked against the raw markup, not the visible
    // text, and without lowercasing.
    bag.set_flag(
        Feature::HasSocialNet,
        SOCIAL_TERMS.iter().any(|t| body.contains(t)),
    );

    bag.set(Feature::LineOfCode, body.lines().count() as f64);
    bag.set(
        Feature::LargestLineLength,
        body.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f64,
    );
}
