//! Feature extraction: URL lexical analysis plus optional page content.

pub mod content;
pub mod domain;
pub mod lexical;
pub mod manifest;

pub use manifest::{Feature, FeatureBag};

/// Build the complete feature bag for a URL.
///
/// Lexical features are always computed; content features only when a page
/// body is available. A `None` body (fetch failed or skipped) leaves every
/// content feature at its default of 0, which is exactly what the model saw
/// at training time for unreachable pages.
pub fn extract(url: &str, body: Option<&str>) -> FeatureBag {
    let mut bag = FeatureBag::new();
    lexical::extract_into(url, &mut bag);
    if let Some(body) = body {
        content::extract_into(body, &mut bag);
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_FEATURES: &[Feature] = &[
        Feature::LineOfCode,
        Feature::LargestLineLength,
        Feature::HasTitle,
        Feature::HasFavicon,
        Feature::HasDescription,
        Feature::NoOfPopup,
        Feature::NoOfIframe,
        Feature::HasSocialNet,
        Feature::HasSubmitButton,
        Feature::HasHiddenFields,
        Feature::HasPasswordField,
        Feature::Bank,
        Feature::Pay,
        Feature::Crypto,
        Feature::HasCopyrightInfo,
        Feature::NoOfImage,
        Feature::NoOfCss,
        Feature::NoOfJs,
        Feature::NoOfSelfRef,
        Feature::NoOfEmptyRef,
        Feature::NoOfExternalRef,
    ];

    #[test]
    fn test_failed_fetch_keeps_content_features_at_default() {
        let bag = extract("http://example.com/test?a=1&b=2", None);

        for &feature in CONTENT_FEATURES {
            assert_eq!(bag.get(feature), 0.0, "{} should default", feature.name());
        }

        // Lexical features are untouched by the missing body.
        assert_eq!(bag.get(Feature::UrlLength), 31.0);
        assert_eq!(bag.get(Feature::NoOfEqualsInUrl), 2.0);
        assert_eq!(bag.get(Feature::NoOfQMarkInUrl), 1.0);
        assert_eq!(bag.get(Feature::NoOfAmpersandInUrl), 1.0);
        assert_eq!(bag.get(Feature::IsHttps), 0.0);
    }

    #[test]
    fn test_body_fills_content_features_without_touching_lexical() {
        let body = concat!(
            "<html><head><title>t</title></head><body>",
            r#"<img src="x.png"><script></script><input type="password">"#,
            "</body></html>",
        );
        let with_body = extract("https://example.com/test?a=1&b=2", Some(body));
        let without = extract("https://example.com/test?a=1&b=2", None);

        assert_eq!(with_body.get(Feature::NoOfImage), 1.0);
        assert_eq!(with_body.get(Feature::NoOfJs), 1.0);
        assert_eq!(with_body.get(Feature::HasPasswordField), 1.0);
        assert_eq!(with_body.get(Feature::IsHttps), 1.0);

        assert_eq!(
            with_body.get(Feature::UrlLength),
            without.get(Feature::UrlLength)
        );
        assert_eq!(
            with_body.get(Feature::NoOfEqualsInUrl),
            without.get(Feature::NoOfEqualsInUrl)
        );
    }

    #[test]
    fn test_bag_is_always_complete() {
        for url in ["", "not a url", "https://example.com", "奇怪的://x"] {
            let vector = extract(url, None).to_vector();
            assert_eq!(vector.len(), Feature::COUNT);
            assert!(vector.iter().all(|v| v.is_finite()));
        }
    }
}
