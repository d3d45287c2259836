//! Feature manifest shared with the training pipeline.
//!
//! The classifier and scaler were fit against a dataset whose columns appear
//! in a fixed order. The `Feature` enum reproduces that order; the bag is a
//! dense array keyed by it, so a built vector can never miss a column or
//! carry an extra one. The name strings replicate the dataset column
//! spellings verbatim (including `NoOfDegitsInURL` and
//! `SpacialCharRatioInURL`) — they are part of the artifact contract.

/// A single named feature, in training-dataset column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Feature {
    UrlLength,
    DomainLength,
    IsDomainIp,
    UrlSimilarityIndex,
    CharContinuationRate,
    TldLegitimateProb,
    UrlCharProb,
    TldLength,
    NoOfSubDomain,
    HasObfuscation,
    NoOfObfuscatedChar,
    ObfuscationRatio,
    NoOfLettersInUrl,
    LetterRatioInUrl,
    NoOfDigitsInUrl,
    DigitRatioInUrl,
    NoOfEqualsInUrl,
    NoOfQMarkInUrl,
    NoOfAmpersandInUrl,
    NoOfOtherSpecialCharsInUrl,
    SpecialCharRatioInUrl,
    IsHttps,
    LineOfCode,
    LargestLineLength,
    HasTitle,
    DomainTitleMatchScore,
    UrlTitleMatchScore,
    HasFavicon,
    Robots,
    IsResponsive,
    NoOfUrlRedirect,
    NoOfSelfRedirect,
    HasDescription,
    NoOfPopup,
    NoOfIframe,
    HasExternalFormSubmit,
    HasSocialNet,
    HasSubmitButton,
    HasHiddenFields,
    HasPasswordField,
    Bank,
    Pay,
    Crypto,
    HasCopyrightInfo,
    NoOfImage,
    NoOfCss,
    NoOfJs,
    NoOfSelfRef,
    NoOfEmptyRef,
    NoOfExternalRef,
}

impl Feature {
    /// Number of features the model expects.
    pub const COUNT: usize = Self::ALL.len();

    /// Every feature in manifest order.
    pub const ALL: [Feature; 50] = [
        Feature::UrlLength,
        Feature::DomainLength,
        Feature::IsDomainIp,
        Feature::UrlSimilarityIndex,
        Feature::CharContinuationRate,
        Feature::TldLegitimateProb,
        Feature::UrlCharProb,
        Feature::TldLength,
        Feature::NoOfSubDomain,
        Feature::HasObfuscation,
        Feature::NoOfObfuscatedChar,
        Feature::ObfuscationRatio,
        Feature::NoOfLettersInUrl,
        Feature::LetterRatioInUrl,
        Feature::NoOfDigitsInUrl,
        Feature::DigitRatioInUrl,
        Feature::NoOfEqualsInUrl,
        Feature::NoOfQMarkInUrl,
        Feature::NoOfAmpersandInUrl,
        Feature::NoOfOtherSpecialCharsInUrl,
        Feature::SpecialCharRatioInUrl,
        Feature::IsHttps,
        Feature::LineOfCode,
        Feature::LargestLineLength,
        Feature::HasTitle,
        Feature::DomainTitleMatchScore,
        Feature::UrlTitleMatchScore,
        Feature::HasFavicon,
        Feature::Robots,
        Feature::IsResponsive,
        Feature::NoOfUrlRedirect,
        Feature::NoOfSelfRedirect,
        Feature::HasDescription,
        Feature::NoOfPopup,
        Feature::NoOfIframe,
        Feature::HasExternalFormSubmit,
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

    /// The dataset column name for this feature.
    pub fn name(self) -> &'static str {
        match self {
            Feature::UrlLength => "URLLength",
            Feature::DomainLength => "DomainLength",
            Feature::IsDomainIp => "IsDomainIP",
            Feature::UrlSimilarityIndex => "URLSimilarityIndex",
            Feature::CharContinuationRate => "CharContinuationRate",
            Feature::TldLegitimateProb => "TLDLegitimateProb",
            Feature::UrlCharProb => "URLCharProb",
            Feature::TldLength => "TLDLength",
            Feature::NoOfSubDomain => "NoOfSubDomain",
            Feature::HasObfuscation => "HasObfuscation",
            Feature::NoOfObfuscatedChar => "NoOfObfuscatedChar",
            Feature::ObfuscationRatio => "ObfuscationRatio",
            Feature::NoOfLettersInUrl => "NoOfLettersInURL",
            Feature::LetterRatioInUrl => "LetterRatioInURL",
            Feature::NoOfDigitsInUrl => "NoOfDegitsInURL",
            Feature::DigitRatioInUrl => "DegitRatioInURL",
            Feature::NoOfEqualsInUrl => "NoOfEqualsInURL",
            Feature::NoOfQMarkInUrl => "NoOfQMarkInURL",
            Feature::NoOfAmpersandInUrl => "NoOfAmpersandInURL",
            Feature::NoOfOtherSpecialCharsInUrl => "NoOfOtherSpecialCharsInURL",
            Feature::SpecialCharRatioInUrl => "SpacialCharRatioInURL",
            Feature::IsHttps => "IsHTTPS",
            Feature::LineOfCode => "LineOfCode",
            Feature::LargestLineLength => "LargestLineLength",
            Feature::HasTitle => "HasTitle",
            Feature::DomainTitleMatchScore => "DomainTitleMatchScore",
            Feature::UrlTitleMatchScore => "URLTitleMatchScore",
            Feature::HasFavicon => "HasFavicon",
            Feature::Robots => "Robots",
            Feature::IsResponsive => "IsResponsive",
            Feature::NoOfUrlRedirect => "NoOfURLRedirect",
            Feature::NoOfSelfRedirect => "NoOfSelfRedirect",
            Feature::HasDescription => "HasDescription",
            Feature::NoOfPopup => "NoOfPopup",
            Feature::NoOfIframe => "NoOfiFrame",
            Feature::HasExternalFormSubmit => "HasExternalFormSubmit",
            Feature::HasSocialNet => "HasSocialNet",
            Feature::HasSubmitButton => "HasSubmitButton",
            Feature::HasHiddenFields => "HasHiddenFields",
            Feature::HasPasswordField => "HasPasswordField",
            Feature::Bank => "Bank",
            Feature::Pay => "Pay",
            Feature::Crypto => "Crypto",
            Feature::HasCopyrightInfo => "HasCopyrightInfo",
            Feature::NoOfImage => "NoOfImage",
            Feature::NoOfCss => "NoOfCSS",
            Feature::NoOfJs => "NoOfJS",
            Feature::NoOfSelfRef => "NoOfSelfRef",
            Feature::NoOfEmptyRef => "NoOfEmptyRef",
            Feature::NoOfExternalRef => "NoOfExternalRef",
        }
    }

    /// Manifest names in order, for validating persisted artifacts.
    pub fn manifest() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.name()).collect()
    }
}

/// Dense name→value mapping over the full manifest, zero-initialized.
///
/// Extraction writes into the bag; projection via [`FeatureBag::to_vector`]
/// yields the model input in manifest order. Content features left untouched
/// (fetch failed, element absent) keep the training-time default of 0.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBag {
    values: [f64; Feature::COUNT],
}

impl FeatureBag {
    pub fn new() -> Self {
        Self {
            values: [0.0; Feature::COUNT],
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        self.values[feature as usize] = value;
    }

    /// Set a 0/1 flag.
    pub fn set_flag(&mut self, feature: Feature, present: bool) {
        self.set(feature, if present { 1.0 } else { 0.0 });
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature as usize]
    }

    /// Project into a dense vector in manifest order.
    pub fn to_vector(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}

impl Default for FeatureBag {
    fn default() -> Self {
        Self::new()
    }
}
