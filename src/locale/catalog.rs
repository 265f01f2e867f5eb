//! Localized string tables keyed by language, with English fallback.
//!
//! Lookup order is requested language → [`Language::FALLBACK`] → the key
//! itself, so a missing translation degrades to readable English and a
//! missing key degrades to the key name instead of an empty cell.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::SaarthiError;

/// Languages the directory can render in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (fallback language).
    #[default]
    En,
    /// Hindi.
    Hi,
}

impl Language {
    /// Every supported language, in toggle order.
    pub const ALL: [Self; 2] = [Self::En, Self::Hi];

    /// Language consulted when a key is missing from the requested table.
    pub const FALLBACK: Self = Self::En;

    /// BCP-47 style tag persisted in preferences.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    /// Resolve a tag (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "hi" => Some(Self::Hi),
            _ => None,
        }
    }

    /// The other language; the toggle flips between the two.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Hi,
            Self::Hi => Self::En,
        }
    }

    /// Name of the language in its own script.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "हिंदी",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = SaarthiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| SaarthiError::UnsupportedLanguage { tag: s.to_string() })
    }
}

/// Message keys shared by every table.
#[allow(missing_docs)]
pub mod keys {
    pub const APP_TITLE: &str = "appTitle";
    pub const APP_SUBTITLE: &str = "appSubtitle";
    pub const HERO_TITLE: &str = "heroTitle";
    pub const HERO_SUBTITLE: &str = "heroSubtitle";
    pub const TOTAL_CANDIDATES: &str = "totalCandidates";
    pub const VISIBLE: &str = "visible";
    pub const ALL: &str = "all";
    pub const INC: &str = "inc";
    pub const BJP: &str = "bjp";
    pub const SORT: &str = "sort";
    pub const RELEVANCE: &str = "relevance";
    pub const ASSETS_HIGH_TO_LOW: &str = "assetsHighToLow";
    pub const ASSETS_LOW_TO_HIGH: &str = "assetsLowToHigh";
    pub const NAME_A_Z: &str = "nameAZ";
    pub const ASSETS: &str = "assets";
    pub const CRIMINAL_CASES: &str = "criminalCases";
    pub const LIABILITIES: &str = "liabilities";
    pub const EDUCATION: &str = "education";
    pub const VIEW_AFFIDAVIT: &str = "viewAffidavit";
    pub const QUICK_SUMMARY: &str = "quickSummary";
    pub const COMPARE: &str = "compare";
    pub const HIGH_ASSETS: &str = "highAssets";
    pub const HIGH_CRIMINAL_CASE_COUNT: &str = "highCriminalCaseCount";
    pub const NO_CANDIDATES_FOUND: &str = "noCandidatesFound";
    pub const TRY_ADJUSTING_FILTERS: &str = "tryAdjustingFilters";
    pub const CLEAR_SEARCH_FILTERS: &str = "clearSearchFilters";
    pub const COMPARE_CANDIDATES: &str = "compareCandidates";
    pub const PARTY: &str = "party";
    pub const CONSTITUENCY: &str = "constituency";
    pub const PROFESSION: &str = "profession";
    pub const AFFIDAVIT: &str = "affidavit";
    pub const OPEN: &str = "open";
    pub const SELECT_AT_LEAST_2: &str = "selectAtLeast2";
    pub const CLOSE: &str = "close";
    pub const NO_SUMMARY_AVAILABLE: &str = "noSummaryAvailable";
    pub const DASH: &str = "dash";
    pub const OVERVIEW: &str = "overview";
    pub const MOVABLE_ASSETS: &str = "movableAssets";
    pub const IMMOVABLE_ASSETS: &str = "immovableAssets";
    pub const DATA_NOT_AVAILABLE: &str = "dataNotAvailable";
    pub const CRIMINAL_CASE_DETAILS: &str = "criminalCaseDetails";
    pub const CASES_REPORTED: &str = "casesReported";
    pub const NO_CRIMINAL_CASES: &str = "noCriminalCases";
    pub const NO_CASE_DETAILS: &str = "noCaseDetails";
    pub const CASE: &str = "case";
    pub const CHARGE_NOT_PROVIDED: &str = "chargeNotProvided";
    pub const INCOME_HISTORY: &str = "incomeHistory";
    pub const NO_INCOME_DATA: &str = "noIncomeData";
    pub const AVERAGE_ASSETS: &str = "averageAssets";
    pub const CANDIDATE_NOT_FOUND: &str = "candidateNotFound";
    pub const DATA_LOAD_FAILED: &str = "dataLoadFailed";
    pub const CASH: &str = "cash";
    pub const BANK_DEPOSITS: &str = "bankDeposits";
    pub const BONDS_SHARES: &str = "bondsShares";
    pub const VEHICLES: &str = "vehicles";
    pub const JEWELLERY: &str = "jewellery";
    pub const AGRICULTURAL_LAND: &str = "agriculturalLand";
    pub const NON_AGRICULTURAL_LAND: &str = "nonAgriculturalLand";
    pub const COMMERCIAL_BUILDINGS: &str = "commercialBuildings";
    pub const RESIDENTIAL_BUILDINGS: &str = "residentialBuildings";
}

type Table = &'static [(&'static str, &'static str)];

const EN: Table = &[
    (keys::APP_TITLE, "Jan Saarthi"),
    (keys::APP_SUBTITLE, "Your guide to informed voting decisions"),
    (keys::HERO_TITLE, "Discover and compare candidates"),
    (
        keys::HERO_SUBTITLE,
        "Search, filter and inspect affidavits to make informed choices.",
    ),
    (keys::TOTAL_CANDIDATES, "Total candidates"),
    (keys::VISIBLE, "Visible"),
    (keys::ALL, "All"),
    (keys::INC, "INC"),
    (keys::BJP, "BJP"),
    (keys::SORT, "Sort"),
    (keys::RELEVANCE, "Relevance"),
    (keys::ASSETS_HIGH_TO_LOW, "Assets: High to Low"),
    (keys::ASSETS_LOW_TO_HIGH, "Assets: Low to High"),
    (keys::NAME_A_Z, "Name: A to Z"),
    (keys::ASSETS, "Assets"),
    (keys::CRIMINAL_CASES, "Criminal cases"),
    (keys::LIABILITIES, "Liabilities"),
    (keys::EDUCATION, "Education"),
    (keys::VIEW_AFFIDAVIT, "View affidavit"),
    (keys::QUICK_SUMMARY, "Quick summary"),
    (keys::COMPARE, "Compare"),
    (keys::HIGH_ASSETS, "High Assets"),
    (keys::HIGH_CRIMINAL_CASE_COUNT, "High Criminal Case Count"),
    (keys::NO_CANDIDATES_FOUND, "No candidates found"),
    (keys::TRY_ADJUSTING_FILTERS, "Try adjusting your search or filters."),
    (keys::CLEAR_SEARCH_FILTERS, "Clear search & filters"),
    (keys::COMPARE_CANDIDATES, "Compare Candidates"),
    (keys::PARTY, "Party"),
    (keys::CONSTITUENCY, "Constituency"),
    (keys::PROFESSION, "Profession"),
    (keys::AFFIDAVIT, "Affidavit"),
    (keys::OPEN, "Open"),
    (keys::SELECT_AT_LEAST_2, "Select at least 2 to compare"),
    (keys::CLOSE, "Close"),
    (keys::NO_SUMMARY_AVAILABLE, "No summary available."),
    (keys::DASH, "—"),
    (keys::OVERVIEW, "Overview"),
    (keys::MOVABLE_ASSETS, "Movable Assets"),
    (keys::IMMOVABLE_ASSETS, "Immovable Assets"),
    (keys::DATA_NOT_AVAILABLE, "Data not available."),
    (keys::CRIMINAL_CASE_DETAILS, "Criminal Case Details"),
    (keys::CASES_REPORTED, "cases reported."),
    (keys::NO_CRIMINAL_CASES, "No criminal cases reported."),
    (
        keys::NO_CASE_DETAILS,
        "No detailed case information available.",
    ),
    (keys::CASE, "Case"),
    (keys::CHARGE_NOT_PROVIDED, "Charge details not provided"),
    (keys::INCOME_HISTORY, "Income History (from ITR)"),
    (keys::NO_INCOME_DATA, "No income data available"),
    (keys::AVERAGE_ASSETS, "Average assets"),
    (keys::CANDIDATE_NOT_FOUND, "Candidate not found."),
    (keys::DATA_LOAD_FAILED, "Candidate data could not be loaded."),
    (keys::CASH, "Cash"),
    (keys::BANK_DEPOSITS, "Bank Deposits"),
    (keys::BONDS_SHARES, "Bonds/Shares"),
    (keys::VEHICLES, "Vehicles"),
    (keys::JEWELLERY, "Jewellery"),
    (keys::AGRICULTURAL_LAND, "Agricultural Land"),
    (keys::NON_AGRICULTURAL_LAND, "Non-Agricultural Land"),
    (keys::COMMERCIAL_BUILDINGS, "Commercial Buildings"),
    (keys::RESIDENTIAL_BUILDINGS, "Residential Buildings"),
];

const HI: Table = &[
    (keys::APP_TITLE, "जन सारथी"),
    (
        keys::APP_SUBTITLE,
        "सूचित मतदान निर्णयों के लिए आपका मार्गदर्शक",
    ),
    (keys::HERO_TITLE, "उम्मीदवारों को खोजें और तुलना करें"),
    (
        keys::HERO_SUBTITLE,
        "सूचित विकल्प बनाने के लिए खोजें, फ़िल्टर करें और शपथ पत्रों का निरीक्षण करें।",
    ),
    (keys::TOTAL_CANDIDATES, "कुल उम्मीदवार"),
    (keys::VISIBLE, "दिखाई दे रहे"),
    (keys::ALL, "सभी"),
    (keys::INC, "कांग्रेस"),
    (keys::BJP, "भाजपा"),
    (keys::SORT, "क्रमबद्ध करें"),
    (keys::RELEVANCE, "प्रासंगिकता"),
    (keys::ASSETS_HIGH_TO_LOW, "संपत्ति: उच्च से निम्न"),
    (keys::ASSETS_LOW_TO_HIGH, "संपत्ति: निम्न से उच्च"),
    (keys::NAME_A_Z, "नाम: ए से जेड"),
    (keys::ASSETS, "संपत्ति"),
    (keys::CRIMINAL_CASES, "आपराधिक मामले"),
    (keys::LIABILITIES, "देनदारी"),
    (keys::EDUCATION, "शिक्षा"),
    (keys::VIEW_AFFIDAVIT, "शपथ पत्र देखें"),
    (keys::QUICK_SUMMARY, "त्वरित सारांश"),
    (keys::COMPARE, "तुलना करें"),
    (keys::HIGH_ASSETS, "उच्च संपत्ति"),
    (
        keys::HIGH_CRIMINAL_CASE_COUNT,
        "उच्च आपराधिक मामलों की संख्या",
    ),
    (keys::NO_CANDIDATES_FOUND, "कोई उम्मीदवार नहीं मिला"),
    (
        keys::TRY_ADJUSTING_FILTERS,
        "अपनी खोज या फ़िल्टर को समायोजित करने का प्रयास करें।",
    ),
    (keys::CLEAR_SEARCH_FILTERS, "खोज और फ़िल्टर साफ़ करें"),
    (keys::COMPARE_CANDIDATES, "उम्मीदवारों की तुलना करें"),
    (keys::PARTY, "पार्टी"),
    (keys::CONSTITUENCY, "निर्वाचन क्षेत्र"),
    (keys::PROFESSION, "पेशा"),
    (keys::AFFIDAVIT, "शपथ पत्र"),
    (keys::OPEN, "खोलें"),
    (keys::SELECT_AT_LEAST_2, "तुलना के लिए कम से कम 2 चुनें"),
    (keys::CLOSE, "बंद करें"),
    (keys::NO_SUMMARY_AVAILABLE, "कोई सारांश उपलब्ध नहीं है।"),
    (keys::DASH, "—"),
    (keys::OVERVIEW, "अवलोकन"),
    (keys::MOVABLE_ASSETS, "चल संपत्ति"),
    (keys::IMMOVABLE_ASSETS, "अचल संपत्ति"),
    (keys::DATA_NOT_AVAILABLE, "डेटा उपलब्ध नहीं है।"),
    (keys::CRIMINAL_CASE_DETAILS, "आपराधिक मामलों का विवरण"),
    (keys::NO_CRIMINAL_CASES, "कोई आपराधिक मामला दर्ज नहीं है।"),
    (keys::CASE, "मामला"),
    (keys::INCOME_HISTORY, "आय इतिहास (आयकर रिटर्न से)"),
    (keys::AVERAGE_ASSETS, "औसत संपत्ति"),
    (keys::CANDIDATE_NOT_FOUND, "उम्मीदवार नहीं मिला।"),
];

const fn table(language: Language) -> Table {
    match language {
        Language::En => EN,
        Language::Hi => HI,
    }
}

/// Look a key up in exactly one language's table.
#[must_use]
pub fn lookup(language: Language, key: &str) -> Option<&'static str> {
    table(language)
        .iter()
        .find_map(|(k, v)| (*k == key).then_some(*v))
}

/// Translate `key`, falling back to English and then to the key itself.
#[must_use]
pub fn translate(language: Language, key: &str) -> &str {
    lookup(language, key)
        .or_else(|| lookup(Language::FALLBACK, key))
        .unwrap_or(key)
}

/// Keys present in the fallback table but missing from `language`.
#[must_use]
pub fn missing_keys(language: Language) -> Vec<&'static str> {
    EN.iter()
        .map(|(k, _)| *k)
        .filter(|k| lookup(language, k).is_none())
        .collect()
}
