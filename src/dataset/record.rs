//! Candidate affidavit records as they appear in the published dataset.
//!
//! Only `id`, `name` and `party` are required. Every other field is read
//! leniently: a missing, `null` or wrongly-typed value becomes "absent"
//! instead of failing the whole record.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Alternate key spellings seen in published datasets, as
/// `(field key, other spelling)`. The field key wins when both are present.
const KEY_SPELLINGS: [(&str, &str); 4] = [
    ("assets_inr", "assetsInr"),
    ("liabilities_inr", "liabilitiesInr"),
    ("criminal_cases", "criminalCases"),
    ("plainLanguageSummary", "plain_language_summary"),
];

/// Stable candidate identifier, unique within a loaded dataset.
pub type CandidateId = u64;

/// Whole rupees. Fractional amounts are rounded when read.
pub type Rupees = u64;

/// One candidate's affidavit disclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub assets_inr: Option<Rupees>,
    #[serde(
        default,
        deserialize_with = "lenient::amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub liabilities_inr: Option<Rupees>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub criminal_cases: u32,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub myneta_url: Option<String>,
    #[serde(
        default,
        rename = "plainLanguageSummary",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub plain_language_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::nested", skip_serializing_if = "Option::is_none")]
    pub movable_assets: Option<MovableAssets>,
    #[serde(default, deserialize_with = "lenient::nested", skip_serializing_if = "Option::is_none")]
    pub immovable_assets: Option<ImmovableAssets>,
    #[serde(default, deserialize_with = "lenient::nested", skip_serializing_if = "Option::is_none")]
    pub itr_details: Option<IncomeHistory>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub criminal_case_details: Vec<CaseDetail>,
}

impl CandidateRecord {
    /// Read one dataset entry. Amount, case-count and summary keys may use
    /// either snake_case or camelCase; snake_case wins when both appear.
    pub fn from_json(mut value: Value) -> serde_json::Result<Self> {
        if let Value::Object(fields) = &mut value {
            unify_spellings(fields);
        }
        serde_json::from_value(value)
    }

    /// Minimal record; every optional field absent.
    #[must_use]
    pub fn new(id: CandidateId, name: impl Into<String>, party: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            party: party.into(),
            constituency: None,
            profession: None,
            education: None,
            assets_inr: None,
            liabilities_inr: None,
            criminal_cases: 0,
            photo_url: None,
            myneta_url: None,
            plain_language_summary: None,
            movable_assets: None,
            immovable_assets: None,
            itr_details: None,
            criminal_case_details: Vec::new(),
        }
    }

    /// Declared assets, absent counted as zero.
    #[must_use]
    pub fn assets_or_zero(&self) -> Rupees {
        self.assets_inr.unwrap_or(0)
    }

    /// Declared liabilities, absent counted as zero.
    #[must_use]
    pub fn liabilities_or_zero(&self) -> Rupees {
        self.liabilities_inr.unwrap_or(0)
    }

    #[must_use]
    pub const fn has_criminal_cases(&self) -> bool {
        self.criminal_cases > 0
    }

    /// Text fields searched by the directory, skipping absent ones.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.name.as_str()),
            Some(self.party.as_str()),
            self.constituency.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

fn unify_spellings(fields: &mut Map<String, Value>) {
    for (key, other) in KEY_SPELLINGS {
        if let Some(value) = fields.remove(other)
            && !fields.contains_key(key)
        {
            fields.insert(key.to_owned(), value);
        }
    }
}

/// Movable asset breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovableAssets {
    #[serde(deserialize_with = "lenient::amount")]
    pub cash: Option<Rupees>,
    #[serde(deserialize_with = "lenient::amount")]
    pub bank_deposits: Option<Rupees>,
    #[serde(deserialize_with = "lenient::amount")]
    pub bonds_shares: Option<Rupees>,
    #[serde(deserialize_with = "lenient::amount")]
    pub vehicles: Option<Rupees>,
    #[serde(deserialize_with = "lenient::amount")]
    pub jewellery: Option<Rupees>,
}

impl MovableAssets {
    /// `(field name, amount)` pairs in display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, Option<Rupees>); 5] {
        [
            ("cash", self.cash),
            ("bank_deposits", self.bank_deposits),
            ("bonds_shares", self.bonds_shares),
            ("vehicles", self.vehicles),
            ("jewellery", self.jewellery),
        ]
    }
}

/// Immovable asset breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImmovableAssets {
    #[serde(deserialize_with = "lenient::amount")]
    pub agricultural_land: Option<Rupees>,
    #[serde(deserialize_with = "lenient::amount")]
    pub non_agricultural_land: Option<Rupees>,
    #[serde(deserialize_with = "lenient::amount")]
    pub commercial_buildings: Option<Rupees>,
    #[serde(deserialize_with = "lenient::amount")]
    pub residential_buildings: Option<Rupees>,
}

impl ImmovableAssets {
    /// `(field name, amount)` pairs in display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, Option<Rupees>); 4] {
        [
            ("agricultural_land", self.agricultural_land),
            ("non_agricultural_land", self.non_agricultural_land),
            ("commercial_buildings", self.commercial_buildings),
            ("residential_buildings", self.residential_buildings),
        ]
    }
}

/// Declared income per assessment year, from income-tax returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeHistory {
    #[serde(deserialize_with = "lenient::list")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "lenient::amounts")]
    pub income: Vec<Option<Rupees>>,
}

impl IncomeHistory {
    /// Year/income pairs. Empty when either side is empty.
    #[must_use]
    pub fn points(&self) -> Vec<(&str, Option<Rupees>)> {
        if self.labels.is_empty() || self.income.is_empty() {
            return Vec::new();
        }
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.income.iter().copied())
            .collect()
    }
}

/// One declared criminal case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseDetail {
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub charge: Option<String>,
}

/// Deserializers that map malformed values to "absent" instead of failing.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Rupees;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(value_to_text(Value::deserialize(d)?))
    }

    pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Rupees>, D::Error> {
        Ok(value_to_amount(&Value::deserialize(d)?))
    }

    pub fn amounts<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Option<Rupees>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.iter().map(value_to_amount).collect(),
            _ => Vec::new(),
        })
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        Ok(value_to_amount(&Value::deserialize(d)?)
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX)))
    }

    pub fn nested<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        })
    }

    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    fn value_to_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn value_to_amount(value: &Value) -> Option<Rupees> {
        let raw = match value {
            Value::Number(n) => {
                if let Some(whole) = n.as_u64() {
                    return Some(whole);
                }
                n.as_f64()?
            }
            Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
            _ => return None,
        };
        // Saturating cast; negative and non-finite amounts are not disclosures.
        (raw.is_finite() && raw >= 0.0).then(|| raw.round() as Rupees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CandidateRecord {
        CandidateRecord::from_json(serde_json::from_str(json).unwrap()).unwrap()
    }

    #[test]
    fn minimal_record_has_absent_optionals() {
        let rec = parse(r#"{"id": 1, "name": "Asha", "party": "Independent"}"#);
        assert_eq!(rec, CandidateRecord::new(1, "Asha", "Independent"));
        assert_eq!(rec.assets_or_zero(), 0);
        assert!(!rec.has_criminal_cases());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        assert!(serde_json::from_str::<CandidateRecord>(r#"{"id": 1, "name": "A"}"#).is_err());
        assert!(serde_json::from_str::<CandidateRecord>(r#"{"name": "A", "party": "B"}"#).is_err());
    }

    #[test]
    fn camel_case_spellings_are_accepted() {
        let rec = parse(
            r#"{"id": 2, "name": "B", "party": "P", "assetsInr": 500,
                "liabilitiesInr": 20, "criminalCases": 3,
                "plain_language_summary": "short"}"#,
        );
        assert_eq!(rec.assets_inr, Some(500));
        assert_eq!(rec.liabilities_inr, Some(20));
        assert_eq!(rec.criminal_cases, 3);
        assert_eq!(rec.plain_language_summary.as_deref(), Some("short"));
    }

    #[test]
    fn both_spellings_prefer_snake_case() {
        let rec = parse(
            r#"{"id": 9, "name": "I", "party": "P",
                "assets_inr": 100, "assetsInr": 999,
                "liabilities_inr": 5, "liabilitiesInr": 6,
                "criminal_cases": 1, "criminalCases": 4,
                "plainLanguageSummary": "kept", "plain_language_summary": "dropped"}"#,
        );
        assert_eq!(rec.assets_inr, Some(100));
        assert_eq!(rec.liabilities_inr, Some(5));
        assert_eq!(rec.criminal_cases, 1);
        assert_eq!(rec.plain_language_summary.as_deref(), Some("kept"));
    }

    #[test]
    fn malformed_snake_case_value_is_not_replaced_by_other_spelling() {
        let rec = parse(r#"{"id": 10, "name": "J", "party": "P", "assets_inr": "?", "assetsInr": 7}"#);
        assert_eq!(rec.assets_inr, None);
    }

    #[test]
    fn malformed_optionals_become_absent() {
        let rec = parse(
            r#"{"id": 3, "name": "C", "party": "P",
                "constituency": null, "education": ["x"], "profession": "  ",
                "assets_inr": "lots", "liabilities_inr": -5,
                "criminal_cases": {"n": 1},
                "movable_assets": "none", "criminal_case_details": 7}"#,
        );
        assert_eq!(rec.constituency, None);
        assert_eq!(rec.education, None);
        assert_eq!(rec.profession, None);
        assert_eq!(rec.assets_inr, None);
        assert_eq!(rec.liabilities_inr, None);
        assert_eq!(rec.criminal_cases, 0);
        assert_eq!(rec.movable_assets, None);
        assert!(rec.criminal_case_details.is_empty());
    }

    #[test]
    fn numeric_strings_and_fractions_are_read() {
        let rec = parse(
            r#"{"id": 4, "name": "D", "party": "P",
                "assets_inr": "1,25,000", "liabilities_inr": 99.6, "criminal_cases": "2"}"#,
        );
        assert_eq!(rec.assets_inr, Some(125_000));
        assert_eq!(rec.liabilities_inr, Some(100));
        assert_eq!(rec.criminal_cases, 2);
    }

    #[test]
    fn nested_breakdowns_parse_leniently() {
        let rec = parse(
            r#"{"id": 5, "name": "E", "party": "P",
                "movable_assets": {"cash": 1000, "vehicles": "n/a"},
                "immovable_assets": {"agricultural_land": 5},
                "itr_details": {"labels": ["2021-22", "2022-23"], "income": [100, null]},
                "criminal_case_details": [{"case_number": 12, "charge": "IPC 420"}, "junk", {}]}"#,
        );
        let movable = rec.movable_assets.unwrap();
        assert_eq!(movable.cash, Some(1000));
        assert_eq!(movable.vehicles, None);
        assert_eq!(rec.immovable_assets.unwrap().agricultural_land, Some(5));
        let itr = rec.itr_details.unwrap();
        assert_eq!(itr.points(), vec![("2021-22", Some(100)), ("2022-23", None)]);
        assert_eq!(rec.criminal_case_details.len(), 2);
        assert_eq!(rec.criminal_case_details[0].case_number.as_deref(), Some("12"));
        assert_eq!(rec.criminal_case_details[1], CaseDetail::default());
    }

    #[test]
    fn income_points_empty_when_one_side_missing() {
        let itr = IncomeHistory {
            labels: vec!["2020".into()],
            income: Vec::new(),
        };
        assert!(itr.points().is_empty());
    }

    #[test]
    fn searchable_fields_skip_missing_constituency() {
        let mut rec = CandidateRecord::new(6, "F", "Q");
        assert_eq!(rec.searchable_fields().count(), 2);
        rec.constituency = Some("Varanasi".into());
        assert_eq!(
            rec.searchable_fields().collect::<Vec<_>>(),
            vec!["F", "Q", "Varanasi"]
        );
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let json = serde_json::to_string(&CandidateRecord::new(7, "G", "R")).unwrap();
        assert!(!json.contains("assets_inr"));
        assert!(!json.contains("plainLanguageSummary"));
        assert!(json.contains("\"criminal_cases\":0"));
    }
}
