//! View models: everything a renderer needs for cards, detail pages, the
//! comparison table, and quick summaries, already localized and formatted.

#![allow(missing_docs)]

use serde::Serialize;

use super::format::{NOT_AVAILABLE, format_average, format_inr, rupees_or, rupees_or_na, text_or, title_case};
use crate::dataset::{CandidateId, CandidateRecord, DatasetStats, Insight, Rupees, insights_for};
use crate::directory::PartyFilter;
use crate::locale::catalog::keys;
use crate::locale::{Language, translate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub kind: Insight,
    pub label: String,
}

fn badges(record: &CandidateRecord, stats: &DatasetStats, language: Language) -> Vec<BadgeView> {
    insights_for(record, stats)
        .into_iter()
        .map(|kind| BadgeView {
            kind,
            label: translate(language, kind.label_key()).to_string(),
        })
        .collect()
}

// ──────────────────── card ────────────────────

/// One entry of the candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    /// `inc`, `bjp`, or absent for other parties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_class: Option<&'static str>,
    pub constituency: String,
    pub assets: String,
    pub liabilities: String,
    pub criminal_cases: u32,
    pub has_criminal_cases: bool,
    pub education: String,
    pub badges: Vec<BadgeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affidavit_url: Option<String>,
    pub has_summary: bool,
    pub compared: bool,
}

#[must_use]
pub fn card_view(
    record: &CandidateRecord,
    stats: &DatasetStats,
    language: Language,
    compared: bool,
) -> CardView {
    let dash = translate(language, keys::DASH);
    CardView {
        id: record.id,
        name: record.name.clone(),
        party: record.party.clone(),
        party_class: PartyFilter::classify(&record.party).map(PartyFilter::tag),
        constituency: text_or(record.constituency.as_deref(), dash).to_string(),
        assets: rupees_or(record.assets_inr, dash),
        liabilities: rupees_or(record.liabilities_inr, dash),
        criminal_cases: record.criminal_cases,
        has_criminal_cases: record.has_criminal_cases(),
        education: text_or(record.education.as_deref(), dash).to_string(),
        badges: badges(record, stats, language),
        affidavit_url: record.myneta_url.clone(),
        has_summary: record.plain_language_summary.is_some(),
        compared,
    }
}

// ──────────────────── detail ────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

/// A positive asset amount for breakdown charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub amount: Rupees,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSection {
    pub title: String,
    /// Per-field rows; empty when the section is missing from the record.
    pub rows: Vec<LabeledValue>,
    /// "Data not available." when the section is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub chart: Vec<BreakdownRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomePoint {
    pub label: String,
    pub income: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseItem {
    pub title: String,
    pub charge: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseSection {
    pub count: u32,
    /// "3 cases reported." or "No criminal cases reported."
    pub summary: String,
    pub items: Vec<CaseItem>,
    /// Shown in place of `items` when no case details were declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Full affidavit detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_class: Option<&'static str>,
    pub constituency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub badges: Vec<BadgeView>,
    pub overview: Vec<LabeledValue>,
    pub movable: AssetSection,
    pub immovable: AssetSection,
    pub income: Vec<IncomePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_message: Option<String>,
    pub cases: CaseSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affidavit_url: Option<String>,
}

/// Catalog key for an asset field name.
fn asset_label_key(field: &str) -> Option<&'static str> {
    Some(match field {
        "cash" => keys::CASH,
        "bank_deposits" => keys::BANK_DEPOSITS,
        "bonds_shares" => keys::BONDS_SHARES,
        "vehicles" => keys::VEHICLES,
        "jewellery" => keys::JEWELLERY,
        "agricultural_land" => keys::AGRICULTURAL_LAND,
        "non_agricultural_land" => keys::NON_AGRICULTURAL_LAND,
        "commercial_buildings" => keys::COMMERCIAL_BUILDINGS,
        "residential_buildings" => keys::RESIDENTIAL_BUILDINGS,
        _ => return None,
    })
}

/// Chart rows for a breakdown: positive amounts only, title-cased field names.
#[must_use]
pub fn breakdown_rows(entries: &[(&'static str, Option<Rupees>)]) -> Vec<BreakdownRow> {
    entries
        .iter()
        .filter_map(|&(field, amount)| {
            amount.filter(|&v| v > 0).map(|v| BreakdownRow {
                label: title_case(field),
                amount: v,
                formatted: format_inr(v),
            })
        })
        .collect()
}

fn asset_section(
    title_key: &str,
    entries: Option<&[(&'static str, Option<Rupees>)]>,
    language: Language,
) -> AssetSection {
    let title = translate(language, title_key).to_string();
    let Some(entries) = entries else {
        return AssetSection {
            title,
            rows: Vec::new(),
            message: Some(translate(language, keys::DATA_NOT_AVAILABLE).to_string()),
            chart: Vec::new(),
        };
    };
    let rows = entries
        .iter()
        .map(|&(field, amount)| LabeledValue {
            label: asset_label_key(field)
                .map_or_else(|| title_case(field), |key| translate(language, key).to_string()),
            value: rupees_or_na(amount),
        })
        .collect();
    AssetSection {
        title,
        rows,
        message: None,
        chart: breakdown_rows(entries),
    }
}

/// Numbered case list with fallbacks for missing numbers and charges.
#[must_use]
pub fn case_section(record: &CandidateRecord, language: Language) -> CaseSection {
    let count = record.criminal_cases;
    let summary = if count > 0 {
        format!("{count} {}", translate(language, keys::CASES_REPORTED))
    } else {
        translate(language, keys::NO_CRIMINAL_CASES).to_string()
    };
    let case_word = translate(language, keys::CASE);
    let items: Vec<CaseItem> = record
        .criminal_case_details
        .iter()
        .enumerate()
        .map(|(idx, case)| {
            let number = case
                .case_number
                .clone()
                .unwrap_or_else(|| (idx + 1).to_string());
            CaseItem {
                title: format!("{case_word} {number}"),
                charge: text_or(
                    case.charge.as_deref(),
                    translate(language, keys::CHARGE_NOT_PROVIDED),
                )
                .to_string(),
            }
        })
        .collect();
    let empty_message = items
        .is_empty()
        .then(|| translate(language, keys::NO_CASE_DETAILS).to_string());
    CaseSection {
        count,
        summary,
        items,
        empty_message,
    }
}

#[must_use]
pub fn detail_view(record: &CandidateRecord, stats: &DatasetStats, language: Language) -> DetailView {
    let dash = translate(language, keys::DASH);
    let label = |key: &str| translate(language, key).to_string();

    let overview = vec![
        LabeledValue {
            label: label(keys::ASSETS),
            value: rupees_or_na(record.assets_inr),
        },
        LabeledValue {
            label: label(keys::LIABILITIES),
            value: rupees_or_na(record.liabilities_inr),
        },
        LabeledValue {
            label: label(keys::CRIMINAL_CASES),
            value: record.criminal_cases.to_string(),
        },
        LabeledValue {
            label: label(keys::EDUCATION),
            value: text_or(record.education.as_deref(), dash).to_string(),
        },
        LabeledValue {
            label: label(keys::PROFESSION),
            value: text_or(record.profession.as_deref(), dash).to_string(),
        },
    ];

    let movable = record.movable_assets.as_ref().map(|m| m.entries());
    let immovable = record.immovable_assets.as_ref().map(|i| i.entries());

    let income: Vec<IncomePoint> = record
        .itr_details
        .as_ref()
        .map(|itr| {
            itr.points()
                .into_iter()
                .map(|(year, amount)| IncomePoint {
                    label: year.to_string(),
                    income: rupees_or(amount, NOT_AVAILABLE),
                })
                .collect()
        })
        .unwrap_or_default();
    let income_message = income.is_empty().then(|| label(keys::NO_INCOME_DATA));

    DetailView {
        id: record.id,
        name: record.name.clone(),
        party: record.party.clone(),
        party_class: PartyFilter::classify(&record.party).map(PartyFilter::tag),
        constituency: text_or(record.constituency.as_deref(), dash).to_string(),
        photo_url: record.photo_url.clone(),
        badges: badges(record, stats, language),
        overview,
        movable: asset_section(keys::MOVABLE_ASSETS, movable.as_ref().map(|e| &e[..]), language),
        immovable: asset_section(keys::IMMOVABLE_ASSETS, immovable.as_ref().map(|e| &e[..]), language),
        income,
        income_message,
        cases: case_section(record, language),
        summary: record.plain_language_summary.clone(),
        affidavit_url: record.myneta_url.clone(),
    }
}

// ──────────────────── summary ────────────────────

/// Quick-summary dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub id: CandidateId,
    pub name: String,
    pub text: String,
    pub has_summary: bool,
}

#[must_use]
pub fn summary_view(record: &CandidateRecord, language: Language) -> SummaryView {
    let summary = record
        .plain_language_summary
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    SummaryView {
        id: record.id,
        name: record.name.clone(),
        text: summary
            .unwrap_or_else(|| translate(language, keys::NO_SUMMARY_AVAILABLE))
            .to_string(),
        has_summary: summary.is_some(),
    }
}

// ──────────────────── comparison ────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonColumn {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonCell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub cells: Vec<ComparisonCell>,
}

/// Side-by-side table, one column per member in toggle order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub title: String,
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

fn comparison_row(
    members: &[&CandidateRecord],
    label: &str,
    cell: impl Fn(&CandidateRecord) -> ComparisonCell,
) -> ComparisonRow {
    ComparisonRow {
        label: label.to_string(),
        cells: members.iter().map(|m| cell(m)).collect(),
    }
}

const fn plain(text: String) -> ComparisonCell {
    ComparisonCell { text, link: None }
}

#[must_use]
pub fn comparison_table(members: &[&CandidateRecord], language: Language) -> ComparisonTable {
    let dash = translate(language, keys::DASH);

    let rows = vec![
        comparison_row(members, translate(language, keys::CONSTITUENCY), |m| {
            plain(text_or(m.constituency.as_deref(), dash).to_string())
        }),
        comparison_row(members, translate(language, keys::PROFESSION), |m| {
            plain(text_or(m.profession.as_deref(), dash).to_string())
        }),
        comparison_row(members, translate(language, keys::ASSETS), |m| {
            plain(rupees_or(m.assets_inr, dash))
        }),
        comparison_row(members, translate(language, keys::LIABILITIES), |m| {
            plain(rupees_or(m.liabilities_inr, dash))
        }),
        comparison_row(members, translate(language, keys::CRIMINAL_CASES), |m| {
            plain(m.criminal_cases.to_string())
        }),
        comparison_row(members, translate(language, keys::EDUCATION), |m| {
            plain(text_or(m.education.as_deref(), dash).to_string())
        }),
        comparison_row(members, translate(language, keys::AFFIDAVIT), |m| match &m.myneta_url {
            Some(url) => ComparisonCell {
                text: translate(language, keys::OPEN).to_string(),
                link: Some(url.clone()),
            },
            None => plain(dash.to_string()),
        }),
    ];

    ComparisonTable {
        title: translate(language, keys::COMPARE_CANDIDATES).to_string(),
        columns: members
            .iter()
            .map(|m| ComparisonColumn {
                id: m.id,
                name: m.name.clone(),
                party: m.party.clone(),
            })
            .collect(),
        rows,
    }
}

// ──────────────────── stats ────────────────────

/// Header counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub total: usize,
    pub visible: usize,
    pub average_assets: String,
    pub with_criminal_cases: usize,
    pub compared: usize,
}

#[must_use]
pub fn stats_view(stats: &DatasetStats, visible: usize, compared: usize) -> StatsView {
    StatsView {
        total: stats.count,
        visible,
        average_assets: format_average(stats.average_assets),
        with_criminal_cases: stats.with_criminal_cases,
        compared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::{CaseDetail, ImmovableAssets, IncomeHistory, MovableAssets};

    fn alice() -> CandidateRecord {
        let mut r = CandidateRecord::new(1, "Alice", "Indian National Congress");
        r.constituency = Some("Varanasi".into());
        r.assets_inr = Some(12_345_678);
        r.criminal_cases = 3;
        r.myneta_url = Some("https://myneta.info/c/1".into());
        r
    }

    fn stats_for(records: &[CandidateRecord]) -> DatasetStats {
        DatasetStats::compute(records)
    }

    #[test]
    fn card_formats_and_falls_back_to_dash() {
        let rec = alice();
        let stats = stats_for(&[rec.clone(), CandidateRecord::new(2, "B", "BJP")]);
        let card = card_view(&rec, &stats, Language::En, true);
        assert_eq!(card.party_class, Some("inc"));
        assert_eq!(card.assets, "₹1,23,45,678");
        assert_eq!(card.liabilities, "—");
        assert_eq!(card.education, "—");
        assert!(card.has_criminal_cases);
        assert!(card.compared);
        assert!(!card.has_summary);
        let kinds: Vec<_> = card.badges.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![Insight::HighCriminalCaseCount]);
        assert_eq!(card.badges[0].label, "High Criminal Case Count");
    }

    #[test]
    fn card_labels_follow_language() {
        let mut rec = alice();
        rec.assets_inr = Some(1_000);
        let mut low = CandidateRecord::new(2, "B", "BJP");
        low.assets_inr = Some(0);
        let stats = stats_for(&[rec.clone(), low.clone(), low]);
        let card = card_view(&rec, &stats, Language::Hi, false);
        assert_eq!(card.badges.len(), 2);
        assert_ne!(card.badges[0].label, "High Assets");
    }

    #[test]
    fn missing_breakdown_says_not_available() {
        let rec = alice();
        let detail = detail_view(&rec, &stats_for(&[rec.clone()]), Language::En);
        assert_eq!(detail.movable.message.as_deref(), Some("Data not available."));
        assert!(detail.movable.rows.is_empty());
        assert_eq!(detail.overview[1].value, "N/A");
        assert_eq!(detail.income_message.as_deref(), Some("No income data available"));
    }

    #[test]
    fn breakdown_rows_and_chart() {
        let mut rec = alice();
        rec.movable_assets = Some(MovableAssets {
            cash: Some(50_000),
            bank_deposits: Some(0),
            jewellery: Some(120_000),
            ..MovableAssets::default()
        });
        rec.immovable_assets = Some(ImmovableAssets::default());
        let detail = detail_view(&rec, &stats_for(&[rec.clone()]), Language::En);
        let rows: Vec<_> = detail
            .movable
            .rows
            .iter()
            .map(|r| (r.label.as_str(), r.value.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Cash", "₹50,000"),
                ("Bank Deposits", "N/A"),
                ("Bonds/Shares", "N/A"),
                ("Vehicles", "N/A"),
                ("Jewellery", "₹1,20,000"),
            ]
        );
        let chart: Vec<_> = detail.movable.chart.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(chart, vec!["Cash", "Jewellery"]);
        assert!(detail.immovable.chart.is_empty());
        assert!(detail.immovable.message.is_none());
    }

    #[test]
    fn income_pairs_labels_with_amounts() {
        let mut rec = alice();
        rec.itr_details = Some(IncomeHistory {
            labels: vec!["2021-22".into(), "2022-23".into()],
            income: vec![Some(900_000), None],
        });
        let detail = detail_view(&rec, &stats_for(&[rec.clone()]), Language::En);
        assert_eq!(detail.income.len(), 2);
        assert_eq!(detail.income[0].income, "₹9,00,000");
        assert_eq!(detail.income[1].income, "N/A");
        assert!(detail.income_message.is_none());
    }

    #[test]
    fn case_list_numbers_and_fallbacks() {
        let mut rec = alice();
        rec.criminal_case_details = vec![
            CaseDetail {
                case_number: Some("FIR 12/2019".into()),
                charge: Some("IPC 420".into()),
            },
            CaseDetail {
                case_number: None,
                charge: None,
            },
        ];
        let cases = case_section(&rec, Language::En);
        assert_eq!(cases.summary, "3 cases reported.");
        assert_eq!(cases.items[0].title, "Case FIR 12/2019");
        assert_eq!(cases.items[1].title, "Case 2");
        assert_eq!(cases.items[1].charge, "Charge details not provided");
        assert!(cases.empty_message.is_none());
    }

    #[test]
    fn no_cases_reported() {
        let rec = CandidateRecord::new(5, "Clean", "BJP");
        let cases = case_section(&rec, Language::En);
        assert_eq!(cases.summary, "No criminal cases reported.");
        assert!(cases.items.is_empty());
        assert!(cases.empty_message.is_some());
    }

    #[test]
    fn summary_falls_back() {
        let mut rec = alice();
        assert_eq!(summary_view(&rec, Language::En).text, "No summary available.");
        rec.plain_language_summary = Some("Two-term MLA.".into());
        let view = summary_view(&rec, Language::En);
        assert!(view.has_summary);
        assert_eq!(view.text, "Two-term MLA.");
    }

    #[test]
    fn comparison_table_rows_and_links() {
        let a = alice();
        let mut b = CandidateRecord::new(2, "Bob", "BJP");
        b.profession = Some("Farmer".into());
        let table = comparison_table(&[&b, &a], Language::En);
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
        let labels: Vec<_> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Constituency",
                "Profession",
                "Assets",
                "Liabilities",
                "Criminal cases",
                "Education",
                "Affidavit"
            ]
        );
        let affidavit = &table.rows[6].cells;
        assert_eq!(affidavit[0].text, "—");
        assert_eq!(affidavit[1].text, "Open");
        assert_eq!(affidavit[1].link.as_deref(), Some("https://myneta.info/c/1"));
        assert_eq!(table.rows[1].cells[0].text, "Farmer");
        assert_eq!(table.rows[2].cells[0].text, "—");
    }

    #[test]
    fn stats_view_formats_average() {
        let records = [alice(), CandidateRecord::new(2, "B", "BJP")];
        let view = stats_view(&stats_for(&records), 1, 0);
        assert_eq!(view.total, 2);
        assert_eq!(view.visible, 1);
        assert_eq!(view.average_assets, "₹61,72,839");
    }
}
