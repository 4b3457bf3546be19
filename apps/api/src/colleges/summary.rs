//! Display-ready view of one school's cost, outcome and demographic columns.

use serde::Serialize;

use crate::colleges::dataset::CsvRecord;

/// Net price after aid, by family income bracket (thousands of dollars).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostAfterAid {
    pub income_0_30: Option<f64>,
    pub income_30_48: Option<f64>,
    pub income_48_75: Option<f64>,
    pub income_75_110: Option<f64>,
    pub income_110_plus: Option<f64>,
}

/// Share of enrolled students by group, as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub white: Option<f64>,
    pub black: Option<f64>,
    pub hispanic: Option<f64>,
    pub asian: Option<f64>,
    pub hawaiian_pacific_islander: Option<f64>,
    pub multiracial: Option<f64>,
    pub unknown: Option<f64>,
    pub international: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolSummary {
    pub name: String,
    pub website_link: String,
    pub financial_aid_calc: String,
    pub avg_debt: Option<f64>,
    pub avg_monthly_repay: Option<f64>,
    pub school_median_earnings: Option<f64>,
    pub national_4_year_median: Option<f64>,
    /// Earnings relative to high-school graduates, as a percentage.
    pub earnings_vs_hs_grad_pct: Option<f64>,
    /// Monthly repayment as a percentage of monthly earnings.
    pub monthly_repay_pct: Option<f64>,
    pub cost_after_aid: CostAfterAid,
    pub demographics: Demographics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub website_link: String,
}

impl SearchHit {
    pub fn from_record(record: &CsvRecord) -> Self {
        Self {
            name: record.name().to_string(),
            website_link: normalize_link(record.get("WEBSITE_LINK").unwrap_or_default()),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn money(record: &CsvRecord, column: &str) -> Option<f64> {
    record.number(column).map(round2)
}

/// Fraction columns (`0.0712`) shown as percentages (`7.12`).
fn percent(record: &CsvRecord, column: &str) -> Option<f64> {
    record.number(column).map(|v| round2(v * 100.0))
}

/// Makes a stored link clickable: blank becomes `#`, bare hosts get `https://`.
pub fn normalize_link(raw: &str) -> String {
    let url = raw.trim();
    if url.is_empty() {
        "#".to_string()
    } else if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

impl SchoolSummary {
    pub fn from_record(record: &CsvRecord) -> Self {
        Self {
            name: record.name().to_string(),
            website_link: normalize_link(record.get("WEBSITE_LINK").unwrap_or_default()),
            financial_aid_calc: normalize_link(
                record.get("FINANCIAL_AID_CALC").unwrap_or_default(),
            ),
            avg_debt: money(record, "AVG_DEBT"),
            avg_monthly_repay: money(record, "AVG_MONTHLY_REPAY"),
            school_median_earnings: money(record, "SCHOOL_MEDIAN_EARNINGS"),
            national_4_year_median: money(record, "NATIONAL_4_YEAR_MEDIAN"),
            earnings_vs_hs_grad_pct: percent(record, "EARNINGS_VS_HS_GRAD"),
            monthly_repay_pct: percent(record, "MONTHLY_REPAY_PERCENTAGE"),
            cost_after_aid: CostAfterAid {
                income_0_30: money(record, "COST_AFTER_AID_0_30"),
                income_30_48: money(record, "COST_AFTER_AID_30_48"),
                income_48_75: money(record, "COST_AFTER_AID_48_75"),
                income_75_110: money(record, "COST_AFTER_AID_75_110"),
                income_110_plus: money(record, "COST_AFTER_AID_110"),
            },
            demographics: Demographics {
                white: percent(record, "WHITE_POP"),
                black: percent(record, "BLACK_POP"),
                hispanic: percent(record, "HISPANIC_POP"),
                asian: percent(record, "ASIAN_POP"),
                hawaiian_pacific_islander: percent(record, "HAWAIIAN_PACIFIC_ISLANDER_POP"),
                multiracial: percent(record, "MULTIRACIAL_POP"),
                unknown: percent(record, "UNKNOWN_RACE_POP"),
                international: percent(record, "INTERNATIONAL_POP"),
            },
        }
    }
}
