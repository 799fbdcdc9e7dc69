//! Data models for scraped media outlets.
//!
//! - [`OutletRecord`]: one outlet as scraped, the shape of the JSON store
//! - [`Agreeance`]: the community agreeance label derived from the ratio
//! - [`OutletRow`] / [`Table`]: the flattened shape written to CSV
//!
//! Field names on [`OutletRecord`] are the JSON store's keys; the CSV
//! headers are renamed on [`OutletRow`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Community agreeance label, bucketed from `agree / disagree`.
///
/// Serializes to the exact text the ratings site displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Agreeance {
    #[serde(rename = "absolutely agrees")]
    AbsolutelyAgrees,
    #[serde(rename = "strongly agrees")]
    StronglyAgrees,
    #[serde(rename = "agrees")]
    Agrees,
    #[serde(rename = "somewhat agrees")]
    SomewhatAgrees,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "somewhat disagrees")]
    SomewhatDisagrees,
    #[serde(rename = "disagrees")]
    Disagrees,
    #[serde(rename = "strongly disagrees")]
    StronglyDisagrees,
    #[serde(rename = "absolutely disagrees")]
    AbsolutelyDisagrees,
}

impl Agreeance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agreeance::AbsolutelyAgrees => "absolutely agrees",
            Agreeance::StronglyAgrees => "strongly agrees",
            Agreeance::Agrees => "agrees",
            Agreeance::SomewhatAgrees => "somewhat agrees",
            Agreeance::Neutral => "neutral",
            Agreeance::SomewhatDisagrees => "somewhat disagrees",
            Agreeance::Disagrees => "disagrees",
            Agreeance::StronglyDisagrees => "strongly disagrees",
            Agreeance::AbsolutelyDisagrees => "absolutely disagrees",
        }
    }
}

impl fmt::Display for Agreeance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One media outlet's rating, fully populated.
///
/// Records are only built once every field has been extracted; a row that
/// fails anywhere is dropped rather than stored half-filled.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutletRecord {
    /// Outlet name as shown in the ratings table.
    pub name: String,
    /// Absolute URL of the outlet's profile page on the ratings site.
    pub allsides_page: String,
    /// Bias slug, e.g. `left`, `center`, `right`.
    pub bias: String,
    /// Community "agree" votes.
    pub agree: u64,
    /// Community "disagree" votes, never zero.
    pub disagree: u64,
    /// `agree / disagree`.
    pub agree_ratio: f64,
    /// Label derived from `agree_ratio`.
    pub agreeance_text: Agreeance,
    /// The outlet's own homepage, taken from its profile page.
    pub news_page: String,
}

/// Column headers of the CSV export, in order.
pub const COLUMNS: [&str; 8] = [
    "Name",
    "News_Page",
    "Allsides_Page",
    "Media_Bias",
    "Agree_Count",
    "Disagree_Count",
    "Agreeance_Ratio",
    "Agreeance",
];

/// One CSV row. Field order matches [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutletRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "News_Page")]
    pub news_page: String,
    #[serde(rename = "Allsides_Page")]
    pub allsides_page: String,
    #[serde(rename = "Media_Bias")]
    pub media_bias: String,
    #[serde(rename = "Agree_Count")]
    pub agree_count: u64,
    #[serde(rename = "Disagree_Count")]
    pub disagree_count: u64,
    #[serde(rename = "Agreeance_Ratio")]
    pub agreeance_ratio: f64,
    #[serde(rename = "Agreeance")]
    pub agreeance: Agreeance,
}

impl From<&OutletRecord> for OutletRow {
    fn from(record: &OutletRecord) -> Self {
        OutletRow {
            name: record.name.clone(),
            news_page: record.news_page.clone(),
            allsides_page: record.allsides_page.clone(),
            media_bias: record.bias.clone(),
            agree_count: record.agree,
            disagree_count: record.disagree,
            agreeance_ratio: record.agree_ratio,
            agreeance: record.agreeance_text,
        }
    }
}

/// The flattened export: a fixed header and zero or more rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<OutletRow>,
}

impl Table {
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OutletRecord {
        OutletRecord {
            name: "Outlet A".to_string(),
            allsides_page: "https://www.allsides.com/news-source/outlet-a".to_string(),
            bias: "left".to_string(),
            agree: 12,
            disagree: 4,
            agree_ratio: 3.0,
            agreeance_text: Agreeance::StronglyAgrees,
            news_page: "https://outlet-a.example".to_string(),
        }
    }

    #[test]
    fn test_record_serializes_with_store_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in [
            "name",
            "allsides_page",
            "bias",
            "agree",
            "disagree",
            "agree_ratio",
            "agreeance_text",
            "news_page",
        ] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert_eq!(json["agreeance_text"], "strongly agrees");
    }

    #[test]
    fn test_agreeance_labels_match_display() {
        for label in [
            Agreeance::AbsolutelyAgrees,
            Agreeance::Neutral,
            Agreeance::AbsolutelyDisagrees,
        ] {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label));
        }
    }

    #[test]
    fn test_agreeance_deserializes_from_label() {
        let label: Agreeance = serde_json::from_str("\"somewhat disagrees\"").unwrap();
        assert_eq!(label, Agreeance::SomewhatDisagrees);
    }

    #[test]
    fn test_row_renames_fields() {
        let row = OutletRow::from(&sample());
        assert_eq!(row.media_bias, "left");
        assert_eq!(row.agree_count, 12);
        assert_eq!(row.disagree_count, 4);
        assert_eq!(row.news_page, "https://outlet-a.example");
    }

    #[test]
    fn test_empty_table_keeps_columns() {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 8);
        assert_eq!(table.columns()[0], "Name");
        assert_eq!(table.columns()[7], "Agreeance");
    }
}
