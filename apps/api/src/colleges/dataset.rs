//! Static college CSV data: loading, search and name lookup.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Column holding the school name in both data files.
pub const NAME_COLUMN: &str = "NAME";
/// Search results are capped at this many schools.
pub const MAX_SEARCH_RESULTS: usize = 5;
/// Queries shorter than this many characters return nothing.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One CSV row keyed by header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRecord {
    fields: BTreeMap<String, String>,
}

impl CsvRecord {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        self.get(NAME_COLUMN).unwrap_or_default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Parses a numeric column, tolerating `$`, `,` and `%` decorations.
    /// Blank or non-numeric cells are `None`.
    pub fn number(&self, column: &str) -> Option<f64> {
        let cleaned: String = self
            .get(column)?
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
            .collect();
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

/// Parses CSV text with a header row. Rows whose cells are all blank are skipped.
pub fn parse_csv(content: &str) -> Result<Vec<CsvRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        records.push(CsvRecord::from_pairs(
            headers.iter().zip(record.iter()),
        ));
    }

    Ok(records)
}

pub async fn load_csv(path: &Path) -> Result<Vec<CsvRecord>, DatasetError> {
    debug!("Loading CSV from {:?}", path);
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
    parse_csv(&content)
}

/// Lowercases and drops everything outside `[a-z0-9]`, so "St. John's" and
/// "St Johns" compare equal.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// The school dataset plus per-school application steps.
#[derive(Debug, Clone, Default)]
pub struct CollegeData {
    schools: Vec<CsvRecord>,
    steps: Vec<CsvRecord>,
}

impl CollegeData {
    pub fn new(schools: Vec<CsvRecord>, steps: Vec<CsvRecord>) -> Self {
        Self { schools, steps }
    }

    /// Loads both files. A file that cannot be read or parsed is logged and
    /// left empty, so the service still starts and only the school routes
    /// report the data as unavailable.
    pub async fn load(schools_path: &Path, steps_path: &Path) -> Self {
        let schools = load_or_empty(schools_path, "college").await;
        let steps = load_or_empty(steps_path, "steps-to-apply").await;
        let data = Self { schools, steps };
        info!(
            "College data loaded: {} schools, {} steps rows",
            data.school_count(),
            data.steps.len()
        );
        data
    }

    pub fn is_loaded(&self) -> bool {
        !self.schools.is_empty()
    }

    pub fn school_count(&self) -> usize {
        self.schools.len()
    }

    /// Case-insensitive substring search on the school name, in file order.
    /// `exclude` drops one exact name, e.g. the school already being compared.
    pub fn search(&self, query: &str, exclude: Option<&str>) -> Vec<&CsvRecord> {
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.schools
            .iter()
            .filter(|s| s.name().to_lowercase().contains(&needle))
            .filter(|s| exclude.map_or(true, |ex| s.name() != ex))
            .take(MAX_SEARCH_RESULTS)
            .collect()
    }

    /// Exact, case-insensitive, whitespace-trimmed name match.
    pub fn find(&self, name: &str) -> Option<&CsvRecord> {
        let wanted = name.trim().to_lowercase();
        self.schools
            .iter()
            .find(|s| s.name().trim().to_lowercase() == wanted)
    }

    /// Steps-to-apply row whose normalized name matches.
    pub fn steps_for(&self, name: &str) -> Option<&CsvRecord> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }
        self.steps.iter().find(|r| normalize_name(r.name()) == wanted)
    }
}

async fn load_or_empty(path: &Path, label: &str) -> Vec<CsvRecord> {
    match load_csv(path).await {
        Ok(records) => records,
        Err(e) => {
            warn!("Could not load {label} data: {e}");
            Vec::new()
        }
    }
}
