//! Registry CSV and age sidecar loading.
//!
//! The CSV carries the columns `ID, Cancer_Type, Lung_Subtype, Stage, Status,
//! Survival_Months`. Rows with a cancer type or status outside the known sets
//! are skipped and counted in the [`LoadReport`]; other bad values fall back to
//! defaults (survival `0`, stage `Unknown`).

use std::{
    collections::HashMap,
    fs::File,
    io::{self, Read},
    path::Path,
};

use oncoreg_engine::{CancerType, PatientId, PatientRecord, RecordStore, Stage, VitalStatus};
use serde::Deserialize;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("failed to read registry data")]
    Io(io::Error),
    #[display("malformed registry CSV")]
    Csv(csv::Error),
    #[display("malformed age sidecar")]
    Json(serde_json::Error),
    #[display("registry CSV has no {column:?} column")]
    #[from(ignore)]
    MissingColumn { column: &'static str },
}

/// What happened to the rows of one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_cancer_type: usize,
    pub skipped_status: usize,
    pub malformed: usize,
    pub ages: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.skipped_cancer_type + self.skipped_status + self.malformed
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Cancer_Type", default)]
    cancer_type: String,
    #[serde(rename = "Lung_Subtype", default)]
    lung_subtype: Option<String>,
    #[serde(rename = "Stage", default)]
    stage: String,
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "Survival_Months", default)]
    survival_months: String,
}

const REQUIRED_COLUMNS: [&str; 3] = ["ID", "Cancer_Type", "Status"];

/// Parses a survival cell. Anything unparseable becomes `0`.
fn parse_months(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(0.0)
}

/// Reads registry rows from CSV text.
pub fn read_records<R>(mut reader: R, report: &mut LoadReport) -> Result<Vec<PatientRecord>, LoadError>
where
    R: Read,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = csv.headers()?.clone();
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|c| !headers.iter().any(|h| h == *c))
    {
        return Err(LoadError::MissingColumn { column });
    }

    let mut records = vec![];
    for (line, row) in csv.deserialize::<CsvRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                log::warn!("skipping malformed row {}: {e}", line + 2);
                report.malformed += 1;
                continue;
            }
        };
        let Ok(cancer_type) = row.cancer_type.parse::<CancerType>() else {
            log::debug!("skipping {}: unknown cancer type {:?}", row.id, row.cancer_type);
            report.skipped_cancer_type += 1;
            continue;
        };
        let Ok(status) = row.status.parse::<VitalStatus>() else {
            log::debug!("skipping {}: unknown status {:?}", row.id, row.status);
            report.skipped_status += 1;
            continue;
        };
        let record = PatientRecord::new(
            row.id,
            cancer_type,
            Stage::from_label_lossy(&row.stage),
            status,
            parse_months(&row.survival_months),
        )
        .with_lung_subtype(row.lung_subtype);
        records.push(record);
    }
    report.loaded = records.len();
    Ok(records)
}

/// Reads an id-to-age JSON object. Entries that are not finite numbers are dropped.
pub fn read_ages<R>(reader: R) -> Result<HashMap<PatientId, f64>, LoadError>
where
    R: Read,
{
    let raw: HashMap<String, serde_json::Value> = serde_json::from_reader(reader)?;
    let ages = raw
        .into_iter()
        .filter_map(|(id, value)| {
            let age = match value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }?;
            age.is_finite().then(|| (PatientId::from(id), age))
        })
        .collect();
    Ok(ages)
}

fn load_ages(path: &Path) -> HashMap<PatientId, f64> {
    let result = File::open(path)
        .map_err(LoadError::from)
        .and_then(|file| read_ages(io::BufReader::new(file)));
    match result {
        Ok(ages) => ages,
        Err(e) => {
            log::warn!("age data unavailable ({}): {e}", path.display());
            HashMap::new()
        }
    }
}

/// Loads the registry and optional age sidecar into a store.
pub fn try_load_store(data: &Path, ages: Option<&Path>) -> Result<(RecordStore, LoadReport), LoadError> {
    let mut report = LoadReport::default();
    let file = File::open(data)?;
    let records = read_records(io::BufReader::new(file), &mut report)?;
    let ages = ages.map(load_ages).unwrap_or_default();
    let store = RecordStore::with_ages(records, &ages);
    report.ages = store.age_count();
    Ok((store, report))
}

/// Like [`try_load_store`], but a failed load is logged and yields an empty store.
pub fn load_store(data: &Path, ages: Option<&Path>) -> RecordStore {
    match try_load_store(data, ages) {
        Ok((store, report)) => {
            log::info!(
                "loaded {} patients from {} ({} with age)",
                report.loaded,
                data.display(),
                report.ages
            );
            if report.skipped() > 0 {
                log::warn!(
                    "skipped {} rows: {} unknown cancer type, {} unknown status, {} malformed",
                    report.skipped(),
                    report.skipped_cancer_type,
                    report.skipped_status,
                    report.malformed
                );
            }
            store
        }
        Err(e) => {
            let source = std::error::Error::source(&e).map(ToString::to_string);
            match source {
                Some(source) => log::error!("failed to load {}: {e}: {source}", data.display()),
                None => log::error!("failed to load {}: {e}", data.display()),
            }
            RecordStore::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\u{feff}ID,Cancer_Type,Lung_Subtype,Stage,Status,Survival_Months
P1, Lung ,Adenocarcinoma,Stage II,Alive,14
P2,Breast,,Stage I,Deceased,40.5

P3,Colon,,Stage 5,Alive,abc
P4,Skin,,Stage I,Alive,3
P5,Liver,,Stage IV,Missing,3
P6,Breast,Squamous,III,Alive,-2
";

    #[test]
    fn test_read_records() {
        let mut report = LoadReport::default();
        let records = read_records(CSV.as_bytes(), &mut report).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, ["P1", "P2", "P3", "P6"]);
        assert_eq!(report.loaded, 4);
        assert_eq!(report.skipped_cancer_type, 1);
        assert_eq!(report.skipped_status, 1);
        assert_eq!(report.skipped(), 2);

        assert_eq!(records[0].cancer_type(), CancerType::Lung);
        assert_eq!(records[0].lung_subtype(), Some("Adenocarcinoma"));
        assert_eq!(records[1].survival_months(), 40.5);
        assert_eq!(records[1].lung_subtype(), None);
        assert_eq!(records[2].stage(), Stage::Unknown);
        assert_eq!(records[2].survival_months(), 0.0);
        assert_eq!(records[3].stage(), Stage::StageIII);
        assert_eq!(records[3].lung_subtype(), None);
        assert_eq!(records[3].survival_months(), 0.0);
    }

    #[test]
    fn test_missing_column() {
        let mut report = LoadReport::default();
        let err = read_records("ID,Stage\nP1,Stage I\n".as_bytes(), &mut report).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "Cancer_Type" }));
    }

    #[test]
    fn test_read_ages() {
        let json = r#"{"P1": 61, "P2": "44.5", "P3": null, "P4": "old"}"#;
        let ages = read_ages(json.as_bytes()).unwrap();
        assert_eq!(ages.len(), 2);
        assert_eq!(ages[&PatientId::from("P1")], 61.0);
        assert_eq!(ages[&PatientId::from("P2")], 44.5);
    }

    #[test]
    fn test_missing_files_give_empty_store() {
        let store = load_store(Path::new("/nonexistent/registry.csv"), None);
        assert!(store.is_empty());
    }
}
