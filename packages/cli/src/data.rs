use std::fs;
use std::path::Path;

use satark_incident_models::{IncidentRecord, PredictionPoint};
use satark_query::InMemoryStore;
use serde::{Deserialize, Serialize};

/// On-disk layout of the incident data file.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataFile {
    incidents: Vec<IncidentRecord>,
    #[serde(default)]
    predictions: Vec<PredictionPoint>,
}

/// Loads the data file into an in-memory incident store.
pub fn load_store(path: &str) -> Result<InMemoryStore, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read data file '{path}': {e}"))?;
    let file: DataFile = serde_json::from_str(&raw)
        .map_err(|e| format!("failed to parse data file '{path}': {e}"))?;
    log::debug!(
        "Loaded {} incidents and {} predictions from {path}",
        file.incidents.len(),
        file.predictions.len()
    );
    Ok(InMemoryStore::new(file.incidents, file.predictions))
}

/// Serializes incidents to `path`, creating parent directories as needed.
pub fn write_store(
    path: &str,
    incidents: &[IncidentRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = DataFile {
        incidents: incidents.to_vec(),
        predictions: Vec::new(),
    };
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}
