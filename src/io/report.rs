//! Export a valuation to JSON.
//!
//! The export is meant to be easy to consume from scripts: inputs under their
//! bundle feature names, raw and displayed price, and the display scores.

use std::fs::File;
use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::HouseInput;
use crate::error::{AppError, EXIT_IO};
use crate::report::{CategoryScore, Valuation};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub valued_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub input: HouseInput,
    pub raw_prediction: f64,
    pub price: f64,
    pub clamped: bool,
    pub price_per_sqft: Option<f64>,
    pub scores: Vec<CategoryScore>,
}

impl ReportFile {
    pub fn new(valuation: &Valuation, model: Option<&str>, valued_on: NaiveDate) -> Self {
        Self {
            tool: "propai".to_string(),
            valued_on,
            model: model.map(str::to_string),
            input: valuation.input,
            raw_prediction: valuation.estimate.raw,
            price: valuation.estimate.price,
            clamped: valuation.estimate.clamped,
            price_per_sqft: valuation.price_per_sqft,
            scores: valuation.scores.clone(),
        }
    }
}

/// Render the report as pretty JSON (used by `estimate --json`).
pub fn report_json(valuation: &Valuation, model: Option<&str>) -> Result<String, AppError> {
    let report = ReportFile::new(valuation, model, Local::now().date_naive());
    serde_json::to_string_pretty(&report).map_err(|e| AppError::new(EXIT_IO, format!("Failed to encode report: {e}")))
}

/// Write a valuation report file.
pub fn write_report_json(path: &Path, valuation: &Valuation, model: Option<&str>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create report '{}': {e}", path.display())))?;

    let report = ReportFile::new(valuation, model, Local::now().date_naive());
    serde_json::to_writer_pretty(file, &report)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}
