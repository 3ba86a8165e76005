//! Report exports built from [`SummaryRow`]s.
//!
//! Both exports read the ratios already computed for each row; neither one
//! derives a ratio on its own.

use thiserror::Error;

use crate::api_models::summary::SummaryRow;

pub const CSV_FILE_NAME: &str = "esg-summary.csv";

const CSV_HEADER: [&str; 5] = [
    "year",
    "carbonIntensity",
    "renewableRatio",
    "diversityRatio",
    "communitySpendRatio",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer error: {0}")]
    Buffer(String),
    #[error("csv output is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Spreadsheet export: one row per stored record, unrounded values.
pub fn summary_csv(rows: &[SummaryRow]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record([
            row.year.clone(),
            row.ratios.carbon_intensity.to_string(),
            row.ratios.renewable_ratio.to_string(),
            row.ratios.diversity_ratio.to_string(),
            row.ratios.community_spend_ratio.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Printable summary: a title line, then one line per record.
pub fn summary_text(rows: &[SummaryRow]) -> String {
    let mut out = String::from("ESG Summary\n");
    for row in rows {
        out.push_str(&format!(
            "{} - Carbon Intensity: {:.4}, Renewable %: {:.2}, Diversity %: {:.2}, Community %: {:.2}\n",
            row.year,
            row.ratios.carbon_intensity,
            row.ratios.renewable_ratio,
            row.ratios.diversity_ratio,
            row.ratios.community_spend_ratio,
        ));
    }
    out
}
