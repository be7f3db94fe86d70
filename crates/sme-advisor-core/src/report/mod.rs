use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pipeline::SummaryRecord;

pub mod pdf;

/// Write the full summary list as indented UTF-8 JSON. Non-ASCII characters
/// are emitted verbatim. Total overwrite of the target path.
pub fn write_summary_json(records: &[SummaryRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write summary JSON to {}", path.display()))
}

/// Condensed projection of a summary record with list fields flattened to
/// comma-joined strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondensedRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Recommended_Package")]
    pub recommended_package: String,
    #[serde(rename = "Tooling_Stack")]
    pub tooling_stack: String,
    #[serde(rename = "Justification")]
    pub justification: String,
}

impl From<&SummaryRecord> for CondensedRecord {
    fn from(record: &SummaryRecord) -> Self {
        Self {
            name: record.sme_name.clone(),
            industry: record.industry.clone(),
            recommended_package: record.recommended_package.clone(),
            tooling_stack: record.tooling_stack.join(", "),
            justification: record.justification.clone(),
        }
    }
}

/// Write the condensed projection next to the full summary. Total overwrite.
pub fn write_condensed_json(records: &[SummaryRecord], path: &Path) -> Result<()> {
    let condensed: Vec<CondensedRecord> = records.iter().map(CondensedRecord::from).collect();
    let json = serde_json::to_string_pretty(&condensed)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write condensed JSON to {}", path.display()))
}
