use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub mod prompt;
pub mod reference_library;

use crate::llm::RecommendationClient;

/// One SME profile as supplied in the input YAML. Field renames follow the
/// on-disk key spelling so the prompt embedding and all emitted artifacts
/// agree with the input schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "SME_Name")]
    pub name: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Size")]
    pub size: SizeBreakdown,
    #[serde(rename = "Cloud_On_Prem_Mix")]
    pub mix: CloudOnPremMix,
    #[serde(rename = "Regulatory_Drivers", default)]
    pub regulatory_drivers: Vec<String>,
    #[serde(rename = "Monthly_Budget_Band")]
    pub monthly_budget_band: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeBreakdown {
    #[serde(rename = "Headcount")]
    pub headcount: u32,
    #[serde(rename = "Endpoints")]
    pub endpoints: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudOnPremMix {
    #[serde(rename = "Cloud")]
    pub cloud: String,
    #[serde(rename = "On_Prem")]
    pub on_prem: String,
}

impl Profile {
    /// Validate invariants serde cannot express. Runs once at load time so a
    /// bad profile is rejected before any model call is made.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProfileValidationError::BlankName);
        }
        Ok(())
    }
}

/// Errors emitted while validating input profiles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    #[error("profile SME_Name must not be blank")]
    BlankName,
}

/// The three-key answer object the model is instructed to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAnswer {
    pub package: String,
    /// Recommended vendor products, 3-5 entries expected but not enforced.
    pub tooling_stack: Vec<String>,
    pub justification: String,
}

/// Flattened union of selected profile fields and a model answer, keyed by
/// SME name. Append-only; the emitters consume it unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "SME_Name")]
    pub sme_name: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Headcount")]
    pub headcount: u32,
    #[serde(rename = "Endpoints")]
    pub endpoints: u32,
    #[serde(rename = "Cloud")]
    pub cloud: String,
    #[serde(rename = "On_Prem")]
    pub on_prem: String,
    #[serde(rename = "Regulatory_Drivers")]
    pub regulatory_drivers: Vec<String>,
    #[serde(rename = "Monthly_Budget_Band")]
    pub monthly_budget_band: String,
    #[serde(rename = "Recommended_Package")]
    pub recommended_package: String,
    #[serde(rename = "Tooling_Stack")]
    pub tooling_stack: Vec<String>,
    #[serde(rename = "Justification")]
    pub justification: String,
}

impl SummaryRecord {
    pub fn new(profile: &Profile, answer: ModelAnswer) -> Self {
        Self {
            sme_name: profile.name.clone(),
            industry: profile.industry.clone(),
            headcount: profile.size.headcount,
            endpoints: profile.size.endpoints,
            cloud: profile.mix.cloud.clone(),
            on_prem: profile.mix.on_prem.clone(),
            regulatory_drivers: profile.regulatory_drivers.clone(),
            monthly_budget_band: profile.monthly_budget_band.clone(),
            recommended_package: answer.package,
            tooling_stack: answer.tooling_stack,
            justification: answer.justification,
        }
    }
}

/// A profile that raised during processing, kept so the caller can report it
/// even though it is excluded from the summary artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileFailure {
    pub name: String,
    pub reason: String,
}

/// Result of one batch run. `records.len() + failures.len()` equals the
/// number of input profiles; both preserve input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub records: Vec<SummaryRecord>,
    pub failures: Vec<ProfileFailure>,
}

/// Drive the batch: one prompt, one model call, one summary record per
/// profile, strictly in input order. Any per-profile error is contained
/// here; the profile is skipped and the loop continues.
pub async fn process_profiles<C: RecommendationClient>(
    client: &C,
    library: &reference_library::ReferenceLibrary,
    profiles: &[Profile],
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for profile in profiles {
        info!(sme = %profile.name, "processing profile");
        let prompt = prompt::build_prompt(profile, library);
        match client.recommend(&prompt).await {
            Ok(answer) => {
                outcome.records.push(SummaryRecord::new(profile, answer));
                info!(sme = %profile.name, "finished profile");
            }
            Err(err) => {
                warn!(sme = %profile.name, error = %err, "failed to process profile");
                outcome.failures.push(ProfileFailure {
                    name: profile.name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    outcome
}
