use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::Profile;

/// Static reference material shared read-only across all prompt
/// constructions: the package catalogue as free text and the enumerated
/// vendor component names.
#[derive(Debug, Clone)]
pub struct ReferenceLibrary {
    pub package_definitions: String,
    pub vendor_components: Vec<String>,
}

impl ReferenceLibrary {
    /// Load both corpora from disk. Called once at startup; any problem here
    /// aborts the run before a single profile is processed.
    pub fn load(packages_path: &Path, vendors_path: &Path) -> Result<Self> {
        let package_definitions = fs::read_to_string(packages_path)
            .with_context(|| {
                format!(
                    "failed to read package definitions at {}",
                    packages_path.display()
                )
            })?
            .trim()
            .to_string();

        let raw = fs::read_to_string(vendors_path).with_context(|| {
            format!(
                "failed to read vendor components at {}",
                vendors_path.display()
            )
        })?;
        let vendor_components: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        if vendor_components.is_empty() {
            anyhow::bail!(
                "vendor component list at {} is empty",
                vendors_path.display()
            );
        }

        Ok(Self {
            package_definitions,
            vendor_components,
        })
    }
}

#[derive(Deserialize)]
struct ProfilesDocument {
    #[serde(rename = "SME_Profiles", default)]
    profiles: Vec<Profile>,
}

/// Load the input profiles from a YAML document whose top-level
/// `SME_Profiles` key holds the profile sequence. Each entry is validated
/// here so shape problems surface as one early error instead of a
/// per-profile failure mid-batch.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read input profiles at {}", path.display()))?;
    let document: ProfilesDocument = serde_yaml::from_str(&raw)
        .with_context(|| format!("invalid profiles document at {}", path.display()))?;
    for (idx, profile) in document.profiles.iter().enumerate() {
        profile
            .validate()
            .with_context(|| format!("invalid profile at index {} in {}", idx, path.display()))?;
    }
    Ok(document.profiles)
}
