use anyhow::{Context, Result};

/// Connection parameters for the model endpoint. Endpoint URL and model
/// identifier come from the run configuration; the bearer token comes from
/// the environment so it never lands in a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub api_url: String,
    pub model: String,
    pub api_token: String,
}

impl ModelSettings {
    const TOKEN_ENV: &'static str = "HF_API_TOKEN";

    /// Build settings from configured endpoint/model plus the `HF_API_TOKEN`
    /// environment variable (required, must be non-blank).
    pub fn from_env(api_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_token = std::env::var(Self::TOKEN_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .with_context(|| {
                format!("environment variable {} must be set", Self::TOKEN_ENV)
            })?;
        Ok(Self {
            api_url: api_url.into(),
            model: model.into(),
            api_token,
        })
    }
}
