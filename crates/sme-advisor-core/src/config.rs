use std::path::PathBuf;

use serde::Deserialize;

/// Run configuration as read from the YAML config file. Loaded once at
/// startup and passed by reference; nothing reads it through globals.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// When true, artifacts go into a fresh `run_<timestamp>` directory.
    #[serde(default = "default_save_runs")]
    pub save_runs: bool,
    /// Free-text catalogue of package definitions.
    pub package_definitions: PathBuf,
    /// Newline-delimited vendor component names.
    pub vendor_components: PathBuf,
    /// YAML document holding the `SME_Profiles` sequence.
    pub input_profiles: PathBuf,
    /// Model identifier sent with every request.
    pub model: String,
    /// Chat-completion endpoint URL. The alias covers loaders that
    /// lowercase keys (the `config` crate does).
    #[serde(rename = "HF_API_URL", alias = "hf_api_url")]
    pub api_url: String,
}

fn default_save_runs() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_all_recognized_keys() {
        let yaml = r#"
save_runs: false
package_definitions: data/packages.txt
vendor_components: data/vendors.txt
input_profiles: data/profiles.yaml
model: openai/gpt-oss-20b
HF_API_URL: https://router.huggingface.co/v1/chat/completions
"#;
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.save_runs);
        assert_eq!(config.package_definitions, PathBuf::from("data/packages.txt"));
        assert_eq!(config.model, "openai/gpt-oss-20b");
        assert!(config.api_url.starts_with("https://router.huggingface.co"));
    }

    #[test]
    fn save_runs_defaults_to_true() {
        let yaml = r#"
package_definitions: p.txt
vendor_components: v.txt
input_profiles: i.yaml
model: m
HF_API_URL: https://example.test
"#;
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.save_runs);
    }

    #[test]
    fn missing_endpoint_is_an_error() {
        let yaml = r#"
package_definitions: p.txt
vendor_components: v.txt
input_profiles: i.yaml
model: m
"#;
        let err = serde_yaml::from_str::<RunConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("HF_API_URL"));
    }
}
