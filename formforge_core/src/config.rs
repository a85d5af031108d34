use crate::error::{FormforgeError, Result};
use crate::generate::context::LineDelimiter;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use tracing::{debug, info};

/// General configuration shared by all operations.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GeneralConfig {
    /// Line delimiter of generated units.
    #[serde(default)]
    pub line_delimiter: LineDelimiter,

    /// User tag rendered into generated TODO markers.
    #[serde(default)]
    pub todo_user: Option<String>,
}

/// Configuration of the generation pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateConfig {
    /// Target runtime version the API resolver binds against.
    pub api_version: String,

    /// Source roots scanned into the environment.
    #[serde(default)]
    pub source_roots: Vec<String>,

    /// Root directory generated DTO units are written to.
    #[serde(default)]
    pub output_root: Option<String>,
}

/// Root configuration, read from `formforge.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormforgeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    pub generate: GenerateConfig,
}

impl FormforgeConfig {
    /// Load configuration by searching for `formforge.toml` in the current
    /// directory and its ancestors.
    pub fn new() -> Result<FormforgeConfig> {
        info!("Loading Formforge configuration");
        dotenv::dotenv().ok();

        let config_path = Self::find_config_file()?;
        info!("Found configuration file at: {:?}", config_path);
        let contents = fs::read_to_string(&config_path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration text and substitute `${VAR}` references in the
    /// path-valued fields.
    pub fn from_toml(contents: &str) -> Result<FormforgeConfig> {
        let mut config: FormforgeConfig = toml::from_str(contents)?;

        debug!("Substituting environment variables in configuration");
        for root in &mut config.generate.source_roots {
            *root = Self::substitute_env_vars(root)?;
        }
        if let Some(output) = &mut config.generate.output_root {
            *output = Self::substitute_env_vars(output)?;
        }
        Ok(config)
    }

    fn find_config_file() -> Result<PathBuf> {
        let mut dir = env::current_dir()?;
        loop {
            let candidate = dir.join("formforge.toml");
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !dir.pop() {
                return Err(FormforgeError::config(
                    "No formforge.toml found in the current directory or any ancestor",
                ));
            }
        }
    }

    /// Replaces `${VAR}` with the value of the environment variable `VAR`.
    fn substitute_env_vars(value: &str) -> Result<String> {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(start) = rest.find("${") {
            let Some(end) = rest[start..].find('}') else {
                break;
            };
            out.push_str(&rest[..start]);
            let name = &rest[start + 2..start + end];
            let substituted =
                env::var(name).map_err(|_| FormforgeError::EnvVarNotSet(name.to_string()))?;
            out.push_str(&substituted);
            rest = &rest[start + end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[general]
line_delimiter = "lf"
todo_user = "anna"

[generate]
api_version = "23.1"
source_roots = ["client/src/main/java", "shared/src/main/java"]
"#;

    #[test]
    fn test_parse_sample_config() {
        let config = FormforgeConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.general.line_delimiter, LineDelimiter::Lf);
        assert_eq!(config.general.todo_user.as_deref(), Some("anna"));
        assert_eq!(config.generate.api_version, "23.1");
        assert_eq!(config.generate.source_roots.len(), 2);
    }

    #[test]
    fn test_env_substitution() {
        // scoped to a variable name this test owns
        unsafe {
            env::set_var("FORMFORGE_TEST_WORKSPACE", "/tmp/ws");
        }
        let toml = "[generate]\napi_version = \"11\"\nsource_roots = [\"${FORMFORGE_TEST_WORKSPACE}/src\"]\n";
        let config = FormforgeConfig::from_toml(toml).unwrap();
        assert_eq!(config.generate.source_roots[0], "/tmp/ws/src");

        let missing = "[generate]\napi_version = \"11\"\nsource_roots = [\"${FORMFORGE_TEST_MISSING}/src\"]\n";
        assert!(matches!(
            FormforgeConfig::from_toml(missing),
            Err(FormforgeError::EnvVarNotSet(_))
        ));
    }

    #[test]
    fn test_missing_generate_section_is_an_error() {
        assert!(FormforgeConfig::from_toml("[general]\n").is_err());
    }
}
