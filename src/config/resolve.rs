//! Environment overlay, `{env:VAR}` substitution and validation.

use super::types::{Config, ConfigError, ModelRunner, Overrides};

use crate::constants::{ENV_API_KEY, ENV_BASE_URL, ENV_CHAT_MODEL, ENV_TOOLS_MODEL};

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        let runner = &mut self.model_runner;
        for field in [
            &mut runner.base_url,
            &mut runner.chat_model,
            &mut runner.tools_model,
            &mut runner.api_key,
        ] {
            if let Some(value) = field {
                *value = Self::resolve_str(value, lookup);
            }
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    ///
    /// Single left-to-right pass: substituted values are never rescanned.
    fn resolve_str(s: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
        let mut result = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(start) = rest.find("{env:") {
            let Some(end) = rest[start..].find('}') else {
                break;
            };
            result.push_str(&rest[..start]);
            result.push_str(&lookup(&rest[start + 5..start + end]).unwrap_or_default());
            rest = &rest[start + end + 1..];
        }
        result.push_str(rest);
        result
    }

    /// Environment variables win over the config file.
    pub(super) fn apply_env(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        let runner = &mut self.model_runner;
        for (field, var) in [
            (&mut runner.base_url, ENV_BASE_URL),
            (&mut runner.chat_model, ENV_CHAT_MODEL),
            (&mut runner.tools_model, ENV_TOOLS_MODEL),
            (&mut runner.api_key, ENV_API_KEY),
        ] {
            if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
                tracing::debug!(var, "using value from environment");
                *field = Some(value);
            }
        }
    }

    /// Command-line flags win over everything else.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        let runner = &mut self.model_runner;
        if let Some(ref url) = overrides.base_url {
            runner.base_url = Some(url.clone());
        }
        if let Some(ref model) = overrides.chat_model {
            runner.chat_model = Some(model.clone());
        }
        if let Some(ref model) = overrides.tools_model {
            runner.tools_model = Some(model.clone());
        }
        if let Some(ref path) = overrides.instructions {
            self.content.instructions = path.clone();
        }
        if let Some(ref path) = overrides.character_sheet {
            self.content.character_sheet = path.clone();
        }
    }

    /// Checks that every required model runner setting is present.
    ///
    /// Blank values count as missing. The error names the environment
    /// variable to set.
    pub fn require_model_runner(&self) -> Result<ModelRunner, ConfigError> {
        fn required(
            value: &Option<String>,
            key: &'static str,
            env: &'static str,
        ) -> Result<String, ConfigError> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .ok_or(ConfigError::Missing { key, env })
        }

        let runner = &self.model_runner;
        Ok(ModelRunner {
            base_url: required(&runner.base_url, "base_url", ENV_BASE_URL)?,
            chat_model: required(&runner.chat_model, "chat_model", ENV_CHAT_MODEL)?,
            tools_model: required(&runner.tools_model, "tools_model", ENV_TOOLS_MODEL)?,
            api_key: runner.api_key.clone().filter(|k| !k.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_substitution_replaces_placeholders() {
        let mut config = Config::default();
        config.model_runner.base_url = Some("http://{env:HOST}:12434/v1".into());
        config.resolve_substitutions(&env(&[("HOST", "localhost")]));
        assert_eq!(
            config.model_runner.base_url.as_deref(),
            Some("http://localhost:12434/v1")
        );
    }

    #[test]
    fn test_substitution_of_unset_var_is_empty() {
        let mut config = Config::default();
        config.model_runner.api_key = Some("{env:NOPE}".into());
        config.resolve_substitutions(&env(&[]));
        assert_eq!(config.model_runner.api_key.as_deref(), Some(""));
    }

    #[test]
    fn test_substitution_does_not_expand_inserted_values() {
        let mut config = Config::default();
        config.model_runner.api_key = Some("{env:X}".into());
        config.model_runner.chat_model = Some("{env:A}/{env:B}".into());
        config.model_runner.base_url = Some("http://{env:HOST".into());
        let lookup = env(&[("X", "{env:X}"), ("A", "{env:B}"), ("B", "qwen")]);
        config.resolve_substitutions(&lookup);

        assert_eq!(config.model_runner.api_key.as_deref(), Some("{env:X}"));
        assert_eq!(config.model_runner.chat_model.as_deref(), Some("{env:B}/qwen"));
        assert_eq!(config.model_runner.base_url.as_deref(), Some("http://{env:HOST"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config::default();
        config.model_runner.chat_model = Some("from-file".into());
        config.model_runner.tools_model = Some("tools-from-file".into());
        config.apply_env(&env(&[
            (ENV_CHAT_MODEL, "from-env"),
            (ENV_TOOLS_MODEL, ""),
        ]));
        assert_eq!(config.model_runner.chat_model.as_deref(), Some("from-env"));
        assert_eq!(
            config.model_runner.tools_model.as_deref(),
            Some("tools-from-file")
        );
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::default();
        config.apply_env(&env(&[(ENV_BASE_URL, "http://env")]));
        config.apply_overrides(&Overrides {
            base_url: Some("http://flag".into()),
            character_sheet: Some("wolf.md".into()),
            ..Overrides::default()
        });
        assert_eq!(config.model_runner.base_url.as_deref(), Some("http://flag"));
        assert_eq!(config.content.character_sheet, std::path::PathBuf::from("wolf.md"));
    }

    #[test]
    fn test_require_model_runner_names_missing_variable() {
        let mut config = Config::default();
        config.apply_env(&env(&[
            (ENV_BASE_URL, "http://localhost:12434/engines/v1"),
            (ENV_CHAT_MODEL, "ai/qwen2.5"),
        ]));
        let err = config.require_model_runner().unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                key: "tools_model",
                env: ENV_TOOLS_MODEL,
            }
        );
        assert!(err.to_string().contains("MODEL_RUNNER_TOOLS_MODEL"));
    }

    #[test]
    fn test_require_model_runner_treats_blank_as_missing() {
        let mut config = Config::default();
        config.model_runner.base_url = Some("   ".into());
        let err = config.require_model_runner().unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                key: "base_url",
                env: ENV_BASE_URL,
            }
        );
    }

    #[test]
    fn test_require_model_runner_success() {
        let mut config = Config::default();
        config.apply_env(&env(&[
            (ENV_BASE_URL, "http://localhost:12434/engines/v1"),
            (ENV_CHAT_MODEL, "ai/qwen2.5"),
            (ENV_TOOLS_MODEL, "ai/llama3.2"),
        ]));
        let runner = config.require_model_runner().unwrap();
        assert_eq!(runner.chat_model, "ai/qwen2.5");
        assert_eq!(runner.tools_model, "ai/llama3.2");
        assert_eq!(runner.api_key, None);
    }
}
