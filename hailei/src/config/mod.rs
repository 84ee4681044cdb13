//! Runtime configuration for the pipeline and its optional text-generation service.
//!
//! Configuration is built once at startup, either from defaults with the
//! `with_*` builders or from the process environment via
//! [`HaileiConfig::from_env`], and then injected into the orchestrator.

use crate::errors::HaileiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable selecting the generation mode.
pub const ENV_GENERATION_MODE: &str = "HAILEI_GENERATION_MODE";
/// Environment variable carrying the service credential.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding the service endpoint.
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the model name.
pub const ENV_MODEL: &str = "HAILEI_MODEL";
/// Environment variable overriding the per-call timeout.
pub const ENV_GENERATION_TIMEOUT: &str = "HAILEI_GENERATION_TIMEOUT_SECS";
/// Environment variable setting a whole-workflow timeout.
pub const ENV_WORKFLOW_TIMEOUT: &str = "HAILEI_WORKFLOW_TIMEOUT_SECS";

/// How the Plan stage produces its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Deterministic templates only.
    Template,
    /// Remote service only, falling back to templates on any failure.
    Remote,
    /// Remote service when a credential is present, templates otherwise.
    #[default]
    Auto,
}

impl GenerationMode {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Remote => "remote",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = HaileiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template" | "templates" => Ok(Self::Template),
            "remote" | "llm" => Ok(Self::Remote),
            "auto" | "" => Ok(Self::Auto),
            other => Err(HaileiError::Config(format!(
                "unknown generation mode '{other}' (expected template, remote or auto)"
            ))),
        }
    }
}

/// Settings of the remote text-generation service.
#[derive(Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Which generator the Plan stage uses.
    #[serde(default)]
    pub mode: GenerationMode,
    /// Bearer credential. Never serialized.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Chat-completions endpoint base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Token limit for the objectives call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Token limit for the frameworks call.
    #[serde(default = "default_frameworks_max_tokens")]
    pub frameworks_max_tokens: u32,
    /// Token limit for the module-list call.
    #[serde(default = "default_modules_max_tokens")]
    pub modules_max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    800
}

fn default_frameworks_max_tokens() -> u32 {
    600
}

fn default_modules_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f64 {
    0.7
}

fn default_timeout() -> f64 {
    20.0
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::default(),
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            frameworks_max_tokens: default_frameworks_max_tokens(),
            modules_max_tokens: default_modules_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("mode", &self.mode)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish_non_exhaustive()
    }
}

impl GenerationConfig {
    /// Creates a generation configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the credential.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Gets the per-call timeout as Duration.
    ///
    /// A value `validate()` would reject yields a zero timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds).unwrap_or(Duration::ZERO)
    }

    /// Returns true if a non-blank credential is configured.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Returns true if the Plan stage should try the remote service.
    #[must_use]
    pub fn wants_remote(&self) -> bool {
        match self.mode {
            GenerationMode::Template => false,
            GenerationMode::Remote => true,
            GenerationMode::Auto => self.has_credential(),
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), HaileiError> {
        checked_duration("generation timeout", self.timeout_seconds)?;
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(HaileiError::Config(format!(
                "temperature must be within 0..=2, got {}",
                self.temperature
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(HaileiError::Config("base URL must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HaileiConfig {
    /// Text-generation settings.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Version stamped into every stage's metadata.
    #[serde(default = "default_agent_version")]
    pub agent_version: String,
    /// Optional budget for a whole workflow run, in seconds.
    #[serde(default)]
    pub workflow_timeout_seconds: Option<f64>,
}

fn default_agent_version() -> String {
    "1.0".to_string()
}

impl Default for HaileiConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            agent_version: default_agent_version(),
            workflow_timeout_seconds: None,
        }
    }
}

impl HaileiConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that never calls the remote service.
    #[must_use]
    pub fn template_only() -> Self {
        Self::default().with_generation(GenerationConfig::new().with_mode(GenerationMode::Template))
    }

    /// Sets the generation settings.
    #[must_use]
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Sets the agent version.
    #[must_use]
    pub fn with_agent_version(mut self, version: impl Into<String>) -> Self {
        self.agent_version = version.into();
        self
    }

    /// Sets the whole-workflow timeout.
    #[must_use]
    pub fn with_workflow_timeout(mut self, seconds: f64) -> Self {
        self.workflow_timeout_seconds = Some(seconds);
        self
    }

    /// Gets the workflow timeout as Duration.
    ///
    /// A value `validate()` would reject yields a zero budget.
    #[must_use]
    pub fn workflow_timeout(&self) -> Option<Duration> {
        self.workflow_timeout_seconds
            .map(|seconds| Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO))
    }

    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, HaileiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults. Malformed values are errors rather
    /// than silently ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HaileiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let generation = &mut config.generation;

        if let Some(mode) = lookup(ENV_GENERATION_MODE) {
            generation.mode = mode.parse()?;
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|key| !key.trim().is_empty()) {
            generation.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|url| !url.trim().is_empty()) {
            generation.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|model| !model.trim().is_empty()) {
            generation.model = model;
        }
        if let Some(raw) = lookup(ENV_GENERATION_TIMEOUT) {
            generation.timeout_seconds = parse_seconds(ENV_GENERATION_TIMEOUT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_WORKFLOW_TIMEOUT) {
            config.workflow_timeout_seconds = Some(parse_seconds(ENV_WORKFLOW_TIMEOUT, &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), HaileiError> {
        self.generation.validate()?;
        if let Some(seconds) = self.workflow_timeout_seconds {
            checked_duration("workflow timeout", seconds)?;
        }
        Ok(())
    }
}

/// Converts seconds to a non-zero `Duration`, rejecting NaN, infinities,
/// negatives and values too large to represent.
fn checked_duration(what: &str, seconds: f64) -> Result<Duration, HaileiError> {
    match Duration::try_from_secs_f64(seconds) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(HaileiError::Config(format!(
            "{what} must be a positive, finite number of seconds, got {seconds}"
        ))),
    }
}

fn parse_seconds(key: &str, raw: &str) -> Result<f64, HaileiError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| HaileiError::Config(format!("{key}: '{raw}' is not a number ({e})")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.mode, GenerationMode::Auto);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_tokens, 800);
        assert_eq!(config.frameworks_max_tokens, 600);
        assert_eq!(config.modules_max_tokens, 1000);
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
        assert!(!config.wants_remote());
    }

    #[test]
    fn test_auto_mode_follows_credential() {
        let config = GenerationConfig::new().with_api_key("sk-test");
        assert!(config.wants_remote());

        let config = GenerationConfig::new().with_api_key("   ");
        assert!(!config.wants_remote());

        let config = GenerationConfig::new()
            .with_api_key("sk-test")
            .with_mode(GenerationMode::Template);
        assert!(!config.wants_remote());
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = HaileiConfig::from_lookup(lookup(&[
            (ENV_GENERATION_MODE, "Remote"),
            (ENV_API_KEY, "sk-test"),
            (ENV_BASE_URL, "http://localhost:8080/v1/"),
            (ENV_MODEL, "local-model"),
            (ENV_GENERATION_TIMEOUT, "5"),
            (ENV_WORKFLOW_TIMEOUT, "60"),
        ]))
        .unwrap();

        assert_eq!(config.generation.mode, GenerationMode::Remote);
        assert_eq!(config.generation.base_url, "http://localhost:8080/v1");
        assert_eq!(config.generation.model, "local-model");
        assert_eq!(config.generation.timeout(), Duration::from_secs(5));
        assert_eq!(config.workflow_timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = HaileiConfig::from_lookup(lookup(&[(ENV_GENERATION_MODE, "magic")])).unwrap_err();
        assert!(matches!(err, HaileiError::Config(_)));

        let err = HaileiConfig::from_lookup(lookup(&[(ENV_GENERATION_TIMEOUT, "soon")])).unwrap_err();
        assert!(err.to_string().contains(ENV_GENERATION_TIMEOUT));

        let err = HaileiConfig::from_lookup(lookup(&[(ENV_WORKFLOW_TIMEOUT, "0")])).unwrap_err();
        assert!(matches!(err, HaileiError::Config(_)));
    }

    #[test]
    fn test_from_lookup_rejects_unrepresentable_timeouts() {
        for raw in ["inf", "-inf", "NaN", "1e30", "-1"] {
            let err = HaileiConfig::from_lookup(lookup(&[(ENV_WORKFLOW_TIMEOUT, raw)])).unwrap_err();
            assert!(err.to_string().contains("workflow timeout"), "{raw}: {err}");

            let err = HaileiConfig::from_lookup(lookup(&[(ENV_GENERATION_TIMEOUT, raw)])).unwrap_err();
            assert!(err.to_string().contains("generation timeout"), "{raw}: {err}");
        }
    }

    #[test]
    fn test_timeout_getters_never_panic() {
        let config = HaileiConfig::new()
            .with_generation(GenerationConfig::new().with_timeout(f64::INFINITY))
            .with_workflow_timeout(1e30);
        assert_eq!(config.generation.timeout(), Duration::ZERO);
        assert_eq!(config.workflow_timeout(), Some(Duration::ZERO));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = GenerationConfig::default();
        config.temperature = 2.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = GenerationConfig::new().with_api_key("sk-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = GenerationConfig::new().with_api_key("sk-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
