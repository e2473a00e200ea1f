//! Settings structures for askweb configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchSettings,
    pub llm: LlmSettings,
    pub agent: AgentSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ASKWEB_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("ASKWEB_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("ASKWEB_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("SERP_API_KEY") {
            self.search.api_key = Some(val);
        }
        if let Some(val) = lookup("OPENAI_API_KEY") {
            self.llm.api_key = Some(val);
        }
        if let Some(val) = lookup("OPENAI_MODEL") {
            self.llm.model = val;
        }
        if let Some(val) = lookup("OPENAI_BASE_URL") {
            self.llm.base_url = val;
        }
    }

    /// Names of provider keys that are not configured
    pub fn missing_api_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.search.api_key.as_deref().map_or(true, str::is_empty) {
            missing.push("SERP_API_KEY");
        }
        if self.llm.api_key.as_deref().map_or(true, str::is_empty) {
            missing.push("OPENAI_API_KEY");
        }
        missing
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "askweb".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Whether crawlers may index the UI
    pub public_instance: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "127.0.0.1".to_string(),
            public_instance: false,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds; none waits indefinitely
    pub request_timeout: Option<f64>,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Provider API key
    pub api_key: Option<String>,
    /// Provider endpoint
    pub base_url: String,
    /// Upstream engine passed to the provider
    pub engine: String,
    /// Location hint passed to the provider
    pub location: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://serpapi.com/search.json".to_string(),
            engine: "google".to_string(),
            location: Some("United States".to_string()),
        }
    }
}

/// Completion provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Provider API key
    pub api_key: Option<String>,
    /// API root; `/chat/completions` is appended
    pub base_url: String,
    /// Model identifier
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// How the agent endpoint answers a question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentMode {
    /// Plan sub-queries, search each, answer per sub-query
    #[default]
    Decompose,
    /// Search the raw question once
    SingleShot,
}

/// How the orchestrator reaches the gateways
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// Call the gateway objects directly
    #[default]
    InProcess,
    /// Call `/api/search` and `/api/llm` on the request's own base address
    Loopback,
}

/// Answer orchestration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub mode: AgentMode,
    pub dispatch: Dispatch,
    /// Prior turns included in prompts
    pub history_turns: usize,
    /// Organic results kept per sub-query block
    pub results_per_sub_query: usize,
    /// Organic results kept in single-shot mode
    pub single_shot_results: usize,
    pub planner: PlannerSettings,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            mode: AgentMode::default(),
            dispatch: Dispatch::default(),
            history_turns: 3,
            results_per_sub_query: 2,
            single_shot_results: 3,
            planner: PlannerSettings::default(),
        }
    }
}

/// Sub-query planner retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Retries after the first failed parse
    pub max_retries: u32,
    /// Fixed pause between attempts
    pub retry_delay_ms: u64,
    /// Ask the LLM again on each retry instead of re-parsing the same reply
    pub replan_on_retry: bool,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            max_retries: 4,
            retry_delay_ms: 1000,
            replan_on_retry: false,
        }
    }
}
