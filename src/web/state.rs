//! Application state shared across handlers

use crate::agent::{Gateways, Orchestrator};
use crate::config::Settings;
use crate::llm::{CompletionProvider, LlmGateway, OpenAi};
use crate::network::HttpClient;
use crate::search::{SearchGateway, SearchProvider, SerpApi};
use std::sync::Arc;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Outbound HTTP client, also used for loopback dispatch
    pub client: HttpClient,
    /// Search and LLM gateways
    pub gateways: Arc<Gateways>,
    /// Answer pipeline
    pub orchestrator: Arc<Orchestrator>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create application state with the providers named in `settings`
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        let search: Arc<dyn SearchProvider> = Arc::new(SerpApi::from_settings(&settings.search));
        let llm: Arc<dyn CompletionProvider> = Arc::new(OpenAi::from_settings(&settings.llm));
        Self::with_providers(settings, client, search, llm)
    }

    /// Create application state with explicit providers
    pub fn with_providers(
        settings: Settings,
        client: HttpClient,
        search: Arc<dyn SearchProvider>,
        llm: Arc<dyn CompletionProvider>,
    ) -> anyhow::Result<Self> {
        let gateways = Arc::new(Gateways {
            search: SearchGateway::new(client.clone(), search),
            llm: LlmGateway::new(client.clone(), llm),
        });
        let orchestrator = Arc::new(Orchestrator::new(settings.agent.clone()));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            client,
            gateways,
            orchestrator,
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Check if instance is public
    pub fn is_public(&self) -> bool {
        self.settings.server.public_instance
    }
}
