use crate::lsp::LspClient;
use crate::model::types::LanguageServerConfig;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Registry for managing LSP client instances
#[derive(Default)]
pub struct LspRegistry {
    clients: HashMap<String, LspClient>,
    configs: HashMap<String, LanguageServerConfig>,
}

impl std::fmt::Debug for LspRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LspRegistry")
            .field("client_count", &self.clients.len())
            .field("config_count", &self.configs.len())
            .finish()
    }
}

impl LspRegistry {
    /// Create new LSP registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a language server configuration
    pub fn register_config(&mut self, config: LanguageServerConfig) {
        self.configs.insert(config.name.clone(), config);
    }

    /// Get or create LSP client for a language server
    pub async fn get_client(
        &mut self,
        server_name: &str,
        _workspace_root: &Path,
    ) -> Result<&mut LspClient> {
        if !self.clients.contains_key(server_name) {
            let config = self.configs.get(server_name).ok_or_else(|| {
                anyhow::anyhow!("Language server '{}' not registered", server_name)
            })?;

            let client = LspClient::new(config.clone()).await?;
            self.clients.insert(server_name.to_string(), client);
        }

        Ok(self.clients.get_mut(server_name).unwrap())
    }

    /// Get client for file extension
    pub async fn get_client_for_extension(
        &mut self,
        extension: &str,
        workspace_root: &Path,
    ) -> Result<Option<&mut LspClient>> {
        let server_name = self
            .configs
            .iter()
            .find(|(_, config)| config.file_extensions.contains(&extension.to_string()))
            .map(|(name, _)| name.clone());

        if let Some(name) = server_name {
            return Ok(Some(self.get_client(&name, workspace_root).await?));
        }
        Ok(None)
    }

    /// Check if language server is available
    pub fn is_available(&self, server_name: &str) -> bool {
        self.configs.contains_key(server_name)
    }

    /// Get all registered language server names
    pub fn registered_servers(&self) -> Vec<&String> {
        self.configs.keys().collect()
    }
}
