//! Construction of the LLM provider used for review extraction.

use crate::config::{EnhancerConfig, ProviderConfig};
use crate::error::EnhanceError;
use crate::providers::{AnthropicProvider, FallbackProvider, LlmProvider, OpenAIProvider};
use std::error::Error;

/// LLM backends that can extract modifications from reviews
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    /// Parse a provider key as used in `[providers.<name>]` config sections
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "openai" => Some(ProviderKind::OpenAI),
            "anthropic" => Some(ProviderKind::Anthropic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Small, cheap model good enough for structured extraction
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-haiku-20241022",
        }
    }
}

/// Per-run provider settings that take precedence over the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct ProviderOverrides {
    pub kind: Option<ProviderKind>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl ProviderOverrides {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.api_key.is_none() && self.model.is_none()
    }
}

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a single provider from its configuration section
    pub fn create(
        kind: ProviderKind,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error>> {
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                kind.as_str()
            )
            .into());
        }

        match kind {
            ProviderKind::OpenAI => Ok(Box::new(OpenAIProvider::new(config)?)),
            ProviderKind::Anthropic => Ok(Box::new(AnthropicProvider::new(config)?)),
        }
    }

    /// Create the provider named by `default_provider`
    pub fn get_default_provider(
        config: &EnhancerConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error>> {
        let name = &config.default_provider;
        let kind = ProviderKind::from_name(name)
            .ok_or_else(|| format!("Unknown default provider: {}", name))?;
        let provider_config = config
            .providers
            .get(name)
            .ok_or_else(|| format!("Default provider '{}' not found in configuration", name))?;

        Self::create(kind, provider_config)
    }

    /// Provider used to extract modifications from reviews.
    ///
    /// Without overrides this is the configured fallback chain. With any
    /// override it is a single provider: the configured section for the
    /// chosen kind (or defaults for that kind) with the overrides applied.
    /// An explicit override always enables the provider.
    pub fn extraction_provider(
        config: &EnhancerConfig,
        overrides: &ProviderOverrides,
    ) -> Result<Box<dyn LlmProvider>, EnhanceError> {
        if overrides.is_empty() {
            return FallbackProvider::new(config)
                .map(|p| Box::new(p) as Box<dyn LlmProvider>)
                .map_err(|e| EnhanceError::Provider(e.to_string()));
        }

        let kind = overrides
            .kind
            .or_else(|| ProviderKind::from_name(&config.default_provider))
            .unwrap_or(ProviderKind::OpenAI);
        let provider_config = Self::resolve_config(config, kind, overrides);

        Self::create(kind, &provider_config).map_err(|e| EnhanceError::Provider(e.to_string()))
    }

    fn resolve_config(
        config: &EnhancerConfig,
        kind: ProviderKind,
        overrides: &ProviderOverrides,
    ) -> ProviderConfig {
        let mut resolved = config
            .providers
            .get(kind.as_str())
            .cloned()
            .unwrap_or_else(|| ProviderConfig {
                enabled: true,
                model: kind.default_model().to_string(),
                temperature: 0.1,
                max_tokens: 2000,
                api_key: None,
                base_url: None,
            });
        resolved.enabled = true;
        if let Some(key) = &overrides.api_key {
            resolved.api_key = Some(key.clone());
        }
        if let Some(model) = &overrides.model {
            resolved.model = model.clone();
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_test_provider_config() -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            model: "test-model".to_string(),
            temperature: 0.1,
            max_tokens: 2000,
            api_key: Some("test-key".to_string()),
            base_url: None,
        }
    }

    fn config_with(name: &str, provider: ProviderConfig) -> EnhancerConfig {
        let mut providers = HashMap::new();
        providers.insert(name.to_string(), provider);
        EnhancerConfig {
            providers,
            ..Default::default()
        }
    }

    #[test]
    fn test_provider_kind_names() {
        assert_eq!(ProviderKind::from_name("openai"), Some(ProviderKind::OpenAI));
        assert_eq!(ProviderKind::from_name("anthropic"), Some(ProviderKind::Anthropic));
        assert_eq!(ProviderKind::from_name("ollama"), None);
        assert_eq!(ProviderKind::Anthropic.as_str(), "anthropic");
    }

    #[test]
    fn test_create_each_kind() {
        let config = create_test_provider_config();

        let openai = ProviderFactory::create(ProviderKind::OpenAI, &config).unwrap();
        assert_eq!(openai.provider_name(), "openai");

        let anthropic = ProviderFactory::create(ProviderKind::Anthropic, &config).unwrap();
        assert_eq!(anthropic.provider_name(), "anthropic");
    }

    #[test]
    fn test_create_disabled_provider() {
        let mut config = create_test_provider_config();
        config.enabled = false;

        let result = ProviderFactory::create(ProviderKind::OpenAI, &config);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("not enabled in configuration"));
        }
    }

    #[test]
    fn test_get_default_provider() {
        let config = config_with("openai", create_test_provider_config());

        let provider = ProviderFactory::get_default_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_get_default_provider_errors() {
        let missing = ProviderFactory::get_default_provider(&EnhancerConfig::default());
        assert!(missing.is_err());
        if let Err(e) = missing {
            assert!(e.to_string().contains("not found"));
        }

        let mut unknown = config_with("ollama", create_test_provider_config());
        unknown.default_provider = "ollama".to_string();
        let result = ProviderFactory::get_default_provider(&unknown);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Unknown default provider"));
        }
    }

    #[test]
    fn test_overrides_fill_in_kind_defaults() {
        let overrides = ProviderOverrides {
            kind: Some(ProviderKind::Anthropic),
            api_key: Some("override-key".to_string()),
            model: None,
        };

        let resolved =
            ProviderFactory::resolve_config(&EnhancerConfig::default(), ProviderKind::Anthropic, &overrides);

        assert!(resolved.enabled);
        assert_eq!(resolved.model, "claude-3-5-haiku-20241022");
        assert_eq!(resolved.api_key.as_deref(), Some("override-key"));
    }

    #[test]
    fn test_overrides_layer_over_configured_section() {
        let mut section = create_test_provider_config();
        section.enabled = false;
        section.base_url = Some("http://localhost:9999".to_string());
        let config = config_with("openai", section);
        let overrides = ProviderOverrides {
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };

        let resolved = ProviderFactory::resolve_config(&config, ProviderKind::OpenAI, &overrides);

        assert!(resolved.enabled);
        assert_eq!(resolved.model, "gpt-4o");
        assert_eq!(resolved.api_key.as_deref(), Some("test-key"));
        assert_eq!(resolved.base_url.as_deref(), Some("http://localhost:9999"));
    }

    #[test]
    fn test_extraction_provider_follows_default_kind() {
        let mut config = EnhancerConfig::default();
        config.default_provider = "anthropic".to_string();
        let overrides = ProviderOverrides {
            api_key: Some("override-key".to_string()),
            ..Default::default()
        };

        let provider = ProviderFactory::extraction_provider(&config, &overrides).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }

    #[test]
    fn test_extraction_provider_without_overrides_uses_fallback_chain() {
        let config = config_with("openai", create_test_provider_config());

        let provider = ProviderFactory::extraction_provider(&config, &ProviderOverrides::default())
            .unwrap();
        assert_eq!(provider.provider_name(), "fallback");

        let empty = ProviderFactory::extraction_provider(
            &EnhancerConfig::default(),
            &ProviderOverrides::default(),
        );
        assert!(matches!(empty, Err(EnhanceError::Provider(_))));
    }
}
