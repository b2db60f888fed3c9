pub mod openai;
pub mod traits;

use crate::config::Config;
use std::sync::Arc;

pub use openai::OpenAiProvider;
pub use traits::ImageProvider;

/// Builds the provider the configuration asks for. `None` means fallback-only;
/// a provider that cannot be constructed is logged and treated the same way.
pub fn provider_from_config(config: &Config) -> Option<Arc<dyn ImageProvider>> {
    let provider_config = config.provider.clone().filter(|p| p.has_api_key())?;

    match OpenAiProvider::new(provider_config) {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) => {
            log::error!("❌ Failed to initialize image provider: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpenAiConfig;

    #[test]
    fn test_absent_without_key() {
        assert!(provider_from_config(&Config::new()).is_none());
        let config = Config::new().with_provider(OpenAiConfig::new().with_api_key(""));
        assert!(provider_from_config(&config).is_none());
    }

    #[test]
    fn test_present_with_key() {
        let config = Config::new().with_provider(OpenAiConfig::new().with_api_key("sk-test"));
        let provider = provider_from_config(&config).expect("provider");
        assert_eq!(provider.name(), "openai");
    }
}
