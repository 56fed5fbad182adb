//! Transformer trait and registry.
//!
//! Each domain strategy implements [`DomainTransformer`] and is registered
//! in a [`TransformerRegistry`]. [`default_registry()`] returns a cached
//! registry holding all six strategies.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use lcore_model::Domain;
use lcore_standards::DomainConfig;

use crate::context::{SourceSet, TransformContext};
use crate::error::Result;
use crate::output::TransformOutput;
use crate::strategies::{
    AgriculturalTransformer, EnvironmentalTransformer, HealthTransformer, NetworkTransformer,
    RetailTransformer, WeatherTransformer,
};

/// Domain-specific transformation from raw source tables to normalized records.
///
/// Implementations are pure: the same sources and configuration always
/// produce the same output.
pub trait DomainTransformer: Send + Sync {
    /// The domain this transformer handles.
    fn domain(&self) -> Domain;

    /// Returns a human-readable description of the transformer.
    fn description(&self) -> &'static str {
        self.domain().description()
    }

    /// Transform the domain's sources.
    ///
    /// # Errors
    ///
    /// Returns a [`TransformError`](crate::TransformError) when a required
    /// column is absent, a location column is unlisted, two source
    /// identities collide on one device id, or too many rows were dropped.
    fn transform(
        &self,
        sources: &SourceSet,
        config: &DomainConfig,
        context: &TransformContext,
    ) -> Result<TransformOutput>;
}

/// Registry of transformers indexed by domain.
pub struct TransformerRegistry {
    transformers: BTreeMap<Domain, Box<dyn DomainTransformer>>,
}

impl TransformerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            transformers: BTreeMap::new(),
        }
    }

    /// Registers a transformer, replacing any previous one for its domain.
    pub fn register(&mut self, transformer: Box<dyn DomainTransformer>) {
        self.transformers.insert(transformer.domain(), transformer);
    }

    pub fn get(&self, domain: Domain) -> Option<&dyn DomainTransformer> {
        self.transformers.get(&domain).map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Registered domains in processing order.
    pub fn domains(&self) -> Vec<Domain> {
        self.transformers.keys().copied().collect()
    }
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(EnvironmentalTransformer));
        registry.register(Box::new(AgriculturalTransformer));
        registry.register(Box::new(HealthTransformer));
        registry.register(Box::new(NetworkTransformer));
        registry.register(Box::new(RetailTransformer));
        registry.register(Box::new(WeatherTransformer));
        registry
    }
}

static DEFAULT_REGISTRY: OnceLock<TransformerRegistry> = OnceLock::new();

/// Returns the shared registry with all six domain strategies.
pub fn default_registry() -> &'static TransformerRegistry {
    DEFAULT_REGISTRY.get_or_init(TransformerRegistry::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_all_domains() {
        let registry = default_registry();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.domains(), Domain::ALL.to_vec());
        for domain in Domain::ALL {
            assert_eq!(registry.get(domain).unwrap().domain(), domain);
        }
    }

    #[test]
    fn description_defaults_to_domain() {
        let registry = default_registry();
        let weather = registry.get(Domain::Weather).unwrap();
        assert_eq!(weather.description(), Domain::Weather.description());
    }
}
