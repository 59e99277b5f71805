// Classification of schema descriptors against the base type registry

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::cache::ClassificationCache;
use super::chain::ProfileChain;
use super::structural::StructuralMatcher;
use crate::core::ClassifierConfig;
use crate::error::Result;
use crate::registry::BaseTypeRegistry;
use crate::types::{
    BaseType, ClassificationResult, DescriptorResolver, ProfileEvidence, Resolution,
    SchemaDescriptor,
};

/// Decides, from descriptor metadata and shape alone, which base type a
/// schema is or profiles.
pub struct DescriptorClassifier {
    registry: Arc<BaseTypeRegistry>,
    resolver: Option<Arc<dyn DescriptorResolver>>,
    config: ClassifierConfig,
    cache: ClassificationCache,
}

impl DescriptorClassifier {
    pub fn new(registry: Arc<BaseTypeRegistry>) -> Self {
        Self {
            registry,
            resolver: None,
            config: ClassifierConfig::default(),
            cache: ClassificationCache::new(),
        }
    }

    /// Classifier over the process-wide registry. Fails if the registry has
    /// not been installed yet.
    pub fn global() -> Result<Self> {
        Ok(Self::new(BaseTypeRegistry::global()?))
    }

    /// Resolver used to follow profile base chains through intermediate
    /// profiles and to look up field types during structural matching.
    pub fn with_resolver(mut self, resolver: Arc<dyn DescriptorResolver>) -> Self {
        self.resolver = Some(resolver);
        self.cache.clear();
        self
    }

    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self.cache.clear();
        self
    }

    pub fn registry(&self) -> &BaseTypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn cache(&self) -> &ClassificationCache {
        &self.cache
    }

    pub fn classify(
        &self,
        descriptor: &SchemaDescriptor,
        target: BaseType,
    ) -> Result<ClassificationResult> {
        self.registry.canonical(target)?;
        Ok(self.resolve(descriptor)?.classify(target))
    }

    pub fn is_exact(&self, descriptor: &SchemaDescriptor, target: BaseType) -> Result<bool> {
        Ok(self.classify(descriptor, target)?.is_exact())
    }

    pub fn is_profile(&self, descriptor: &SchemaDescriptor, target: BaseType) -> Result<bool> {
        Ok(self.classify(descriptor, target)?.is_profile())
    }

    pub fn is_exact_or_profile(
        &self,
        descriptor: &SchemaDescriptor,
        target: BaseType,
    ) -> Result<bool> {
        Ok(self.classify(descriptor, target)?.is_exact_or_profile())
    }

    pub fn is_type_or_profile_of(
        &self,
        descriptor: &SchemaDescriptor,
        target: BaseType,
    ) -> Result<bool> {
        self.is_exact_or_profile(descriptor, target)
    }

    /// The base type the descriptor is, or is a profile of.
    pub fn base_type_of(&self, descriptor: &SchemaDescriptor) -> Result<Option<BaseType>> {
        Ok(self.resolve(descriptor)?.base_type())
    }

    /// Full resolution for a descriptor, memoized by identity when caching
    /// is enabled. Failed resolutions are never cached.
    pub fn resolve(&self, descriptor: &SchemaDescriptor) -> Result<Resolution> {
        if !self.config.enable_cache {
            return self.compute(descriptor);
        }

        let id = descriptor.id();
        if let Some(resolution) = self.cache.get(&id) {
            return Ok(resolution);
        }

        let resolution = self.compute(descriptor)?;
        self.cache.insert(id, resolution);
        Ok(resolution)
    }

    fn compute(&self, descriptor: &SchemaDescriptor) -> Result<Resolution> {
        if let Some(base) = self.registry.base_type_of(&descriptor.id()) {
            return Ok(Resolution::exact(base));
        }

        let resolver = self.resolver.as_deref();
        let chain = ProfileChain {
            registry: &self.registry,
            resolver,
            policy: self.config.ambiguity_policy,
        };

        let resolution = if descriptor.has_profile_base() {
            match chain.resolve(descriptor)? {
                Some(base) => Resolution::profile(base, ProfileEvidence::Marker),
                None => Resolution::unrelated(),
            }
        } else if self.config.enable_structural_fallback {
            let matcher = StructuralMatcher {
                registry: &self.registry,
                resolver,
                chain: &chain,
            };
            match matcher.best_match(descriptor) {
                Some(base) => Resolution::profile(base, ProfileEvidence::Structural),
                None => Resolution::unrelated(),
            }
        } else {
            Resolution::unrelated()
        };

        debug!(descriptor = %descriptor.full_name, %resolution, "classified descriptor");
        Ok(resolution)
    }
}

// Resolver trait objects carry no Debug bound
impl fmt::Debug for DescriptorClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorClassifier")
            .field("registry", &self.registry)
            .field("has_resolver", &self.resolver.is_some())
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish()
    }
}

super::base_type_predicates!(DescriptorClassifier, SchemaDescriptor);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AmbiguityPolicy;
    use crate::error::FhirTypesError;
    use crate::types::canonical::{canonical_descriptor, core_type};
    use crate::types::{DescriptorPool, FieldDescriptor};

    fn classifier() -> DescriptorClassifier {
        DescriptorClassifier::new(Arc::new(BaseTypeRegistry::with_defaults().unwrap()))
    }

    #[test]
    fn canonical_is_exact_for_its_own_type_only() {
        let classifier = classifier();
        let coding = canonical_descriptor(BaseType::Coding);

        assert!(classifier.is_coding(&coding).unwrap());
        assert!(!classifier.is_profile_of_coding(&coding).unwrap());
        for other in BaseType::ALL.into_iter().filter(|t| *t != BaseType::Coding) {
            assert_eq!(
                classifier.classify(&coding, other).unwrap(),
                ClassificationResult::Unrelated,
                "{other}"
            );
        }
    }

    #[test]
    fn marker_by_url_or_name() {
        let classifier = classifier();
        let by_url = SchemaDescriptor::new("example.LoincCoding")
            .with_profile_base("http://hl7.org/fhir/StructureDefinition/Coding");
        let by_name = SchemaDescriptor::new("example.Flag").with_profile_base("boolean");

        assert!(classifier.is_profile(&by_url, BaseType::Coding).unwrap());
        assert!(classifier.is_profile_of_boolean(&by_name).unwrap());
        assert!(!classifier.is_exact(&by_name, BaseType::Boolean).unwrap());
    }

    #[test]
    fn unresolvable_marker_disables_structural_fallback() {
        let classifier = classifier();
        let descriptor = SchemaDescriptor::new("example.Concept")
            .with_profile_base("http://example.org/StructureDefinition/unknown")
            .with_field(FieldDescriptor::message("coding", core_type("Coding")).repeated())
            .with_field(FieldDescriptor::message("text", core_type("String")));

        assert_eq!(classifier.base_type_of(&descriptor).unwrap(), None);
    }

    #[test]
    fn ambiguity_policies() {
        let descriptor = SchemaDescriptor::new("example.Confused")
            .with_profile_base("Coding")
            .with_profile_base("CodeableConcept");

        let first_wins = classifier();
        assert!(first_wins.is_profile_of_coding(&descriptor).unwrap());
        assert!(
            !first_wins
                .is_profile_of_codeable_concept(&descriptor)
                .unwrap()
        );

        let reject = classifier().with_config(
            ClassifierConfig::default().with_ambiguity_policy(AmbiguityPolicy::Reject),
        );
        assert!(matches!(
            reject.classify(&descriptor, BaseType::Coding),
            Err(FhirTypesError::AmbiguousProfileBase { .. })
        ));
    }

    #[test]
    fn repeated_marker_for_same_base_is_not_ambiguous() {
        let classifier = classifier()
            .with_config(ClassifierConfig::default().with_ambiguity_policy(AmbiguityPolicy::Reject));
        let descriptor = SchemaDescriptor::new("example.Twice")
            .with_profile_base("Coding")
            .with_profile_base("http://hl7.org/fhir/StructureDefinition/Coding|4.0.1");

        assert!(classifier.is_profile_of_coding(&descriptor).unwrap());
    }

    #[test]
    fn follows_chain_through_resolver() {
        let pool = Arc::new(DescriptorPool::new());
        pool.add(
            SchemaDescriptor::new("example.UsCoreCoding")
                .with_structure_definition_url("http://example.org/StructureDefinition/us-coding")
                .with_profile_base("Coding"),
        );
        let classifier = classifier().with_resolver(pool);

        let descriptor = SchemaDescriptor::new("example.LabCoding")
            .with_profile_base("http://example.org/StructureDefinition/us-coding");
        assert!(classifier.is_profile_of_coding(&descriptor).unwrap());
    }

    #[test]
    fn cache_is_filled_and_can_be_disabled() {
        let classifier = classifier();
        let descriptor = SchemaDescriptor::new("example.Flag").with_profile_base("boolean");
        classifier.is_boolean(&descriptor).unwrap();
        assert_eq!(classifier.cache().len(), 1);

        let uncached = classifier.with_config(ClassifierConfig::default().with_cache(false));
        uncached.is_boolean(&descriptor).unwrap();
        assert!(uncached.cache().is_empty());
    }
}
