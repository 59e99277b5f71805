// Registry of canonical descriptors, one per base type

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::error::{FhirTypesError, Result};
use crate::types::canonical::default_canonicals;
use crate::types::pool::unversioned;
use crate::types::{BaseType, DescriptorId, SchemaDescriptor};

static GLOBAL_REGISTRY: OnceCell<Arc<BaseTypeRegistry>> = OnceCell::new();

/// Read-only mapping from each base type to its canonical descriptor.
///
/// Built once through [`BaseTypeRegistryBuilder`] and never mutated
/// afterwards, so it can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct BaseTypeRegistry {
    canonicals: HashMap<BaseType, Arc<SchemaDescriptor>>,
    by_id: HashMap<DescriptorId, BaseType>,
    by_url: HashMap<String, BaseType>,
}

impl BaseTypeRegistry {
    pub fn builder() -> BaseTypeRegistryBuilder {
        BaseTypeRegistryBuilder::default()
    }

    /// Registry holding the built-in canonical shape of every base type.
    pub fn with_defaults() -> Result<Self> {
        Self::builder().register_defaults().build()
    }

    /// Installs `registry` as the process-wide registry.
    ///
    /// Installing an equivalent registry again is a no-op; installing one
    /// with different canonical descriptors fails.
    pub fn install(registry: BaseTypeRegistry) -> Result<Arc<BaseTypeRegistry>> {
        let candidate = Arc::new(registry);
        let installed = GLOBAL_REGISTRY.get_or_init(|| Arc::clone(&candidate));

        if Arc::ptr_eq(installed, &candidate) {
            debug!(
                base_types = installed.len(),
                "installed process-wide base type registry"
            );
            Ok(Arc::clone(installed))
        } else if installed.same_canonicals(&candidate) {
            Ok(Arc::clone(installed))
        } else {
            Err(FhirTypesError::initialization(
                "a different base type registry is already installed",
            ))
        }
    }

    pub fn install_default() -> Result<Arc<BaseTypeRegistry>> {
        Self::install(Self::with_defaults()?)
    }

    pub fn global() -> Result<Arc<BaseTypeRegistry>> {
        GLOBAL_REGISTRY.get().cloned().ok_or_else(|| {
            FhirTypesError::initialization_order(
                "base type registry used before it was installed",
            )
        })
    }

    pub fn is_installed() -> bool {
        GLOBAL_REGISTRY.get().is_some()
    }

    pub fn get(&self, base: BaseType) -> Option<&Arc<SchemaDescriptor>> {
        self.canonicals.get(&base)
    }

    /// Canonical descriptor for `base`; a missing entry is an initialization
    /// order error rather than an "unrelated" answer.
    pub fn canonical(&self, base: BaseType) -> Result<&Arc<SchemaDescriptor>> {
        self.get(base).ok_or_else(|| {
            FhirTypesError::initialization_order(format!(
                "no canonical descriptor registered for {base}"
            ))
        })
    }

    pub fn contains(&self, base: BaseType) -> bool {
        self.canonicals.contains_key(&base)
    }

    /// Base type whose canonical descriptor has this identity.
    pub fn base_type_of(&self, id: &DescriptorId) -> Option<BaseType> {
        self.by_id.get(id).copied()
    }

    /// Resolves a profile base reference (structure definition URL, canonical
    /// full name or bare type name) to a registered base type.
    pub fn base_type_for_reference(&self, reference: &str) -> Option<BaseType> {
        let reference = unversioned(reference);
        self.by_url
            .get(reference)
            .or_else(|| self.by_id.get(&DescriptorId::new(reference)))
            .copied()
            .or_else(|| BaseType::from_type_name(reference).filter(|t| self.contains(*t)))
    }

    pub fn base_types(&self) -> impl Iterator<Item = BaseType> + '_ {
        BaseType::ALL.into_iter().filter(|t| self.contains(*t))
    }

    pub fn len(&self) -> usize {
        self.canonicals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonicals.is_empty()
    }

    // Same identities, same shapes and same structure definition URLs
    fn same_canonicals(&self, other: &BaseTypeRegistry) -> bool {
        self.by_id == other.by_id
            && self.by_url == other.by_url
            && self.canonicals == other.canonicals
    }
}

#[derive(Debug, Default)]
pub struct BaseTypeRegistryBuilder {
    entries: Vec<(BaseType, Arc<SchemaDescriptor>)>,
}

impl BaseTypeRegistryBuilder {
    pub fn register(
        mut self,
        base: BaseType,
        descriptor: impl Into<Arc<SchemaDescriptor>>,
    ) -> Self {
        self.entries.push((base, descriptor.into()));
        self
    }

    pub fn register_defaults(mut self) -> Self {
        for (base, descriptor) in default_canonicals() {
            self.entries.push((base, Arc::new(descriptor)));
        }
        self
    }

    pub fn build(self) -> Result<BaseTypeRegistry> {
        let mut registry = BaseTypeRegistry {
            canonicals: HashMap::new(),
            by_id: HashMap::new(),
            by_url: HashMap::new(),
        };

        for (base, descriptor) in self.entries {
            let id = descriptor.id();

            if descriptor.has_profile_base() {
                return Err(FhirTypesError::registry(format!(
                    "canonical descriptor {id} for {base} must not declare a profile base"
                )));
            }

            if let Some(existing) = registry.canonicals.get(&base) {
                if existing.id() == id {
                    continue;
                }
                return Err(FhirTypesError::registry(format!(
                    "{base} already registered as {}, cannot register {id}",
                    existing.id()
                )));
            }

            if let Some(other) = registry.by_id.get(&id) {
                return Err(FhirTypesError::registry(format!(
                    "{id} already registered as the canonical descriptor for {other}"
                )));
            }

            if let Some(url) = descriptor.structure_definition_url() {
                let url = unversioned(url);
                Url::parse(url)?;
                if let Some(other) = registry.by_url.insert(url.to_string(), base) {
                    return Err(FhirTypesError::registry(format!(
                        "structure definition url {url} shared by {other} and {base}"
                    )));
                }
            }

            registry.by_id.insert(id, base);
            registry.canonicals.insert(base, descriptor);
        }

        debug!(base_types = registry.len(), "built base type registry");
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::canonical::canonical_descriptor;

    #[test]
    fn defaults_cover_every_base_type() {
        let registry = BaseTypeRegistry::with_defaults().unwrap();
        assert_eq!(registry.len(), BaseType::ALL.len());
        for base in BaseType::ALL {
            let canonical = registry.canonical(base).unwrap();
            assert_eq!(registry.base_type_of(&canonical.id()), Some(base));
        }
    }

    #[test]
    fn repeated_registration_is_idempotent() {
        let registry = BaseTypeRegistry::builder()
            .register(BaseType::Coding, canonical_descriptor(BaseType::Coding))
            .register(BaseType::Coding, canonical_descriptor(BaseType::Coding))
            .build()
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejects_conflicting_registrations() {
        let two_descriptors = BaseTypeRegistry::builder()
            .register(BaseType::Coding, canonical_descriptor(BaseType::Coding))
            .register(BaseType::Coding, SchemaDescriptor::new("example.Coding"))
            .build();
        assert!(matches!(two_descriptors, Err(FhirTypesError::Registry { .. })));

        let shared_descriptor = BaseTypeRegistry::builder()
            .register(BaseType::String, SchemaDescriptor::new("example.Text"))
            .register(BaseType::Code, SchemaDescriptor::new("example.Text"))
            .build();
        assert!(matches!(shared_descriptor, Err(FhirTypesError::Registry { .. })));
    }

    #[test]
    fn rejects_profiled_canonical() {
        let result = BaseTypeRegistry::builder()
            .register(
                BaseType::Coding,
                SchemaDescriptor::new("example.Coding").with_profile_base("Coding"),
            )
            .build();
        assert!(matches!(result, Err(FhirTypesError::Registry { .. })));
    }

    #[test]
    fn rejects_invalid_structure_definition_url() {
        let result = BaseTypeRegistry::builder()
            .register(
                BaseType::Coding,
                SchemaDescriptor::new("example.Coding").with_structure_definition_url("not a url"),
            )
            .build();
        assert!(matches!(result, Err(FhirTypesError::UrlParse(_))));
    }

    #[test]
    fn missing_entry_is_initialization_order_error() {
        let registry = BaseTypeRegistry::builder()
            .register(BaseType::Coding, canonical_descriptor(BaseType::Coding))
            .build()
            .unwrap();
        assert!(matches!(
            registry.canonical(BaseType::Bundle),
            Err(FhirTypesError::InitializationOrder { .. })
        ));
    }

    #[test]
    fn equivalence_covers_shapes_and_urls() {
        let coding = || canonical_descriptor(BaseType::Coding);
        let registry = |descriptor: SchemaDescriptor| {
            BaseTypeRegistry::builder()
                .register(BaseType::Coding, descriptor)
                .build()
                .unwrap()
        };

        let installed = registry(coding());
        assert!(installed.same_canonicals(&registry(coding())));

        let mut reshaped = coding();
        reshaped.fields.retain(|field| field.name != "display");
        assert!(!installed.same_canonicals(&registry(reshaped)));

        let mut moved = coding();
        moved.annotations.clear();
        let moved = moved.with_structure_definition_url("http://example.org/StructureDefinition/coding");
        assert!(!installed.same_canonicals(&registry(moved)));
    }

    #[test]
    fn resolves_references() {
        let registry = BaseTypeRegistry::with_defaults().unwrap();
        assert_eq!(
            registry.base_type_for_reference("http://hl7.org/fhir/StructureDefinition/Coding|4.0.1"),
            Some(BaseType::Coding)
        );
        assert_eq!(
            registry.base_type_for_reference("hl7.fhir.r4.core.CodeableConcept"),
            Some(BaseType::CodeableConcept)
        );
        assert_eq!(registry.base_type_for_reference("dateTime"), Some(BaseType::DateTime));
        assert_eq!(registry.base_type_for_reference("Patient"), None);
    }
}
