// Shape-based profile detection for composite base types

use tracing::{debug, warn};

use super::chain::ProfileChain;
use crate::registry::BaseTypeRegistry;
use crate::types::{
    BaseType, DescriptorId, DescriptorResolver, FieldDescriptor, FieldType,
    STRUCTURE_DEFINITION_BASE_URL, SchemaDescriptor,
};

/// Element and resource plumbing every type inherits; not part of any base
/// type's own contract.
pub const INHERITED_FIELDS: [&str; 6] = [
    "id",
    "extension",
    "modifier_extension",
    "meta",
    "implicit_rules",
    "language",
];

/// Fields a structural profile of `canonical` must keep.
pub fn contract_fields(canonical: &SchemaDescriptor) -> impl Iterator<Item = &FieldDescriptor> {
    canonical
        .fields
        .iter()
        .filter(|field| !INHERITED_FIELDS.contains(&field.name.as_str()))
}

/// An unmarked descriptor published under a core structure definition URL
/// is a base definition in its own right (`hl7.fhir.r4.core.Uri`), never a
/// profile of another base type.
pub fn is_core_base_definition(descriptor: &SchemaDescriptor) -> bool {
    !descriptor.has_profile_base()
        && descriptor
            .structure_definition_url()
            .is_some_and(|url| url.starts_with(STRUCTURE_DEFINITION_BASE_URL))
}

pub(crate) struct StructuralMatcher<'a> {
    pub registry: &'a BaseTypeRegistry,
    pub resolver: Option<&'a dyn DescriptorResolver>,
    pub chain: &'a ProfileChain<'a>,
}

impl StructuralMatcher<'_> {
    /// The composite base type whose contract `candidate` satisfies. When
    /// several do, the largest contract wins, then declaration order.
    pub fn best_match(&self, candidate: &SchemaDescriptor) -> Option<BaseType> {
        if is_core_base_definition(candidate) {
            debug!(
                descriptor = %candidate.full_name,
                "core base definition, skipping structural match"
            );
            return None;
        }

        let matches: Vec<(BaseType, usize)> = self
            .registry
            .base_types()
            .filter(|base| base.uses_structural_fallback())
            .filter_map(|base| {
                let canonical = self.registry.get(base)?;
                let size = contract_fields(canonical).count();
                self.satisfies(candidate, base, canonical)
                    .then_some((base, size))
            })
            .collect();

        let best = matches
            .iter()
            .copied()
            .max_by(|(a, a_size), (b, b_size)| a_size.cmp(b_size).then(b.cmp(a)))
            .map(|(base, _)| base);

        if matches.len() > 1 {
            warn!(
                descriptor = %candidate.full_name,
                candidates = ?matches.iter().map(|(base, _)| *base).collect::<Vec<_>>(),
                chosen = ?best,
                "descriptor is structurally compatible with several base types"
            );
        } else if let Some(base) = best {
            debug!(descriptor = %candidate.full_name, %base, "structural profile match");
        }

        best
    }

    /// Every contract field of `canonical` is present in `candidate` with a
    /// compatible type and cardinality. Primitive contracts are closed: the
    /// candidate may add nothing beyond the value and element plumbing.
    pub fn satisfies(
        &self,
        candidate: &SchemaDescriptor,
        base: BaseType,
        canonical: &SchemaDescriptor,
    ) -> bool {
        let mut contract = contract_fields(canonical).peekable();
        if contract.peek().is_none() {
            return false;
        }

        if base.is_primitive() {
            let extra = candidate.fields.iter().find(|field| {
                !INHERITED_FIELDS.contains(&field.name.as_str())
                    && canonical.field(&field.name).is_none()
            });
            if let Some(extra) = extra {
                debug!(
                    descriptor = %candidate.full_name,
                    %base,
                    field = %extra.name,
                    "field outside a primitive contract"
                );
                return false;
            }
        }

        contract.all(|required| {
            candidate.field(&required.name).is_some_and(|field| {
                field.cardinality.is_compatible_with(required.cardinality)
                    && self.type_compatible(
                        candidate,
                        canonical,
                        &field.field_type,
                        &required.field_type,
                    )
            })
        })
    }

    fn type_compatible(
        &self,
        candidate: &SchemaDescriptor,
        canonical: &SchemaDescriptor,
        actual: &FieldType,
        expected: &FieldType,
    ) -> bool {
        match (actual, expected) {
            (FieldType::Scalar(a), FieldType::Scalar(b)) => a == b,
            (FieldType::Message(a), FieldType::Message(b)) => {
                a == b
                    || Self::renamed_nested_type(candidate, canonical, a, b)
                    || self.profiled_message(candidate, a, b)
            }
            (FieldType::Choice(actual), FieldType::Choice(expected)) => {
                !actual.is_empty()
                    && actual.iter().all(|a| {
                        expected
                            .iter()
                            .any(|e| self.type_compatible(candidate, canonical, a, e))
                    })
            }
            (single, FieldType::Choice(expected)) => expected
                .iter()
                .any(|e| self.type_compatible(candidate, canonical, single, e)),
            _ => false,
        }
    }

    // Profiles rename the canonical's nested types under their own name,
    // e.g. `Bundle.Entry` becomes `SearchSet.Entry`. The renamed type has to
    // actually be declared by the candidate.
    fn renamed_nested_type(
        candidate: &SchemaDescriptor,
        canonical: &SchemaDescriptor,
        actual: &str,
        expected: &str,
    ) -> bool {
        expected
            .strip_prefix(canonical.full_name.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|suffix| {
                actual
                    .strip_prefix(candidate.full_name.as_str())?
                    .strip_prefix('.')
                    .map(|actual_suffix| actual_suffix == suffix)
            })
            .unwrap_or(false)
            && candidate.find_nested_type(actual).is_some()
    }

    // A field typed with a marker profile of the expected base type, such as
    // a `coding` field holding a fixed-system Coding.
    fn profiled_message(&self, candidate: &SchemaDescriptor, actual: &str, expected: &str) -> bool {
        let Some(expected_base) = self.registry.base_type_of(&DescriptorId::new(expected)) else {
            return false;
        };

        let nested = candidate.find_nested_type(actual);
        let resolved = match nested {
            Some(_) => None,
            None => self.resolver.and_then(|resolver| resolver.resolve(actual)),
        };
        let Some(field_type) = nested.or(resolved.as_deref()) else {
            return false;
        };

        match self.chain.resolve(field_type) {
            Ok(base) => base == Some(expected_base),
            Err(err) => {
                warn!(
                    descriptor = %candidate.full_name,
                    field_type = actual,
                    error = %err,
                    "ignoring malformed field type during structural match"
                );
                false
            }
        }
    }
}
