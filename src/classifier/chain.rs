// Resolution of profile base markers, following chains of profiles

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::core::AmbiguityPolicy;
use crate::error::{FhirTypesError, Result};
use crate::registry::BaseTypeRegistry;
use crate::types::{BaseType, DescriptorId, DescriptorResolver, SchemaDescriptor};

// State of one marker walk. `path` holds the descriptors currently being
// followed; meeting one of them again means the chain loops. `explored`
// remembers where every finished descriptor led, so profiles listing each
// ancestor as a separate marker are walked once.
#[derive(Default)]
struct Walk {
    path: Vec<DescriptorId>,
    explored: HashMap<DescriptorId, Option<BaseType>>,
}

pub(crate) struct ProfileChain<'a> {
    pub registry: &'a BaseTypeRegistry,
    pub resolver: Option<&'a dyn DescriptorResolver>,
    pub policy: AmbiguityPolicy,
}

impl ProfileChain<'_> {
    /// Base type named by the descriptor's profile base markers, or `None`
    /// when no marker leads to a registered base type.
    pub fn resolve(&self, descriptor: &SchemaDescriptor) -> Result<Option<BaseType>> {
        let mut walk = Walk {
            path: vec![descriptor.id()],
            ..Walk::default()
        };
        let mut found: Option<(BaseType, &str)> = None;

        for marker in descriptor.profile_bases() {
            let Some(base) = self.follow(marker, &mut walk)? else {
                debug!(
                    descriptor = %descriptor.full_name,
                    marker,
                    "profile base does not lead to a registered base type"
                );
                continue;
            };

            match found {
                None => found = Some((base, marker)),
                Some((first, _)) if first == base => {}
                Some((first, first_marker)) => match self.policy {
                    AmbiguityPolicy::FirstWins => {
                        warn!(
                            descriptor = %descriptor.full_name,
                            kept = %first,
                            kept_marker = first_marker,
                            ignored = %base,
                            ignored_marker = marker,
                            "descriptor names more than one profile base type"
                        );
                    }
                    AmbiguityPolicy::Reject => {
                        return Err(FhirTypesError::ambiguous_profile_base(
                            descriptor.full_name.as_str(),
                            first.name(),
                            base.name(),
                        ));
                    }
                },
            }
        }

        Ok(found.map(|(base, _)| base))
    }

    fn follow(&self, reference: &str, walk: &mut Walk) -> Result<Option<BaseType>> {
        if let Some(base) = self.registry.base_type_for_reference(reference) {
            return Ok(Some(base));
        }

        let Some(next) = self.resolver.and_then(|resolver| resolver.resolve(reference)) else {
            return Ok(None);
        };

        let id = next.id();
        if walk.path.contains(&id) {
            let mut cycle: Vec<String> = walk.path.iter().map(|p| p.to_string()).collect();
            cycle.push(id.to_string());
            return Err(FhirTypesError::malformed_schema(walk.path[0].as_str(), cycle));
        }

        if let Some(base) = self.registry.base_type_of(&id) {
            return Ok(Some(base));
        }
        if let Some(resolved) = walk.explored.get(&id) {
            return Ok(*resolved);
        }

        walk.path.push(id.clone());
        let mut resolved = None;
        for marker in next.profile_bases() {
            if let Some(base) = self.follow(marker, walk)? {
                resolved = Some(base);
                break;
            }
        }
        walk.path.pop();
        walk.explored.insert(id, resolved);

        Ok(resolved)
    }
}
