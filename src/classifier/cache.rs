use papaya::HashMap as PapayaMap;

use crate::types::{DescriptorId, Resolution};

/// Memoized resolutions keyed by descriptor identity.
///
/// Concurrent misses on the same descriptor may both compute and insert;
/// resolution is deterministic so the writes agree.
#[derive(Debug, Default)]
pub struct ClassificationCache {
    entries: PapayaMap<DescriptorId, Resolution>,
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &DescriptorId) -> Option<Resolution> {
        let hit = self.entries.pin().get(id).copied();

        #[cfg(feature = "performance-metrics")]
        match hit {
            Some(_) => metrics::counter!("fhir_types_classification_cache_hits_total").increment(1),
            None => {
                metrics::counter!("fhir_types_classification_cache_misses_total").increment(1)
            }
        }

        hit
    }

    pub fn insert(&self, id: DescriptorId, resolution: Resolution) {
        self.entries.pin().insert(id, resolution);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.pin().clear();
    }
}
