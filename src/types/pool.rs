// Descriptor lookup used to follow profile base chains

use papaya::HashMap as PapayaMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use super::descriptor::SchemaDescriptor;
use crate::error::Result;

/// Lookup of descriptors by structure definition URL or fully qualified name.
pub trait DescriptorResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Option<Arc<SchemaDescriptor>>;
}

/// JSON document holding a list of descriptors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptorSet {
    pub descriptors: Vec<SchemaDescriptor>,
}

impl DescriptorSet {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Concurrent descriptor pool indexed by full name and by structure
/// definition URL. Nested types are indexed by full name as well.
#[derive(Debug, Default)]
pub struct DescriptorPool {
    by_name: PapayaMap<String, Arc<SchemaDescriptor>>,
    by_url: PapayaMap<String, Arc<SchemaDescriptor>>,
}

impl DescriptorPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_set(set: DescriptorSet) -> Self {
        let pool = Self::new();
        for descriptor in set.descriptors {
            pool.add(descriptor);
        }
        pool
    }

    pub fn add(&self, descriptor: SchemaDescriptor) -> Arc<SchemaDescriptor> {
        let descriptor = Arc::new(descriptor);
        self.add_shared(Arc::clone(&descriptor));
        descriptor
    }

    pub fn add_shared(&self, descriptor: Arc<SchemaDescriptor>) {
        for nested in &descriptor.nested_types {
            self.add_shared(Arc::new(nested.clone()));
        }
        if let Some(url) = descriptor.structure_definition_url() {
            self.by_url
                .pin()
                .insert(unversioned(url).to_string(), Arc::clone(&descriptor));
        }
        self.by_name
            .pin()
            .insert(descriptor.full_name.clone(), descriptor);
    }

    pub fn get_by_name(&self, full_name: &str) -> Option<Arc<SchemaDescriptor>> {
        self.by_name.pin().get(full_name).cloned()
    }

    pub fn get_by_url(&self, url: &str) -> Option<Arc<SchemaDescriptor>> {
        self.by_url.pin().get(unversioned(url)).cloned()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Top-level and nested descriptors, sorted by full name.
    pub fn descriptors(&self) -> Vec<Arc<SchemaDescriptor>> {
        let guard = self.by_name.pin();
        let mut all: Vec<_> = guard.values().cloned().collect();
        all.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        all
    }
}

impl DescriptorResolver for DescriptorPool {
    fn resolve(&self, reference: &str) -> Option<Arc<SchemaDescriptor>> {
        self.get_by_url(reference)
            .or_else(|| self.get_by_name(reference))
    }
}

/// Strips a canonical `|version` suffix.
pub(crate) fn unversioned(url: &str) -> &str {
    url.split('|').next().unwrap_or(url)
}
