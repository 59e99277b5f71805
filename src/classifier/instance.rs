// Classification of concrete records through their descriptors

use serde_json::Value;
use std::sync::Arc;

use super::descriptor::DescriptorClassifier;
use crate::error::Result;
use crate::types::{BaseType, ClassificationResult, SchemaDescriptor};

/// A record instance that can report the schema it was built from.
pub trait FhirRecord {
    fn descriptor(&self) -> &SchemaDescriptor;
}

/// Untyped record: a JSON value paired with its descriptor.
#[derive(Debug, Clone)]
pub struct DynamicRecord {
    descriptor: Arc<SchemaDescriptor>,
    value: Value,
}

impl DynamicRecord {
    pub fn new(descriptor: Arc<SchemaDescriptor>, value: Value) -> Self {
        Self { descriptor, value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl FhirRecord for DynamicRecord {
    fn descriptor(&self) -> &SchemaDescriptor {
        &self.descriptor
    }
}

/// Same predicates as [`DescriptorClassifier`], taking record instances.
/// Field values never influence the answer.
#[derive(Debug, Clone)]
pub struct InstanceClassifier {
    inner: Arc<DescriptorClassifier>,
}

impl InstanceClassifier {
    pub fn new(inner: Arc<DescriptorClassifier>) -> Self {
        Self { inner }
    }

    pub fn global() -> Result<Self> {
        Ok(Self::new(Arc::new(DescriptorClassifier::global()?)))
    }

    pub fn descriptor_classifier(&self) -> &DescriptorClassifier {
        &self.inner
    }

    pub fn classify(
        &self,
        record: &dyn FhirRecord,
        target: BaseType,
    ) -> Result<ClassificationResult> {
        self.inner.classify(record.descriptor(), target)
    }

    pub fn is_exact(&self, record: &dyn FhirRecord, target: BaseType) -> Result<bool> {
        self.inner.is_exact(record.descriptor(), target)
    }

    pub fn is_profile(&self, record: &dyn FhirRecord, target: BaseType) -> Result<bool> {
        self.inner.is_profile(record.descriptor(), target)
    }

    pub fn is_exact_or_profile(&self, record: &dyn FhirRecord, target: BaseType) -> Result<bool> {
        self.inner.is_exact_or_profile(record.descriptor(), target)
    }

    pub fn is_type_or_profile_of(
        &self,
        record: &dyn FhirRecord,
        target: BaseType,
    ) -> Result<bool> {
        self.inner.is_type_or_profile_of(record.descriptor(), target)
    }

    pub fn base_type_of(&self, record: &dyn FhirRecord) -> Result<Option<BaseType>> {
        self.inner.base_type_of(record.descriptor())
    }
}

super::base_type_predicates!(InstanceClassifier, dyn FhirRecord);
