pub mod base_type;
pub mod canonical;
pub mod classification;
pub mod descriptor;
pub mod pool;

pub use base_type::{BaseType, STRUCTURE_DEFINITION_BASE_URL, ScalarKind};
pub use classification::{ClassificationResult, ProfileEvidence, Resolution};
pub use descriptor::{
    Annotation, Cardinality, DescriptorId, FieldDescriptor, FieldType,
    PROFILE_BASE_ANNOTATION, STRUCTURE_DEFINITION_URL_ANNOTATION, SchemaDescriptor,
};
pub use pool::{DescriptorPool, DescriptorResolver, DescriptorSet};
