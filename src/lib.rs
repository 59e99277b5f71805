//! # OctoFHIR FHIR Types
//!
//! Structural classification of FHIR schema descriptors: decides which base
//! type (Coding, CodeableConcept, Bundle, primitives, ...) a generated record
//! type is, or is a profile of, without depending on the generated code for
//! every resource and profile.
//!
//! ## Features
//!
//! - **Exact matching**: identity comparison against one registered canonical
//!   descriptor per base type
//! - **Profile matching**: `fhir_profile_base` markers, followed transitively
//!   through chains of profiles with cycle detection
//! - **Structural fallback**: composites without markers are recognised by a
//!   compatible field superset of the canonical shape
//! - **Concurrency**: immutable install-once registry and a lock-free
//!   memoization cache
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use octofhir_fhir_types::*;
//!
//! # fn example() -> Result<()> {
//! BaseTypeRegistry::install_default()?;
//! let classifier = DescriptorClassifier::global()?;
//!
//! let loinc = SchemaDescriptor::new("example.LoincCoding")
//!     .with_profile_base("http://hl7.org/fhir/StructureDefinition/Coding");
//! assert!(classifier.is_profile_of_coding(&loinc)?);
//! assert!(classifier.is_type_or_profile_of(&loinc, BaseType::Coding)?);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod core;
pub mod error;
pub mod registry;
pub mod types;

pub use classifier::{
    ClassificationCache, DescriptorClassifier, DynamicRecord, FhirRecord, InstanceClassifier,
    is_core_base_definition,
};
pub use crate::core::{AmbiguityPolicy, ClassifierConfig};
pub use error::{FhirTypesError, Result};
pub use registry::{BaseTypeRegistry, BaseTypeRegistryBuilder};
pub use types::*;
