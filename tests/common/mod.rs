use octofhir_fhir_types::types::canonical::{canonical_descriptor, core_type};
use octofhir_fhir_types::*;
use std::sync::Arc;

#[allow(dead_code)]
pub fn default_registry() -> Arc<BaseTypeRegistry> {
    Arc::new(BaseTypeRegistry::with_defaults().unwrap())
}

#[allow(dead_code)]
pub fn default_classifier() -> DescriptorClassifier {
    DescriptorClassifier::new(default_registry())
}

#[allow(dead_code)]
pub fn classifier_with_pool(pool: DescriptorPool) -> DescriptorClassifier {
    default_classifier().with_resolver(Arc::new(pool))
}

/// Registry with only Coding and CodeableConcept populated.
#[allow(dead_code)]
pub fn coding_only_registry() -> Arc<BaseTypeRegistry> {
    Arc::new(
        BaseTypeRegistry::builder()
            .register(BaseType::Coding, canonical_descriptor(BaseType::Coding))
            .register(
                BaseType::CodeableConcept,
                canonical_descriptor(BaseType::CodeableConcept),
            )
            .build()
            .unwrap(),
    )
}

/// CodeableConcept-shaped descriptor without any profile marker.
#[allow(dead_code)]
pub fn unmarked_concept(full_name: &str) -> SchemaDescriptor {
    SchemaDescriptor::new(full_name)
        .with_field(FieldDescriptor::message("id", core_type("String")))
        .with_field(FieldDescriptor::message("extension", core_type("Extension")).repeated())
        .with_field(FieldDescriptor::message("coding", core_type("Coding")).repeated())
        .with_field(FieldDescriptor::message("text", core_type("String")))
}

/// Bundle profile whose nested types were renamed under the profile's name.
#[allow(dead_code)]
pub fn search_set_bundle() -> SchemaDescriptor {
    let name = "example.SearchSet";
    let nested = |suffix: &str| format!("{name}.{suffix}");
    SchemaDescriptor::new(name)
        .with_field(FieldDescriptor::message("id", core_type("Id")))
        .with_field(FieldDescriptor::message("identifier", core_type("Identifier")))
        .with_field(FieldDescriptor::message("type", nested("TypeCode")).required())
        .with_field(FieldDescriptor::message("timestamp", core_type("Instant")))
        .with_field(FieldDescriptor::message("total", core_type("UnsignedInt")).required())
        .with_field(FieldDescriptor::message("link", nested("Link")).repeated())
        .with_field(FieldDescriptor::message("entry", nested("Entry")).repeated())
        .with_field(FieldDescriptor::message("signature", core_type("Signature")))
        .with_nested_type(SchemaDescriptor::new(nested("TypeCode")))
        .with_nested_type(SchemaDescriptor::new(nested("Link")))
        .with_nested_type(SchemaDescriptor::new(nested("Entry")))
}
