//! Process-wide registry lifecycle. Kept in its own test binary, and in a
//! single test, so no other test installs the registry first.

use octofhir_fhir_types::types::canonical::canonical_descriptor;
use octofhir_fhir_types::*;

#[test]
fn global_registry_install_once() {
    assert!(!BaseTypeRegistry::is_installed());
    assert!(matches!(
        DescriptorClassifier::global(),
        Err(FhirTypesError::InitializationOrder { .. })
    ));
    assert!(matches!(
        InstanceClassifier::global(),
        Err(FhirTypesError::InitializationOrder { .. })
    ));

    let first = BaseTypeRegistry::install_default().unwrap();
    let again = BaseTypeRegistry::install_default().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &again));

    let different = BaseTypeRegistry::builder()
        .register(BaseType::Coding, canonical_descriptor(BaseType::Coding))
        .build()
        .unwrap();
    assert!(matches!(
        BaseTypeRegistry::install(different),
        Err(FhirTypesError::Initialization { .. })
    ));

    // Same names as the defaults, but a reshaped Coding
    let reshaped = BaseType::ALL
        .into_iter()
        .fold(BaseTypeRegistry::builder(), |builder, base| {
            let mut descriptor = canonical_descriptor(base);
            if base == BaseType::Coding {
                descriptor.fields.retain(|field| field.name != "user_selected");
            }
            builder.register(base, descriptor)
        })
        .build()
        .unwrap();
    assert!(matches!(
        BaseTypeRegistry::install(reshaped),
        Err(FhirTypesError::Initialization { .. })
    ));

    let classifier = DescriptorClassifier::global().unwrap();
    assert_eq!(classifier.registry().len(), BaseType::ALL.len());
    assert!(
        classifier
            .is_coding(&canonical_descriptor(BaseType::Coding))
            .unwrap()
    );
}
