// Built-in canonical shapes for every base type (FHIR R4 layout)

use super::base_type::{BaseType, ScalarKind};
use super::descriptor::{FieldDescriptor, FieldType, SchemaDescriptor};

pub const CORE_PACKAGE: &str = "hl7.fhir.r4.core";

/// Fully qualified name of a message in the core package.
pub fn core_type(name: &str) -> String {
    format!("{CORE_PACKAGE}.{name}")
}

/// Fully qualified name of the built-in canonical descriptor for `base`.
pub fn canonical_full_name(base: BaseType) -> String {
    core_type(base.name())
}

/// Builds the canonical descriptor for every base type.
pub fn default_canonicals() -> Vec<(BaseType, SchemaDescriptor)> {
    BaseType::ALL
        .into_iter()
        .map(|base| (base, canonical_descriptor(base)))
        .collect()
}

pub fn canonical_descriptor(base: BaseType) -> SchemaDescriptor {
    let descriptor = SchemaDescriptor::new(canonical_full_name(base))
        .with_structure_definition_url(base.structure_definition_url());

    match base {
        BaseType::Bundle => bundle(descriptor),
        BaseType::CodeableConcept => element(descriptor)
            .with_field(FieldDescriptor::message("coding", core_type("Coding")).repeated())
            .with_field(FieldDescriptor::message("text", core_type("String"))),
        BaseType::Coding => element(descriptor)
            .with_field(FieldDescriptor::message("system", core_type("Uri")))
            .with_field(FieldDescriptor::message("version", core_type("String")))
            .with_field(FieldDescriptor::message("code", core_type("Code")))
            .with_field(FieldDescriptor::message("display", core_type("String")))
            .with_field(FieldDescriptor::message("user_selected", core_type("Boolean"))),
        BaseType::Extension => element(descriptor)
            .with_field(FieldDescriptor::message("url", core_type("Uri")).required())
            .with_field(FieldDescriptor::new("value", extension_value_choice())),
        BaseType::DateTime | BaseType::Date => element(descriptor)
            .with_field(FieldDescriptor::scalar("value_us", ScalarKind::Int64))
            .with_field(FieldDescriptor::scalar("timezone", ScalarKind::String))
            .with_field(FieldDescriptor::scalar("precision", ScalarKind::Int32)),
        BaseType::Time => element(descriptor)
            .with_field(FieldDescriptor::scalar("value_us", ScalarKind::Int64))
            .with_field(FieldDescriptor::scalar("precision", ScalarKind::Int32)),
        BaseType::Quantity => quantity(descriptor, true),
        BaseType::SimpleQuantity => quantity(descriptor, false),
        primitive => match primitive.scalar_kind() {
            Some(kind) => element(descriptor).with_field(FieldDescriptor::scalar("value", kind)),
            None => element(descriptor),
        },
    }
}

// id + extension, shared by every element type
fn element(descriptor: SchemaDescriptor) -> SchemaDescriptor {
    descriptor
        .with_field(FieldDescriptor::message("id", core_type("String")))
        .with_field(FieldDescriptor::message("extension", core_type("Extension")).repeated())
}

fn bundle(descriptor: SchemaDescriptor) -> SchemaDescriptor {
    let bundle_name = descriptor.full_name.clone();
    let nested = |name: &str| format!("{bundle_name}.{name}");

    descriptor
        .with_field(FieldDescriptor::message("id", core_type("Id")))
        .with_field(FieldDescriptor::message("meta", core_type("Meta")))
        .with_field(FieldDescriptor::message("implicit_rules", core_type("Uri")))
        .with_field(FieldDescriptor::message("language", core_type("Code")))
        .with_field(FieldDescriptor::message("identifier", core_type("Identifier")))
        .with_field(FieldDescriptor::message("type", nested("TypeCode")).required())
        .with_field(FieldDescriptor::message("timestamp", core_type("Instant")))
        .with_field(FieldDescriptor::message("total", core_type("UnsignedInt")))
        .with_field(FieldDescriptor::message("link", nested("Link")).repeated())
        .with_field(FieldDescriptor::message("entry", nested("Entry")).repeated())
        .with_field(FieldDescriptor::message("signature", core_type("Signature")))
        .with_nested_type(
            SchemaDescriptor::new(nested("TypeCode"))
                .with_field(FieldDescriptor::scalar("value", ScalarKind::String)),
        )
        .with_nested_type(
            SchemaDescriptor::new(nested("Link"))
                .with_field(FieldDescriptor::message("relation", core_type("String")).required())
                .with_field(FieldDescriptor::message("url", core_type("Uri")).required()),
        )
        .with_nested_type(
            SchemaDescriptor::new(nested("Entry"))
                .with_field(FieldDescriptor::message("link", nested("Link")).repeated())
                .with_field(FieldDescriptor::message("full_url", core_type("Uri")))
                .with_field(FieldDescriptor::message("resource", core_type("ContainedResource"))),
        )
}

fn quantity(descriptor: SchemaDescriptor, with_comparator: bool) -> SchemaDescriptor {
    let mut descriptor =
        element(descriptor).with_field(FieldDescriptor::message("value", core_type("Decimal")));
    if with_comparator {
        let comparator = format!("{}.ComparatorCode", descriptor.full_name);
        descriptor = descriptor
            .with_field(FieldDescriptor::message("comparator", comparator.as_str()))
            .with_nested_type(
                SchemaDescriptor::new(comparator)
                    .with_field(FieldDescriptor::scalar("value", ScalarKind::String)),
            );
    }
    descriptor
        .with_field(FieldDescriptor::message("unit", core_type("String")))
        .with_field(FieldDescriptor::message("system", core_type("Uri")))
        .with_field(FieldDescriptor::message("code", core_type("Code")))
}

fn extension_value_choice() -> FieldType {
    FieldType::Choice(
        [
            "Boolean",
            "Code",
            "Coding",
            "CodeableConcept",
            "Date",
            "DateTime",
            "Decimal",
            "Integer",
            "PositiveInt",
            "Quantity",
            "Reference",
            "String",
            "Time",
            "UnsignedInt",
            "Uri",
        ]
        .into_iter()
        .map(|name| FieldType::message(core_type(name)))
        .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_canonical_carries_its_url() {
        for (base, descriptor) in default_canonicals() {
            assert_eq!(
                descriptor.structure_definition_url(),
                Some(base.structure_definition_url().as_str())
            );
            assert!(!descriptor.has_profile_base());
        }
    }

    #[test]
    fn primitives_expose_their_scalar_kind() {
        let boolean = canonical_descriptor(BaseType::Boolean);
        let value = boolean.field("value").unwrap();
        assert_eq!(value.field_type, FieldType::Scalar(ScalarKind::Bool));
    }

    #[test]
    fn simple_quantity_has_no_comparator() {
        assert!(canonical_descriptor(BaseType::Quantity).field("comparator").is_some());
        assert!(canonical_descriptor(BaseType::SimpleQuantity).field("comparator").is_none());
    }
}
