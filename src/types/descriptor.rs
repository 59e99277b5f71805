// Schema descriptors: the reflective shape of a generated record type

use serde::{Deserialize, Serialize};
use std::fmt;

use super::base_type::ScalarKind;

/// Profile-of marker. Repeatable; values are structure definition URLs or
/// bare base type names.
pub const PROFILE_BASE_ANNOTATION: &str = "fhir_profile_base";
pub const STRUCTURE_DEFINITION_URL_ANNOTATION: &str = "fhir_structure_definition_url";

/// Stable identity of a descriptor: its fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorId(String);

impl DescriptorId {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self(full_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cardinality {
    #[default]
    Optional,
    Required,
    Repeated,
}

impl Cardinality {
    /// Whether a profile field with this cardinality still honours a base
    /// field declared with `base`. Profiles may narrow but never widen.
    pub fn is_compatible_with(self, base: Cardinality) -> bool {
        match base {
            Cardinality::Required => self == Cardinality::Required,
            Cardinality::Optional => {
                matches!(self, Cardinality::Optional | Cardinality::Required)
            }
            Cardinality::Repeated => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Scalar(ScalarKind),
    /// Fully qualified name of the referenced message type.
    Message(String),
    /// A `value[x]` style field admitting any of the listed types.
    Choice(Vec<FieldType>),
}

impl FieldType {
    pub fn message(full_name: impl Into<String>) -> Self {
        Self::Message(full_name.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub cardinality: Cardinality,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            cardinality: Cardinality::Optional,
        }
    }

    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(name, FieldType::Scalar(kind))
    }

    pub fn message(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, FieldType::message(type_name))
    }

    pub fn required(mut self) -> Self {
        self.cardinality = Cardinality::Required;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }
}

/// Immutable definition of a record type: ordered fields, nested types and
/// type-level annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    pub full_name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub nested_types: Vec<SchemaDescriptor>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl SchemaDescriptor {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Vec::new(),
            nested_types: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_nested_type(mut self, nested: SchemaDescriptor) -> Self {
        self.nested_types.push(nested);
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.push(Annotation {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_profile_base(self, base: impl Into<String>) -> Self {
        self.with_annotation(PROFILE_BASE_ANNOTATION, base)
    }

    pub fn with_structure_definition_url(self, url: impl Into<String>) -> Self {
        self.with_annotation(STRUCTURE_DEFINITION_URL_ANNOTATION, url)
    }

    pub fn id(&self) -> DescriptorId {
        DescriptorId::new(self.full_name.as_str())
    }

    /// Short name: the last segment of the fully qualified name.
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit('.')
            .next()
            .unwrap_or(self.full_name.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// First value declared for `key`.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// All values declared for `key`, in declaration order.
    pub fn annotation_values<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.annotations
            .iter()
            .filter(move |a| a.key == key)
            .map(|a| a.value.as_str())
    }

    pub fn profile_bases(&self) -> impl Iterator<Item = &str> {
        self.annotation_values(PROFILE_BASE_ANNOTATION)
    }

    pub fn has_profile_base(&self) -> bool {
        self.profile_bases().next().is_some()
    }

    pub fn structure_definition_url(&self) -> Option<&str> {
        self.annotation(STRUCTURE_DEFINITION_URL_ANNOTATION)
    }

    /// Depth-first search through nested types by fully qualified name.
    pub fn find_nested_type(&self, full_name: &str) -> Option<&SchemaDescriptor> {
        self.nested_types.iter().find_map(|nested| {
            if nested.full_name == full_name {
                Some(nested)
            } else {
                nested.find_nested_type(full_name)
            }
        })
    }
}
