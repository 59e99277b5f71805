// Closed set of FHIR base types the classifier reasons about

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FhirTypesError, Result};

pub const STRUCTURE_DEFINITION_BASE_URL: &str = "http://hl7.org/fhir/StructureDefinition/";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseType {
    Bundle,
    CodeableConcept,
    Coding,
    Code,
    Extension,
    Boolean,
    String,
    Integer,
    PositiveInt,
    UnsignedInt,
    Decimal,
    DateTime,
    Date,
    Time,
    Quantity,
    SimpleQuantity,
}

/// Wire-level kind of a primitive's `value` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ScalarKind {
    Bool,
    String,
    Int32,
    UInt32,
    Int64,
    Bytes,
}

impl BaseType {
    pub const ALL: [BaseType; 16] = [
        BaseType::Bundle,
        BaseType::CodeableConcept,
        BaseType::Coding,
        BaseType::Code,
        BaseType::Extension,
        BaseType::Boolean,
        BaseType::String,
        BaseType::Integer,
        BaseType::PositiveInt,
        BaseType::UnsignedInt,
        BaseType::Decimal,
        BaseType::DateTime,
        BaseType::Date,
        BaseType::Time,
        BaseType::Quantity,
        BaseType::SimpleQuantity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BaseType::Bundle => "Bundle",
            BaseType::CodeableConcept => "CodeableConcept",
            BaseType::Coding => "Coding",
            BaseType::Code => "Code",
            BaseType::Extension => "Extension",
            BaseType::Boolean => "Boolean",
            BaseType::String => "String",
            BaseType::Integer => "Integer",
            BaseType::PositiveInt => "PositiveInt",
            BaseType::UnsignedInt => "UnsignedInt",
            BaseType::Decimal => "Decimal",
            BaseType::DateTime => "DateTime",
            BaseType::Date => "Date",
            BaseType::Time => "Time",
            BaseType::Quantity => "Quantity",
            BaseType::SimpleQuantity => "SimpleQuantity",
        }
    }

    /// Type id as it appears in the structure definition URL. Primitives use
    /// lower camel case.
    pub fn fhir_type_id(self) -> &'static str {
        match self {
            BaseType::Code => "code",
            BaseType::Boolean => "boolean",
            BaseType::String => "string",
            BaseType::Integer => "integer",
            BaseType::PositiveInt => "positiveInt",
            BaseType::UnsignedInt => "unsignedInt",
            BaseType::Decimal => "decimal",
            BaseType::DateTime => "dateTime",
            BaseType::Date => "date",
            BaseType::Time => "time",
            other => other.name(),
        }
    }

    pub fn structure_definition_url(self) -> String {
        format!("{STRUCTURE_DEFINITION_BASE_URL}{}", self.fhir_type_id())
    }

    pub fn scalar_kind(self) -> Option<ScalarKind> {
        match self {
            BaseType::Boolean => Some(ScalarKind::Bool),
            BaseType::Code | BaseType::String | BaseType::Decimal => Some(ScalarKind::String),
            BaseType::Integer => Some(ScalarKind::Int32),
            BaseType::PositiveInt | BaseType::UnsignedInt => Some(ScalarKind::UInt32),
            BaseType::DateTime | BaseType::Date | BaseType::Time => Some(ScalarKind::Int64),
            _ => None,
        }
    }

    pub fn is_primitive(self) -> bool {
        self.scalar_kind().is_some()
    }

    /// Composite and container types may be recognised by shape when a
    /// profile omits its base marker. Primitive profiles always carry one.
    pub fn uses_structural_fallback(self) -> bool {
        matches!(
            self,
            BaseType::Bundle
                | BaseType::CodeableConcept
                | BaseType::Coding
                | BaseType::Code
                | BaseType::Extension
        )
    }

    /// Matches a bare type name (`Coding`, `dateTime`) case-sensitively
    /// against both the display name and the FHIR type id.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name || t.fhir_type_id() == name)
    }

    /// Matches a structure definition URL, ignoring any `|version` suffix.
    pub fn from_structure_definition_url(url: &str) -> Option<Self> {
        let unversioned = url.split('|').next().unwrap_or(url);
        let id = unversioned.strip_prefix(STRUCTURE_DEFINITION_BASE_URL)?;
        Self::ALL.into_iter().find(|t| t.fhir_type_id() == id)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BaseType {
    type Err = FhirTypesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_type_name(s)
            .or_else(|| Self::from_structure_definition_url(s))
            .ok_or_else(|| FhirTypesError::invalid_argument(format!("unknown base type '{s}'")))
    }
}
