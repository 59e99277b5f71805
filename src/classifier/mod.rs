/// Per-base-type shortcuts (`is_coding`, `is_profile_of_coding`,
/// `is_type_or_profile_of_coding`, ...) over a classifier's generic
/// `is_exact` / `is_profile` / `is_exact_or_profile`.
macro_rules! base_type_predicates {
    (@emit $classifier:ty, $input:ty;
        $($base:ident => $exact:ident, $profile:ident, $either:ident;)*) => {
        impl $classifier {
            $(
                #[doc = concat!("Exactly the canonical ", stringify!($base), ".")]
                pub fn $exact(&self, input: &$input) -> $crate::error::Result<bool> {
                    self.is_exact(input, $crate::types::BaseType::$base)
                }

                #[doc = concat!("A profile of ", stringify!($base), ".")]
                pub fn $profile(&self, input: &$input) -> $crate::error::Result<bool> {
                    self.is_profile(input, $crate::types::BaseType::$base)
                }

                #[doc = concat!(stringify!($base), " or a profile of it.")]
                pub fn $either(&self, input: &$input) -> $crate::error::Result<bool> {
                    self.is_exact_or_profile(input, $crate::types::BaseType::$base)
                }
            )*
        }
    };
    ($classifier:ty, $input:ty) => {
        $crate::classifier::base_type_predicates!(@emit $classifier, $input;
            Bundle => is_bundle, is_profile_of_bundle, is_type_or_profile_of_bundle;
            CodeableConcept => is_codeable_concept, is_profile_of_codeable_concept,
                is_type_or_profile_of_codeable_concept;
            Coding => is_coding, is_profile_of_coding, is_type_or_profile_of_coding;
            Code => is_code, is_profile_of_code, is_type_or_profile_of_code;
            Extension => is_extension, is_profile_of_extension, is_type_or_profile_of_extension;
            Boolean => is_boolean, is_profile_of_boolean, is_type_or_profile_of_boolean;
            String => is_string, is_profile_of_string, is_type_or_profile_of_string;
            Integer => is_integer, is_profile_of_integer, is_type_or_profile_of_integer;
            PositiveInt => is_positive_int, is_profile_of_positive_int,
                is_type_or_profile_of_positive_int;
            UnsignedInt => is_unsigned_int, is_profile_of_unsigned_int,
                is_type_or_profile_of_unsigned_int;
            Decimal => is_decimal, is_profile_of_decimal, is_type_or_profile_of_decimal;
            DateTime => is_date_time, is_profile_of_date_time, is_type_or_profile_of_date_time;
            Date => is_date, is_profile_of_date, is_type_or_profile_of_date;
            Time => is_time, is_profile_of_time, is_type_or_profile_of_time;
            Quantity => is_quantity, is_profile_of_quantity, is_type_or_profile_of_quantity;
            SimpleQuantity => is_simple_quantity, is_profile_of_simple_quantity,
                is_type_or_profile_of_simple_quantity;
        );
    };
}

pub(crate) use base_type_predicates;

pub mod cache;
mod chain;
pub mod descriptor;
pub mod instance;
pub mod structural;

pub use cache::ClassificationCache;
pub use descriptor::DescriptorClassifier;
pub use instance::{DynamicRecord, FhirRecord, InstanceClassifier};
pub use structural::{INHERITED_FIELDS, contract_fields, is_core_base_definition};
