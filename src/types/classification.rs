use serde::{Deserialize, Serialize};
use std::fmt;

use super::base_type::BaseType;

/// Relationship between a descriptor and one base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationResult {
    Exact,
    Profile,
    Unrelated,
}

impl ClassificationResult {
    pub fn is_exact(self) -> bool {
        self == Self::Exact
    }

    pub fn is_profile(self) -> bool {
        self == Self::Profile
    }

    pub fn is_exact_or_profile(self) -> bool {
        self != Self::Unrelated
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Profile => f.write_str("profile"),
            Self::Unrelated => f.write_str("unrelated"),
        }
    }
}

/// How a profile relationship was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileEvidence {
    /// A `fhir_profile_base` marker, possibly through a chain of profiles.
    Marker,
    /// Field-superset compatibility with a composite's canonical shape.
    Structural,
}

/// Everything the classifier knows about one descriptor. At most one of
/// `exact` and `profile_of` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    exact: Option<BaseType>,
    profile_of: Option<(BaseType, ProfileEvidence)>,
}

impl Resolution {
    pub fn exact(base: BaseType) -> Self {
        Self {
            exact: Some(base),
            profile_of: None,
        }
    }

    pub fn profile(base: BaseType, evidence: ProfileEvidence) -> Self {
        Self {
            exact: None,
            profile_of: Some((base, evidence)),
        }
    }

    pub fn unrelated() -> Self {
        Self {
            exact: None,
            profile_of: None,
        }
    }

    pub fn classify(&self, target: BaseType) -> ClassificationResult {
        if self.exact == Some(target) {
            ClassificationResult::Exact
        } else if self.profile_base() == Some(target) {
            ClassificationResult::Profile
        } else {
            ClassificationResult::Unrelated
        }
    }

    pub fn exact_type(&self) -> Option<BaseType> {
        self.exact
    }

    pub fn profile_base(&self) -> Option<BaseType> {
        self.profile_of.map(|(base, _)| base)
    }

    pub fn evidence(&self) -> Option<ProfileEvidence> {
        self.profile_of.map(|(_, evidence)| evidence)
    }

    /// The exact type or the profiled base type, whichever applies.
    pub fn base_type(&self) -> Option<BaseType> {
        self.exact.or_else(|| self.profile_base())
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.exact, self.profile_of) {
            (Some(base), _) => write!(f, "exact {base}"),
            (None, Some((base, ProfileEvidence::Marker))) => write!(f, "profile of {base}"),
            (None, Some((base, ProfileEvidence::Structural))) => {
                write!(f, "profile of {base} (structural)")
            }
            (None, None) => f.write_str("unrelated"),
        }
    }
}
