//! Nat classification results. A discovery procedure outside this crate decides
//! which value applies; nothing here computes them.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NatType {
    #[default]
    Unknown,
    NoNat,
    UdpBlocked,
    FullCone,
    RestrictedCone,
    PortRestrictedCone,
    Symmetric,
}

impl NatType {
    pub fn name(self) -> &'static str {
        match self {
            NatType::Unknown => "UnknownNatType",
            NatType::NoNat => "NoNat",
            NatType::UdpBlocked => "UDPBlock",
            NatType::FullCone => "FullConeNAT",
            NatType::RestrictedCone => "RestrictedConeNAT",
            NatType::PortRestrictedCone => "PortRestrictedConeNAT",
            NatType::Symmetric => "SymmetricNAT",
        }
    }
}

// rfc 4787, 4.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MappingBehavior {
    #[default]
    Unknown,
    None,
    EndpointIndependent,
    AddressAndPortDependent,
    AddressDependent,
}

impl MappingBehavior {
    pub fn name(self) -> &'static str {
        match self {
            MappingBehavior::Unknown => "UnknownMappingBehavior",
            MappingBehavior::None => "NoMapping",
            MappingBehavior::EndpointIndependent => "EndpointIndependentMapping",
            MappingBehavior::AddressAndPortDependent => "AddressAndPortDependentMapping",
            MappingBehavior::AddressDependent => "AddressDependentMapping",
        }
    }
}

// rfc 4787, 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilteringBehavior {
    #[default]
    Unknown,
    EndpointIndependent,
    AddressAndPortDependent,
    AddressDependent,
}

impl FilteringBehavior {
    pub fn name(self) -> &'static str {
        match self {
            FilteringBehavior::Unknown => "UnknownFilteringBehavior",
            FilteringBehavior::EndpointIndependent => "EndpointIndependentFiltering",
            FilteringBehavior::AddressAndPortDependent => "AddressAndPortDependentFiltering",
            FilteringBehavior::AddressDependent => "AddressDependentFiltering",
        }
    }
}

macro_rules! label_impls {
    ($($t:ty),*) => {
        $(
            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            #[cfg(feature = "serde")]
            impl serde::Serialize for $t {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.serialize_str(self.name())
                }
            }
        )*
    };
}

label_impls!(NatType, MappingBehavior, FilteringBehavior);
