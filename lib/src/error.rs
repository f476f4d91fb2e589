use crate::attr_type::AttrType;

/// Failures reported by the codec. Every decode stops at the first one, there is no
/// partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Buffer too short, or malformed for the lengths it declares.
    #[error("invalid data")]
    InvalidData,

    /// Address family code is neither IPv4 nor IPv6.
    #[error("invalid protocol")]
    InvalidProtocol,

    #[error("invalid port")]
    InvalidPort,

    /// Address does not belong to the declared family.
    #[error("invalid addr")]
    InvalidAddr,

    /// A xor address codec was used without the message header.
    #[error("header can't be none")]
    InvalidHeader,

    #[error("unknown comprehension-required attribute: {0}")]
    UnknownAttr(AttrType),
}

pub type Result<T> = std::result::Result<T, Error>;
