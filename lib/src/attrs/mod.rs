#![allow(clippy::len_without_is_empty)]

use crate::attr_type::AttrType;
use crate::constants::ATTR_HEADER_LEN;
use crate::error::{Error, Result};
use crate::header::Header;
use crate::util::padding_len;
use bytes::{BufMut, Bytes, BytesMut};
use std::net::SocketAddr;

pub mod address_attr;
pub mod change_request;
pub mod errcode_attr;
pub mod xor_address;

use address_attr::AddressAttr;
use change_request::ChangeRequest;
use errcode_attr::ErrcodeAttr;
use xor_address::XorAddress;

/// Codec for one attribute value. The header is always handed over, only the xor
/// address family actually reads it.
pub trait AttrValue: Sized {
    fn marshal(&self, header: Option<&Header>) -> Result<Bytes>;

    fn unmarshal(header: Option<&Header>, buf: &[u8]) -> Result<Self>;
}

// rfc 5389, 15
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |         Type                  |            Length             |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                         Value (variable)                ....
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttr {
    pub attr_type: AttrType,
    pub value: Bytes,
}

impl RawAttr {
    pub fn new(attr_type: AttrType, value: Bytes) -> Self {
        Self { attr_type, value }
    }

    /// Bytes on the wire, padding included.
    pub fn len(&self) -> usize {
        ATTR_HEADER_LEN + self.value.len() + padding_len(self.value.len())
    }

    pub fn pack_into(&self, buf: &mut BytesMut) {
        buf.put_u16(self.attr_type.0);
        buf.put_u16(self.value.len() as u16);
        buf.put_slice(&self.value);
        buf.put_bytes(0, padding_len(self.value.len()));
    }

    pub fn pack(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.len());
        self.pack_into(&mut buf);
        buf.freeze()
    }
}

/// Attribute values this crate understands, keyed by the type they travel under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    MappedAddress(AddressAttr),
    ResponseAddress(AddressAttr),
    SourceAddress(AddressAttr),
    ChangedAddress(AddressAttr),
    ResponseOrigin(AddressAttr),
    OtherAddress(AddressAttr),
    XorMappedAddress(XorAddress),
    XorPeerAddress(XorAddress),
    XorRelayedAddress(XorAddress),
    ChangeRequest(ChangeRequest),
    ErrorCode(ErrcodeAttr),
}

impl Attribute {
    pub fn attr_type(&self) -> AttrType {
        match self {
            Attribute::MappedAddress(_) => AttrType::MAPPED_ADDRESS,
            Attribute::ResponseAddress(_) => AttrType::RESPONSE_ADDRESS,
            Attribute::SourceAddress(_) => AttrType::SOURCE_ADDRESS,
            Attribute::ChangedAddress(_) => AttrType::CHANGED_ADDRESS,
            Attribute::ResponseOrigin(_) => AttrType::RESPONSE_ORIGIN,
            Attribute::OtherAddress(_) => AttrType::OTHER_ADDRESS,
            Attribute::XorMappedAddress(_) => AttrType::XOR_MAPPED_ADDRESS,
            Attribute::XorPeerAddress(_) => AttrType::XOR_PEER_ADDRESS,
            Attribute::XorRelayedAddress(_) => AttrType::XOR_RELAYED_ADDRESS,
            Attribute::ChangeRequest(_) => AttrType::CHANGE_REQUEST,
            Attribute::ErrorCode(_) => AttrType::ERROR_CODE,
        }
    }

    pub fn decode(attr_type: AttrType, header: Option<&Header>, value: &[u8]) -> Result<Self> {
        let attr = match attr_type {
            AttrType::MAPPED_ADDRESS => {
                Attribute::MappedAddress(AddressAttr::unmarshal(header, value)?)
            }
            AttrType::RESPONSE_ADDRESS => {
                Attribute::ResponseAddress(AddressAttr::unmarshal(header, value)?)
            }
            AttrType::SOURCE_ADDRESS => {
                Attribute::SourceAddress(AddressAttr::unmarshal(header, value)?)
            }
            AttrType::CHANGED_ADDRESS => {
                Attribute::ChangedAddress(AddressAttr::unmarshal(header, value)?)
            }
            AttrType::RESPONSE_ORIGIN => {
                Attribute::ResponseOrigin(AddressAttr::unmarshal(header, value)?)
            }
            AttrType::OTHER_ADDRESS => {
                Attribute::OtherAddress(AddressAttr::unmarshal(header, value)?)
            }
            AttrType::XOR_MAPPED_ADDRESS => {
                Attribute::XorMappedAddress(XorAddress::unmarshal(header, value)?)
            }
            AttrType::XOR_PEER_ADDRESS => {
                Attribute::XorPeerAddress(XorAddress::unmarshal(header, value)?)
            }
            AttrType::XOR_RELAYED_ADDRESS => {
                Attribute::XorRelayedAddress(XorAddress::unmarshal(header, value)?)
            }
            AttrType::CHANGE_REQUEST => {
                Attribute::ChangeRequest(ChangeRequest::unmarshal(header, value)?)
            }
            AttrType::ERROR_CODE => Attribute::ErrorCode(ErrcodeAttr::unmarshal(header, value)?),
            other => return Err(Error::UnknownAttr(other)),
        };

        Ok(attr)
    }

    pub fn encode(&self, header: Option<&Header>) -> Result<RawAttr> {
        let value = match self {
            Attribute::MappedAddress(v)
            | Attribute::ResponseAddress(v)
            | Attribute::SourceAddress(v)
            | Attribute::ChangedAddress(v)
            | Attribute::ResponseOrigin(v)
            | Attribute::OtherAddress(v) => v.marshal(header)?,
            Attribute::XorMappedAddress(v)
            | Attribute::XorPeerAddress(v)
            | Attribute::XorRelayedAddress(v) => v.marshal(header)?,
            Attribute::ChangeRequest(v) => v.marshal(header)?,
            Attribute::ErrorCode(v) => v.marshal(header)?,
        };

        Ok(RawAttr::new(self.attr_type(), value))
    }

    /// Transport address carried by any of the address variants.
    pub fn address(&self) -> Option<SocketAddr> {
        match self {
            Attribute::MappedAddress(v)
            | Attribute::ResponseAddress(v)
            | Attribute::SourceAddress(v)
            | Attribute::ChangedAddress(v)
            | Attribute::ResponseOrigin(v)
            | Attribute::OtherAddress(v) => Some(v.socket_addr()),
            Attribute::XorMappedAddress(v)
            | Attribute::XorPeerAddress(v)
            | Attribute::XorRelayedAddress(v) => Some(v.socket_addr()),
            Attribute::ChangeRequest(_) | Attribute::ErrorCode(_) => None,
        }
    }
}
