use crate::attr_type::AttrType;
use crate::attrs::address_attr::AddressAttr;
use crate::attrs::errcode_attr::ErrcodeAttr;
use crate::attrs::Attribute;
use crate::constants::*;
use crate::error::{Error, Result};
use crate::header::{Header, TransId};
use crate::packet::{decode_attrs, Packet};
use bytes::Bytes;
use std::collections::HashMap;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct Response {
    pub header: Header,
    pub attrs: HashMap<AttrType, Attribute>,
}

impl Response {
    pub fn unmarshal(buf: &[u8]) -> Result<Self> {
        let header = Header::unpack(buf)?;
        let attrs = decode_attrs(&header, &buf[HEADER_LEN..])?;

        Ok(Self { header, attrs })
    }

    pub fn get(&self, attr_type: AttrType) -> Option<&Attribute> {
        self.attrs.get(&attr_type)
    }

    pub fn address(&self, attr_type: AttrType) -> Option<SocketAddr> {
        self.get(attr_type).and_then(Attribute::address)
    }

    pub fn mapped_address(&self) -> Option<SocketAddr> {
        self.address(AttrType::MAPPED_ADDRESS)
    }

    pub fn xor_mapped_address(&self) -> Option<SocketAddr> {
        self.address(AttrType::XOR_MAPPED_ADDRESS)
    }

    pub fn error_code(&self) -> Option<&ErrcodeAttr> {
        match self.get(AttrType::ERROR_CODE) {
            Some(Attribute::ErrorCode(v)) => Some(v),
            _ => None,
        }
    }
}

pub fn unmarshal_response(buf: &[u8]) -> Result<Response> {
    Response::unmarshal(buf)
}

/// Binding response with a single MAPPED-ADDRESS, ipv4 only.
pub fn build_synthetic_response(trans_id: &TransId, observed: SocketAddr) -> Result<Bytes> {
    if !observed.is_ipv4() {
        return Err(Error::InvalidProtocol);
    }

    let header = Header::new(MESSAGE_TYPE_BIND_RES, 0, *trans_id);
    let attrs = vec![Attribute::MappedAddress(AddressAttr::new(observed))];

    Packet::new(header, attrs).pack()
}
