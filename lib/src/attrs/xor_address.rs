use crate::attrs::address_attr::{check_fields, ip_from_slice, octets, put_value, ProtocolFamily};
use crate::attrs::AttrValue;
use crate::constants::*;
use crate::error::{Error, Result};
use crate::header::Header;
use crate::util;
use bytes::Bytes;
use std::net::{IpAddr, SocketAddr};

// xor-mapped-address 端口和ip需要混淆
// port 和 magic cookie 的高16位做 xor
// address(ipv4) 和 magic cookie做xor
// address(ipv6) 和 magic cookie + trans_id 做xor
//
// Same layout as the plain address attributes. The fields hold the real address,
// obfuscation only happens on the wire.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorAddress {
    pub family: ProtocolFamily,
    pub port: u16,
    pub address: IpAddr,
}

impl XorAddress {
    pub fn new(address: SocketAddr) -> Self {
        Self {
            family: ProtocolFamily::of(&address.ip()),
            port: address.port(),
            address: address.ip(),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl From<SocketAddr> for XorAddress {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr)
    }
}

/// Cookie for ipv4, cookie followed by the transaction id for ipv6.
pub fn xor_mask(family: ProtocolFamily, header: &Header) -> Vec<u8> {
    let mut mask = MAGIC_COOKIE.to_be_bytes().to_vec();
    if family == ProtocolFamily::IPV6 {
        mask.extend_from_slice(&header.trans_id);
    }
    mask
}

pub fn xor_port(port: u16) -> u16 {
    port ^ (MAGIC_COOKIE >> 16) as u16
}

impl AttrValue for XorAddress {
    fn marshal(&self, header: Option<&Header>) -> Result<Bytes> {
        let header = header.ok_or(Error::InvalidHeader)?;
        let addr_len = check_fields(self.family, self.port, &self.address)?;

        let addr = util::xor(&octets(&self.address), &xor_mask(self.family, header));
        Ok(put_value(self.family, xor_port(self.port), &addr, addr_len))
    }

    fn unmarshal(header: Option<&Header>, value: &[u8]) -> Result<Self> {
        if value.len() < 8 || value[0] != 0 {
            return Err(Error::InvalidData);
        }
        let header = header.ok_or(Error::InvalidHeader)?;

        let family = ProtocolFamily(value[1]);
        let addr_len = family.addr_len().ok_or(Error::InvalidProtocol)?;
        let port = xor_port(u16::from_be_bytes([value[2], value[3]]));

        if value.len() != 4 + addr_len {
            return Err(Error::InvalidData);
        }
        let addr = util::xor(&value[4..], &xor_mask(family, header));
        let address = ip_from_slice(&addr, addr_len)?;

        Ok(Self {
            family,
            port,
            address,
        })
    }
}
