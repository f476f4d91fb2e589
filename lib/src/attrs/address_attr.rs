use crate::attrs::AttrValue;
use crate::constants::*;
use crate::error::{Error, Result};
use crate::header::Header;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

// 地址类的attribute
//
// mapped-address  response-address  source-address  changed-address
// response-origin  other-address
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |0 0 0 0 0 0 0 0|    Family     |           Port                |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                 Address (32 bits or 128 bits)                 |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// ipv4: family: 0x01, 4 bytes
// ipv6: family: 0x02, 16 bytes

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolFamily(pub u8);

impl ProtocolFamily {
    pub const IPV4: ProtocolFamily = ProtocolFamily(ATTR_FAMILY_IPV4);
    pub const IPV6: ProtocolFamily = ProtocolFamily(ATTR_FAMILY_IPV6);

    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::IPV4,
            IpAddr::V6(_) => Self::IPV6,
        }
    }

    /// Address width in bytes, `None` for unknown families.
    pub fn addr_len(self) -> Option<usize> {
        match self {
            Self::IPV4 => Some(4),
            Self::IPV6 => Some(16),
            _ => None,
        }
    }
}

impl fmt::Display for ProtocolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IPV4 => f.write_str("IPv4"),
            Self::IPV6 => f.write_str("IPv6"),
            _ => f.write_str(""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressAttr {
    pub family: ProtocolFamily,
    pub port: u16,
    pub address: IpAddr,
}

impl AddressAttr {
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

impl From<SocketAddr> for AddressAttr {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr)
    }
}

impl AttrValue for AddressAttr {
    fn marshal(&self, _header: Option<&Header>) -> Result<Bytes> {
        let addr_len = check_fields(self.family, self.port, &self.address)?;
        Ok(put_value(self.family, self.port, &octets(&self.address), addr_len))
    }

    fn unmarshal(_header: Option<&Header>, value: &[u8]) -> Result<Self> {
        if value.len() < 8 {
            return Err(Error::InvalidData);
        }
        // first byte is reserved and must be zero
        if value[0] != 0 {
            return Err(Error::InvalidData);
        }

        let family = ProtocolFamily(value[1]);
        let addr_len = family.addr_len().ok_or(Error::InvalidData)?;
        let port = u16::from_be_bytes([value[2], value[3]]);
        let address = ip_from_slice(&value[4..], addr_len)?;

        Ok(Self {
            family,
            port,
            address,
        })
    }
}

// family, port and address must agree before anything goes on the wire
pub(crate) fn check_fields(family: ProtocolFamily, port: u16, address: &IpAddr) -> Result<usize> {
    let addr_len = family.addr_len().ok_or(Error::InvalidProtocol)?;

    if port == 0 {
        return Err(Error::InvalidPort);
    }

    if ProtocolFamily::of(address) != family {
        return Err(Error::InvalidAddr);
    }

    Ok(addr_len)
}

pub(crate) fn octets(ip: &IpAddr) -> Vec<u8> {
    match ip {
        IpAddr::V4(v) => v.octets().to_vec(),
        IpAddr::V6(v) => v.octets().to_vec(),
    }
}

pub(crate) fn put_value(family: ProtocolFamily, port: u16, addr: &[u8], addr_len: usize) -> Bytes {
    let mut buf = BytesMut::with_capacity(4 + addr_len);

    buf.put_u8(0);
    buf.put_u8(family.0);
    buf.put_u16(port);
    buf.put_slice(addr);

    buf.freeze()
}

// the address must fill the rest of the value exactly
pub(crate) fn ip_from_slice(buf: &[u8], addr_len: usize) -> Result<IpAddr> {
    if buf.len() != addr_len {
        return Err(Error::InvalidData);
    }

    let ip = match addr_len {
        4 => {
            let mut addr = [0_u8; 4];
            addr.copy_from_slice(buf);
            IpAddr::V4(Ipv4Addr::from(addr))
        }
        _ => {
            let mut addr = [0_u8; 16];
            addr.copy_from_slice(buf);
            IpAddr::V6(Ipv6Addr::from(addr))
        }
    };

    Ok(ip)
}
