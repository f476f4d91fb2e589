use crate::attr_type::AttrType;
use crate::attrs::{Attribute, RawAttr};
use crate::constants::*;
use crate::error::{Error, Result};
use crate::header::Header;
use crate::util::padding_len;
use bytes::{Bytes, BytesMut};
use log::trace;
use std::collections::HashMap;

/// Outbound message. `msg_len` is recomputed from the attributes on every pack.
#[derive(Debug, Clone)]
pub struct Packet {
    pub header: Header,
    pub attrs: Vec<Attribute>,
}

impl Packet {
    pub fn new(header: Header, attrs: Vec<Attribute>) -> Self {
        Self { header, attrs }
    }

    pub fn add_attr(&mut self, attr: Attribute) {
        self.attrs.push(attr);
    }

    pub fn pack(&self) -> Result<Bytes> {
        let raw_attrs = self
            .attrs
            .iter()
            .map(|v| v.encode(Some(&self.header)))
            .collect::<Result<Vec<RawAttr>>>()?;

        let body_len = raw_attrs.iter().fold(0_usize, |acc, x| acc + x.len());
        let msg_len = u16::try_from(body_len).map_err(|_| Error::InvalidData)?;

        let mut header = self.header.clone();
        header.msg_len = msg_len;

        let mut buf = BytesMut::with_capacity(HEADER_LEN + body_len);
        header.pack_into(&mut buf);
        for v in raw_attrs.iter() {
            v.pack_into(&mut buf);
        }

        Ok(buf.freeze())
    }
}

/// Walks the attribute section that follows `header`.
///
/// `header.msg_len` decides where the message ends: bytes past it are ignored, a body
/// shorter than it is an error. Comprehension-optional records are skipped without
/// looking at their value. Any other record must decode, an unknown required type
/// fails the whole message. On duplicate types the last one wins.
pub fn decode_attrs(header: &Header, body: &[u8]) -> Result<HashMap<AttrType, Attribute>> {
    let msg_len = header.msg_len as usize;
    if msg_len % PADDING != 0 || body.len() < msg_len {
        return Err(Error::InvalidData);
    }

    let body = &body[..msg_len];
    let mut attrs = HashMap::new();
    let mut offset = 0_usize;

    while offset < msg_len {
        if msg_len - offset < ATTR_HEADER_LEN {
            return Err(Error::InvalidData);
        }

        let attr_type = AttrType(u16::from_be_bytes([body[offset], body[offset + 1]]));
        let attr_len = u16::from_be_bytes([body[offset + 2], body[offset + 3]]) as usize;
        offset += ATTR_HEADER_LEN;

        let padded_len = attr_len + padding_len(attr_len);
        if padded_len > msg_len - offset {
            return Err(Error::InvalidData);
        }

        let value = &body[offset..offset + attr_len];
        offset += padded_len;

        if attr_type.is_optional() {
            trace!("skip optional attr: {}, len: {}", attr_type, attr_len);
            continue;
        }

        let attr = Attribute::decode(attr_type, Some(header), value)?;
        attrs.insert(attr_type, attr);
    }

    Ok(attrs)
}
