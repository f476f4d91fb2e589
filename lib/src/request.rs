use crate::attr_type::AttrType;
use crate::attrs::change_request::{ChangeRequest, ChangeRequestAction};
use crate::attrs::Attribute;
use crate::constants::*;
use crate::error::Result;
use crate::header::Header;
use crate::packet::decode_attrs;
use crate::util::{RandomTransId, TransIdSource};
use bytes::{BufMut, Bytes, BytesMut};

/// Binding request, optionally carrying a CHANGE-REQUEST for nat behavior probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub header: Header,
    pub change_request: Option<ChangeRequest>,
}

impl Request {
    pub fn binding(action: ChangeRequestAction) -> Self {
        Self::binding_with(action, &RandomTransId)
    }

    pub fn binding_with<S>(action: ChangeRequestAction, source: &S) -> Self
    where
        S: TransIdSource + ?Sized,
    {
        let change_request = match action {
            ChangeRequestAction::NoAction => None,
            v => Some(ChangeRequest::new(v)),
        };

        let msg_len = match change_request {
            Some(_) => ATTR_HEADER_LEN as u16 + ChangeRequest::VALUE_LEN,
            None => 0,
        };

        Self {
            header: Header::new(MESSAGE_TYPE_BIND_REQ, msg_len, source.trans_id()),
            change_request,
        }
    }

    pub fn action(&self) -> ChangeRequestAction {
        self.change_request
            .map(|v| v.action)
            .unwrap_or(ChangeRequestAction::NoAction)
    }

    pub fn marshal(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_LEN + self.header.msg_len as usize);
        self.header.pack_into(&mut buf);

        if let Some(attr) = &self.change_request {
            buf.put_u16(AttrType::CHANGE_REQUEST.0);
            buf.put_u16(ChangeRequest::VALUE_LEN);
            buf.put_u32(attr.action.code());
        }

        buf.freeze()
    }

    pub fn unmarshal(buf: &[u8]) -> Result<Self> {
        let header = Header::unpack(buf)?;
        let attrs = decode_attrs(&header, &buf[HEADER_LEN..])?;

        let change_request = match attrs.get(&AttrType::CHANGE_REQUEST) {
            Some(Attribute::ChangeRequest(v)) => Some(*v),
            _ => None,
        };

        Ok(Self {
            header,
            change_request,
        })
    }
}

pub fn marshal_request(req: &Request) -> Bytes {
    req.marshal()
}

pub fn unmarshal_request(buf: &[u8]) -> Result<Request> {
    Request::unmarshal(buf)
}
