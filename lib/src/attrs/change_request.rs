use crate::attrs::AttrValue;
use crate::error::{Error, Result};
use crate::header::Header;
use bytes::{BufMut, Bytes, BytesMut};

// rfc 5780, 7.2
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 A B 0|
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// A: change ip, B: change port

const FLAG_CHANGE_IP: u32 = 0x04;
const FLAG_CHANGE_PORT: u32 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeRequestAction {
    NoAction,
    ChangePort,
    ChangeIpAndPort,
}

impl ChangeRequestAction {
    pub fn code(self) -> u32 {
        match self {
            ChangeRequestAction::NoAction => 0,
            ChangeRequestAction::ChangePort => FLAG_CHANGE_PORT,
            ChangeRequestAction::ChangeIpAndPort => FLAG_CHANGE_IP | FLAG_CHANGE_PORT,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ChangeRequestAction::NoAction),
            FLAG_CHANGE_PORT => Some(ChangeRequestAction::ChangePort),
            0x06 => Some(ChangeRequestAction::ChangeIpAndPort),
            _ => None,
        }
    }

    pub fn change_ip(self) -> bool {
        self.code() & FLAG_CHANGE_IP == FLAG_CHANGE_IP
    }

    pub fn change_port(self) -> bool {
        self.code() & FLAG_CHANGE_PORT == FLAG_CHANGE_PORT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRequest {
    pub action: ChangeRequestAction,
}

impl ChangeRequest {
    pub const VALUE_LEN: u16 = 4;

    pub fn new(action: ChangeRequestAction) -> Self {
        Self { action }
    }
}

impl AttrValue for ChangeRequest {
    fn marshal(&self, _header: Option<&Header>) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(Self::VALUE_LEN as usize);
        buf.put_u32(self.action.code());
        Ok(buf.freeze())
    }

    fn unmarshal(_header: Option<&Header>, value: &[u8]) -> Result<Self> {
        if value.len() != Self::VALUE_LEN as usize {
            return Err(Error::InvalidData);
        }

        let code = u32::from_be_bytes([value[0], value[1], value[2], value[3]]);
        let action = ChangeRequestAction::from_code(code).ok_or(Error::InvalidData)?;

        Ok(Self { action })
    }
}
