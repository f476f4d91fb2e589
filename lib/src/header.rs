#![allow(clippy::len_without_is_empty)]

use crate::constants::*;
use crate::error::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};

pub type TransId = [u8; TRANS_ID_LEN];

// rfc 5389, 6
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |0 0|     STUN Message Type     |         Message Length        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                         Magic Cookie                          |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                     Transaction ID (96 bits)                  |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub msg_type: u16,

    // attribute section only, not counting the 20 header bytes
    pub msg_len: u16,

    pub magic_cookie: u32,

    pub trans_id: TransId,
}

impl Header {
    pub fn new(msg_type: u16, msg_len: u16, trans_id: TransId) -> Self {
        Self {
            msg_type,
            msg_len,
            magic_cookie: MAGIC_COOKIE,
            trans_id,
        }
    }

    pub fn len(&self) -> usize {
        HEADER_LEN
    }

    pub fn pack(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_LEN);
        self.pack_into(&mut buf);
        buf.freeze()
    }

    pub fn pack_into(&self, buf: &mut BytesMut) {
        buf.put_u16(self.msg_type);
        buf.put_u16(self.msg_len);
        buf.put_u32(self.magic_cookie);
        buf.put_slice(&self.trans_id);
    }

    /// Reads the first 20 bytes. The magic cookie is taken as-is, see
    /// [`Header::has_magic_cookie`] for callers that want to be strict.
    pub fn unpack(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_LEN {
            return Err(Error::InvalidData);
        }

        let msg_type = u16::from_be_bytes([buf[0], buf[1]]);
        let msg_len = u16::from_be_bytes([buf[2], buf[3]]);
        let magic_cookie = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);

        let mut trans_id = [0_u8; TRANS_ID_LEN];
        trans_id.copy_from_slice(&buf[8..HEADER_LEN]);

        Ok(Self {
            msg_type,
            msg_len,
            magic_cookie,
            trans_id,
        })
    }

    // false for rfc 3489 peers
    pub fn has_magic_cookie(&self) -> bool {
        self.magic_cookie == MAGIC_COOKIE
    }
}
