use crate::attrs::AttrValue;
use crate::error::{Error, Result};
use crate::header::Header;
use crate::util;
use bytes::{BufMut, Bytes, BytesMut};

// rfc 5389, 15.6
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |           Reserved, should be 0         |Class|     Number    |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |      Reason Phrase (variable)                                ..
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrcodeAttr {
    pub code: u16,
    pub reason: String,
}

impl ErrcodeAttr {
    pub fn new(code: u16, reason: &str) -> Self {
        Self {
            code,
            reason: reason.to_string(),
        }
    }

    fn is_valid_code(code: u16) -> bool {
        (300..700).contains(&code)
    }
}

impl AttrValue for ErrcodeAttr {
    fn marshal(&self, _header: Option<&Header>) -> Result<Bytes> {
        if !Self::is_valid_code(self.code) {
            return Err(Error::InvalidData);
        }

        let mut buf = BytesMut::with_capacity(4 + self.reason.len());
        buf.put_u16(0);
        buf.put_u16(util::pack_error_code(self.code));
        buf.put_slice(self.reason.as_bytes());

        Ok(buf.freeze())
    }

    fn unmarshal(_header: Option<&Header>, value: &[u8]) -> Result<Self> {
        if value.len() < 4 {
            return Err(Error::InvalidData);
        }

        // number is a two digit decimal
        if value[3] > 99 {
            return Err(Error::InvalidData);
        }

        let code = util::unpack_error_code(u16::from_be_bytes([value[2], value[3]]));
        if !Self::is_valid_code(code) {
            return Err(Error::InvalidData);
        }

        let reason = std::str::from_utf8(&value[4..])
            .map_err(|_| Error::InvalidData)?
            .trim_end()
            .to_string();

        Ok(Self { code, reason })
    }
}
