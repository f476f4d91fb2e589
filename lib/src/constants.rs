use std::time::Duration;

// 0x2112A442
pub const MAGIC_COOKIE: u32 = 0x2112_A442;

pub const TRANS_ID_LEN: usize = 12;
pub const HEADER_LEN: usize = 20;
pub const ATTR_HEADER_LEN: usize = 4;

// attributes are aligned on 32-bit boundaries
pub const PADDING: usize = 4;

pub const DEFAULT_STUN_PORT: u16 = 3478;

// transport side convention, the codec itself never waits
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);

pub const MESSAGE_TYPE_BIND_REQ: u16 = 0x0001;
pub const MESSAGE_TYPE_BIND_RES: u16 = 0x0101;
pub const MESSAGE_TYPE_BIND_ERR_RES: u16 = 0x0111;

pub const ATTR_FAMILY_IPV4: u8 = 0x01;
pub const ATTR_FAMILY_IPV6: u8 = 0x02;

pub const ERROR_CODE_BAD_REQUEST: u16 = 400;
