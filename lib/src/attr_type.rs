use std::fmt;

// 0x0000-0x7FFF: comprehension-required
// 0x8000-0xFFFF: comprehension-optional

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comprehension {
    Required,
    Optional,
}

/// Numeric attribute type as carried on the wire. Codes outside the registry are
/// still representable, they just have no name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttrType(pub u16);

impl AttrType {
    // rfc 5389 / 8489
    pub const MAPPED_ADDRESS: AttrType = AttrType(0x0001);
    pub const USERNAME: AttrType = AttrType(0x0006);
    pub const MESSAGE_INTEGRITY: AttrType = AttrType(0x0008);
    pub const ERROR_CODE: AttrType = AttrType(0x0009);
    pub const UNKNOWN_ATTRIBUTES: AttrType = AttrType(0x000A);
    pub const REALM: AttrType = AttrType(0x0014);
    pub const NONCE: AttrType = AttrType(0x0015);
    pub const MESSAGE_INTEGRITY_SHA256: AttrType = AttrType(0x001C);
    pub const PASSWORD_ALGORITHM: AttrType = AttrType(0x001D);
    pub const USERHASH: AttrType = AttrType(0x001E);
    pub const XOR_MAPPED_ADDRESS: AttrType = AttrType(0x0020);
    pub const PASSWORD_ALGORITHMS: AttrType = AttrType(0x8002);
    pub const ALTERNATE_DOMAIN: AttrType = AttrType(0x8003);
    pub const SOFTWARE: AttrType = AttrType(0x8022);
    pub const ALTERNATE_SERVER: AttrType = AttrType(0x8023);
    pub const FINGERPRINT: AttrType = AttrType(0x8028);

    // rfc 3489, dropped by 5389 but still sent by older servers
    pub const RESPONSE_ADDRESS: AttrType = AttrType(0x0002);
    pub const SOURCE_ADDRESS: AttrType = AttrType(0x0004);
    pub const CHANGED_ADDRESS: AttrType = AttrType(0x0005);

    // rfc 5780, nat behavior discovery
    pub const CHANGE_REQUEST: AttrType = AttrType(0x0003);
    pub const PADDING: AttrType = AttrType(0x0026);
    pub const RESPONSE_PORT: AttrType = AttrType(0x0027);
    pub const CACHE_TIMEOUT: AttrType = AttrType(0x8027);
    pub const RESPONSE_ORIGIN: AttrType = AttrType(0x802B);
    pub const OTHER_ADDRESS: AttrType = AttrType(0x802C);

    // rfc 5245, ice
    pub const PRIORITY: AttrType = AttrType(0x0024);
    pub const USE_CANDIDATE: AttrType = AttrType(0x0025);
    pub const ICE_CONTROLLED: AttrType = AttrType(0x8029);
    pub const ICE_CONTROLLING: AttrType = AttrType(0x802A);

    // rfc 5766 / 6062 / 6156, turn
    pub const CHANNEL_NUMBER: AttrType = AttrType(0x000C);
    pub const LIFETIME: AttrType = AttrType(0x000D);
    pub const XOR_PEER_ADDRESS: AttrType = AttrType(0x0012);
    pub const DATA: AttrType = AttrType(0x0013);
    pub const XOR_RELAYED_ADDRESS: AttrType = AttrType(0x0016);
    pub const REQUESTED_ADDRESS_FAMILY: AttrType = AttrType(0x0017);
    pub const EVEN_PORT: AttrType = AttrType(0x0018);
    pub const REQUESTED_TRANSPORT: AttrType = AttrType(0x0019);
    pub const DONT_FRAGMENT: AttrType = AttrType(0x001A);
    pub const RESERVATION_TOKEN: AttrType = AttrType(0x0022);
    pub const CONNECTION_ID: AttrType = AttrType(0x002A);

    pub const ORIGIN: AttrType = AttrType(0x802F);

    pub fn is_required(self) -> bool {
        self.0 <= 0x7FFF
    }

    pub fn is_optional(self) -> bool {
        self.0 >= 0x8000
    }

    pub fn comprehension(self) -> Comprehension {
        if self.is_optional() {
            Comprehension::Optional
        } else {
            Comprehension::Required
        }
    }

    /// Canonical attribute name, empty for codes outside the registry.
    pub fn name(self) -> &'static str {
        ATTR_NAMES
            .iter()
            .find(|(t, _)| *t == self)
            .map(|(_, name)| *name)
            .unwrap_or("")
    }
}

static ATTR_NAMES: &[(AttrType, &str)] = &[
    (AttrType::MAPPED_ADDRESS, "MAPPED-ADDRESS"),
    (AttrType::RESPONSE_ADDRESS, "RESPONSE-ADDRESS"),
    (AttrType::CHANGE_REQUEST, "CHANGE-REQUEST"),
    (AttrType::SOURCE_ADDRESS, "SOURCE-ADDRESS"),
    (AttrType::CHANGED_ADDRESS, "CHANGED-ADDRESS"),
    (AttrType::USERNAME, "USERNAME"),
    (AttrType::MESSAGE_INTEGRITY, "MESSAGE-INTEGRITY"),
    (AttrType::ERROR_CODE, "ERROR-CODE"),
    (AttrType::UNKNOWN_ATTRIBUTES, "UNKNOWN-ATTRIBUTES"),
    (AttrType::CHANNEL_NUMBER, "CHANNEL-NUMBER"),
    (AttrType::LIFETIME, "LIFETIME"),
    (AttrType::XOR_PEER_ADDRESS, "XOR-PEER-ADDRESS"),
    (AttrType::DATA, "DATA"),
    (AttrType::REALM, "REALM"),
    (AttrType::NONCE, "NONCE"),
    (AttrType::XOR_RELAYED_ADDRESS, "XOR-RELAYED-ADDRESS"),
    (AttrType::REQUESTED_ADDRESS_FAMILY, "REQUESTED-ADDRESS-FAMILY"),
    (AttrType::EVEN_PORT, "EVEN-PORT"),
    (AttrType::REQUESTED_TRANSPORT, "REQUESTED-TRANSPORT"),
    (AttrType::DONT_FRAGMENT, "DONT-FRAGMENT"),
    (AttrType::MESSAGE_INTEGRITY_SHA256, "MESSAGE-INTEGRITY-SHA256"),
    (AttrType::PASSWORD_ALGORITHM, "PASSWORD-ALGORITHM"),
    (AttrType::USERHASH, "USERHASH"),
    (AttrType::XOR_MAPPED_ADDRESS, "XOR-MAPPED-ADDRESS"),
    (AttrType::RESERVATION_TOKEN, "RESERVATION-TOKEN"),
    (AttrType::PRIORITY, "PRIORITY"),
    (AttrType::USE_CANDIDATE, "USE-CANDIDATE"),
    (AttrType::PADDING, "PADDING"),
    (AttrType::RESPONSE_PORT, "RESPONSE-PORT"),
    (AttrType::CONNECTION_ID, "CONNECTION-ID"),
    (AttrType::PASSWORD_ALGORITHMS, "PASSWORD-ALGORITHMS"),
    (AttrType::ALTERNATE_DOMAIN, "ALTERNATE-DOMAIN"),
    (AttrType::SOFTWARE, "SOFTWARE"),
    (AttrType::ALTERNATE_SERVER, "ALTERNATE-SERVER"),
    (AttrType::CACHE_TIMEOUT, "CACHE-TIMEOUT"),
    (AttrType::FINGERPRINT, "FINGERPRINT"),
    (AttrType::ICE_CONTROLLED, "ICE-CONTROLLED"),
    (AttrType::ICE_CONTROLLING, "ICE-CONTROLLING"),
    (AttrType::RESPONSE_ORIGIN, "RESPONSE-ORIGIN"),
    (AttrType::OTHER_ADDRESS, "OTHER-ADDRESS"),
    (AttrType::ORIGIN, "ORIGIN"),
];

impl From<u16> for AttrType {
    fn from(v: u16) -> Self {
        AttrType(v)
    }
}

impl From<AttrType> for u16 {
    fn from(t: AttrType) -> Self {
        t.0
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            "" => write!(f, "UNKNOWN(0x{:04X})", self.0),
            name => f.write_str(name),
        }
    }
}
