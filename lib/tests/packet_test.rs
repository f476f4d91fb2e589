use std::net::SocketAddr;
use stun_wire::attrs::address_attr::AddressAttr;
use stun_wire::attrs::change_request::ChangeRequestAction;
use stun_wire::attrs::errcode_attr::ErrcodeAttr;
use stun_wire::attrs::xor_address::XorAddress;
use stun_wire::attrs::Attribute;
use stun_wire::constants::*;
use stun_wire::header::{Header, TransId};
use stun_wire::packet::{decode_attrs, Packet};
use stun_wire::util::{self, TransIdSource};
use stun_wire::{
    build_synthetic_response, marshal_request, unmarshal_request, unmarshal_response, AttrType,
    Error, Request,
};

const TRANS_ID: TransId = [0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xAB, 0xAC];

struct FixedTransId;

impl TransIdSource for FixedTransId {
    fn trans_id(&self) -> TransId {
        TRANS_ID
    }
}

fn header_bytes(msg_type: u16, msg_len: u16) -> Vec<u8> {
    Header::new(msg_type, msg_len, TRANS_ID).pack().to_vec()
}

// MAPPED-ADDRESS 203.0.113.1:12345
const MAPPED_ATTR: [u8; 12] = [
    0x00, 0x01, 0x00, 0x08, 0x00, 0x01, 0x30, 0x39, 0xCB, 0x00, 0x71, 0x01,
];

fn doc_addr() -> SocketAddr {
    "203.0.113.1:12345".parse().unwrap()
}

#[test]
pub fn test_new_trans_id() {
    let a = util::new_trans_id();
    let b = util::new_trans_id();

    assert_eq!(a.len(), TRANS_ID_LEN);
    assert_ne!(a, b);
}

fn assert_send_sync<T: Send + Sync + ?Sized>() {}

#[test]
pub fn test_trans_id_source_shared_across_threads() {
    assert_send_sync::<dyn TransIdSource>();

    let source: &dyn TransIdSource = &util::RandomTransId;
    let ids: Vec<TransId> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| source.trans_id())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
pub fn test_binding_request_change_port() {
    let req = Request::binding_with(ChangeRequestAction::ChangePort, &FixedTransId);
    assert_eq!(req.header.msg_type, MESSAGE_TYPE_BIND_REQ);
    assert_eq!(req.header.msg_len, 8);
    assert_eq!(req.header.magic_cookie, MAGIC_COOKIE);

    let buf = marshal_request(&req);
    assert_eq!(buf.len(), HEADER_LEN + 8);
    assert_eq!(&buf[..HEADER_LEN], &header_bytes(MESSAGE_TYPE_BIND_REQ, 8)[..]);
    assert_eq!(
        &buf[HEADER_LEN..],
        &[0x00, 0x03, 0x00, 0x04, 0x00, 0x00, 0x00, 0x02]
    );
}

#[test]
pub fn test_binding_request_no_action() {
    let req = Request::binding(ChangeRequestAction::NoAction);
    assert_eq!(req.header.msg_len, 0);
    assert!(req.change_request.is_none());

    let buf = req.marshal();
    assert_eq!(buf.len(), HEADER_LEN);
}

#[test]
pub fn test_unmarshal_request() {
    let req = Request::binding_with(ChangeRequestAction::ChangeIpAndPort, &FixedTransId);
    let buf = req.marshal();

    let parsed = unmarshal_request(&buf).unwrap();
    assert_eq!(parsed, req);
    assert_eq!(parsed.action(), ChangeRequestAction::ChangeIpAndPort);

    assert_eq!(unmarshal_request(&buf[..19]), Err(Error::InvalidData));
}

#[test]
pub fn test_unmarshal_response() {
    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 12);
    buf.extend_from_slice(&MAPPED_ATTR);

    let res = unmarshal_response(&buf).unwrap();
    assert_eq!(res.header.msg_type, MESSAGE_TYPE_BIND_RES);
    assert_eq!(res.header.trans_id, TRANS_ID);
    assert_eq!(res.attrs.len(), 1);
    assert_eq!(
        res.get(AttrType::MAPPED_ADDRESS),
        Some(&Attribute::MappedAddress(AddressAttr::new(doc_addr())))
    );
    assert_eq!(res.mapped_address(), Some(doc_addr()));
    assert_eq!(res.xor_mapped_address(), None);
}

#[test]
pub fn test_unmarshal_response_short() {
    for len in 0..HEADER_LEN {
        assert_eq!(
            unmarshal_response(&vec![0_u8; len]).map(|_| ()),
            Err(Error::InvalidData)
        );
    }
}

#[test]
pub fn test_skip_optional_attr() {
    // SOFTWARE "abcde" + 3 bytes padding, then MAPPED-ADDRESS
    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 24);
    buf.extend_from_slice(&[0x80, 0x22, 0x00, 0x05]);
    buf.extend_from_slice(b"abcde");
    buf.extend_from_slice(&[0, 0, 0]);
    buf.extend_from_slice(&MAPPED_ATTR);

    let res = unmarshal_response(&buf).unwrap();
    assert_eq!(res.attrs.len(), 1);
    assert!(res.get(AttrType::SOFTWARE).is_none());
    assert_eq!(res.mapped_address(), Some(doc_addr()));
}

#[test]
pub fn test_skip_optional_address_attr() {
    // optional types are never decoded, even when the value is garbage
    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 20);
    buf.extend_from_slice(&[0x80, 0x2C, 0x00, 0x04, 0xff, 0xff, 0xff, 0xff]);
    buf.extend_from_slice(&MAPPED_ATTR);

    let res = unmarshal_response(&buf).unwrap();
    assert_eq!(res.attrs.len(), 1);
    assert!(res.get(AttrType::OTHER_ADDRESS).is_none());
}

#[test]
pub fn test_unknown_required_attr() {
    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 20);
    buf.extend_from_slice(&MAPPED_ATTR);
    buf.extend_from_slice(&[0x00, 0x06, 0x00, 0x04]);
    buf.extend_from_slice(b"user");

    let err = unmarshal_response(&buf).unwrap_err();
    assert_eq!(err, Error::UnknownAttr(AttrType::USERNAME));
}

#[test]
pub fn test_bad_required_attr() {
    // mapped-address with a bad family stops the whole message
    let mut attr = MAPPED_ATTR;
    attr[5] = 0x07;

    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 12);
    buf.extend_from_slice(&attr);

    assert_eq!(unmarshal_response(&buf).map(|_| ()), Err(Error::InvalidData));
}

#[test]
pub fn test_body_shorter_than_msg_len() {
    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 12);
    buf.extend_from_slice(&MAPPED_ATTR[..8]);

    assert_eq!(unmarshal_response(&buf).map(|_| ()), Err(Error::InvalidData));
}

#[test]
pub fn test_attr_overruns_msg_len() {
    let mut attr = MAPPED_ATTR;
    attr[3] = 0x10;

    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 12);
    buf.extend_from_slice(&attr);
    buf.extend_from_slice(&[0_u8; 16]);

    assert_eq!(unmarshal_response(&buf).map(|_| ()), Err(Error::InvalidData));
}

#[test]
pub fn test_unaligned_msg_len() {
    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 10);
    buf.extend_from_slice(&MAPPED_ATTR);

    assert_eq!(unmarshal_response(&buf).map(|_| ()), Err(Error::InvalidData));
}

#[test]
pub fn test_msg_len_is_authoritative() {
    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 12);
    buf.extend_from_slice(&MAPPED_ATTR);
    buf.extend_from_slice(&[0x00, 0x06, 0x00, 0x04, 0xde, 0xad, 0xbe, 0xef]);

    let res = unmarshal_response(&buf).unwrap();
    assert_eq!(res.attrs.len(), 1);
}

#[test]
pub fn test_duplicate_attr_last_wins() {
    let mut second = MAPPED_ATTR;
    second[11] = 0x02;

    let mut buf = header_bytes(MESSAGE_TYPE_BIND_RES, 24);
    buf.extend_from_slice(&MAPPED_ATTR);
    buf.extend_from_slice(&second);

    let res = unmarshal_response(&buf).unwrap();
    assert_eq!(res.attrs.len(), 1);
    assert_eq!(res.mapped_address(), Some("203.0.113.2:12345".parse().unwrap()));
}

#[test]
pub fn test_synthetic_response() {
    let buf = build_synthetic_response(&TRANS_ID, doc_addr()).unwrap();

    let mut expected = header_bytes(MESSAGE_TYPE_BIND_RES, 12);
    expected.extend_from_slice(&MAPPED_ATTR);
    assert_eq!(&buf[..], &expected[..]);

    let res = unmarshal_response(&buf).unwrap();
    assert_eq!(res.header.trans_id, TRANS_ID);
    assert_eq!(res.mapped_address(), Some(doc_addr()));
}

#[test]
pub fn test_synthetic_response_ipv6() {
    let addr: SocketAddr = "[2001:db8::1]:3478".parse().unwrap();
    assert_eq!(
        build_synthetic_response(&TRANS_ID, addr),
        Err(Error::InvalidProtocol)
    );
}

#[test]
pub fn test_pack_full_response() {
    let mapped: SocketAddr = "[2001:db8::7]:40000".parse().unwrap();
    let origin: SocketAddr = "10.20.30.40:3478".parse().unwrap();
    let other: SocketAddr = "10.20.30.41:3479".parse().unwrap();

    let header = Header::new(MESSAGE_TYPE_BIND_RES, 0, TRANS_ID);
    let mut packet = Packet::new(header, vec![]);
    packet.add_attr(Attribute::MappedAddress(mapped.into()));
    packet.add_attr(Attribute::XorMappedAddress(XorAddress::new(mapped)));
    packet.add_attr(Attribute::ResponseOrigin(origin.into()));
    packet.add_attr(Attribute::OtherAddress(other.into()));
    packet.add_attr(Attribute::SourceAddress(origin.into()));

    let buf = packet.pack().unwrap();
    let header = Header::unpack(&buf).unwrap();
    assert_eq!(header.msg_len as usize, buf.len() - HEADER_LEN);
    assert_eq!(header.msg_len, 24 + 24 + 12 + 12 + 12);

    let attrs = decode_attrs(&header, &buf[HEADER_LEN..]).unwrap();
    assert_eq!(attrs.len(), 3);
    assert_eq!(attrs[&AttrType::MAPPED_ADDRESS].address(), Some(mapped));
    assert_eq!(attrs[&AttrType::XOR_MAPPED_ADDRESS].address(), Some(mapped));
    assert_eq!(attrs[&AttrType::SOURCE_ADDRESS].address(), Some(origin));
}

#[test]
pub fn test_error_response() {
    let header = Header::new(MESSAGE_TYPE_BIND_ERR_RES, 0, TRANS_ID);
    let packet = Packet::new(
        header,
        vec![Attribute::ErrorCode(ErrcodeAttr::new(
            ERROR_CODE_BAD_REQUEST,
            "bad request",
        ))],
    );

    let buf = packet.pack().unwrap();
    // 4 + 4 + 11, padded to 20
    assert_eq!(buf.len(), HEADER_LEN + 20);

    let res = unmarshal_response(&buf).unwrap();
    let err = res.error_code().unwrap();
    assert_eq!(err.code, 400);
    assert_eq!(err.reason, "bad request");
}
