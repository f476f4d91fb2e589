use stun_wire::attr_type::{AttrType, Comprehension};

#[test]
pub fn test_comprehension_partition() {
    for v in 0..=u16::MAX {
        let t = AttrType(v);
        assert_ne!(t.is_required(), t.is_optional());

        let expected = if v < 0x8000 {
            Comprehension::Required
        } else {
            Comprehension::Optional
        };
        assert_eq!(t.comprehension(), expected);
    }

    assert!(AttrType(0x7FFF).is_required());
    assert!(AttrType(0x8000).is_optional());
}

#[test]
pub fn test_known_names() {
    assert_eq!(AttrType::MAPPED_ADDRESS.name(), "MAPPED-ADDRESS");
    assert_eq!(AttrType::CHANGE_REQUEST.name(), "CHANGE-REQUEST");
    assert_eq!(AttrType::XOR_MAPPED_ADDRESS.name(), "XOR-MAPPED-ADDRESS");
    assert_eq!(AttrType::SOFTWARE.name(), "SOFTWARE");
    assert_eq!(AttrType::FINGERPRINT.name(), "FINGERPRINT");
    assert_eq!(AttrType::OTHER_ADDRESS.name(), "OTHER-ADDRESS");
    assert_eq!(AttrType(0x0020), AttrType::XOR_MAPPED_ADDRESS);
}

#[test]
pub fn test_unknown_name() {
    let t = AttrType(0x7F01);
    assert_eq!(t.name(), "");
    assert_eq!(t.to_string(), "UNKNOWN(0x7F01)");
    assert_eq!(AttrType::ERROR_CODE.to_string(), "ERROR-CODE");
}
