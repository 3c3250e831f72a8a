use super::*;

#[test]
fn kind_numeric_mapping_matches_wire_tags() {
    assert_eq!(Kind::Disconnect.as_u8(), 0);
    assert_eq!(Kind::Connect.as_u8(), 1);
    assert_eq!(Kind::Heartbeat.as_u8(), 2);
    assert_eq!(Kind::Message.as_u8(), 3);
    assert_eq!(Kind::Json.as_u8(), 4);
    assert_eq!(Kind::Event.as_u8(), 5);
    assert_eq!(Kind::Ack.as_u8(), 6);
    assert_eq!(Kind::Error.as_u8(), 7);
    assert_eq!(Kind::Noop.as_u8(), 8);
}

#[test]
fn kind_round_trips_from_wire_tags() {
    for tag in 0..=8 {
        let kind = Kind::from_u8(tag).expect("tag should be valid");
        assert_eq!(kind.as_u8(), tag);
    }
}

#[test]
fn kind_rejects_out_of_range_tag() {
    assert_eq!(Kind::from_u8(9), None);
    assert_eq!(Kind::from_u8(255), None);
}

#[test]
fn disconnect_encodes_bare_frame() {
    assert_eq!(IoMessage::disconnect().encode(), "0::");
}

#[test]
fn heartbeat_encodes_bare_frame() {
    assert_eq!(IoMessage::heartbeat().encode(), "2::");
}

#[test]
fn connect_encodes_endpoint_with_query() {
    let m = IoMessage::connect("/mtgox", "Currency=USD");
    assert_eq!(m.encode(), "1::/mtgox?Currency=USD");
}

#[test]
fn connect_encodes_endpoint_without_query() {
    let m = IoMessage::connect("/chat", "");
    assert_eq!(m.encode(), "1::/chat");
}

#[test]
fn message_encodes_endpoint_and_data() {
    let m = IoMessage::message("/mtgox", "Currency=USD", "This is a test message");
    assert_eq!(m.encode(), "3::/mtgox?Currency=USD:This is a test message");
}

#[test]
fn nonzero_id_renders_in_decimal() {
    let m = IoMessage { kind: Kind::Ack, id: 17, endpoint: None, data: String::new() };
    assert_eq!(m.encode(), "6:17:");
}

#[test]
fn decode_round_trips_encoded_frames() {
    let frames = [
        IoMessage::disconnect(),
        IoMessage::heartbeat(),
        IoMessage::connect("/mtgox", "Currency=USD"),
        IoMessage::connect("/chat", ""),
        IoMessage::message("/mtgox", "Currency=USD", "This is a test message"),
        IoMessage { kind: Kind::Event, id: 42, endpoint: None, data: "{\"name\":\"tick\"}".to_owned() },
    ];

    for frame in frames {
        let decoded = IoMessage::decode(&frame.encode()).expect("decode should succeed");
        assert_eq!(decoded, frame);
    }
}

#[test]
fn decode_keeps_colons_inside_data() {
    let m = IoMessage::decode("3::/mtgox:{\"now\":\"12:30\"}").expect("decode");
    assert_eq!(m.kind, Kind::Message);
    assert_eq!(m.data, "{\"now\":\"12:30\"}");
}

#[test]
fn decode_strips_transport_lead_in() {
    let m = IoMessage::decode("\u{0}\u{ffff}3::/mtgox:payload").expect("decode");
    assert_eq!(m.kind, Kind::Message);
    assert_eq!(m.endpoint, Some(Endpoint::new("/mtgox", "")));
    assert_eq!(m.data, "payload");
}

#[test]
fn decode_splits_endpoint_query() {
    let m = IoMessage::decode("1::/mtgox?Currency=USD").expect("decode");
    assert_eq!(m.endpoint, Some(Endpoint::new("/mtgox", "Currency=USD")));
}

#[test]
fn decode_rejects_missing_fields() {
    let err = IoMessage::decode("2:").expect_err("one separator should fail");
    assert!(matches!(err, ClientError::MalformedFrame(_)));

    let err = IoMessage::decode("2").expect_err("bare type should fail");
    assert!(matches!(err, ClientError::MalformedFrame(_)));
}

#[test]
fn decode_rejects_non_numeric_type() {
    let err = IoMessage::decode("x::").expect_err("non-numeric type should fail");
    assert!(matches!(err, ClientError::MalformedFrame(_)));
}

#[test]
fn decode_rejects_out_of_range_type() {
    let err = IoMessage::decode("9::").expect_err("unknown tag should fail");
    assert!(matches!(err, ClientError::MalformedFrame(_)));
}

#[test]
fn decode_rejects_non_numeric_id() {
    let err = IoMessage::decode("3:abc:/chat").expect_err("bad id should fail");
    assert!(matches!(err, ClientError::MalformedFrame(_)));
}

#[test]
fn decode_rejects_empty_input() {
    let err = IoMessage::decode("").expect_err("empty frame should fail");
    assert!(matches!(err, ClientError::MalformedFrame(_)));
}

#[test]
fn endpoint_display_omits_empty_query() {
    assert_eq!(Endpoint::new("/chat", "").to_string(), "/chat");
    assert_eq!(Endpoint::new("/chat", "k=v").to_string(), "/chat?k=v");
}
