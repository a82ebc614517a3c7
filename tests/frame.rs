use tstp::frame::{decode_coordinates_i32, encode_coordinates_i32, Config, Header, MessageType, Microframe, Scale};

#[test]
fn microframe_packing_round_trips_every_field() {
    let mf = Microframe::new()
        .with_all_listen(true)
        .with_count(1234)
        .with_id(0xabc)
        .with_hint(0xdead_beef);

    let bytes = mf.to_bytes();
    assert_eq!(bytes.len(), Microframe::WIRE_SIZE);

    let back = Microframe::from_bytes_exact(bytes);
    assert!(back.all_listen());
    assert_eq!(back.count(), 1234);
    assert_eq!(back.id(), 0xabc);
    assert_eq!(back.hint(), 0xdead_beef);
}

#[test]
fn microframe_all_listen_false_and_zero_fields() {
    let mf = Microframe::new()
        .with_all_listen(false)
        .with_count(0)
        .with_id(0)
        .with_hint(0);
    let back = Microframe::from_bytes_exact(mf.to_bytes());
    assert!(!back.all_listen());
    assert_eq!(back.count(), 0);
    assert_eq!(back.id(), 0);
    assert_eq!(back.hint(), 0);
}

#[test]
fn header_encodes_fixed_fields_little_endian() {
    let config = Config::new()
        .with_scale(Scale::Single)
        .with_time_request(true)
        .with_msg_type(MessageType::Interest)
        .with_version(4);
    let header = Header {
        config,
        confidence: 0xaa,
        origin_time: 0x0102_0304_0506_0708,
        last_hop_time: 0x1112_1314_1516_1718,
    };
    let mut out = [0u8; 18];
    let n = header.encode(&mut out).unwrap();
    assert_eq!(n, Header::wire_size(Scale::Single));

    assert_eq!(out[1], 0xaa);
    assert_eq!(&out[2..10], &header.origin_time.to_le_bytes());
    assert_eq!(&out[10..18], &header.last_hop_time.to_le_bytes());

    let (decoded, size) = Header::decode(&out).unwrap();
    assert_eq!(size, n);
    assert_eq!(decoded.confidence, header.confidence);
    assert_eq!(decoded.origin_time, header.origin_time);
    assert_eq!(decoded.last_hop_time, header.last_hop_time);
    assert_eq!(decoded.config.msg_type(), MessageType::Interest);
    assert_eq!(decoded.config.scale(), Scale::Single);
    assert!(decoded.config.time_request());
}

#[test]
fn header_decode_rejects_truncated_input() {
    let short = [0u8; 4];
    assert!(Header::decode(&short).is_err());
}

#[test]
fn coordinates_round_trip_at_each_scale_with_sign_extension() {
    for scale in [Scale::Single, Scale::Double, Scale::Quadruple, Scale::Octuple] {
        let n = scale.coordinate_bytes();
        let xyz = [-1i32, 1, 0];
        let mut buf = [0u8; 12];
        encode_coordinates_i32(scale, xyz, &mut buf[..n * 3]).unwrap();
        let decoded = decode_coordinates_i32(scale, &buf[..n * 3]).unwrap();
        assert_eq!(decoded, xyz);
    }
}

#[test]
fn message_type_rejects_unknown_discriminant() {
    assert_eq!(MessageType::try_from(3).unwrap(), MessageType::Control);
    assert!(MessageType::try_from(4).is_err());
}
