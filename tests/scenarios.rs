#![allow(clippy::approx_constant)]

use fixmsg::{
    CODE_WIDTH, Error, Field, Message, MessageCode, Msg, check_unique_codes, message, message_set,
    payload, peek_code,
};
use proptest::prelude::*;

message! {
    /// Carries nothing but its code
    pub struct Hello = 0x01 {}

    /// One four-byte integer
    pub struct Reading = 0x02 {
        pub value: i32 = 0,
    }

    /// A float and a one-byte character
    pub struct Sample = 0x03 {
        pub float_value: f32 = 0.0,
        pub char_value: u8 = b'A',
    }

    /// Wider mix of field types
    pub struct Status = 0x20 {
        pub online: bool = true,
        pub uptime: u64 = 0,
        pub temperature: f64 = 21.5,
        pub zone: [u8; 4] = *b"none",
        pub grade: char = 'C',
        pub delta: i16 = -1,
    }
}

payload! {
    /// Latitude and longitude in micro-degrees
    pub struct Location {
        pub lat: i32 = 0,
        pub lon: i32 = 0,
    }
}

message! {
    /// Two locations and a hop count
    pub struct Leg = 0x31 {
        pub from: Location = Location::default(),
        pub to: Location = Location::default(),
        pub hops: u8 = 1,
    }
}

/// A bare location under its own code
pub type Fix = Msg<Location, 0x30>;

message_set! {
    pub enum Inbound {
        Hello(Hello),
        Reading(Reading),
        Sample(Sample),
        Status(Status),
    }
}

#[test]
fn scenario_single_integer_field() {
    let msg = Reading::default();
    assert_eq!(msg.size(), 5);
    assert_eq!(msg.code(), MessageCode::new(2));
    assert_eq!(msg.value, 0);

    let msg = Reading::new(42);
    assert_eq!(msg.value, 42);
    assert_eq!(msg.size(), 5);
}

#[test]
fn scenario_float_and_char_fields() {
    let msg = Sample::new(3.14, b'B');
    assert_eq!(msg.float_value, 3.14);
    assert_eq!(msg.char_value, b'B');
    assert_eq!(msg.size(), 6);
    assert_eq!(msg.code(), MessageCode::new(3));

    let defaults = Sample::default();
    assert_eq!(defaults.float_value, 0.0);
    assert_eq!(defaults.char_value, b'A');
}

#[test]
fn scenario_short_buffer_rejected() {
    let bytes = Status::default().encode();
    for len in 0..Status::SIZE {
        assert!(matches!(
            Status::decode(&bytes[..len]),
            Err(Error::BufferTooSmall { .. })
        ));
        assert!(Inbound::decode(&bytes[..len]).is_err());
    }
}

#[test]
fn defaults_and_codes() {
    let status = Status::default();
    assert!(status.online);
    assert_eq!(status.uptime, 0);
    assert_eq!(status.temperature, 21.5);
    assert_eq!(&status.zone, b"none");
    assert_eq!(status.grade, 'C');
    assert_eq!(status.delta, -1);
    assert_eq!(status.code(), Status::CODE);
    assert_eq!(Hello::default().code(), MessageCode::new(1));
}

#[test]
fn size_is_code_plus_field_widths() {
    assert_eq!(Hello::SIZE, CODE_WIDTH);
    assert_eq!(Reading::SIZE, CODE_WIDTH + i32::WIDTH);
    assert_eq!(Sample::SIZE, CODE_WIDTH + f32::WIDTH + u8::WIDTH);
    assert_eq!(
        Status::SIZE,
        CODE_WIDTH
            + bool::WIDTH
            + u64::WIDTH
            + f64::WIDTH
            + <[u8; 4]>::WIDTH
            + char::WIDTH
            + i16::WIDTH
    );

    for descriptor in Inbound::DESCRIPTORS {
        let widths: usize = descriptor.fields.iter().map(|f| f.width).sum();
        assert_eq!(descriptor.size(), CODE_WIDTH + widths);
    }
}

#[test]
fn size_is_constant_across_instances() {
    let sizes = [
        Reading::new(i32::MIN).encode().len(),
        Reading::new(0).encode().len(),
        Reading::new(i32::MAX).encode().len(),
    ];
    assert!(sizes.iter().all(|&size| size == Reading::SIZE));
}

#[test]
fn different_widths_give_different_sizes() {
    let descriptors = Inbound::DESCRIPTORS;
    for (i, a) in descriptors.iter().enumerate() {
        for b in &descriptors[i + 1..] {
            if a.payload_size() != b.payload_size() {
                assert_ne!(a.size(), b.size());
            }
        }
    }
}

#[test]
fn code_survives_relabelled_bytes() {
    let msg = Reading::new(7);
    let mut bytes = msg.encode();
    bytes[0] = Sample::CODE.as_u8();

    assert_eq!(msg.code(), Reading::CODE);
    assert_eq!(peek_code(&bytes).unwrap(), Sample::CODE);
    assert!(matches!(
        Reading::decode(&bytes),
        Err(Error::CodeMismatch { expected, found })
            if expected == Reading::CODE && found == Sample::CODE
    ));
}

#[test]
fn codes_in_set_are_unique() {
    assert!(check_unique_codes(Inbound::DESCRIPTORS).is_ok());

    let mut with_clash = Inbound::DESCRIPTORS.to_vec();
    with_clash.push(Reading::DESCRIPTOR);
    assert!(matches!(
        check_unique_codes(&with_clash),
        Err(Error::DuplicateCode {
            first: "Reading",
            second: "Reading",
            ..
        })
    ));
}

#[test]
fn every_descriptor_validates() {
    for descriptor in Inbound::DESCRIPTORS {
        descriptor.validate().unwrap();
    }
}

#[test]
fn dispatch_mixed_stream() {
    let outbound = [
        Inbound::from(Hello::new()),
        Inbound::from(Status::default()),
        Inbound::from(Reading::new(-9)),
        Inbound::from(Sample::new(3.14, b'B')),
    ];

    let mut stream = Vec::new();
    for msg in &outbound {
        msg.encode_into(&mut stream);
    }
    assert_eq!(
        stream.len(),
        outbound.iter().map(Inbound::size).sum::<usize>()
    );

    let inbound = Inbound::decode_all(&stream).unwrap();
    assert_eq!(inbound, outbound);
}

#[test]
fn shared_payload_in_two_messages() {
    let home = Location::new(51_500_000, -120_000);
    let fix = Fix::new(home);
    let leg = Leg::new(home, Location::from((48_850_000,)), 3);

    assert_eq!(Location::WIDTH, 8);
    assert_eq!(Fix::SIZE, CODE_WIDTH + 8);
    assert_eq!(Leg::SIZE, CODE_WIDTH + 8 + 8 + 1);

    let fix_bytes = fix.encode();
    let leg_bytes = leg.encode();
    assert_eq!(&fix_bytes[1..], &leg_bytes[1..9]);

    assert_eq!(Fix::decode_exact(&fix_bytes).unwrap().data, home);
    assert_eq!(Leg::decode_exact(&leg_bytes).unwrap(), leg);
    assert!(matches!(
        Fix::decode(&leg_bytes),
        Err(Error::CodeMismatch { .. })
    ));
}

fn finite_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |v| v.is_finite())
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |v| v.is_finite())
}

proptest! {
    /// Property: Every reading roundtrips field for field
    #[test]
    fn prop_reading_roundtrip(value in any::<i32>()) {
        let original = Reading::new(value);
        prop_assert_eq!(Reading::decode_exact(&original.encode()).unwrap(), original);
    }

    /// Property: Every sample roundtrips field for field
    #[test]
    fn prop_sample_roundtrip(float_value in finite_f32(), char_value in any::<u8>()) {
        let original = Sample::new(float_value, char_value);
        prop_assert_eq!(Sample::decode_exact(&original.encode()).unwrap(), original);
    }

    /// Property: Every status roundtrips field for field
    #[test]
    fn prop_status_roundtrip(
        online in any::<bool>(),
        uptime in any::<u64>(),
        temperature in finite_f64(),
        zone in any::<[u8; 4]>(),
        grade in any::<char>(),
        delta in any::<i16>(),
    ) {
        let original = Status::new(online, uptime, temperature, zone, grade, delta);
        let bytes = original.encode();
        prop_assert_eq!(bytes.len(), Status::SIZE);
        prop_assert_eq!(Inbound::decode(&bytes).unwrap(), Inbound::Status(original));
    }

    /// Property: NaN payloads survive bit for bit
    #[test]
    fn prop_float_bits_preserved(bits in any::<u32>()) {
        let original = Sample::new(f32::from_bits(bits), b'x');
        let decoded = Sample::decode(&original.encode()).unwrap();
        prop_assert_eq!(decoded.float_value.to_bits(), bits);
    }

    /// Property: Unknown codes are rejected by the set
    #[test]
    fn prop_unknown_code_rejected(
        code in any::<u8>().prop_filter("unclaimed", |c| ![0x01, 0x02, 0x03, 0x20].contains(c)),
        tail in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let mut bytes = vec![code];
        bytes.extend(tail);
        prop_assert!(
            matches!(Inbound::decode(&bytes), Err(Error::UnknownCode { .. })),
            "unclaimed code should be rejected"
        );
    }

    /// Property: A wrapped payload roundtrips at its fixed size
    #[test]
    fn prop_wrapped_payload_roundtrip(lat in any::<i32>(), lon in any::<i32>()) {
        let original = Fix::new(Location::new(lat, lon));
        let encoded = original.encode();
        prop_assert_eq!(encoded.len(), Fix::SIZE);
        prop_assert_eq!(Fix::decode(&encoded).unwrap(), original);
    }
}
