//! Declare a few message types, send them over a byte buffer, dispatch them back

use fixmsg::{Message, Msg, message, message_set, payload};

message! {
    /// Carries nothing but its code
    pub struct Hello = 0x01 {}

    /// One integer reading
    pub struct Reading = 0x02 {
        pub value: i32 = 0,
    }

    /// A float and a one-byte character
    pub struct Sample = 0x03 {
        pub float_value: f32 = 0.0,
        pub char_value: u8 = b'A',
    }
}

payload! {
    /// Reusable grid position
    pub struct Point {
        pub x: i32 = 0,
        pub y: i32 = 0,
    }
}

/// A position wrapped as a message of its own
pub type Position = Msg<Point, 0x05>;

message_set! {
    pub enum Inbound {
        Hello(Hello),
        Reading(Reading),
        Sample(Sample),
        Position(Position),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("fixmsg dispatch example");
    println!("=======================\n");

    for descriptor in Inbound::DESCRIPTORS {
        print!("{descriptor}");
    }
    println!();

    // Build instances: defaults, full constructor, positional prefix
    let outbound = [
        Inbound::from(Hello::default()),
        Inbound::from(Reading::new(42)),
        Inbound::from(Sample::from((2.5_f32,))),
        Inbound::from(Position::new(Point::new(3, -4))),
    ];

    // Write them back to back, as a channel would carry them
    let mut channel = Vec::new();
    for msg in &outbound {
        msg.encode_into(&mut channel);
        println!("sent     {msg} ({} bytes)", msg.size());
    }
    println!("\nchannel holds {} bytes\n", channel.len());

    // Receiver side: peek the code, pick the type, decode
    let mut rest = channel.as_slice();
    while !rest.is_empty() {
        let (msg, tail) = Inbound::decode_prefix(rest)?;
        println!("received {msg}");
        rest = tail;
    }

    // A truncated buffer is reported, not misread
    let short = Reading::new(7).encode();
    match Reading::decode(&short[..3]) {
        Ok(msg) => println!("\nunexpectedly decoded {msg}"),
        Err(err) => println!("\ntruncated buffer rejected: {err}"),
    }

    Ok(())
}
