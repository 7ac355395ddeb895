use redis_op_lib::frame::{self, Frame};

use std::io::Cursor;

fn parse(src: &[u8]) -> Result<Frame, frame::Error> {
    let mut buf = Cursor::new(src);
    Frame::check(&mut buf)?;

    buf.set_position(0);
    Frame::parse(&mut buf)
}

#[test]
fn bulk_reply() {
    let frame = parse(b"$3\r\n100\r\n").unwrap();
    assert!(frame == "100");
}

#[test]
fn null_reply() {
    assert!(matches!(parse(b"$-1\r\n").unwrap(), Frame::Null));
}

#[test]
fn error_reply_keeps_the_message() {
    match parse(b"-ERR unknown command 'foo'\r\n").unwrap() {
        Frame::Error(msg) => assert_eq!("ERR unknown command 'foo'", msg),
        other => panic!("expected an error frame, got {:?}", other),
    }
}

#[test]
fn array_of_mixed_entries() {
    let frame = parse(b"*3\r\n+OK\r\n:42\r\n$5\r\nhello\r\n").unwrap();
    assert_eq!("OK 42 hello", frame.to_string());
}

#[test]
fn check_stops_at_the_end_of_the_first_frame() {
    let src = b"+OK\r\n$3\r\n100\r\n";
    let mut buf = Cursor::new(&src[..]);

    Frame::check(&mut buf).unwrap();
    assert_eq!(5, buf.position());
}

#[test]
fn partial_frames_are_incomplete() {
    for src in [
        &b""[..],
        &b"+OK"[..],
        &b"+OK\r"[..],
        &b"$5\r\nwor"[..],
        &b"$-1\r"[..],
        &b"*2\r\n$3\r\nget\r\n"[..],
    ] {
        let mut buf = Cursor::new(src);
        assert!(
            matches!(Frame::check(&mut buf), Err(frame::Error::Incomplete)),
            "{:?} should be incomplete",
            src
        );
    }
}

#[test]
fn unknown_type_byte_is_a_protocol_error() {
    let mut buf = Cursor::new(&b"?what\r\n"[..]);
    assert!(matches!(
        Frame::check(&mut buf),
        Err(frame::Error::Other(_))
    ));
}

#[test]
fn malformed_length_is_a_protocol_error() {
    let mut buf = Cursor::new(&b"$abc\r\nxyz\r\n"[..]);
    assert!(matches!(
        Frame::check(&mut buf),
        Err(frame::Error::Other(_))
    ));
}

#[test]
fn oversized_bulk_length_is_a_protocol_error() {
    let src = b"$18446744073709551615\r\nxx\r\n";

    let mut buf = Cursor::new(&src[..]);
    assert!(matches!(
        Frame::check(&mut buf),
        Err(frame::Error::Other(_))
    ));

    let mut buf = Cursor::new(&src[..]);
    assert!(matches!(
        Frame::parse(&mut buf),
        Err(frame::Error::Other(_))
    ));
}

#[test]
fn display_of_null() {
    assert_eq!("(nil)", Frame::Null.to_string());
}
