use corrie::io::StreamBuffer;

#[test]
fn write_to_resets_cursors_when_drained() {
    let mut buf = StreamBuffer::new(8);
    assert_eq!(buf.read_from(b"abcd"), 4);

    let mut out = [0u8; 4];
    assert_eq!(buf.write_to(&mut out), 4);
    assert_eq!(&out, b"abcd");

    assert!(buf.is_empty());
    assert_eq!(buf.read_from(b"wxyz"), 4);

    let mut out2 = [0u8; 4];
    assert_eq!(buf.write_to(&mut out2), 4);
    assert_eq!(&out2, b"wxyz");
}

#[test]
fn read_from_respects_capacity() {
    let mut buf = StreamBuffer::new(4);
    assert_eq!(buf.read_from(b"abcdef"), 4);
    assert_eq!(buf.readable(), b"abcd");
    assert_eq!(buf.read_from(b"z"), 0);
}

#[test]
fn reset_data_compacts_in_place() {
    let mut buf = StreamBuffer::new(8);
    buf.read_from(b"abcdef");

    let mut out = [0u8; 3];
    buf.write_to(&mut out);
    assert_eq!(&out, b"abc");
    assert_eq!(buf.readable(), b"def");

    buf.reset_data();
    assert_eq!(buf.readable(), b"def");
    assert_eq!(buf.read_from(b"ghijk"), 5);
    assert_eq!(buf.readable(), b"defghijk");
}

#[test]
fn find_flag_returns_prefix_through_pattern() {
    let mut buf = StreamBuffer::new(16);
    buf.read_from(b"GET / HTTP/1.1\r\nHost: x\r\n");
    assert_eq!(buf.find_flag(b"\r\n"), b"GET / HTTP/1.1\r\n");
}

#[test]
fn find_flag_empty_when_absent() {
    let mut buf = StreamBuffer::new(16);
    buf.read_from(b"no terminator here");
    assert_eq!(buf.find_flag(b"\r\n"), b"");
}
