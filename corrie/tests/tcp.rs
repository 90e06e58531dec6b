use corrie::net::{TcpListener, TcpStream};

#[corrie::test]
async fn write_all_then_read_exact_round_trips_bytes() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = corrie::task::spawn(async move {
        let (stream, _peer) = listener.accept().await.unwrap();
        let mut buf = [0u8; 11];
        stream.read_exact(&mut buf).await.unwrap();
        stream.write_all(&buf).await.unwrap();
    });

    let client = TcpStream::connect(&addr.to_string()).await.unwrap();
    client.write_all(b"hello world").await.unwrap();

    let mut echoed = [0u8; 11];
    client.read_exact(&mut echoed).await.unwrap();

    server.await;
    assert_eq!(&echoed, b"hello world");
}

#[corrie::test]
async fn reunite_succeeds_for_matching_halves_and_fails_for_mismatched() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = corrie::task::spawn(async move {
        let (stream, _peer) = listener.accept().await.unwrap();
        stream
    });

    let client_a = TcpStream::connect(&addr.to_string()).await.unwrap();
    let accepted = server.await;

    let (read_a, write_a) = client_a.into_split();
    let reunited = read_a.reunite(write_a);
    assert!(reunited.is_ok());

    let (read_b, _write_b) = reunited.unwrap().into_split();
    let (_read_c, write_c) = accepted.into_split();

    let err = read_b.reunite(write_c).unwrap_err();
    let corrie::net::ReuniteError(read_back, write_back) = err;

    // The halves come back usable: the reunite failure didn't close the
    // underlying sockets.
    let mut echoed = [0u8; 5];
    write_back.write_all(b"hello").await.unwrap();
    read_back.read_exact(&mut echoed).await.unwrap();
    assert_eq!(&echoed, b"hello");
}
