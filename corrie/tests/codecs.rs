use corrie::codec::{
    Decoder, Encoder, FixedLengthCodec, HttpCodec, Request, VarintLengthDelimitedCodec,
    WebSocketCodec, Frame, Opcode,
};
use corrie::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};

use std::sync::Mutex;

/// An in-memory, single-direction byte pipe used to drive codecs without
/// a real socket.
struct Pipe {
    data: Mutex<Vec<u8>>,
    cursor: Mutex<usize>,
}

impl Pipe {
    fn new() -> Self {
        Self {
            data: Mutex::new(Vec::new()),
            cursor: Mutex::new(0),
        }
    }
}

impl AsyncRead for Pipe {
    async fn read(&self, buf: &mut [u8]) -> corrie::Result<usize> {
        let data = self.data.lock().unwrap();
        let mut cursor = self.cursor.lock().unwrap();

        let remaining = &data[*cursor..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        *cursor += n;

        Ok(n)
    }
}

impl AsyncWrite for Pipe {
    async fn write(&self, buf: &[u8]) -> corrie::Result<usize> {
        self.data.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn write_all(&self, buf: &[u8]) -> corrie::Result<()> {
        self.write(buf).await?;
        Ok(())
    }
}

impl AsyncRead for &Pipe {
    async fn read(&self, buf: &mut [u8]) -> corrie::Result<usize> {
        (**self).read(buf).await
    }
}

impl AsyncWrite for &Pipe {
    async fn write(&self, buf: &[u8]) -> corrie::Result<usize> {
        (**self).write(buf).await
    }

    async fn write_all(&self, buf: &[u8]) -> corrie::Result<()> {
        (**self).write_all(buf).await
    }
}

/// Wraps a [`Pipe`] and hands back at most one byte per `read` call,
/// regardless of how large the caller's buffer is — forces callers that
/// loop on partial reads (like `BufReader::read_exact`) to actually loop.
struct OneByteAtATime<'a>(&'a Pipe);

impl AsyncRead for OneByteAtATime<'_> {
    async fn read(&self, buf: &mut [u8]) -> corrie::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.0.read(&mut buf[..1]).await
    }
}

#[corrie::test]
async fn fixed_length_round_trip() {
    let pipe = Pipe::new();
    let codec = FixedLengthCodec;

    {
        let mut writer = BufWriter::new(&pipe);
        codec.encode(b"hello world".to_vec(), &mut writer).await.unwrap();
    }

    let mut reader = BufReader::new(&pipe);
    let decoded = codec.decode(&mut reader).await.unwrap();
    assert_eq!(decoded, b"hello world");
}

#[corrie::test]
async fn varint_length_delimited_round_trip() {
    let pipe = Pipe::new();
    let codec = VarintLengthDelimitedCodec;

    let payload = vec![7u8; 400];

    {
        let mut writer = BufWriter::new(&pipe);
        codec.encode(payload.clone(), &mut writer).await.unwrap();
    }

    let mut reader = BufReader::new(&pipe);
    let decoded = codec.decode(&mut reader).await.unwrap();
    assert_eq!(decoded, payload);
}

/// Round-trips payload lengths that straddle the varint continuation-byte
/// boundaries: 127 fits in one continuation byte, 128 needs two, 16384
/// needs three, and 1_000_000 needs four.
#[corrie::test]
async fn varint_length_delimited_round_trip_boundary_lengths() {
    let codec = VarintLengthDelimitedCodec;

    for len in [0usize, 1, 127, 128, 16384, 1_000_000] {
        let pipe = Pipe::new();
        let payload = vec![3u8; len];

        {
            let mut writer = BufWriter::new(&pipe);
            codec.encode(payload.clone(), &mut writer).await.unwrap();
        }

        let mut reader = BufReader::new(&pipe);
        let decoded = codec.decode(&mut reader).await.unwrap();
        assert_eq!(decoded.len(), len, "length {len} round-tripped incorrectly");
        assert_eq!(decoded, payload, "payload for length {len} mismatched");
    }
}

#[corrie::test]
async fn fixed_length_round_trip_from_one_byte_at_a_time_reader() {
    let pipe = Pipe::new();
    let codec = FixedLengthCodec;

    {
        let mut writer = BufWriter::new(&pipe);
        codec.encode(b"hello world".to_vec(), &mut writer).await.unwrap();
    }

    let mut reader = BufReader::new(OneByteAtATime(&pipe));
    let decoded = codec.decode(&mut reader).await.unwrap();
    assert_eq!(decoded, b"hello world");
}

#[corrie::test]
async fn http_request_round_trip() {
    let pipe = Pipe::new();
    let codec = HttpCodec;

    let mut headers = corrie::codec::HeaderMap::new();
    headers.insert("Host", "example.com");
    headers.insert("Content-Length", "5");

    let request = Request {
        method: "POST".to_string(),
        uri: "/submit".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: b"howdy".to_vec(),
    };

    {
        let mut writer = BufWriter::new(&pipe);
        <HttpCodec as Encoder<Request>>::encode(&codec, request, &mut writer).await.unwrap();
    }

    let mut reader = BufReader::new(&pipe);
    let decoded: Request = codec.decode(&mut reader).await.unwrap();

    assert_eq!(decoded.method, "POST");
    assert_eq!(decoded.uri, "/submit");
    assert_eq!(decoded.headers.find("host"), Some("example.com"));
    assert_eq!(decoded.body, b"howdy");
}

#[corrie::test]
async fn websocket_text_frame_round_trip() {
    let pipe = Pipe::new();
    let server_codec = WebSocketCodec { mask_outgoing: false };
    let client_codec = WebSocketCodec { mask_outgoing: true };

    let frame = Frame {
        opcode: Opcode::Text,
        payload: b"ping".to_vec(),
    };

    {
        let mut writer = BufWriter::new(&pipe);
        client_codec.encode(frame, &mut writer).await.unwrap();
    }

    let mut reader = BufReader::new(&pipe);
    let decoded = server_codec.decode(&mut reader).await.unwrap();

    assert_eq!(decoded.opcode, Opcode::Text);
    assert_eq!(decoded.payload, b"ping");
}

#[test]
fn websocket_accept_key_matches_known_vector() {
    // The canonical example from RFC 6455 section 1.3.
    let key = "dGhlIHNhbXBsZSBub25jZQ==";
    assert_eq!(
        corrie::codec::accept_key(key),
        "s3pPLMBiTxaQ9kYGzzhZRbK+xOo="
    );
}
