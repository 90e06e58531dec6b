use crate::codec::http::{HeaderMap, Response};
use crate::codec::{Decoder, Encoder};
use crate::error::{Error, Result};
use crate::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha1::{Digest, Sha1};

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

use tracing::debug;

const WEBSOCKET_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// WebSocket frame opcodes, restricted to the ones this codec handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Continuation,
    Text,
    Binary,
    Close,
    Ping,
    Pong,
}

impl Opcode {
    fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x0 => Ok(Self::Continuation),
            0x1 => Ok(Self::Text),
            0x2 => Ok(Self::Binary),
            0x8 => Ok(Self::Close),
            0x9 => Ok(Self::Ping),
            0xA => Ok(Self::Pong),
            other => Err(Error::protocol(format!(
                "unsupported websocket opcode {other:#x}"
            ))),
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            Self::Continuation => 0x0,
            Self::Text => 0x1,
            Self::Binary => 0x2,
            Self::Close => 0x8,
            Self::Ping => 0x9,
            Self::Pong => 0xA,
        }
    }
}

/// A single, unfragmented WebSocket frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub opcode: Opcode,
    pub payload: Vec<u8>,
}

/// Encodes and decodes unfragmented WebSocket frames (RFC 6455).
///
/// Only `FIN=1`, `RSV=0` frames are supported; fragmented messages are
/// rejected rather than reassembled.
pub struct WebSocketCodec {
    /// Whether outgoing frames are masked, as required of a client.
    /// Servers must send unmasked frames, so this should be `false`
    /// on the server side.
    pub mask_outgoing: bool,
}

fn generate_mask() -> [u8; 4] {
    let value = RandomState::new().build_hasher().finish();
    value.to_le_bytes()[..4].try_into().unwrap()
}

impl Decoder<Frame> for WebSocketCodec {
    async fn decode<R: AsyncRead>(&self, reader: &mut BufReader<R>) -> Result<Frame> {
        decode_frame(reader).await.inspect_err(|err| {
            debug!(%err, "failed to decode websocket frame");
        })
    }
}

async fn decode_frame<R: AsyncRead>(reader: &mut BufReader<R>) -> Result<Frame> {
    let mut header = [0u8; 2];
    reader.read_exact(&mut header).await?;

    if header[0] & 0x80 == 0 {
        return Err(Error::protocol("fragmented websocket frames are not supported"));
    }

    if header[0] & 0x70 != 0 {
        return Err(Error::protocol("websocket frame has unsupported RSV bits set"));
    }

    let opcode = Opcode::from_byte(header[0] & 0x0f)?;

    let masked = header[1] & 0x80 != 0;
    let len_field = header[1] & 0x7f;

    let len = match len_field {
        126 => {
            let mut ext = [0u8; 2];
            reader.read_exact(&mut ext).await?;
            u16::from_be_bytes(ext) as usize
        }
        127 => {
            let mut ext = [0u8; 8];
            reader.read_exact(&mut ext).await?;
            u64::from_be_bytes(ext) as usize
        }
        n => n as usize,
    };

    let mask = if masked {
        let mut mask = [0u8; 4];
        reader.read_exact(&mut mask).await?;
        Some(mask)
    } else {
        None
    };

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;

    if let Some(mask) = mask {
        for (i, byte) in payload.iter_mut().enumerate() {
            *byte ^= mask[i % 4];
        }
    }

    Ok(Frame { opcode, payload })
}

impl Encoder<Frame> for WebSocketCodec {
    async fn encode<W: AsyncWrite>(&self, item: Frame, writer: &mut BufWriter<W>) -> Result<()> {
        let mut header = vec![0x80 | item.opcode.to_byte()];
        let mask_bit = if self.mask_outgoing { 0x80 } else { 0x00 };
        let len = item.payload.len();

        if len < 126 {
            header.push(mask_bit | len as u8);
        } else if len <= u16::MAX as usize {
            header.push(mask_bit | 126);
            header.extend_from_slice(&(len as u16).to_be_bytes());
        } else {
            header.push(mask_bit | 127);
            header.extend_from_slice(&(len as u64).to_be_bytes());
        }

        writer.write_all(&header).await?;

        if self.mask_outgoing {
            let mask = generate_mask();
            writer.write_all(&mask).await?;

            let mut masked = item.payload;
            for (i, byte) in masked.iter_mut().enumerate() {
                *byte ^= mask[i % 4];
            }

            writer.write_all(&masked).await?;
        } else {
            writer.write_all(&item.payload).await?;
        }

        writer.flush().await
    }
}

/// Computes the `Sec-WebSocket-Accept` value for a client's
/// `Sec-WebSocket-Key`, per RFC 6455 section 1.3.
pub fn accept_key(client_key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(client_key.as_bytes());
    hasher.update(WEBSOCKET_GUID.as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Builds the `101 Switching Protocols` response that completes a
/// WebSocket handshake for the given client key.
pub fn handshake_response(client_key: &str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("Upgrade", "websocket");
    headers.insert("Connection", "Upgrade");
    headers.insert("Sec-WebSocket-Accept", accept_key(client_key));

    Response {
        status_code: 101,
        status_text: "Switching Protocols".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: Vec::new(),
    }
}
