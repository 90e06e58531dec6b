//! Length-prefixed and framed codecs composing over buffered streams.
//!
//! Every codec implements [`Encoder`]/[`Decoder`] against a
//! [`BufWriter`]/[`BufReader`] rather than a raw socket, so the same
//! codec works over a `TcpStream`, a split half, or anything else that
//! implements [`AsyncRead`]/[`AsyncWrite`]. Codecs never spawn a
//! background task.

mod fixed_length;
mod http;
mod length_delimited;
mod websocket;

pub use fixed_length::FixedLengthCodec;
pub use http::{HeaderMap, HttpCodec, Request, Response};
pub use length_delimited::VarintLengthDelimitedCodec;
pub use websocket::{Frame, Opcode, WebSocketCodec, accept_key, handshake_response};

use crate::error::Result;
use crate::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};

use std::future::Future;

/// Encodes `Item` values onto a buffered async sink.
pub trait Encoder<Item> {
    /// Writes `item` to `writer`. Implementations are responsible for
    /// their own flushing where the wire format requires it.
    fn encode<W>(
        &self,
        item: Item,
        writer: &mut BufWriter<W>,
    ) -> impl Future<Output = Result<()>> + Send
    where
        W: AsyncWrite;
}

/// Decodes `Item` values from a buffered async source.
pub trait Decoder<Item> {
    /// Reads one `Item` from `reader`, suspending until enough bytes
    /// have arrived.
    fn decode<R>(&self, reader: &mut BufReader<R>) -> impl Future<Output = Result<Item>> + Send
    where
        R: AsyncRead;
}
