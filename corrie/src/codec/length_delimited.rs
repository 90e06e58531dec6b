use crate::codec::{Decoder, Encoder};
use crate::error::{Error, Result};
use crate::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};

use tracing::warn;

/// Maximum number of continuation bytes before a length prefix is
/// rejected as malformed.
const MAX_VARINT_BYTES: usize = 10;

/// A varint length-delimited frame.
///
/// The length prefix is assembled byte-by-byte in the usual
/// little-endian varint style (7 payload bits per byte, MSB as the
/// continuation flag), but the assembled value is then **byte-swapped**
/// before being trusted as the payload length — a quirk carried over
/// from the wire format this codec mirrors, not a standard varint.
pub struct VarintLengthDelimitedCodec;

impl Encoder<Vec<u8>> for VarintLengthDelimitedCodec {
    async fn encode<W: AsyncWrite>(&self, item: Vec<u8>, writer: &mut BufWriter<W>) -> Result<()> {
        let mut value = (item.len() as u64).swap_bytes();
        let mut prefix = Vec::with_capacity(MAX_VARINT_BYTES);

        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;

            if value != 0 {
                byte |= 0x80;
                prefix.push(byte);
            } else {
                prefix.push(byte);
                break;
            }
        }

        writer.write_all(&prefix).await?;
        writer.write_all(&item).await?;
        writer.flush().await
    }
}

impl Decoder<Vec<u8>> for VarintLengthDelimitedCodec {
    async fn decode<R: AsyncRead>(&self, reader: &mut BufReader<R>) -> Result<Vec<u8>> {
        let mut value: u64 = 0;
        let mut byte = [0u8; 1];

        for i in 0..MAX_VARINT_BYTES {
            reader.read_exact(&mut byte).await?;
            value |= ((byte[0] & 0x7f) as u64) << (7 * i);

            if byte[0] & 0x80 == 0 {
                let len = value.swap_bytes() as usize;
                let mut payload = vec![0u8; len];
                reader.read_exact(&mut payload).await?;
                return Ok(payload);
            }
        }

        warn!("varint length prefix exceeded 10 bytes, rejecting frame");
        Err(Error::protocol("varint length prefix exceeds 10 bytes"))
    }
}
