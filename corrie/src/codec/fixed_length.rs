use crate::codec::{Decoder, Encoder};
use crate::error::Result;
use crate::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};

/// A 4-byte little-endian length prefix followed by the payload.
pub struct FixedLengthCodec;

impl Encoder<Vec<u8>> for FixedLengthCodec {
    async fn encode<W: AsyncWrite>(&self, item: Vec<u8>, writer: &mut BufWriter<W>) -> Result<()> {
        writer.write_all(&(item.len() as u32).to_le_bytes()).await?;
        writer.write_all(&item).await?;
        writer.flush().await
    }
}

impl Decoder<Vec<u8>> for FixedLengthCodec {
    async fn decode<R: AsyncRead>(&self, reader: &mut BufReader<R>) -> Result<Vec<u8>> {
        let mut len_bytes = [0u8; 4];
        reader.read_exact(&mut len_bytes).await?;

        let len = u32::from_le_bytes(len_bytes) as usize;
        let mut payload = vec![0u8; len];
        reader.read_exact(&mut payload).await?;

        Ok(payload)
    }
}
