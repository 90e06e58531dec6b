use crate::codec::{Decoder, Encoder};
use crate::error::{Error, Result};
use crate::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};

use tracing::debug;

/// Case-insensitive, insertion-order-preserving, multi-valued HTTP
/// header collection.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header, keeping any existing entries with the same
    /// name (headers may be repeated on the wire).
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the first value for `name`, compared case-insensitively.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `name`, in insertion order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// An HTTP/1.1 request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub uri: String,
    pub version: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// An HTTP/1.1 response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status_code: u16,
    pub status_text: String,
    pub version: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Encodes and decodes HTTP/1.1 requests and responses over a buffered
/// stream. `Content-Length` drives body framing; chunked transfer
/// encoding is not supported.
pub struct HttpCodec;

fn status_line(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw)
        .map_err(|_| Error::protocol("invalid utf-8 in status line"))
        .map(|s| s.trim_end_matches("\r\n"))
}

async fn read_headers<R: AsyncRead>(reader: &mut BufReader<R>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    loop {
        let mut line = Vec::new();
        reader.read_until(&mut line, b"\r\n").await?;
        let trimmed = status_line(&line)?;

        if trimmed.is_empty() {
            return Ok(headers);
        }

        let (name, value) = trimmed
            .split_once(':')
            .ok_or_else(|| Error::protocol("malformed header line"))?;

        headers.insert(name.trim(), value.trim());
    }
}

async fn write_headers<W: AsyncWrite>(writer: &mut BufWriter<W>, headers: &HeaderMap) -> Result<()> {
    for (name, value) in headers.iter() {
        writer
            .write_all(format!("{name}: {value}\r\n").as_bytes())
            .await?;
    }

    Ok(())
}

async fn read_body<R: AsyncRead>(reader: &mut BufReader<R>, headers: &HeaderMap) -> Result<Vec<u8>> {
    let len = headers
        .find("content-length")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    if len == 0 {
        return Ok(Vec::new());
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;
    Ok(body)
}

impl Decoder<Request> for HttpCodec {
    async fn decode<R: AsyncRead>(&self, reader: &mut BufReader<R>) -> Result<Request> {
        decode_request(reader).await.inspect_err(|err| {
            debug!(%err, "failed to decode http request");
        })
    }
}

async fn decode_request<R: AsyncRead>(reader: &mut BufReader<R>) -> Result<Request> {
    let mut line = Vec::new();
    reader.read_until(&mut line, b"\r\n").await?;
    let line = status_line(&line)?;

    let mut parts = line.splitn(3, ' ');
    let method = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::protocol("missing request method"))?
        .to_string();
    let uri = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::protocol("missing request uri"))?
        .to_string();
    let version = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::protocol("missing request version"))?
        .to_string();

    let headers = read_headers(reader).await?;
    let body = read_body(reader, &headers).await?;

    Ok(Request {
        method,
        uri,
        version,
        headers,
        body,
    })
}

impl Encoder<Request> for HttpCodec {
    async fn encode<W: AsyncWrite>(&self, item: Request, writer: &mut BufWriter<W>) -> Result<()> {
        writer
            .write_all(format!("{} {} {}\r\n", item.method, item.uri, item.version).as_bytes())
            .await?;

        write_headers(writer, &item.headers).await?;
        writer.write_all(b"\r\n").await?;

        if !item.body.is_empty() {
            writer.write_all(&item.body).await?;
        }

        writer.flush().await
    }
}

impl Decoder<Response> for HttpCodec {
    async fn decode<R: AsyncRead>(&self, reader: &mut BufReader<R>) -> Result<Response> {
        decode_response(reader).await.inspect_err(|err| {
            debug!(%err, "failed to decode http response");
        })
    }
}

async fn decode_response<R: AsyncRead>(reader: &mut BufReader<R>) -> Result<Response> {
    let mut line = Vec::new();
    reader.read_until(&mut line, b"\r\n").await?;
    let line = status_line(&line)?;

    let mut parts = line.splitn(3, ' ');
    let version = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::protocol("missing response version"))?
        .to_string();
    let status_code = parts
        .next()
        .ok_or_else(|| Error::protocol("missing status code"))?
        .parse()
        .map_err(|_| Error::protocol("invalid status code"))?;
    let status_text = parts.next().unwrap_or("").to_string();

    let headers = read_headers(reader).await?;
    let body = read_body(reader, &headers).await?;

    Ok(Response {
        status_code,
        status_text,
        version,
        headers,
        body,
    })
}

impl Encoder<Response> for HttpCodec {
    /// A response whose headers carry an `Upgrade` entry is written as a
    /// handshake: status line, headers, blank line, no body — matching
    /// the `101 Switching Protocols` form a protocol upgrade expects,
    /// regardless of whatever `status_code`/`status_text`/`body` the
    /// caller happened to set.
    async fn encode<W: AsyncWrite>(&self, item: Response, writer: &mut BufWriter<W>) -> Result<()> {
        if item.headers.find("Upgrade").is_some() {
            writer.write_all(b"HTTP/1.1 101 Switching Protocols\r\n").await?;
            write_headers(writer, &item.headers).await?;
            writer.write_all(b"\r\n").await?;
            return writer.flush().await;
        }

        writer
            .write_all(
                format!(
                    "{} {} {}\r\n",
                    item.version, item.status_code, item.status_text
                )
                .as_bytes(),
            )
            .await?;

        write_headers(writer, &item.headers).await?;
        writer.write_all(b"\r\n").await?;

        if !item.body.is_empty() {
            writer.write_all(&item.body).await?;
        }

        writer.flush().await
    }
}
