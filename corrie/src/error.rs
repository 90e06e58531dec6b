//! Error types shared across the runtime, I/O, and codec layers.

use std::io;
use thiserror::Error;

/// The crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A read or decode operation needed more bytes than the source could
    /// provide before reaching end-of-stream.
    #[error("unexpected end of file")]
    UnexpectedEof,

    /// A write attempt made zero bytes of progress and cannot continue.
    #[error("write returned zero bytes")]
    WriteZero,

    /// The `resolve` collaborator could not turn a host/service pair into
    /// an address.
    #[error("name resolution failed: {0}")]
    ResolveFailed(String),

    /// Anything else: OS errors, protocol violations, malformed frames.
    #[error(transparent)]
    Unclassified(#[from] io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds an [`Error::Unclassified`] carrying a protocol-violation
    /// message, for codecs that detect malformed input rather than an OS
    /// error.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Error::Unclassified(io::Error::new(io::ErrorKind::InvalidData, msg.into()))
    }
}
