//! Destinations of frame bytes.
//!
//! A [`ByteSink`] receives the chunks of every record in plan order.
//! Chunks are never merged or split by the writer: one chunk per leaf
//! field by default, or one per record with
//! [`Chunking::PerRecord`](crate::stream::Chunking::PerRecord).

use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;

/// A synchronous consumer of byte chunks.
///
/// Errors are passed to the caller unchanged inside
/// [`WriteError::Sink`](crate::write::WriteError::Sink), the writer does not
/// retry. Bytes accepted before an error are not rolled back.
pub trait ByteSink {
    type Error;

    /// Accepts the next chunk.
    fn write(&mut self, chunk: &[u8]) -> Result<(), Self::Error>;
}

/// Appends every chunk.
impl ByteSink for Vec<u8> {
    type Error = Infallible;

    #[inline]
    fn write(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(chunk);
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    type Error = S::Error;

    #[inline]
    fn write(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
        (**self).write(chunk)
    }
}

// -----------------------------------------------------------------------------
// IoSink

/// Writes every chunk to an [`std::io::Write`] with `write_all`.
#[cfg(feature = "io")]
#[derive(Debug, Default)]
pub struct IoSink<W: std::io::Write>(pub W);

#[cfg(feature = "io")]
impl<W: std::io::Write> IoSink<W> {
    #[inline]
    pub fn into_inner(self) -> W {
        self.0
    }
}

#[cfg(feature = "io")]
impl<W: std::io::Write> ByteSink for IoSink<W> {
    type Error = std::io::Error;

    #[inline]
    fn write(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(chunk)
    }
}

// -----------------------------------------------------------------------------
// LogSink

/// Logs every chunk at `trace` level as `b0,b1,...: len`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ByteSink for LogSink {
    type Error = Infallible;

    fn write(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
        log::trace!("{}: {}", Joined(chunk), chunk.len());
        Ok(())
    }
}

struct Joined<'a>(&'a [u8]);

impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, byte) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{byte}")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Counter

/// Counts bytes without storing them.
#[derive(Debug, Default)]
pub(crate) struct Counter(pub usize);

impl ByteSink for Counter {
    type Error = Infallible;

    #[inline]
    fn write(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
        self.0 += chunk.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::{ByteSink, Joined};

    #[test]
    fn joined_chunk() {
        assert_eq!(Joined(&[1, 20, 255]).to_string(), "1,20,255");
        assert_eq!(Joined(&[]).to_string(), "");
    }

    #[test]
    fn forwarding_sinks() {
        let mut out = Vec::new();
        {
            let mut by_ref = &mut out;
            by_ref.write(&[1, 2]).unwrap();
            ByteSink::write(&mut by_ref, &[3]).unwrap();
        }

        assert_eq!(out, [1, 2, 3]);
    }

    #[cfg(feature = "io")]
    #[test]
    fn io_sink_writes_all() {
        let mut io = super::IoSink(Vec::new());
        io.write(&[1, 2]).unwrap();
        io.write(&[3]).unwrap();
        assert_eq!(io.into_inner(), [1, 2, 3]);
    }
}
