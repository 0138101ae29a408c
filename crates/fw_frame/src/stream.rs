//! Per-stream driver: header once, then records.
//!
//! ```
//! use fw_frame::derive::Frame;
//! use fw_frame::registry::PlanRegistry;
//! use fw_frame::stream::FrameWriter;
//!
//! #[derive(Frame)]
//! struct Sample {
//!     id: u16,
//!     value: f32,
//! }
//!
//! let registry = PlanRegistry::new();
//! let mut writer = FrameWriter::<Sample, _>::new(&registry, Vec::new()).unwrap();
//!
//! writer.write(&Sample { id: 1, value: 0.5 }).unwrap();
//! writer.write(&Sample { id: 2, value: 1.5 }).unwrap();
//!
//! assert_eq!(writer.records_written(), 2);
//! assert_eq!(writer.into_sink().len(), 2 * 6);
//! ```

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use crate::header::{HeaderSink, LogHeader};
use crate::info::Typed;
use crate::plan::{FramePlan, PlanError};
use crate::registry::PlanRegistry;
use crate::sink::ByteSink;
use crate::write::WriteError;

// -----------------------------------------------------------------------------
// WriterOptions

/// How record bytes are grouped into sink calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chunking {
    /// One sink call per leaf field (primitive, enum, custom value or
    /// whole primitive array).
    #[default]
    PerField,
    /// One sink call per record, buffered in a reusable buffer.
    PerRecord,
}

/// Per-stream configuration of a [`FrameWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriterOptions {
    pub chunking: Chunking,
    /// Emit the [`FrameHeader`](crate::header::FrameHeader) before the
    /// first record.
    pub emit_header: bool,
}

impl Default for WriterOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl WriterOptions {
    /// Per-field chunks, header enabled.
    #[inline]
    pub const fn new() -> Self {
        Self {
            chunking: Chunking::PerField,
            emit_header: true,
        }
    }

    #[inline]
    pub const fn with_chunking(mut self, chunking: Chunking) -> Self {
        self.chunking = chunking;
        self
    }

    #[inline]
    pub const fn with_emit_header(mut self, emit_header: bool) -> Self {
        self.emit_header = emit_header;
        self
    }
}

// -----------------------------------------------------------------------------
// FrameWriter

/// Writes records of type `T` into a [`ByteSink`].
///
/// The plan of `T` is obtained from a [`PlanRegistry`] when the writer is
/// created, so an unsupported record type fails before any byte is written.
/// The header goes to `H` just before the first record.
pub struct FrameWriter<T, S, H = LogHeader> {
    plan: Arc<FramePlan>,
    sink: S,
    header: H,
    options: WriterOptions,
    header_pending: bool,
    buffer: Vec<u8>,
    records: u64,
    _marker: PhantomData<fn(&T)>,
}

impl<T: Typed, S: ByteSink> FrameWriter<T, S> {
    /// Creates a writer with default options, logging the header.
    pub fn new(registry: &PlanRegistry, sink: S) -> Result<Self, PlanError> {
        let plan = registry.get_or_build::<T>()?;
        Ok(Self {
            plan,
            sink,
            header: LogHeader,
            options: WriterOptions::new(),
            header_pending: true,
            buffer: Vec::new(),
            records: 0,
            _marker: PhantomData,
        })
    }
}

impl<T: Typed, S: ByteSink, H: HeaderSink> FrameWriter<T, S, H> {
    /// Replaces the header destination.
    pub fn with_header<H2: HeaderSink>(self, header: H2) -> FrameWriter<T, S, H2> {
        FrameWriter {
            plan: self.plan,
            sink: self.sink,
            header,
            options: self.options,
            header_pending: self.header_pending,
            buffer: self.buffer,
            records: self.records,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn with_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    /// Writes one record.
    ///
    /// The first call emits the header first. A sink error is returned
    /// unchanged, bytes already accepted by the sink are not rolled back.
    pub fn write(&mut self, record: &T) -> Result<(), WriteError<S::Error>> {
        if self.header_pending {
            self.header_pending = false;
            if self.options.emit_header {
                self.emit_header();
            }
        }

        match self.options.chunking {
            Chunking::PerField => self.plan.write(record, &mut self.sink)?,
            Chunking::PerRecord => {
                self.buffer.clear();
                self.plan
                    .write(record, &mut self.buffer)
                    .map_err(|err| err.with_sink_error())?;
                self.sink.write(&self.buffer).map_err(WriteError::Sink)?;
            }
        }

        self.records += 1;
        log::trace!("{}: record #{} written", self.plan.type_name(), self.records);
        Ok(())
    }

    fn emit_header(&mut self) {
        if let Err(err) = self.header.emit(self.plan.header()) {
            log::warn!(
                "failed to emit frame header of `{}`: {err}",
                self.plan.type_path()
            );
        }
    }

    #[inline]
    pub fn plan(&self) -> &FramePlan {
        &self.plan
    }

    #[inline]
    pub fn options(&self) -> WriterOptions {
        self.options
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[inline]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<T, S: fmt::Debug, H> fmt::Debug for FrameWriter<T, S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameWriter")
            .field("type", &self.plan.type_path())
            .field("sink", &self.sink)
            .field("options", &self.options)
            .field("records", &self.records)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::convert::Infallible;

    use super::{Chunking, FrameWriter, WriterOptions};
    use crate::derive::Frame;
    use crate::header::{FrameHeader, HeaderSink};
    use crate::registry::PlanRegistry;
    use crate::sink::ByteSink;
    use crate::write::WriteError;

    #[derive(Frame)]
    struct Pose {
        id: u32,
        position: [f32; 3],
        #[frame(ignore)]
        label: String,
    }

    #[derive(Frame)]
    struct Unsupported {
        name: String,
    }

    fn pose(id: u32) -> Pose {
        Pose {
            id,
            position: [id as f32; 3],
            label: String::from("pose"),
        }
    }

    #[derive(Default)]
    struct Calls {
        calls: Vec<Vec<u8>>,
    }

    impl ByteSink for Calls {
        type Error = Infallible;

        fn write(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
            self.calls.push(chunk.to_vec());
            Ok(())
        }
    }

    /// Records headers, the data sink tells when they arrived.
    #[derive(Default)]
    struct Headers(Vec<String>);

    impl HeaderSink for Headers {
        type Error = Infallible;

        fn emit(&mut self, header: &FrameHeader) -> Result<(), Self::Error> {
            self.0.push(alloc::format!("{header}"));
            Ok(())
        }
    }

    struct BrokenHeader;

    impl HeaderSink for BrokenHeader {
        type Error = &'static str;

        fn emit(&mut self, _header: &FrameHeader) -> Result<(), Self::Error> {
            Err("closed")
        }
    }

    #[test]
    fn one_build_for_many_records() {
        let registry = PlanRegistry::new();
        let mut writer = FrameWriter::<Pose, _>::new(&registry, Vec::new())
            .unwrap()
            .with_header(());

        for id in 0..1000 {
            writer.write(&pose(id)).unwrap();
        }

        // a second stream of the same type reuses the plan
        let again = FrameWriter::<Pose, _>::new(&registry, Vec::new()).unwrap();

        assert_eq!(registry.builds(), 1);
        assert_eq!(writer.records_written(), 1000);
        assert_eq!(writer.sink().len(), 1000 * (4 + 12));
        assert_eq!(again.plan().fixed_size(), Some(16));
        assert_eq!(pose(0).label, "pose");
    }

    #[test]
    fn header_once_before_data() {
        let registry = PlanRegistry::new();
        let mut headers = Headers::default();
        {
            let mut writer = FrameWriter::<Pose, _>::new(&registry, Calls::default())
                .unwrap()
                .with_header(&mut headers);

            assert!(writer.header.0.is_empty());
            writer.write(&pose(1)).unwrap();
            assert_eq!(writer.header.0.len(), 1);
            assert_eq!(writer.sink().calls.len(), 2);

            writer.write(&pose(2)).unwrap();
            assert_eq!(writer.sink().calls.len(), 4);
        }

        assert_eq!(headers.0.len(), 1);
        assert!(headers.0[0].starts_with("Frame type: "));
        assert!(headers.0[0].contains("\tposition: [f32; 3] [3]\n"));
        assert!(!headers.0[0].contains("label"));
    }

    #[test]
    fn header_disabled() {
        let registry = PlanRegistry::new();
        let mut writer = FrameWriter::<Pose, _>::new(&registry, Vec::new())
            .unwrap()
            .with_header(Headers::default())
            .with_options(WriterOptions::new().with_emit_header(false));

        writer.write(&pose(1)).unwrap();
        assert!(writer.header.0.is_empty());
    }

    #[test]
    fn header_failure_is_not_fatal() {
        let registry = PlanRegistry::new();
        let mut writer = FrameWriter::<Pose, _>::new(&registry, Vec::new())
            .unwrap()
            .with_header(BrokenHeader);

        writer.write(&pose(1)).unwrap();
        assert_eq!(writer.into_sink().len(), 16);
    }

    #[test]
    fn per_record_chunking() {
        let registry = PlanRegistry::new();
        let options = WriterOptions::default().with_chunking(Chunking::PerRecord);
        let mut per_record = FrameWriter::<Pose, _>::new(&registry, Calls::default())
            .unwrap()
            .with_header(())
            .with_options(options);
        let mut per_field = FrameWriter::<Pose, _>::new(&registry, Calls::default())
            .unwrap()
            .with_header(());

        for id in 0..3 {
            per_record.write(&pose(id)).unwrap();
            per_field.write(&pose(id)).unwrap();
        }

        let per_record = per_record.into_sink().calls;
        let per_field = per_field.into_sink().calls;
        assert_eq!(per_record.len(), 3);
        assert_eq!(per_field.len(), 6);
        assert_eq!(per_record.concat(), per_field.concat());
    }

    #[test]
    fn unsupported_type_fails_before_writing() {
        let registry = PlanRegistry::new();
        let mut sink = Vec::new();

        let first = FrameWriter::<Unsupported, _>::new(&registry, &mut sink).err();
        assert!(first.is_some());
        assert!(sink.is_empty());

        let again = FrameWriter::<Unsupported, _>::new(&registry, Vec::new()).err();
        assert_eq!(first, again);
        assert_eq!(registry.builds(), 1);
    }

    #[cfg(feature = "io")]
    #[test]
    fn io_sink_errors_pass_through() {
        struct Full;

        impl std::io::Write for Full {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::StorageFull.into())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let registry = PlanRegistry::new();
        let mut writer = FrameWriter::<Pose, _>::new(&registry, crate::sink::IoSink(Full))
            .unwrap()
            .with_header(());

        let err = writer.write(&pose(1)).unwrap_err();
        assert!(matches!(err, WriteError::Sink(e) if e.kind() == std::io::ErrorKind::StorageFull));
        assert_eq!(writer.records_written(), 0);
    }
}
