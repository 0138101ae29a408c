//! Execution of a [`FramePlan`] against one record.
//!
//! The writer walks the plan steps in order, reads every field through its
//! static accessor and hands the encoded bytes to a [`ByteSink`]:
//!
//! - one chunk per primitive, enum or custom field,
//! - one chunk per primitive array, all elements in row-major order,
//! - composites and arrays of composites recurse in place.
//!
//! No length prefixes or separators are added.

use alloc::vec::Vec;
use core::any::Any;
use core::convert::Infallible;

use thiserror::Error;

use crate::info::ItemFn;
use crate::plan::{FramePlan, LeafEncoder, PlanStep, WriteOp};
use crate::sink::{ByteSink, Counter};

// -----------------------------------------------------------------------------
// WriteError

/// An error that occurs while writing a record.
///
/// Chunks handed to the sink before the error stay written.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WriteError<E = Infallible> {
    /// The sink rejected a chunk, its error is returned unchanged.
    #[error("byte sink rejected a chunk")]
    Sink(#[source] E),
    /// The value given to [`FramePlan::write`] is not of the plan's type.
    #[error("expected a record of type `{expected}`")]
    MismatchedRecord { expected: &'static str },
    /// A field could not be read from the record.
    #[error("`{record}`: cannot read field `{field}`")]
    FieldAccess {
        record: &'static str,
        field: &'static str,
    },
}

impl WriteError {
    /// Converts an error of an infallible sink.
    pub fn with_sink_error<E>(self) -> WriteError<E> {
        match self {
            Self::Sink(never) => match never {},
            Self::MismatchedRecord { expected } => WriteError::MismatchedRecord { expected },
            Self::FieldAccess { record, field } => WriteError::FieldAccess { record, field },
        }
    }
}

// -----------------------------------------------------------------------------
// FramePlan execution

impl FramePlan {
    /// Writes `record` into `sink`, field by field in plan order.
    ///
    /// # Examples
    ///
    /// ```
    /// use fw_frame::derive::Frame;
    /// use fw_frame::plan::PlanBuilder;
    ///
    /// #[derive(Frame)]
    /// struct Point {
    ///     x: i32,
    ///     y: i32,
    /// }
    ///
    /// let plan = PlanBuilder::build::<Point>().unwrap();
    /// let mut bytes = Vec::new();
    /// plan.write(&Point { x: 2, y: 4 }, &mut bytes).unwrap();
    ///
    /// assert_eq!(bytes, [2, 0, 0, 0, 4, 0, 0, 0]);
    /// ```
    pub fn write<S: ByteSink + ?Sized>(
        &self,
        record: &dyn Any,
        sink: &mut S,
    ) -> Result<(), WriteError<S::Error>> {
        if (*record).type_id() != self.type_id() {
            return Err(WriteError::MismatchedRecord {
                expected: self.type_path(),
            });
        }

        let mut emitter = Emitter {
            sink,
            scratch: Vec::new(),
            record: self.type_path(),
        };
        emitter.steps(self.steps(), record)
    }

    /// Returns the number of bytes [`write`](Self::write) produces for
    /// `record`.
    ///
    /// Equal to [`fixed_size`](Self::fixed_size) when that is `Some`,
    /// otherwise custom conversions are run to measure their output.
    pub fn encoded_len(&self, record: &dyn Any) -> Result<usize, WriteError> {
        if let Some(size) = self.fixed_size() {
            if (*record).type_id() != self.type_id() {
                return Err(WriteError::MismatchedRecord {
                    expected: self.type_path(),
                });
            }
            return Ok(size);
        }

        let mut counter = Counter::default();
        self.write(record, &mut counter)?;
        Ok(counter.0)
    }

    /// Writes `record` into a new buffer.
    pub fn to_bytes(&self, record: &dyn Any) -> Result<Vec<u8>, WriteError> {
        let mut bytes = Vec::with_capacity(self.fixed_size().unwrap_or_default());
        self.write(record, &mut bytes)?;
        Ok(bytes)
    }
}

// -----------------------------------------------------------------------------
// Emitter

struct Emitter<'s, S: ByteSink + ?Sized> {
    sink: &'s mut S,
    // Reused by every leaf of one record.
    scratch: Vec<u8>,
    record: &'static str,
}

impl<S: ByteSink + ?Sized> Emitter<'_, S> {
    fn steps(&mut self, steps: &[PlanStep], parent: &dyn Any) -> Result<(), WriteError<S::Error>> {
        for step in steps {
            #[cfg(all(debug_assertions, feature = "debug"))]
            log::trace!("{}.{}: {:?}", self.record, step.name(), step.op());

            let value = step.get(parent).ok_or_else(|| self.access_error(step))?;
            self.op(step, value)?;
        }
        Ok(())
    }

    fn op(&mut self, step: &PlanStep, value: &dyn Any) -> Result<(), WriteError<S::Error>> {
        match step.op() {
            WriteOp::Primitive { encode, .. } => {
                self.scratch.clear();
                if !encode(value, &mut self.scratch) {
                    return Err(self.access_error(step));
                }
                self.flush()
            }
            WriteOp::EnumAsWideInt { to_wide } => {
                let wide = to_wide(value).ok_or_else(|| self.access_error(step))?;
                self.sink.write(&wide.to_le_bytes()).map_err(WriteError::Sink)
            }
            WriteOp::Custom(conversion) => {
                let bytes = conversion
                    .convert(value)
                    .ok_or_else(|| self.access_error(step))?;
                self.sink.write(&bytes).map_err(WriteError::Sink)
            }
            WriteOp::ArrayOfPrimitive {
                element,
                dims,
                items,
            } => {
                self.scratch.clear();
                if !flatten(value, element, dims, items, &mut self.scratch) {
                    return Err(self.access_error(step));
                }
                self.flush()
            }
            WriteOp::ArrayOfComposite { len, item, element } => {
                for index in 0..*len {
                    let value = item(value, index).ok_or_else(|| self.access_error(step))?;
                    self.steps(element, value)?;
                }
                Ok(())
            }
            WriteOp::Composite(steps) => self.steps(steps, value),
        }
    }

    #[inline]
    fn flush(&mut self) -> Result<(), WriteError<S::Error>> {
        self.sink.write(&self.scratch).map_err(WriteError::Sink)
    }

    #[cold]
    fn access_error(&self, step: &PlanStep) -> WriteError<S::Error> {
        WriteError::FieldAccess {
            record: self.record,
            field: step.name(),
        }
    }
}

// Appends all elements of a (nested) primitive array in row-major order.
fn flatten(
    value: &dyn Any,
    element: &LeafEncoder,
    dims: &[usize],
    items: &[ItemFn],
    out: &mut Vec<u8>,
) -> bool {
    match (dims.split_first(), items.split_first()) {
        (Some((&len, dims)), Some((item, items))) => (0..len).all(|index| {
            item(value, index).is_some_and(|value| flatten(value, element, dims, items, out))
        }),
        _ => element.encode(value, out),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::WriteError;
    use crate::derive::Frame;
    use crate::plan::{PlanBuilder, WriteOp};
    use crate::sink::ByteSink;

    #[derive(Frame, Clone, Copy)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Frame, Clone, Copy)]
    #[repr(u8)]
    enum Small {
        A = 0,
        B = 3,
    }

    #[derive(Frame, Clone, Copy)]
    #[repr(i64)]
    enum Signed {
        Neg = -2,
        Pos = 7,
    }

    #[derive(Frame)]
    struct Flags(Small, Signed);

    #[derive(Frame)]
    struct Path {
        points: [Point; 3],
    }

    #[derive(Frame)]
    struct Matrix {
        cells: [[u16; 3]; 2],
        modes: [Small; 2],
    }

    #[derive(Frame)]
    struct Grid {
        rows: [[Point; 2]; 2],
    }

    fn sum(point: &Point) -> [u8; 4] {
        (point.x + point.y).to_le_bytes()
    }

    #[derive(Frame)]
    struct Summed {
        #[frame(with = sum)]
        point: Point,
        tail: u8,
    }

    fn one_byte(mode: &Small) -> [u8; 1] {
        [*mode as u8]
    }

    #[derive(Frame)]
    struct Tagged {
        #[frame(with = one_byte)]
        mode: Small,
        count: u8,
    }

    #[derive(Frame)]
    struct Sample {
        id: u32,
        #[frame(ignore)]
        cache: Vec<u8>,
        value: f32,
    }

    /// Keeps every chunk apart.
    #[derive(Default)]
    struct Chunks(Vec<Vec<u8>>);

    impl ByteSink for Chunks {
        type Error = core::convert::Infallible;

        fn write(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
            self.0.push(chunk.to_vec());
            Ok(())
        }
    }

    /// Accepts `limit` chunks, then fails.
    struct FailAt {
        limit: usize,
        accepted: Vec<Vec<u8>>,
    }

    impl FailAt {
        fn new(limit: usize) -> Self {
            Self {
                limit,
                accepted: Vec::new(),
            }
        }
    }

    impl ByteSink for FailAt {
        type Error = &'static str;

        fn write(&mut self, chunk: &[u8]) -> Result<(), Self::Error> {
            if self.accepted.len() == self.limit {
                return Err("full");
            }
            self.accepted.push(chunk.to_vec());
            Ok(())
        }
    }

    #[test]
    fn enum_is_widened() {
        let plan = PlanBuilder::build::<Flags>().unwrap();
        let bytes = plan.to_bytes(&Flags(Small::B, Signed::Neg)).unwrap();
        assert_eq!(bytes[..8], [3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes[8..], (-2_i64).to_le_bytes());

        let bytes = plan.to_bytes(&Flags(Small::A, Signed::Pos)).unwrap();
        assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn composite_array() {
        let plan = PlanBuilder::build::<Path>().unwrap();
        let path = Path {
            points: [
                Point { x: 2, y: 4 },
                Point { x: 5, y: 10 },
                Point { x: 1, y: 0 },
            ],
        };

        let mut chunks = Chunks::default();
        plan.write(&path, &mut chunks).unwrap();

        // one chunk per primitive leaf
        assert_eq!(chunks.0.len(), 6);
        let bytes = chunks.0.concat();
        assert_eq!(bytes.len(), 24);
        assert_eq!(bytes[..8], [2, 0, 0, 0, 4, 0, 0, 0]);
        assert_eq!(bytes[16..], [1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn primitive_array_is_one_chunk() {
        let plan = PlanBuilder::build::<Matrix>().unwrap();
        let matrix = Matrix {
            cells: [[1, 2, 3], [4, 5, 6]],
            modes: [Small::B, Small::A],
        };

        let mut chunks = Chunks::default();
        plan.write(&matrix, &mut chunks).unwrap();

        assert_eq!(chunks.0.len(), 2);
        assert_eq!(chunks.0[0], [1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 0]);
        assert_eq!(chunks.0[1], [3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn nested_composite_array() {
        let plan = PlanBuilder::build::<Grid>().unwrap();
        let p = |x| Point { x, y: -x };
        let grid = Grid {
            rows: [[p(1), p(2)], [p(3), p(4)]],
        };

        let bytes = plan.to_bytes(&grid).unwrap();
        let expected: Vec<u8> = (1..=4)
            .flat_map(|x: i32| [x.to_le_bytes(), (-x).to_le_bytes()])
            .flatten()
            .collect();
        assert_eq!(bytes, expected);
    }

    #[test]
    fn custom_conversion() {
        let plan = PlanBuilder::build::<Summed>().unwrap();
        let record = Summed {
            point: Point { x: 5, y: 20 },
            tail: 9,
        };

        let mut chunks = Chunks::default();
        plan.write(&record, &mut chunks).unwrap();
        assert_eq!(chunks.0, vec![vec![25, 0, 0, 0], vec![9]]);
        assert_eq!(plan.encoded_len(&record).unwrap(), 5);
    }

    #[test]
    fn enum_ignores_custom_conversion() {
        let plan = PlanBuilder::build::<Tagged>().unwrap();
        assert!(matches!(plan.steps()[0].op(), WriteOp::EnumAsWideInt { .. }));
        assert_eq!(plan.fixed_size(), Some(9));

        let bytes = plan.to_bytes(&Tagged { mode: Small::B, count: 4 }).unwrap();
        assert_eq!(bytes, [3, 0, 0, 0, 0, 0, 0, 0, 4]);
        assert_eq!(one_byte(&Small::B), [3]);
    }

    #[test]
    fn ignored_fields_write_nothing() {
        let plan = PlanBuilder::build::<Sample>().unwrap();
        let record = Sample {
            id: 1,
            cache: vec![0xAA; 64],
            value: 2.0,
        };

        let bytes = plan.to_bytes(&record).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(plan.fixed_size(), Some(8));
        assert!(!bytes.contains(&0xAA));
        assert_eq!(record.cache.len(), 64);
    }

    #[test]
    fn mismatched_record() {
        let plan = PlanBuilder::build::<Point>().unwrap();
        let err = plan.to_bytes(&7_u32).unwrap_err();
        assert!(matches!(err, WriteError::MismatchedRecord { expected } if expected.ends_with("Point")));
        assert!(plan.encoded_len(&7_u32).is_err());
    }

    #[test]
    fn sink_error_is_returned() {
        let plan = PlanBuilder::build::<Point>().unwrap();
        let mut sink = FailAt::new(1);

        let err = plan.write(&Point { x: 1, y: 2 }, &mut sink).unwrap_err();
        assert!(matches!(err, WriteError::Sink("full")));
        // bytes accepted before the failure stay with the sink
        assert_eq!(sink.accepted, [[1, 0, 0, 0]]);
    }
}
