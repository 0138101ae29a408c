//! One-time schema description of a frame stream.
//!
//! Before the first record of a stream, [`FrameWriter`] hands the
//! [`FrameHeader`] of the record type to a [`HeaderSink`]. The header is
//! descriptive only, it does not change the data bytes.
//!
//! ```text
//! Frame type: my_app::Pose
//! 	id: u32 [1]
//! 	position: [f32; 3] [3]
//! 	rotation: [[f32; 4]; 4] [4,4]
//! ```
//!
//! [`FrameWriter`]: crate::stream::FrameWriter

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;

use serde_core::ser::SerializeStruct;
use serde_core::{Serialize, Serializer};

use crate::info::{CompositeInfo, FieldInfo, TypeInfo};

// -----------------------------------------------------------------------------
// FrameHeader

/// Schema of a record type: its name and its active top-level fields.
///
/// `Display` renders the text form shown in the [module docs](self),
/// `Serialize` the structured form:
///
/// ```
/// use fw_frame::derive::Frame;
/// use fw_frame::header::FrameHeader;
///
/// #[derive(Frame)]
/// #[frame(type_path = "demo::Pose")]
/// struct Pose {
///     id: u32,
///     position: [f32; 3],
/// }
///
/// let header = FrameHeader::of::<Pose>().unwrap();
/// assert_eq!(
///     serde_json::to_string(&header).unwrap(),
///     r#"{"type":"demo::Pose","fields":[{"name":"id","type":"u32","shape":[1]},{"name":"position","type":"[f32; 3]","shape":[3]}]}"#,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    type_path: &'static str,
    fields: Box<[HeaderField]>,
}

impl FrameHeader {
    /// Creates the header of a record type from its descriptor.
    pub fn from_info(info: &CompositeInfo) -> Self {
        Self {
            type_path: info.type_path(),
            fields: info.active_fields().map(HeaderField::from_field).collect(),
        }
    }

    /// Creates the header of `T`, `None` if `T` is not a record type.
    pub fn of<T: crate::info::Typed>() -> Option<Self> {
        T::type_info().as_composite().ok().map(Self::from_info)
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn fields(&self) -> &[HeaderField] {
        &self.fields
    }
}

impl fmt::Display for FrameHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frame type: {}", self.type_path)?;
        for field in &self.fields {
            writeln!(f, "\t{field}")?;
        }
        Ok(())
    }
}

impl Serialize for FrameHeader {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FrameHeader", 2)?;
        state.serialize_field("type", self.type_path)?;
        state.serialize_field("fields", &*self.fields)?;
        state.end()
    }
}

// -----------------------------------------------------------------------------
// HeaderField

/// One top-level field of a [`FrameHeader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: &'static str,
    type_name: &'static str,
    shape: Box<[usize]>,
}

impl HeaderField {
    fn from_field(field: &FieldInfo) -> Self {
        let mut shape = Vec::new();
        let mut info = field.type_info();
        while let Some(TypeInfo::Array(array)) = info {
            shape.push(array.len());
            info = Some(array.item_info());
        }
        if shape.is_empty() {
            shape.push(1);
        }

        Self {
            name: field.name(),
            type_name: field.type_name(),
            shape: shape.into_boxed_slice(),
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the declared field type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `[1]` for non-array fields, the dimension sizes for arrays.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [", self.name, self.type_name)?;
        for (index, dim) in self.shape.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{dim}")?;
        }
        f.write_str("]")
    }
}

impl Serialize for HeaderField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HeaderField", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("type", self.type_name)?;
        state.serialize_field("shape", &*self.shape)?;
        state.end()
    }
}

// -----------------------------------------------------------------------------
// HeaderSink

/// Destination of the frame header.
///
/// Emission is best-effort: the stream logs a failure at `warn` level and
/// goes on with the data.
pub trait HeaderSink {
    type Error: fmt::Display;

    fn emit(&mut self, header: &FrameHeader) -> Result<(), Self::Error>;
}

/// No header.
impl HeaderSink for () {
    type Error = Infallible;

    #[inline]
    fn emit(&mut self, _header: &FrameHeader) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<H: HeaderSink + ?Sized> HeaderSink for &mut H {
    type Error = H::Error;

    #[inline]
    fn emit(&mut self, header: &FrameHeader) -> Result<(), Self::Error> {
        (**self).emit(header)
    }
}

/// Writes the header text through `log::info!`, one line per record.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHeader;

impl HeaderSink for LogHeader {
    type Error = Infallible;

    fn emit(&mut self, header: &FrameHeader) -> Result<(), Self::Error> {
        log::info!("Frame type: {}", header.type_path());
        for field in header.fields() {
            log::info!("\t{field}");
        }
        Ok(())
    }
}

/// Writes the header text to an [`std::io::Write`].
#[cfg(feature = "io")]
#[derive(Debug, Default)]
pub struct TextHeader<W: std::io::Write>(pub W);

#[cfg(feature = "io")]
impl<W: std::io::Write> TextHeader<W> {
    #[inline]
    pub fn into_inner(self) -> W {
        self.0
    }
}

#[cfg(feature = "io")]
impl<W: std::io::Write> HeaderSink for TextHeader<W> {
    type Error = std::io::Error;

    fn emit(&mut self, header: &FrameHeader) -> Result<(), Self::Error> {
        write!(self.0, "{header}")?;
        self.0.flush()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::{FrameHeader, HeaderSink};
    use crate::derive::Frame;

    fn to_text(value: &u32) -> Vec<u8> {
        value.to_string().into_bytes()
    }

    #[derive(Frame)]
    #[frame(type_path = "tests::Mode")]
    enum Mode {
        Idle,
        Run,
    }

    #[derive(Frame)]
    #[frame(type_path = "tests::Sample")]
    struct Sample {
        id: u32,
        mode: Mode,
        rotation: [[f32; 4]; 4],
        #[frame(with = to_text)]
        label: u32,
        #[frame(ignore)]
        _cache: Vec<u8>,
    }

    fn flat(position: &[f32; 3]) -> Vec<u8> {
        position.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn mode_name(mode: &Mode) -> &'static [u8] {
        match mode {
            Mode::Idle => b"idle",
            Mode::Run => b"run",
        }
    }

    #[derive(Frame)]
    #[frame(type_path = "tests::Converted")]
    struct Converted {
        #[frame(with = flat)]
        position: [f32; 3],
        #[frame(with = mode_name)]
        mode: Mode,
    }

    #[test]
    fn converted_fields_keep_their_description() {
        let header = FrameHeader::of::<Converted>().unwrap();
        assert_eq!(header.fields()[0].shape(), [3]);
        assert_eq!(header.fields()[0].type_name(), "[f32; 3]");
        assert_eq!(header.fields()[1].type_name(), "Mode");
        assert_eq!(
            header.to_string(),
            "Frame type: tests::Converted\n\
             \tposition: [f32; 3] [3]\n\
             \tmode: Mode [1]\n"
        );
        assert_eq!(flat(&[1.0, 0.0, 0.0])[..4], 1.0_f32.to_le_bytes());
        assert_eq!(mode_name(&Mode::Run), b"run");
    }

    #[test]
    fn header_lists_active_fields() {
        let header = FrameHeader::of::<Sample>().unwrap();
        let names: Vec<_> = header.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["id", "mode", "rotation", "label"]);
        assert_eq!(header.fields()[2].shape(), [4, 4]);
        assert_eq!(header.fields()[1].shape(), [1]);
        assert!(FrameHeader::of::<u8>().is_none());
    }

    #[test]
    fn header_display() {
        let header = FrameHeader::of::<Sample>().unwrap();
        assert_eq!(
            header.to_string(),
            "Frame type: tests::Sample\n\
             \tid: u32 [1]\n\
             \tmode: Mode [1]\n\
             \trotation: [[f32; 4]; 4] [4,4]\n\
             \tlabel: u32 [1]\n"
        );
    }

    #[test]
    fn header_json() {
        let header = FrameHeader::of::<Sample>().unwrap();
        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json["type"], "tests::Sample");
        assert_eq!(json["fields"].as_array().unwrap().len(), 4);
        assert_eq!(json["fields"][2]["shape"], serde_json::json!([4, 4]));
        assert_eq!(json["fields"][1]["type"], "Mode");
    }

    #[cfg(feature = "io")]
    #[test]
    fn text_header_sink() {
        let header = FrameHeader::of::<Sample>().unwrap();
        let mut sink = super::TextHeader(Vec::new());
        sink.emit(&header).unwrap();
        assert_eq!(sink.into_inner(), header.to_string().into_bytes());
    }
}
