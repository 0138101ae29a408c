use core::any::{Any, TypeId};
use core::fmt;

use alloc::vec::Vec;

use crate::info::{TypeInfo, Typed};

/// Type-erased field read: `record -> &record.field`.
///
/// Returns `None` if the value is not of the record type the field belongs to.
pub type FieldAccess = fn(&dyn Any) -> Option<&dyn Any>;

/// Type-erased custom conversion of a field value into bytes.
///
/// Returns `None` if the value is not of the field type.
pub type ConvertFn = fn(&dyn Any) -> Option<Vec<u8>>;

// -----------------------------------------------------------------------------
// FieldConversion

/// A user conversion attached with `#[frame(with = path)]`.
///
/// The produced bytes are written verbatim, without a length prefix.
#[derive(Clone, Copy)]
pub struct FieldConversion {
    path: &'static str,
    convert: ConvertFn,
}

impl FieldConversion {
    #[inline]
    pub const fn new(path: &'static str, convert: ConvertFn) -> Self {
        Self { path, convert }
    }

    /// Path of the conversion function, as written in the attribute.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub fn convert(&self, value: &dyn Any) -> Option<Vec<u8>> {
        (self.convert)(value)
    }
}

impl fmt::Debug for FieldConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldConversion").field(&self.path).finish()
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// Static description of one member of a composite type.
///
/// Tuple struct fields are named `"0"`, `"1"`, ...
#[derive(Clone)]
pub struct FieldInfo {
    name: &'static str,
    index: usize,
    type_id: TypeId,
    type_name: fn() -> &'static str,
    // `None` for field types without a frame description,
    // they are only allowed with a conversion or when ignored.
    type_info: Option<fn() -> &'static TypeInfo>,
    access: FieldAccess,
    conversion: Option<FieldConversion>,
    ignored: bool,
}

impl FieldInfo {
    /// Creates a field whose type has a frame description.
    ///
    /// `index` is the ordering key, the declaration index of the field.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str, index: usize, access: FieldAccess) -> Self {
        Self {
            name,
            index,
            type_id: TypeId::of::<T>(),
            type_name: T::type_name,
            type_info: Some(T::type_info),
            access,
            conversion: None,
            ignored: false,
        }
    }

    /// Creates a field whose type has no frame description.
    ///
    /// The field needs a [conversion](Self::with_conversion) or must be
    /// [ignored](Self::with_ignored). `#[derive(Frame)]` only uses it for
    /// ignored fields, converted fields keep their description.
    #[inline]
    pub const fn untyped<T: Any>(name: &'static str, index: usize, access: FieldAccess) -> Self {
        Self {
            name,
            index,
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>,
            type_info: None,
            access,
            conversion: None,
            ignored: false,
        }
    }

    #[inline]
    pub const fn with_conversion(mut self, conversion: FieldConversion) -> Self {
        self.conversion = Some(conversion);
        self
    }

    #[inline]
    pub const fn with_ignored(mut self, ignored: bool) -> Self {
        self.ignored = ignored;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Name of the declared field type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    #[inline]
    pub fn type_info(&self) -> Option<&'static TypeInfo> {
        self.type_info.map(|f| f())
    }

    /// Reads this field from `record`.
    #[inline]
    pub fn get<'a>(&self, record: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.access)(record)
    }

    #[inline]
    pub const fn accessor(&self) -> FieldAccess {
        self.access
    }

    #[inline]
    pub const fn conversion(&self) -> Option<&FieldConversion> {
        self.conversion.as_ref()
    }

    /// Returns `true` for `#[frame(ignore)]` fields, which are neither
    /// written nor listed in headers.
    #[inline]
    pub const fn is_ignored(&self) -> bool {
        self.ignored
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("type_name", &self.type_name())
            .field("conversion", &self.conversion)
            .field("ignored", &self.ignored)
            .finish()
    }
}
