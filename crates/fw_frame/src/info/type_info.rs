use core::fmt;

use thiserror::Error;

use crate::info::{ArrayInfo, CompositeInfo, EnumInfo, OpaqueInfo, PrimitiveInfo, Type};

// -----------------------------------------------------------------------------
// FrameKind

/// The shape of a frame type, see [`TypeInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Primitive,
    Enum,
    Array,
    Composite,
    Opaque,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive => f.pad("Primitive"),
            Self::Enum => f.pad("Enum"),
            Self::Array => f.pad("Array"),
            Self::Composite => f.pad("Composite"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Returned by the `as_xxx` casts of [`TypeInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("frame kind mismatch: expected {expected}, received {received}")]
pub struct FrameKindError {
    pub expected: FrameKind,
    pub received: FrameKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time frame description of a type.
///
/// | variant | types |
/// |---|---|
/// | [`Primitive`](TypeInfo::Primitive) | integers, floats, `bool`, `char` |
/// | [`Enum`](TypeInfo::Enum) | fieldless enums deriving `Frame` |
/// | [`Array`](TypeInfo::Array) | `[T; N]` |
/// | [`Composite`](TypeInfo::Composite) | structs and tuple structs deriving `Frame` |
/// | [`Opaque`](TypeInfo::Opaque) | named but not decomposable (`String`, `Vec<T>`, `#[frame(opaque)]`) |
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Primitive(PrimitiveInfo),
    Enum(EnumInfo),
    Array(ArrayInfo),
    Composite(CompositeInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`], or an error for other kinds.")]
        pub const fn $name(&self) -> Result<&$info, FrameKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(FrameKindError {
                    expected: FrameKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_primitive: Primitive => PrimitiveInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_composite: Composite => CompositeInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the [`Type`] this info describes.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Primitive(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Composite(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    pub const fn kind(&self) -> FrameKind {
        match self {
            Self::Primitive(_) => FrameKind::Primitive,
            Self::Enum(_) => FrameKind::Enum,
            Self::Array(_) => FrameKind::Array,
            Self::Composite(_) => FrameKind::Composite,
            Self::Opaque(_) => FrameKind::Opaque,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameKind, TypeInfo};
    use crate::info::Typed;

    #[test]
    fn cast_reports_kinds() {
        let info: &TypeInfo = u16::type_info();
        assert_eq!(info.kind(), FrameKind::Primitive);
        assert!(info.as_primitive().is_ok());

        let err = info.as_composite().unwrap_err();
        assert_eq!(err.expected, FrameKind::Composite);
        assert_eq!(err.received, FrameKind::Primitive);
        assert_eq!(
            alloc::format!("{err}"),
            "frame kind mismatch: expected Composite, received Primitive"
        );
    }
}
