use alloc::{string::String, vec::Vec};

use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};

// Variable sized values have no fixed layout, a field of these types
// needs a custom conversion.

impl TypePath for String {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::string::String"
    }
    #[inline]
    fn type_name() -> &'static str {
        "String"
    }
    #[inline]
    fn type_ident() -> &'static str {
        "String"
    }
    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::string")
    }
}

impl Typed for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl TypePath for &'static str {
    #[inline]
    fn type_path() -> &'static str {
        "&str"
    }
    #[inline]
    fn type_name() -> &'static str {
        "&str"
    }
    #[inline]
    fn type_ident() -> &'static str {
        "&str"
    }
}

impl Typed for &'static str {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

macro_rules! impl_opaque_generic {
    ($ty:ident, $module:literal) => {
        impl<T: TypePath> TypePath for $ty<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    crate::impls::concat(&[$module, "::", stringify!($ty), "<", T::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    crate::impls::concat(&[stringify!($ty), "<", T::type_name(), ">"])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<T: TypePath> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }
    };
}

impl_opaque_generic!(Vec, "alloc::vec");
impl_opaque_generic!(Option, "core::option");

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::info::{FrameKind, TypePath, Typed};

    #[test]
    fn opaque_std_types() {
        assert_eq!(String::type_info().kind(), FrameKind::Opaque);
        assert_eq!(<&'static str>::type_info().kind(), FrameKind::Opaque);
        assert_eq!(Vec::<u8>::type_info().kind(), FrameKind::Opaque);
        assert_eq!(Vec::<u8>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(Option::<[i8; 2]>::type_name(), "Option<[i8; 2]>");
    }
}
