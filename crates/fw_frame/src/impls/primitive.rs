use alloc::vec::Vec;

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{Primitive, PrimitiveInfo, TypeInfo, TypePath, Typed};

macro_rules! impl_primitive_type {
    (le: $($ty:ident),* $(,)?) => {
        $(
            impl_primitive_type!(
                $ty,
                stringify!($ty),
                size_of::<$ty>(),
                |v, out| out.extend_from_slice(&v.to_le_bytes())
            );
        )*
    };
    ($ty:ty, $name:expr, $width:expr, |$value:ident, $out:ident| $put:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $name
            }
            #[inline]
            fn type_name() -> &'static str {
                $name
            }
            #[inline]
            fn type_ident() -> &'static str {
                $name
            }
        }

        impl Primitive for $ty {
            const WIDTH: usize = $width;

            #[inline]
            fn put_le(self, $out: &mut Vec<u8>) {
                let $value = self;
                $put;
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Primitive(PrimitiveInfo::new::<Self>()))
            }
        }
    };
}

// u8 - u128, i8 - i128, f32, f64
impl_primitive_type!(le: u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl_primitive_type!(bool, "bool", 1, |v, out| out.push(u8::from(v)));
impl_primitive_type!(char, "char", 4, |v, out| {
    out.extend_from_slice(&u32::from(v).to_le_bytes());
});

// Pointer-sized integers have the same width on every target.
impl_primitive_type!(usize, "usize", 8, |v, out| {
    out.extend_from_slice(&(v as u64).to_le_bytes());
});
impl_primitive_type!(isize, "isize", 8, |v, out| {
    out.extend_from_slice(&(v as i64).to_le_bytes());
});

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::info::{Primitive, Typed};

    fn le<T: Primitive>(value: T) -> Vec<u8> {
        let mut out = Vec::new();
        value.put_le(&mut out);
        assert_eq!(out.len(), T::WIDTH);
        out
    }

    #[test]
    fn little_endian_bytes() {
        assert_eq!(le(0x0102_u16), [0x02, 0x01]);
        assert_eq!(le(-2_i32), [0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(le(1.0_f32), 1.0_f32.to_le_bytes());
        assert_eq!(le(true), [1]);
        assert_eq!(le('A'), [0x41, 0, 0, 0]);
        assert_eq!(le(3_usize), [3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(le(-1_isize), [0xFF; 8]);
        assert_eq!(le(1_u128).len(), 16);
    }

    #[test]
    fn primitive_info_width() {
        let info = u64::type_info().as_primitive().unwrap();
        assert_eq!(info.width(), 8);
        assert_eq!(info.type_name(), "u64");

        let mut out = Vec::new();
        assert!(info.encode(&7_u64, &mut out));
        assert!(!info.encode(&7_u32, &mut out));
        assert_eq!(out, [7, 0, 0, 0, 0, 0, 0, 0]);
    }
}
