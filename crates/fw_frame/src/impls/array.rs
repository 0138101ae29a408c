use alloc::string::ToString;

use crate::impls::{GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ArrayInfo, TypeInfo, TypePath, Typed};

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            crate::impls::concat(&["[", T::type_path(), "; ", &N.to_string(), "]"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            crate::impls::concat(&["[", T::type_name(), "; ", &N.to_string(), "]"])
        })
    }

    fn type_ident() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            crate::impls::concat(&["[", T::type_ident(), "; ", &N.to_string(), "]"])
        })
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::new::<T, N>()))
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{TypePath, Typed};

    #[test]
    fn nested_array_info() {
        assert_eq!(<[[f32; 4]; 2]>::type_name(), "[[f32; 4]; 2]");

        let outer = <[[f32; 4]; 2]>::type_info().as_array().unwrap();
        assert_eq!(outer.len(), 2);

        let inner = outer.item_info().as_array().unwrap();
        assert_eq!(inner.len(), 4);
        assert!(inner.item_info().as_primitive().is_ok());

        let value = [[1.0_f32; 4], [2.0; 4]];
        let row = outer.item(&value, 1).unwrap();
        assert_eq!(row.downcast_ref::<[f32; 4]>(), Some(&[2.0; 4]));
        assert!(outer.item(&value, 2).is_none());
        assert!(outer.item(&0_u8, 0).is_none());
    }
}
