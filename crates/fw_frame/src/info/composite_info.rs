use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::{FieldInfo, Type, TypePath, impl_type_fn};
use crate::introspect::ActiveFields;

/// Frame description of a struct or tuple struct: the type descriptor.
///
/// Fields are kept sorted by their ordering key, so iteration order is the
/// declaration order of the type.
#[derive(Clone, Debug)]
pub struct CompositeInfo {
    ty: Type,
    fields: Box<[FieldInfo]>,
    is_tuple: bool,
}

impl CompositeInfo {
    impl_type_fn!(ty);

    /// Creates the info of a struct with named fields.
    pub fn new<T: TypePath>(fields: &[FieldInfo]) -> Self {
        Self::from_fields::<T>(fields, false)
    }

    /// Creates the info of a tuple struct.
    pub fn new_tuple<T: TypePath>(fields: &[FieldInfo]) -> Self {
        Self::from_fields::<T>(fields, true)
    }

    fn from_fields<T: TypePath>(fields: &[FieldInfo], is_tuple: bool) -> Self {
        let mut fields: Vec<FieldInfo> = fields.to_vec();
        fields.sort_by_key(FieldInfo::index);

        Self {
            ty: Type::of::<T>(),
            fields: fields.into_boxed_slice(),
            is_tuple,
        }
    }

    #[inline]
    pub const fn is_tuple(&self) -> bool {
        self.is_tuple
    }

    /// All declared fields, ignored ones included.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldInfo::name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Fields that take part in headers and data, in declaration order.
    #[inline]
    pub fn active_fields(&self) -> ActiveFields<'_> {
        ActiveFields::new(&self.fields)
    }
}
