use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to the names a frame type reports.
///
/// The names end up in frame headers and in error messages, so they should
/// not depend on [`core::any::type_name`], whose output is not stable across
/// compiler versions.
///
/// - [`type_path`]: unique, fully qualified name (e.g. `"my_app::Sample"`).
/// - [`type_name`]: name without module path (e.g. `"Sample"`, `"[f32; 3]"`).
/// - [`type_ident`]: name without module path and generics.
/// - [`module_path`]: optional module path.
///
/// Names never start with `::`.
///
/// # Implementation
///
/// Usually derived, either alone or together with [`Typed`]:
///
/// ```
/// use fw_frame::derive::TypePath;
/// use fw_frame::info::TypePath;
///
/// #[derive(TypePath)]
/// #[frame(type_path = "sensors::Tag")]
/// struct Tag(u32);
///
/// assert_eq!(Tag::type_path(), "sensors::Tag");
/// assert_eq!(Tag::type_name(), "Tag");
/// ```
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
/// [`type_ident`]: TypePath::type_ident
/// [`module_path`]: TypePath::module_path
/// [`Typed`]: crate::info::Typed
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the type.
    fn type_path() -> &'static str;

    /// Returns the type name without module path.
    fn type_name() -> &'static str;

    /// Returns the type name without module path and generics.
    fn type_ident() -> &'static str;

    /// Returns the module path, if any.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// Type

/// The identity of a frame type: its [`TypeId`] plus its [`TypePath`] names.
///
/// Equality and hashing only consider the `TypeId`.
#[derive(Copy, Clone)]
pub struct Type {
    type_id: TypeId,
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    type_ident: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl Type {
    /// Creates the `Type` of `T`.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: T::type_path,
            type_name: T::type_name,
            type_ident: T::type_ident,
            module_path: T::module_path,
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }

    #[inline]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    #[inline]
    pub fn ident(&self) -> &'static str {
        (self.type_ident)()
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements `ty`, `type_id`, `type_is`, `type_path` and `type_name`
/// for info structs holding a [`Type`].
macro_rules! impl_type_fn {
    ($field:ident) => {
        #[inline(always)]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        #[inline]
        pub const fn type_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }

        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.$field.path()
        }

        #[inline]
        pub fn type_name(&self) -> &'static str {
            self.$field.name()
        }
    };
}

pub(crate) use impl_type_fn;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Type, TypePath};

    struct Marker;

    impl TypePath for Marker {
        fn type_path() -> &'static str {
            "tests::Marker"
        }
        fn type_name() -> &'static str {
            "Marker"
        }
        fn type_ident() -> &'static str {
            "Marker"
        }
        fn module_path() -> Option<&'static str> {
            Some("tests")
        }
    }

    #[test]
    fn type_reports_names() {
        let ty = Type::of::<Marker>();
        assert!(ty.is::<Marker>());
        assert!(!ty.is::<u8>());
        assert_eq!(ty.path(), "tests::Marker");
        assert_eq!(ty.name(), "Marker");
        assert_eq!(ty.module_path(), Some("tests"));
        assert_eq!(ty, Type::of::<Marker>());
        assert_eq!(alloc::format!("{ty:?}"), "tests::Marker");
    }
}
