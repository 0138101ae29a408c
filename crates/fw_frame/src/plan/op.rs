use core::any::Any;
use core::fmt;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::{EncodeFn, FieldAccess, FieldConversion, ItemFn, WideFn};

// -----------------------------------------------------------------------------
// LeafEncoder

/// Encoder of a single fixed-width value.
#[derive(Clone, Copy)]
pub enum LeafEncoder {
    /// Raw little-endian bytes of a primitive.
    Primitive { width: usize, encode: EncodeFn },
    /// Enum discriminant sign-extended to `i64`, 8 bytes.
    WideEnum { to_wide: WideFn },
}

impl LeafEncoder {
    /// Encoded width in bytes.
    #[inline]
    pub const fn width(&self) -> usize {
        match self {
            Self::Primitive { width, .. } => *width,
            Self::WideEnum { .. } => size_of::<i64>(),
        }
    }

    /// Appends the encoded `value` to `out`.
    ///
    /// Returns `false` if the value has an unexpected type.
    pub fn encode(&self, value: &dyn Any, out: &mut Vec<u8>) -> bool {
        match self {
            Self::Primitive { encode, .. } => encode(value, out),
            Self::WideEnum { to_wide } => match to_wide(value) {
                Some(wide) => {
                    out.extend_from_slice(&wide.to_le_bytes());
                    true
                }
                None => false,
            },
        }
    }
}

impl fmt::Debug for LeafEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive { width, .. } => write!(f, "Primitive({width})"),
            Self::WideEnum { .. } => f.write_str("WideEnum"),
        }
    }
}

// -----------------------------------------------------------------------------
// WriteOp

/// How one value is flattened into bytes.
///
/// Ops only hold static function pointers and sizes, no per-instance state.
#[derive(Clone)]
pub enum WriteOp {
    /// Raw little-endian bytes, `width` long.
    Primitive { width: usize, encode: EncodeFn },
    /// Enum discriminant as 8 bytes little-endian `i64`.
    EnumAsWideInt { to_wide: WideFn },
    /// User conversion, bytes written verbatim.
    Custom(FieldConversion),
    /// Possibly nested array of fixed-width values, written as one chunk
    /// in row-major order.
    ///
    /// `items[k]` reads an element at nesting level `k`, `dims[k]` is the
    /// length of that level.
    ArrayOfPrimitive {
        element: LeafEncoder,
        dims: Box<[usize]>,
        items: Box<[ItemFn]>,
    },
    /// Array whose elements are composites (or arrays of composites),
    /// `element` runs once per element in index order.
    ArrayOfComposite {
        len: usize,
        item: ItemFn,
        element: Box<[PlanStep]>,
    },
    /// Nested composite, its steps run in place.
    Composite(Box<[PlanStep]>),
}

impl WriteOp {
    /// Byte length of the op, `None` if it contains a custom conversion.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Primitive { width, .. } => Some(*width),
            Self::EnumAsWideInt { .. } => Some(size_of::<i64>()),
            Self::Custom(_) => None,
            Self::ArrayOfPrimitive { element, dims, .. } => {
                Some(dims.iter().product::<usize>() * element.width())
            }
            Self::ArrayOfComposite { len, element, .. } => {
                Some(*len * steps_fixed_size(element)?)
            }
            Self::Composite(steps) => steps_fixed_size(steps),
        }
    }
}

pub(crate) fn steps_fixed_size(steps: &[PlanStep]) -> Option<usize> {
    steps.iter().map(|step| step.op.fixed_size()).sum()
}

impl fmt::Debug for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive { width, .. } => f.debug_tuple("Primitive").field(width).finish(),
            Self::EnumAsWideInt { .. } => f.write_str("EnumAsWideInt"),
            Self::Custom(conversion) => f.debug_tuple("Custom").field(&conversion.path()).finish(),
            Self::ArrayOfPrimitive { element, dims, .. } => f
                .debug_struct("ArrayOfPrimitive")
                .field("element", element)
                .field("dims", dims)
                .finish(),
            Self::ArrayOfComposite { len, element, .. } => f
                .debug_struct("ArrayOfComposite")
                .field("len", len)
                .field("element", element)
                .finish(),
            Self::Composite(steps) => f.debug_tuple("Composite").field(steps).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// PlanStep

/// One field of a plan: how to reach it and how to write it.
#[derive(Clone)]
pub struct PlanStep {
    name: &'static str,
    access: FieldAccess,
    op: WriteOp,
}

impl PlanStep {
    #[inline]
    pub const fn new(name: &'static str, access: FieldAccess, op: WriteOp) -> Self {
        Self { name, access, op }
    }

    /// Field name, empty for the nested levels of an array of arrays.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn op(&self) -> &WriteOp {
        &self.op
    }

    /// Reads the field from its parent value.
    #[inline]
    pub fn get<'a>(&self, parent: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.access)(parent)
    }
}

impl fmt::Debug for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.name, self.op)
    }
}
