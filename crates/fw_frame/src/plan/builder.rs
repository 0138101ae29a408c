use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use crate::header::FrameHeader;
use crate::info::{ArrayInfo, CompositeInfo, FieldInfo, TypeInfo, Typed};
use crate::plan::{FramePlan, LeafEncoder, PlanError, PlanStep, WriteOp};

fn identity(value: &dyn Any) -> Option<&dyn Any> {
    Some(value)
}

/// Derives a [`FramePlan`] from a type descriptor.
///
/// Each active field gets exactly one [`WriteOp`], chosen in this order:
///
/// 1. enum: [`WriteOp::EnumAsWideInt`]
/// 2. custom conversion: [`WriteOp::Custom`]
/// 3. primitive: [`WriteOp::Primitive`]
/// 4. array of primitives or enums, possibly nested: [`WriteOp::ArrayOfPrimitive`]
/// 5. array of composites, possibly nested: [`WriteOp::ArrayOfComposite`]
/// 6. composite: [`WriteOp::Composite`], built recursively
///
/// Anything else (opaque types, composites without active fields, arrays
/// of opaque types) fails with [`PlanError::UnsupportedType`] and aborts
/// the whole plan.
///
/// # Examples
///
/// ```
/// use fw_frame::derive::Frame;
/// use fw_frame::plan::PlanBuilder;
///
/// #[derive(Frame)]
/// struct Point(i32, i32);
///
/// #[derive(Frame)]
/// struct Polygon {
///     points: [Point; 3],
///     closed: bool,
/// }
///
/// let plan = PlanBuilder::build::<Polygon>().unwrap();
/// assert_eq!(plan.steps().len(), 2);
/// assert_eq!(plan.fixed_size(), Some(3 * 8 + 1));
/// ```
pub struct PlanBuilder {
    record: &'static str,
    // Field names from the record to the field being planned.
    path: Vec<&'static str>,
}

impl PlanBuilder {
    /// Builds the plan of `T`.
    #[inline]
    pub fn build<T: Typed>() -> Result<FramePlan, PlanError> {
        Self::build_info(T::type_info())
    }

    /// Builds the plan of the record type described by `info`.
    pub fn build_info(info: &'static TypeInfo) -> Result<FramePlan, PlanError> {
        let record = info.type_path();
        let composite = info.as_composite().map_err(|err| PlanError::NotARecord {
            record,
            kind: err.received,
        })?;

        let mut builder = Self {
            record,
            path: Vec::new(),
        };
        let steps = builder.composite_steps(composite)?;

        Ok(FramePlan::new(
            *info.ty(),
            steps,
            FrameHeader::from_info(composite),
        ))
    }

    fn composite_steps(&mut self, info: &'static CompositeInfo) -> Result<Box<[PlanStep]>, PlanError> {
        info.active_fields()
            .map(|field| {
                self.path.push(field.name());
                let op = self.field_op(field);
                self.path.pop();
                Ok(PlanStep::new(field.name(), field.accessor(), op?))
            })
            .collect()
    }

    fn field_op(&mut self, field: &FieldInfo) -> Result<WriteOp, PlanError> {
        let info = field.type_info();

        if let Some(TypeInfo::Enum(info)) = info {
            return Ok(WriteOp::EnumAsWideInt {
                to_wide: info.widener(),
            });
        }

        if let Some(conversion) = field.conversion() {
            return Ok(WriteOp::Custom(*conversion));
        }

        match info {
            Some(info) => self.type_op(info),
            None => Err(self.unsupported(field.type_name())),
        }
    }

    fn type_op(&mut self, info: &'static TypeInfo) -> Result<WriteOp, PlanError> {
        match info {
            TypeInfo::Primitive(info) => Ok(WriteOp::Primitive {
                width: info.width(),
                encode: info.encoder(),
            }),
            TypeInfo::Enum(info) => Ok(WriteOp::EnumAsWideInt {
                to_wide: info.widener(),
            }),
            TypeInfo::Array(info) => self.array_op(info),
            TypeInfo::Composite(info) => Ok(WriteOp::Composite(self.nested_steps(info)?)),
            TypeInfo::Opaque(info) => Err(self.unsupported(info.type_name())),
        }
    }

    // A nested composite must write something, an empty one is
    // most likely a type that lost its fields to `#[frame(ignore)]`.
    fn nested_steps(&mut self, info: &'static CompositeInfo) -> Result<Box<[PlanStep]>, PlanError> {
        if info.active_fields().next().is_none() {
            return Err(self.unsupported(info.type_name()));
        }
        self.composite_steps(info)
    }

    fn array_op(&mut self, info: &'static ArrayInfo) -> Result<WriteOp, PlanError> {
        let mut dims = Vec::new();
        let mut items = Vec::new();
        let mut current = info;

        let leaf = loop {
            dims.push(current.len());
            items.push(current.item_accessor());
            match current.item_info() {
                TypeInfo::Array(inner) => current = inner,
                leaf => break leaf,
            }
        };

        let element = match leaf {
            TypeInfo::Primitive(leaf) => LeafEncoder::Primitive {
                width: leaf.width(),
                encode: leaf.encoder(),
            },
            TypeInfo::Enum(leaf) => LeafEncoder::WideEnum {
                to_wide: leaf.widener(),
            },
            TypeInfo::Composite(leaf) => {
                // Innermost level writes the composite, each outer level
                // writes the level below it through an identity step.
                let innermost = dims.len() - 1;
                let mut op = WriteOp::ArrayOfComposite {
                    len: dims[innermost],
                    item: items[innermost],
                    element: self.nested_steps(leaf)?,
                };
                for level in (0..innermost).rev() {
                    op = WriteOp::ArrayOfComposite {
                        len: dims[level],
                        item: items[level],
                        element: Box::new([PlanStep::new("", identity, op)]),
                    };
                }
                return Ok(op);
            }
            TypeInfo::Array(_) | TypeInfo::Opaque(_) => {
                return Err(self.unsupported(info.type_name()));
            }
        };

        Ok(WriteOp::ArrayOfPrimitive {
            element,
            dims: dims.into_boxed_slice(),
            items: items.into_boxed_slice(),
        })
    }

    fn unsupported(&self, field_type: &'static str) -> PlanError {
        PlanError::UnsupportedType {
            record: self.record,
            field: self.path.join("."),
            field_type,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::PlanBuilder;
    use crate::derive::Frame;
    use crate::info::FrameKind;
    use crate::plan::{LeafEncoder, PlanError, WriteOp};

    #[derive(Frame)]
    #[repr(u8)]
    enum Level {
        Low = 1,
        High = 3,
    }

    #[derive(Frame)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Frame)]
    struct Nothing {
        #[frame(ignore)]
        _note: String,
    }

    fn sum(point: &Point) -> Vec<u8> {
        (point.x + point.y).to_le_bytes().to_vec()
    }

    #[derive(Frame)]
    struct Everything {
        level: Level,
        #[frame(with = sum)]
        custom: Point,
        count: u16,
        grid: [[u8; 3]; 2],
        levels: [Level; 2],
        points: [Point; 3],
        rows: [[Point; 2]; 2],
        center: Point,
    }

    #[derive(Frame)]
    struct WithText {
        id: u32,
        name: String,
    }

    #[derive(Frame)]
    struct WithEmpty {
        id: u32,
        inner: Nothing,
    }

    #[derive(Frame)]
    struct WithTextArray {
        names: [String; 2],
    }

    #[test]
    fn op_priority() {
        let plan = PlanBuilder::build::<Everything>().unwrap();
        let ops: Vec<_> = plan.steps().iter().map(|step| step.op()).collect();

        assert!(matches!(ops[0], WriteOp::EnumAsWideInt { .. }));
        assert!(matches!(ops[1], WriteOp::Custom(c) if c.path() == "sum"));
        assert!(matches!(ops[2], WriteOp::Primitive { width: 2, .. }));
        assert!(matches!(
            ops[3],
            WriteOp::ArrayOfPrimitive { element: LeafEncoder::Primitive { width: 1, .. }, dims, .. }
                if **dims == [2, 3]
        ));
        assert!(matches!(
            ops[4],
            WriteOp::ArrayOfPrimitive { element: LeafEncoder::WideEnum { .. }, dims, .. }
                if **dims == [2]
        ));
        assert!(matches!(ops[5], WriteOp::ArrayOfComposite { len: 3, element, .. } if element.len() == 2));
        assert!(matches!(ops[6], WriteOp::ArrayOfComposite { len: 2, element, .. } if element.len() == 1));
        assert!(matches!(ops[7], WriteOp::Composite(steps) if steps.len() == 2));

    }

    #[test]
    fn fixed_size() {
        let plan = PlanBuilder::build::<Point>().unwrap();
        assert_eq!(plan.fixed_size(), Some(8));

        // custom conversions have no fixed size
        let plan = PlanBuilder::build::<Everything>().unwrap();
        assert_eq!(plan.fixed_size(), None);
        let sizes: Vec<_> = plan.steps().iter().map(|s| s.op().fixed_size()).collect();
        assert_eq!(
            sizes,
            [Some(8), None, Some(2), Some(6), Some(16), Some(24), Some(32), Some(8)]
        );
    }

    #[test]
    fn empty_record_is_allowed() {
        let plan = PlanBuilder::build::<Nothing>().unwrap();
        assert!(plan.steps().is_empty());
        assert_eq!(plan.fixed_size(), Some(0));
        assert!(plan.header().fields().is_empty());
    }

    #[test]
    fn unsupported_fields() {
        let err = PlanBuilder::build::<WithText>().unwrap_err();
        assert!(matches!(
            &err,
            PlanError::UnsupportedType { field, field_type: "String", .. } if field == "name"
        ));
        assert!(err.to_string().contains("`name`"));

        let err = PlanBuilder::build::<WithEmpty>().unwrap_err();
        assert!(matches!(
            &err,
            PlanError::UnsupportedType { field, field_type: "Nothing", .. } if field == "inner"
        ));

        let err = PlanBuilder::build::<WithTextArray>().unwrap_err();
        assert!(matches!(
            &err,
            PlanError::UnsupportedType { field_type: "[String; 2]", .. }
        ));
    }

    #[test]
    fn not_a_record() {
        let err = PlanBuilder::build::<[u8; 4]>().unwrap_err();
        assert_eq!(
            err,
            PlanError::NotARecord {
                record: "[u8; 4]",
                kind: FrameKind::Array,
            }
        );
    }
}
