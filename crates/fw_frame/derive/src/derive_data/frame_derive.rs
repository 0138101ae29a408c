use syn::{Data, DeriveInput};

use super::{FrameEnum, FrameMeta, FrameStruct, TypeAttributes};

/// The parsed input of `#[derive(Frame)]`.
pub(crate) enum FrameDerive<'a> {
    Struct(FrameStruct<'a>),
    Enum(FrameEnum<'a>),
    Opaque(FrameMeta<'a>),
}

impl<'a> FrameDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse(&input.attrs)?;
        let is_opaque = attrs.opaque.is_some();
        let meta = FrameMeta::new(attrs, input);

        if is_opaque {
            return Ok(Self::Opaque(meta));
        }

        match &input.data {
            Data::Struct(data) => FrameStruct::new(meta, &data.fields).map(Self::Struct),
            Data::Enum(data) => FrameEnum::new(meta, &input.attrs, &data.variants).map(Self::Enum),
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "unions cannot derive `Frame`, mark the type `#[frame(opaque)]` instead",
            )),
        }
    }
}
