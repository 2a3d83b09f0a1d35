//! Surface-to-IR type mapping (spec §4.3.1).
//!
//! [`SurfaceType`] is the type a declaration, parameter, or expression
//! carries through lowering. It wraps the parser's scalar [`Type`] and adds
//! the one compound form the language has: a fixed-size array of a scalar
//! element type.

use inkwell::context::Context;
use inkwell::types::{BasicType, BasicTypeEnum};
use inkwell::AddressSpace;

pub use velac_parse::Type as ScalarType;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceType {
    Scalar(ScalarType),
    Array(ScalarType, u32),
}

impl SurfaceType {
    pub fn is_float(&self) -> bool {
        matches!(self, SurfaceType::Scalar(ScalarType::Float))
    }

    /// True for every scalar integer representation: `int`, `bigint`,
    /// `char`, and `bool`.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            SurfaceType::Scalar(
                ScalarType::Int | ScalarType::BigInt | ScalarType::Char | ScalarType::Bool
            )
        )
    }

    /// Bit width of the integer representation, or `None` for non-integer
    /// types.
    pub fn int_width(&self) -> Option<u32> {
        match self {
            SurfaceType::Scalar(ScalarType::Int) => Some(32),
            SurfaceType::Scalar(ScalarType::BigInt) => Some(128),
            SurfaceType::Scalar(ScalarType::Char) => Some(8),
            SurfaceType::Scalar(ScalarType::Bool) => Some(1),
            _ => None,
        }
    }

    pub fn element_type(&self) -> Option<SurfaceType> {
        match self {
            SurfaceType::Array(elem, _) => Some(SurfaceType::Scalar(*elem)),
            SurfaceType::Scalar(_) => None,
        }
    }
}

/// Maps a scalar type to its LLVM representation. `void` has no value
/// representation and is handled separately at function return sites.
pub fn scalar_to_basic<'ctx>(ty: ScalarType, ctx: &'ctx Context) -> BasicTypeEnum<'ctx> {
    match ty {
        ScalarType::Int => ctx.i32_type().into(),
        ScalarType::BigInt => ctx.custom_width_int_type(128).into(),
        ScalarType::Float => ctx.f32_type().into(),
        ScalarType::Char => ctx.i8_type().into(),
        ScalarType::Bool => ctx.bool_type().into(),
        ScalarType::String => ctx.ptr_type(AddressSpace::default()).into(),
        ScalarType::Void => unreachable!("void has no value representation"),
    }
}

/// Maps a surface type (scalar or array) to its LLVM representation.
pub fn surface_to_basic<'ctx>(ty: &SurfaceType, ctx: &'ctx Context) -> BasicTypeEnum<'ctx> {
    match ty {
        SurfaceType::Scalar(s) => scalar_to_basic(*s, ctx),
        SurfaceType::Array(elem, size) => {
            scalar_to_basic(*elem, ctx).array_type(*size).into()
        },
    }
}
