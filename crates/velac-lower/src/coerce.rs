//! The coercion algebra: the fixed set of implicit conversions applied
//! wherever two values, or a value and a target type, meet.
//!
//! Two entry points cover the two shapes this takes in the language:
//! [`coerce_to_common`] finds a common type for a binary/comparison pair,
//! and [`coerce_to_target`] additionally truncates when coercing an
//! argument or return value into a narrower declared type.

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::types::BasicType;
use inkwell::values::BasicValueEnum;

use crate::types::{scalar_to_basic, ScalarType, SurfaceType};

fn scalar_of(ty: &SurfaceType) -> ScalarType {
    match ty {
        SurfaceType::Scalar(s) => *s,
        SurfaceType::Array(..) => unreachable!("arrays never participate in scalar coercion"),
    }
}

/// Widens `value` (known integer, of `src`'s width) to `target`'s width.
/// A 1-bit source is zero-extended rather than sign-extended: a boolean
/// carries no negative semantics, so sign-extending its `true` bit
/// pattern would incorrectly produce -1.
fn extend_int<'ctx>(
    ctx: &'ctx Context,
    builder: &Builder<'ctx>,
    value: BasicValueEnum<'ctx>,
    src: &SurfaceType,
    target: &SurfaceType,
) -> Option<BasicValueEnum<'ctx>> {
    let target_ty = scalar_to_basic(scalar_of(target), ctx).into_int_type();
    let int_val = value.into_int_value();
    let widened = if src.int_width() == Some(1) {
        builder.build_int_z_extend(int_val, target_ty, "zext")
    } else {
        builder.build_int_s_extend(int_val, target_ty, "sext")
    };
    Some(widened.ok()?.into())
}

fn int_to_float<'ctx>(
    ctx: &'ctx Context,
    builder: &Builder<'ctx>,
    value: BasicValueEnum<'ctx>,
) -> Option<BasicValueEnum<'ctx>> {
    let float_ty = ctx.f32_type();
    Some(builder.build_signed_int_to_float(value.into_int_value(), float_ty, "sitofp").ok()?.into())
}

/// Finds a common type for a binary or comparison operand pair and
/// converts both sides to it. Returns `None` for any combination the
/// algebra does not define (e.g. a string operand).
pub fn coerce_to_common<'ctx>(
    ctx: &'ctx Context,
    builder: &Builder<'ctx>,
    left: (BasicValueEnum<'ctx>, SurfaceType),
    right: (BasicValueEnum<'ctx>, SurfaceType),
) -> Option<((BasicValueEnum<'ctx>, SurfaceType), (BasicValueEnum<'ctx>, SurfaceType))> {
    let (lval, lty) = left;
    let (rval, rty) = right;

    if lty == rty {
        return Some(((lval, lty.clone()), (rval, rty)));
    }

    if lty.is_float() && rty.is_integer() {
        let rval = int_to_float(ctx, builder, rval)?;
        return Some(((lval, lty.clone()), (rval, lty)));
    }
    if rty.is_float() && lty.is_integer() {
        let lval = int_to_float(ctx, builder, lval)?;
        return Some(((lval, rty.clone()), (rval, rty)));
    }

    if lty.is_integer() && rty.is_integer() {
        let lw = lty.int_width().unwrap();
        let rw = rty.int_width().unwrap();
        return if lw < rw {
            let lval = extend_int(ctx, builder, lval, &lty, &rty)?;
            Some(((lval, rty.clone()), (rval, rty)))
        } else if rw < lw {
            let rval = extend_int(ctx, builder, rval, &rty, &lty)?;
            Some(((lval, lty.clone()), (rval, lty)))
        } else {
            Some(((lval, lty.clone()), (rval, lty)))
        };
    }

    None
}

/// Coerces `value` into `target`, as at a call argument, return, or
/// initializer site. Unlike [`coerce_to_common`] this also truncates a
/// wider integer down to a narrower target, and converts float to signed
/// integer when the target is integer.
pub fn coerce_to_target<'ctx>(
    ctx: &'ctx Context,
    builder: &Builder<'ctx>,
    value: (BasicValueEnum<'ctx>, SurfaceType),
    target: &SurfaceType,
) -> Option<BasicValueEnum<'ctx>> {
    let (val, ty) = value;
    if &ty == target {
        return Some(val);
    }

    if ty.is_float() && target.is_integer() {
        let int_ty = scalar_to_basic(scalar_of(target), ctx).into_int_type();
        return Some(builder.build_float_to_signed_int(val.into_float_value(), int_ty, "fptosi").ok()?.into());
    }
    if ty.is_integer() && target.is_float() {
        return int_to_float(ctx, builder, val);
    }
    if ty.is_integer() && target.is_integer() {
        let sw = ty.int_width().unwrap();
        let tw = target.int_width().unwrap();
        return if sw == tw {
            Some(val)
        } else if sw < tw {
            extend_int(ctx, builder, val, &ty, target)
        } else {
            let int_ty = scalar_to_basic(scalar_of(target), ctx).into_int_type();
            Some(builder.build_int_truncate(val.into_int_value(), int_ty, "trunc").ok()?.into())
        };
    }

    None
}
