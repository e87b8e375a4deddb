//! Per-op emission: run the generation rules over one schema view and produce an [`OpClass`].
//!
//! The rules run in a fixed order, which is also the order methods appear in the generated class:
//!
//! 1. trait synthesis ([`traits`])
//! 2. operation name, operand, result and attribute accessors ([`accessors`])
//! 3. `build` overloads ([`builders`])
//! 4. parser and printer hookup ([`hooks`])
//! 5. `verify` ([`verifier`])
//! 6. canonicalizer and folder declarations ([`hooks`])
//!
//! ## Notes
//! - Each rule only appends to the class being built. The first error aborts the op.
//! - Views are re-validated before any rule runs, since [`Operator`] can be built without the loader.

use std::fmt::Write;

use opgen_schema::Operator;

use super::class_emitter::{OpClass, OpClassBuilder};
use super::errors::GenError;

pub mod accessors;
pub mod builders;
pub mod hooks;
pub mod traits;
pub mod verifier;

type Rule = fn(&Operator, &mut OpClassBuilder) -> Result<(), GenError>;

/// Generation rules in emission order.
const RULES: &[(&str, Rule)] = &[
    ("traits", traits::gen_traits),
    ("op_name", accessors::gen_op_name_getter),
    ("operands", accessors::gen_operand_getters),
    ("results", accessors::gen_result_getters),
    ("attributes", accessors::gen_attr_getters),
    ("builders", builders::gen_builders),
    ("parser", hooks::gen_parser),
    ("printer", hooks::gen_printer),
    ("verifier", verifier::gen_verifier),
    ("canonicalizer", hooks::gen_canonicalizer_decls),
    ("folders", hooks::gen_folder_decls),
];

/// Build the finished class for one op.
#[tracing::instrument(skip_all, fields(op = %op.def_name))]
pub fn build_op_class(op: &Operator) -> Result<OpClass, GenError> {
    op.validate().map_err(|message| GenError::shape(op, message))?;

    let mut class = OpClassBuilder::new(op.cpp_class_name());
    for (rule, generate) in RULES {
        tracing::trace!(rule, "running generation rule");
        generate(op, &mut class)?;
    }
    Ok(class.finish())
}

/// Write the class declaration for one op.
pub fn emit_decl<W: Write + ?Sized>(op: &Operator, out: &mut W) -> Result<(), GenError> {
    build_op_class(op)?.write_decl(out)?;
    Ok(())
}

/// Write the method definitions for one op.
pub fn emit_def<W: Write + ?Sized>(op: &Operator, out: &mut W) -> Result<(), GenError> {
    build_op_class(op)?.write_def(out)?;
    Ok(())
}
