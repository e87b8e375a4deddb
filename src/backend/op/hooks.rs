//! Hookup for user code: parser, printer, canonicalizer and folder declarations.

use std::fmt::Write;

use opgen_schema::Operator;

use crate::backend::class_emitter::{MethodScope, MethodSignature, OpClassBuilder};
use crate::backend::errors::GenError;

/// Trim a user fragment, warning when it is present but blank.
pub(crate) fn fragment<'a>(op: &Operator, kind: &str, code: Option<&'a str>) -> Option<&'a str> {
    let code = code?;
    let trimmed = code.trim();
    if trimmed.is_empty() {
        tracing::warn!(op = %op.def_name, kind, "blank code fragment ignored");
        return None;
    }
    Some(trimmed)
}

pub fn gen_parser(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    let Some(parser) = fragment(op, "parser", op.parser.as_deref()) else {
        return Ok(());
    };
    let body = class.new_method(
        MethodSignature::new("bool", "parse", "OpAsmParser *parser, OperationState *result"),
        MethodScope::Static,
    );
    write!(body, "  {parser}")?;
    Ok(())
}

pub fn gen_printer(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    let Some(printer) = fragment(op, "printer", op.printer.as_deref()) else {
        return Ok(());
    };
    let body = class.new_method(
        MethodSignature::new("void", "print", "OpAsmPrinter *p"),
        MethodScope::Instance,
    );
    write!(body, "  {printer}")?;
    Ok(())
}

pub fn gen_canonicalizer_decls(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    if op.has_canonicalizer {
        class.declare_method(
            MethodSignature::new(
                "void",
                "getCanonicalizationPatterns",
                "OwningRewritePatternList &results, MLIRContext *context",
            ),
            MethodScope::Static,
        );
    }
    Ok(())
}

/// Single-result ops fold to one value; others fill a results vector.
pub fn gen_folder_decls(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    let single_result = op.num_results() == 1;

    if op.has_constant_folder {
        let signature = if single_result {
            MethodSignature::new(
                "Attribute",
                "constantFold",
                "ArrayRef<Attribute> operands, MLIRContext *context",
            )
        } else {
            MethodSignature::new(
                "LogicalResult",
                "constantFold",
                "ArrayRef<Attribute> operands, SmallVectorImpl<Attribute> &results, MLIRContext *context",
            )
        };
        class.declare_method(signature, MethodScope::Instance);
    }

    if op.has_folder {
        let signature = if single_result {
            MethodSignature::new("Value *", "fold", "")
        } else {
            MethodSignature::new("bool", "fold", "SmallVectorImpl<Value *> &results")
        };
        class.declare_method(signature, MethodScope::Instance);
    }
    Ok(())
}
