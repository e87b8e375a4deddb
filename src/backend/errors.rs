//! Define error types for op class generation.
//!
//! These errors are *generation-time* failures: the schema view is valid JSON and passes the loader's shape checks,
//! but still describes something the emission rules cannot produce code for.
//!
//! ## Notes
//!
//! - Every variant is fatal. The batch functions render into a scratch buffer, so an error means nothing was
//!   written to the caller's sink.
//! - Runtime checks in the generated `verify()` (missing attribute, failed constraint) are output text, not errors
//!   here.

use miette::Diagnostic;
use opgen_schema::Operator;
use thiserror::Error;

/// Error while generating C++ for an op.
#[derive(Debug, Error, Diagnostic)]
pub enum GenError {
    /// Two mutually exclusive traits are declared on one op.
    #[error("op `{op}`{}: {message}", at(.loc))]
    #[diagnostic(
        code(opgen::gen::contradiction),
        help("declare at most one of `SameOperandsAndResultType` and `FirstAttrDerivedResultType`")
    )]
    SchemaContradiction {
        op: String,
        loc: Option<String>,
        message: String,
    },

    /// The op's arguments, operands and attributes do not fit together.
    #[error("op `{op}`{}: {message}", at(.loc))]
    #[diagnostic(code(opgen::gen::shape))]
    SchemaShape {
        op: String,
        loc: Option<String>,
        message: String,
    },

    #[error("failed to write generated output")]
    #[diagnostic(code(opgen::gen::write))]
    Fmt(#[from] std::fmt::Error),
}

impl GenError {
    pub fn contradiction(op: &Operator, message: impl Into<String>) -> Self {
        GenError::SchemaContradiction {
            op: op.def_name.clone(),
            loc: op.loc.clone(),
            message: message.into(),
        }
    }

    pub fn shape(op: &Operator, message: impl Into<String>) -> Self {
        GenError::SchemaShape {
            op: op.def_name.clone(),
            loc: op.loc.clone(),
            message: message.into(),
        }
    }
}

fn at(loc: &Option<String>) -> String {
    loc.as_deref().map(|l| format!(" ({l})")).unwrap_or_default()
}
