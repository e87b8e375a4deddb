#![forbid(unsafe_code)]
//! opgen: operation definition generator
//!
//! Users describe IR operations once, as data (operands, results, attributes, traits and small user code
//! fragments). opgen turns each description into a C++ op class: a declaration for the dialect header and the
//! matching method definitions for the implementation file.
//!
//! This crate provides the emission backend and the CLI. The schema view and its JSON loader live in
//! `opgen_schema`; placeholder templates and the trait vocabulary live in `opgen_core`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: The backend emits C++ `assert(...)` calls as *string literals*. These are output text, not
//!   checks performed by the generator.
//!
//! ## Examples
//! ```rust
//! use opgen::backend::{EmitConfig, emit_op_decls};
//! use opgen_schema::RecordSet;
//!
//! let records = RecordSet::from_json_str(r#"{ "ops": [ { "def": "Toy_ConstantOp", "opName": "toy.constant" } ] }"#, "toy.json")
//!     .unwrap();
//! let mut out = String::new();
//! emit_op_decls(&records.ops, &EmitConfig::new().with_file_header(false), &mut out).unwrap();
//! assert!(out.contains("class ConstantOp : public Op<ConstantOp, OpTrait::ZeroResult, OpTrait::NOperands<0>::Impl>"));
//! ```

pub mod backend;
pub mod cli;

pub use backend::{EmitConfig, GenError, GenRegistry, OpClass};
pub use opgen_schema::{Operator, RecordSet, SchemaError};
