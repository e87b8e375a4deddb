//! Operation schema view for the opgen generator: the read-only description of each op plus the JSON record store
//! that produces it.
//!
//! ## Notes
//! - This crate is "schema-only": it validates shape invariants (variadic position, argument references, unique
//!   definition names) but knows nothing about emission.
//! - Trait identity for the tags the engine inspects comes from `opgen_core::traits`.
//!
//! ## Examples
//! ```rust
//! use opgen_schema::RecordSet;
//!
//! let records = RecordSet::from_json_str(
//!     r#"{ "ops": [ { "def": "AddOp", "opName": "add", "arguments": [{ "operand": {} }, { "operand": {} }], "results": [{}] } ] }"#,
//!     "ops.json",
//! )
//! .unwrap();
//! assert_eq!(records.ops[0].num_operands(), 2);
//! ```

pub mod errors;
pub mod loader;
pub mod view;

pub use errors::SchemaError;
pub use loader::RecordSet;
pub use view::{
    Argument, Arity, AttrKind, Attribute, CustomBuilder, NamedAttribute, NamedTypeConstraint, OpTrait, Operator,
    TypeConstraint,
};
