//! opgen backend: turn operation schema views into C++ op classes.
//!
//! The pipeline is:
//! 1. Schema view ([`opgen_schema::Operator`]) → generation rules ([`op`]) → [`OpClass`]
//! 2. [`OpClass`] → declaration view or definition view
//! 3. Batch functions ([`driver`]) frame every op's output with banners and `#ifdef` markers
//!
//! ## Module Organization
//!
//! - `class_emitter.rs` - Class/method/signature model and its two text views
//! - `params.rs` - Default-argument stripping for the definition view
//! - `op/` - Per-op generation rules, in emission order
//!   - `traits.rs` - Arity trait synthesis
//!   - `accessors.rs` - Name, operand, result and attribute getters
//!   - `builders.rs` - `build` overloads
//!   - `verifier.rs` - `verify()`
//!   - `hooks.rs` - Parser, printer, canonicalizer and folder hookup
//! - `driver.rs` - Batch functions and the generator registry
//! - `config.rs` - Output configuration
//! - `errors.rs` - Generation errors

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod class_emitter;
pub mod config;
pub mod driver;
pub mod errors;
pub mod op;
pub mod params;

pub use class_emitter::{MethodBody, MethodScope, MethodSignature, OpClass, OpClassBuilder, OpMethod};
pub use config::EmitConfig;
pub use driver::{GenRegistry, Generator, emit_op_decls, emit_op_defs};
pub use errors::GenError;
pub use op::{build_op_class, emit_decl, emit_def};
