//! Provide shared, pure helpers and canonical vocabulary for the opgen operation generator.
//!
//! This crate is intentionally small and dependency-light. It contains deterministic helpers that both the schema
//! loader and the emission backend rely on:
//! - [`fmt`]: placeholder-template substitution (`$_self`, `$_builder`, `$_op`, `$0`..`$9`)
//! - [`traits`]: the registry of trait tags the emission engine synthesizes or inspects
//!
//! ## Notes
//!
//! - No IO, no global state, and no schema or backend types live here.
//!
//! ## Examples
//! ```rust
//! use opgen_core::fmt::{FmtContext, tgfmt};
//! use opgen_core::traits::{self, TraitId};
//!
//! let ctx = FmtContext::new().with_self("attr");
//! assert_eq!(tgfmt("$_self.getValue()", &ctx, &[]), "attr.getValue()");
//! assert_eq!(traits::render(TraitId::NOperands, Some(2)), "NOperands<2>::Impl");
//! ```

pub mod fmt;
pub mod traits;
