//! Op trait vocabulary.
//!
//! This registry defines the canonical set of trait tags the emission engine synthesizes (arity tags) or inspects
//! (result-type deduction tags). Callers should avoid hard-coding trait strings and instead use [`TraitId`] for
//! identity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Parameterized tags render as `Name<N>::Impl`; see [`render`].
//! - Schema-declared traits outside this registry are still legal: they are passed through by name.

/// Stable identifier for a trait tag known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraitId {
    ZeroResult,
    OneResult,
    NResults,
    AtLeastNResults,
    VariadicResults,
    NOperands,
    AtLeastNOperands,
    VariadicOperands,
    SameOperandsAndResultType,
    FirstAttrDerivedResultType,
}

/// What the engine does with a trait tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraitRole {
    /// Synthesized from the result list.
    ResultArity,
    /// Synthesized from the operand list.
    OperandArity,
    /// Declared in the schema; enables the deduced-result-type builder.
    ResultTypeDeduction,
}

/// Metadata for a trait tag.
#[derive(Debug, Clone, Copy)]
pub struct TraitInfo {
    pub id: TraitId,
    pub canonical: &'static str,
    pub description: &'static str,
    pub role: TraitRole,
    /// Whether the tag takes an arity parameter (`Name<N>::Impl`).
    pub parameterized: bool,
}

/// Registry of trait tags.
pub const TRAITS: &[TraitInfo] = &[
    info(TraitId::ZeroResult, "ZeroResult", "Op produces no results.", TraitRole::ResultArity, false),
    info(TraitId::OneResult, "OneResult", "Op produces exactly one result.", TraitRole::ResultArity, false),
    info(
        TraitId::NResults,
        "NResults",
        "Op produces a fixed number (>= 2) of results.",
        TraitRole::ResultArity,
        true,
    ),
    info(
        TraitId::AtLeastNResults,
        "AtLeastNResults",
        "Op produces a fixed prefix of results followed by a variadic tail.",
        TraitRole::ResultArity,
        true,
    ),
    info(
        TraitId::VariadicResults,
        "VariadicResults",
        "Op produces only a variadic list of results.",
        TraitRole::ResultArity,
        false,
    ),
    info(
        TraitId::NOperands,
        "NOperands",
        "Op consumes a fixed number of operands.",
        TraitRole::OperandArity,
        true,
    ),
    info(
        TraitId::AtLeastNOperands,
        "AtLeastNOperands",
        "Op consumes a fixed prefix of operands followed by a variadic tail.",
        TraitRole::OperandArity,
        true,
    ),
    info(
        TraitId::VariadicOperands,
        "VariadicOperands",
        "Op consumes only a variadic list of operands.",
        TraitRole::OperandArity,
        false,
    ),
    info(
        TraitId::SameOperandsAndResultType,
        "SameOperandsAndResultType",
        "All results share the type of the first operand.",
        TraitRole::ResultTypeDeduction,
        false,
    ),
    info(
        TraitId::FirstAttrDerivedResultType,
        "FirstAttrDerivedResultType",
        "All results take their type from the first attribute.",
        TraitRole::ResultTypeDeduction,
        false,
    ),
];

/// Resolve a spelling to a trait identifier.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(name: &str) -> Option<TraitId> {
    TRAITS.iter().find(|t| t.canonical == name).map(|t| t.id)
}

/// Return the canonical spelling for a trait tag.
pub fn as_str(id: TraitId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a trait tag.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: TraitId) -> &'static TraitInfo {
    TRAITS.iter().find(|t| t.id == id).expect("trait info missing")
}

/// Render a tag with its optional arity parameter.
///
/// Parameterized tags render as `Name<N>::Impl`; other tags render as their bare name and ignore `arity`.
pub fn render(id: TraitId, arity: Option<usize>) -> String {
    let info = info_for(id);
    match arity {
        Some(n) if info.parameterized => format!("{}<{}>::Impl", info.canonical, n),
        _ => info.canonical.to_string(),
    }
}

/// Render a schema-declared trait name with an optional arity parameter.
///
/// Unlike [`render`], this accepts names outside the registry.
pub fn render_named(name: &str, arity: Option<usize>) -> String {
    match arity {
        Some(n) => format!("{}<{}>::Impl", name, n),
        None => name.to_string(),
    }
}

const fn info(
    id: TraitId,
    canonical: &'static str,
    description: &'static str,
    role: TraitRole,
    parameterized: bool,
) -> TraitInfo {
    TraitInfo {
        id,
        canonical,
        description,
        role,
        parameterized,
    }
}
