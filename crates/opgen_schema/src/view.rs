//! Strongly-typed, read-only view of one operation definition.
//!
//! Values here are produced by the [`loader`](crate::loader) and consumed by the emission backend. Shape-dependent
//! behavior is expressed as closed enums ([`Arity`], [`AttrKind`], [`OpTrait`], [`Argument`]) so every consumer
//! matches exhaustively instead of probing flags.

/// Positional shape of an operand or result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// `n` fixed entries, none variadic.
    Fixed(usize),
    /// `fixed_prefix` fixed entries followed by one variadic entry.
    VariadicLast { fixed_prefix: usize },
}

impl Arity {
    /// Compute the arity of a value list. Assumes the variadic-last invariant holds.
    pub fn of(values: &[NamedTypeConstraint]) -> Self {
        match values.last() {
            Some(last) if last.variadic => Arity::VariadicLast {
                fixed_prefix: values.len() - 1,
            },
            _ => Arity::Fixed(values.len()),
        }
    }

    /// Number of non-variadic entries.
    pub fn fixed_count(self) -> usize {
        match self {
            Arity::Fixed(n) => n,
            Arity::VariadicLast { fixed_prefix } => fixed_prefix,
        }
    }

    pub fn is_variadic(self) -> bool {
        matches!(self, Arity::VariadicLast { .. })
    }
}

/// A type constraint on an operand or result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeConstraint {
    /// Condition template over `$_self` (the value's type). `None` means unconstrained.
    pub condition: Option<String>,
    pub description: String,
}

/// An operand or result: optional name, constraint, and variadic flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedTypeConstraint {
    pub name: Option<String>,
    pub constraint: TypeConstraint,
    pub variadic: bool,
}

impl NamedTypeConstraint {
    pub fn has_predicate(&self) -> bool {
        self.constraint.condition.is_some()
    }

    /// The declared name, if non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Whether an attribute is computed or stored, and how a stored one behaves when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrKind {
    /// Computed by user code; never stored on the op.
    Derived { body: String },
    /// Stored in the op's attribute dictionary.
    Stored { default: Option<String>, optional: bool },
}

/// An attribute constraint with its storage/return types and snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub storage_type: String,
    pub return_type: String,
    /// Template over `$_self` (the storage value) producing the return value.
    pub convert_from_storage: String,
    /// Template over `$_builder` and `$0` (the default value) producing a storage value.
    pub const_builder: Option<String>,
    /// Condition template over `$_self` (the storage value).
    pub predicate: Option<String>,
    pub description: String,
    /// Whether the stored value is itself a type.
    pub is_type_attr: bool,
    pub kind: AttrKind,
}

impl Attribute {
    pub fn is_derived(&self) -> bool {
        matches!(self.kind, AttrKind::Derived { .. })
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.kind, AttrKind::Stored { optional: true, .. })
    }

    pub fn default_value(&self) -> Option<&str> {
        match &self.kind {
            AttrKind::Stored { default, .. } => default.as_deref(),
            AttrKind::Derived { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAttribute {
    pub name: String,
    pub attr: Attribute,
}

/// One entry of the op's interleaved argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    /// Index into [`Operator::operands`].
    Operand(usize),
    /// Index into [`Operator::attributes`].
    Attribute(usize),
}

/// A trait attached to an op in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpTrait {
    /// A named tag, optionally parameterized by an arity.
    Native { name: String, arity: Option<usize> },
    /// A free-form predicate over `$_op`, verified at runtime.
    Pred { condition: String, description: String },
}

/// A user-supplied `build` overload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomBuilder {
    pub params: String,
    /// Empty body means declaration-only.
    pub body: String,
}

/// Read-only view of one operation definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operator {
    /// Record name, e.g. `Std_AddOp`.
    pub def_name: String,
    /// Fully-qualified operation name, e.g. `std.add`.
    pub op_name: String,
    /// Source location for diagnostics.
    pub loc: Option<String>,
    pub operands: Vec<NamedTypeConstraint>,
    pub results: Vec<NamedTypeConstraint>,
    /// Argument attributes in argument order, then derived attributes.
    pub attributes: Vec<NamedAttribute>,
    /// Interleaved operand/attribute order as declared.
    pub args: Vec<Argument>,
    pub traits: Vec<OpTrait>,
    pub builders: Vec<CustomBuilder>,
    pub parser: Option<String>,
    pub printer: Option<String>,
    pub verifier: Option<String>,
    pub has_canonicalizer: bool,
    pub has_constant_folder: bool,
    pub has_folder: bool,
}

impl Operator {
    /// Class name: the last `_`-separated segment of the record name.
    pub fn cpp_class_name(&self) -> &str {
        self.def_name
            .rsplit('_')
            .find(|s| !s.is_empty())
            .unwrap_or(&self.def_name)
    }

    /// Namespace-qualified class name: `_` segments of the record name joined with `::`.
    pub fn qual_cpp_class_name(&self) -> String {
        let segments: Vec<&str> = self.def_name.split('_').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            self.def_name.clone()
        } else {
            segments.join("::")
        }
    }

    pub fn operation_name(&self) -> &str {
        &self.op_name
    }

    pub fn num_operands(&self) -> usize {
        self.operands.len()
    }

    pub fn num_results(&self) -> usize {
        self.results.len()
    }

    pub fn num_args(&self) -> usize {
        self.args.len()
    }

    pub fn operand_arity(&self) -> Arity {
        Arity::of(&self.operands)
    }

    pub fn result_arity(&self) -> Arity {
        Arity::of(&self.results)
    }

    pub fn has_variadic_operand(&self) -> bool {
        self.operand_arity().is_variadic()
    }

    pub fn has_variadic_result(&self) -> bool {
        self.result_arity().is_variadic()
    }

    /// Whether a native trait with this exact name is declared.
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits
            .iter()
            .any(|t| matches!(t, OpTrait::Native { name: n, .. } if n == name))
    }

    /// Declared native traits in schema order, as `(name, arity)`.
    pub fn native_traits(&self) -> impl Iterator<Item = (&str, Option<usize>)> {
        self.traits.iter().filter_map(|t| match t {
            OpTrait::Native { name, arity } => Some((name.as_str(), *arity)),
            OpTrait::Pred { .. } => None,
        })
    }

    /// Declared trait predicates in schema order, as `(condition, description)`.
    pub fn pred_traits(&self) -> impl Iterator<Item = (&str, &str)> {
        self.traits.iter().filter_map(|t| match t {
            OpTrait::Pred { condition, description } => Some((condition.as_str(), description.as_str())),
            OpTrait::Native { .. } => None,
        })
    }

    pub fn num_pred_traits(&self) -> usize {
        self.pred_traits().count()
    }

    /// Check the shape invariants the emission engine relies on.
    ///
    /// Returns a human-readable message describing the first violation.
    pub fn validate(&self) -> Result<(), String> {
        check_variadic_last(&self.operands, "operand")?;
        check_variadic_last(&self.results, "result")?;

        let mut next_operand = 0;
        for arg in &self.args {
            match *arg {
                Argument::Operand(i) => {
                    if i != next_operand || i >= self.operands.len() {
                        return Err(format!(
                            "argument list refers to operand #{} but operand #{} was expected",
                            i, next_operand
                        ));
                    }
                    next_operand += 1;
                }
                Argument::Attribute(i) => match self.attributes.get(i) {
                    Some(named) if named.attr.is_derived() => {
                        return Err(format!(
                            "derived attribute '{}' cannot appear in the argument list",
                            named.name
                        ));
                    }
                    Some(_) => {}
                    None => return Err(format!("argument list refers to unknown attribute #{}", i)),
                },
            }
        }
        if next_operand != self.operands.len() {
            return Err(format!(
                "{} operand(s) declared but only {} listed as arguments",
                self.operands.len(),
                next_operand
            ));
        }
        Ok(())
    }
}

fn check_variadic_last(values: &[NamedTypeConstraint], what: &str) -> Result<(), String> {
    let count = values.len();
    match values.iter().position(|v| v.variadic) {
        Some(i) if i + 1 != count => Err(format!("only the last {} can be variadic (#{} is variadic)", what, i)),
        _ => Ok(()),
    }
}
