//! Trait synthesis: result arity, operand arity, then the schema's native traits.

use opgen_core::traits::{self as vocab, TraitId};
use opgen_schema::{Arity, Operator};

use crate::backend::class_emitter::OpClassBuilder;
use crate::backend::errors::GenError;

/// Trait tag (without the `OpTrait::` prefix) encoding the result count.
pub fn result_arity_trait(arity: Arity) -> String {
    match arity {
        Arity::Fixed(0) => vocab::render(TraitId::ZeroResult, None),
        Arity::Fixed(1) => vocab::render(TraitId::OneResult, None),
        Arity::Fixed(n) => vocab::render(TraitId::NResults, Some(n)),
        Arity::VariadicLast { fixed_prefix: 0 } => vocab::render(TraitId::VariadicResults, None),
        Arity::VariadicLast { fixed_prefix } => vocab::render(TraitId::AtLeastNResults, Some(fixed_prefix)),
    }
}

/// Trait tag (without the `OpTrait::` prefix) encoding the operand count.
pub fn operand_arity_trait(arity: Arity) -> String {
    match arity {
        Arity::Fixed(n) => vocab::render(TraitId::NOperands, Some(n)),
        Arity::VariadicLast { fixed_prefix: 0 } => vocab::render(TraitId::VariadicOperands, None),
        Arity::VariadicLast { fixed_prefix } => vocab::render(TraitId::AtLeastNOperands, Some(fixed_prefix)),
    }
}

pub fn gen_traits(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    let results = result_arity_trait(op.result_arity());
    let operands = operand_arity_trait(op.operand_arity());
    tracing::debug!(%results, %operands, "synthesized arity traits");

    class.add_trait(results);
    class.add_trait(operands);
    for (name, arity) in op.native_traits() {
        class.add_trait(vocab::render_named(name, arity));
    }
    Ok(())
}
