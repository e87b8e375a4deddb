//! Class-shaped C++ output: a class name, its trait tags, and its methods.
//!
//! The generator writes declarations (`*.h.inc`) and definitions (`*.cpp.inc`) separately, so a method's
//! signature is kept apart from its body: the signature feeds both views, the body only the definition.
//!
//! ## Notes
//! - [`OpClassBuilder`] is append-only. [`OpClassBuilder::finish`] freezes it into an [`OpClass`], which can only be
//!   written out.
//! - Declaration-only methods ([`MethodBody::DeclOnly`]) swallow body text and contribute nothing to the definition
//!   view.

use std::fmt::{self, Write};

use super::params::strip_param_defaults;

/// Namespace prefixed to every trait tag in the class declaration.
pub const TRAIT_NAMESPACE: &str = "OpTrait::";

/// Return type, name and raw parameter list of one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    return_type: String,
    name: String,
    params: String,
}

impl MethodSignature {
    pub fn new(return_type: impl Into<String>, name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            return_type: return_type.into(),
            name: name.into(),
            params: params.into(),
        }
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &str {
        &self.params
    }

    /// `Value *` and `Foo &` need no space before the method name.
    fn type_separator(&self) -> &'static str {
        if self.return_type.ends_with('&') || self.return_type.ends_with('*') {
            ""
        } else {
            " "
        }
    }

    /// Write `<ret> <name>(<params>)`.
    pub fn write_decl<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}{}{}({})", self.return_type, self.type_separator(), self.name, self.params)
    }

    /// Write `<ret> <prefix>::<name>(<params without defaults>)`.
    pub fn write_def<W: Write + ?Sized>(&self, out: &mut W, name_prefix: &str) -> fmt::Result {
        let qualifier = if name_prefix.is_empty() { "" } else { "::" };
        write!(
            out,
            "{}{}{}{}{}({})",
            self.return_type,
            self.type_separator(),
            name_prefix,
            qualifier,
            self.name,
            strip_param_defaults(&self.params)
        )
    }
}

/// Body text of a method, or a marker that its definition lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
    Code(String),
    DeclOnly,
}

impl MethodBody {
    pub fn is_decl_only(&self) -> bool {
        matches!(self, MethodBody::DeclOnly)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            MethodBody::Code(text) => Some(text),
            MethodBody::DeclOnly => None,
        }
    }

    fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        let MethodBody::Code(text) = self else {
            return Ok(());
        };
        out.write_str(text)?;
        if !text.ends_with('\n') {
            out.write_char('\n')?;
        }
        Ok(())
    }
}

impl Write for MethodBody {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let MethodBody::Code(text) = self {
            text.push_str(s);
        }
        Ok(())
    }
}

/// Whether a method is declared `static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodScope {
    Instance,
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpMethod {
    signature: MethodSignature,
    scope: MethodScope,
    body: MethodBody,
}

impl OpMethod {
    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    pub fn name(&self) -> &str {
        self.signature.name()
    }

    pub fn is_static(&self) -> bool {
        self.scope == MethodScope::Static
    }

    pub fn body(&self) -> &MethodBody {
        &self.body
    }

    fn write_decl<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str("  ")?;
        if self.is_static() {
            out.write_str("static ")?;
        }
        self.signature.write_decl(out)?;
        out.write_char(';')
    }

    fn write_def<W: Write + ?Sized>(&self, out: &mut W, class_name: &str) -> fmt::Result {
        if self.body.is_decl_only() {
            return Ok(());
        }
        self.signature.write_def(out, class_name)?;
        out.write_str(" {\n")?;
        self.body.write_to(out)?;
        out.write_char('}')
    }
}

/// Mutable state while one op's class is being assembled.
#[derive(Debug, Clone)]
pub struct OpClassBuilder {
    class_name: String,
    traits: Vec<String>,
    methods: Vec<OpMethod>,
}

impl OpClassBuilder {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            traits: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Append a trait tag. `OpTrait::` is prefixed implicitly; duplicates are kept.
    pub fn add_trait(&mut self, tag: impl AsRef<str>) {
        self.traits.push(format!("{}{}", TRAIT_NAMESPACE, tag.as_ref()));
    }

    /// Append a method with a body and return the body for writing.
    pub fn new_method(&mut self, signature: MethodSignature, scope: MethodScope) -> &mut MethodBody {
        self.push(signature, scope, MethodBody::Code(String::new()))
    }

    /// Append a declaration-only method.
    pub fn declare_method(&mut self, signature: MethodSignature, scope: MethodScope) {
        self.push(signature, scope, MethodBody::DeclOnly);
    }

    fn push(&mut self, signature: MethodSignature, scope: MethodScope, body: MethodBody) -> &mut MethodBody {
        let index = self.methods.len();
        self.methods.push(OpMethod { signature, scope, body });
        &mut self.methods[index].body
    }

    pub fn finish(self) -> OpClass {
        OpClass {
            class_name: self.class_name,
            traits: self.traits,
            methods: self.methods,
        }
    }
}

/// A finished op class, ready to be written as a declaration or as definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpClass {
    class_name: String,
    traits: Vec<String>,
    methods: Vec<OpMethod>,
}

impl OpClass {
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Trait tags in order, each with the `OpTrait::` prefix.
    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    pub fn methods(&self) -> &[OpMethod] {
        &self.methods
    }

    /// Methods with the given name, in declaration order.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a OpMethod> + 'a {
        self.methods.iter().filter(move |m| m.name() == name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods_named(name).next().is_some()
    }

    /// Write the class declaration, ending in `};` with no trailing newline.
    pub fn write_decl<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write!(out, "class {} : public Op<{}", self.class_name, self.class_name)?;
        for tag in &self.traits {
            write!(out, ", {tag}")?;
        }
        out.write_str("> {\npublic:\n")?;
        out.write_str("  using Op::Op;\n")?;
        for method in &self.methods {
            method.write_decl(out)?;
            out.write_char('\n')?;
        }
        out.write_str("};")
    }

    /// Write out-of-class definitions, each followed by a blank line.
    ///
    /// Declaration-only methods still emit their separator.
    pub fn write_def<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        for method in &self.methods {
            method.write_def(out, &self.class_name)?;
            out.write_str("\n\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl_of(class: &OpClass) -> String {
        let mut out = String::new();
        class.write_decl(&mut out).unwrap();
        out
    }

    fn def_of(class: &OpClass) -> String {
        let mut out = String::new();
        class.write_def(&mut out).unwrap();
        out
    }

    // ========================================
    // Signatures
    // ========================================

    #[test]
    fn test_signature_spacing() {
        let mut out = String::new();
        MethodSignature::new("Value *", "lhs", "").write_decl(&mut out).unwrap();
        assert_eq!(out, "Value *lhs()");

        out.clear();
        MethodSignature::new("StringRef", "getOperationName", "")
            .write_decl(&mut out)
            .unwrap();
        assert_eq!(out, "StringRef getOperationName()");

        out.clear();
        MethodSignature::new("Foo &", "get", "").write_def(&mut out, "Bar").unwrap();
        assert_eq!(out, "Foo &Bar::get()");
    }

    #[test]
    fn test_signature_def_strips_defaults() {
        let mut out = String::new();
        MethodSignature::new("void", "build", "Builder *b, int a = 1")
            .write_def(&mut out, "FooOp")
            .unwrap();
        assert_eq!(out, "void FooOp::build(Builder *b, int a)");
    }

    #[test]
    fn test_signature_def_without_prefix() {
        let mut out = String::new();
        MethodSignature::new("void", "f", "").write_def(&mut out, "").unwrap();
        assert_eq!(out, "void f()");
    }

    // ========================================
    // Bodies
    // ========================================

    #[test]
    fn test_decl_only_body_ignores_writes() {
        let mut body = MethodBody::DeclOnly;
        write!(body, "  return 1;\n").unwrap();
        assert_eq!(body, MethodBody::DeclOnly);
    }

    #[test]
    fn test_body_gets_trailing_newline() {
        let mut builder = OpClassBuilder::new("FooOp");
        let body = builder.new_method(MethodSignature::new("int", "f", ""), MethodScope::Instance);
        body.write_str("  return 1;").unwrap();
        let class = builder.finish();
        assert_eq!(def_of(&class), "int FooOp::f() {\n  return 1;\n}\n\n");
    }

    #[test]
    fn test_empty_body_still_has_newline() {
        let mut builder = OpClassBuilder::new("FooOp");
        builder.new_method(MethodSignature::new("void", "f", ""), MethodScope::Instance);
        assert_eq!(def_of(&builder.finish()), "void FooOp::f() {\n\n}\n\n");
    }

    // ========================================
    // Classes
    // ========================================

    #[test]
    fn test_class_decl_layout() {
        let mut builder = OpClassBuilder::new("FooOp");
        builder.add_trait("OneResult");
        builder.add_trait("NOperands<2>::Impl");
        builder
            .new_method(MethodSignature::new("StringRef", "getOperationName", ""), MethodScope::Static)
            .write_str("  return \"foo\";\n")
            .unwrap();
        builder.declare_method(MethodSignature::new("Value *", "fold", ""), MethodScope::Instance);
        let class = builder.finish();

        assert_eq!(
            decl_of(&class),
            "class FooOp : public Op<FooOp, OpTrait::OneResult, OpTrait::NOperands<2>::Impl> {\n\
             public:\n  using Op::Op;\n  static StringRef getOperationName();\n  Value *fold();\n};"
        );
    }

    #[test]
    fn test_class_def_skips_decl_only() {
        let mut builder = OpClassBuilder::new("FooOp");
        builder.declare_method(MethodSignature::new("void", "build", "Builder *b"), MethodScope::Static);
        builder
            .new_method(MethodSignature::new("void", "print", "OpAsmPrinter *p"), MethodScope::Instance)
            .write_str("  p->print();")
            .unwrap();
        let class = builder.finish();

        assert_eq!(def_of(&class), "\n\nvoid FooOp::print(OpAsmPrinter *p) {\n  p->print();\n}\n\n");
        assert_eq!(class.methods_named("build").count(), 1);
        assert!(class.has_method("print"));
        assert!(!class.has_method("verify"));
    }

    #[test]
    fn test_traits_are_not_deduplicated() {
        let mut builder = OpClassBuilder::new("FooOp");
        builder.add_trait("NoSideEffect");
        builder.add_trait("NoSideEffect");
        assert_eq!(builder.finish().traits().len(), 2);
    }
}
