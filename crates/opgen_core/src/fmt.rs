//! Placeholder-template substitution for schema-supplied code snippets.
//!
//! Attribute and constraint definitions carry small C++ snippets with placeholders. The emission engine binds
//! those placeholders to concrete expressions before splicing the snippet into a method body.
//!
//! | placeholder | bound to |
//! |---|---|
//! | `$_self` | the value being converted or checked |
//! | `$_builder` | a builder expression |
//! | `$_op` | the operation being verified |
//! | `$0`..`$9` | positional arguments |
//! | `$$` | a literal `$` |
//!
//! ## Notes
//!
//! - Substitution is single-pass: substituted text is never re-scanned.
//! - Unknown or unbound placeholders are kept verbatim so the problem is visible in the generated output.

/// Bindings for the named placeholders of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FmtContext {
    builder: Option<String>,
    op: Option<String>,
    self_: Option<String>,
}

impl FmtContext {
    /// Create a context with no placeholders bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `$_builder`.
    pub fn with_builder(mut self, builder: impl Into<String>) -> Self {
        self.builder = Some(builder.into());
        self
    }

    /// Bind `$_op`.
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Bind `$_self`.
    pub fn with_self(mut self, value: impl Into<String>) -> Self {
        self.self_ = Some(value.into());
        self
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "_builder" => self.builder.as_deref(),
            "_op" => self.op.as_deref(),
            "_self" => self.self_.as_deref(),
            _ => None,
        }
    }
}

/// Substitute placeholders in `template` using `ctx` and the positional `args`.
pub fn tgfmt(template: &str, ctx: &FmtContext, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        // `$$` -> `$`
        if let Some(stripped) = after.strip_prefix('$') {
            out.push('$');
            rest = stripped;
            continue;
        }

        // `$0`..`$9`
        if let Some(digit) = after.chars().next().and_then(|c| c.to_digit(10)) {
            match args.get(digit as usize) {
                Some(arg) => out.push_str(arg),
                None => {
                    out.push('$');
                    out.push_str(&after[..1]);
                }
            }
            rest = &after[1..];
            continue;
        }

        // `$_name`
        if after.starts_with('_') {
            let len = after
                .char_indices()
                .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
                .map(|(i, _)| i)
                .unwrap_or(after.len());
            let name = &after[..len];
            match ctx.lookup(name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('$');
                    out.push_str(name);
                }
            }
            rest = &after[len..];
            continue;
        }

        out.push('$');
        rest = after;
    }

    out.push_str(rest);
    out
}

/// Escape text for use inside a C++ string literal (`"`, `\`, and control characters).
pub fn escape_cpp_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
