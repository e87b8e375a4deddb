//! Batch generation over all ops, and the registry of generators the CLI dispatches to.
//!
//! ## Notes
//! - Output is rendered into a scratch buffer and handed to the sink only when every op succeeded, so a fatal
//!   error never leaves partial output behind.
//! - Ops are emitted in the order they appear in the schema.

use std::fmt::{self, Write};

use opgen_schema::Operator;

use super::config::EmitConfig;
use super::errors::GenError;
use super::op;

const FILE_HEADER_WIDTH: usize = 80;

/// Write the boxed generated-file banner.
pub fn write_file_header<W: Write + ?Sized>(out: &mut W, title: &str) -> fmt::Result {
    let top_prefix = "/*===- Generated file ";
    let top_suffix = "-*- C++ -*-===*\\";
    let fill = FILE_HEADER_WIDTH.saturating_sub(top_prefix.len() + top_suffix.len());
    writeln!(out, "{}{}{}", top_prefix, "-".repeat(fill), top_suffix)?;

    let inner = FILE_HEADER_WIDTH - 6;
    for line in ["", title, "", "Automatically generated file, do not edit!", ""] {
        writeln!(out, "|* {line:<inner$} *|")?;
    }
    writeln!(out, "\\*==={}===*/", "-".repeat(FILE_HEADER_WIDTH - 10))?;
    writeln!(out)
}

/// Write the two-line banner preceding each op.
pub fn write_op_banner<W: Write + ?Sized>(out: &mut W, qual_name: &str, section: &str) -> fmt::Result {
    let rule = format!("//==={}===//", "-".repeat(FILE_HEADER_WIDTH - 10));
    write!(out, "\n{rule}\n// {qual_name} {section}\n{rule}\n\n")
}

/// Wrap `body` in `#ifdef NAME` / `#undef NAME` ... `#endif  // NAME`.
pub fn with_ifdef_scope<W, F>(out: &mut W, name: &str, body: F) -> Result<(), GenError>
where
    W: Write + ?Sized,
    F: FnOnce(&mut W) -> Result<(), GenError>,
{
    write!(out, "#ifdef {name}\n#undef {name}\n\n")?;
    body(out)?;
    write!(out, "\n#endif  // {name}\n\n")?;
    Ok(())
}

/// Which view of each class a batch writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassView {
    Declarations,
    Definitions,
}

impl ClassView {
    fn label(self) -> &'static str {
        match self {
            ClassView::Declarations => "declarations",
            ClassView::Definitions => "definitions",
        }
    }
}

fn emit_op_classes(ops: &[Operator], config: &EmitConfig, view: ClassView, out: &mut String) -> Result<(), GenError> {
    with_ifdef_scope(out, &config.classes_guard, |out| {
        for record in ops {
            write_op_banner(out, &record.qual_cpp_class_name(), view.label())?;
            match view {
                ClassView::Declarations => op::emit_decl(record, out)?,
                ClassView::Definitions => op::emit_def(record, out)?,
            }
        }
        Ok(())
    })
}

fn emit_op_list(ops: &[Operator], config: &EmitConfig, out: &mut String) -> Result<(), GenError> {
    with_ifdef_scope(out, &config.list_guard, |out| {
        let names: Vec<String> = ops.iter().map(Operator::qual_cpp_class_name).collect();
        out.write_str(&names.join(",\n"))?;
        Ok(())
    })
}

/// Generate class declarations for every op.
#[tracing::instrument(skip_all, fields(op_count = ops.len()))]
pub fn emit_op_decls(ops: &[Operator], config: &EmitConfig, sink: &mut dyn Write) -> Result<(), GenError> {
    let mut out = String::new();
    if config.emit_file_header {
        write_file_header(&mut out, "Op Declarations")?;
    }
    emit_op_classes(ops, config, ClassView::Declarations, &mut out)?;
    sink.write_str(&out)?;
    Ok(())
}

/// Generate method definitions for every op, preceded by the op list.
#[tracing::instrument(skip_all, fields(op_count = ops.len()))]
pub fn emit_op_defs(ops: &[Operator], config: &EmitConfig, sink: &mut dyn Write) -> Result<(), GenError> {
    let mut out = String::new();
    if config.emit_file_header {
        write_file_header(&mut out, "Op Definitions")?;
    }
    if config.emit_op_list {
        emit_op_list(ops, config, &mut out)?;
    }
    emit_op_classes(ops, config, ClassView::Definitions, &mut out)?;
    sink.write_str(&out)?;
    Ok(())
}

// ============================================================================
// Generator registry
// ============================================================================

/// Signature shared by every registered generator.
pub type GenFn = fn(&[Operator], &EmitConfig, &mut dyn Write) -> Result<(), GenError>;

/// A named generation mode.
#[derive(Debug, Clone, Copy)]
pub struct Generator {
    pub name: &'static str,
    pub description: &'static str,
    pub run: GenFn,
}

/// The generators available to the driver, fixed at construction.
#[derive(Debug, Clone)]
pub struct GenRegistry {
    generators: Vec<Generator>,
}

impl GenRegistry {
    /// Build a registry from an explicit list. Later entries never shadow earlier ones.
    pub fn new(generators: Vec<Generator>) -> Self {
        Self { generators }
    }

    /// `gen-op-decls` and `gen-op-defs`.
    pub fn builtin() -> Self {
        Self::new(vec![
            Generator {
                name: "gen-op-decls",
                description: "Generate op declarations",
                run: emit_op_decls,
            },
            Generator {
                name: "gen-op-defs",
                description: "Generate op definitions",
                run: emit_op_defs,
            },
        ])
    }

    pub fn get(&self, name: &str) -> Option<&Generator> {
        self.generators.iter().find(|g| g.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Generator> {
        self.generators.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name).collect()
    }
}

impl Default for GenRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
