//! Errors produced while loading and validating a schema record store.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Error while turning JSON records into operation views.
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    /// The document is not valid JSON or does not match the record layout.
    #[error("invalid schema: {message}")]
    #[diagnostic(code(opgen::schema::json))]
    Json {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    /// The record layout did not match, with no source text to point into.
    #[error("invalid schema: {0}")]
    #[diagnostic(code(opgen::schema::decode))]
    Decode(String),

    /// A record violates a shape invariant.
    #[error("op `{op}`{}: {message}", at(.loc))]
    #[diagnostic(
        code(opgen::schema::shape),
        help("variadic operands/results must come last, and every operand must appear once in `arguments`")
    )]
    Shape {
        op: String,
        loc: Option<String>,
        message: String,
    },

    /// Two records share a definition name.
    #[error("duplicate op definition `{0}`")]
    #[diagnostic(code(opgen::schema::duplicate))]
    Duplicate(String),

    #[error("failed to read schema file `{path}`")]
    #[diagnostic(code(opgen::schema::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// Build a [`SchemaError::Json`] pointing at the location reported by `serde_json`.
    pub fn from_json(err: serde_json::Error, name: &str, source: &str) -> Self {
        let offset = line_col_to_offset(source, err.line(), err.column());
        SchemaError::Json {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: (offset, 0).into(),
        }
    }
}

fn at(loc: &Option<String>) -> String {
    loc.as_deref().map(|l| format!(" ({l})")).unwrap_or_default()
}

/// Convert a 1-based line/column pair into a byte offset, clamped to the source length.
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let col = column.saturating_sub(1).min(text.len());
            return offset + col;
        }
        offset += text.len();
    }
    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let src = "ab\ncd\nef";
        assert_eq!(line_col_to_offset(src, 1, 1), 0);
        assert_eq!(line_col_to_offset(src, 2, 2), 4);
        assert_eq!(line_col_to_offset(src, 3, 1), 6);
        assert_eq!(line_col_to_offset(src, 9, 1), src.len());
        assert_eq!(line_col_to_offset(src, 0, 0), 0);
    }

    #[test]
    fn test_shape_display_with_loc() {
        let err = SchemaError::Shape {
            op: "FooOp".to_string(),
            loc: Some("ops.td:3".to_string()),
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "op `FooOp` (ops.td:3): bad");
    }

    #[test]
    fn test_shape_display_without_loc() {
        let err = SchemaError::Shape {
            op: "FooOp".to_string(),
            loc: None,
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "op `FooOp`: bad");
    }
}
