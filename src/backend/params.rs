//! Parameter-list utilities for the definition view.
//!
//! Method signatures carry their parameter list as raw C++ text, possibly with default arguments
//! (`int a = 1`). Out-of-class definitions must not repeat those defaults, so the definition view strips them.
//!
//! ## Notes
//! - The scan tracks `()`, `[]`, `{}` and `<>` nesting, string/char literals and `/* */` comments, so commas and
//!   `=` inside a default expression or a template argument list never split a parameter.
//! - `==`, `!=`, `<=` and `>=` are comparison operators, not default markers.
//! - Angle depth is tracked per bracket group, so a `<` comparison inside parentheses (`bool a = (x < y)`) does
//!   not leak past the closing `)`. A bare top-level `<` comparison (`bool a = x < y`) is still read as a
//!   template bracket and needs those parentheses.

/// Remove default arguments from a raw parameter list.
///
/// Each parameter is trimmed and the result is joined with `", "`.
///
/// ## Examples
/// ```rust
/// use opgen::backend::params::strip_param_defaults;
///
/// assert_eq!(strip_param_defaults("Context ctx, int a = 1, int b = 2"), "Context ctx, int a, int b");
/// assert_eq!(strip_param_defaults("Point p = {1, 2}, int n"), "Point p, int n");
/// ```
pub fn strip_param_defaults(params: &str) -> String {
    split_params(params)
        .into_iter()
        .map(|p| p.declarator.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One top-level parameter: the declarator text and its default expression, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParam<'a> {
    pub declarator: &'a str,
    pub default: Option<&'a str>,
}

/// Split a raw parameter list on top-level commas, separating each parameter's default expression.
pub fn split_params(params: &str) -> Vec<RawParam<'_>> {
    let bytes = params.as_bytes();
    let mut out = Vec::new();
    let mut nesting = 0usize;
    let mut angles = 0usize;
    // Angle depth of each enclosing bracket group, restored when the group closes.
    let mut outer_angles: Vec<usize> = Vec::new();
    let mut start = 0;
    let mut default_at: Option<usize> = None;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_quoted(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' => {
                outer_angles.push(angles);
                angles = 0;
                nesting += 1;
            }
            b')' | b']' | b'}' => {
                angles = outer_angles.pop().unwrap_or(0);
                nesting = nesting.saturating_sub(1);
            }
            b'<' => {
                // `<<` and `<=` are operators.
                if matches!(bytes.get(i + 1), Some(b'<' | b'=')) {
                    i += 2;
                    continue;
                }
                angles += 1;
            }
            b'>' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                    continue;
                }
                // `->` is member access, not a closing bracket.
                if i == 0 || bytes[i - 1] != b'-' {
                    angles = angles.saturating_sub(1);
                }
            }
            b'=' | b'!' if bytes.get(i + 1) == Some(&b'=') => {
                i += 2;
                continue;
            }
            b'=' if nesting == 0 && angles == 0 && default_at.is_none() => default_at = Some(i),
            b',' if nesting == 0 && angles == 0 => {
                out.push(make_param(params, start, i, default_at));
                start = i + 1;
                default_at = None;
            }
            _ => {}
        }
        i += 1;
    }

    if start < params.len() || !out.is_empty() {
        out.push(make_param(params, start, params.len(), default_at));
    }
    out
}

fn make_param(params: &str, start: usize, end: usize, default_at: Option<usize>) -> RawParam<'_> {
    match default_at {
        Some(eq) => RawParam {
            declarator: &params[start..eq],
            default: Some(params[eq + 1..end].trim()),
        },
        None => RawParam {
            declarator: &params[start..end],
            default: None,
        },
    }
}

/// Return the index just past the literal starting at `open`, or the end of input if unterminated.
fn skip_quoted(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_block_comment(bytes: &[u8], open: usize) -> usize {
    let mut i = open + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}
