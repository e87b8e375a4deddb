//! JSON record store: deserialize op records and convert them into validated [`Operator`] views.
//!
//! The document layout is `{ "ops": [ <record>, ... ] }`. Records use camelCase keys; see the raw types below for
//! the accepted fields. Conversion enforces the shape invariants the emission engine relies on, so a
//! [`RecordSet`] always holds well-formed views.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::errors::SchemaError;
use crate::view::{
    Argument, AttrKind, Attribute, CustomBuilder, NamedAttribute, NamedTypeConstraint, OpTrait, Operator,
    TypeConstraint,
};

/// The ordered collection of op definitions discovered in one schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    /// Ops in discovery (document) order.
    pub ops: Vec<Operator>,
}

impl RecordSet {
    /// Parse and validate a schema document. `name` is used in diagnostics.
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    pub fn from_json_str(source: &str, name: &str) -> Result<Self, SchemaError> {
        let raw: RawDocument = serde_json::from_str(source).map_err(|e| SchemaError::from_json(e, name, source))?;
        Self::from_raw(raw)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, SchemaError> {
        let raw: RawDocument = serde_json::from_value(value).map_err(|e| SchemaError::Decode(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Read, parse and validate a schema file.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&source, &path.display().to_string())
    }

    /// Look up an op by record name.
    pub fn get(&self, def_name: &str) -> Option<&Operator> {
        self.ops.iter().find(|op| op.def_name == def_name)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn from_raw(raw: RawDocument) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        let mut ops = Vec::with_capacity(raw.ops.len());
        for record in raw.ops {
            if !seen.insert(record.def.clone()) {
                return Err(SchemaError::Duplicate(record.def));
            }
            ops.push(convert_op(record)?);
        }
        tracing::debug!(op_count = ops.len(), "loaded schema records");
        Ok(Self { ops })
    }
}

// ============================================================================
// Raw (serde) layout
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default)]
    ops: Vec<RawOp>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawOp {
    def: String,
    #[serde(default)]
    op_name: Option<String>,
    #[serde(default)]
    loc: Option<String>,
    #[serde(default)]
    arguments: Vec<RawArgument>,
    #[serde(default)]
    results: Vec<RawValue>,
    #[serde(default)]
    derived_attributes: Vec<RawAttr>,
    #[serde(default)]
    traits: Vec<RawTrait>,
    #[serde(default)]
    builders: Vec<RawBuilder>,
    #[serde(default)]
    parser: Option<String>,
    #[serde(default)]
    printer: Option<String>,
    #[serde(default)]
    verifier: Option<String>,
    #[serde(default)]
    has_canonicalizer: bool,
    #[serde(default)]
    has_constant_folder: bool,
    #[serde(default)]
    has_folder: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum RawArgument {
    Operand(RawValue),
    Attribute(RawAttr),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawValue {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    predicate: Option<String>,
    #[serde(default)]
    variadic: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawAttr {
    name: String,
    storage_type: String,
    return_type: String,
    #[serde(default)]
    convert_from_storage: Option<String>,
    #[serde(default)]
    const_builder: Option<String>,
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    predicate: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    is_type_attr: bool,
    #[serde(default)]
    derived_body: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTrait {
    Native {
        native: String,
        #[serde(default)]
        arity: Option<usize>,
    },
    Pred {
        pred: String,
        #[serde(default)]
        description: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBuilder {
    params: String,
    #[serde(default)]
    body: String,
}

// ============================================================================
// Conversion
// ============================================================================

fn convert_op(raw: RawOp) -> Result<Operator, SchemaError> {
    let shape_err = |message: String| SchemaError::Shape {
        op: raw.def.clone(),
        loc: raw.loc.clone(),
        message,
    };

    let mut operands = Vec::new();
    let mut attributes = Vec::new();
    let mut args = Vec::with_capacity(raw.arguments.len());

    for argument in raw.arguments {
        match argument {
            RawArgument::Operand(value) => {
                args.push(Argument::Operand(operands.len()));
                operands.push(convert_value(value));
            }
            RawArgument::Attribute(attr) => {
                if attr.derived_body.is_some() {
                    return Err(shape_err(format!(
                        "attribute '{}' has a derived body but is listed as an argument",
                        attr.name
                    )));
                }
                args.push(Argument::Attribute(attributes.len()));
                attributes.push(convert_attr(attr).map_err(&shape_err)?);
            }
        }
    }

    for attr in raw.derived_attributes {
        if attr.derived_body.is_none() {
            return Err(shape_err(format!("derived attribute '{}' has no body", attr.name)));
        }
        attributes.push(convert_attr(attr).map_err(&shape_err)?);
    }

    let traits = raw
        .traits
        .into_iter()
        .map(|t| match t {
            RawTrait::Native { native, arity } => OpTrait::Native { name: native, arity },
            RawTrait::Pred { pred, description } => OpTrait::Pred {
                condition: pred,
                description,
            },
        })
        .collect();

    let builders = raw
        .builders
        .into_iter()
        .map(|b| CustomBuilder {
            params: b.params,
            body: b.body,
        })
        .collect();

    let op = Operator {
        op_name: raw.op_name.unwrap_or_else(|| raw.def.clone()),
        def_name: raw.def.clone(),
        loc: raw.loc.clone(),
        operands,
        results: raw.results.into_iter().map(convert_value).collect(),
        attributes,
        args,
        traits,
        builders,
        parser: raw.parser,
        printer: raw.printer,
        verifier: raw.verifier,
        has_canonicalizer: raw.has_canonicalizer,
        has_constant_folder: raw.has_constant_folder,
        has_folder: raw.has_folder,
    };

    op.validate().map_err(&shape_err)?;
    Ok(op)
}

fn convert_value(raw: RawValue) -> NamedTypeConstraint {
    NamedTypeConstraint {
        name: raw.name.filter(|n| !n.is_empty()),
        constraint: TypeConstraint {
            condition: raw.predicate,
            description: raw.description,
        },
        variadic: raw.variadic,
    }
}

fn convert_attr(raw: RawAttr) -> Result<NamedAttribute, String> {
    let kind = match raw.derived_body {
        Some(body) => {
            if raw.default.is_some() || raw.optional {
                return Err(format!(
                    "derived attribute '{}' cannot be optional or have a default value",
                    raw.name
                ));
            }
            AttrKind::Derived { body }
        }
        None => AttrKind::Stored {
            default: raw.default,
            optional: raw.optional,
        },
    };

    Ok(NamedAttribute {
        name: raw.name,
        attr: Attribute {
            storage_type: raw.storage_type,
            return_type: raw.return_type,
            convert_from_storage: raw.convert_from_storage.unwrap_or_else(|| "$_self".to_string()),
            const_builder: raw.const_builder,
            predicate: raw.predicate,
            description: raw.description,
            is_type_attr: raw.is_type_attr,
            kind,
        },
    })
}
