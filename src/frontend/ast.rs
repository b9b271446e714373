//! Parsed specification model.
//!
//! The router only inspects endpoint definitions. Type definitions are
//! carried so the model round-trips through the front-end transport, but
//! their shapes are interpreted by the front-end alone.

use serde::{Deserialize, Serialize};

use crate::routing::HttpMethod;

/// An ordered list of definitions, in document order.
pub type Ast = Vec<Definition>;

/// A top-level definition of a specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Definition {
    Endpoint(Endpoint),
    Type(TypeDefinition),
}

/// One named HTTP operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub method: HttpMethod,
    pub path: Vec<Segment>,
    /// Request body type, if the endpoint declares one.
    #[serde(default)]
    pub request: Option<Reference>,
    #[serde(default)]
    pub responses: Vec<ResponseClause>,
}

impl Endpoint {
    /// First response clause declared for `status`.
    pub fn response_for(&self, status: &str) -> Option<&ResponseClause> {
        self.responses.iter().find(|r| r.status == status)
    }
}

/// A single path element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Literal { value: String },
    Param { identifier: String, reference: Reference },
}

/// A declared response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseClause {
    /// Status as written in the document, e.g. `"200"`.
    pub status: String,
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub reference: Reference,
}

/// A reference to a type, possibly a collection of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reference {
    Any {
        #[serde(default)]
        iterable: bool,
        #[serde(default)]
        nullable: bool,
    },
    Unit {
        #[serde(default)]
        iterable: bool,
        #[serde(default)]
        nullable: bool,
    },
    Primitive {
        primitive: PrimitiveKind,
        #[serde(default)]
        iterable: bool,
        #[serde(default)]
        nullable: bool,
    },
    Custom {
        name: String,
        #[serde(default)]
        iterable: bool,
        #[serde(default)]
        nullable: bool,
    },
}

impl Reference {
    pub fn custom(name: impl Into<String>, iterable: bool) -> Self {
        Reference::Custom {
            name: name.into(),
            iterable,
            nullable: false,
        }
    }

    pub fn is_iterable(&self) -> bool {
        match self {
            Reference::Any { iterable, .. }
            | Reference::Unit { iterable, .. }
            | Reference::Primitive { iterable, .. }
            | Reference::Custom { iterable, .. } => *iterable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
    Bytes,
}

/// A named type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub shape: TypeShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeShape {
    /// Structural type with named fields.
    Fields { fields: Vec<Field> },
    Enum { entries: Vec<String> },
    /// String constrained by a pattern.
    Refined { pattern: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub identifier: String,
    pub reference: Reference,
    #[serde(default)]
    pub optional: bool,
}
