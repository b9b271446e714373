//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wirespec_serve::frontend::ast::{
    Content, Definition, Endpoint, Field, PrimitiveKind, Reference, ResponseClause, Segment,
    TypeDefinition, TypeShape,
};
use wirespec_serve::frontend::{
    Diagnostic, FrontEndError, GenerateResult, LanguageFrontEnd, ParseResult,
};
use wirespec_serve::routing::HttpMethod;

/// Front-end double with scripted parse and generate results.
///
/// Texts are matched after trimming. Unknown texts fail to parse with a
/// single diagnostic; unknown type references fail to generate.
#[derive(Default)]
pub struct ScriptedFrontEnd {
    parses: HashMap<String, ParseResult>,
    mocks: HashMap<String, String>,
    generate_calls: AtomicUsize,
}

impl ScriptedFrontEnd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spec(mut self, text: &str, ast: Vec<Definition>) -> Self {
        self.parses.insert(
            text.trim().to_string(),
            ParseResult {
                result: Some(ast),
                errors: None,
            },
        );
        self
    }

    pub fn with_errors(mut self, text: &str, messages: &[&str]) -> Self {
        self.parses.insert(
            text.trim().to_string(),
            ParseResult {
                result: None,
                errors: Some(messages.iter().map(|m| Diagnostic::new(*m)).collect()),
            },
        );
        self
    }

    pub fn with_unreadable(mut self, text: &str) -> Self {
        self.parses.insert(text.trim().to_string(), ParseResult::default());
        self
    }

    pub fn with_mock(mut self, type_ref: &str, json: serde_json::Value) -> Self {
        self.mocks.insert(type_ref.to_string(), json.to_string());
        self
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageFrontEnd for ScriptedFrontEnd {
    async fn parse(&self, text: &str) -> Result<ParseResult, FrontEndError> {
        Ok(self
            .parses
            .get(text.trim())
            .cloned()
            .unwrap_or_else(|| ParseResult {
                result: None,
                errors: Some(vec![Diagnostic::new("Cannot parse token at 0")]),
            }))
    }

    async fn generate(&self, text: &str, type_ref: &str) -> Result<GenerateResult, FrontEndError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if !self.parses.contains_key(text.trim()) {
            return Ok(GenerateResult {
                result: None,
                errors: Some(vec![Diagnostic::new("Cannot parse specification")]),
            });
        }

        Ok(match self.mocks.get(type_ref) {
            Some(json) => GenerateResult {
                result: Some(json.clone()),
                errors: None,
            },
            None => GenerateResult {
                result: None,
                errors: Some(vec![Diagnostic::new(format!("Cannot find type {}", type_ref))]),
            },
        })
    }
}

pub const TODO_SPEC: &str = r#"type UUID /^[0-9a-f]{8}\b-[0-9a-f]{4}\b-[0-9a-f]{4}\b-[0-9a-f]{4}\b-[0-9a-f]{12}$/g

type Todo {
  id: UUID,
  done: Boolean,
  prio: Integer,
  name: String,
  date: String
}

type Error {
  reason: String
}

endpoint GetTodos GET /todos -> {
    200 -> Todo[]
}

endpoint GetTodosById GET /todos/{id:UUID} -> {
    200 -> Todo[]
}

endpoint PostTodo POST Todo /todos -> {
    200 -> Todo
}

endpoint PutTodo PUT Todo /todos/{id: UUID} -> {
    200 -> Todo
    404 -> Error
}

endpoint DeleteTodo DELETE /todos/{id: UUID} -> {
    404 -> Error
}

endpoint Health GET /health -> {
    200 -> String
}
"#;

fn literal(value: &str) -> Segment {
    Segment::Literal {
        value: value.to_string(),
    }
}

fn id_param() -> Segment {
    Segment::Param {
        identifier: "id".to_string(),
        reference: Reference::custom("UUID", false),
    }
}

fn clause(status: &str, reference: Reference) -> ResponseClause {
    ResponseClause {
        status: status.to_string(),
        content: Some(Content {
            content_type: "application/json".to_string(),
            reference,
        }),
    }
}

fn endpoint(
    name: &str,
    method: HttpMethod,
    path: Vec<Segment>,
    request: Option<Reference>,
    responses: Vec<ResponseClause>,
) -> Definition {
    Definition::Endpoint(Endpoint {
        name: name.to_string(),
        method,
        path,
        request,
        responses,
    })
}

fn field(identifier: &str, reference: Reference) -> Field {
    Field {
        identifier: identifier.to_string(),
        reference,
        optional: false,
    }
}

fn primitive(kind: PrimitiveKind) -> Reference {
    Reference::Primitive {
        primitive: kind,
        iterable: false,
        nullable: false,
    }
}

/// The definitions a front-end would produce for [`TODO_SPEC`].
pub fn todo_ast() -> Vec<Definition> {
    vec![
        Definition::Type(TypeDefinition {
            name: "UUID".to_string(),
            shape: TypeShape::Refined {
                pattern: "^[0-9a-f]{8}$".to_string(),
            },
        }),
        Definition::Type(TypeDefinition {
            name: "Todo".to_string(),
            shape: TypeShape::Fields {
                fields: vec![
                    field("id", Reference::custom("UUID", false)),
                    field("done", primitive(PrimitiveKind::Boolean)),
                    field("prio", primitive(PrimitiveKind::Integer)),
                    field("name", primitive(PrimitiveKind::String)),
                    field("date", primitive(PrimitiveKind::String)),
                ],
            },
        }),
        Definition::Type(TypeDefinition {
            name: "Error".to_string(),
            shape: TypeShape::Fields {
                fields: vec![field("reason", primitive(PrimitiveKind::String))],
            },
        }),
        endpoint(
            "GetTodos",
            HttpMethod::Get,
            vec![literal("todos")],
            None,
            vec![clause("200", Reference::custom("Todo", true))],
        ),
        endpoint(
            "GetTodosById",
            HttpMethod::Get,
            vec![literal("todos"), id_param()],
            None,
            vec![clause("200", Reference::custom("Todo", true))],
        ),
        endpoint(
            "PostTodo",
            HttpMethod::Post,
            vec![literal("todos")],
            Some(Reference::custom("Todo", false)),
            vec![clause("200", Reference::custom("Todo", false))],
        ),
        endpoint(
            "PutTodo",
            HttpMethod::Put,
            vec![literal("todos"), id_param()],
            Some(Reference::custom("Todo", false)),
            vec![
                clause("200", Reference::custom("Todo", false)),
                clause("404", Reference::custom("Error", false)),
            ],
        ),
        endpoint(
            "DeleteTodo",
            HttpMethod::Delete,
            vec![literal("todos"), id_param()],
            None,
            vec![clause("404", Reference::custom("Error", false))],
        ),
        endpoint(
            "Health",
            HttpMethod::Get,
            vec![literal("health")],
            None,
            vec![clause("200", primitive(PrimitiveKind::String))],
        ),
    ]
}

pub fn todo_json(i: usize) -> serde_json::Value {
    json!({
        "id": format!("0000000{}-0000-0000-0000-000000000000", i),
        "done": i % 2 == 0,
        "prio": i,
        "name": format!("todo{}", i),
        "date": "01-01-2024"
    })
}

/// Front-end that knows [`TODO_SPEC`] and mocks five todos for `Todo[]`.
pub fn todo_front_end() -> ScriptedFrontEnd {
    ScriptedFrontEnd::new()
        .with_spec(TODO_SPEC, todo_ast())
        .with_mock("Todo[]", json!((0..5).map(todo_json).collect::<Vec<_>>()))
        .with_mock("Todo", todo_json(0))
}

/// Build a request against `host` with an empty body.
pub fn request(method: &str, host: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Host", host)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
