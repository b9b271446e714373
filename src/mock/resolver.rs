//! Mock response resolver.

use crate::frontend::ast::{Reference, ResponseClause};
use crate::frontend::SpecFrontEnd;
use crate::mock::{MockResponse, NotFoundReason};
use crate::routing::PathParams;

/// Type reference name handed to the generator, e.g. `Todo` or `Todo[]`.
///
/// `None` when the clause has no content or a non-custom reference.
pub fn generation_target(clause: &ResponseClause) -> Option<String> {
    match &clause.content.as_ref()?.reference {
        Reference::Custom { name, iterable, .. } => Some(if *iterable {
            format!("{}[]", name)
        } else {
            name.clone()
        }),
        Reference::Any { .. } | Reference::Unit { .. } | Reference::Primitive { .. } => None,
    }
}

/// Resolves response clauses against one specification text.
#[derive(Debug, Clone, Copy)]
pub struct MockResolver<'a> {
    front_end: &'a SpecFrontEnd,
    spec_text: &'a str,
}

impl<'a> MockResolver<'a> {
    pub fn new(front_end: &'a SpecFrontEnd, spec_text: &'a str) -> Self {
        Self {
            front_end,
            spec_text,
        }
    }

    /// Generate the body for `clause`.
    ///
    /// Path parameters are accepted for logging only; the generator does not
    /// take them into account.
    pub async fn resolve(&self, clause: &ResponseClause, params: &PathParams) -> MockResponse {
        let Some(target) = generation_target(clause) else {
            tracing::debug!(status = %clause.status, "Response clause has nothing to mock");
            return MockResponse::NotFound(NotFoundReason::NoMockType);
        };

        tracing::debug!(
            type_ref = %target,
            params = ?params.iter().collect::<Vec<_>>(),
            "Generating mock"
        );
        MockResponse::Json(self.front_end.generate(self.spec_text, &target).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::{Content, PrimitiveKind};
    use crate::frontend::{FrontEndError, GenerateResult, LanguageFrontEnd, ParseResult};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    /// Echoes the requested type reference back as a JSON string.
    struct EchoType;

    #[async_trait]
    impl LanguageFrontEnd for EchoType {
        async fn parse(&self, _text: &str) -> Result<ParseResult, FrontEndError> {
            Ok(ParseResult::default())
        }

        async fn generate(&self, _text: &str, type_ref: &str) -> Result<GenerateResult, FrontEndError> {
            Ok(GenerateResult {
                result: Some(json!(type_ref).to_string()),
                errors: None,
            })
        }
    }

    fn clause(reference: Option<Reference>) -> ResponseClause {
        ResponseClause {
            status: "200".into(),
            content: reference.map(|reference| Content {
                content_type: "application/json".into(),
                reference,
            }),
        }
    }

    #[test]
    fn test_generation_target() {
        assert_eq!(
            generation_target(&clause(Some(Reference::custom("Todo", true)))).as_deref(),
            Some("Todo[]")
        );
        assert_eq!(
            generation_target(&clause(Some(Reference::custom("Todo", false)))).as_deref(),
            Some("Todo")
        );
        assert_eq!(generation_target(&clause(None)), None);
        assert_eq!(
            generation_target(&clause(Some(Reference::Primitive {
                primitive: PrimitiveKind::String,
                iterable: false,
                nullable: false,
            }))),
            None
        );
        assert_eq!(
            generation_target(&clause(Some(Reference::Unit { iterable: false, nullable: false }))),
            None
        );
    }

    #[tokio::test]
    async fn test_resolve_custom_type() {
        let fe = SpecFrontEnd::new(Arc::new(EchoType));
        let resolver = MockResolver::new(&fe, "spec");

        let response = resolver
            .resolve(&clause(Some(Reference::custom("Todo", true))), &PathParams::default())
            .await;
        assert_eq!(response, MockResponse::Json(json!("Todo[]")));
    }

    #[tokio::test]
    async fn test_resolve_without_content_is_not_found() {
        let fe = SpecFrontEnd::new(Arc::new(EchoType));
        let resolver = MockResolver::new(&fe, "spec");

        let response = resolver.resolve(&clause(None), &PathParams::default()).await;
        assert_eq!(response, MockResponse::NotFound(NotFoundReason::NoMockType));
    }
}
