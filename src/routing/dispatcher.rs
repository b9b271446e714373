//! Request dispatch against a route table.

use axum::http::Method;

use crate::frontend::ast::ResponseClause;
use crate::mock::{MockResolver, MockResponse, NotFoundReason};
use crate::routing::{HttpMethod, RouteMatch, RouteTable};

/// The only status served as a mock.
pub const SUCCESS_STATUS: &str = "200";

/// Where a request lands.
#[derive(Debug, Clone)]
pub enum Dispatch<'a> {
    /// Route matched and declares a "200" clause.
    Matched {
        route: RouteMatch<'a>,
        clause: &'a ResponseClause,
    },
    /// Route matched but has no "200" clause. Never served.
    NoSuccessClause(RouteMatch<'a>),
    NoRoute,
}

/// Serves requests for one parsed specification.
pub struct Dispatcher<'a> {
    table: RouteTable<'a>,
    resolver: MockResolver<'a>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(table: RouteTable<'a>, resolver: MockResolver<'a>) -> Self {
        Self { table, resolver }
    }

    pub fn table(&self) -> &RouteTable<'a> {
        &self.table
    }

    /// Resolve a request to a route and response clause.
    pub fn route(&self, method: &Method, path: &str) -> Dispatch<'a> {
        let Some(method) = HttpMethod::from_http(method) else {
            return Dispatch::NoRoute;
        };
        let Some(route) = self.table.lookup(method, path) else {
            return Dispatch::NoRoute;
        };

        match route.endpoint.response_for(SUCCESS_STATUS) {
            Some(clause) => Dispatch::Matched { route, clause },
            None => Dispatch::NoSuccessClause(route),
        }
    }

    /// Route the request and resolve its mock.
    pub async fn dispatch(&self, method: &Method, path: &str) -> MockResponse {
        match self.route(method, path) {
            Dispatch::Matched { route, clause } => {
                tracing::debug!(endpoint = %route.endpoint.name, "Route matched");
                self.resolver.resolve(clause, &route.params).await
            }
            Dispatch::NoSuccessClause(route) => {
                tracing::debug!(endpoint = %route.endpoint.name, "Endpoint declares no 200 response");
                MockResponse::NotFound(NotFoundReason::NoSuccessClause)
            }
            Dispatch::NoRoute => MockResponse::NotFound(NotFoundReason::NoRoute),
        }
    }
}
