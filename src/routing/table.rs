//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Compile endpoint path segments into patterns
//! - Register patterns per HTTP method, in document order
//! - Look up a request and bind its path parameters
//!
//! # Design Decisions
//! - Each route owns a single-pattern `matchit` router; a method slot is the
//!   list of those routes in document order
//! - Lookup tries the routes in order and the first match wins, so an earlier
//!   `/todos/{id}` shadows a later `/todos/special`
//! - Trailing slashes on the request path are ignored (`/todos/` is `/todos`)
//! - Parameter values are bound raw; type patterns are not checked here

use crate::frontend::ast::{Definition, Endpoint, Segment};
use crate::routing::HttpMethod;

/// Path parameters bound by a match, in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A registered route.
#[derive(Debug, Clone)]
pub struct RouteEntry<'a> {
    pub method: HttpMethod,
    pub pattern: String,
    pub endpoint: &'a Endpoint,
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub endpoint: &'a Endpoint,
    pub params: PathParams,
}

/// One compiled pattern.
struct CompiledRoute<'a> {
    matcher: matchit::Router<&'a Endpoint>,
}

/// Per-method route table borrowing from a parsed specification.
pub struct RouteTable<'a> {
    slots: [Vec<CompiledRoute<'a>>; HttpMethod::COUNT],
    entries: Vec<RouteEntry<'a>>,
}

impl<'a> RouteTable<'a> {
    /// Build a table from definitions in document order.
    pub fn build(definitions: &'a [Definition]) -> Self {
        let mut table = Self {
            slots: std::array::from_fn(|_| Vec::new()),
            entries: Vec::new(),
        };

        for definition in definitions {
            match definition {
                Definition::Endpoint(endpoint) => table.register(endpoint),
                Definition::Type(_) => {}
            }
        }

        table
    }

    fn register(&mut self, endpoint: &'a Endpoint) {
        let pattern = build_pattern(&endpoint.path);
        let method = endpoint.method;

        let mut matcher = matchit::Router::new();
        if let Err(e) = matcher.insert(pattern.clone(), endpoint) {
            tracing::debug!(
                endpoint = %endpoint.name,
                %method,
                %pattern,
                error = %e,
                "Route not registered, invalid pattern"
            );
            return;
        }

        tracing::trace!(endpoint = %endpoint.name, %method, %pattern, "Route registered");
        self.slots[method.index()].push(CompiledRoute { matcher });
        self.entries.push(RouteEntry {
            method,
            pattern,
            endpoint,
        });
    }

    /// Find the first route, in document order, serving `method` + `path`.
    pub fn lookup(&self, method: HttpMethod, path: &str) -> Option<RouteMatch<'a>> {
        let path = normalize_path(path);

        self.slots[method.index()].iter().find_map(|route| {
            let matched = route.matcher.at(path).ok()?;
            let endpoint: &'a Endpoint = *matched.value;
            let params = matched
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();

            Some(RouteMatch {
                endpoint,
                params: PathParams(params),
            })
        })
    }

/// Registered routes in registration order.
    pub fn entries(&self) -> &[RouteEntry<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip trailing slashes, keeping the root path.
fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Compile path segments into a route pattern, e.g. `/todos/{id}`.
pub fn build_pattern(path: &[Segment]) -> String {
    let parts: Vec<String> = path
        .iter()
        .map(|segment| match segment {
            Segment::Literal { value } => value.replace('{', "{{").replace('}', "}}"),
            Segment::Param { identifier, .. } => format!("{{{}}}", identifier),
        })
        .collect();

    format!("/{}", parts.join("/"))
}
