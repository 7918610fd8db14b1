// src/routes.rs

use serde::Serialize;

/// Every endpoint the API exposes. The router dispatches on this table
/// and `GET /` lists it, so the two cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Index,
    ListProperties,
    SearchProperties,
    GetProperty,
}

impl Endpoint {
    /// Match order matters: `/properties/search` must win over `/properties/:id`.
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Index,
        Endpoint::ListProperties,
        Endpoint::SearchProperties,
        Endpoint::GetProperty,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Index => "/",
            Endpoint::ListProperties => "/properties",
            Endpoint::SearchProperties => "/properties/search",
            Endpoint::GetProperty => "/properties/:id",
        }
    }

    pub fn methods(self) -> &'static [&'static str] {
        &["GET"]
    }

    /// `HEAD` is answered wherever `GET` is.
    pub fn allows(self, method: &str) -> bool {
        let method = if method == "HEAD" { "GET" } else { method };
        self.methods().contains(&method)
    }

    /// Matches a request path against this endpoint's pattern, returning
    /// the captured `:param` segment if there is one.
    fn capture<'a>(self, path: &'a str) -> Option<Option<&'a str>> {
        let mut pattern = self.path().split('/');
        let mut segments = path.split('/');
        let mut captured = None;

        loop {
            match (pattern.next(), segments.next()) {
                (None, None) => return Some(captured),
                (Some(p), Some(s)) if p.starts_with(':') && !s.is_empty() => captured = Some(s),
                (Some(p), Some(s)) if p == s => {}
                _ => return None,
            }
        }
    }
}

/// Resolves a request path to an endpoint. Trailing slashes are ignored.
pub fn resolve(path: &str) -> Option<(Endpoint, Option<&str>)> {
    let trimmed = path.trim_end_matches('/');
    let path = if trimmed.is_empty() { "/" } else { trimmed };

    Endpoint::ALL
        .into_iter()
        .find_map(|endpoint| endpoint.capture(path).map(|param| (endpoint, param)))
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RouteInfo {
    pub path: &'static str,
    pub methods: &'static [&'static str],
}

pub fn route_table() -> Vec<RouteInfo> {
    Endpoint::ALL
        .into_iter()
        .map(|endpoint| RouteInfo {
            path: endpoint.path(),
            methods: endpoint.methods(),
        })
        .collect()
}
