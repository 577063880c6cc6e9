use std::collections::HashSet;

use actix_web::HttpRequest;
use anyhow::Result;

/// Decides whether authorization is bypassed for a request.
///
/// A skipper that cannot decide should return `Err`; the gate then
/// authorizes the request as usual.
pub trait Skipper: Send + Sync {
    fn skip(&self, req: &HttpRequest) -> Result<bool>;
}

impl<F> Skipper for F
where
    F: Fn(&HttpRequest) -> bool + Send + Sync,
{
    fn skip(&self, req: &HttpRequest) -> Result<bool> {
        Ok(self(req))
    }
}

/// The default skipper: every request is authorized.
pub struct NeverSkip;

impl Skipper for NeverSkip {
    fn skip(&self, _req: &HttpRequest) -> Result<bool> {
        Ok(false)
    }
}

/// Skips requests by path.
///
/// Entries ending in `/*` match every path under that prefix (`/static/*`
/// matches `/static/app.js` but not `/static`); all other entries must match
/// the request path exactly.
pub struct PathSkipper {
    exact: HashSet<String>,
    prefixes: Vec<String>,
}

impl PathSkipper {
    pub fn new(paths: &[String]) -> Self {
        let mut exact = HashSet::new();
        let mut prefixes = Vec::new();
        for path in paths.iter() {
            match path.strip_suffix('*') {
                Some(prefix) if prefix.ends_with('/') => prefixes.push(prefix.to_string()),
                _ => {
                    exact.insert(path.clone());
                }
            }
        }
        Self { exact, prefixes }
    }

    fn matches(&self, path: &str) -> bool {
        if self.exact.contains(path) {
            return true;
        }
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}

impl Skipper for PathSkipper {
    fn skip(&self, req: &HttpRequest) -> Result<bool> {
        Ok(self.matches(req.path()))
    }
}
