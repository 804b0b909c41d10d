//! Request path to ordered segments.

/// Slash-delimited tokens of one request path. Index 0 names the resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegments(Vec<String>);

impl PathSegments {
    /// Strip `base_prefix` (only on a segment boundary), cut the query string,
    /// trim outer slashes and split. No percent-decoding happens here.
    ///
    /// An empty path yields a single empty segment; inner empty segments (`a//b`) are kept.
    pub fn parse(request_uri: &str, base_prefix: &str) -> Self {
        let path = strip_base(request_uri, base_prefix);
        let path = path.split_once('?').map(|(p, _)| p).unwrap_or(path);
        let path = path.trim_matches('/');
        PathSegments(path.split('/').map(str::to_string).collect())
    }

    pub fn from_vec(segments: Vec<String>) -> Self {
        PathSegments(segments)
    }

    /// Raw segment, empty strings included.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Segment that is present and meaningful: missing, `""` and `"0"` are all `None`.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.get(index).filter(|s| !s.is_empty() && *s != "0")
    }

    /// Remove and return the first segment.
    pub fn shift(&mut self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

fn strip_base<'a>(path: &'a str, base: &str) -> &'a str {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path;
    }
    match path.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') => rest,
        _ => path,
    }
}
