//! Ordered `(action type, handler)` lists.

/// Handlers keyed by action type, kept in declaration order.
///
/// Unlike a map, a key may appear more than once; each consumer decides what a repeated
/// key means (reducers run all of them, the middleware router keeps the first).
#[derive(Debug, Clone)]
pub struct Keyed<H> {
    entries: Vec<(String, H)>,
}

impl<H> Default for Keyed<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> Keyed<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, kind: impl Into<String>, handler: H) -> Self {
        self.entries.push((kind.into(), handler));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.entries.iter().map(|(kind, h)| (kind.as_str(), h))
    }

    /// Every handler registered under `kind`, in declaration order.
    pub fn matching<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a H> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == kind)
            .map(|(_, h)| h)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> FromIterator<(String, H)> for Keyed<H> {
    fn from_iter<I: IntoIterator<Item = (String, H)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
