//! Record locations.

use std::fmt;

/// A record's location in a [`Store`](crate::Store).
///
/// Paths scope records and organize their storage. They are normalized on
/// construction: a single leading `/`, no empty segments, no trailing `/`.
/// The root path is `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(String);

impl Path {
    /// Normalize a path string.
    pub fn new(path: &str) -> Self {
        let mut normalized = String::with_capacity(path.len() + 1);
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            normalized.push('/');
            normalized.push_str(segment);
        }
        if normalized.is_empty() {
            normalized.push('/');
        }
        Self(normalized)
    }

    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The datastore key for this path.
    pub fn key(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// This path extended by `name`, which may itself contain `/`.
    pub fn child(&self, name: &str) -> Self {
        Self::new(&format!("{}/{}", self.0, name))
    }

    /// The enclosing path, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let cut = self.0.rfind('/').unwrap_or(0);
        Some(Self::new(&self.0[..cut]))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Self::new(&path)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(Path::new("a/b").as_str(), "/a/b");
        assert_eq!(Path::new("//a///b/").as_str(), "/a/b");
        assert_eq!(Path::new("").as_str(), "/");
        assert_eq!(Path::new("///"), Path::root());
    }

    #[test]
    fn test_child_and_parent() {
        let p = Path::new("/a").child("b/c");
        assert_eq!(p.as_str(), "/a/b/c");
        assert_eq!(p.parent(), Some(Path::new("/a/b")));
        assert_eq!(Path::new("/a").parent(), Some(Path::root()));
        assert_eq!(Path::root().parent(), None);
        assert_eq!(p.segments().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    proptest! {
        #[test]
        fn prop_normalization_idempotent(s in "[a-z/]{0,24}") {
            let once = Path::new(&s);
            let twice = Path::new(once.as_str());
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.as_str().starts_with('/'));
            prop_assert!(!once.as_str().contains("//"));
            prop_assert!(once.is_root() || !once.as_str().ends_with('/'));
        }
    }
}
