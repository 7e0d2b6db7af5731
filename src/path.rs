//! Key paths addressing nested mapping entries.

use std::fmt;
use std::str::FromStr;

/// An ordered list of keys, one per nesting level.
///
/// ```
/// use yaml_contents::KeyPath;
///
/// let path: KeyPath = "default.one.alpha".parse().unwrap();
/// assert_eq!(path.segments(), ["default", "one", "alpha"]);
///
/// let escaped: KeyPath = r"hosts.example\.com".parse().unwrap();
/// assert_eq!(escaped.segments(), ["hosts", "example.com"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Create a path from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeyPath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dotted path. `\.` is a literal dot and `\\` a literal backslash.
    pub fn from_dotted(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                },
                '.' => segments.push(std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
        if !text.is_empty() {
            segments.push(current);
        }
        KeyPath { segments }
    }

    /// The keys, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The first `len` segments as a path.
    pub fn prefix(&self, len: usize) -> KeyPath {
        KeyPath::new(self.segments[..len.min(self.segments.len())].iter().cloned())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.replace('\\', "\\\\").replace('.', "\\."))?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(KeyPath::from_dotted(s))
    }
}

impl From<&str> for KeyPath {
    fn from(text: &str) -> Self {
        KeyPath::from_dotted(text)
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        KeyPath { segments }
    }
}

impl From<Vec<&str>> for KeyPath {
    fn from(segments: Vec<&str>) -> Self {
        KeyPath::new(segments)
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        KeyPath::new(segments)
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        KeyPath::new(segments.iter().copied())
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_paths() {
        assert_eq!(KeyPath::from("a.b.c").segments(), ["a", "b", "c"]);
        assert_eq!(KeyPath::from("single").segments(), ["single"]);
        assert!(KeyPath::from("").is_empty());
        assert_eq!(KeyPath::from("a..b").segments(), ["a", "", "b"]);
    }

    #[test]
    fn test_display_escapes_dots() {
        let path = KeyPath::from(["hosts", "example.com"]);
        assert_eq!(path.to_string(), r"hosts.example\.com");
        assert_eq!(KeyPath::from_dotted(&path.to_string()), path);
    }

    #[test]
    fn test_prefix() {
        let path = KeyPath::from("a.b.c");
        assert_eq!(path.prefix(2), KeyPath::from("a.b"));
        assert_eq!(path.prefix(10), path);
    }
}
