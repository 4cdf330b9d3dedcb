//! Path codec: joining segments into path strings and splitting them back.
//!
//! A path is an ordered list of segments joined by a single delimiter
//! character. Each segment is either a mapping key or a sequence index:
//!
//! - **Index**: non-empty and made only of ASCII digits (`0`, `12`, `007`)
//! - **Key**: anything else, including the empty string
//!
//! ## Examples
//!
//! ```rust
//! use flattery::path::{join, split, Segment};
//!
//! let path = join(["users", "0", "name"], '.');
//! assert_eq!(path, "users.0.name");
//! assert_eq!(split(&path, '.'), vec!["users", "0", "name"]);
//!
//! assert!(Segment::classify("0").is_index());
//! assert!(!Segment::classify("name").is_index());
//! ```
//!
//! ## Limitations
//!
//! Segments that contain the delimiter are not escaped. `join(["a.b"], '.')`
//! splits back into `["a", "b"]`.

/// Joins `segments` with `delimiter` between each pair.
///
/// A single segment is returned unchanged and no segments yield the empty string.
///
/// # Examples
///
/// ```rust
/// use flattery::path::join;
///
/// assert_eq!(join(["a", "b", "c"], '.'), "a.b.c");
/// assert_eq!(join(["solo"], '.'), "solo");
/// assert_eq!(join(Vec::<&str>::new(), '.'), "");
/// ```
pub fn join<I>(segments: I, delimiter: char) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut path = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            path.push(delimiter);
        }
        path.push_str(segment.as_ref());
    }
    path
}

/// Splits `path` into its segments.
///
/// The empty path yields a single empty segment.
///
/// # Examples
///
/// ```rust
/// use flattery::path::split;
///
/// assert_eq!(split("a.0.b", '.'), vec!["a", "0", "b"]);
/// assert_eq!(split("", '.'), vec![""]);
/// ```
#[must_use]
pub fn split(path: &str, delimiter: char) -> Vec<&str> {
    path.split(delimiter).collect()
}

/// A classified path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    /// All-digit segment addressing a sequence slot
    Index(&'a str),
    /// Any other segment, addressing a mapping entry
    Key(&'a str),
}

impl<'a> Segment<'a> {
    /// Classifies a raw segment as an index or a key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattery::path::Segment;
    ///
    /// assert_eq!(Segment::classify("42"), Segment::Index("42"));
    /// assert_eq!(Segment::classify("007"), Segment::Index("007"));
    /// assert_eq!(Segment::classify("4a"), Segment::Key("4a"));
    /// assert_eq!(Segment::classify(""), Segment::Key(""));
    /// ```
    #[must_use]
    pub fn classify(raw: &'a str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            Segment::Index(raw)
        } else {
            Segment::Key(raw)
        }
    }

    /// Returns `true` if this is an index segment.
    #[inline]
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Returns the segment text as it appeared in the path.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match self {
            Segment::Index(s) | Segment::Key(s) => s,
        }
    }

    /// Returns the canonical spelling of an index: leading zeros stripped,
    /// `"0"` for an all-zero segment. Returns `None` for keys.
    ///
    /// Two index segments address the same slot exactly when their canonical
    /// spellings are equal, however long they are.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattery::path::Segment;
    ///
    /// assert_eq!(Segment::classify("007").canonical_index(), Some("7"));
    /// assert_eq!(Segment::classify("000").canonical_index(), Some("0"));
    /// assert_eq!(Segment::classify("x").canonical_index(), None);
    /// ```
    #[must_use]
    pub fn canonical_index(&self) -> Option<&'a str> {
        match self {
            Segment::Index(s) => {
                let trimmed = s.trim_start_matches('0');
                Some(if trimmed.is_empty() { "0" } else { trimmed })
            }
            Segment::Key(_) => None,
        }
    }

    /// Returns the numeric value of an index segment, or `None` for keys and
    /// for indices too large for `usize`.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.canonical_index().and_then(|digits| digits.parse().ok())
    }
}

/// Incrementally built path, used while walking a tree depth-first.
#[derive(Debug)]
pub(crate) struct PathBuilder {
    buf: String,
    depth: usize,
    delimiter: char,
}

impl PathBuilder {
    pub(crate) fn new(delimiter: char) -> Self {
        PathBuilder {
            buf: String::new(),
            depth: 0,
            delimiter,
        }
    }

    /// Appends a segment and returns a mark to pass to [`PathBuilder::pop`].
    pub(crate) fn push(&mut self, segment: &str) -> usize {
        let mark = self.buf.len();
        if self.depth > 0 {
            self.buf.push(self.delimiter);
        }
        self.buf.push_str(segment);
        self.depth += 1;
        mark
    }

    pub(crate) fn pop(&mut self, mark: usize) {
        self.buf.truncate(mark);
        self.depth -= 1;
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_split_inverse() {
        let segments = vec!["a", "0", "", "b"];
        let path = join(&segments, '.');
        assert_eq!(path, "a.0..b");
        assert_eq!(split(&path, '.'), segments);
    }

    #[test]
    fn test_custom_delimiter() {
        assert_eq!(join(["x", "y"], '/'), "x/y");
        assert_eq!(split("x/y.z", '/'), vec!["x", "y.z"]);
    }

    #[test]
    fn test_classify_non_ascii_digits() {
        // Arabic-Indic digit three
        assert!(!Segment::classify("\u{0663}").is_index());
        assert!(!Segment::classify("-1").is_index());
        assert!(!Segment::classify("1.5").is_index());
    }

    #[test]
    fn test_index_overflow() {
        let huge = "99999999999999999999999999999999";
        let segment = Segment::classify(huge);
        assert!(segment.is_index());
        assert_eq!(segment.index(), None);
        assert_eq!(segment.canonical_index(), Some(huge));
        assert_eq!(Segment::classify("0009").index(), Some(9));
    }

    #[test]
    fn test_path_builder_matches_join() {
        let mut builder = PathBuilder::new('.');
        let root = builder.push("");
        let inner = builder.push("a");
        assert_eq!(builder.as_str(), join(["", "a"], '.'));
        builder.pop(inner);
        assert_eq!(builder.as_str(), "");
        builder.pop(root);
        let mark = builder.push("b");
        assert_eq!(builder.as_str(), "b");
        builder.pop(mark);
        assert_eq!(builder.as_str(), "");
    }
}
