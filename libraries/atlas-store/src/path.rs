//! Paths addressing nodes in the store tree.
//!
//! A path is a sequence of segments, not a concatenated string; `"users/a"`
//! and `"users"` + `"a"` address the same node, and no segment may be empty
//! or contain a separator.

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Location of a node in the store, as a sequence of path segments.
///
/// The empty path addresses the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StorePath(Vec<String>);

impl StorePath {
    /// The root path (no segments)
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a slash-separated path such as `"users/abc"`.
    ///
    /// Leading and trailing separators are tolerated; empty inner segments
    /// are rejected.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::new());
        }
        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            if segment.is_empty() {
                return Err(StoreError::InvalidPath(format!(
                    "empty segment in {:?}",
                    raw
                )));
            }
            segments.push(segment.to_string());
        }
        Ok(Self(segments))
    }

    /// Extend the path by one segment.
    ///
    /// Segments must not contain the separator; `parse` is the entry point
    /// for slash-separated strings.
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        debug_assert!(!segment.is_empty() && !segment.contains('/'));
        self.0.push(segment);
        self
    }

    /// The path segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment, if any (the node's key under its parent)
    pub fn key(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path without its final segment; `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for StorePath {
    type Err = StoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}
