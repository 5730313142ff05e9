//! Media request specification.

use std::collections::HashMap;

/// Immutable description of one media open: target URI, byte range, headers.
///
/// Chain stages never mutate a spec they were handed; recovery paths derive a
/// new spec (e.g. [`MediaRequestSpec::without_range`]) and pass that down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequestSpec {
    /// Target URI of the media resource.
    pub uri: String,
    /// Absolute byte offset to start reading from.
    pub position: u64,
    /// Number of bytes to read, or `None` for "until end of stream".
    pub length: Option<u64>,
    /// Additional request headers.
    pub headers: HashMap<String, String>,
}

impl MediaRequestSpec {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            position: 0,
            length: None,
            headers: HashMap::new(),
        }
    }

    /// Derive a spec that reads `length` bytes starting at `position`.
    pub fn with_range(mut self, position: u64, length: Option<u64>) -> Self {
        self.position = position;
        self.length = length;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Whether this spec constrains the byte range in any way.
    pub fn has_range(&self) -> bool {
        self.position > 0
            || self.length.is_some()
            || self.headers.keys().any(|k| k.eq_ignore_ascii_case("range"))
    }

    /// `Range` header value for this spec, if it carries a positional range.
    pub fn range_header(&self) -> Option<String> {
        match (self.position, self.length) {
            (0, None | Some(0)) => None,
            (pos, None | Some(0)) => Some(format!("bytes={}-", pos)),
            (pos, Some(len)) => Some(format!("bytes={}-{}", pos, pos + len - 1)),
        }
    }

    /// Derive an unconstrained spec: offset and length reset, `Range` headers
    /// removed. Used after an end-of-stream or 416 failure, where the range
    /// math was based on a stale upstream `Content-Length`.
    pub fn without_range(&self) -> Self {
        let headers = self
            .headers
            .iter()
            .filter(|(k, _)| !k.eq_ignore_ascii_case("range"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            uri: self.uri.clone(),
            position: 0,
            length: None,
            headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_header_formatting() {
        let spec = MediaRequestSpec::new("https://media.example/a");
        assert_eq!(spec.range_header(), None);

        let spec = spec.with_range(100, None);
        assert_eq!(spec.range_header(), Some("bytes=100-".to_string()));

        let spec = MediaRequestSpec::new("https://media.example/a").with_range(100, Some(200));
        assert_eq!(spec.range_header(), Some("bytes=100-299".to_string()));
    }

    #[test]
    fn without_range_strips_all_constraints() {
        let spec = MediaRequestSpec::new("https://media.example/a")
            .with_range(4096, Some(8192))
            .with_header("Range", "bytes=4096-12287")
            .with_header("User-Agent", "test");

        assert!(spec.has_range());

        let unranged = spec.without_range();
        assert_eq!(unranged.position, 0);
        assert_eq!(unranged.length, None);
        assert!(!unranged.headers.keys().any(|k| k.eq_ignore_ascii_case("range")));
        assert_eq!(unranged.headers.get("User-Agent"), Some(&"test".to_string()));
        assert!(!unranged.has_range());

        // The original spec is untouched
        assert_eq!(spec.position, 4096);
        assert!(spec.headers.contains_key("Range"));
    }

    #[test]
    fn zero_length_read_is_still_ranged() {
        let spec = MediaRequestSpec::new("u").with_range(0, Some(1));
        assert!(spec.has_range());
        assert_eq!(spec.range_header(), Some("bytes=0-0".to_string()));
    }
}
