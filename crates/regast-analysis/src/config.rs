//! Analysis configuration.

/// Default maximum number of character sets in a computed prefix.
pub const DEFAULT_PREFIX_LIMIT: usize = 1000;

/// Session-wide analysis settings.
///
/// Deserializable so lint tools can embed it in their own configuration files.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Upper bound for prefixes built from bounded repetitions such as `a{100000}`.
    /// Longer prefixes are cut and reported as incomplete.
    pub prefix_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix_limit: DEFAULT_PREFIX_LIMIT,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix_limit(mut self, limit: usize) -> Self {
        self.prefix_limit = limit;
        self
    }
}
