// Key point:
// Serializable
// Comparable
// Explicit defaults
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectorParseConfig {
    /// Deepest selector nesting accepted; the outermost selector is depth 0.
    pub max_depth: usize,
    /// Widest index range an `ExploreRange` may span.
    pub max_range_len: usize,
}

impl SelectorParseConfig {
    pub fn v0() -> Self {
        Self {
            max_depth: 64,
            max_range_len: 1 << 16,
        }
    }
}

impl Default for SelectorParseConfig {
    fn default() -> Self {
        Self::v0()
    }
}
