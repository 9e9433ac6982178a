//! Evaluation limits

/// Options controlling how much input a single evaluation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvalOptions {
    /// Maximum formula length in characters (default: 4096)
    pub max_length: usize,
    /// Maximum nesting of parentheses, call arguments and unary/power
    /// operands (default: 256)
    pub max_depth: usize,
}

impl EvalOptions {
    pub const DEFAULT_MAX_LENGTH: usize = 4096;
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_length: Self::DEFAULT_MAX_LENGTH,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
