//! Ledger configuration.

/// Configuration for the need-request ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Minimum description length in characters (default: 20).
    pub min_description_chars: usize,
    /// Maximum description length in characters (default: 1000).
    pub max_description_chars: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            min_description_chars: 20,
            max_description_chars: 1000,
        }
    }
}
