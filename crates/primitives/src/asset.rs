//! Asset type definitions.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Stock ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_from_str() {
        let sym: Symbol = "AAPL".into();
        assert_eq!(sym.as_str(), "AAPL");
        assert_eq!(sym.to_string(), "AAPL");
    }

    #[test]
    fn symbols_order_lexically() {
        let mut symbols = vec![Symbol::new("MSFT"), Symbol::new("AAPL"), Symbol::new("GOOG")];
        symbols.sort();
        assert_eq!(symbols[0].as_str(), "AAPL");
        assert_eq!(symbols[2].as_str(), "MSFT");
    }
}
