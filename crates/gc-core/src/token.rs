use core::fmt;
use std::sync::Arc;

/// Identity of a finalized chemistry configuration.
///
/// Two tokens are equal exactly when they were produced from identical
/// configuration and unit-system contents.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ReadyToken(Arc<str>);

impl ReadyToken {
    pub fn from_digest(hex: impl Into<Arc<str>>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First twelve hex digits, for log lines.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl fmt::Debug for ReadyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReadyToken({})", self.short())
    }
}

impl fmt::Display for ReadyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_follows_digest() {
        let a = ReadyToken::from_digest("abcdef0123456789");
        let b = ReadyToken::from_digest(String::from("abcdef0123456789"));
        assert_eq!(a, b);
        assert_eq!(a.short(), "abcdef012345");
        assert_ne!(a, ReadyToken::from_digest("00"));
    }
}
