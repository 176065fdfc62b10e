//! Class token list
//!
//! Ordered, duplicate-free set of space-separated class tokens.

/// Class list for an element (space-separated tokens, no duplicates)
#[derive(Debug, Clone, Default)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty class list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a space-separated string
    pub fn from_str(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no tokens are present
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if a token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token (no-op on empty or duplicate input)
    pub fn add(&mut self, token: &str) {
        if !token.is_empty() && !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }

    /// Remove a token
    pub fn remove(&mut self, token: &str) {
        self.tokens.retain(|t| t != token);
    }

    /// Toggle a token, returning the new state
    pub fn toggle(&mut self, token: &str) -> bool {
        if self.contains(token) {
            self.remove(token);
            false
        } else {
            self.add(token);
            true
        }
    }

    /// Force a token present or absent
    pub fn set(&mut self, token: &str, present: bool) {
        if present {
            self.add(token);
        } else {
            self.remove(token);
        }
    }

    /// Serialized space-separated value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
