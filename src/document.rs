//! Credential document fetched from the master node

use std::fmt;

/// Raw kubeconfig text as read from the master node.
///
/// Treated as opaque text except for [`CredentialDocument::rewrite_address`].
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialDocument {
    content: String,
}

impl CredentialDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Replace every literal occurrence of `private` with `public`.
    ///
    /// Plain substring replacement with no token boundaries: an address that
    /// is a prefix of another (10.0.0.5 inside 10.0.0.50) is rewritten too.
    pub fn rewrite_address(&self, private: &str, public: &str) -> Self {
        if private.is_empty() {
            return self.clone();
        }
        Self {
            content: self.content.replace(private, public),
        }
    }
}

// Debug deliberately hides the content, it carries client keys.
impl fmt::Debug for CredentialDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialDocument")
            .field("len", &self.content.len())
            .finish()
    }
}
