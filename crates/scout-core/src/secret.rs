use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Owned password or token bytes. The buffer is zeroed when dropped or when
/// [`SecretBuffer::wipe`] is called, so callers can bound how long a credential
/// stays resident after a validation or discovery round trip.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretBuffer {
    bytes: Vec<u8>,
}

impl SecretBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn expose(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn contains_nul(&self) -> bool {
        self.bytes.contains(&0)
    }

    /// Zeroes and truncates the buffer in place.
    pub fn wipe(&mut self) {
        self.bytes.zeroize();
    }
}

impl From<String> for SecretBuffer {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<&[u8]> for SecretBuffer {
    fn from(value: &[u8]) -> Self {
        Self::new(value.to_vec())
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wipe_clears_contents() {
        let mut secret = SecretBuffer::from("hunter2".to_string());
        assert_eq!(secret.len(), 7);
        secret.wipe();
        assert!(secret.is_empty());
        assert_eq!(secret.expose(), b"");
    }

    #[test]
    fn debug_never_prints_secret() {
        let secret = SecretBuffer::from("ghp_abc".to_string());
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("ghp_abc"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn detects_embedded_nul() {
        assert!(SecretBuffer::from(&b"abc\0def"[..]).contains_nul());
        assert!(!SecretBuffer::from(&b"abcdef"[..]).contains_nul());
    }
}
