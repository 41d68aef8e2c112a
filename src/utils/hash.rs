//! Content fingerprints for change detection in watch mode.

/// 64-bit fingerprint of `bytes` (first 8 bytes of the blake3 digest).
pub fn compute(bytes: &[u8]) -> u64 {
    let digest = blake3::hash(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_stable() {
        assert_eq!(compute(b"[base]"), compute(b"[base]"));
        assert_ne!(compute(b"[base]"), compute(b"[build]"));
    }
}
