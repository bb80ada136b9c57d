//! Content hashing for deterministic-output verification.
//!
//! Rendering is deterministic and idempotent per scene: the same scene
//! rendered twice at the same settings produces bit-identical frames.
//! A SHA-256 digest over the frame data makes that property checkable.

use sha2::{Digest, Sha256};

use crate::frame::FrameBuffer;

/// A content hash digest (SHA-256, 32 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    bytes: [u8; 32],
}

impl ContentHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn update_with_frame(hasher: &mut Sha256, frame: &FrameBuffer) {
    // Dimensions and format are part of the digest so equal pixel data in
    // different-sized buffers hashes differently.
    hasher.update(frame.width.to_le_bytes());
    hasher.update(frame.height.to_le_bytes());
    hasher.update([frame.format as u8]);
    hasher.update(&frame.data);
}

/// Compute the content hash of a single frame.
pub fn hash_frame(frame: &FrameBuffer) -> ContentHash {
    let mut hasher = Sha256::new();
    update_with_frame(&mut hasher, frame);
    finalize(hasher)
}

/// Compute the content hash of an ordered frame sequence.
pub fn hash_frames(frames: &[FrameBuffer]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update((frames.len() as u64).to_le_bytes());
    for frame in frames {
        update_with_frame(&mut hasher, frame);
    }
    finalize(hasher)
}

fn finalize(hasher: Sha256) -> ContentHash {
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    ContentHash::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_hash_deterministic() {
        let a = FrameBuffer::solid(8, 8, &Color::WHITE);
        let b = FrameBuffer::solid(8, 8, &Color::WHITE);
        assert_eq!(hash_frame(&a), hash_frame(&b));
    }

    #[test]
    fn test_hash_sensitive_to_content_and_size() {
        let a = FrameBuffer::solid(8, 8, &Color::WHITE);
        let b = FrameBuffer::solid(8, 8, &Color::BLACK);
        let c = FrameBuffer::solid(4, 16, &Color::WHITE);
        assert_ne!(hash_frame(&a), hash_frame(&b));
        assert_ne!(hash_frame(&a), hash_frame(&c));
    }

    #[test]
    fn test_hash_sequence_order_matters() {
        let a = FrameBuffer::solid(4, 4, &Color::WHITE);
        let b = FrameBuffer::solid(4, 4, &Color::BLACK);
        let ab = hash_frames(&[a.clone(), b.clone()]);
        let ba = hash_frames(&[b, a]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_hash_hex_format() {
        let hex = hash_frame(&FrameBuffer::solid(2, 2, &Color::BLACK)).to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
