//! # Output Blobs
//!
//! An `OutputBlob` is the ordered sequence of sub-outputs a validator emits
//! for an accepted proof. The engine treats each sub-output as opaque bytes
//! and only fingerprints it.
//!
//! ## Wire Form
//!
//! ```text
//! u32 BE  count
//! repeat count times:
//!   u32 BE  length
//!   [u8]    sub-output bytes
//! ```
//!
//! Decoding rejects truncated input and trailing bytes, so every byte
//! string decodes to at most one blob. Encoding rejects a count or a
//! sub-output length that does not fit in a `u32`.

use pve_core::{fingerprint, Fingerprint};
use thiserror::Error;

/// Error encoding or decoding an [`OutputBlob`] wire form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlobError {
    /// The input ended before the declared content.
    #[error("output blob truncated at byte {offset}")]
    Truncated {
        /// Offset at which more bytes were expected.
        offset: usize,
    },
    /// Bytes remain after the declared content.
    #[error("output blob has {count} trailing bytes")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        count: usize,
    },
    /// A count or length exceeds the 32-bit wire field.
    #[error("output blob field of {len} exceeds the u32 wire limit")]
    TooLarge {
        /// The value that does not fit.
        len: usize,
    },
}

/// Ordered sub-outputs produced by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputBlob {
    sub_outputs: Vec<Vec<u8>>,
}

impl OutputBlob {
    /// Build a blob from sub-outputs, preserving order.
    pub fn new(sub_outputs: Vec<Vec<u8>>) -> Self {
        Self { sub_outputs }
    }

    /// The sub-outputs in emission order.
    pub fn sub_outputs(&self) -> &[Vec<u8>] {
        &self.sub_outputs
    }

    /// Number of sub-outputs.
    pub fn len(&self) -> usize {
        self.sub_outputs.len()
    }

    /// Whether the blob carries no sub-outputs.
    pub fn is_empty(&self) -> bool {
        self.sub_outputs.is_empty()
    }

    /// Fingerprint of every sub-output, in order.
    pub fn fingerprints(&self) -> Vec<Fingerprint> {
        self.sub_outputs.iter().map(|s| fingerprint(s)).collect()
    }

    /// Encode to the length-prefixed wire form.
    ///
    /// # Errors
    ///
    /// [`BlobError::TooLarge`] if the count or any sub-output length
    /// exceeds `u32::MAX`.
    pub fn encode(&self) -> Result<Vec<u8>, BlobError> {
        let body: usize = self.sub_outputs.iter().map(|s| 4 + s.len()).sum();
        let mut out = Vec::with_capacity(4 + body);
        out.extend_from_slice(&length_prefix(self.sub_outputs.len())?);
        for sub in &self.sub_outputs {
            out.extend_from_slice(&length_prefix(sub.len())?);
            out.extend_from_slice(sub);
        }
        Ok(out)
    }

    /// Decode from the length-prefixed wire form.
    pub fn decode(bytes: &[u8]) -> Result<Self, BlobError> {
        let mut offset = 0usize;
        let count = read_u32(bytes, &mut offset)? as usize;
        // Each sub-output needs at least its 4-byte length prefix.
        if count > bytes.len().saturating_sub(offset) / 4 {
            return Err(BlobError::Truncated { offset });
        }
        let mut sub_outputs = Vec::with_capacity(count);
        for _ in 0..count {
            let len = read_u32(bytes, &mut offset)? as usize;
            let end = offset
                .checked_add(len)
                .filter(|end| *end <= bytes.len())
                .ok_or(BlobError::Truncated { offset })?;
            sub_outputs.push(bytes[offset..end].to_vec());
            offset = end;
        }
        if offset != bytes.len() {
            return Err(BlobError::TrailingBytes {
                count: bytes.len() - offset,
            });
        }
        Ok(Self { sub_outputs })
    }
}

impl From<Vec<Vec<u8>>> for OutputBlob {
    fn from(sub_outputs: Vec<Vec<u8>>) -> Self {
        Self::new(sub_outputs)
    }
}

fn length_prefix(len: usize) -> Result<[u8; 4], BlobError> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| BlobError::TooLarge { len })
}

fn read_u32(bytes: &[u8], offset: &mut usize) -> Result<u32, BlobError> {
    let start = *offset;
    let raw: [u8; 4] = bytes
        .get(start..start + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or(BlobError::Truncated { offset: start })?;
    *offset = start + 4;
    Ok(u32::from_be_bytes(raw))
}
