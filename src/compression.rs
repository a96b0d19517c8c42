//! Raw DEFLATE compression applied before encryption
//!
//! Payloads are compressed at maximum effort with no zlib or gzip framing.
//! Inflation is bounded so a malicious or corrupted stream cannot exhaust
//! memory.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use zeroize::Zeroize;

use crate::error::{SealError, SealResult};

/// Upper bound on inflated output (512 MiB)
pub const MAX_DECOMPRESSED_SIZE: u64 = 512 * 1024 * 1024;

/// Minimum growth step for the inflate output buffer
const INFLATE_CHUNK: usize = 64 * 1024;

/// Compress `data` with raw DEFLATE at best compression
pub fn compress(data: &[u8]) -> SealResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(data.len() / 2 + 16), Compression::best());

    encoder
        .write_all(data)
        .map_err(|e| SealError::Io(format!("Compression failed: {}", e)))?;

    encoder
        .finish()
        .map_err(|e| SealError::Io(format!("Compression failed: {}", e)))
}

/// Inflate a raw DEFLATE stream produced by [`compress`]
pub fn decompress(data: &[u8]) -> SealResult<Vec<u8>> {
    decompress_with_limit(data, MAX_DECOMPRESSED_SIZE)
}

/// Inflate `data`, failing if the output would exceed `limit` bytes
///
/// The stream must be complete and must not be followed by trailing bytes.
pub fn decompress_with_limit(data: &[u8], limit: u64) -> SealResult<Vec<u8>> {
    let mut inflater = Decompress::new(false);
    // One byte past the limit is enough to detect an oversized stream
    let ceiling = usize::try_from(limit).unwrap_or(usize::MAX).saturating_add(1);
    let mut out = Vec::with_capacity(
        INFLATE_CHUNK
            .min(data.len().saturating_mul(4) + 64)
            .min(ceiling),
    );

    let result = loop {
        if out.len() == out.capacity() {
            // Double, but never past the ceiling
            let headroom = ceiling - out.len();
            out.reserve_exact(out.capacity().max(INFLATE_CHUNK).min(headroom));
        }

        let before_in = inflater.total_in();
        let before_out = inflater.total_out();
        let offset = before_in as usize;

        let status = match inflater.decompress_vec(&data[offset..], &mut out, FlushDecompress::None) {
            Ok(status) => status,
            Err(e) => break Err(SealError::Decompression(e.to_string())),
        };

        if inflater.total_out() > limit {
            break Err(SealError::Decompression(format!(
                "output exceeds {} byte limit",
                limit
            )));
        }

        match status {
            Status::StreamEnd => {
                if (inflater.total_in() as usize) < data.len() {
                    break Err(SealError::Decompression(
                        "trailing bytes after compressed stream".to_string(),
                    ));
                }
                break Ok(());
            }
            _ if inflater.total_in() == before_in && inflater.total_out() == before_out => {
                break Err(SealError::Decompression(
                    "compressed stream is truncated".to_string(),
                ));
            }
            _ => {}
        }
    };

    match result {
        Ok(()) => Ok(out),
        Err(e) => {
            out.zeroize();
            Err(e)
        }
    }
}
