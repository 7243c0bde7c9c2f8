//! Recipient batching
//!
//! Splits a recipient list into contiguous chunks bounded by the payload
//! ceiling. The ceiling is re-checked here because mapping time and send
//! time can observe different configuration.

use crate::core::dispatch::DispatchError;
use crate::core::extract::Recipient;
use crate::core::payload::MAX_ENTRIES_PER_PAYLOAD;

/// Batch size applied when the descriptor carries none.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Splits recipients in original order into chunks of exactly `batch_size`,
/// except possibly the final chunk, which holds the remainder.
///
/// Fails fast with [`DispatchError::BatchSizeExceeded`] before splitting if
/// the size is over the per-request ceiling.
pub fn split(
    recipients: &[Recipient],
    batch_size: usize,
) -> Result<Vec<&[Recipient]>, DispatchError> {
    if batch_size > MAX_ENTRIES_PER_PAYLOAD {
        return Err(DispatchError::BatchSizeExceeded { size: batch_size });
    }

    let size = if batch_size == 0 {
        DEFAULT_BATCH_SIZE
    } else {
        batch_size
    };

    Ok(recipients.chunks(size).collect())
}
