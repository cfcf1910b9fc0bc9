//! # Materializer Configuration Constants
//!
//! Default allocation sizes for a materialization call. None of these change
//! what a call returns; they only decide how much is reserved up front.
//!
//! ```text
//! INLINE_SLOT_COUNT (16)
//!       │
//!       └─> Slot lists up to this width live on the stack (SmallVec).
//!           Wider result sets spill the slot list to the heap.
//!
//! DEFAULT_ROW_CAPACITY (64)
//!       │
//!       └─> Initial capacity of the ResultSet row vector.
//!
//! DEFAULT_TEXT_CAPACITY (32)
//!       │
//!       └─> Initial byte capacity of each Text/Blob slot buffer.
//!           MAX_TEXT_CAPACITY caps what a builder accepts.
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use crate::config::{DEFAULT_ROW_CAPACITY, INLINE_SLOT_COUNT};
//! ```

// ============================================================================
// SLOT ALLOCATION
// ============================================================================

/// Number of slots stored inline before the slot list moves to the heap.
/// Must match the array length used in `materialize::SlotList`.
pub const INLINE_SLOT_COUNT: usize = 16;

/// Initial byte capacity for Text and Blob slot buffers.
pub const DEFAULT_TEXT_CAPACITY: usize = 32;

/// Largest per-slot buffer a builder will pre-allocate.
/// Larger values still work at read time; the buffer grows on demand.
pub const MAX_TEXT_CAPACITY: usize = 64 * 1024;

const _: () = assert!(
    DEFAULT_TEXT_CAPACITY <= MAX_TEXT_CAPACITY,
    "DEFAULT_TEXT_CAPACITY must be <= MAX_TEXT_CAPACITY"
);

// ============================================================================
// RESULT SET ALLOCATION
// ============================================================================

/// Initial number of rows reserved in a new ResultSet.
pub const DEFAULT_ROW_CAPACITY: usize = 64;

/// Largest up-front row reservation a builder will accept.
pub const MAX_ROW_CAPACITY: usize = 1 << 20;

const _: () = assert!(
    DEFAULT_ROW_CAPACITY <= MAX_ROW_CAPACITY,
    "DEFAULT_ROW_CAPACITY must be <= MAX_ROW_CAPACITY"
);
