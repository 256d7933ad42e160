//! Small-collection aliases used by the corner ring.
//!
//! Voronoi cells on a sphere have six corners on average, so ring storage is
//! kept inline up to a modest size and spills to the heap beyond it.

#![forbid(unsafe_code)]

use smallvec::SmallVec;

/// Inline-first vector: stack allocated for up to `N` elements.
///
/// # Examples
///
/// ```rust
/// use spherical_voronoi::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<i32, 8> = SmallBuffer::new();
/// for i in 0..5 {
///     buffer.push(i);
/// }
/// assert!(!buffer.spilled());
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Inline capacity for per-corner storage.
///
/// Typical cells have 5 to 7 corners; 8 covers nearly all of them.
pub const CORNER_BUFFER_SIZE: usize = 8;

/// Per-corner storage of a ring (corners, edges, angles).
pub type CornerBuffer<T> = SmallBuffer<T, CORNER_BUFFER_SIZE>;
