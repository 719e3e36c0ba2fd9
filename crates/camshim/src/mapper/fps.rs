use camshim_core::prelude::Range;
use camshim_legacy::prelude::{PREVIEW_FPS_MAX_INDEX, PREVIEW_FPS_MIN_INDEX};

/// Positional `[min, max]` pair for the legacy preview fps range.
///
/// # Example
/// ```rust
/// use camshim::prelude::*;
///
/// let legacy = fps_range_to_legacy(Range::new(15, 30).unwrap());
/// assert_eq!(legacy[PREVIEW_FPS_MIN_INDEX], 15);
/// assert_eq!(legacy[PREVIEW_FPS_MAX_INDEX], 30);
/// ```
pub fn fps_range_to_legacy(range: Range) -> [i32; 2] {
    let mut legacy = [0; 2];
    legacy[PREVIEW_FPS_MIN_INDEX] = range.lower();
    legacy[PREVIEW_FPS_MAX_INDEX] = range.upper();
    legacy
}
