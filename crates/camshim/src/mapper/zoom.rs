//! Nearest discrete zoom level for a requested sensor crop.
//!
//! Each legacy zoom index scales the active array by `100 / ratio` around its
//! centre (the *reported* crop); the preview shows the largest centred part of
//! that crop with the preview's aspect ratio (the *preview* crop). A request is
//! clamped to the active array and fitted to the preview aspect ratio, then
//! matched against every preview crop by summed edge distance. Ties go to the
//! lower index.

use camshim_core::prelude::{Rect, Size};
use camshim_legacy::prelude::LegacyParameters;
use tracing::{debug, trace, warn};

/// Ratio (hundredths) of an unzoomed crop.
pub const ZOOM_RATIO_NONE: i32 = 100;

/// Crops produced by one discrete zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomCandidate {
    pub index: usize,
    pub ratio: i32,
    pub reported_crop: Rect,
    pub preview_crop: Rect,
}

/// Outcome of crop/zoom resolution.
///
/// # Example
/// ```rust
/// use camshim::prelude::*;
///
/// let active = Rect::with_size(4000, 3000);
/// let preview = Size::new(640, 480).unwrap();
/// let zoom = closest_zoom_crop(active, preview, &[100, 200], Rect::new(1000, 750, 3000, 2250));
/// assert_eq!(zoom.index, Some(1));
/// assert_eq!(zoom.reported_crop, Rect::new(1000, 750, 3000, 2250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomResolution {
    /// Selected legacy zoom index; `None` when the device cannot zoom.
    pub index: Option<usize>,
    /// Crop in active-array coordinates reported back to the caller.
    pub reported_crop: Rect,
    /// Part of the sensor visible in the preview stream.
    pub preview_crop: Rect,
}

impl ZoomResolution {
    /// Full active array, no zoom index.
    pub fn unzoomed(active_array: Rect) -> Self {
        Self {
            index: None,
            reported_crop: active_array,
            preview_crop: active_array,
        }
    }
}

/// Crop rectangles for every advertised zoom ratio, in index order.
///
/// Ratios below 1x are treated as 1x.
pub fn zoom_crop_candidates(active_array: Rect, preview: Size, ratios: &[i32]) -> Vec<ZoomCandidate> {
    let width = active_array.width().max(0) as i64;
    let height = active_array.height().max(0) as i64;
    ratios
        .iter()
        .enumerate()
        .map(|(index, &ratio)| {
            let effective = ratio.max(ZOOM_RATIO_NONE) as i64;
            let crop_w = (width * ZOOM_RATIO_NONE as i64 / effective).max(1) as i32;
            let crop_h = (height * ZOOM_RATIO_NONE as i64 / effective).max(1) as i32;
            let reported_crop = active_array.centered(crop_w, crop_h);
            ZoomCandidate {
                index,
                ratio,
                reported_crop,
                preview_crop: reported_crop.fit_aspect(preview),
            }
        })
        .collect()
}

/// Pick the zoom level whose preview crop is closest to `requested`.
///
/// An empty ratio list, or an empty active array, means no zoom index.
pub fn closest_zoom_crop(
    active_array: Rect,
    preview: Size,
    ratios: &[i32],
    requested: Rect,
) -> ZoomResolution {
    if active_array.is_empty() {
        debug!(%active_array, "empty active array, no zoom crop to choose");
        return ZoomResolution::unzoomed(active_array);
    }
    let target = match requested.intersect(&active_array) {
        Some(clamped) => clamped.fit_aspect(preview),
        None => {
            debug!(%requested, %active_array, "crop region outside active array, using full array");
            active_array.fit_aspect(preview)
        }
    };

    let mut best: Option<(u64, ZoomCandidate)> = None;
    for candidate in zoom_crop_candidates(active_array, preview, ratios) {
        let distance = candidate.preview_crop.edge_distance(&target);
        trace!(index = candidate.index, ratio = candidate.ratio, distance, "zoom candidate");
        // Strict comparison keeps the lowest index on ties.
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }

    match best {
        Some((_, chosen)) => ZoomResolution {
            index: Some(chosen.index),
            reported_crop: chosen.reported_crop,
            preview_crop: chosen.preview_crop,
        },
        None => ZoomResolution::unzoomed(active_array),
    }
}

/// Resolve zoom against the device's legacy capabilities.
///
/// `active_array` is expected at the origin; an absent `requested` crop is the
/// full active array.
pub fn resolve_crop_zoom(
    params: &LegacyParameters,
    active_array: Rect,
    preview: Size,
    requested: Option<Rect>,
) -> ZoomResolution {
    let requested = requested.unwrap_or(active_array);
    trace!(%requested, "user crop region");
    if !params.is_zoom_supported() {
        debug!("zoom is not supported");
        return ZoomResolution::unzoomed(active_array);
    }
    match params.zoom_ratios() {
        Ok(ratios) => closest_zoom_crop(active_array, preview, &ratios, requested),
        Err(err) => {
            warn!(%err, "malformed zoom ratios, treating zoom as unsupported");
            ZoomResolution::unzoomed(active_array)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVE: Rect = Rect::with_size(4000, 3000);

    fn preview_4_3() -> Size {
        Size::new(640, 480).unwrap()
    }

    fn zoom_params(ratios: &[i32]) -> LegacyParameters {
        let mut params = LegacyParameters::new();
        params.set_zoom_ratios(ratios);
        params
    }

    #[test]
    fn candidates_scale_around_centre() {
        let candidates = zoom_crop_candidates(ACTIVE, preview_4_3(), &[100, 150, 400]);
        assert_eq!(candidates[0].reported_crop, ACTIVE);
        assert_eq!(candidates[1].reported_crop, Rect::new(667, 500, 3333, 2500));
        assert_eq!(candidates[2].reported_crop, Rect::new(1500, 1125, 2500, 1875));
    }

    #[test]
    fn exact_match_selects_that_level() {
        let zoom = closest_zoom_crop(
            ACTIVE,
            preview_4_3(),
            &[100, 200, 400],
            Rect::new(1500, 1125, 2500, 1875),
        );
        assert_eq!(zoom.index, Some(2));
        assert_eq!(zoom.preview_crop, Rect::new(1500, 1125, 2500, 1875));
    }

    #[test]
    fn inexact_request_picks_nearest_level() {
        let zoom = closest_zoom_crop(
            ACTIVE,
            preview_4_3(),
            &[100, 200, 400],
            Rect::new(1200, 900, 2800, 2100),
        );
        assert_eq!(zoom.index, Some(1));
        assert_eq!(zoom.reported_crop, Rect::new(1000, 750, 3000, 2250));
    }

    #[test]
    fn equidistant_candidates_prefer_lower_index() {
        // Halfway between 1x and 2x.
        let zoom = closest_zoom_crop(
            ACTIVE,
            preview_4_3(),
            &[100, 200],
            Rect::new(500, 375, 3500, 2625),
        );
        assert_eq!(zoom.index, Some(0));
    }

    #[test]
    fn preview_crop_follows_preview_aspect() {
        let wide = Size::new(1920, 1080).unwrap();
        let zoom = closest_zoom_crop(ACTIVE, wide, &[100, 200], ACTIVE);
        assert_eq!(zoom.index, Some(0));
        assert_eq!(zoom.reported_crop, ACTIVE);
        assert_eq!(zoom.preview_crop, Rect::new(0, 375, 4000, 2625));
    }

    #[test]
    fn crop_outside_active_array_falls_back_to_full_array() {
        let zoom = closest_zoom_crop(
            ACTIVE,
            preview_4_3(),
            &[100, 200],
            Rect::new(5000, 5000, 6000, 6000),
        );
        assert_eq!(zoom.index, Some(0));
    }

    #[test]
    fn unsupported_zoom_reports_full_array() {
        let params = LegacyParameters::new();
        let zoom = resolve_crop_zoom(
            &params,
            ACTIVE,
            preview_4_3(),
            Some(Rect::new(1000, 750, 3000, 2250)),
        );
        assert_eq!(zoom, ZoomResolution::unzoomed(ACTIVE));
    }

    #[test]
    fn absent_request_matches_full_array_request() {
        let params = zoom_params(&[100, 125, 200, 300]);
        let wide = Size::new(1280, 720).unwrap();
        assert_eq!(
            resolve_crop_zoom(&params, ACTIVE, wide, None),
            resolve_crop_zoom(&params, ACTIVE, wide, Some(ACTIVE))
        );
    }

    #[test]
    fn supported_flag_without_ratios_is_unzoomed() {
        let params = LegacyParameters::unflatten("zoom-supported=true").unwrap();
        let zoom = resolve_crop_zoom(&params, ACTIVE, preview_4_3(), None);
        assert_eq!(zoom.index, None);
        assert_eq!(zoom.preview_crop, ACTIVE);
    }

    #[test]
    fn malformed_ratio_list_is_unzoomed() {
        for raw in ["100,x,400", "100,,400"] {
            let params =
                LegacyParameters::unflatten(&format!("zoom-supported=true;zoom-ratios={raw}"))
                    .unwrap();
            let zoom = resolve_crop_zoom(
                &params,
                ACTIVE,
                preview_4_3(),
                Some(Rect::new(1500, 1125, 2500, 1875)),
            );
            assert_eq!(zoom, ZoomResolution::unzoomed(ACTIVE), "ratios {raw}");
        }
    }

    #[test]
    fn empty_active_array_is_unzoomed() {
        let empty = Rect::with_size(0, 0);
        let zoom = closest_zoom_crop(empty, preview_4_3(), &[100, 200], empty);
        assert_eq!(zoom, ZoomResolution::unzoomed(empty));
    }
}
