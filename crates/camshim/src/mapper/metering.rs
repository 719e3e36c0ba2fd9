use camshim_core::prelude::{MeteringRectangle, Rect};
use camshim_legacy::prelude::{
    AREA_COORD_MAX, AREA_COORD_MIN, AREA_WEIGHT_MAX, AREA_WEIGHT_MIN, Area,
};
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::config::MeteringMode;
use super::zoom::ZoomResolution;

/// Legacy metering-area write produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "areas", rename_all = "snake_case"))]
pub enum MeteringUpdate {
    /// Device has no metering support; clear the list.
    Cleared,
    /// Replace the list with these areas (never empty).
    Areas(SmallVec<[Area; 4]>),
}

impl MeteringUpdate {
    pub fn areas(&self) -> &[Area] {
        match self {
            MeteringUpdate::Cleared => &[],
            MeteringUpdate::Areas(areas) => areas,
        }
    }
}

/// Result of converting metering regions, including how many were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeteringConversion {
    pub update: MeteringUpdate,
    /// Weighted regions beyond the device maximum that were ignored.
    pub truncated: usize,
}

/// Convert requested regions into the legacy area list.
///
/// # Example
/// ```rust
/// use camshim::prelude::*;
///
/// let active = Rect::with_size(4000, 3000);
/// let zoom = ZoomResolution::unzoomed(active);
/// let regions = [MeteringRectangle::new(0, 0, 2000, 1500, 0).unwrap()];
/// let out = convert_metering_regions(Some(&regions), 1, active, &zoom, MeteringMode::Mapped);
/// assert_eq!(out.update, MeteringUpdate::Areas(smallvec::smallvec![Area::DEFAULT]));
/// ```
pub fn convert_metering_regions(
    regions: Option<&[MeteringRectangle]>,
    max_areas: usize,
    active_array: Rect,
    zoom: &ZoomResolution,
    mode: MeteringMode,
) -> MeteringConversion {
    if max_areas == 0 {
        debug!("metering areas not supported, clearing");
        return MeteringConversion {
            update: MeteringUpdate::Cleared,
            truncated: 0,
        };
    }

    let weighted: Vec<&MeteringRectangle> = regions
        .unwrap_or_default()
        .iter()
        .filter(|r| !r.is_dont_care())
        .collect();
    if weighted.is_empty() {
        return MeteringConversion {
            update: MeteringUpdate::Areas(smallvec::smallvec![Area::DEFAULT]),
            truncated: 0,
        };
    }

    let truncated = weighted.len().saturating_sub(max_areas);
    if truncated > 0 {
        warn!(
            requested = weighted.len(),
            max_areas, "too many requested metering regions, ignoring all beyond the first {max_areas}"
        );
    }

    let areas = weighted
        .into_iter()
        .take(max_areas)
        .map(|region| match mode {
            MeteringMode::FullFrame => Area::DEFAULT,
            MeteringMode::Mapped => {
                metering_rectangle_to_area(active_array, zoom.preview_crop, region)
                    .unwrap_or_else(|| {
                        warn!(
                            region = %region.rect(),
                            "metering region not mappable into visible crop, using full frame"
                        );
                        Area::DEFAULT
                    })
            }
        })
        .collect();

    MeteringConversion {
        update: MeteringUpdate::Areas(areas),
        truncated,
    }
}

/// Map a region from active-array pixels into the normalized legacy space.
///
/// The visible crop spans `[-1000, 1000]` on both axes; parts of the region
/// outside the active array or the crop are cut off. Returns `None` when nothing
/// of the region remains visible, or when what remains is smaller than one
/// normalized unit.
///
/// # Example
/// ```rust
/// use camshim::prelude::*;
///
/// let active = Rect::with_size(4000, 3000);
/// let region = MeteringRectangle::new(1000, 750, 2000, 1500, 10).unwrap();
/// let area = metering_rectangle_to_area(active, active, &region).unwrap();
/// assert_eq!(area.rect(), Rect::new(-500, -500, 500, 500));
/// assert_eq!(area.weight(), 10);
/// ```
pub fn metering_rectangle_to_area(
    active_array: Rect,
    visible_crop: Rect,
    region: &MeteringRectangle,
) -> Option<Area> {
    let visible = region
        .rect()
        .intersect(&active_array)?
        .intersect(&visible_crop)?;

    let span = (AREA_COORD_MAX - AREA_COORD_MIN) as i64;
    let scale = |value: i32, origin: i32, extent: i32| -> i32 {
        let offset = (value as i64 - origin as i64) * span / extent.max(1) as i64;
        (AREA_COORD_MIN as i64 + offset).clamp(AREA_COORD_MIN as i64, AREA_COORD_MAX as i64) as i32
    };
    let mapped = Rect::new(
        scale(visible.left, visible_crop.left, visible_crop.width()),
        scale(visible.top, visible_crop.top, visible_crop.height()),
        scale(visible.right, visible_crop.left, visible_crop.width()),
        scale(visible.bottom, visible_crop.top, visible_crop.height()),
    );
    let weight = region.weight().clamp(AREA_WEIGHT_MIN, AREA_WEIGHT_MAX);
    // Regions narrower than one normalized unit collapse to an empty rect.
    Area::new(mapped, weight).ok()
}
