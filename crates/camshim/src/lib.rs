#![doc = include_str!("../README.md")]

pub use camshim_core as core;
pub use camshim_legacy as legacy;

pub mod mapper;

pub mod prelude {
    pub use crate::mapper::{
        ANTIBANDING_PREFERENCE, DEFAULT_METERING_MODE, MapError, MapperConfig, MeteringConversion,
        MeteringMode, MeteringUpdate, ParameterDelta, RequestMapper, ZOOM_RATIO_NONE,
        ZoomCandidate, ZoomResolution, antibanding_to_legacy, closest_zoom_crop,
        convert_metering_regions, convert_request_metadata, fps_range_to_legacy,
        metering_rectangle_to_area, resolve_antibanding, resolve_crop_zoom, resolve_flash_mode,
        select_first_from, zoom_crop_candidates,
    };
    pub use camshim_core::prelude::*;
    pub use camshim_legacy::prelude::*;
}
