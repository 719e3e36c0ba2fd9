//! Capture-request to legacy-parameter translation.
//!
//! Most users call [`RequestMapper::convert_request_metadata`] (or the free
//! [`convert_request_metadata`]) once per request. The individual resolvers are
//! public for callers that only need one conversion.
//!
//! # Example
//! ```rust
//! use camshim::prelude::*;
//!
//! let chars = CameraCharacteristics::builder()
//!     .set(&keys::characteristics::SENSOR_INFO_ACTIVE_ARRAY_SIZE, Rect::with_size(4000, 3000))
//!     .build();
//! let request = CaptureRequest::builder()
//!     .set(&keys::request::CONTROL_AE_TARGET_FPS_RANGE, Range::new(15, 30).unwrap())
//!     .build();
//! let mut params = LegacyParameters::unflatten("flash-mode-values=off").unwrap();
//! convert_request_metadata(&chars, &request, Size::new(640, 480).unwrap(), &mut params)?;
//! assert_eq!(params.preview_fps_range()?, Some([15, 30]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod antibanding;
pub mod config;
pub mod flash;
pub mod fps;
pub mod metering;
pub mod zoom;

mod translate;

pub use antibanding::{
    ANTIBANDING_PREFERENCE, antibanding_to_legacy, resolve_antibanding, select_first_from,
};
pub use config::{DEFAULT_METERING_MODE, MapperConfig, MeteringMode};
pub use flash::resolve_flash_mode;
pub use fps::fps_range_to_legacy;
pub use metering::{
    MeteringConversion, MeteringUpdate, convert_metering_regions, metering_rectangle_to_area,
};
pub use translate::{MapError, ParameterDelta, RequestMapper, convert_request_metadata};
pub use zoom::{
    ZOOM_RATIO_NONE, ZoomCandidate, ZoomResolution, closest_zoom_crop, resolve_crop_zoom,
    zoom_crop_candidates,
};
