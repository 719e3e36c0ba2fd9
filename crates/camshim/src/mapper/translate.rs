use camshim_core::prelude::*;
use camshim_legacy::prelude::*;
use tracing::{debug, trace};

use super::antibanding::resolve_antibanding;
use super::config::MapperConfig;
use super::flash::resolve_flash_mode;
use super::fps::fps_range_to_legacy;
use super::metering::{MeteringUpdate, convert_metering_regions};
use super::zoom::{ZoomResolution, resolve_crop_zoom};

/// Misuse of the mapper; capability mismatches are never errors.
///
/// # Example
/// ```rust
/// use camshim::prelude::*;
///
/// let err = RequestMapper::new()
///     .translate(
///         &CameraCharacteristics::default(),
///         &CaptureRequest::default(),
///         Size::new(640, 480).unwrap(),
///         &LegacyParameters::new(),
///     )
///     .unwrap_err();
/// assert_eq!(err.code(), "missing_characteristic");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("camera characteristic {0} is missing")]
    MissingCharacteristic(&'static str),
    #[error("camera characteristic {0} has an unexpected type")]
    InvalidCharacteristic(&'static str),
    #[error("active array {0} has negative dimensions")]
    InvalidActiveArray(Rect),
}

impl MapError {
    /// Stable string code for error classification.
    pub fn code(&self) -> &'static str {
        match self {
            MapError::MissingCharacteristic(_) => "missing_characteristic",
            MapError::InvalidCharacteristic(_) => "invalid_characteristic",
            MapError::InvalidActiveArray(_) => "invalid_active_array",
        }
    }
}

/// Every legacy write derived from one capture request.
///
/// Produced by [`RequestMapper::translate`] without touching the caller's
/// parameters; [`ParameterDelta::apply_to`] merges it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterDelta {
    /// Zoom index (written only when present) and the resulting crops.
    pub zoom: ZoomResolution,
    /// Anti-banding to write; `None` leaves the parameter untouched.
    pub antibanding: Option<LegacyAntibanding>,
    pub metering: MeteringUpdate,
    /// Weighted metering regions ignored for exceeding the device maximum.
    pub metering_truncated: usize,
    /// `[min, max]`, only when the request carried a target range.
    pub preview_fps_range: Option<[i32; 2]>,
    pub flash_mode: LegacyFlashMode,
    pub auto_white_balance_lock: bool,
}

impl ParameterDelta {
    /// Write the delta into `params`.
    pub fn apply_to(&self, params: &mut LegacyParameters) {
        if let Some(index) = self.zoom.index {
            params.set_zoom(index as i32);
        }
        if let Some(mode) = self.antibanding {
            params.set_antibanding(mode);
        }
        match &self.metering {
            MeteringUpdate::Cleared => params.set_metering_areas(None),
            MeteringUpdate::Areas(areas) => params.set_metering_areas(Some(areas.as_slice())),
        }
        if let Some(range) = self.preview_fps_range {
            params.set_preview_fps_range(range[PREVIEW_FPS_MIN_INDEX], range[PREVIEW_FPS_MAX_INDEX]);
        }
        params.set_flash_mode(self.flash_mode);
        params.set_auto_white_balance_lock(self.auto_white_balance_lock);
    }
}

/// Translates capture requests for one legacy device.
///
/// Stateless apart from its configuration, so a single mapper can serve
/// concurrent requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestMapper {
    config: MapperConfig,
}

impl RequestMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Compute the legacy writes for `request` without mutating anything.
    ///
    /// `params` is only consulted for device capabilities.
    pub fn translate(
        &self,
        characteristics: &CameraCharacteristics,
        request: &CaptureRequest,
        preview_size: Size,
        params: &LegacyParameters,
    ) -> Result<ParameterDelta, MapError> {
        let active_array = active_array_size(characteristics)?;

        // Crop/zoom comes first: metering maps regions through the chosen crop.
        let zoom = resolve_crop_zoom(
            params,
            active_array,
            preview_size,
            request.get(&keys::request::SCALER_CROP_REGION),
        );
        debug!(
            index = ?zoom.index,
            reported = %zoom.reported_crop,
            preview = %zoom.preview_crop,
            "zoom calculated"
        );

        let antibanding = resolve_antibanding(
            request.lookup(&keys::request::CONTROL_AE_ANTIBANDING_MODE),
            &params.supported_antibanding(),
        );

        let regions = request.get(&keys::request::CONTROL_AE_REGIONS);
        let metering = convert_metering_regions(
            regions.as_deref(),
            params.max_num_metering_areas(),
            active_array,
            &zoom,
            self.config.metering_mode,
        );

        let preview_fps_range = request
            .get(&keys::request::CONTROL_AE_TARGET_FPS_RANGE)
            .map(fps_range_to_legacy);

        let flash_mode = resolve_flash_mode(
            request.lookup(&keys::request::CONTROL_AE_MODE),
            request.lookup(&keys::request::FLASH_MODE),
            &params.supported_flash_modes(),
        );

        let auto_white_balance_lock = request
            .get(&keys::request::CONTROL_AWB_LOCK)
            .unwrap_or(false);

        let delta = ParameterDelta {
            zoom,
            antibanding,
            metering: metering.update,
            metering_truncated: metering.truncated,
            preview_fps_range,
            flash_mode,
            auto_white_balance_lock,
        };
        trace!(?delta, "request translated");
        Ok(delta)
    }

    /// Translate `request` and write the result into `params`.
    ///
    /// On error `params` is left unchanged.
    pub fn convert_request_metadata(
        &self,
        characteristics: &CameraCharacteristics,
        request: &CaptureRequest,
        preview_size: Size,
        params: &mut LegacyParameters,
    ) -> Result<ParameterDelta, MapError> {
        let delta = self.translate(characteristics, request, preview_size, params)?;
        delta.apply_to(params);
        Ok(delta)
    }
}

/// Translate with the default configuration and write into `params`.
pub fn convert_request_metadata(
    characteristics: &CameraCharacteristics,
    request: &CaptureRequest,
    preview_size: Size,
    params: &mut LegacyParameters,
) -> Result<ParameterDelta, MapError> {
    RequestMapper::new().convert_request_metadata(characteristics, request, preview_size, params)
}

/// Active array moved to the origin, the frame of reference for crops and regions.
fn active_array_size(characteristics: &CameraCharacteristics) -> Result<Rect, MapError> {
    let key = keys::characteristics::SENSOR_INFO_ACTIVE_ARRAY_SIZE;
    let active = match characteristics.lookup(&key) {
        Lookup::Value(rect) => rect,
        Lookup::Unset => return Err(MapError::MissingCharacteristic(key.name())),
        Lookup::Unrecognized => return Err(MapError::InvalidCharacteristic(key.name())),
    };
    if active.width() < 0 || active.height() < 0 {
        return Err(MapError::InvalidActiveArray(active));
    }
    Ok(active.at_origin())
}
