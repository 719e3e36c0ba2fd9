//! Well-known metadata keys.

use crate::geometry::Rect;
use crate::metadata::{Key, MeteringRectangle, Range};
use crate::modes::{AeAntibandingMode, AeMode, FlashMode};

/// Keys read from a [`CaptureRequest`](crate::request::CaptureRequest).
pub mod request {
    use super::*;

    /// Requested sensor crop in active-array pixels.
    pub const SCALER_CROP_REGION: Key<Rect> = Key::new("android.scaler.cropRegion");
    pub const CONTROL_AE_ANTIBANDING_MODE: Key<AeAntibandingMode> =
        Key::new("android.control.aeAntibandingMode");
    pub const CONTROL_AE_REGIONS: Key<Vec<MeteringRectangle>> =
        Key::new("android.control.aeRegions");
    pub const CONTROL_AE_TARGET_FPS_RANGE: Key<Range> =
        Key::new("android.control.aeTargetFpsRange");
    pub const CONTROL_AE_MODE: Key<AeMode> = Key::new("android.control.aeMode");
    pub const FLASH_MODE: Key<FlashMode> = Key::new("android.flash.mode");
    pub const CONTROL_AWB_LOCK: Key<bool> = Key::new("android.control.awbLock");
}

/// Keys read from [`CameraCharacteristics`](crate::request::CameraCharacteristics).
pub mod characteristics {
    use super::*;

    /// Pixel rectangle of the sensor used for capture.
    pub const SENSOR_INFO_ACTIVE_ARRAY_SIZE: Key<Rect> =
        Key::new("android.sensor.info.activeArraySize");
}
