#![doc = include_str!("../README.md")]

pub mod geometry;
pub mod keys;
pub mod metadata;
pub mod modes;
pub mod request;

pub mod prelude {
    pub use crate::{
        geometry::{Rect, Size},
        keys,
        metadata::{Key, Lookup, MetadataError, MetadataType, MetadataValue, MeteringRectangle, Range},
        modes::{AeAntibandingMode, AeMode, FlashMode},
        request::{
            CameraCharacteristics, CameraCharacteristicsBuilder, CaptureRequest,
            CaptureRequestBuilder,
        },
    };
}
