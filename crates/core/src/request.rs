use std::collections::HashMap;

use crate::metadata::{Key, Lookup, MetadataType, MetadataValue};

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
struct Entries(HashMap<String, MetadataValue>);

impl Entries {
    fn lookup<T: MetadataType>(&self, key: &Key<T>) -> Lookup<T> {
        match self.0.get(key.name()) {
            None => Lookup::Unset,
            Some(value) => T::from_value(value).map_or(Lookup::Unrecognized, Lookup::Value),
        }
    }

    fn raw(&self, name: &str) -> Option<&MetadataValue> {
        self.0.get(name)
    }
}

/// Immutable per-capture control values keyed by typed [`Key`]s.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::*;
///
/// let request = CaptureRequest::builder()
///     .set(&keys::request::FLASH_MODE, FlashMode::Torch)
///     .build();
/// assert_eq!(request.get(&keys::request::FLASH_MODE), Some(FlashMode::Torch));
/// assert!(request.lookup(&keys::request::CONTROL_AE_MODE).is_unset());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaptureRequest {
    entries: Entries,
}

impl CaptureRequest {
    /// Start building a request.
    pub fn builder() -> CaptureRequestBuilder {
        CaptureRequestBuilder::default()
    }

    /// Typed lookup distinguishing unset from undecodable values.
    pub fn lookup<T: MetadataType>(&self, key: &Key<T>) -> Lookup<T> {
        self.entries.lookup(key)
    }

    /// Typed value, or `None` when unset or undecodable.
    pub fn get<T: MetadataType>(&self, key: &Key<T>) -> Option<T> {
        self.lookup(key).value()
    }

    /// Stored payload for a key name.
    pub fn get_raw(&self, name: &str) -> Option<&MetadataValue> {
        self.entries.raw(name)
    }

    pub fn len(&self) -> usize {
        self.entries.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.0.is_empty()
    }
}

/// Builder for [`CaptureRequest`].
#[derive(Debug, Clone, Default)]
pub struct CaptureRequestBuilder {
    entries: Entries,
}

impl CaptureRequestBuilder {
    /// Set a typed value.
    pub fn set<T: MetadataType>(mut self, key: &Key<T>, value: T) -> Self {
        self.entries
            .0
            .insert(key.name().to_string(), value.into_value());
        self
    }

    /// Store an arbitrary payload, e.g. a vendor discriminant with no typed equivalent.
    pub fn set_raw(mut self, name: impl Into<String>, value: MetadataValue) -> Self {
        self.entries.0.insert(name.into(), value);
        self
    }

    pub fn build(self) -> CaptureRequest {
        CaptureRequest {
            entries: self.entries,
        }
    }
}

/// Static device capabilities.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::*;
///
/// let chars = CameraCharacteristics::builder()
///     .set(&keys::characteristics::SENSOR_INFO_ACTIVE_ARRAY_SIZE, Rect::with_size(4000, 3000))
///     .build();
/// let active = chars.get(&keys::characteristics::SENSOR_INFO_ACTIVE_ARRAY_SIZE).unwrap();
/// assert_eq!(active.width(), 4000);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraCharacteristics {
    entries: Entries,
}

impl CameraCharacteristics {
    pub fn builder() -> CameraCharacteristicsBuilder {
        CameraCharacteristicsBuilder::default()
    }

    pub fn lookup<T: MetadataType>(&self, key: &Key<T>) -> Lookup<T> {
        self.entries.lookup(key)
    }

    pub fn get<T: MetadataType>(&self, key: &Key<T>) -> Option<T> {
        self.lookup(key).value()
    }
}

/// Builder for [`CameraCharacteristics`].
#[derive(Debug, Clone, Default)]
pub struct CameraCharacteristicsBuilder {
    entries: Entries,
}

impl CameraCharacteristicsBuilder {
    pub fn set<T: MetadataType>(mut self, key: &Key<T>, value: T) -> Self {
        self.entries
            .0
            .insert(key.name().to_string(), value.into_value());
        self
    }

    pub fn build(self) -> CameraCharacteristics {
        CameraCharacteristics {
            entries: self.entries,
        }
    }
}
