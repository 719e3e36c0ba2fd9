use std::{collections::BTreeMap, fmt, str::FromStr};

use smallvec::SmallVec;
use tracing::debug;

use crate::ParameterError;
use crate::area::{Area, decode_areas, encode_areas};
use crate::modes::{LegacyAntibanding, LegacyFlashMode};

pub const KEY_ANTIBANDING: &str = "antibanding";
pub const KEY_SUPPORTED_ANTIBANDING: &str = "antibanding-values";
pub const KEY_FLASH_MODE: &str = "flash-mode";
pub const KEY_SUPPORTED_FLASH_MODES: &str = "flash-mode-values";
pub const KEY_ZOOM: &str = "zoom";
pub const KEY_ZOOM_SUPPORTED: &str = "zoom-supported";
pub const KEY_ZOOM_RATIOS: &str = "zoom-ratios";
pub const KEY_MAX_ZOOM: &str = "max-zoom";
pub const KEY_METERING_AREAS: &str = "metering-areas";
pub const KEY_MAX_NUM_METERING_AREAS: &str = "max-num-metering-areas";
pub const KEY_PREVIEW_FPS_RANGE: &str = "preview-fps-range";
pub const KEY_AUTO_WHITEBALANCE_LOCK: &str = "auto-whitebalance-lock";

/// Position of the minimum in a preview fps pair.
pub const PREVIEW_FPS_MIN_INDEX: usize = 0;
/// Position of the maximum in a preview fps pair.
pub const PREVIEW_FPS_MAX_INDEX: usize = 1;

const TRUE: &str = "true";
const FALSE: &str = "false";

/// Supported-value list as reported by a device.
pub type SupportedList<T> = SmallVec<[T; 5]>;

/// Flat `key=value` camera parameter store.
///
/// Typed accessors cover the keys the request mapper writes; everything else is
/// reachable through [`LegacyParameters::get`] / [`LegacyParameters::set`].
///
/// # Example
/// ```rust
/// use camshim_legacy::prelude::*;
///
/// let mut params = LegacyParameters::unflatten("flash-mode-values=off,torch;zoom-supported=false")
///     .unwrap();
/// params.set_flash_mode(LegacyFlashMode::Torch);
/// assert_eq!(params.flash_mode().unwrap(), Some(LegacyFlashMode::Torch));
/// assert!(params.flatten().contains("flash-mode=torch"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LegacyParameters {
    values: BTreeMap<String, String>,
}

impl LegacyParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `key=value;key=value` form.
    ///
    /// Empty segments are skipped; later duplicates win.
    pub fn unflatten(flattened: &str) -> Result<Self, ParameterError> {
        let mut params = Self::new();
        for pair in flattened.split(';').filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ParameterError::MalformedPair(pair.to_string()))?;
            params.set(key, value)?;
        }
        Ok(params)
    }

    /// Serialize to the `key=value;key=value` form, ordered by key.
    pub fn flatten(&self) -> String {
        self.values
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store a raw value. Keys and values may not contain `=` or `;`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ParameterError> {
        if key.is_empty() {
            return Err(ParameterError::EmptyKey);
        }
        if [key, value].iter().any(|s| s.contains(['=', ';'])) {
            return Err(ParameterError::ReservedChar {
                key: key.to_string(),
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Integer value of a key; `Ok(None)` when absent.
    pub fn get_int(&self, key: &str) -> Result<Option<i32>, ParameterError> {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| ParameterError::InvalidInt {
                        key: key.to_string(),
                        value: raw.to_string(),
                    })
            })
            .transpose()
    }

    fn put(&mut self, key: &str, value: impl fmt::Display) {
        // Typed setters only emit values free of reserved characters.
        self.values.insert(key.to_string(), value.to_string());
    }

    fn get_parsed<T: FromStr<Err = ParameterError>>(
        &self,
        key: &str,
    ) -> Result<Option<T>, ParameterError> {
        self.get(key).map(str::parse).transpose()
    }

    fn get_bool(&self, key: &str) -> bool {
        self.get(key) == Some(TRUE)
    }

    fn supported<T: FromStr>(&self, key: &str) -> SupportedList<T> {
        let Some(raw) = self.get(key) else {
            return SupportedList::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match s.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    debug!(key, value = s, "ignoring unrecognized supported value");
                    None
                }
            })
            .collect()
    }

    fn put_list<T: fmt::Display>(&mut self, key: &str, values: &[T]) {
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.put(key, joined);
    }

    pub fn antibanding(&self) -> Result<Option<LegacyAntibanding>, ParameterError> {
        self.get_parsed(KEY_ANTIBANDING)
    }

    pub fn set_antibanding(&mut self, mode: LegacyAntibanding) {
        self.put(KEY_ANTIBANDING, mode);
    }

    /// Anti-banding modes the device accepts; empty when unreported.
    pub fn supported_antibanding(&self) -> SupportedList<LegacyAntibanding> {
        self.supported(KEY_SUPPORTED_ANTIBANDING)
    }

    pub fn set_supported_antibanding(&mut self, modes: &[LegacyAntibanding]) {
        self.put_list(KEY_SUPPORTED_ANTIBANDING, modes);
    }

    pub fn flash_mode(&self) -> Result<Option<LegacyFlashMode>, ParameterError> {
        self.get_parsed(KEY_FLASH_MODE)
    }

    pub fn set_flash_mode(&mut self, mode: LegacyFlashMode) {
        self.put(KEY_FLASH_MODE, mode);
    }

    /// Flash modes the device accepts; empty for devices without a flash unit.
    pub fn supported_flash_modes(&self) -> SupportedList<LegacyFlashMode> {
        self.supported(KEY_SUPPORTED_FLASH_MODES)
    }

    pub fn set_supported_flash_modes(&mut self, modes: &[LegacyFlashMode]) {
        self.put_list(KEY_SUPPORTED_FLASH_MODES, modes);
    }

    pub fn is_zoom_supported(&self) -> bool {
        self.get_bool(KEY_ZOOM_SUPPORTED)
    }

    pub fn zoom(&self) -> Result<Option<i32>, ParameterError> {
        self.get_int(KEY_ZOOM)
    }

    pub fn set_zoom(&mut self, index: i32) {
        self.put(KEY_ZOOM, index);
    }

    /// Zoom ratios in hundredths (`100` = 1x), one per zoom index.
    ///
    /// Positions are zoom indices, so any malformed entry fails the whole list.
    pub fn zoom_ratios(&self) -> Result<Vec<i32>, ParameterError> {
        let Some(raw) = self.get(KEY_ZOOM_RATIOS) else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        raw.split(',')
            .map(|entry| {
                entry
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| ParameterError::InvalidInt {
                        key: KEY_ZOOM_RATIOS.to_string(),
                        value: entry.to_string(),
                    })
            })
            .collect()
    }

    /// Advertise discrete zoom levels; an empty list marks zoom as unsupported.
    pub fn set_zoom_ratios(&mut self, ratios: &[i32]) {
        if ratios.is_empty() {
            self.put(KEY_ZOOM_SUPPORTED, FALSE);
            self.values.remove(KEY_ZOOM_RATIOS);
            self.values.remove(KEY_MAX_ZOOM);
            return;
        }
        self.put(KEY_ZOOM_SUPPORTED, TRUE);
        self.put_list(KEY_ZOOM_RATIOS, ratios);
        self.put(KEY_MAX_ZOOM, ratios.len() - 1);
    }

    pub fn max_zoom(&self) -> Option<i32> {
        self.get_int(KEY_MAX_ZOOM).ok().flatten()
    }

    /// Maximum metering areas; `0` when unsupported or unreported.
    pub fn max_num_metering_areas(&self) -> usize {
        self.get_int(KEY_MAX_NUM_METERING_AREAS)
            .ok()
            .flatten()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0)
    }

    pub fn set_max_num_metering_areas(&mut self, max: usize) {
        self.put(KEY_MAX_NUM_METERING_AREAS, max);
    }

    /// Current metering areas; `Ok(None)` when absent or cleared.
    pub fn metering_areas(&self) -> Result<Option<Vec<Area>>, ParameterError> {
        match self.get(KEY_METERING_AREAS) {
            None => Ok(None),
            Some(raw) => decode_areas(raw),
        }
    }

    /// Write metering areas; `None` (or an empty slice) clears the list.
    pub fn set_metering_areas(&mut self, areas: Option<&[Area]>) {
        self.put(KEY_METERING_AREAS, encode_areas(areas.unwrap_or_default()));
    }

    /// Preview frame-rate bounds as `[min, max]`.
    pub fn preview_fps_range(&self) -> Result<Option<[i32; 2]>, ParameterError> {
        let Some(raw) = self.get(KEY_PREVIEW_FPS_RANGE) else {
            return Ok(None);
        };
        let invalid = || ParameterError::InvalidFpsRange(raw.to_string());
        let (min, max) = raw.split_once(',').ok_or_else(invalid)?;
        let min = min.trim().parse::<i32>().map_err(|_| invalid())?;
        let max = max.trim().parse::<i32>().map_err(|_| invalid())?;
        let mut range = [0; 2];
        range[PREVIEW_FPS_MIN_INDEX] = min;
        range[PREVIEW_FPS_MAX_INDEX] = max;
        Ok(Some(range))
    }

    pub fn set_preview_fps_range(&mut self, min: i32, max: i32) {
        self.put(KEY_PREVIEW_FPS_RANGE, format!("{min},{max}"));
    }

    pub fn auto_white_balance_lock(&self) -> bool {
        self.get_bool(KEY_AUTO_WHITEBALANCE_LOCK)
    }

    pub fn set_auto_white_balance_lock(&mut self, locked: bool) {
        self.put(KEY_AUTO_WHITEBALANCE_LOCK, if locked { TRUE } else { FALSE });
    }
}

impl fmt::Display for LegacyParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten())
    }
}

impl FromStr for LegacyParameters {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::unflatten(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camshim_core::prelude::Rect;

    #[test]
    fn unflatten_rejects_pair_without_separator() {
        let err = LegacyParameters::unflatten("zoom=1;bogus").unwrap_err();
        assert_eq!(err, ParameterError::MalformedPair("bogus".into()));
        assert_eq!(
            LegacyParameters::unflatten("=3").unwrap_err(),
            ParameterError::EmptyKey
        );
    }

    #[test]
    fn flatten_is_sorted_and_parses_back() {
        let mut params = LegacyParameters::new();
        params.set_zoom(2);
        params.set_antibanding(LegacyAntibanding::Hz50);
        params.set_preview_fps_range(15, 30);
        let flat = params.flatten();
        assert_eq!(flat, "antibanding=50hz;preview-fps-range=15,30;zoom=2");
        assert_eq!(flat.parse::<LegacyParameters>().unwrap(), params);
    }

    #[test]
    fn set_rejects_reserved_characters() {
        let mut params = LegacyParameters::new();
        assert!(params.set("flash-mode", "on;zoom=3").is_err());
        assert!(params.set("a=b", "c").is_err());
        assert!(params.is_empty());
    }

    #[test]
    fn supported_lists_skip_unknown_entries() {
        let params =
            LegacyParameters::unflatten("flash-mode-values=off,xenon,auto;antibanding-values=")
                .unwrap();
        assert_eq!(
            params.supported_flash_modes().as_slice(),
            &[LegacyFlashMode::Off, LegacyFlashMode::Auto]
        );
        assert!(params.supported_antibanding().is_empty());
    }

    #[test]
    fn zoom_ratios_drive_capability_keys() {
        let mut params = LegacyParameters::new();
        assert!(!params.is_zoom_supported());
        params.set_zoom_ratios(&[100, 150, 200]);
        assert!(params.is_zoom_supported());
        assert_eq!(params.max_zoom(), Some(2));
        assert_eq!(params.zoom_ratios().unwrap(), vec![100, 150, 200]);
        params.set_zoom_ratios(&[]);
        assert!(!params.is_zoom_supported());
        assert!(params.zoom_ratios().unwrap().is_empty());
    }

    #[test]
    fn malformed_zoom_ratio_fails_whole_list() {
        for raw in ["100,x,400", "100,,400", "100,400,"] {
            let params =
                LegacyParameters::unflatten(&format!("zoom-supported=true;zoom-ratios={raw}"))
                    .unwrap();
            assert!(
                matches!(params.zoom_ratios(), Err(ParameterError::InvalidInt { .. })),
                "accepted {raw}"
            );
        }
        let params = LegacyParameters::unflatten("zoom-ratios= 100, 200").unwrap();
        assert_eq!(params.zoom_ratios().unwrap(), vec![100, 200]);
    }

    #[test]
    fn metering_area_round_trip_and_clear() {
        let mut params = LegacyParameters::new();
        assert_eq!(params.max_num_metering_areas(), 0);
        let area = Area::new(Rect::new(-100, -100, 100, 100), 50).unwrap();
        params.set_metering_areas(Some(&[area, Area::DEFAULT]));
        assert_eq!(
            params.metering_areas().unwrap(),
            Some(vec![area, Area::DEFAULT])
        );
        params.set_metering_areas(None);
        assert_eq!(params.get(KEY_METERING_AREAS), Some("(0,0,0,0,0)"));
        assert_eq!(params.metering_areas().unwrap(), None);
    }

    #[test]
    fn malformed_typed_values_surface_errors() {
        let params =
            LegacyParameters::unflatten("zoom=two;preview-fps-range=30;flash-mode=strobe")
                .unwrap();
        assert!(matches!(params.zoom(), Err(ParameterError::InvalidInt { .. })));
        assert!(matches!(
            params.preview_fps_range(),
            Err(ParameterError::InvalidFpsRange(_))
        ));
        assert!(matches!(
            params.flash_mode(),
            Err(ParameterError::UnknownValue { .. })
        ));
    }

    #[test]
    fn white_balance_lock_defaults_to_unlocked() {
        let mut params = LegacyParameters::new();
        assert!(!params.auto_white_balance_lock());
        params.set_auto_white_balance_lock(true);
        assert_eq!(params.get(KEY_AUTO_WHITEBALANCE_LOCK), Some("true"));
        assert!(params.auto_white_balance_lock());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn flatten_then_unflatten_preserves_entries(
                entries in prop::collection::btree_map("[a-z][a-z-]{0,15}", "[a-z0-9,()-]{0,20}", 0..12),
            ) {
                let mut params = LegacyParameters::new();
                for (k, v) in &entries {
                    params.set(k, v)?;
                }
                let parsed = LegacyParameters::unflatten(&params.flatten())?;
                prop_assert_eq!(parsed, params);
            }

            #[test]
            fn max_metering_areas_never_negative(raw in any::<i32>()) {
                let params = LegacyParameters::unflatten(&format!("max-num-metering-areas={raw}"))?;
                prop_assert_eq!(params.max_num_metering_areas(), usize::try_from(raw).unwrap_or(0));
            }
        }
    }
}
