/// How surviving metering regions become legacy areas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MeteringMode {
    /// Map each region through the visible crop into `[-1000, 1000]²`.
    #[default]
    Mapped,
    /// Replace every region with the full-frame default area.
    FullFrame,
}

/// Default metering conversion.
pub const DEFAULT_METERING_MODE: MeteringMode = MeteringMode::Mapped;

/// Mapper behaviour switches.
///
/// # Example
/// ```rust
/// use camshim::prelude::*;
///
/// let mapper = RequestMapper::with_config(
///     MapperConfig::new().metering_mode(MeteringMode::FullFrame),
/// );
/// assert_eq!(mapper.config().metering_mode, MeteringMode::FullFrame);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapperConfig {
    pub metering_mode: MeteringMode,
}

impl MapperConfig {
    /// Start building a new configuration with defaults.
    pub fn new() -> Self {
        Self {
            metering_mode: DEFAULT_METERING_MODE,
        }
    }

    /// Override the metering conversion.
    pub fn metering_mode(mut self, mode: MeteringMode) -> Self {
        self.metering_mode = mode;
        self
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self::new()
    }
}
