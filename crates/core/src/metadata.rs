use std::{fmt, marker::PhantomData};

use crate::geometry::Rect;

/// Errors building metadata values.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::{MetadataError, Range};
///
/// let err = Range::new(30, 15).unwrap_err();
/// assert!(matches!(err, MetadataError::InvalidRange { .. }));
/// assert_eq!(err.code(), "invalid_range");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    #[error("range lower bound {lower} exceeds upper bound {upper}")]
    InvalidRange { lower: i32, upper: i32 },
    #[error("metering weight {0} outside 0..=1000")]
    InvalidWeight(i32),
    #[error("negative rectangle dimensions {width}x{height}")]
    NegativeDimensions { width: i32, height: i32 },
}

impl MetadataError {
    /// Stable string code for error classification.
    pub fn code(&self) -> &'static str {
        match self {
            MetadataError::InvalidRange { .. } => "invalid_range",
            MetadataError::InvalidWeight(_) => "invalid_weight",
            MetadataError::NegativeDimensions { .. } => "negative_dimensions",
        }
    }
}

/// Inclusive integer range with `lower <= upper`.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::Range;
///
/// let fps = Range::new(15, 30).unwrap();
/// assert_eq!((fps.lower(), fps.upper()), (15, 30));
/// assert!(fps.contains(24));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[i32; 2]", into = "[i32; 2]"))]
pub struct Range {
    lower: i32,
    upper: i32,
}

impl Range {
    pub fn new(lower: i32, upper: i32) -> Result<Self, MetadataError> {
        if lower > upper {
            return Err(MetadataError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> i32 {
        self.lower
    }

    pub fn upper(&self) -> i32 {
        self.upper
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

impl TryFrom<[i32; 2]> for Range {
    type Error = MetadataError;

    fn try_from(value: [i32; 2]) -> Result<Self, Self::Error> {
        Range::new(value[0], value[1])
    }
}

impl From<Range> for [i32; 2] {
    fn from(range: Range) -> Self {
        [range.lower, range.upper]
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Weighted rectangle in active-array pixel coordinates.
///
/// A weight of [`MeteringRectangle::METERING_WEIGHT_DONT_CARE`] marks the region as ignored.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::{MeteringRectangle, Rect};
///
/// let region = MeteringRectangle::new(100, 200, 50, 40, 500).unwrap();
/// assert_eq!(region.rect(), Rect::new(100, 200, 150, 240));
/// assert!(!region.is_dont_care());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MeteringRepr", into = "MeteringRepr"))]
pub struct MeteringRectangle {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    weight: i32,
}

impl MeteringRectangle {
    pub const METERING_WEIGHT_DONT_CARE: i32 = 0;
    pub const METERING_WEIGHT_MIN: i32 = 0;
    pub const METERING_WEIGHT_MAX: i32 = 1000;

    pub fn new(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        weight: i32,
    ) -> Result<Self, MetadataError> {
        if width < 0 || height < 0 {
            return Err(MetadataError::NegativeDimensions { width, height });
        }
        if !(Self::METERING_WEIGHT_MIN..=Self::METERING_WEIGHT_MAX).contains(&weight) {
            return Err(MetadataError::InvalidWeight(weight));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
            weight,
        })
    }

    /// Build from a pixel rectangle.
    pub fn from_rect(rect: Rect, weight: i32) -> Result<Self, MetadataError> {
        Self::new(rect.left, rect.top, rect.width(), rect.height(), weight)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_xywh(self.x, self.y, self.width, self.height)
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn is_dont_care(&self) -> bool {
        self.weight == Self::METERING_WEIGHT_DONT_CARE
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MeteringRepr {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    weight: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<MeteringRepr> for MeteringRectangle {
    type Error = MetadataError;

    fn try_from(r: MeteringRepr) -> Result<Self, Self::Error> {
        MeteringRectangle::new(r.x, r.y, r.width, r.height, r.weight)
    }
}

#[cfg(feature = "serde")]
impl From<MeteringRectangle> for MeteringRepr {
    fn from(m: MeteringRectangle) -> Self {
        Self {
            x: m.x,
            y: m.y,
            width: m.width,
            height: m.height,
            weight: m.weight,
        }
    }
}

/// Untyped metadata payload stored in requests and characteristics.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::MetadataValue;
///
/// let v = MetadataValue::Bool(true);
/// assert_eq!(v, MetadataValue::Bool(true));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "value", rename_all = "snake_case")
)]
pub enum MetadataValue {
    Bool(bool),
    /// Signed integer; enum-valued keys store their raw discriminant here.
    Int(i32),
    Rect(Rect),
    Range(Range),
    MeteringRegions(Vec<MeteringRectangle>),
}

/// Conversion between a typed key's value and its stored payload.
pub trait MetadataType: Sized {
    /// Decode from the stored payload; `None` when the payload does not fit this type.
    fn from_value(value: &MetadataValue) -> Option<Self>;

    fn into_value(self) -> MetadataValue;
}

impl MetadataType for bool {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> MetadataValue {
        MetadataValue::Bool(self)
    }
}

impl MetadataType for i32 {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> MetadataValue {
        MetadataValue::Int(self)
    }
}

impl MetadataType for Rect {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::Rect(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> MetadataValue {
        MetadataValue::Rect(self)
    }
}

impl MetadataType for Range {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::Range(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> MetadataValue {
        MetadataValue::Range(self)
    }
}

impl MetadataType for Vec<MeteringRectangle> {
    fn from_value(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::MeteringRegions(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> MetadataValue {
        MetadataValue::MeteringRegions(self)
    }
}

/// Strongly typed metadata key.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::{Key, Rect};
///
/// const CROP: Key<Rect> = Key::new("android.scaler.cropRegion");
/// assert_eq!(CROP.name(), "android.scaler.cropRegion");
/// ```
pub struct Key<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

/// Result of looking up a typed key.
///
/// `Unset` and `Unrecognized` are kept apart: an absent key usually picks up a
/// default, while a present value this layer cannot decode matches nothing.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::Lookup;
///
/// let unset: Lookup<i32> = Lookup::Unset;
/// assert_eq!(unset.default_if_unset(7), Lookup::Value(7));
/// assert_eq!(Lookup::<i32>::Unrecognized.default_if_unset(7), Lookup::Unrecognized);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    Unset,
    Value(T),
    Unrecognized,
}

impl<T> Lookup<T> {
    /// Decoded value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Lookup::Value(v) => Some(v),
            Lookup::Unset | Lookup::Unrecognized => None,
        }
    }

    /// Replace `Unset` with `Value(default)`; other states pass through.
    pub fn default_if_unset(self, default: T) -> Lookup<T> {
        match self {
            Lookup::Unset => Lookup::Value(default),
            other => other,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Lookup::Unset)
    }

    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Unset => Lookup::Unset,
            Lookup::Value(v) => Lookup::Value(v),
            Lookup::Unrecognized => Lookup::Unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_rejects_inverted_bounds() {
        assert_eq!(
            Range::new(31, 30),
            Err(MetadataError::InvalidRange {
                lower: 31,
                upper: 30
            })
        );
        let single = Range::new(30, 30).unwrap();
        assert!(single.contains(30));
        assert!(!single.contains(29));
    }

    #[test]
    fn metering_rectangle_validates_weight_and_size() {
        assert_eq!(
            MeteringRectangle::new(0, 0, 10, 10, 1001),
            Err(MetadataError::InvalidWeight(1001))
        );
        assert_eq!(
            MeteringRectangle::new(0, 0, -1, 10, 1),
            Err(MetadataError::NegativeDimensions {
                width: -1,
                height: 10
            })
        );
        let dont_care = MeteringRectangle::new(0, 0, 10, 10, 0).unwrap();
        assert!(dont_care.is_dont_care());
    }

    #[test]
    fn typed_decode_rejects_mismatched_payload() {
        assert_eq!(bool::from_value(&MetadataValue::Int(1)), None);
        assert_eq!(i32::from_value(&MetadataValue::Int(4)), Some(4));
        let rect = Rect::new(1, 2, 3, 4);
        assert_eq!(Rect::from_value(&rect.into_value()), Some(rect));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_invalid_range() {
        let ok: Range = serde_json::from_str("[15, 30]").unwrap();
        assert_eq!(ok.upper(), 30);
        assert!(serde_json::from_str::<Range>("[30, 15]").is_err());

        let value = MetadataValue::Int(3);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"kind":"int","value":3}"#);
    }
}
