//! Weighted areas in the legacy normalized coordinate space.

use std::fmt;

use camshim_core::prelude::Rect;

use crate::ParameterError;

/// Lowest coordinate of the normalized space (either axis).
pub const AREA_COORD_MIN: i32 = -1000;
/// Highest coordinate of the normalized space (either axis).
pub const AREA_COORD_MAX: i32 = 1000;
pub const AREA_WEIGHT_MIN: i32 = 1;
pub const AREA_WEIGHT_MAX: i32 = 1000;

/// Encoding of a cleared area list.
pub(crate) const CLEARED_AREAS: &str = "(0,0,0,0,0)";

/// Rectangle in `[-1000, 1000]²` plus a weight in `1..=1000`.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::Rect;
/// use camshim_legacy::prelude::Area;
///
/// let area = Area::new(Rect::new(-500, -500, 500, 500), 10).unwrap();
/// assert_eq!(area.to_string(), "(-500,-500,500,500,10)");
/// assert!(Area::new(Rect::new(-1500, 0, 0, 10), 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    rect: Rect,
    weight: i32,
}

impl Area {
    /// Entire normalized space, weight 1.
    pub const DEFAULT: Area = Area {
        rect: Rect::new(AREA_COORD_MIN, AREA_COORD_MIN, AREA_COORD_MAX, AREA_COORD_MAX),
        weight: 1,
    };

    pub fn new(rect: Rect, weight: i32) -> Result<Self, ParameterError> {
        let bounds = Self::DEFAULT.rect;
        if rect.is_empty() || !bounds.contains(&rect) {
            return Err(ParameterError::InvalidArea(format!("rect {rect} out of range")));
        }
        if !(AREA_WEIGHT_MIN..=AREA_WEIGHT_MAX).contains(&weight) {
            return Err(ParameterError::InvalidArea(format!("weight {weight} out of range")));
        }
        Ok(Self { rect, weight })
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{},{})",
            self.rect.left, self.rect.top, self.rect.right, self.rect.bottom, self.weight
        )
    }
}

pub(crate) fn encode_areas(areas: &[Area]) -> String {
    if areas.is_empty() {
        return CLEARED_AREAS.to_string();
    }
    areas
        .iter()
        .map(Area::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse `(l,t,r,b,w),(l,t,r,b,w)`. The cleared encoding yields `None`.
pub(crate) fn decode_areas(raw: &str) -> Result<Option<Vec<Area>>, ParameterError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == CLEARED_AREAS {
        return Ok(None);
    }
    let malformed = || ParameterError::InvalidArea(raw.to_string());

    let mut areas = Vec::new();
    let mut rest = raw;
    loop {
        let open = rest.strip_prefix('(').ok_or_else(malformed)?;
        let close = open.find(')').ok_or_else(malformed)?;
        let fields = open[..close]
            .split(',')
            .map(|f| f.trim().parse::<i32>().map_err(|_| malformed()))
            .collect::<Result<Vec<_>, _>>()?;
        let &[l, t, r, b, w] = fields.as_slice() else {
            return Err(malformed());
        };
        areas.push(Area::new(Rect::new(l, t, r, b), w)?);

        rest = &open[close + 1..];
        if rest.is_empty() {
            break;
        }
        rest = rest.strip_prefix(',').ok_or_else(malformed)?;
    }
    Ok(Some(areas))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_multiple_areas() {
        let areas = decode_areas("(-1000,-1000,0,0,5),(0,0,1000,1000,900)")
            .unwrap()
            .unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].rect(), Rect::new(-1000, -1000, 0, 0));
        assert_eq!(areas[1].weight(), 900);
    }

    #[test]
    fn cleared_list_decodes_to_none() {
        assert_eq!(decode_areas(CLEARED_AREAS).unwrap(), None);
        assert_eq!(encode_areas(&[]), CLEARED_AREAS);
    }

    #[test]
    fn malformed_lists_are_rejected() {
        for raw in [
            "(1,2,3,4)",
            "(0,0,10,10,1)(0,0,10,10,1)",
            "0,0,10,10,1",
            "(0,0,10,10,x)",
            "(0,0,10,10,1),",
            "(0,0,10,10,0)",
        ] {
            assert!(decode_areas(raw).is_err(), "accepted {raw}");
        }
    }

    #[test]
    fn default_area_spans_normalized_space() {
        assert_eq!(Area::DEFAULT.to_string(), "(-1000,-1000,1000,1000,1)");
        assert_eq!(Area::new(Area::DEFAULT.rect(), 1).unwrap(), Area::DEFAULT);
    }
}
