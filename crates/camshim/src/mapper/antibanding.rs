use camshim_core::prelude::{AeAntibandingMode, Lookup};
use camshim_legacy::prelude::LegacyAntibanding;
use tracing::debug;

/// Fallback order when the request leaves anti-banding unset.
pub const ANTIBANDING_PREFERENCE: [LegacyAntibanding; 4] = [
    LegacyAntibanding::Auto,
    LegacyAntibanding::Off,
    LegacyAntibanding::Hz50,
    LegacyAntibanding::Hz60,
];

/// Legacy equivalent of a requested anti-banding mode.
pub fn antibanding_to_legacy(mode: AeAntibandingMode) -> LegacyAntibanding {
    match mode {
        AeAntibandingMode::Off => LegacyAntibanding::Off,
        AeAntibandingMode::Hz50 => LegacyAntibanding::Hz50,
        AeAntibandingMode::Hz60 => LegacyAntibanding::Hz60,
        AeAntibandingMode::Auto => LegacyAntibanding::Auto,
    }
}

/// First entry of `preference` that appears in `supported`.
pub fn select_first_from<T: PartialEq + Copy>(supported: &[T], preference: &[T]) -> Option<T> {
    preference.iter().copied().find(|p| supported.contains(p))
}

/// Resolve the anti-banding value to write, if any.
///
/// A recognized request is used as-is. Otherwise the first supported mode from
/// [`ANTIBANDING_PREFERENCE`] is chosen; `None` means leave the parameter alone.
///
/// # Example
/// ```rust
/// use camshim::prelude::*;
///
/// let supported = [LegacyAntibanding::Hz60, LegacyAntibanding::Off];
/// assert_eq!(resolve_antibanding(Lookup::Unset, &supported), Some(LegacyAntibanding::Off));
/// assert_eq!(
///     resolve_antibanding(Lookup::Value(AeAntibandingMode::Hz50), &supported),
///     Some(LegacyAntibanding::Hz50)
/// );
/// ```
pub fn resolve_antibanding(
    requested: Lookup<AeAntibandingMode>,
    supported: &[LegacyAntibanding],
) -> Option<LegacyAntibanding> {
    if let Lookup::Value(mode) = requested {
        return Some(antibanding_to_legacy(mode));
    }
    let fallback = select_first_from(supported, &ANTIBANDING_PREFERENCE);
    debug!(?requested, ?fallback, "anti-banding fallback");
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_prefers_auto() {
        let supported = [
            LegacyAntibanding::Hz60,
            LegacyAntibanding::Auto,
            LegacyAntibanding::Off,
        ];
        assert_eq!(
            resolve_antibanding(Lookup::Unset, &supported),
            Some(LegacyAntibanding::Auto)
        );
    }

    #[test]
    fn unrecognized_uses_fallback_order() {
        let supported = [LegacyAntibanding::Hz60, LegacyAntibanding::Hz50];
        assert_eq!(
            resolve_antibanding(Lookup::Unrecognized, &supported),
            Some(LegacyAntibanding::Hz50)
        );
    }

    #[test]
    fn nothing_supported_means_no_write() {
        assert_eq!(resolve_antibanding(Lookup::Unset, &[]), None);
    }

    #[test]
    fn explicit_request_bypasses_capabilities() {
        assert_eq!(
            resolve_antibanding(Lookup::Value(AeAntibandingMode::Hz60), &[]),
            Some(LegacyAntibanding::Hz60)
        );
    }
}
