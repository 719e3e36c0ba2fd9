use camshim_core::prelude::{AeMode, FlashMode, Lookup};
use camshim_legacy::prelude::LegacyFlashMode;

/// Combine the requested AE and flash modes into one legacy flash mode.
///
/// Unset AE defaults to `On` and unset flash to `Off`. Flash requests only
/// matter under plain `On`; the other AE modes pick their legacy counterpart.
/// Any target the device does not list resolves to `off`.
///
/// # Example
/// ```rust
/// use camshim::prelude::*;
///
/// let supported = [LegacyFlashMode::Off, LegacyFlashMode::On, LegacyFlashMode::Auto];
/// let mode = resolve_flash_mode(Lookup::Value(AeMode::OnAutoFlash), Lookup::Unset, &supported);
/// assert_eq!(mode, LegacyFlashMode::Auto);
/// ```
pub fn resolve_flash_mode(
    ae_mode: Lookup<AeMode>,
    flash_mode: Lookup<FlashMode>,
    supported: &[LegacyFlashMode],
) -> LegacyFlashMode {
    use Lookup::Value;

    let supports = |mode: LegacyFlashMode| supported.contains(&mode);
    let ae = ae_mode.default_if_unset(AeMode::On);
    let flash = flash_mode.default_if_unset(FlashMode::Off);

    match (ae, flash) {
        (Value(AeMode::On), Value(FlashMode::Torch)) if supports(LegacyFlashMode::Torch) => {
            LegacyFlashMode::Torch
        }
        (Value(AeMode::On), Value(FlashMode::Single)) if supports(LegacyFlashMode::On) => {
            LegacyFlashMode::On
        }
        (Value(AeMode::On), _) => LegacyFlashMode::Off,
        (Value(AeMode::OnAlwaysFlash), _) if supports(LegacyFlashMode::On) => LegacyFlashMode::On,
        (Value(AeMode::OnAutoFlash), _) if supports(LegacyFlashMode::Auto) => {
            LegacyFlashMode::Auto
        }
        (Value(AeMode::OnAutoFlashRedeye), _) if supports(LegacyFlashMode::RedEye) => {
            LegacyFlashMode::RedEye
        }
        _ => LegacyFlashMode::Off,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LegacyFlashMode as L;

    const ALL: &[LegacyFlashMode] = &[L::Off, L::Auto, L::On, L::RedEye, L::Torch];

    #[test]
    fn torch_needs_device_support() {
        let ae = Lookup::Value(AeMode::On);
        let torch = Lookup::Value(FlashMode::Torch);
        assert_eq!(resolve_flash_mode(ae, torch, ALL), L::Torch);
        assert_eq!(resolve_flash_mode(ae, torch, &[L::Off]), L::Off);
    }

    #[test]
    fn single_maps_to_on() {
        let ae = Lookup::Value(AeMode::On);
        let single = Lookup::Value(FlashMode::Single);
        assert_eq!(resolve_flash_mode(ae, single, ALL), L::On);
        assert_eq!(resolve_flash_mode(ae, single, &[L::Off, L::Torch]), L::Off);
    }

    #[test]
    fn flash_request_ignored_outside_plain_on() {
        let torch = Lookup::Value(FlashMode::Torch);
        assert_eq!(
            resolve_flash_mode(Lookup::Value(AeMode::OnAlwaysFlash), torch, ALL),
            L::On
        );
        assert_eq!(resolve_flash_mode(Lookup::Value(AeMode::Off), torch, ALL), L::Off);
    }

    #[test]
    fn unset_fields_default_to_ae_on_flash_off() {
        assert_eq!(resolve_flash_mode(Lookup::Unset, Lookup::Unset, ALL), L::Off);
        assert_eq!(
            resolve_flash_mode(Lookup::Unset, Lookup::Value(FlashMode::Torch), ALL),
            L::Torch
        );
    }

    #[test]
    fn auto_flash_modes_fall_through_to_off() {
        assert_eq!(
            resolve_flash_mode(Lookup::Value(AeMode::OnAutoFlashRedeye), Lookup::Unset, ALL),
            L::RedEye
        );
        assert_eq!(
            resolve_flash_mode(
                Lookup::Value(AeMode::OnAutoFlashRedeye),
                Lookup::Unset,
                &[L::Off, L::Auto]
            ),
            L::Off
        );
        assert_eq!(
            resolve_flash_mode(Lookup::Value(AeMode::OnAutoFlash), Lookup::Unset, &[]),
            L::Off
        );
    }

    #[test]
    fn unrecognized_modes_match_no_specific_row() {
        assert_eq!(
            resolve_flash_mode(Lookup::Unrecognized, Lookup::Value(FlashMode::Torch), ALL),
            L::Off
        );
        assert_eq!(
            resolve_flash_mode(Lookup::Value(AeMode::On), Lookup::Unrecognized, ALL),
            L::Off
        );
    }
}
