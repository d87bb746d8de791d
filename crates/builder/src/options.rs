//! Option resolution
//!
//! Narrows the option domain against the target platform. The rules, in
//! priority order: Windows-family targets have no fPIC option at all;
//! shared builds drop fPIC as irrelevant; static builds elsewhere default
//! fPIC to true. Resolution is pure and idempotent - it only ever narrows.

use kiln_types::{OptionRequest, OptionSet, Settings};

/// Compute the finalized option set from settings and the caller's request
#[must_use]
pub fn resolve_options(settings: &Settings, request: &OptionRequest) -> OptionSet {
    let shared = request.shared.unwrap_or(false);

    let fpic = if settings.os.is_windows_family() || shared {
        // Absent, not false: the option does not exist on this target
        None
    } else {
        Some(request.fpic.unwrap_or(true))
    };

    OptionSet { shared, fpic }
}
