// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn view_constants_are_within_reasonable_bounds() {
    assert!(CLEAR_RGB.iter().all(|c| (0.0..=1.0).contains(c)));
    // the background must stay dark enough to sit under the bloom threshold
    let luma = 0.2126 * CLEAR_RGB[0] + 0.7152 * CLEAR_RGB[1] + 0.0722 * CLEAR_RGB[2];
    assert!(luma < ohmlab_core::BLOOM_LUMINANCE_THRESHOLD);

    assert!(BLOOM_EXPOSURE > 0.0);
    assert!(ORBIT_RADIANS_PER_PX > 0.0);
    assert!(WHEEL_ZOOM_PER_DELTA > 0.0);
    assert!(WHEEL_ZOOM_MIN_FACTOR > 0.0 && WHEEL_ZOOM_MIN_FACTOR < 1.0);
    assert!(WHEEL_ZOOM_MAX_FACTOR > 1.0);
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
}

#[test]
fn particle_seeds_are_distinct() {
    assert_ne!(TOP_TRAIL_SEED, BOTTOM_TRAIL_SEED);
    assert_ne!(TOP_TRAIL_SEED, SMOKE_SEED);
    assert_ne!(BOTTOM_TRAIL_SEED, SMOKE_SEED);
}

#[test]
fn dom_ids_are_unique() {
    let ids = [
        CANVAS_ID,
        DIAGRAM_ID,
        LEGEND_ID,
        VOLTAGE_SLIDER_ID,
        RESISTANCE_SLIDER_ID,
        PERF_MODE_ID,
        SMOKE_TOGGLE_ID,
        BLOOM_TOGGLE_ID,
        RESET_BUTTON_ID,
        VOLTAGE_READOUT_ID,
        RESISTANCE_READOUT_ID,
        CURRENT_READOUT_ID,
        MILLIAMPS_READOUT_ID,
        POWER_READOUT_ID,
    ];
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
    assert!(ids.iter().all(|id| !id.is_empty() && !id.contains(' ')));
}
