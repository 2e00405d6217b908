// effects.rs - Effect activation gate
//
// Visibility is a threshold test against current progress only, so scrolling
// back out of a window hides the effect again. No latches, no history.

use std::f64::consts::TAU;

use serde::Serialize;

use super::FrameContext;
use crate::scene::{EffectId, EffectSpec, LINK_SHIMMER_CYCLES, SCAN_PULSES};
use crate::world::{ease_in_out_cubic, ease_out_quart, map_range};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EffectState {
    pub id: EffectId,
    pub visible: bool,
    pub opacity: f64,
    /// Effect-specific drive value in [0, 1] (ring radius, burst size, lock...).
    pub intensity: f64,
}

impl EffectState {
    pub fn hidden(id: EffectId) -> Self {
        Self { id, visible: false, opacity: 0.0, intensity: 0.0 }
    }
}

/// Opacity ramp over `[on, on + fade_in]`; 1 when there is no fade.
#[inline]
pub fn fade_in(spec: &EffectSpec, p: f64) -> f64 {
    if spec.fade_in > 0.0 {
        let on = spec.window.on();
        ease_in_out_cubic(map_range(p, on, on + spec.fade_in))
    } else {
        1.0
    }
}

pub fn resolve_effect(id: EffectId, spec: &EffectSpec, ctx: &FrameContext) -> EffectState {
    let p = ctx.progress;
    if !spec.window.contains(p) {
        return EffectState::hidden(id);
    }

    let ramp = fade_in(spec, p);
    let local = map_range(p, spec.window.on(), spec.window.off());

    let (shape, intensity) = match id {
        // Expanding ring, restarting SCAN_PULSES times across the window
        EffectId::ScanPulse => {
            let phase = (local * SCAN_PULSES).fract();
            (1.0 - phase, phase)
        }
        EffectId::DataLink => {
            let shimmer = 0.75 + 0.25 * (TAU * LINK_SHIMMER_CYCLES * p).sin();
            (1.0, shimmer)
        }
        // Bursts out and fades while the fleet locks into orbit
        EffectId::SyncBurst => {
            let grow = ease_out_quart(local);
            (1.0 - grow, grow)
        }
        EffectId::Grid => (1.0, ramp),
        EffectId::Reticle => (1.0, ctx.t4),
    };

    EffectState {
        id,
        visible: true,
        opacity: spec.max_opacity * ramp * shape,
        intensity,
    }
}
