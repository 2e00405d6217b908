// telemetry.rs - HUD readouts
//
// Numbers for the tactical overlay, derived from the resolved poses.

use serde::Serialize;

use super::{EffectState, EntityPose, FrameContext};
use crate::scene::{EffectId, EffectSpec, EntityId, HUD_METERS_PER_UNIT, LINK_RANGE};
use crate::world::{ease_out_quart, map_range};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Telemetry {
    /// Lead altitude in HUD meters.
    pub altitude: f64,
    /// Lead-to-target distance in HUD meters.
    pub range_to_target: f64,
    /// Area scanned, 0-100, counting up across the scan window.
    pub coverage: f64,
    /// Wingmen inside link range while the data link is up.
    pub linked_units: u32,
}

pub fn telemetry(
    ctx: &FrameContext,
    poses: &[EntityPose],
    effects: &[EffectState],
    scan: &EffectSpec,
) -> Telemetry {
    let lead = poses[EntityId::Lead.index()].position;
    let target = poses[EntityId::Target.index()].position;

    let coverage = 100.0
        * ease_out_quart(map_range(ctx.progress, scan.window.on(), scan.window.off()));

    let linked_units = if effects[EffectId::DataLink.index()].visible {
        [EntityId::EscortLeft, EntityId::EscortRight, EntityId::Overwatch]
            .iter()
            .filter(|id| poses[id.index()].position.distance(lead) <= LINK_RANGE)
            .count() as u32
    } else {
        0
    };

    Telemetry {
        altitude: lead.y * HUD_METERS_PER_UNIT,
        range_to_target: lead.distance(target) * HUD_METERS_PER_UNIT,
        coverage,
        linked_units,
    }
}
