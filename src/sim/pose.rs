// pose.rs - Per-entity pose resolver
//
// Each entity is a piecewise function of global progress, one piece per act.
// Act k runs from waypoint k to waypoint k+1, so the pieces meet exactly at
// every boundary. The final act either drives on or blends into an orbit
// around the target through the frame's shared transition factor.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use serde::Serialize;

use super::FrameContext;
use crate::scene::{ACT_COUNT, BANK_CYCLES, EntityId, FinalLeg, OrbitSlot, Track};
use crate::world::{ease_out_quart, lerp, lerp_vec, map_range};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EntityPose {
    pub id: EntityId,
    pub position: DVec3,
    pub rotation_y: f64,
    pub scale: f64,
}

/// Point on an entity's orbit slot around `center`.
#[inline]
pub fn orbit_position(center: DVec3, slot: &OrbitSlot, angle: f64) -> DVec3 {
    let a = slot.phase + angle;
    center + DVec3::new(slot.radius * a.cos(), slot.altitude, slot.radius * a.sin())
}

/// Eased transit inside one of the first `ACT_COUNT - 1` acts.
#[inline]
pub fn transit_position(track: &Track, act: usize, local: f64) -> DVec3 {
    let from = track.waypoints[act];
    let to = track.waypoints[act + 1];
    lerp_vec(from, to, track.eases[act].apply(local))
}

pub fn resolve_position(track: &Track, ctx: &FrameContext) -> DVec3 {
    let last = ACT_COUNT - 1;
    if ctx.act.index < last {
        return transit_position(track, ctx.act.index, ctx.local);
    }

    let start = track.waypoints[last];
    match track.final_leg {
        FinalLeg::Drive { to, ease } => lerp_vec(start, to, ease.apply(ctx.local)),
        FinalLeg::Orbit(slot) => {
            let orbit = orbit_position(ctx.focus, &slot, ctx.angle);
            start + (orbit - start) * ctx.t4
        }
    }
}

// Yaw 0 faces -z. Along the circle the unit faces its direction of travel.
fn orbit_heading(track: &Track, slot: &OrbitSlot, angle: f64) -> f64 {
    let base = PI - slot.phase;
    // Pick the turn equivalent closest to the transit heading, fixed per slot.
    let wrap = TAU * ((track.heading - base) / TAU).round();
    base + wrap - angle
}

pub fn resolve_rotation(track: &Track, ctx: &FrameContext) -> f64 {
    let bank = track.bank * (TAU * BANK_CYCLES * ctx.progress + track.bank_phase).sin();
    let transit = track.heading + bank;
    match track.final_leg {
        FinalLeg::Orbit(slot) if ctx.act.index == ACT_COUNT - 1 => {
            lerp(transit, orbit_heading(track, &slot, ctx.angle), ctx.t4)
        }
        _ => transit,
    }
}

pub fn resolve_scale(track: &Track, ctx: &FrameContext) -> f64 {
    match track.reveal {
        Some(r) => track.scale * ease_out_quart(map_range(ctx.progress, r.from, r.to)),
        None => track.scale,
    }
}

pub fn resolve_pose(id: EntityId, ctx: &FrameContext) -> EntityPose {
    let track = id.track();
    EntityPose {
        id,
        position: resolve_position(track, ctx),
        rotation_y: resolve_rotation(track, ctx),
        scale: resolve_scale(track, ctx),
    }
}
