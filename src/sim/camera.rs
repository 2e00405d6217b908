// camera.rs - Camera target and smoothing
//
// The target is a pure function of progress. The rig is the only piece of
// the scene that remembers the previous frame.

use glam::DVec3;
use serde::Serialize;

use super::FrameContext;
use crate::scene::{ACT_COUNT, CAMERA_EASES, CAMERA_OFFSETS};
use crate::world::lerp_vec;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraState {
    pub position: DVec3,
    pub look_at: DVec3,
}

/// Where the camera wants to be for this frame. Follows the lead through the
/// transit acts, then swings its focus onto the target as the fleet orbits.
pub fn camera_target(ctx: &FrameContext, lead: DVec3) -> CameraState {
    let i = ctx.act.index;
    let offset = lerp_vec(CAMERA_OFFSETS[i], CAMERA_OFFSETS[i + 1], CAMERA_EASES[i].apply(ctx.local));
    let focus = if i == ACT_COUNT - 1 { lerp_vec(lead, ctx.focus, ctx.t4) } else { lead };

    CameraState { position: focus + offset, look_at: focus }
}

/// Exponential smoothing toward the per-frame target.
#[derive(Clone, Debug)]
pub struct CameraRig {
    current: Option<CameraState>,
    smoothing: f64,
}

impl CameraRig {
    pub fn new(smoothing: f64) -> Self {
        Self { current: None, smoothing }
    }

    /// Advance one frame. The first frame after mount (or reset) snaps.
    pub fn update(&mut self, target: &CameraState) -> CameraState {
        let next = match self.current {
            None => *target,
            Some(mut cam) => {
                cam.position += (target.position - cam.position) * self.smoothing;
                cam.look_at += (target.look_at - cam.look_at) * self.smoothing;
                cam
            }
        };
        self.current = Some(next);
        next
    }

    pub fn current(&self) -> Option<CameraState> {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam(x: f64) -> CameraState {
        CameraState { position: DVec3::splat(x), look_at: DVec3::ZERO }
    }

    #[test]
    fn first_frame_snaps() {
        let mut rig = CameraRig::new(0.05);
        assert_eq!(rig.update(&cam(10.0)), cam(10.0));
    }

    #[test]
    fn smoothing_closes_five_percent_per_frame() {
        let mut rig = CameraRig::new(0.05);
        rig.update(&cam(0.0));
        let next = rig.update(&cam(100.0));
        assert!((next.position.x - 5.0).abs() < 1e-12);
        let next = rig.update(&cam(100.0));
        assert!((next.position.x - 9.75).abs() < 1e-12);
    }

    #[test]
    fn converges_on_a_still_target() {
        let mut rig = CameraRig::new(0.05);
        rig.update(&cam(0.0));
        let mut prev = f64::MAX;
        for _ in 0..400 {
            let gap = (100.0 - rig.update(&cam(100.0)).position.x).abs();
            assert!(gap <= prev);
            prev = gap;
        }
        assert!(prev < 1e-6);
    }

    #[test]
    fn reset_snaps_again() {
        let mut rig = CameraRig::new(0.05);
        rig.update(&cam(0.0));
        rig.reset();
        assert!(rig.current().is_none());
        assert_eq!(rig.update(&cam(42.0)), cam(42.0));
    }
}
