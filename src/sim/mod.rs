// sim/ - Scene choreography
//
// Progress in, full scene state out. Each concern in its own module;
// Director is the per-frame loop that feeds a scene graph.

mod camera;
mod effects;
mod pose;
mod telemetry;

pub use camera::{CameraRig, CameraState, camera_target};
pub use effects::{EffectState, fade_in, resolve_effect};
pub use pose::{EntityPose, orbit_position, resolve_pose, transit_position};
pub use telemetry::{Telemetry, telemetry};

use glam::DVec3;
use serde::Serialize;

use crate::error::ConfigError;
use crate::render::SceneGraph;
use crate::scene::{EFFECT_COUNT, ENTITY_COUNT, EffectId, EntityId, OrbitConfig, SceneConfig};
use crate::world::{Act, ActTable, clamp01, ease_in_out_cubic, map_range};

/// Shared orbit entry factor. Computed once per frame and handed to every
/// entity so the formation enters its orbit in lockstep.
#[inline]
pub fn orbit_transition(orbit: &OrbitConfig, p: f64) -> f64 {
    ease_in_out_cubic(map_range(p, orbit.entry_start, orbit.entry_end))
}

/// Orbit sweep angle, from 0 at `entry_bound` to `max_sweep` at progress 1.
#[inline]
pub fn orbit_angle(p: f64, entry_bound: f64, max_sweep: f64) -> f64 {
    map_range(p, entry_bound, 1.0) * max_sweep
}

/// Everything about a frame that every entity must agree on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub progress: f64,
    pub act: Act,
    pub local: f64,
    pub t4: f64,
    pub angle: f64,
    /// Position of the target, the orbit center.
    pub focus: DVec3,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneState {
    pub progress: f64,
    pub act: usize,
    pub local_progress: f64,
    pub t4: f64,
    pub poses: [EntityPose; ENTITY_COUNT],
    pub effects: [EffectState; EFFECT_COUNT],
    pub camera_target: CameraState,
    pub telemetry: Telemetry,
}

impl SceneState {
    pub fn pose(&self, id: EntityId) -> &EntityPose {
        &self.poses[id.index()]
    }

    pub fn effect(&self, id: EffectId) -> &EffectState {
        &self.effects[id.index()]
    }
}

/// Validated scene: the act table plus the config it was built from.
#[derive(Clone, Debug)]
pub struct Choreography {
    acts: ActTable,
    config: SceneConfig,
}

impl Choreography {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        let acts = config.validate()?;
        Ok(Self { acts, config })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(SceneConfig::from_json(json)?)
    }

    pub fn acts(&self) -> &ActTable {
        &self.acts
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn transition(&self, p: f64) -> f64 {
        orbit_transition(&self.config.orbit, clamp01(p))
    }

    pub fn frame_context(&self, p: f64) -> FrameContext {
        let p = clamp01(p);
        let (act, local) = self.acts.locate(p);
        let final_act = self.acts.act(self.acts.len() - 1);

        let mut ctx = FrameContext {
            progress: p,
            act,
            local,
            t4: self.transition(p),
            angle: orbit_angle(p, final_act.start, self.config.orbit.max_sweep),
            focus: DVec3::ZERO,
        };
        ctx.focus = pose::resolve_position(EntityId::Target.track(), &ctx);
        ctx
    }

    pub fn resolve(&self, p: f64) -> SceneState {
        let ctx = self.frame_context(p);

        let poses = EntityId::ALL.map(|id| resolve_pose(id, &ctx));
        let effects = EffectId::ALL.map(|id| resolve_effect(id, self.config.effects.spec(id), &ctx));
        let camera_target = camera_target(&ctx, poses[EntityId::Lead.index()].position);
        let telemetry = telemetry(&ctx, &poses, &effects, &self.config.effects.scan_pulse);

        SceneState {
            progress: ctx.progress,
            act: ctx.act.index,
            local_progress: ctx.local,
            t4: ctx.t4,
            poses,
            effects,
            camera_target,
            telemetry,
        }
    }

    /// Largest pose jump across any act boundary, sampled at `b - eps` and
    /// `b + eps`. Returns the gap and the boundary it occurred at.
    pub fn max_boundary_gap(&self, eps: f64) -> (f64, f64) {
        let bounds = self.acts.boundaries();
        let mut worst = (0.0, bounds[0]);
        for &b in &bounds[1..bounds.len() - 1] {
            let before = self.resolve(b - eps);
            let after = self.resolve(b + eps);
            for (x, y) in before.poses.iter().zip(after.poses.iter()) {
                let gap = x
                    .position
                    .distance(y.position)
                    .max((x.rotation_y - y.rotation_y).abs())
                    .max((x.scale - y.scale).abs());
                if gap > worst.0 {
                    worst = (gap, b);
                }
            }
        }
        worst
    }
}

/// Pure entry point: progress to complete scene state, camera excluded.
pub fn resolve_scene_state(choreography: &Choreography, progress: f64) -> SceneState {
    choreography.resolve(progress)
}

/// Per-frame loop: resolve, smooth the camera, write to the scene graph.
pub struct Director {
    choreography: Choreography,
    rig: CameraRig,
    // Only used to log act changes
    last_act: Option<usize>,
}

impl Director {
    pub fn new(choreography: Choreography) -> Self {
        let rig = CameraRig::new(choreography.config().camera_smoothing);
        log::info!(
            "fleet scene ready: {} acts, orbit entry [{}, {}]",
            choreography.acts().len(),
            choreography.config().orbit.entry_start,
            choreography.config().orbit.entry_end,
        );
        Self { choreography, rig, last_act: None }
    }

    pub fn choreography(&self) -> &Choreography {
        &self.choreography
    }

    pub fn camera(&self) -> Option<CameraState> {
        self.rig.current()
    }

    /// Drop camera memory so the next frame snaps (e.g. after a jump-scroll).
    pub fn reset_camera(&mut self) {
        self.rig.reset();
    }

    pub fn frame<G: SceneGraph + ?Sized>(&mut self, progress: f64, graph: &mut G) -> SceneState {
        let state = self.choreography.resolve(progress);

        if self.last_act != Some(state.act) {
            log::debug!("act {:?} -> {} at progress {:.3}", self.last_act, state.act, state.progress);
            self.last_act = Some(state.act);
        }

        let camera = self.rig.update(&state.camera_target);

        for pose in &state.poses {
            graph.set_pose(pose);
        }
        for effect in &state.effects {
            graph.set_effect(effect);
        }
        graph.set_camera(&camera);
        graph.set_telemetry(&state.telemetry);
        graph.set_frame(state.act, state.local_progress);

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        poses: Vec<EntityPose>,
        effects: Vec<EffectState>,
        cameras: Vec<CameraState>,
        frames: Vec<(usize, f64)>,
    }

    impl SceneGraph for Recorder {
        fn set_pose(&mut self, pose: &EntityPose) {
            self.poses.push(*pose);
        }
        fn set_effect(&mut self, effect: &EffectState) {
            self.effects.push(*effect);
        }
        fn set_camera(&mut self, camera: &CameraState) {
            self.cameras.push(*camera);
        }
        fn set_frame(&mut self, act: usize, local: f64) {
            self.frames.push((act, local));
        }
    }

    fn director() -> Director {
        Director::new(Choreography::new(SceneConfig::default()).unwrap())
    }

    #[test]
    fn frame_writes_every_node() {
        let mut d = director();
        let mut rec = Recorder::default();
        d.frame(0.4, &mut rec);
        assert_eq!(rec.poses.len(), ENTITY_COUNT);
        assert_eq!(rec.effects.len(), EFFECT_COUNT);
        assert_eq!(rec.cameras.len(), 1);
        assert_eq!(rec.frames, vec![(1, map_range(0.4, 0.25, 0.5))]);
    }

    #[test]
    fn repeated_frame_only_moves_camera() {
        let mut d = director();
        let mut rec = Recorder::default();
        d.frame(0.1, &mut rec);
        let first = d.frame(0.6, &mut rec);
        let cam_a = d.camera().unwrap();
        let second = d.frame(0.6, &mut rec);
        let cam_b = d.camera().unwrap();

        assert_eq!(first, second);
        assert_eq!(rec.poses[ENTITY_COUNT..2 * ENTITY_COUNT], rec.poses[2 * ENTITY_COUNT..]);
        assert_ne!(cam_a, cam_b);
        let target = second.camera_target.position;
        assert!(cam_b.position.distance(target) < cam_a.position.distance(target));
    }

    #[test]
    fn first_frame_camera_sits_on_target() {
        let mut d = director();
        let state = d.frame(0.3, &mut Recorder::default());
        assert_eq!(d.camera(), Some(state.camera_target));
    }

    #[test]
    fn transition_reaches_one_at_entry_end() {
        let c = Choreography::new(SceneConfig::default()).unwrap();
        assert_eq!(c.transition(0.75), 0.0);
        assert_eq!(c.transition(0.85), 1.0);
        assert_eq!(c.transition(1.0), 1.0);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let c = Choreography::new(SceneConfig::default()).unwrap();
        assert_eq!(c.resolve(-1.0), c.resolve(0.0));
        assert_eq!(c.resolve(2.0), c.resolve(1.0));
        assert_eq!(c.resolve(f64::NAN), c.resolve(0.0));
    }
}
