// output.rs - Probe line format

use fleet_engine::SceneGraph;
use fleet_engine::sim::{CameraState, EffectState, EntityPose, SceneState};
use serde::Serialize;

/// One JSON line per sample: the pure state plus the smoothed camera, if run.
#[derive(Serialize)]
pub struct ProbeLine<'a> {
    #[serde(flatten)]
    pub state: &'a SceneState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraState>,
}

/// Scene graph that discards writes; the probe only needs the director's camera.
pub struct NullGraph;

impl SceneGraph for NullGraph {
    fn set_pose(&mut self, _pose: &EntityPose) {}
    fn set_effect(&mut self, _effect: &EffectState) {}
    fn set_camera(&mut self, _camera: &CameraState) {}
}
