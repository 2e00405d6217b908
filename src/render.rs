// render.rs - Encode frame state to output buffer
//
// Output layout (f32, read from JS through output_ptr/output_len):
//   0..25    = entity poses   (5 entities x [x, y, z, rot_y, scale])
//   25..40   = effects        (5 effects x [visible, opacity, intensity])
//   40..46   = camera         ([px, py, pz, lx, ly, lz])
//   46..50   = telemetry      ([altitude, range, coverage, linked])
//   50..52   = frame          ([act, local progress])

use crate::scene::{EFFECT_COUNT, ENTITY_COUNT};
use crate::sim::{CameraState, EffectState, EntityPose, Telemetry};

pub const POSE_STRIDE: usize = 5;
pub const EFFECT_STRIDE: usize = 3;

pub const POSES_AT: usize = 0;
pub const EFFECTS_AT: usize = POSES_AT + ENTITY_COUNT * POSE_STRIDE;
pub const CAMERA_AT: usize = EFFECTS_AT + EFFECT_COUNT * EFFECT_STRIDE;
pub const TELEMETRY_AT: usize = CAMERA_AT + 6;
pub const FRAME_AT: usize = TELEMETRY_AT + 4;
pub const OUTPUT_LEN: usize = FRAME_AT + 2;

/// The scene-graph handle the frame loop writes into. Implementors treat
/// every call as "overwrite this node for the next draw".
pub trait SceneGraph {
    fn set_pose(&mut self, pose: &EntityPose);
    fn set_effect(&mut self, effect: &EffectState);
    fn set_camera(&mut self, camera: &CameraState);
    fn set_telemetry(&mut self, _telemetry: &Telemetry) {}
    fn set_frame(&mut self, _act: usize, _local: f64) {}
}

pub struct Encoder {
    out: Vec<f32>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self { out: vec![0.0; OUTPUT_LEN] }
    }

    pub fn clear(&mut self) {
        self.out.fill(0.0);
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.out
    }

    #[inline]
    fn write(&mut self, at: usize, values: &[f64]) {
        for (slot, v) in self.out[at..at + values.len()].iter_mut().zip(values) {
            *slot = *v as f32;
        }
    }
}

impl SceneGraph for Encoder {
    fn set_pose(&mut self, pose: &EntityPose) {
        let p = pose.position;
        let at = POSES_AT + pose.id.index() * POSE_STRIDE;
        self.write(at, &[p.x, p.y, p.z, pose.rotation_y, pose.scale]);
    }

    fn set_effect(&mut self, effect: &EffectState) {
        let at = EFFECTS_AT + effect.id.index() * EFFECT_STRIDE;
        let visible = if effect.visible { 1.0 } else { 0.0 };
        self.write(at, &[visible, effect.opacity, effect.intensity]);
    }

    fn set_camera(&mut self, camera: &CameraState) {
        let (p, l) = (camera.position, camera.look_at);
        self.write(CAMERA_AT, &[p.x, p.y, p.z, l.x, l.y, l.z]);
    }

    fn set_telemetry(&mut self, t: &Telemetry) {
        self.write(
            TELEMETRY_AT,
            &[t.altitude, t.range_to_target, t.coverage, t.linked_units as f64],
        );
    }

    fn set_frame(&mut self, act: usize, local: f64) {
        self.write(FRAME_AT, &[act as f64, local]);
    }
}
