// Scene-level properties of the fleet choreography, checked through the
// public API only.

use fleet_engine::scene::{ActivationWindow, FinalLeg, OrbitConfig, TRACKS};
use fleet_engine::sim::{SceneState, orbit_position, transit_position};
use fleet_engine::{
    Choreography, Director, EffectId, EntityId, ProgressSource, SceneConfig, SceneGraph,
    resolve_scene_state,
};
use fleet_engine::sim::{CameraState, EffectState, EntityPose};

const TOLERANCE: f64 = 1e-6;
const EPSILON: f64 = 1e-10;

fn default_scene() -> Choreography {
    Choreography::new(SceneConfig::default()).unwrap()
}

fn grid(n: usize) -> impl Iterator<Item = f64> {
    (0..=n).map(move |i| i as f64 / n as f64)
}

fn assert_finite(state: &SceneState) {
    for pose in &state.poses {
        assert!(pose.position.is_finite(), "{:?} position at {}", pose.id, state.progress);
        assert!(pose.rotation_y.is_finite(), "{:?} rotation at {}", pose.id, state.progress);
        assert!(pose.scale.is_finite(), "{:?} scale at {}", pose.id, state.progress);
    }
    for effect in &state.effects {
        assert!(effect.opacity.is_finite() && effect.intensity.is_finite());
    }
    assert!(state.camera_target.position.is_finite());
    assert!(state.camera_target.look_at.is_finite());
    assert!(state.telemetry.altitude.is_finite());
    assert!(state.telemetry.range_to_target.is_finite());
    assert!(state.t4.is_finite());
}

#[test]
fn resolve_is_deterministic() {
    let scene = default_scene();
    for p in grid(97) {
        assert_eq!(resolve_scene_state(&scene, p), resolve_scene_state(&scene, p));
    }
}

#[test]
fn poses_are_continuous_across_act_boundaries() {
    let scene = default_scene();
    for &b in &scene.acts().boundaries()[1..4] {
        let before = scene.resolve(b - EPSILON);
        let after = scene.resolve(b + EPSILON);
        for (x, y) in before.poses.iter().zip(after.poses.iter()) {
            assert!(
                x.position.distance(y.position) < TOLERANCE,
                "{:?} position jumps at {b}: {} vs {}",
                x.id,
                x.position,
                y.position
            );
            assert!((x.rotation_y - y.rotation_y).abs() < TOLERANCE, "{:?} rotation at {b}", x.id);
            assert!((x.scale - y.scale).abs() < TOLERANCE, "{:?} scale at {b}", x.id);
        }
    }
    let (gap, _) = scene.max_boundary_gap(EPSILON);
    assert!(gap < TOLERANCE);
}

#[test]
fn outputs_are_finite_everywhere() {
    let scene = default_scene();
    let mut points: Vec<f64> = grid(1000).collect();
    points.extend_from_slice(scene.acts().boundaries());
    points.extend_from_slice(&[0.85, 0.8, 0.55, 0.6]);
    for p in points {
        assert_finite(&scene.resolve(p));
    }
}

#[test]
fn orbit_entry_is_monotonic_and_completes() {
    let scene = default_scene();
    let OrbitConfig { entry_start, entry_end, .. } = scene.config().orbit;

    let mut prev = scene.transition(entry_start);
    assert_eq!(prev, 0.0);
    for i in 1..=500 {
        let p = entry_start + (entry_end - entry_start) * i as f64 / 500.0;
        let t4 = scene.transition(p);
        assert!(t4 >= prev, "t4 decreased at {p}");
        prev = t4;
    }
    assert_eq!(scene.transition(entry_end), 1.0);
}

#[test]
fn all_units_share_one_transition_factor() {
    let scene = default_scene();
    for p in [0.76, 0.78, 0.8, 0.83] {
        let state = scene.resolve(p);
        let ctx = scene.frame_context(p);
        for id in [EntityId::Lead, EntityId::EscortLeft, EntityId::EscortRight, EntityId::Overwatch] {
            let track = id.track();
            let FinalLeg::Orbit(slot) = track.final_leg else { unreachable!() };
            let start = track.waypoints[3];
            let orbit = orbit_position(ctx.focus, &slot, ctx.angle);
            let expected = start + (orbit - start) * state.t4;
            assert!(state.pose(id).position.distance(expected) < 1e-9, "{id:?} at {p}");
        }
    }
}

#[test]
fn effect_windows_gate_visibility() {
    let scene = default_scene();
    let effects = scene.config().effects;
    for id in EffectId::ALL {
        let window = effects.spec(id).window;
        let mut points: Vec<f64> = grid(200).collect();
        points.push(window.on());
        points.push(window.off());

        for p in points {
            let visible = scene.resolve(p).effect(id).visible;
            let expected = match window {
                ActivationWindow::Span { on, off } => p >= on && p < off,
                ActivationWindow::Sustained { on } => p >= on,
            };
            assert_eq!(visible, expected, "{id:?} at {p}");
        }
    }
}

#[test]
fn lead_starts_on_its_first_waypoint() {
    let state = default_scene().resolve(0.0);
    assert_eq!(state.pose(EntityId::Lead).position, TRACKS[0].waypoints[0]);
}

#[test]
fn first_boundary_joins_act_formulas() {
    let lead = EntityId::Lead.track();
    let act_one_end = transit_position(lead, 0, 1.0);
    let act_two_start = transit_position(lead, 1, 0.0);
    assert_eq!(act_one_end, act_two_start);
    assert_eq!(default_scene().resolve(0.25).pose(EntityId::Lead).position, act_two_start);
}

#[test]
fn final_frame_sits_on_closed_form_orbit() {
    let scene = default_scene();
    let state = scene.resolve(1.0);
    let sweep = scene.config().orbit.max_sweep;
    let FinalLeg::Drive { to: target_end, .. } = EntityId::Target.track().final_leg else {
        unreachable!()
    };
    assert_eq!(state.pose(EntityId::Target).position, target_end);

    for id in [EntityId::Lead, EntityId::EscortLeft, EntityId::EscortRight, EntityId::Overwatch] {
        let FinalLeg::Orbit(slot) = id.track().final_leg else { unreachable!() };
        let a = slot.phase + sweep;
        let expected = target_end
            + glam::DVec3::new(slot.radius * a.cos(), slot.altitude, slot.radius * a.sin());
        assert!(state.pose(id).position.distance(expected) < 1e-9, "{id:?}");
    }
}

#[test]
fn retuned_acts_stay_continuous() {
    let json = r#"{
        "acts": [0.0, 0.2, 0.45, 0.7, 1.0],
        "orbit": { "entry_start": 0.7, "entry_end": 0.82, "max_sweep": 4.0 }
    }"#;
    let scene = Choreography::from_json(json).unwrap();
    let (gap, at) = scene.max_boundary_gap(EPSILON);
    assert!(gap < TOLERANCE, "gap {gap} at {at}");
    assert_eq!(scene.resolve(0.45).act, 2);
    assert_finite(&scene.resolve(1.0));
}

#[derive(Default)]
struct Nodes {
    poses: Vec<EntityPose>,
    camera: Option<CameraState>,
}

impl SceneGraph for Nodes {
    fn set_pose(&mut self, pose: &EntityPose) {
        self.poses.push(*pose);
    }
    fn set_effect(&mut self, _effect: &EffectState) {}
    fn set_camera(&mut self, camera: &CameraState) {
        self.camera = Some(*camera);
    }
}

#[test]
fn scroll_source_drives_the_director() {
    // 4000px container, 1000px viewport: 3000px of scroll range
    let source = ProgressSource::new();
    let mut director = Director::new(default_scene());
    let mut nodes = Nodes::default();

    source.update(2250.0, 0.0, 4000.0, 1000.0);
    let deep = director.frame(source.get(), &mut nodes);
    assert_eq!(deep.act, 3);
    assert!(deep.effect(EffectId::Grid).visible);

    // scrolling back up re-hides everything the final act switched on
    source.update(600.0, 0.0, 4000.0, 1000.0);
    let shallow = director.frame(source.get(), &mut nodes);
    assert_eq!(shallow.act, 0);
    assert!(!shallow.effect(EffectId::Grid).visible);
    assert!(!shallow.effect(EffectId::SyncBurst).visible);
    assert_eq!(shallow, default_scene().resolve(0.2));
}

#[test]
fn camera_converges_while_scroll_is_still() {
    let mut director = Director::new(default_scene());
    let mut nodes = Nodes::default();
    let state = director.frame(0.1, &mut nodes);
    director.frame(0.9, &mut nodes);
    let target = director.choreography().resolve(0.9).camera_target;
    assert_ne!(state.camera_target, target);

    for _ in 0..600 {
        director.frame(0.9, &mut nodes);
    }
    let cam = nodes.camera.unwrap();
    assert!(cam.position.distance(target.position) < 1e-6);
    assert!(cam.look_at.distance(target.look_at) < 1e-6);
}
