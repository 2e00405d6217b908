// data.rs - Tuned fleet sequence
//
// Scene units: 1.0 ~ one meter, +y up, the fleet flies toward -z.
// Act 1 launch, act 2 canyon transit, act 3 detection, act 4 engagement orbit.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

use glam::DVec3;

use super::{ACT_COUNT, ENTITY_COUNT};
use crate::world::Ease;

pub const DEFAULT_ACT_BOUNDS: [f64; ACT_COUNT + 1] = [0.0, 0.25, 0.5, 0.75, 1.0];

// Orbit entry
pub const ORBIT_ENTRY_START: f64 = 0.75;
pub const ORBIT_ENTRY_END: f64 = 0.85;
pub const ORBIT_MAX_SWEEP: f64 = 1.25 * PI;

pub const CAMERA_SMOOTHING: f64 = 0.05;

// Banking yaw
pub const BANK_AMPLITUDE: f64 = 0.18;
pub const BANK_CYCLES: f64 = 2.0;

// Effect tuning
pub const SCAN_PULSES: f64 = 3.0;
pub const LINK_SHIMMER_CYCLES: f64 = 8.0;

// HUD readouts
pub const HUD_METERS_PER_UNIT: f64 = 10.0;
pub const LINK_RANGE: f64 = 40.0;

/// Circular slot an entity takes around the target in the final act.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSlot {
    pub radius: f64,
    pub phase: f64,
    pub altitude: f64,
}

/// What an entity does during the final act.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FinalLeg {
    /// Circle the target, entered through the shared transition factor.
    Orbit(OrbitSlot),
    /// Keep moving along a straight leg.
    Drive { to: DVec3, ease: Ease },
}

/// Scale-in window for entities that appear mid-sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub from: f64,
    pub to: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    /// Position at the start of each act.
    pub waypoints: [DVec3; ACT_COUNT],
    /// Curve for each transit act (all but the last).
    pub eases: [Ease; ACT_COUNT - 1],
    pub final_leg: FinalLeg,
    /// Yaw while in transit.
    pub heading: f64,
    /// Peak banking yaw added on top of the heading.
    pub bank: f64,
    pub bank_phase: f64,
    pub scale: f64,
    pub reveal: Option<Reveal>,
}

const TRANSIT_EASES: [Ease; ACT_COUNT - 1] = [Ease::OutQuart, Ease::InOutCubic, Ease::InOutCubic];

pub static TRACKS: [Track; ENTITY_COUNT] = [
    // Lead
    Track {
        waypoints: [
            DVec3::new(0.0, 0.5, 0.0),
            DVec3::new(0.0, 12.0, -20.0),
            DVec3::new(4.0, 14.0, -70.0),
            DVec3::new(10.0, 10.0, -110.0),
        ],
        eases: TRANSIT_EASES,
        final_leg: FinalLeg::Orbit(OrbitSlot { radius: 14.0, phase: 0.0, altitude: 10.0 }),
        heading: 0.0,
        bank: BANK_AMPLITUDE,
        bank_phase: 0.0,
        scale: 1.0,
        reveal: None,
    },
    // Escort left
    Track {
        waypoints: [
            DVec3::new(-6.0, 0.5, 4.0),
            DVec3::new(-7.0, 11.0, -16.0),
            DVec3::new(-3.0, 13.0, -66.0),
            DVec3::new(4.0, 9.0, -106.0),
        ],
        eases: TRANSIT_EASES,
        final_leg: FinalLeg::Orbit(OrbitSlot { radius: 18.0, phase: TAU / 3.0, altitude: 8.0 }),
        heading: 0.08,
        bank: BANK_AMPLITUDE,
        bank_phase: FRAC_PI_3,
        scale: 0.8,
        reveal: None,
    },
    // Escort right
    Track {
        waypoints: [
            DVec3::new(6.0, 0.5, 4.0),
            DVec3::new(7.0, 11.0, -16.0),
            DVec3::new(11.0, 13.0, -66.0),
            DVec3::new(16.0, 9.0, -106.0),
        ],
        eases: TRANSIT_EASES,
        final_leg: FinalLeg::Orbit(OrbitSlot { radius: 18.0, phase: 2.0 * TAU / 3.0, altitude: 8.0 }),
        heading: -0.08,
        bank: BANK_AMPLITUDE,
        bank_phase: 2.0 * FRAC_PI_3,
        scale: 0.8,
        reveal: None,
    },
    // Overwatch
    Track {
        waypoints: [
            DVec3::new(0.0, 30.0, 30.0),
            DVec3::new(0.0, 32.0, 0.0),
            DVec3::new(6.0, 34.0, -50.0),
            DVec3::new(14.0, 32.0, -100.0),
        ],
        eases: [Ease::Linear, Ease::InOutCubic, Ease::InOutCubic],
        final_leg: FinalLeg::Orbit(OrbitSlot { radius: 26.0, phase: FRAC_PI_3, altitude: 28.0 }),
        heading: 0.0,
        bank: BANK_AMPLITUDE * 0.5,
        bank_phase: PI,
        scale: 1.4,
        reveal: None,
    },
    // Ground target
    Track {
        waypoints: [
            DVec3::new(18.0, 0.0, -136.0),
            DVec3::new(18.0, 0.0, -136.0),
            DVec3::new(18.0, 0.0, -136.0),
            DVec3::new(20.0, 0.0, -140.0),
        ],
        eases: [Ease::Linear, Ease::Linear, Ease::InOutCubic],
        final_leg: FinalLeg::Drive { to: DVec3::new(26.0, 0.0, -152.0), ease: Ease::Linear },
        heading: -FRAC_PI_2 + 0.46,
        bank: 0.0,
        bank_phase: 0.0,
        scale: 1.0,
        reveal: Some(Reveal { from: 0.5, to: 0.6 }),
    },
];

/// Camera offset from its focus at the start of each act, plus the final frame.
pub const CAMERA_OFFSETS: [DVec3; ACT_COUNT + 1] = [
    DVec3::new(0.0, 4.0, 18.0),
    DVec3::new(-10.0, 8.0, 24.0),
    DVec3::new(-18.0, 6.0, 16.0),
    DVec3::new(-6.0, 20.0, 34.0),
    DVec3::new(30.0, 42.0, 48.0),
];

pub const CAMERA_EASES: [Ease; ACT_COUNT] =
    [Ease::OutQuart, Ease::InOutCubic, Ease::InOutCubic, Ease::InOutCubic];

// Default effect windows
pub const SCAN_PULSE_ON: f64 = 0.5;
pub const SCAN_PULSE_OFF: f64 = 0.75;
pub const DATA_LINK_ON: f64 = 0.25;
pub const SYNC_BURST_ON: f64 = 0.75;
pub const SYNC_BURST_OFF: f64 = 0.8;
pub const GRID_ON: f64 = 0.75;
pub const GRID_FADE: f64 = 0.1;
pub const GRID_MAX_OPACITY: f64 = 0.6;
pub const RETICLE_ON: f64 = 0.55;
pub const RETICLE_FADE: f64 = 0.05;
