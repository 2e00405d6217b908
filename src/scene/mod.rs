// scene/ - Hand-tuned choreography data
//
// This module contains the tables that define the four-act fleet sequence:
// - Entity and effect identifiers
// - Per-entity waypoints, act curves and final legs (transit or orbit)
// - Camera keyframe offsets
// - Default act boundaries, orbit entry and effect windows
// - The serde-facing config that overrides any of the defaults

mod config;
mod data;

pub use config::*;
pub use data::*;

use serde::Serialize;

pub const ACT_COUNT: usize = 4;
pub const ENTITY_COUNT: usize = 5;
pub const EFFECT_COUNT: usize = 5;

/// Animated units in the fleet scene. The camera is handled separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityId {
    Lead,
    EscortLeft,
    EscortRight,
    Overwatch,
    Target,
}

impl EntityId {
    pub const ALL: [EntityId; ENTITY_COUNT] = [
        EntityId::Lead,
        EntityId::EscortLeft,
        EntityId::EscortRight,
        EntityId::Overwatch,
        EntityId::Target,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityId::Lead => "lead",
            EntityId::EscortLeft => "escort_left",
            EntityId::EscortRight => "escort_right",
            EntityId::Overwatch => "overwatch",
            EntityId::Target => "target",
        }
    }

    pub fn track(self) -> &'static Track {
        &TRACKS[self.index()]
    }
}

/// Secondary visuals gated by progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectId {
    ScanPulse,
    DataLink,
    SyncBurst,
    Grid,
    Reticle,
}

impl EffectId {
    pub const ALL: [EffectId; EFFECT_COUNT] = [
        EffectId::ScanPulse,
        EffectId::DataLink,
        EffectId::SyncBurst,
        EffectId::Grid,
        EffectId::Reticle,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectId::ScanPulse => "scan_pulse",
            EffectId::DataLink => "data_link",
            EffectId::SyncBurst => "sync_burst",
            EffectId::Grid => "grid",
            EffectId::Reticle => "reticle",
        }
    }
}
