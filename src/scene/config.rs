// config.rs - Overridable scene parameters
//
// Every field defaults to the tuned value in data.rs, so a JSON document
// only needs the keys it wants to change.

use serde::{Deserialize, Serialize};

use super::{EffectId, data::*};
use crate::error::{ConfigError, ensure_finite};
use crate::world::ActTable;

/// Progress range over which an effect is shown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivationWindow {
    /// Visible for `on <= p < off`.
    Span { on: f64, off: f64 },
    /// Visible for `p >= on`, through the end of the sequence.
    Sustained { on: f64 },
}

impl ActivationWindow {
    #[inline]
    pub fn contains(&self, p: f64) -> bool {
        match *self {
            ActivationWindow::Span { on, off } => p >= on && p < off,
            ActivationWindow::Sustained { on } => p >= on,
        }
    }

    #[inline]
    pub fn on(&self) -> f64 {
        match *self {
            ActivationWindow::Span { on, .. } | ActivationWindow::Sustained { on } => on,
        }
    }

    /// End of the window; sustained windows end with the sequence.
    #[inline]
    pub fn off(&self) -> f64 {
        match *self {
            ActivationWindow::Span { off, .. } => off,
            ActivationWindow::Sustained { .. } => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EffectSpec {
    pub window: ActivationWindow,
    /// Length of the opacity ramp after `on`. Zero means constant opacity.
    pub fade_in: f64,
    pub max_opacity: f64,
}

/// JSON form of one effect. Missing keys keep that effect's tuned value.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
struct EffectOverride {
    window: Option<ActivationWindow>,
    fade_in: Option<f64>,
    max_opacity: Option<f64>,
}

impl EffectSpec {
    const fn span(on: f64, off: f64, fade_in: f64, max_opacity: f64) -> Self {
        Self { window: ActivationWindow::Span { on, off }, fade_in, max_opacity }
    }

    const fn sustained(on: f64, fade_in: f64, max_opacity: f64) -> Self {
        Self { window: ActivationWindow::Sustained { on }, fade_in, max_opacity }
    }

    fn merged(self, o: Option<EffectOverride>) -> Self {
        let Some(o) = o else { return self };
        Self {
            window: o.window.unwrap_or(self.window),
            fade_in: o.fade_in.unwrap_or(self.fade_in),
            max_opacity: o.max_opacity.unwrap_or(self.max_opacity),
        }
    }

    fn validate(&self, effect: &'static str) -> Result<(), ConfigError> {
        let bad = |reason: String| ConfigError::EffectWindow { effect, reason };

        let on = ensure_finite("effect on", self.window.on())?;
        let off = ensure_finite("effect off", self.window.off())?;
        ensure_finite("effect fade_in", self.fade_in)?;
        ensure_finite("effect max_opacity", self.max_opacity)?;

        if !(0.0..=1.0).contains(&on) || !(0.0..=1.0).contains(&off) {
            return Err(bad(format!("[{on}, {off}] leaves [0, 1]")));
        }
        if let ActivationWindow::Span { .. } = self.window {
            if off <= on {
                return Err(bad(format!("off {off} is not after on {on}")));
            }
        }
        if self.fade_in < 0.0 {
            return Err(bad(format!("negative fade_in {}", self.fade_in)));
        }
        if !(0.0..=1.0).contains(&self.max_opacity) {
            return Err(bad(format!("max_opacity {} outside [0, 1]", self.max_opacity)));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "EffectOverrides")]
pub struct EffectConfig {
    pub scan_pulse: EffectSpec,
    pub data_link: EffectSpec,
    pub sync_burst: EffectSpec,
    pub grid: EffectSpec,
    pub reticle: EffectSpec,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            scan_pulse: EffectSpec::span(SCAN_PULSE_ON, SCAN_PULSE_OFF, 0.0, 0.8),
            data_link: EffectSpec::sustained(DATA_LINK_ON, 0.05, 0.9),
            sync_burst: EffectSpec::span(SYNC_BURST_ON, SYNC_BURST_OFF, 0.0, 1.0),
            grid: EffectSpec::sustained(GRID_ON, GRID_FADE, GRID_MAX_OPACITY),
            reticle: EffectSpec::sustained(RETICLE_ON, RETICLE_FADE, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
struct EffectOverrides {
    scan_pulse: Option<EffectOverride>,
    data_link: Option<EffectOverride>,
    sync_burst: Option<EffectOverride>,
    grid: Option<EffectOverride>,
    reticle: Option<EffectOverride>,
}

impl From<EffectOverrides> for EffectConfig {
    fn from(o: EffectOverrides) -> Self {
        let base = Self::default();
        Self {
            scan_pulse: base.scan_pulse.merged(o.scan_pulse),
            data_link: base.data_link.merged(o.data_link),
            sync_burst: base.sync_burst.merged(o.sync_burst),
            grid: base.grid.merged(o.grid),
            reticle: base.reticle.merged(o.reticle),
        }
    }
}

impl EffectConfig {
    pub fn spec(&self, id: EffectId) -> &EffectSpec {
        match id {
            EffectId::ScanPulse => &self.scan_pulse,
            EffectId::DataLink => &self.data_link,
            EffectId::SyncBurst => &self.sync_burst,
            EffectId::Grid => &self.grid,
            EffectId::Reticle => &self.reticle,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for id in EffectId::ALL {
            self.spec(id).validate(id.name())?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Progress at which the shared transition factor starts rising.
    pub entry_start: f64,
    /// Progress at which every orbiting unit is fully on its circle.
    pub entry_end: f64,
    /// Orbit angle reached at progress 1, in radians.
    pub max_sweep: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            entry_start: ORBIT_ENTRY_START,
            entry_end: ORBIT_ENTRY_END,
            max_sweep: ORBIT_MAX_SWEEP,
        }
    }
}

impl OrbitConfig {
    /// Entry must sit inside the final act so the orbit blend starts from
    /// the act-3 end pose.
    fn validate(&self, acts: &ActTable) -> Result<(), ConfigError> {
        let start = ensure_finite("orbit entry_start", self.entry_start)?;
        let end = ensure_finite("orbit entry_end", self.entry_end)?;
        ensure_finite("orbit max_sweep", self.max_sweep)?;

        let act_start = acts.act(acts.len() - 1).start;
        if start < act_start || end <= start || end > 1.0 {
            return Err(ConfigError::OrbitEntry { start, end, act_start });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub acts: Vec<f64>,
    pub orbit: OrbitConfig,
    pub effects: EffectConfig,
    pub camera_smoothing: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            acts: DEFAULT_ACT_BOUNDS.to_vec(),
            orbit: OrbitConfig::default(),
            effects: EffectConfig::default(),
            camera_smoothing: CAMERA_SMOOTHING,
        }
    }
}

impl SceneConfig {
    /// Parse a (possibly partial) JSON override. An empty string is the default scene.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Check every field and build the shared act table.
    pub fn validate(&self) -> Result<ActTable, ConfigError> {
        let acts = ActTable::new(&self.acts)?;
        self.orbit.validate(&acts)?;
        self.effects.validate()?;

        let s = ensure_finite("camera_smoothing", self.camera_smoothing)?;
        if s <= 0.0 || s > 1.0 {
            return Err(ConfigError::Smoothing(s));
        }
        Ok(acts)
    }
}
