use wasm_bindgen::prelude::*;

// ============================================================================
// FLEET SCENE - Scroll-driven drone fleet choreography
// ============================================================================

pub mod error;
pub mod lifecycle;
pub mod render;
pub mod scene;
pub mod sim;
pub mod world;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{SceneHandle, mount_scene};

pub use error::ConfigError;
pub use render::{Encoder, SceneGraph};
pub use scene::{EffectId, EntityId, SceneConfig};
pub use sim::{Choreography, Director, SceneState, resolve_scene_state};
pub use world::{ProgressSource, scroll_progress};

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(all(target_arch = "wasm32", feature = "console_error_panic_hook"))]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    console_log::init_with_level(log::Level::Info).ok();
}

fn js_error(e: ConfigError) -> JsValue {
    log::warn!("rejected scene config: {e}");
    JsValue::from_str(&e.to_string())
}

/// Frame-driven scene for a JS render loop: call `tick(progress)` once per
/// frame, then read the encoded transforms from wasm memory.
#[wasm_bindgen]
pub struct FleetScene {
    director: Director,
    encoder: Encoder,
}

#[wasm_bindgen]
impl FleetScene {
    /// `config_json` may be empty or a partial override of the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<FleetScene, JsValue> {
        let choreography = Choreography::from_json(config_json).map_err(js_error)?;
        Ok(Self { director: Director::new(choreography), encoder: Encoder::new() })
    }

    pub fn with_defaults() -> Result<FleetScene, JsValue> {
        Self::new("")
    }

    pub fn tick(&mut self, progress: f64) {
        self.director.frame(progress, &mut self.encoder);
    }

    /// Snap the camera on the next tick instead of easing in.
    pub fn reset_camera(&mut self) {
        self.director.reset_camera();
    }

    /// Full resolved state for `progress` as JSON. Does not touch the camera.
    pub fn state_json(&self, progress: f64) -> Result<String, JsValue> {
        let state = self.director.choreography().resolve(progress);
        serde_json::to_string(&state)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn act_count(&self) -> usize {
        self.director.choreography().acts().len()
    }

    // Accessors for WASM
    pub fn output_ptr(&self) -> *const f32 { self.encoder.ptr() }
    pub fn output_len(&self) -> usize { self.encoder.len() }
}

/// Container-relative scroll progress, for pages that own their listeners.
#[wasm_bindgen(js_name = scrollProgress)]
pub fn scroll_progress_js(
    scroll_top: f64,
    container_top: f64,
    container_height: f64,
    viewport_height: f64,
) -> f64 {
    scroll_progress(scroll_top, container_top, container_height, viewport_height)
}
