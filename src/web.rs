// web.rs - Browser mount
//
// Scroll/resize listeners write the progress cell; a requestAnimationFrame
// loop reads it, runs the director and hands the encoded frame to JS.
// Unmounting removes whichever listeners were attached and cancels the
// pending frame; lifecycle.rs keeps that record.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, Window};

use crate::lifecycle::Lifecycle;
use crate::render::Encoder;
use crate::sim::{Choreography, Director};
use crate::world::ProgressSource;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn sample(source: &ProgressSource, window: &Window, container: &Element) -> f64 {
    let rect = container.get_bounding_client_rect();
    let scroll_top = window.scroll_y().unwrap_or(0.0);
    let viewport = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    source.update(scroll_top, rect.top() + scroll_top, rect.height(), viewport)
}

fn request_frame(window: &Window, slot: &FrameSlot, life: &Lifecycle) {
    let Some(cb) = slot.borrow().as_ref().map(|cb| cb.as_ref().unchecked_ref::<js_sys::Function>().clone()) else {
        return;
    };
    match window.request_animation_frame(&cb) {
        Ok(id) => life.scheduled(id),
        Err(e) => {
            life.fired();
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

struct Mount {
    window: Window,
    scroll: Closure<dyn FnMut(Event)>,
    resize: Closure<dyn FnMut(Event)>,
    frame: FrameSlot,
    life: Rc<Lifecycle>,
}

impl Mount {
    fn listener(&self, event: &str) -> &Closure<dyn FnMut(Event)> {
        if event == "scroll" { &self.scroll } else { &self.resize }
    }

    fn attach(&self, event: &'static str) -> Result<(), JsValue> {
        self.window
            .add_event_listener_with_callback(event, self.listener(event).as_ref().unchecked_ref())?;
        self.life.listening(event);
        Ok(())
    }

    fn detach(self) {
        let teardown = self.life.stop();

        for event in teardown.listeners {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback(event, self.listener(event).as_ref().unchecked_ref())
            {
                log::warn!("failed to remove {} listener: {:?}", event, e);
            }
        }

        if let Some(id) = teardown.cancel_frame {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }

        self.frame.borrow_mut().take();
        log::info!("fleet scene unmounted");
    }
}

/// Live scene bound to a DOM container. Dropping it (or `free()` from JS)
/// unmounts as well.
#[wasm_bindgen]
pub struct SceneHandle {
    mount: Option<Mount>,
}

#[wasm_bindgen]
impl SceneHandle {
    pub fn unmount(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.detach();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }
}

impl Drop for SceneHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mount the fleet scene on `container_id`. `on_frame` receives a
/// Float32Array in the render.rs layout once per display frame.
#[wasm_bindgen]
pub fn mount_scene(
    container_id: &str,
    config_json: &str,
    on_frame: js_sys::Function,
) -> Result<SceneHandle, JsValue> {
    let choreography = Choreography::from_json(config_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", container_id)))?;

    let source = ProgressSource::new();
    sample(&source, &window, &container);

    let listener = || {
        let (source, window, container) = (source.clone(), window.clone(), container.clone());
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            sample(&source, &window, &container);
        })
    };
    let mount = Mount {
        window: window.clone(),
        scroll: listener(),
        resize: listener(),
        frame: Rc::new(RefCell::new(None)),
        life: Rc::new(Lifecycle::new()),
    };
    for event in ["scroll", "resize"] {
        if let Err(e) = mount.attach(event) {
            mount.detach();
            return Err(e);
        }
    }

    {
        let slot: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&mount.frame);
        let (life, window) = (mount.life.clone(), window.clone());
        let source = source.clone();
        let mut director = Director::new(choreography);
        let mut encoder = Encoder::new();

        *mount.frame.borrow_mut() = Some(Closure::new(move || {
            if !life.fired() { return; }

            director.frame(source.get(), &mut encoder);
            let buf = js_sys::Float32Array::from(encoder.as_slice());
            if let Err(e) = on_frame.call1(&JsValue::NULL, &buf) {
                log::warn!("frame callback threw: {:?}", e);
            }

            // on_frame may have unmounted us
            if !life.is_running() { return; }
            if let Some(slot) = slot.upgrade() {
                request_frame(&window, &slot, &life);
            }
        }));
    }

    request_frame(&window, &mount.frame, &mount.life);
    log::info!("fleet scene mounted on #{}", container_id);

    Ok(SceneHandle { mount: Some(mount) })
}
