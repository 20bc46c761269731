//! Mounting scenes and driving their frame loops
//!
//! Each mounted scene is an owned [`SceneHandle`]. The frame and resize
//! closures hold the loop alive while it runs; `stop()` cancels the pending
//! frame, detaches the resize listener and drops both closures.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Element};

use crate::dom::{client_size, element_by_id, get_document, size_or_default};
use crate::error::{Result, UiError};
use crate::renderer::SceneRenderer;
use crate::scene::{ModelKind, Scene};

struct SceneLoop {
    kind: ModelKind,
    container: Element,
    scene: RefCell<Scene>,
    renderer: SceneRenderer,
    running: Cell<bool>,
    frame_id: Cell<Option<i32>>,
    frame_cb: RefCell<Option<Closure<dyn FnMut()>>>,
    resize_cb: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl SceneLoop {
    fn start(self: &Rc<Self>) -> Result<()> {
        let win = window().ok_or(UiError::MissingWindow)?;

        let this = self.clone();
        let frame = Closure::wrap(Box::new(move || this.frame()) as Box<dyn FnMut()>);
        *self.frame_cb.borrow_mut() = Some(frame);

        let this = self.clone();
        let resize = Closure::wrap(Box::new(move || this.refit()) as Box<dyn FnMut()>);
        win.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        *self.resize_cb.borrow_mut() = Some(resize);

        self.running.set(true);
        self.frame();
        Ok(())
    }

    fn frame(&self) {
        if !self.running.get() {
            return;
        }
        self.scene.borrow_mut().advance(js_sys::Date::now());
        self.renderer.draw(&self.scene.borrow());
        self.schedule();
    }

    fn schedule(&self) {
        let Some(win) = window() else { return };
        if let Some(cb) = self.frame_cb.borrow().as_ref() {
            match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => self.frame_id.set(Some(id)),
                Err(e) => {
                    tracing::warn!(kind = %self.kind, error = ?e, "requestAnimationFrame failed");
                    self.running.set(false);
                }
            }
        }
    }

    /// Recompute surface size and camera aspect from the container
    fn refit(&self) {
        let (width, height) = fit_scene(&mut self.scene.borrow_mut(), client_size(&self.container));
        self.renderer.resize(width, height);
    }

    fn stop(&self) {
        let was_running = self.running.replace(false);
        if let Some(win) = window() {
            if let Some(id) = self.frame_id.take() {
                let _ = win.cancel_animation_frame(id);
            }
            if let Some(cb) = self.resize_cb.borrow().as_ref() {
                let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
            }
        }
        // Breaks the Rc cycle through the closures
        self.frame_cb.borrow_mut().take();
        self.resize_cb.borrow_mut().take();
        if was_running {
            tracing::debug!(kind = %self.kind, "Scene stopped");
        }
    }
}

/// Surface size for a `kind` scene whose container measures `client`
fn fitted_size(kind: ModelKind, (width, height): (f64, f64)) -> (f64, f64) {
    size_or_default(width, height, kind.default_size())
}

/// Refit `scene` to its container and return the new surface size
fn fit_scene(scene: &mut Scene, client: (f64, f64)) -> (f64, f64) {
    let (width, height) = fitted_size(scene.kind, client);
    scene.resize(width, height);
    (width, height)
}

/// Running scene mounted into a container
#[wasm_bindgen]
pub struct SceneHandle {
    inner: Rc<SceneLoop>,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Cancel the frame loop and resize listener; safe to call twice
    pub fn stop(&self) {
        self.inner.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Canvas the scene draws into
    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> web_sys::HtmlCanvasElement {
        self.inner.renderer.canvas().clone()
    }
}

/// Mount a `kind` scene into the element with id `container_id`
///
/// Returns `Ok(None)` without touching the page when the container is
/// absent.
pub fn mount(container_id: &str, kind: ModelKind) -> Result<Option<SceneHandle>> {
    let handle = mount_into(element_by_id(container_id), kind)?;
    if handle.is_some() {
        tracing::debug!(%kind, container = container_id, "Scene mounted");
    }
    Ok(handle)
}

fn mount_into(container: Option<Element>, kind: ModelKind) -> Result<Option<SceneHandle>> {
    let Some(container) = container else {
        return Ok(None);
    };
    let document = get_document().ok_or(UiError::MissingWindow)?;

    let (width, height) = fitted_size(kind, client_size(&container));
    let mut rng = SmallRng::from_entropy();
    let scene = Scene::build(kind, width, height, &mut rng);
    let renderer = SceneRenderer::new(&document, width, height)?;
    container.append_child(renderer.canvas())?;

    let inner = Rc::new(SceneLoop {
        kind,
        container,
        scene: RefCell::new(scene),
        renderer,
        running: Cell::new(false),
        frame_id: Cell::new(None),
        frame_cb: RefCell::new(None),
        resize_cb: RefCell::new(None),
    });
    inner.start()?;

    tracing::trace!(%kind, width, height, "Scene surface sized");
    Ok(Some(SceneHandle { inner }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(kind: ModelKind, width: f64, height: f64) -> Scene {
        let mut rng = SmallRng::seed_from_u64(3);
        Scene::build(kind, width, height, &mut rng)
    }

    #[test]
    fn test_absent_container_mounts_nothing() {
        // Returns before any document access
        assert!(mount_into(None, ModelKind::Trophy).unwrap().is_none());
    }

    #[test]
    fn test_hidden_container_uses_kind_default() {
        assert_eq!(fitted_size(ModelKind::Trophy, (0.0, 0.0)), (300.0, 300.0));
        assert_eq!(fitted_size(ModelKind::LoadingTorus, (0.0, 40.0)), (150.0, 40.0));
        assert_eq!(fitted_size(ModelKind::Logo, (480.0, 240.0)), (480.0, 240.0));
    }

    #[test]
    fn test_fit_scene_tracks_container() {
        let mut s = scene(ModelKind::PaperStack, 250.0, 250.0);
        assert_eq!(fit_scene(&mut s, (500.0, 250.0)), (500.0, 250.0));
        assert!((s.camera.aspect - 2.0).abs() < f32::EPSILON);

        // Collapsed container falls back to the default square
        assert_eq!(fit_scene(&mut s, (0.0, 0.0)), (250.0, 250.0));
        assert!((s.camera.aspect - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fit_scene_is_idempotent_per_size() {
        let mut s = scene(ModelKind::GraduationCap, 250.0, 250.0);
        let first = fit_scene(&mut s, (320.0, 160.0));
        let camera = s.camera;
        assert_eq!(fit_scene(&mut s, (320.0, 160.0)), first);
        assert_eq!(s.camera, camera);
    }
}
