//! exam-portal browser layer
//!
//! Loaded by the server-rendered portal pages as a WASM module. On start it
//! mounts the decorative scenes whose containers exist on the page and
//! binds the department -> subject cascade. The same operations are
//! exported for pages that drive them by hand.

pub mod animation;
pub mod cascade;
pub mod config;
pub mod dom;
pub mod error;
pub mod network;
pub mod overlay;
pub mod renderer;
pub mod scene;
pub mod subjects;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::animation::{mount, SceneHandle};
use crate::config::UiConfig;
use crate::overlay::LoadingOverlay;
use crate::scene::ModelKind;
use crate::subjects::SubjectSelect;

thread_local! {
    static CONFIG: RefCell<Option<UiConfig>> = const { RefCell::new(None) };
    static SUBJECTS: RefCell<Option<Rc<SubjectSelect>>> = const { RefCell::new(None) };
}

/// Configuration loaded once per page
fn config() -> UiConfig {
    CONFIG.with(|c| c.borrow_mut().get_or_insert_with(UiConfig::load).clone())
}

/// The page's cascade controller, created on first use
fn subject_select() -> Rc<SubjectSelect> {
    SUBJECTS.with(|s| {
        s.borrow_mut()
            .get_or_insert_with(|| SubjectSelect::new(config().cascade))
            .clone()
    })
}

fn init_logging() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    init_logging();

    dom::on_dom_ready(|| {
        let cfg = config();
        let scenes = [
            (cfg.scenes.logo_id.as_str(), ModelKind::Logo),
            (cfg.scenes.trophy_id.as_str(), ModelKind::Trophy),
            (cfg.scenes.papers_id.as_str(), ModelKind::PaperStack),
            (cfg.scenes.cap_id.as_str(), ModelKind::GraduationCap),
        ];
        for (id, kind) in scenes {
            // Page-lifetime scenes; the loop keeps itself alive until stopped
            let _ = mount_logged(id, kind);
        }

        if let Err(e) = subject_select().bind() {
            tracing::error!(error = ?e, "Failed to bind department select");
        }
    })
}

/// Mount a scene, logging instead of failing the caller
fn mount_logged(container_id: &str, kind: ModelKind) -> Option<SceneHandle> {
    match mount(container_id, kind) {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(%kind, container = container_id, error = %e, "Scene setup failed");
            None
        }
    }
}

#[wasm_bindgen(js_name = init3DLogo)]
pub fn init_3d_logo(container_id: &str) -> Option<SceneHandle> {
    mount_logged(container_id, ModelKind::Logo)
}

#[wasm_bindgen(js_name = init3DTrophy)]
pub fn init_3d_trophy(container_id: &str) -> Option<SceneHandle> {
    mount_logged(container_id, ModelKind::Trophy)
}

#[wasm_bindgen(js_name = init3DPaperStack)]
pub fn init_3d_paper_stack(container_id: &str) -> Option<SceneHandle> {
    mount_logged(container_id, ModelKind::PaperStack)
}

#[wasm_bindgen(js_name = init3DGraduationCap)]
pub fn init_3d_graduation_cap(container_id: &str) -> Option<SceneHandle> {
    mount_logged(container_id, ModelKind::GraduationCap)
}

#[wasm_bindgen(js_name = initLoadingAnimation)]
pub fn init_loading_animation(container_id: &str) -> Option<SceneHandle> {
    mount_logged(container_id, ModelKind::LoadingTorus)
}

/// Name used by the portal templates
#[wasm_bindgen(js_name = init3DLoadingAnimation)]
pub fn init_3d_loading_animation(container_id: &str) -> Option<SceneHandle> {
    init_loading_animation(container_id)
}

/// Repopulate the subject control for a department code
#[wasm_bindgen(js_name = loadSubjectsByDepartment)]
pub fn load_subjects_by_department(department_code: &str) {
    subject_select().load(department_code);
}

#[wasm_bindgen(js_name = loadingShow)]
pub fn loading_show(message: Option<String>) {
    LoadingOverlay::new(config().overlay).show(message.as_deref());
}

#[wasm_bindgen(js_name = loadingHide)]
pub fn loading_hide() {
    LoadingOverlay::new(config().overlay).hide();
}

#[wasm_bindgen(js_name = loadingSetProgress)]
pub fn loading_set_progress(percent: f64) {
    LoadingOverlay::new(config().overlay).set_progress(percent);
}

#[wasm_bindgen(js_name = loadingSetMessage)]
pub fn loading_set_message(message: &str) {
    LoadingOverlay::new(config().overlay).set_message(message);
}
