//! Cascading subject select bound to the page
//!
//! Wires the department control to a [`SubjectCascade`] and renders its
//! views into either the `<select>` inside the subject container or, when
//! the page has no container, the plain subject list.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::cascade::{CascadeAction, SubjectCascade, SubjectView};
use crate::config::CascadeConfig;
use crate::dom::{element_by_id, first_element_by_id, get_document, query_in};
use crate::network::fetch_subjects;

/// Cascade controller plus the DOM targets it renders into
pub struct SubjectSelect {
    config: CascadeConfig,
    cascade: RefCell<SubjectCascade>,
}

impl SubjectSelect {
    pub fn new(config: CascadeConfig) -> Rc<Self> {
        let cascade = SubjectCascade::new(config.endpoint.clone());
        Rc::new(Self {
            config,
            cascade: RefCell::new(cascade),
        })
    }

    /// Attach change listeners and issue the initial load
    ///
    /// Missing controls are skipped.
    pub fn bind(self: &Rc<Self>) -> Result<(), JsValue> {
        if let Some(department) = first_element_by_id(&self.config.department_ids) {
            let this = self.clone();
            let onchange = Closure::wrap(Box::new(move |e: web_sys::Event| {
                let code = e.current_target().map(|t| control_value(&t)).unwrap_or_default();
                this.load(&code);
            }) as Box<dyn FnMut(_)>);
            department.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
            onchange.forget();

            // Re-rendered forms (validation errors) arrive with a department already chosen
            let initial = control_value(&department);
            if !initial.is_empty() {
                self.load(&initial);
            }
        }

        if let Some(admin_subject) = element_by_id(&self.config.admin_subject_id) {
            // Paper form resolves its questions server-side on submit
            let onchange = Closure::wrap(Box::new(move |_e: web_sys::Event| {}) as Box<dyn FnMut(_)>);
            admin_subject.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
            onchange.forget();
        }

        Ok(())
    }

    /// Repopulate the subject control for `department_code`
    pub fn load(self: &Rc<Self>, department_code: &str) {
        let action = self.cascade.borrow_mut().begin(department_code);
        match action {
            CascadeAction::Clear => self.render(&SubjectView::Placeholder),
            CascadeAction::Fetch { token, url } => {
                let this = self.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = fetch_subjects(&url).await;
                    let view = this.cascade.borrow_mut().complete(token, outcome);
                    if let Some(view) = view {
                        this.render(&view);
                    }
                });
            }
        }
    }

    fn render(&self, view: &SubjectView) {
        let container = element_by_id(&self.config.subject_container_id);
        let select = container.as_ref().and_then(|c| query_in(c, "select"));
        let list = element_by_id(&self.config.subject_list_id);
        let plan = render_plan(container.is_some(), select.is_some(), list.is_some(), view);

        if let (true, Some(select)) = (plan.fill_select, &select) {
            if let Err(e) = self.fill_select(select, view) {
                tracing::error!(error = ?e, "Failed to update subject select");
            }
        }
        if let (true, Some(list)) = (plan.fill_list, &list) {
            if let Err(e) = fill_list(list, view) {
                tracing::error!(error = ?e, "Failed to update subject list");
            }
        }
    }

    fn fill_select(&self, select: &Element, view: &SubjectView) -> Result<(), JsValue> {
        let doc = get_document().ok_or("No document")?;
        select.set_inner_html("");
        for opt in view.options(&self.config.placeholder_label) {
            let option = doc.create_element("option")?;
            option.set_attribute("value", &opt.value)?;
            option.set_text_content(Some(&opt.label));
            select.append_child(&option)?;
        }
        Ok(())
    }
}

/// Which targets a view is written to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderPlan {
    pub fill_select: bool,
    pub fill_list: bool,
}

/// Resolve render targets from what the page contains
///
/// The select inside the subject container wins. The list is the fallback
/// for pages without a container, and is still emptied on a placeholder
/// view when both exist.
pub fn render_plan(has_container: bool, has_select: bool, has_list: bool, view: &SubjectView) -> RenderPlan {
    let populated = matches!(view, SubjectView::Populated(_));
    RenderPlan {
        fill_select: has_container && has_select,
        fill_list: has_list && !(has_container && populated),
    }
}

fn fill_list(list: &Element, view: &SubjectView) -> Result<(), JsValue> {
    let doc = get_document().ok_or("No document")?;
    list.set_inner_html("");
    for subject in view.subjects() {
        let li = doc.create_element("li")?;
        li.set_class_name("list-group-item");
        li.set_text_content(Some(&subject.label()));
        li.set_attribute("data-subject-id", &subject.id.to_string())?;
        list.append_child(&li)?;
    }
    Ok(())
}

/// `value` of a form control, whatever its element type
fn control_value(control: &JsValue) -> String {
    js_sys::Reflect::get(control, &"value".into())
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_portal_protocol::Subject;

    fn populated() -> SubjectView {
        SubjectView::Populated(vec![Subject {
            id: 4,
            code: "MA201".into(),
            name: "Linear Algebra".into(),
        }])
    }

    const fn plan(fill_select: bool, fill_list: bool) -> RenderPlan {
        RenderPlan {
            fill_select,
            fill_list,
        }
    }

    #[test]
    fn test_populated_goes_to_select_only() {
        assert_eq!(render_plan(true, true, true, &populated()), plan(true, false));
    }

    #[test]
    fn test_placeholder_resets_select_and_empties_list() {
        assert_eq!(render_plan(true, true, true, &SubjectView::Placeholder), plan(true, true));
    }

    #[test]
    fn test_list_fallback_without_container() {
        assert_eq!(render_plan(false, false, true, &populated()), plan(false, true));
        assert_eq!(render_plan(false, false, true, &SubjectView::Placeholder), plan(false, true));
    }

    #[test]
    fn test_container_without_select_leaves_list_alone_when_populated() {
        assert_eq!(render_plan(true, false, true, &populated()), plan(false, false));
    }

    #[test]
    fn test_nothing_on_page() {
        assert_eq!(render_plan(false, false, false, &populated()), plan(false, false));
        assert_eq!(render_plan(false, false, false, &SubjectView::Placeholder), plan(false, false));
    }
}
