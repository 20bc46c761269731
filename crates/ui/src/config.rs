//! Configuration for the browser layer
//!
//! Defaults match the markup the portal templates render. A page may
//! override any subset by defining `window.EXAM_PORTAL_CONFIG` before the
//! module loads.

use serde::Deserialize;
use web_sys::window;

use exam_portal_protocol::SUBJECTS_ENDPOINT;

/// Global the page can define to override defaults
pub const CONFIG_GLOBAL: &str = "EXAM_PORTAL_CONFIG";

/// Cascading select configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    pub endpoint: String,
    pub placeholder_label: String,
    /// Department control ids, first match wins
    pub department_ids: Vec<String>,
    pub subject_container_id: String,
    pub subject_list_id: String,
    pub admin_subject_id: String,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            endpoint: SUBJECTS_ENDPOINT.to_string(),
            placeholder_label: "-- Select Subject --".to_string(),
            department_ids: vec!["id_department".to_string(), "department-select".to_string()],
            subject_container_id: "subject-select-container".to_string(),
            subject_list_id: "subject-list".to_string(),
            admin_subject_id: "id_subject".to_string(),
        }
    }
}

/// Loading overlay configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub overlay_id: String,
    pub message_selector: String,
    pub progress_selector: String,
    pub visible_class: String,
    pub default_message: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            overlay_id: "loading-overlay".to_string(),
            message_selector: ".loading-message".to_string(),
            progress_selector: ".loading-progress-bar".to_string(),
            visible_class: "show".to_string(),
            default_message: "Loading...".to_string(),
        }
    }
}

/// Container ids for the scenes mounted on page load
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScenesConfig {
    pub logo_id: String,
    pub trophy_id: String,
    pub papers_id: String,
    pub cap_id: String,
}

impl Default for ScenesConfig {
    fn default() -> Self {
        Self {
            logo_id: "logo-3d".to_string(),
            trophy_id: "trophy-3d".to_string(),
            papers_id: "papers-3d".to_string(),
            cap_id: "cap-3d".to_string(),
        }
    }
}

/// Full browser layer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub cascade: CascadeConfig,
    pub overlay: OverlayConfig,
    pub scenes: ScenesConfig,
}

impl UiConfig {
    /// Load configuration from the page global, falling back to defaults
    pub fn load() -> Self {
        match Self::read_global() {
            Some(json) => Self::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring malformed {CONFIG_GLOBAL}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn read_global() -> Option<String> {
        let win = window()?;
        let value = js_sys::Reflect::get(&win, &CONFIG_GLOBAL.into()).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        js_sys::JSON::stringify(&value).ok().map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_templates() {
        let cfg = UiConfig::default();
        assert_eq!(cfg.cascade.endpoint, "/exams/admin/api/subjects-by-department/");
        assert_eq!(cfg.cascade.department_ids, ["id_department", "department-select"]);
        assert_eq!(cfg.overlay.overlay_id, "loading-overlay");
        assert_eq!(cfg.scenes.cap_id, "cap-3d");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let cfg = UiConfig::from_json(r#"{"cascade": {"endpoint": "/api/subjects/"}}"#).unwrap();
        assert_eq!(cfg.cascade.endpoint, "/api/subjects/");
        assert_eq!(cfg.cascade.placeholder_label, "-- Select Subject --");
        assert_eq!(cfg.overlay, OverlayConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(UiConfig::from_json("{}").unwrap(), UiConfig::default());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(UiConfig::from_json(r#"{"cascade": {"department_ids": "x"}}"#).is_err());
    }
}
