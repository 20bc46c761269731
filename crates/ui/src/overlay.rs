//! Loading overlay helper
//!
//! All operations are fire-and-forget DOM mutations: a missing overlay,
//! message or progress element turns the call into a no-op.

use crate::config::OverlayConfig;
use crate::dom::{element_by_id, query, query_in, set_style};

#[derive(Debug, Clone, Default)]
pub struct LoadingOverlay {
    config: OverlayConfig,
}

impl LoadingOverlay {
    pub const fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    /// Show the overlay with `message`, or the default message
    pub fn show(&self, message: Option<&str>) {
        if let Some(overlay) = element_by_id(&self.config.overlay_id) {
            let _ = overlay.class_list().add_1(&self.config.visible_class);
            if let Some(msg_el) = query_in(&overlay, &self.config.message_selector) {
                let message = message.unwrap_or(&self.config.default_message);
                msg_el.set_text_content(Some(message));
            }
        }
    }

    pub fn hide(&self) {
        if let Some(overlay) = element_by_id(&self.config.overlay_id) {
            let _ = overlay.class_list().remove_1(&self.config.visible_class);
        }
    }

    /// Set the progress bar width to `percent`
    pub fn set_progress(&self, percent: f64) {
        if let Some(bar) = query(&self.config.progress_selector) {
            set_style(&bar, "width", &progress_width(percent));
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(msg_el) = query(&self.config.message_selector) {
            msg_el.set_text_content(Some(message));
        }
    }
}

/// CSS width for a progress value; the value is passed through unclamped
fn progress_width(percent: f64) -> String {
    format!("{percent}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_width_integral() {
        assert_eq!(progress_width(40.0), "40%");
    }

    #[test]
    fn test_progress_width_fractional() {
        assert_eq!(progress_width(12.5), "12.5%");
    }
}
