//! Department -> subject cascade controller
//!
//! Pure state machine, no DOM. Every department change is assigned a
//! strictly increasing [`RequestToken`]; only the completion carrying the
//! latest token is applied, so a slow response for an older selection can
//! never overwrite options for a newer one.

use exam_portal_protocol::{subjects_url, Subject, SubjectsResponse};

use crate::error::UiError;

/// Sequence number of a cascade request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeState {
    Idle,
    Awaiting(RequestToken),
}

/// What the caller must do after a department change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeAction {
    /// Reset the dependent control, no request
    Clear,
    /// Issue a GET to `url` and report back with `token`
    Fetch { token: RequestToken, url: String },
}

/// One `<option>` of the dependent control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectOption {
    pub value: String,
    pub label: String,
}

impl SubjectOption {
    pub fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
        }
    }
}

impl From<&Subject> for SubjectOption {
    fn from(subject: &Subject) -> Self {
        Self {
            value: subject.id.to_string(),
            label: subject.label(),
        }
    }
}

/// What the dependent control should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectView {
    /// Placeholder only
    Placeholder,
    /// Placeholder followed by these subjects
    Populated(Vec<Subject>),
}

impl SubjectView {
    /// Full option list including the leading placeholder
    pub fn options(&self, placeholder: &str) -> Vec<SubjectOption> {
        let mut options = vec![SubjectOption::placeholder(placeholder)];
        if let Self::Populated(subjects) = self {
            options.extend(subjects.iter().map(SubjectOption::from));
        }
        options
    }

    /// Subjects to list, empty for the placeholder view
    pub fn subjects(&self) -> &[Subject] {
        match self {
            Self::Placeholder => &[],
            Self::Populated(subjects) => subjects,
        }
    }
}

/// Cascade controller for one department/subject pair
#[derive(Debug)]
pub struct SubjectCascade {
    endpoint: String,
    next_token: u64,
    state: CascadeState,
}

impl SubjectCascade {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            next_token: 0,
            state: CascadeState::Idle,
        }
    }

    pub const fn state(&self) -> CascadeState {
        self.state
    }

    /// Latest token handed out, if any
    pub const fn latest(&self) -> Option<RequestToken> {
        match self.next_token {
            0 => None,
            n => Some(RequestToken(n - 1)),
        }
    }

    /// Handle a department change
    ///
    /// An empty code clears synchronously. The token counter still
    /// advances so a response still in flight is treated as stale.
    pub fn begin(&mut self, department_code: &str) -> CascadeAction {
        let token = RequestToken(self.next_token);
        self.next_token += 1;

        if department_code.is_empty() {
            self.state = CascadeState::Idle;
            return CascadeAction::Clear;
        }

        self.state = CascadeState::Awaiting(token);
        CascadeAction::Fetch {
            token,
            url: subjects_url(&self.endpoint, department_code),
        }
    }

    /// Handle a request completion
    ///
    /// Returns `None` for stale tokens; the caller must leave the DOM alone.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<SubjectsResponse, UiError>,
    ) -> Option<SubjectView> {
        if self.state != CascadeState::Awaiting(token) {
            tracing::debug!(token = token.0, latest = ?self.latest(), "Discarding stale subjects response");
            return None;
        }
        self.state = CascadeState::Idle;

        let view = match outcome {
            Ok(resp) if resp.success => SubjectView::Populated(resp.subjects),
            Ok(resp) => {
                tracing::error!(error = resp.error_message(), "Subjects request failed");
                SubjectView::Placeholder
            }
            Err(e) => {
                tracing::error!(error = %e, "Fetch error");
                SubjectView::Placeholder
            }
        };
        Some(view)
    }
}
