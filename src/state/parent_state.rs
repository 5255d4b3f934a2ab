// ============================================================================
// PARENT STATE - Parent session state + reducer
// ============================================================================

use crate::models::{ParentPrincipal, StudentSummary};

#[derive(Debug, Clone, PartialEq)]
pub struct ParentSessionState {
    pub is_authenticated: bool,
    pub parent: Option<ParentPrincipal>,
    pub token: Option<String>,
    pub student_list: Vec<StudentSummary>,
    pub selected_student: Option<StudentSummary>,
    pub loading: bool,
    pub error: Option<String>,
    pub initialized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentPhase {
    Initializing,
    Unauthenticated,
    Authenticating,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParentAction {
    VerifySucceeded {
        parent: ParentPrincipal,
        token: String,
        students: Vec<StudentSummary>,
    },
    VerifyFailed,
    LoginStarted,
    LoginSucceeded {
        parent: ParentPrincipal,
        token: String,
        students: Vec<StudentSummary>,
    },
    LoginFailed(String),
    StudentSelected(StudentSummary),
    LoggedOut,
    /// 401 on an authenticated call; carries the message to show.
    SessionExpired(String),
    ErrorCleared,
}

impl Default for ParentSessionState {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            parent: None,
            token: None,
            student_list: Vec::new(),
            selected_student: None,
            loading: true,
            error: None,
            initialized: false,
        }
    }
}

impl ParentSessionState {
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn signed_out() -> Self {
        Self {
            loading: false,
            initialized: true,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> ParentPhase {
        if !self.initialized {
            ParentPhase::Initializing
        } else if self.is_authenticated {
            ParentPhase::Authenticated
        } else if self.loading {
            ParentPhase::Authenticating
        } else {
            ParentPhase::Unauthenticated
        }
    }

    pub fn is_linked(&self, student_id: &str) -> bool {
        self.student_list.iter().any(|s| s.id == student_id)
    }

    fn authenticate(
        &mut self,
        parent: ParentPrincipal,
        token: String,
        students: Vec<StudentSummary>,
    ) {
        self.selected_student = match students.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        };
        self.is_authenticated = true;
        self.parent = Some(parent);
        self.token = Some(token);
        self.student_list = students;
        self.loading = false;
        self.error = None;
        self.initialized = true;
    }
}

pub fn reduce(state: &ParentSessionState, action: ParentAction) -> ParentSessionState {
    let mut next = state.clone();

    match action {
        ParentAction::VerifySucceeded { parent, token, students }
        | ParentAction::LoginSucceeded { parent, token, students } => {
            next.authenticate(parent, token, students);
        }
        ParentAction::VerifyFailed => {
            next = ParentSessionState::signed_out();
        }
        ParentAction::LoginStarted => {
            next.loading = true;
            next.error = None;
        }
        ParentAction::LoginFailed(message) => {
            next = ParentSessionState::signed_out();
            next.error = Some(message);
        }
        ParentAction::StudentSelected(student) => {
            if let Some(linked) = state.student_list.iter().find(|s| s.id == student.id) {
                next.selected_student = Some(linked.clone());
            }
        }
        ParentAction::LoggedOut => {
            next = ParentSessionState::signed_out();
        }
        ParentAction::SessionExpired(message) => {
            next = ParentSessionState::signed_out();
            next.error = Some(message);
        }
        ParentAction::ErrorCleared => {
            next.error = None;
        }
    }

    next
}
