// ============================================================================
// ADMIN STATE - Admin session state + reducer
// ============================================================================
// Init(loading) → Unauthenticated | AuthenticatedNoMedium → Ready
// ============================================================================

use crate::models::{AdminPrincipal, Medium};
use crate::utils::is_valid_academic_year;

#[derive(Debug, Clone, PartialEq)]
pub struct AdminSessionState {
    pub is_authenticated: bool,
    pub admin: Option<AdminPrincipal>,
    pub selected_medium: Option<Medium>,
    pub selected_year: i32,
    pub loading: bool,
    pub error: Option<String>,
    /// False until the boot-time verify has resolved.
    pub initialized: bool,
}

/// Where the admin is in the session flow; drives route guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPhase {
    Initializing,
    Unauthenticated,
    Authenticating,
    AuthenticatedNoMedium,
    Ready,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminAction {
    VerifySucceeded(AdminPrincipal),
    VerifyFailed,
    LoginStarted,
    LoginSucceeded(AdminPrincipal),
    LoginFailed(String),
    MediumSelected(Medium),
    YearSelected(i32),
    /// Carries the year to fall back to.
    LoggedOut(i32),
    /// 401 on a scoped call: signed out, with a message to show.
    SessionExpired { default_year: i32, message: String },
    ErrorCleared,
}

impl AdminSessionState {
    /// State at mount, before verification. Medium/year come from storage.
    pub fn initial(selected_medium: Option<Medium>, selected_year: i32) -> Self {
        Self {
            is_authenticated: false,
            admin: None,
            selected_medium,
            selected_year,
            loading: true,
            error: None,
            initialized: false,
        }
    }

    pub fn signed_out(selected_year: i32) -> Self {
        Self {
            loading: false,
            initialized: true,
            ..Self::initial(None, selected_year)
        }
    }

    pub fn is_ready(&self) -> bool {
        self.is_authenticated && self.selected_medium.is_some()
    }

    pub fn phase(&self) -> AdminPhase {
        if !self.initialized {
            AdminPhase::Initializing
        } else if self.is_ready() {
            AdminPhase::Ready
        } else if self.is_authenticated {
            AdminPhase::AuthenticatedNoMedium
        } else if self.loading {
            AdminPhase::Authenticating
        } else {
            AdminPhase::Unauthenticated
        }
    }

    /// `medium=<m>&year=<y>`, skipping whatever is unset.
    pub fn filter_params(&self) -> String {
        let mut params = Vec::with_capacity(2);
        if let Some(medium) = self.selected_medium {
            params.push(format!("medium={}", medium));
        }
        if is_valid_academic_year(self.selected_year) {
            params.push(format!("year={}", self.selected_year));
        }
        params.join("&")
    }
}

pub fn reduce(state: &AdminSessionState, action: AdminAction) -> AdminSessionState {
    let mut next = state.clone();

    match action {
        AdminAction::VerifySucceeded(admin) | AdminAction::LoginSucceeded(admin) => {
            next.is_authenticated = true;
            next.admin = Some(admin);
            next.loading = false;
            next.error = None;
            next.initialized = true;
        }
        AdminAction::VerifyFailed => {
            next.is_authenticated = false;
            next.admin = None;
            next.loading = false;
            next.initialized = true;
        }
        AdminAction::LoginStarted => {
            next.loading = true;
            next.error = None;
        }
        AdminAction::LoginFailed(message) => {
            next.is_authenticated = false;
            next.admin = None;
            next.loading = false;
            next.error = Some(message);
            next.initialized = true;
        }
        AdminAction::MediumSelected(medium) => {
            if state.is_authenticated {
                next.selected_medium = Some(medium);
            }
        }
        AdminAction::YearSelected(year) => {
            if state.is_authenticated && is_valid_academic_year(year) {
                next.selected_year = year;
            }
        }
        AdminAction::LoggedOut(default_year) => {
            next = AdminSessionState::signed_out(default_year);
        }
        AdminAction::SessionExpired {
            default_year,
            message,
        } => {
            next = AdminSessionState::signed_out(default_year);
            next.error = Some(message);
        }
        AdminAction::ErrorCleared => {
            next.error = None;
        }
    }

    next
}
