// ============================================================================
// PARENT SESSION SERVICE - Mobile/DOB login, linked students, bearer token
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::error::PortalError;
use crate::models::{ParentLoginRequest, ParentPrincipal, ParentSessionData, StudentSummary};
use crate::services::api_client::ParentApi;
use crate::services::auth_service::{self, VerifyOutcome};
use crate::services::http::HttpTransport;
use crate::state::parent_state::reduce;
use crate::state::{
    InFlight, ParentAction, ParentPhase, ParentSessionState, ReactiveState, SessionGeneration,
};
use crate::utils::{
    bilingual, is_valid_dob, is_valid_mobile, PreferenceStore, STORAGE_KEY_PARENT_TOKEN,
};

pub struct ParentSessionService<T: HttpTransport> {
    transport: Rc<T>,
    store: Rc<dyn PreferenceStore>,
    state: ReactiveState<ParentSessionState>,
    generation: SessionGeneration,
    verify_flight: InFlight,
    login_flight: InFlight,
    logout_flight: InFlight,
    verified: Cell<bool>,
}

impl<T: HttpTransport> ParentSessionService<T> {
    pub fn new(transport: Rc<T>, store: Rc<dyn PreferenceStore>) -> Self {
        Self {
            transport,
            store,
            state: ReactiveState::new(ParentSessionState::initial()),
            generation: SessionGeneration::new(),
            verify_flight: InFlight::new(),
            login_flight: InFlight::new(),
            logout_flight: InFlight::new(),
            verified: Cell::new(false),
        }
    }

    pub fn state(&self) -> ParentSessionState {
        self.state.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated)
    }

    pub fn phase(&self) -> ParentPhase {
        self.state.with(ParentSessionState::phase)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&ParentSessionState) + 'static,
    {
        self.state.subscribe(callback);
    }

    /// Verify the stored token, if any. A rejected token is removed; an
    /// unreachable server leaves it for the next mount.
    pub async fn init(&self) {
        if self.verified.replace(true) {
            log::debug!("[PARENT] Verify already ran");
            return;
        }
        let Some(_flight) = self.verify_flight.try_begin() else {
            return;
        };

        let Some(token) = self.store.get(STORAGE_KEY_PARENT_TOKEN).filter(|t| !t.is_empty())
        else {
            log::info!("🔒 [PARENT] No stored token");
            self.dispatch(ParentAction::VerifyFailed);
            return;
        };

        let generation = self.generation.current();
        let outcome = auth_service::verify_parent(self.transport.as_ref(), &token).await;

        if self.login_flight.is_busy() {
            log::info!("🗑️ [PARENT] Verify result superseded by a login in progress");
            return;
        }
        if !self.generation.is_current(generation) || self.state.with(|s| s.initialized) {
            log::info!("🗑️ [PARENT] Verify result no longer relevant");
            if !self.state.with(|s| s.initialized) {
                self.dispatch(ParentAction::VerifyFailed);
            }
            return;
        }

        match outcome {
            VerifyOutcome::Authenticated(data) => {
                let (parent, students) = principal_and_students(data);
                self.dispatch(ParentAction::VerifySucceeded {
                    parent,
                    token,
                    students,
                });
            }
            VerifyOutcome::Rejected => {
                self.store.remove(STORAGE_KEY_PARENT_TOKEN);
                self.dispatch(ParentAction::VerifyFailed);
            }
            VerifyOutcome::Unreachable => {
                self.dispatch(ParentAction::VerifyFailed);
            }
        }
    }

    pub async fn login(&self, mobile: &str, dob: &str) -> Result<ParentPrincipal, PortalError> {
        let mobile = mobile.trim();
        let dob = dob.trim();
        if mobile.is_empty() || dob.is_empty() {
            return Err(PortalError::Validation(bilingual("login_required_fields")));
        }
        if !is_valid_mobile(mobile) {
            return Err(PortalError::Validation(bilingual("invalid_mobile")));
        }
        if !is_valid_dob(dob) {
            return Err(PortalError::Validation(bilingual("invalid_dob")));
        }

        let Some(_flight) = self.login_flight.try_begin() else {
            log::warn!("⚠️ [PARENT] Login already in progress");
            return Err(PortalError::AlreadyInFlight("parent login"));
        };

        let generation = self.generation.current();
        self.dispatch(ParentAction::LoginStarted);

        let request = ParentLoginRequest {
            mobile: mobile.to_string(),
            dob: dob.to_string(),
        };
        let result = auth_service::parent_login(self.transport.as_ref(), &request).await;

        if !self.generation.is_current(generation) {
            log::info!("🗑️ [PARENT] Discarding login response from a previous session");
            return Err(PortalError::Stale);
        }

        let mut data = match result {
            Ok(data) => data,
            Err(e) => {
                // Signed out in memory, so no stale token may outlive it.
                self.store.remove(STORAGE_KEY_PARENT_TOKEN);
                self.dispatch(ParentAction::LoginFailed(e.to_string()));
                return Err(e);
            }
        };

        // parent_login guarantees a non-empty token
        let token = data.token.take().unwrap_or_default();
        if data.parent_mobile.is_none() {
            data.parent_mobile = Some(mobile.to_string());
        }
        let (parent, students) = principal_and_students(data);

        self.store.set(STORAGE_KEY_PARENT_TOKEN, &token);
        self.dispatch(ParentAction::LoginSucceeded {
            parent: parent.clone(),
            token,
            students,
        });
        Ok(parent)
    }

    pub async fn logout(&self) -> Result<(), PortalError> {
        let Some(_flight) = self.logout_flight.try_begin() else {
            return Err(PortalError::AlreadyInFlight("parent logout"));
        };
        self.generation.advance();

        let token = self
            .state
            .with(|s| s.token.clone())
            .or_else(|| self.store.get(STORAGE_KEY_PARENT_TOKEN));
        if let Some(token) = token {
            if let Err(e) = auth_service::parent_logout(self.transport.as_ref(), &token).await {
                log::warn!("⚠️ [PARENT] Logout request failed, clearing locally: {}", e);
            }
        }

        self.store.remove(STORAGE_KEY_PARENT_TOKEN);
        self.dispatch(ParentAction::LoggedOut);
        log::info!("👋 [PARENT] Logged out");
        Ok(())
    }

    /// Only students linked to this account can be selected.
    pub fn select_student(&self, student: &StudentSummary) -> Result<(), PortalError> {
        if !self.state.with(|s| s.is_linked(&student.id)) {
            log::warn!("⚠️ [PARENT] Refusing to select unlinked student {}", student.id);
            return Err(PortalError::StudentNotLinked(student.id.clone()));
        }
        self.dispatch(ParentAction::StudentSelected(student.clone()));
        Ok(())
    }

    pub fn clear_error(&self) {
        self.dispatch(ParentAction::ErrorCleared);
    }

    /// Calls made with this session's bearer token.
    pub fn api(&self) -> ParentApi<'_, T> {
        ParentApi::new(self)
    }

    pub fn dispose(&self) {
        self.generation.advance();
        self.state.clear_subscribers();
        self.state.set(ParentSessionState::signed_out());
    }

    pub(crate) fn transport(&self) -> &T {
        self.transport.as_ref()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.current()
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation.is_current(generation)
    }

    pub(crate) fn expire_session(&self) {
        self.generation.advance();
        self.store.remove(STORAGE_KEY_PARENT_TOKEN);
        self.dispatch(ParentAction::SessionExpired(bilingual("session_expired")));
    }

    fn dispatch(&self, action: ParentAction) {
        log::debug!("[PARENT] {:?}", action);
        let next = self.state.with(|state| reduce(state, action));
        self.state.set(next);
    }
}

fn principal_and_students(data: ParentSessionData) -> (ParentPrincipal, Vec<StudentSummary>) {
    let parent = ParentPrincipal {
        mobile: data.parent_mobile.unwrap_or_default(),
    };
    (parent, data.student_list)
}
