// ============================================================================
// ADMIN SESSION SERVICE - Admin login, medium/year selection, logout
// ============================================================================
// Owns the admin state. Every change goes through `reduce` and is
// broadcast to subscribers; medium/year are written through to storage.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use chrono::Datelike;

use crate::error::PortalError;
use crate::models::{AdminLoginRequest, AdminPrincipal, Medium};
use crate::services::api_client::AdminApi;
use crate::services::auth_service::{self, VerifyOutcome};
use crate::services::http::HttpTransport;
use crate::state::admin_state::reduce;
use crate::state::{
    AdminAction, AdminPhase, AdminSessionState, InFlight, ReactiveState, SessionGeneration,
};
use crate::utils::{
    bilingual, is_valid_academic_year, parse_academic_year, PreferenceStore, MAX_ACADEMIC_YEAR,
    MIN_ACADEMIC_YEAR, STORAGE_KEY_ADMIN_MEDIUM, STORAGE_KEY_ADMIN_YEAR,
};

/// Current calendar year, clamped into the selectable range.
pub fn default_academic_year() -> i32 {
    chrono::Local::now()
        .year()
        .clamp(MIN_ACADEMIC_YEAR, MAX_ACADEMIC_YEAR)
}

pub struct AdminSessionService<T: HttpTransport> {
    transport: Rc<T>,
    store: Rc<dyn PreferenceStore>,
    state: ReactiveState<AdminSessionState>,
    generation: SessionGeneration,
    verify_flight: InFlight,
    login_flight: InFlight,
    logout_flight: InFlight,
    verified: Cell<bool>,
}

impl<T: HttpTransport> AdminSessionService<T> {
    /// Build the service and restore the persisted medium/year.
    pub fn new(transport: Rc<T>, store: Rc<dyn PreferenceStore>) -> Self {
        let medium = store
            .get(STORAGE_KEY_ADMIN_MEDIUM)
            .and_then(|raw| match raw.parse::<Medium>() {
                Ok(medium) => Some(medium),
                Err(e) => {
                    log::warn!("⚠️ [ADMIN] Ignoring stored medium: {}", e);
                    None
                }
            });

        let year = store
            .get(STORAGE_KEY_ADMIN_YEAR)
            .and_then(|raw| {
                let parsed = parse_academic_year(&raw);
                if parsed.is_none() {
                    log::warn!("⚠️ [ADMIN] Ignoring stored year {:?}", raw);
                }
                parsed
            })
            .unwrap_or_else(default_academic_year);

        Self {
            transport,
            store,
            state: ReactiveState::new(AdminSessionState::initial(medium, year)),
            generation: SessionGeneration::new(),
            verify_flight: InFlight::new(),
            login_flight: InFlight::new(),
            logout_flight: InFlight::new(),
            verified: Cell::new(false),
        }
    }

    pub fn state(&self) -> AdminSessionState {
        self.state.snapshot()
    }

    pub fn is_ready(&self) -> bool {
        self.state.with(AdminSessionState::is_ready)
    }

    pub fn phase(&self) -> AdminPhase {
        self.state.with(AdminSessionState::phase)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&AdminSessionState) + 'static,
    {
        self.state.subscribe(callback);
    }

    /// Boot-time cookie check. Runs once; later calls are no-ops.
    pub async fn init(&self) {
        if self.verified.replace(true) {
            log::debug!("[ADMIN] Verify already ran");
            return;
        }
        let Some(_flight) = self.verify_flight.try_begin() else {
            return;
        };

        let generation = self.generation.current();
        let outcome = auth_service::verify_admin(self.transport.as_ref()).await;

        // A pending login owns the session and settles it itself.
        if self.login_flight.is_busy() {
            log::info!("🗑️ [ADMIN] Verify result superseded by a login in progress");
            return;
        }
        // Login, logout or dispose already settled the session.
        if !self.generation.is_current(generation) || self.state.with(|s| s.initialized) {
            log::info!("🗑️ [ADMIN] Verify result no longer relevant");
            if !self.state.with(|s| s.initialized) {
                self.dispatch(AdminAction::VerifyFailed);
            }
            return;
        }

        match outcome {
            VerifyOutcome::Authenticated(admin) => {
                self.dispatch(AdminAction::VerifySucceeded(admin));
            }
            VerifyOutcome::Rejected | VerifyOutcome::Unreachable => {
                self.dispatch(AdminAction::VerifyFailed);
            }
        }
    }

    pub async fn login(&self, admin_id: &str, password: &str) -> Result<AdminPrincipal, PortalError> {
        let admin_id = admin_id.trim();
        if admin_id.is_empty() || password.is_empty() {
            return Err(PortalError::Validation(bilingual("login_required_fields")));
        }

        let Some(_flight) = self.login_flight.try_begin() else {
            log::warn!("⚠️ [ADMIN] Login already in progress");
            return Err(PortalError::AlreadyInFlight("admin login"));
        };

        let generation = self.generation.current();
        self.dispatch(AdminAction::LoginStarted);

        let request = AdminLoginRequest {
            admin_id: admin_id.to_string(),
            password: password.to_string(),
        };
        let result = auth_service::admin_login(self.transport.as_ref(), &request).await;

        if !self.generation.is_current(generation) {
            log::info!("🗑️ [ADMIN] Discarding login response from a previous session");
            return Err(PortalError::Stale);
        }

        match result {
            Ok(admin) => {
                self.dispatch(AdminAction::LoginSucceeded(admin.clone()));
                Ok(admin)
            }
            Err(e) => {
                self.dispatch(AdminAction::LoginFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Tell the server, then clear the session and both stored preferences
    /// whatever the server said.
    pub async fn logout(&self) -> Result<(), PortalError> {
        let Some(_flight) = self.logout_flight.try_begin() else {
            return Err(PortalError::AlreadyInFlight("admin logout"));
        };
        self.generation.advance();

        if let Err(e) = auth_service::admin_logout(self.transport.as_ref()).await {
            log::warn!("⚠️ [ADMIN] Logout request failed, clearing locally: {}", e);
        }

        self.clear_preferences();
        self.dispatch(AdminAction::LoggedOut(default_academic_year()));
        log::info!("👋 [ADMIN] Logged out");
        Ok(())
    }

    pub fn set_medium(&self, value: &str) -> Result<Medium, PortalError> {
        let medium = value.parse::<Medium>().map_err(|e| {
            log::warn!("⚠️ [ADMIN] Rejected medium: {}", e);
            e
        })?;
        self.require_authenticated("medium")?;

        self.store.set(STORAGE_KEY_ADMIN_MEDIUM, medium.as_str());
        self.dispatch(AdminAction::MediumSelected(medium));
        log::info!("🏫 [ADMIN] Medium set to {}", medium);
        Ok(medium)
    }

    pub fn set_year(&self, year: i32) -> Result<i32, PortalError> {
        if !is_valid_academic_year(year) {
            log::warn!(
                "⚠️ [ADMIN] Rejected year {} (allowed {}-{})",
                year,
                MIN_ACADEMIC_YEAR,
                MAX_ACADEMIC_YEAR
            );
            return Err(PortalError::InvalidYear(year.to_string()));
        }
        self.require_authenticated("year")?;

        self.store.set(STORAGE_KEY_ADMIN_YEAR, &year.to_string());
        self.dispatch(AdminAction::YearSelected(year));
        log::info!("📅 [ADMIN] Year set to {}", year);
        Ok(year)
    }

    /// Year as typed in a form field.
    pub fn set_year_input(&self, input: &str) -> Result<i32, PortalError> {
        let year = input.trim().parse::<i32>().map_err(|_| {
            log::warn!("⚠️ [ADMIN] Rejected year input {:?}", input);
            PortalError::InvalidYear(input.to_string())
        })?;
        self.set_year(year)
    }

    pub fn get_filter_params(&self) -> String {
        self.state.with(AdminSessionState::filter_params)
    }

    pub fn clear_error(&self) {
        self.dispatch(AdminAction::ErrorCleared);
    }

    /// Calls scoped to this session's medium and year.
    pub fn api(&self) -> AdminApi<'_, T> {
        AdminApi::new(self)
    }

    /// Drop subscribers and forget the in-memory session. Storage is kept
    /// so the next mount restores the same preferences.
    pub fn dispose(&self) {
        self.generation.advance();
        self.state.clear_subscribers();
        self.state
            .set(AdminSessionState::signed_out(default_academic_year()));
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

    /// Same clearing as logout, without the server round-trip.
    pub(crate) fn expire_session(&self) {
        self.generation.advance();
        self.clear_preferences();
        self.dispatch(AdminAction::SessionExpired {
            default_year: default_academic_year(),
            message: bilingual("session_expired"),
        });
    }

    fn require_authenticated(&self, what: &str) -> Result<(), PortalError> {
        if self.state.with(|s| s.is_authenticated) {
            Ok(())
        } else {
            log::warn!("⚠️ [ADMIN] Cannot change {} while signed out", what);
            Err(PortalError::NotAuthenticated)
        }
    }

    fn clear_preferences(&self) {
        self.store.remove(STORAGE_KEY_ADMIN_MEDIUM);
        self.store.remove(STORAGE_KEY_ADMIN_YEAR);
    }

    fn dispatch(&self, action: AdminAction) {
        log::debug!("[ADMIN] {:?}", action);
        let next = self.state.with(|state| reduce(state, action));
        self.state.set(next);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::services::http::mock::MockTransport;
    use crate::services::http::HttpMethod;
    use crate::utils::MemoryStore;

    fn admin_ok() -> serde_json::Value {
        json!({"success": true, "data": {"admin": {"id": "ADM001", "name": "Office", "role": "admin"}}})
    }

    fn service_with(
        transport: &Rc<MockTransport>,
        store: &Rc<MemoryStore>,
    ) -> AdminSessionService<MockTransport> {
        AdminSessionService::new(transport.clone(), store.clone())
    }

    fn signed_in(
        transport: &Rc<MockTransport>,
        store: &Rc<MemoryStore>,
    ) -> AdminSessionService<MockTransport> {
        let service = service_with(transport, store);
        transport.respond(200, admin_ok());
        block_on(service.init());
        assert!(service.state().is_authenticated);
        service
    }

    fn assert_ready_invariant(service: &AdminSessionService<MockTransport>) {
        let state = service.state();
        assert_eq!(
            service.is_ready(),
            state.is_authenticated && state.selected_medium.is_some()
        );
    }

    #[test]
    fn verify_transport_failure_ends_signed_out() {
        let transport = Rc::new(MockTransport::new());
        let service = service_with(&transport, &Rc::new(MemoryStore::new()));
        transport.fail(PortalError::Network("offline".to_string()));

        assert_eq!(service.phase(), AdminPhase::Initializing);
        block_on(service.init());

        let state = service.state();
        assert!(!state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(service.phase(), AdminPhase::Unauthenticated);
    }

    #[test]
    fn init_verifies_only_once() {
        let transport = Rc::new(MockTransport::new());
        let service = signed_in(&transport, &Rc::new(MemoryStore::new()));

        block_on(service.init());
        assert_eq!(transport.request_count(), 1);
        assert_eq!(service.phase(), AdminPhase::AuthenticatedNoMedium);
    }

    #[test]
    fn invalid_medium_changes_nothing() {
        let transport = Rc::new(MockTransport::new());
        let store = Rc::new(MemoryStore::new());
        let service = signed_in(&transport, &store);
        service.set_medium("English").unwrap();
        let writes = store.write_count();

        for bad in ["french", "hindi", "", "English "] {
            assert!(matches!(
                service.set_medium(bad),
                Err(PortalError::InvalidMedium(_))
            ));
        }
        assert_eq!(service.state().selected_medium, Some(Medium::English));
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn medium_requires_a_session() {
        let transport = Rc::new(MockTransport::new());
        let store = Rc::new(MemoryStore::new());
        let service = service_with(&transport, &store);
        transport.respond(401, json!({"success": false}));
        block_on(service.init());

        assert_eq!(service.set_medium("Hindi"), Err(PortalError::NotAuthenticated));
        assert_eq!(service.set_year(2025), Err(PortalError::NotAuthenticated));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn ready_follows_auth_and_medium() {
        let transport = Rc::new(MockTransport::new());
        let store = Rc::new(MemoryStore::new());
        let service = service_with(&transport, &store);
        assert_ready_invariant(&service);

        transport.respond(200, admin_ok());
        block_on(service.init());
        assert_ready_invariant(&service);
        assert!(!service.is_ready());

        service.set_medium("Hindi").unwrap();
        assert_ready_invariant(&service);
        assert!(service.is_ready());
        assert_eq!(service.phase(), AdminPhase::Ready);

        transport.respond(200, json!({"success": true}));
        block_on(service.logout()).unwrap();
        assert_ready_invariant(&service);
        assert!(!service.is_ready());
    }

    #[test]
    fn logout_clears_session_and_storage_even_if_server_fails() {
        let transport = Rc::new(MockTransport::new());
        let store = Rc::new(MemoryStore::new());
        let service = signed_in(&transport, &store);
        service.set_medium("Hindi").unwrap();
        service.set_year(2024).unwrap();

        transport.fail(PortalError::Network("offline".to_string()));
        block_on(service.logout()).unwrap();

        let state = service.state();
        assert!(!state.is_authenticated);
        assert_eq!(state.admin, None);
        assert_eq!(state.selected_medium, None);
        assert!(!store.contains(STORAGE_KEY_ADMIN_MEDIUM));
        assert!(!store.contains(STORAGE_KEY_ADMIN_YEAR));

        let logout = transport.requests().pop().unwrap();
        assert_eq!(logout.method, HttpMethod::Post);
        assert_eq!(logout.path, "/api/admin/logout");
    }

    #[test]
    fn year_range_is_enforced_and_survives_reload() {
        let transport = Rc::new(MockTransport::new());
        let store = Rc::new(MemoryStore::new());
        let service = signed_in(&transport, &store);
        service.set_medium("English").unwrap();
        let before = service.state().selected_year;

        assert!(matches!(service.set_year(2019), Err(PortalError::InvalidYear(_))));
        assert!(matches!(service.set_year(2031), Err(PortalError::InvalidYear(_))));
        assert!(matches!(
            service.set_year_input("twenty"),
            Err(PortalError::InvalidYear(_))
        ));
        assert_eq!(service.state().selected_year, before);

        assert_eq!(service.set_year_input(" 2025 "), Ok(2025));
        assert_eq!(service.get_filter_params(), "medium=English&year=2025");

        let reloaded = service_with(&transport, &store);
        let state = reloaded.state();
        assert_eq!(state.selected_year, 2025);
        assert_eq!(state.selected_medium, Some(Medium::English));
        assert!(!reloaded.is_ready());
    }

    #[test]
    fn corrupt_stored_preferences_are_ignored() {
        let store = Rc::new(MemoryStore::new());
        store.set(STORAGE_KEY_ADMIN_MEDIUM, "Marathi");
        store.set(STORAGE_KEY_ADMIN_YEAR, "1999");

        let service = service_with(&Rc::new(MockTransport::new()), &store);
        let state = service.state();
        assert_eq!(state.selected_medium, None);
        assert_eq!(state.selected_year, default_academic_year());
    }

    #[test]
    fn empty_credentials_fail_without_request() {
        let transport = Rc::new(MockTransport::new());
        let service = service_with(&transport, &Rc::new(MemoryStore::new()));

        assert!(matches!(
            block_on(service.login("  ", "pw")),
            Err(PortalError::Validation(_))
        ));
        assert!(matches!(
            block_on(service.login("ADM001", "")),
            Err(PortalError::Validation(_))
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn failed_login_sets_generic_error() {
        let transport = Rc::new(MockTransport::new());
        let service = service_with(&transport, &Rc::new(MemoryStore::new()));
        transport.respond(401, json!({"success": false}));
        block_on(service.init());

        transport.respond(401, json!({"success": false, "message": "Wrong password"}));
        assert!(block_on(service.login("ADM001", "nope")).is_err());

        let state = service.state();
        assert!(!state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(state.error, Some(bilingual("login_failed")));

        service.clear_error();
        assert_eq!(service.state().error, None);
    }

    #[test]
    fn concurrent_login_is_refused() {
        let transport = Rc::new(MockTransport::new());
        let service = service_with(&transport, &Rc::new(MemoryStore::new()));

        let release = transport.hold_next();
        transport.respond(200, admin_ok());

        let (first, second) = block_on(async {
            futures::join!(service.login("ADM001", "pw"), async {
                let second = service.login("ADM001", "pw").await;
                let _ = release.send(());
                second
            })
        });

        assert!(first.is_ok());
        assert_eq!(second, Err(PortalError::AlreadyInFlight("admin login")));
        assert_eq!(transport.request_count(), 1);
        assert!(service.state().is_authenticated);
    }

    #[test]
    fn verify_landing_mid_login_leaves_login_in_charge() {
        let transport = Rc::new(MockTransport::new());
        let service = service_with(&transport, &Rc::new(MemoryStore::new()));

        // Login's request is held; the verify answer arrives first.
        let release = transport.hold_next();
        transport.respond(401, json!({"success": false}));
        transport.respond(200, admin_ok());

        let (login, ()) = block_on(async {
            futures::join!(service.login("ADM001", "pw"), async {
                service.init().await;
                let state = service.state();
                assert!(state.loading);
                assert!(!state.initialized);
                let _ = release.send(());
            })
        });

        assert!(login.is_ok());
        let state = service.state();
        assert!(state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn login_response_after_logout_is_dropped() {
        let transport = Rc::new(MockTransport::new());
        let service = service_with(&transport, &Rc::new(MemoryStore::new()));

        let release = transport.hold_next();
        transport.respond(200, admin_ok());
        transport.respond(200, json!({"success": true}));

        let (login, logout) = block_on(async {
            futures::join!(service.login("ADM001", "pw"), async {
                let logout = service.logout().await;
                let _ = release.send(());
                logout
            })
        });

        assert_eq!(login, Err(PortalError::Stale));
        assert!(logout.is_ok());
        assert!(!service.state().is_authenticated);
    }

    #[test]
    fn subscribers_see_every_change_until_dispose() {
        let transport = Rc::new(MockTransport::new());
        let service = signed_in(&transport, &Rc::new(MemoryStore::new()));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        service.subscribe(move |state| sink.borrow_mut().push(state.phase()));

        service.set_medium("Hindi").unwrap();
        assert_eq!(*seen.borrow(), vec![AdminPhase::Ready]);

        service.dispose();
        service.clear_error();
        assert_eq!(seen.borrow().len(), 1);
        assert!(!service.state().is_authenticated);
    }
}
