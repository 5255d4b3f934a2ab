// ============================================================================
// API CLIENT - Session-scoped calls (admin: cookie + medium/year,
// parent: bearer token)
// ============================================================================
// Refuses to send anything while the owning session is not ready, and
// turns a 401 into session expiry.
// ============================================================================

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PortalError;
use crate::services::http::{ApiRequest, ApiResponse, Credentials, HttpTransport};
use crate::utils::bilingual;
use crate::viewmodels::{AdminSessionService, ParentSessionService};

/// Calls scoped to the admin's selected medium and year.
pub struct AdminApi<'a, T: HttpTransport> {
    session: &'a AdminSessionService<T>,
}

impl<'a, T: HttpTransport> AdminApi<'a, T> {
    pub(crate) fn new(session: &'a AdminSessionService<T>) -> Self {
        Self { session }
    }

    /// Attach cookie credentials and the medium/year filter, keeping any
    /// values the caller already set.
    pub fn scope(&self, request: ApiRequest) -> Result<ApiRequest, PortalError> {
        let state = self.session.state();
        if !state.is_authenticated {
            return Err(PortalError::NotReady("admin_login_required"));
        }
        let Some(medium) = state.selected_medium else {
            return Err(PortalError::NotReady("medium_required"));
        };

        let mut request = request.with_credentials(Credentials::Cookie);
        if !request.has_query("medium") {
            request = request.query("medium", medium.as_str());
        }
        if !request.has_query("year") {
            request = request.query("year", state.selected_year.to_string());
        }
        Ok(request)
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, PortalError> {
        let request = match self.scope(request) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("⚠️ [ADMIN] Blocked unscoped request: {}", e);
                return Err(e);
            }
        };

        let generation = self.session.generation();
        let response = self.session.transport().send(request).await?;

        if !self.session.is_current(generation) {
            log::info!("🗑️ [ADMIN] Dropping response from a previous session");
            return Err(PortalError::Stale);
        }
        if response.status == 401 {
            log::warn!("🔒 [ADMIN] Session expired (401)");
            self.session.expire_session();
            return Err(PortalError::Unauthorized(bilingual("session_expired")));
        }
        Ok(response)
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, PortalError> {
        self.send(ApiRequest::get(path)).await?.into_data()
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, PortalError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(ApiRequest::post(path).json(body)?).await?.into_data()
    }
}

/// Calls made on behalf of a logged-in parent.
pub struct ParentApi<'a, T: HttpTransport> {
    session: &'a ParentSessionService<T>,
}

impl<'a, T: HttpTransport> ParentApi<'a, T> {
    pub(crate) fn new(session: &'a ParentSessionService<T>) -> Self {
        Self { session }
    }

    pub fn scope(&self, request: ApiRequest) -> Result<ApiRequest, PortalError> {
        let state = self.session.state();
        match (state.is_authenticated, state.token) {
            (true, Some(token)) => Ok(request.with_credentials(Credentials::Bearer(token))),
            _ => Err(PortalError::NotReady("parent_login_required")),
        }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, PortalError> {
        let request = match self.scope(request) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("⚠️ [PARENT] Blocked unauthenticated request: {}", e);
                return Err(e);
            }
        };

        let generation = self.session.generation();
        let response = self.session.transport().send(request).await?;

        if !self.session.is_current(generation) {
            log::info!("🗑️ [PARENT] Dropping response from a previous session");
            return Err(PortalError::Stale);
        }
        if response.status == 401 {
            log::warn!("🔒 [PARENT] Session expired (401)");
            self.session.expire_session();
            return Err(PortalError::Unauthorized(bilingual("session_expired")));
        }
        Ok(response)
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, PortalError> {
        self.send(ApiRequest::get(path)).await?.into_data()
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, PortalError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(ApiRequest::post(path).json(body)?).await?.into_data()
    }
}
