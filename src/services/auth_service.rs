// ============================================================================
// AUTH SERVICE - Verify / login / logout calls (admin + parent)
// ============================================================================
// Stateless. Session services decide what to do with the outcome.
// ============================================================================

use crate::error::PortalError;
use crate::models::{
    AdminLoginRequest, AdminPrincipal, AdminSessionData, ParentLoginRequest, ParentSessionData,
};
use crate::services::http::{ApiRequest, ApiResponse, Credentials, HttpTransport};
use crate::utils::{
    bilingual, ADMIN_LOGIN_PATH, ADMIN_LOGOUT_PATH, ADMIN_VERIFY_PATH, PARENT_LOGIN_PATH,
    PARENT_LOGOUT_PATH, PARENT_VERIFY_PATH,
};

/// Result of a boot-time session check. Never an error: every failure
/// resolves to one of the unauthenticated variants.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome<P> {
    Authenticated(P),
    /// Server answered and refused the credentials.
    Rejected,
    /// No usable answer (offline, timeout, 5xx, garbage body).
    Unreachable,
}

impl<P> VerifyOutcome<P> {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, VerifyOutcome::Authenticated(_))
    }
}

fn classify<P>(label: &str, result: Result<ApiResponse, PortalError>) -> VerifyOutcome<P>
where
    P: serde::de::DeserializeOwned,
{
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            log::error!("❌ [{}] Verify request failed: {}", label, e);
            return VerifyOutcome::Unreachable;
        }
    };

    if response.status == 401 || response.status == 403 {
        log::info!("🔒 [{}] No valid session (HTTP {})", label, response.status);
        return VerifyOutcome::Rejected;
    }
    if response.status != 200 {
        log::error!("❌ [{}] Verify returned HTTP {}", label, response.status);
        return VerifyOutcome::Unreachable;
    }

    match response.envelope::<P>() {
        Ok(envelope) if envelope.success => match envelope.data {
            Some(data) => VerifyOutcome::Authenticated(data),
            None => {
                log::error!("❌ [{}] Verify succeeded without data", label);
                VerifyOutcome::Unreachable
            }
        },
        Ok(_) => {
            log::info!("🔒 [{}] Session rejected by server", label);
            VerifyOutcome::Rejected
        }
        Err(e) => {
            log::error!("❌ [{}] Verify body unreadable: {}", label, e);
            VerifyOutcome::Unreachable
        }
    }
}

/// `GET /api/admin/verify` with the session cookie.
pub async fn verify_admin<T: HttpTransport>(transport: &T) -> VerifyOutcome<AdminPrincipal> {
    let request = ApiRequest::get(ADMIN_VERIFY_PATH).with_credentials(Credentials::Cookie);
    match classify::<AdminSessionData>("ADMIN", transport.send(request).await) {
        VerifyOutcome::Authenticated(data) => {
            log::info!("✅ [ADMIN] Session verified for {}", data.admin.id);
            VerifyOutcome::Authenticated(data.admin)
        }
        VerifyOutcome::Rejected => VerifyOutcome::Rejected,
        VerifyOutcome::Unreachable => VerifyOutcome::Unreachable,
    }
}

/// `GET /api/parents/verify` with the stored bearer token.
pub async fn verify_parent<T: HttpTransport>(
    transport: &T,
    token: &str,
) -> VerifyOutcome<ParentSessionData> {
    let request = ApiRequest::get(PARENT_VERIFY_PATH)
        .with_credentials(Credentials::Bearer(token.to_string()));
    let outcome = classify::<ParentSessionData>("PARENT", transport.send(request).await);
    if let VerifyOutcome::Authenticated(data) = &outcome {
        log::info!(
            "✅ [PARENT] Session verified ({} linked students)",
            data.student_list.len()
        );
    }
    outcome
}

/// `POST /api/admin/login`. Bad credentials and transport failures come
/// back as the same generic message.
pub async fn admin_login<T: HttpTransport>(
    transport: &T,
    request: &AdminLoginRequest,
) -> Result<AdminPrincipal, PortalError> {
    log::info!("🔐 [ADMIN] Logging in {}", request.admin_id);

    let http_request = ApiRequest::post(ADMIN_LOGIN_PATH)
        .json(request)?
        .with_credentials(Credentials::Cookie);

    let failed = || PortalError::LoginFailed(bilingual("login_failed"));

    let response = transport.send(http_request).await.map_err(|e| {
        log::error!("❌ [ADMIN] Login request failed: {}", e);
        failed()
    })?;

    match response.into_data::<AdminSessionData>() {
        Ok(data) => {
            log::info!("✅ [ADMIN] Logged in as {}", data.admin.id);
            Ok(data.admin)
        }
        Err(e) => {
            log::warn!("⚠️ [ADMIN] Login rejected: {}", e);
            Err(failed())
        }
    }
}

/// `POST /api/admin/logout`
pub async fn admin_logout<T: HttpTransport>(transport: &T) -> Result<(), PortalError> {
    let request = ApiRequest::post(ADMIN_LOGOUT_PATH).with_credentials(Credentials::Cookie);
    let response = transport.send(request).await?;
    if !response.ok() {
        return Err(PortalError::Http {
            status: response.status,
            message: response.body,
        });
    }
    Ok(())
}

/// `POST /api/parents/login`. The server message is shown when present.
pub async fn parent_login<T: HttpTransport>(
    transport: &T,
    request: &ParentLoginRequest,
) -> Result<ParentSessionData, PortalError> {
    log::info!("🔐 [PARENT] Logging in {}", request.mobile);

    let http_request = ApiRequest::post(PARENT_LOGIN_PATH).json(request)?;

    let response = transport.send(http_request).await.map_err(|e| {
        log::error!("❌ [PARENT] Login request failed: {}", e);
        PortalError::LoginFailed(bilingual("network_error"))
    })?;

    let data = match response.into_data::<ParentSessionData>() {
        Ok(data) => data,
        Err(PortalError::Http { status, message }) => {
            log::warn!("⚠️ [PARENT] Login rejected (HTTP {}): {}", status, message);
            let shown = if message.trim().is_empty() || message.trim_start().starts_with('<') {
                bilingual("login_failed")
            } else {
                message
            };
            return Err(PortalError::LoginFailed(shown));
        }
        Err(e) => {
            log::error!("❌ [PARENT] Login response unreadable: {}", e);
            return Err(PortalError::LoginFailed(bilingual("login_failed")));
        }
    };

    if data.token.as_deref().map_or(true, str::is_empty) {
        log::error!("❌ [PARENT] Login succeeded without a token");
        return Err(PortalError::LoginFailed(bilingual("login_failed")));
    }

    log::info!(
        "✅ [PARENT] Logged in ({} linked students)",
        data.student_list.len()
    );
    Ok(data)
}

/// `POST /api/parents/logout`
pub async fn parent_logout<T: HttpTransport>(transport: &T, token: &str) -> Result<(), PortalError> {
    let request = ApiRequest::post(PARENT_LOGOUT_PATH)
        .with_credentials(Credentials::Bearer(token.to_string()));
    let response = transport.send(request).await?;
    if !response.ok() {
        return Err(PortalError::Http {
            status: response.status,
            message: response.body,
        });
    }
    Ok(())
}
