// ============================================================================
// PORTAL - Owns both session services and the payment service
// ============================================================================
// Construct at start, `boot` once, `dispose` at teardown.
// ============================================================================

use std::rc::Rc;

use crate::services::{HttpTransport, PaymentService};
use crate::utils::PreferenceStore;
use crate::viewmodels::{AdminSessionService, ParentSessionService};

pub struct Portal<T: HttpTransport> {
    pub admin: AdminSessionService<T>,
    pub parent: ParentSessionService<T>,
    pub payments: PaymentService,
}

impl<T: HttpTransport> Portal<T> {
    pub fn new(transport: Rc<T>, store: Rc<dyn PreferenceStore>) -> Self {
        Self {
            admin: AdminSessionService::new(transport.clone(), store.clone()),
            parent: ParentSessionService::new(transport, store),
            payments: PaymentService::new(),
        }
    }

    /// Run both boot-time verifications concurrently.
    pub async fn boot(&self) {
        log::info!("🚀 [PORTAL] Verifying sessions...");
        futures::join!(self.admin.init(), self.parent.init());
        log::info!(
            "✅ [PORTAL] Ready (admin: {:?}, parent: {:?})",
            self.admin.phase(),
            self.parent.phase()
        );
    }

    /// Invalidate in-flight work and drop subscribers.
    pub fn dispose(&self) {
        self.admin.dispose();
        self.parent.dispose();
        log::info!("🧹 [PORTAL] Disposed");
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::services::http::mock::MockTransport;
    use crate::state::{AdminPhase, ParentPhase};
    use crate::utils::{MemoryStore, STORAGE_KEY_PARENT_TOKEN};

    #[test]
    fn boot_resolves_both_sessions() {
        let transport = Rc::new(MockTransport::new());
        let store = Rc::new(MemoryStore::new());
        store.set(STORAGE_KEY_PARENT_TOKEN, "jwt");

        transport.respond(
            200,
            json!({"success": true, "data": {"admin": {"id": "ADM001", "name": "Office", "role": "admin"}}}),
        );
        transport.respond(403, json!({"success": false}));

        let portal = Portal::new(transport.clone(), store.clone());
        block_on(portal.boot());

        assert_eq!(portal.admin.phase(), AdminPhase::AuthenticatedNoMedium);
        assert_eq!(portal.parent.phase(), ParentPhase::Unauthenticated);
        assert!(!store.contains(STORAGE_KEY_PARENT_TOKEN));
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn dispose_signs_out_in_memory_only() {
        let transport = Rc::new(MockTransport::new());
        let store = Rc::new(MemoryStore::new());
        transport.respond(
            200,
            json!({"success": true, "data": {"admin": {"id": "ADM001", "name": "Office", "role": "admin"}}}),
        );

        let portal = Portal::new(transport.clone(), store.clone());
        block_on(portal.boot());
        portal.admin.set_medium("English").unwrap();

        portal.dispose();
        assert!(!portal.admin.state().is_authenticated);
        assert!(!portal.parent.is_authenticated());
        assert_eq!(store.get("adminSelectedMedium").as_deref(), Some("English"));
    }
}
