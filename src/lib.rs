// ============================================================================
// SCHOOL PORTAL SESSION - Client-side session core (WASM)
// ============================================================================
// - Models: Backend payloads (envelope, principals, students, payments)
// - Services: HTTP transport, auth calls, scoped API helpers
// - State: Session state + reducers + request guards
// - ViewModels: Admin / parent session services
// - Utils: Storage, validation, translations, constants
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

pub use app::Portal;
pub use config::{PortalConfig, CONFIG};
pub use error::PortalError;
pub use services::{AdminApi, GlooTransport, HttpTransport, ParentApi, PaymentService, VerifyOutcome};
pub use utils::{LocalStorageStore, MemoryStore, PreferenceStore};
pub use viewmodels::{AdminSessionService, ParentSessionService};

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::app::Portal;
    use crate::config::CONFIG;
    use crate::services::GlooTransport;
    use crate::utils::LocalStorageStore;

    thread_local! {
        static PORTAL: RefCell<Option<Rc<Portal<GlooTransport>>>> = RefCell::new(None);
    }

    fn with_portal<R>(read: impl FnOnce(&Portal<GlooTransport>) -> R) -> Option<R> {
        PORTAL.with(|cell| cell.borrow().as_ref().map(|portal| read(portal)))
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(Config::default());
        }
        log::info!("🚀 School portal session core ({})", CONFIG.environment);

        let transport = Rc::new(GlooTransport::from_config(&CONFIG));
        let portal = Rc::new(Portal::new(transport, Rc::new(LocalStorageStore::new())));

        PORTAL.with(|cell| {
            *cell.borrow_mut() = Some(portal.clone());
        });

        wasm_bindgen_futures::spawn_local(async move {
            portal.boot().await;
        });

        Ok(())
    }

    #[wasm_bindgen]
    pub fn dispose_portal() {
        if let Some(portal) = PORTAL.with(|cell| cell.borrow_mut().take()) {
            portal.dispose();
        }
    }

    #[wasm_bindgen]
    pub fn admin_is_ready() -> bool {
        with_portal(|portal| portal.admin.is_ready()).unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn admin_filter_params() -> String {
        with_portal(|portal| portal.admin.get_filter_params()).unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn parent_is_authenticated() -> bool {
        with_portal(|portal| portal.parent.is_authenticated()).unwrap_or(false)
    }
}
