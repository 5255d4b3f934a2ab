pub mod api;
pub mod admin;
pub mod parent;
pub mod payment;

pub use api::ApiEnvelope;
pub use admin::{AdminLoginRequest, AdminPrincipal, AdminSessionData, Medium};
pub use parent::{ParentLoginRequest, ParentPrincipal, ParentSessionData, StudentSummary};
pub use payment::{PaymentRequest, PaymentStatus, PaymentType, ScreenshotUpload};
