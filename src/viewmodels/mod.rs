pub mod admin_viewmodel;
pub mod parent_viewmodel;

pub use admin_viewmodel::{default_academic_year, AdminSessionService};
pub use parent_viewmodel::ParentSessionService;
