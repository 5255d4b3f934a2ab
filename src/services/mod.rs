pub mod http;
pub mod auth_service;
pub mod api_client;
pub mod payment_service;

pub use http::{
    ApiRequest, ApiResponse, Credentials, GlooTransport, HttpMethod, HttpTransport,
    MultipartPart, RequestBody,
};
pub use auth_service::*;
pub use api_client::{AdminApi, ParentApi};
pub use payment_service::{build_screenshot_request, PaymentService};
