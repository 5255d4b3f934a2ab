// ============================================================================
// PAYMENT SERVICE - Manual payment proof (screenshot) submission
// ============================================================================

use crate::error::PortalError;
use crate::models::{PaymentRequest, ScreenshotUpload};
use crate::services::http::{ApiRequest, HttpTransport, MultipartPart};
use crate::state::InFlight;
use crate::utils::{bilingual, MAX_SCREENSHOT_BYTES, PAYMENT_SCREENSHOT_PATH};
use crate::viewmodels::ParentSessionService;

/// Screenshot uploads, one at a time.
#[derive(Default)]
pub struct PaymentService {
    upload_flight: InFlight,
}

impl PaymentService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_flight.is_busy()
    }

    /// Validate and submit a payment proof for a linked student.
    pub async fn upload_screenshot<T: HttpTransport>(
        &self,
        session: &ParentSessionService<T>,
        upload: ScreenshotUpload,
    ) -> Result<PaymentRequest, PortalError> {
        if !session.state().is_linked(&upload.student_id) {
            log::warn!("⚠️ [PAYMENT] Student {} not linked to this parent", upload.student_id);
            return Err(PortalError::StudentNotLinked(upload.student_id));
        }
        let request = build_screenshot_request(&upload)?;

        let Some(_token) = self.upload_flight.try_begin() else {
            log::warn!("⚠️ [PAYMENT] Upload already in progress");
            return Err(PortalError::AlreadyInFlight("payment screenshot upload"));
        };

        log::info!(
            "📤 [PAYMENT] Uploading {} ({} bytes) for student {}",
            upload.file_name,
            upload.bytes.len(),
            upload.student_id
        );

        let payment: PaymentRequest = session.api().send(request).await?.into_data()?;
        log::info!("✅ [PAYMENT] Payment request submitted ({:?})", payment.status);
        Ok(payment)
    }
}

/// Multipart request for `POST /api/payments/upload-screenshot`.
pub fn build_screenshot_request(upload: &ScreenshotUpload) -> Result<ApiRequest, PortalError> {
    if !upload.amount.is_finite() || upload.amount <= 0.0 {
        return Err(PortalError::Validation(bilingual("invalid_amount")));
    }
    if upload.bytes.is_empty() || !upload.content_type.starts_with("image/") {
        return Err(PortalError::Validation(bilingual("screenshot_required")));
    }
    if upload.bytes.len() > MAX_SCREENSHOT_BYTES {
        return Err(PortalError::Validation(format!(
            "Screenshot larger than {} MB",
            MAX_SCREENSHOT_BYTES / (1024 * 1024)
        )));
    }

    let text = |name: &str, value: String| MultipartPart::Text {
        name: name.to_string(),
        value,
    };

    let mut parts = vec![
        text("studentId", upload.student_id.clone()),
        text("type", upload.payment_type.as_str().to_string()),
        text("amount", upload.amount.to_string()),
        text("description", upload.description.clone()),
    ];
    if let Some(order_id) = upload.razorpay_order_id.as_ref().filter(|id| !id.is_empty()) {
        parts.push(text("razorpayOrderId", order_id.clone()));
    }
    if let Some(payment_id) = upload.razorpay_payment_id.as_ref().filter(|id| !id.is_empty()) {
        parts.push(text("razorpayPaymentId", payment_id.clone()));
    }
    parts.push(MultipartPart::File {
        name: "screenshot".to_string(),
        file_name: upload.file_name.clone(),
        content_type: upload.content_type.clone(),
        bytes: upload.bytes.clone(),
    });

    Ok(ApiRequest::post(PAYMENT_SCREENSHOT_PATH).multipart(parts))
}
