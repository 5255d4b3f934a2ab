use serde::{Deserialize, Serialize};

/// What a fee payment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Class,
    Bus,
    Both,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Class => "class",
            PaymentType::Bus => "bus",
            PaymentType::Both => "both",
        }
    }
}

/// Set by the admin approval flow on the server, never by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Payment request as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(alias = "_id", default)]
    pub id: Option<String>,
    pub student_id: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub screenshot_ref: Option<String>,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub status: PaymentStatus,
}

/// Manual payment proof as submitted by a parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotUpload {
    pub student_id: String,
    pub payment_type: PaymentType,
    pub amount: f64,
    pub description: String,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
