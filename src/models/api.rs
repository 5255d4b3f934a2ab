use serde::Deserialize;

/// Standard backend envelope: `{ success, message?, data? }`.
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// `data` of a successful envelope, if any.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}
