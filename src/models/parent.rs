use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Authenticated parent; the mobile number is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentPrincipal {
    pub mobile: String,
}

/// A child linked to the parent account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "class", default, deserialize_with = "string_or_number")]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub section: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
}

/// Display-only fields the backend sends as either `"5"` or `5`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct ParentLoginRequest {
    pub mobile: String,
    pub dob: String,
}

/// `data` of the parent verify and login responses. Login carries the
/// bearer token, verify does not.
#[derive(Clone, PartialEq, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ParentSessionData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub parent_mobile: Option<String>,
    #[serde(default)]
    pub student_list: Vec<StudentSummary>,
}
