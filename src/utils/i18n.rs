// ============================================================================
// I18N - Session messages in English and Hindi
// ============================================================================

use std::collections::HashMap;

/// Translation dictionary for a language code.
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();
    let lang_upper = lang.to_uppercase();

    match lang_upper.as_str() {
        "HI" => {
            // Login
            translations.insert("login_failed", "लॉगिन विफल। कृपया अपनी जानकारी जांचें");
            translations.insert("login_required_fields", "कृपया सभी फ़ील्ड भरें");
            translations.insert("invalid_mobile", "कृपया मान्य 10 अंकों का मोबाइल नंबर दर्ज करें");
            translations.insert("invalid_dob", "जन्म तिथि DD-MM-YYYY प्रारूप में दर्ज करें");

            // Session
            translations.insert("network_error", "नेटवर्क त्रुटि। कृपया पुनः प्रयास करें");
            translations.insert("session_expired", "सत्र समाप्त हो गया। कृपया फिर से लॉगिन करें");
            translations.insert("medium_required", "कृपया पहले माध्यम चुनें");
            translations.insert("invalid_medium", "अमान्य माध्यम");
            translations.insert("invalid_year", "वर्ष 2020 से 2030 के बीच होना चाहिए");
            translations.insert("student_not_linked", "यह छात्र आपके खाते से जुड़ा नहीं है");
            translations.insert("admin_login_required", "कृपया पहले एडमिन के रूप में लॉगिन करें");
            translations.insert("parent_login_required", "कृपया पहले अभिभावक के रूप में लॉगिन करें");

            // Payments
            translations.insert("invalid_amount", "कृपया मान्य राशि दर्ज करें");
            translations.insert("screenshot_required", "कृपया भुगतान का स्क्रीनशॉट अपलोड करें");
        }
        _ => {
            // Login
            translations.insert("login_failed", "Login failed. Please check your credentials");
            translations.insert("login_required_fields", "Please fill in all fields");
            translations.insert("invalid_mobile", "Please enter a valid 10-digit mobile number");
            translations.insert("invalid_dob", "Enter date of birth as DD-MM-YYYY");

            // Session
            translations.insert("network_error", "Network error. Please try again");
            translations.insert("session_expired", "Session expired. Please log in again");
            translations.insert("medium_required", "Please select a medium first");
            translations.insert("invalid_medium", "Invalid medium");
            translations.insert("invalid_year", "Year must be between 2020 and 2030");
            translations.insert("student_not_linked", "This student is not linked to your account");
            translations.insert("admin_login_required", "Please log in as admin first");
            translations.insert("parent_login_required", "Please log in as a parent first");

            // Payments
            translations.insert("invalid_amount", "Please enter a valid amount");
            translations.insert("screenshot_required", "Please upload the payment screenshot");
        }
    }

    translations
}

/// Translate `key` into `lang` ("EN" or "HI").
///
/// Falls back to the key itself when there is no entry.
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    key.to_string()
}

/// `"<english> / <hindi>"`, the form shown on shared login screens.
pub fn bilingual(key: &str) -> String {
    format!("{} / {}", t(key, "EN"), t(key, "HI"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_and_falls_back_to_key() {
        assert_eq!(t("network_error", "en"), "Network error. Please try again");
        assert!(t("network_error", "HI").starts_with("नेटवर्क"));
        assert_eq!(t("no_such_key", "EN"), "no_such_key");
    }

    #[test]
    fn bilingual_joins_both_languages() {
        let message = bilingual("session_expired");
        assert!(message.starts_with("Session expired"));
        assert!(message.contains(" / सत्र"));
    }
}
