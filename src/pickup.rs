//! Pickup details form
//!
//! The checkout page's required fields and their checks. Browsers validate
//! these with constraint attributes; the same rules are applied here so every
//! binding reports the same [`FieldState`] values.

use crate::gating::FieldState;

/// Customer name field
pub const NAME_FIELD: &str = "customer-name";

/// Contact email field
pub const EMAIL_FIELD: &str = "customer-email";

/// Contact phone field
pub const PHONE_FIELD: &str = "customer-phone";

/// Pickup time field
pub const PICKUP_FIELD: &str = "pickup-time";

/// Free-form notes field
pub const NOTES_FIELD: &str = "order-notes";

/// Pickup slots offered on the checkout page.
pub const PICKUP_SLOTS: [&str; 4] = [
    "Today, 10:00 AM",
    "Today, 2:00 PM",
    "Tomorrow, 10:00 AM",
    "Tomorrow, 2:00 PM",
];

/// Raw pickup form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickupDetails {
    /// Customer name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// Chosen pickup slot
    pub pickup: String,

    /// Order notes
    pub notes: String,
}

impl PickupDetails {
    /// Field states for the gate.
    pub fn fields(&self) -> Vec<FieldState> {
        vec![
            FieldState::required(NAME_FIELD, is_filled(&self.name)),
            FieldState::required(EMAIL_FIELD, is_email(&self.email)),
            FieldState::required(PHONE_FIELD, is_phone(&self.phone)),
            FieldState::required(PICKUP_FIELD, is_filled(&self.pickup)),
            FieldState::optional(NOTES_FIELD, true),
        ]
    }

    /// Names of required fields that fail their check.
    pub fn invalid_fields(&self) -> Vec<String> {
        self.fields()
            .into_iter()
            .filter(|field| field.required && !field.valid)
            .map(|field| field.name)
            .collect()
    }
}

/// Non-blank text.
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// `local@domain.tld` shape.
pub fn is_email(value: &str) -> bool {
    value
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
}

/// At least seven digits, with common separators allowed.
pub fn is_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();

    digits >= 7
        && value
            .trim()
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PickupDetails {
        PickupDetails {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "(555) 010-2030".to_string(),
            pickup: "Today, 10:00 AM".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn complete_form_is_valid() {
        assert!(complete().invalid_fields().is_empty());
    }

    #[test]
    fn missing_and_malformed_fields_are_reported() {
        let details = PickupDetails {
            email: "ada.example.com".to_string(),
            phone: "call me".to_string(),
            pickup: "   ".to_string(),
            ..complete()
        };

        assert_eq!(
            details.invalid_fields(),
            [EMAIL_FIELD, PHONE_FIELD, PICKUP_FIELD]
        );
        assert_eq!(
            PickupDetails::default().invalid_fields(),
            [NAME_FIELD, EMAIL_FIELD, PHONE_FIELD, PICKUP_FIELD]
        );
    }

    #[test]
    fn notes_are_optional() {
        let fields = complete().fields();

        assert!(
            fields
                .iter()
                .any(|field| field.name == NOTES_FIELD && !field.required)
        );
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("a@b.co"));
        assert!(!is_email("@b.co"));
        assert!(!is_email("a@b"));
        assert!(!is_email("a@.co"));
        assert!(!is_email(""));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_phone("555-010-2030"));
        assert!(is_phone("+1 (555) 010 2030"));
        assert!(!is_phone("555"));
        assert!(!is_phone("555-CALL-NOW"));
    }
}
