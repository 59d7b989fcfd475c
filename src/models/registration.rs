//! Registration payloads and their field validation.
//!
//! Both payloads are validated client-side before anything is sent, so a
//! user gets every field error at once instead of a backend round trip per
//! mistake. Formats follow the platform's conventions: Peruvian DNI
//! (8 digits) and mobile numbers (9 digits starting with 9).

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Minimum age for an administrator account.
const MIN_SIGN_UP_AGE: i32 = 18;

/// Administrator sign-up payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dni: String,
    pub address: String,
    pub phone: String,
    pub username: String,
    pub password: String,
    /// ISO `YYYY-MM-DD`
    pub birthdate: String,
}

impl SignUpRequest {
    /// All field errors, empty when the payload is well-formed.
    pub fn validation_errors(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();

        require(&mut errors, "firstName", &self.first_name, "First name is required");
        require(&mut errors, "lastName", &self.last_name, "Last name is required");
        require(&mut errors, "username", &self.username, "Username is required");
        require(&mut errors, "password", &self.password, "Password is required");
        require(&mut errors, "address", &self.address, "Address is required");

        if self.email.is_empty() {
            errors.push(("email", "Email is required".to_string()));
        } else if !is_valid_email(&self.email) {
            errors.push(("email", "Enter a valid email".to_string()));
        }

        if self.dni.is_empty() {
            errors.push(("dni", "DNI is required".to_string()));
        } else if !is_valid_dni(&self.dni) {
            errors.push(("dni", "DNI must be exactly 8 digits".to_string()));
        }

        if self.phone.is_empty() {
            errors.push(("phone", "Phone is required".to_string()));
        } else if !is_valid_phone(&self.phone) {
            errors.push(("phone", "Phone must have 9 digits and start with 9".to_string()));
        }

        if self.birthdate.is_empty() {
            errors.push(("birthdate", "Birthdate is required".to_string()));
        } else if !is_adult(&self.birthdate) {
            errors.push(("birthdate", "Must be at least 18 years old".to_string()));
        }

        errors
    }

    /// Validate, joining all field messages into one error string.
    pub fn validate(&self) -> Result<(), String> {
        join_errors(self.validation_errors())
    }
}

/// Payload for an administrator registering a teacher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dni: String,
    pub address: String,
    pub phone: String,
    pub administrator_id: i64,
    pub username: String,
    pub password: String,
}

impl RegisterTeacher {
    pub fn validation_errors(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();

        require(&mut errors, "firstName", &self.first_name, "First name is required");
        require(&mut errors, "lastName", &self.last_name, "Last name is required");
        require(&mut errors, "address", &self.address, "Address is required");

        if self.email.is_empty() {
            errors.push(("email", "Email is required".to_string()));
        } else if !is_valid_email(&self.email) {
            errors.push(("email", "Enter a valid email".to_string()));
        }

        if self.dni.is_empty() {
            errors.push(("dni", "DNI is required".to_string()));
        } else if !is_valid_dni(&self.dni) {
            errors.push(("dni", "DNI must be exactly 8 digits".to_string()));
        }

        if self.phone.is_empty() {
            errors.push(("phone", "Phone is required".to_string()));
        } else if !is_valid_phone(&self.phone) {
            errors.push(("phone", "Phone must have 9 digits and start with 9".to_string()));
        }

        if !(3..=20).contains(&self.username.chars().count()) {
            errors.push(("username", "Username must be 3 to 20 characters".to_string()));
        }
        if self.password.chars().count() < 6 {
            errors.push(("password", "Password must be at least 6 characters".to_string()));
        }

        errors
    }

    pub fn validate(&self) -> Result<(), String> {
        join_errors(self.validation_errors())
    }
}

fn require(
    errors: &mut Vec<(&'static str, String)>,
    field: &'static str,
    value: &str,
    message: &str,
) {
    if value.is_empty() {
        errors.push((field, message.to_string()));
    }
}

fn join_errors(errors: Vec<(&'static str, String)>) -> Result<(), String> {
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<String> = errors.into_iter().map(|(_, m)| m).collect();
        Err(format!("Invalid data: {}", messages.join(", ")))
    }
}

/// Local part and domain non-empty and whitespace-free, domain with an
/// inner dot.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || email.contains(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

/// Peruvian DNI: exactly 8 digits.
pub fn is_valid_dni(dni: &str) -> bool {
    dni.len() == 8 && dni.chars().all(|c| c.is_ascii_digit())
}

/// Peruvian mobile number: exactly 9 digits, starting with 9.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 9 && phone.starts_with('9') && phone.chars().all(|c| c.is_ascii_digit())
}

/// Whether the `YYYY-MM-DD` birthdate makes the person 18 or older today.
/// Unparseable input counts as not valid.
pub fn is_adult(birthdate: &str) -> bool {
    let Ok(birth) = NaiveDate::parse_from_str(birthdate, "%Y-%m-%d") else {
        return false;
    };
    let today = Utc::now().date_naive();
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age >= MIN_SIGN_UP_AGE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_sign_up() -> SignUpRequest {
        SignUpRequest {
            first_name: "Ana".to_string(),
            last_name: "Quispe".to_string(),
            email: "ana@example.com".to_string(),
            dni: "12345678".to_string(),
            address: "Av. Arequipa 123".to_string(),
            phone: "987654321".to_string(),
            username: "ana.q".to_string(),
            password: "secret1".to_string(),
            birthdate: "1990-05-20".to_string(),
        }
    }

    #[test]
    fn test_valid_sign_up_passes() {
        assert!(valid_sign_up().validate().is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at.com"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@b@c.co"));
    }

    #[test]
    fn test_dni_validation() {
        assert!(is_valid_dni("12345678"));
        assert!(!is_valid_dni("1234567"));
        assert!(!is_valid_dni("123456789"));
        assert!(!is_valid_dni("1234567a"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("987654321"));
        assert!(!is_valid_phone("887654321")); // must start with 9
        assert!(!is_valid_phone("98765432"));
        assert!(!is_valid_phone("9876543210"));
        assert!(!is_valid_phone("98765432a"));
    }

    #[test]
    fn test_age_validation() {
        assert!(is_adult("1990-05-20"));
        // Clearly underage and clearly unparseable
        let last_year = Utc::now().date_naive().year() - 1;
        assert!(!is_adult(&format!("{last_year}-01-01")));
        assert!(!is_adult("not-a-date"));
        assert!(!is_adult(""));
    }

    #[test]
    fn test_sign_up_collects_all_errors() {
        let request = SignUpRequest {
            email: "bad".to_string(),
            dni: "12".to_string(),
            phone: "123".to_string(),
            ..SignUpRequest::default()
        };
        let errors = request.validation_errors();
        let fields: Vec<&str> = errors.iter().map(|(f, _)| *f).collect();
        for field in ["firstName", "lastName", "username", "password", "address", "email", "dni", "phone", "birthdate"] {
            assert!(fields.contains(&field), "missing error for {field}");
        }

        let message = request.validate().expect_err("must fail");
        assert!(message.starts_with("Invalid data: "));
    }

    #[test]
    fn test_register_teacher_username_and_password_rules() {
        let teacher = RegisterTeacher {
            first_name: "Jose".to_string(),
            last_name: "Diaz".to_string(),
            email: "jose@example.com".to_string(),
            dni: "87654321".to_string(),
            address: "Jr. Union 45".to_string(),
            phone: "912345678".to_string(),
            administrator_id: 3,
            username: "jd".to_string(), // too short
            password: "12345".to_string(), // too short
        };
        let fields: Vec<&str> = teacher.validation_errors().iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, vec!["username", "password"]);

        let ok = RegisterTeacher {
            username: "jose.diaz".to_string(),
            password: "123456".to_string(),
            ..teacher
        };
        assert!(ok.validate().is_ok());
    }
}
