//! Staff domain entity

use chrono::{DateTime, Utc};

crate::wire_enum! {
    /// Staff role
    pub enum StaffRole("role") {
        Admin => "ADMIN",
        Technician => "TECHNICIAN",
        Driver => "DRIVER",
        Analyst => "ANALYST",
        Passenger => "PASSENGER",
    }
}

impl StaffRole {
    /// Roles that must confirm a login with a one-time code
    pub fn requires_otp(&self) -> bool {
        !matches!(self, Self::Passenger)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Technician => "Technician",
            Self::Driver => "Driver",
            Self::Analyst => "Analyst",
            Self::Passenger => "Passenger",
        }
    }
}

/// A system user: administrator, technician, driver, analyst or passenger
#[derive(Debug, Clone)]
pub struct Staff {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Always stored trimmed and lower-case
    pub email: String,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub role: StaffRole,
    pub active: bool,
    pub reset_token: Option<String>,
    pub reset_token_expiration: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Staff {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: &str,
        password_hash: String,
        role: StaffRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: crate::shared::normalize_email(email),
            phone_number: None,
            password_hash,
            role,
            active: true,
            reset_token: None,
            reset_token_expiration: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }

    /// Whether `token` matches the stored reset token and has not expired
    pub fn reset_token_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.reset_token, self.reset_token_expiration) {
            (Some(stored), Some(expires)) => stored == token.trim() && now <= expires,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn only_passengers_skip_otp() {
        assert!(StaffRole::Admin.requires_otp());
        assert!(StaffRole::Driver.requires_otp());
        assert!(!StaffRole::Passenger.requires_otp());
    }

    #[test]
    fn email_is_normalized_on_creation() {
        let s = Staff::new("Ana", "Mbala", "  Ana.Mbala@Example.COM ", "h".into(), StaffRole::Driver);
        assert_eq!(s.email, "ana.mbala@example.com");
        assert_eq!(s.full_name(), "Ana Mbala");
    }

    #[test]
    fn reset_token_expires() {
        let now = Utc::now();
        let mut s = Staff::new("A", "B", "a@b.c", "h".into(), StaffRole::Admin);
        assert!(!s.reset_token_valid("123456", now));

        s.reset_token = Some("123456".into());
        s.reset_token_expiration = Some(now + Duration::minutes(60));
        assert!(s.reset_token_valid("123456", now));
        assert!(!s.reset_token_valid("654321", now));
        assert!(!s.reset_token_valid("123456", now + Duration::minutes(61)));
    }
}
