//! Staff management service
//!
//! Registration, login with an emailed one-time code for privileged roles,
//! password reset and administrator CRUD. HTTP handlers are thin wrappers
//! around this service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use super::otp::OtpStore;
use crate::config::{AdminConfig, SecurityConfig};
use crate::domain::staff::{Staff, StaffRole};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::crypto::{
    create_token, hash_password, six_digit_code, verify_password, JwtConfig, MIN_PASSWORD_LENGTH,
};
use crate::infrastructure::mail::{MailMessage, Mailer};
use crate::shared::{non_blank, normalize_email};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub staff: Staff,
}

#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// A code was emailed; the client must call verify-otp
    OtpRequired { email: String },
    Authenticated(AuthResult),
}

/// Input for registration and administrator-created accounts
#[derive(Debug, Clone, Default)]
pub struct NewStaff {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct StaffUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub role: Option<StaffRole>,
    pub active: Option<bool>,
}

pub struct StaffService {
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn Mailer>,
    jwt_config: JwtConfig,
    otp: OtpStore,
    reset_ttl: Duration,
}

fn check_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn hash(password: &str) -> DomainResult<String> {
    hash_password(password)
        .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))
}

fn required<'a>(value: &'a str, field: &str) -> DomainResult<&'a str> {
    non_blank(Some(value))
        .ok_or_else(|| DomainError::Validation(format!("{} is required", field)))
}

impl StaffService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        mailer: Arc<dyn Mailer>,
        security: &SecurityConfig,
    ) -> Self {
        Self {
            repos,
            mailer,
            jwt_config: JwtConfig::from_security(security),
            otp: OtpStore::new(security.otp_ttl_minutes),
            reset_ttl: Duration::minutes(security.reset_token_ttl_minutes),
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    pub fn otp_store(&self) -> &OtpStore {
        &self.otp
    }

    // ── Authentication ──────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let staff = self
            .repos
            .staff()
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Invalid email or password".into()))?;

        if !verify_password(password, &staff.password_hash) {
            return Err(DomainError::Unauthorized("Invalid email or password".into()));
        }
        if !staff.active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        if staff.role.requires_otp() {
            self.send_otp(&staff).await;
            return Ok(LoginOutcome::OtpRequired { email: staff.email });
        }

        info!(staff_id = staff.id, "Staff logged in");
        Ok(LoginOutcome::Authenticated(self.issue_token(staff)?))
    }

    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<AuthResult> {
        if !self.otp.verify(email, code) {
            return Err(DomainError::Unauthorized("Invalid or expired OTP".into()));
        }
        let staff = self
            .repos
            .staff()
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Invalid or expired OTP".into()))?;
        if !staff.active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        info!(staff_id = staff.id, "Staff logged in with OTP");
        self.issue_token(staff)
    }

    pub async fn resend_otp(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let staff = self
            .repos
            .staff()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("Staff", "email", &email))?;
        self.send_otp(&staff).await;
        Ok(())
    }

    async fn send_otp(&self, staff: &Staff) {
        let code = self.otp.issue(&staff.email);
        let body = format!(
            "Hello {},\n\nYour verification code is: {}\n\nIt expires in {} minutes.\n\nImasProject Team",
            staff.full_name(),
            code,
            self.otp.ttl_minutes()
        );
        let message = MailMessage::new(&staff.email, "Your login verification code", body);
        if let Err(e) = self.mailer.send(message).await {
            warn!(staff_id = staff.id, error = %e, "Failed to send OTP email");
        }
    }

    fn issue_token(&self, staff: Staff) -> DomainResult<AuthResult> {
        let token = create_token(staff.id, &staff.email, staff.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in(),
            staff,
        })
    }

    pub async fn email_exists(&self, email: &str) -> DomainResult<bool> {
        self.repos
            .staff()
            .exists_by_email(&normalize_email(email))
            .await
    }

    // ── Password reset ──────────────────────────────────────────

    /// Store and email a reset code when the account exists. Unknown
    /// accounts are not revealed to the caller.
    pub async fn forgot_password(&self, email: &str, role: Option<StaffRole>) -> DomainResult<()> {
        let Some(mut staff) = self
            .repos
            .staff()
            .find_by_email(&normalize_email(email))
            .await?
        else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };
        if role.is_some_and(|r| r != staff.role) {
            info!(staff_id = staff.id, "Password reset requested with mismatched role");
            return Ok(());
        }

        let token = six_digit_code();
        let now = Utc::now();
        staff.reset_token = Some(token.clone());
        staff.reset_token_expiration = Some(now + self.reset_ttl);
        staff.updated_at = now;
        let staff = self.repos.staff().update(staff).await?;

        let body = format!(
            "Hello {},\n\nUse the following code to reset your password: {}\n\nThe code expires in {} minutes.\n\nImasProject Team",
            staff.full_name(),
            token,
            self.reset_ttl.num_minutes()
        );
        if let Err(e) = self
            .mailer
            .send(MailMessage::new(&staff.email, "Password reset", body))
            .await
        {
            warn!(staff_id = staff.id, error = %e, "Failed to send password reset email");
        }
        Ok(())
    }

    pub async fn reset_password(&self, email: &str, token: &str, new_password: &str) -> DomainResult<()> {
        let mut staff = self
            .repos
            .staff()
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| DomainError::Validation("Invalid or expired reset token".into()))?;

        let now = Utc::now();
        if !staff.reset_token_valid(token, now) {
            return Err(DomainError::Validation("Invalid or expired reset token".into()));
        }
        check_password(new_password)?;

        staff.password_hash = hash(new_password)?;
        staff.reset_token = None;
        staff.reset_token_expiration = None;
        staff.updated_at = now;
        self.repos.staff().update(staff).await?;
        info!("Password reset completed");
        Ok(())
    }

    // ── Registration & administration ───────────────────────────

    fn build(&self, input: NewStaff, role: StaffRole) -> DomainResult<Staff> {
        let first_name = required(&input.first_name, "First name")?;
        let last_name = required(&input.last_name, "Last name")?;
        let email = required(&input.email, "Email")?;
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        check_password(&input.password)?;

        let mut staff = Staff::new(first_name, last_name, email, hash(&input.password)?, role);
        staff.phone_number = non_blank(input.phone_number.as_deref()).map(str::to_string);
        Ok(staff)
    }

    /// Public self-registration; always creates an active passenger
    pub async fn register(&self, input: NewStaff) -> DomainResult<Staff> {
        if non_blank(input.phone_number.as_deref()).is_none() {
            return Err(DomainError::Validation("Phone number is required".into()));
        }
        let staff = self.build(input, StaffRole::Passenger)?;
        if self.repos.staff().exists_by_email(&staff.email).await? {
            return Err(DomainError::Validation("Email is already registered".into()));
        }
        let staff = self.repos.staff().create(staff).await?;
        info!(staff_id = staff.id, "Passenger registered");
        Ok(staff)
    }

    pub async fn create(&self, input: NewStaff, role: StaffRole) -> DomainResult<Staff> {
        let staff = self.build(input, role)?;
        if self.repos.staff().exists_by_email(&staff.email).await? {
            return Err(DomainError::Conflict("Email is already registered".into()));
        }
        let staff = self.repos.staff().create(staff).await?;
        info!(staff_id = staff.id, role = %staff.role, "Staff member created");
        Ok(staff)
    }

    pub async fn create_analyst(&self, input: NewStaff) -> DomainResult<Staff> {
        self.create(input, StaffRole::Analyst).await
    }

    /// Create the configured administrator when no account uses its email
    pub async fn ensure_default_admin(&self, admin: &AdminConfig) -> DomainResult<bool> {
        if self.email_exists(&admin.email).await? {
            return Ok(false);
        }
        let input = NewStaff {
            first_name: admin.first_name.clone(),
            last_name: admin.last_name.clone(),
            email: admin.email.clone(),
            phone_number: None,
            password: admin.password.clone(),
        };
        let staff = self.create(input, StaffRole::Admin).await?;
        info!(email = %staff.email, "👤 Default administrator created");
        Ok(true)
    }

    pub async fn list(&self, role: Option<StaffRole>) -> DomainResult<Vec<Staff>> {
        match role {
            Some(role) => self.repos.staff().find_by_role(role).await,
            None => self.repos.staff().find_all().await,
        }
    }

    pub async fn analysts(&self, active_only: bool) -> DomainResult<Vec<Staff>> {
        if active_only {
            self.repos.staff().find_active_by_role(StaffRole::Analyst).await
        } else {
            self.repos.staff().find_by_role(StaffRole::Analyst).await
        }
    }

    pub async fn get(&self, id: i64) -> DomainResult<Staff> {
        self.repos
            .staff()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Staff", "id", id))
    }

    pub async fn update(&self, id: i64, changes: StaffUpdate) -> DomainResult<Staff> {
        let mut staff = self.get(id).await?;

        if let Some(v) = non_blank(changes.first_name.as_deref()) {
            staff.first_name = v.to_string();
        }
        if let Some(v) = non_blank(changes.last_name.as_deref()) {
            staff.last_name = v.to_string();
        }
        if let Some(v) = non_blank(changes.email.as_deref()) {
            let email = normalize_email(v);
            if !email.contains('@') {
                return Err(DomainError::Validation("Invalid email address".into()));
            }
            if email != staff.email && self.repos.staff().exists_by_email(&email).await? {
                return Err(DomainError::Conflict("Email is already registered".into()));
            }
            staff.email = email;
        }
        if let Some(v) = changes.phone_number {
            staff.phone_number = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(v) = changes.password.as_deref().filter(|p| !p.is_empty()) {
            check_password(v)?;
            staff.password_hash = hash(v)?;
        }
        if let Some(role) = changes.role {
            staff.role = role;
        }
        if let Some(active) = changes.active {
            staff.active = active;
        }
        staff.updated_at = Utc::now();

        let staff = self.repos.staff().update(staff).await?;
        info!(staff_id = staff.id, "Staff member updated");
        Ok(staff)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.staff().delete(id).await?;
        info!(staff_id = id, "Staff member deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailConfig;
    use crate::infrastructure::crypto::verify_token;
    use crate::infrastructure::mail::LogMailer;
    use crate::test_support::{repositories, seed_staff, TEST_PASSWORD};

    async fn service() -> (StaffService, Arc<dyn RepositoryProvider>) {
        let repos = repositories().await;
        let mailer = Arc::new(LogMailer::new(&MailConfig::default()));
        (
            StaffService::new(repos.clone(), mailer, &SecurityConfig::default()),
            repos,
        )
    }

    fn passenger(email: &str) -> NewStaff {
        NewStaff {
            first_name: "Grace".into(),
            last_name: "Ilunga".into(),
            email: email.into(),
            phone_number: Some("+243810000000".into()),
            password: "secret-pass".into(),
        }
    }

    #[tokio::test]
    async fn register_creates_an_active_passenger() {
        let (svc, _) = service().await;
        let staff = svc.register(passenger(" Grace@Mail.cd ")).await.unwrap();
        assert_eq!(staff.role, StaffRole::Passenger);
        assert!(staff.active);
        assert_eq!(staff.email, "grace@mail.cd");

        match svc.register(passenger("grace@mail.cd")).await {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("already")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn register_rejects_short_password_and_missing_fields() {
        let (svc, _) = service().await;
        let mut input = passenger("x@mail.cd");
        input.password = "short".into();
        assert!(matches!(svc.register(input).await, Err(DomainError::Validation(_))));

        let mut input = passenger("y@mail.cd");
        input.phone_number = None;
        assert!(matches!(svc.register(input).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn passengers_get_a_token_directly() {
        let (svc, _) = service().await;
        svc.register(passenger("p@mail.cd")).await.unwrap();

        match svc.login("P@mail.cd", "secret-pass").await.unwrap() {
            LoginOutcome::Authenticated(auth) => {
                assert_eq!(auth.token_type, "Bearer");
                let claims = verify_token(&auth.token, svc.jwt_config()).unwrap();
                assert_eq!(claims.staff_id(), Some(auth.staff.id));
                assert_eq!(claims.role, "PASSENGER");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            svc.login("p@mail.cd", "wrong-pass").await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.login("nobody@mail.cd", "secret-pass").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn privileged_roles_go_through_otp() {
        let (svc, repos) = service().await;
        seed_staff(repos.as_ref(), "tech@imas.cd", StaffRole::Technician).await;

        match svc.login("tech@imas.cd", TEST_PASSWORD).await.unwrap() {
            LoginOutcome::OtpRequired { email } => assert_eq!(email, "tech@imas.cd"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            svc.verify_otp("tech@imas.cd", "not-it").await,
            Err(DomainError::Unauthorized(_))
        ));

        // a fresh code replaces the emailed one
        let code = svc.otp_store().issue("tech@imas.cd");
        let auth = svc.verify_otp("TECH@imas.cd", &code).await.unwrap();
        assert_eq!(auth.staff.role, StaffRole::Technician);
        assert!(matches!(
            svc.verify_otp("tech@imas.cd", &code).await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn inactive_accounts_cannot_log_in() {
        let (svc, repos) = service().await;
        let staff = seed_staff(repos.as_ref(), "old@imas.cd", StaffRole::Passenger).await;
        svc.update(staff.id, StaffUpdate { active: Some(false), ..Default::default() })
            .await
            .unwrap();
        assert!(matches!(
            svc.login("old@imas.cd", TEST_PASSWORD).await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn resend_otp_requires_known_email() {
        let (svc, repos) = service().await;
        seed_staff(repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        svc.resend_otp("drv@imas.cd").await.unwrap();
        assert_eq!(svc.otp_store().len(), 1);
        assert!(matches!(
            svc.resend_otp("ghost@imas.cd").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn password_reset_flow() {
        let (svc, repos) = service().await;
        seed_staff(repos.as_ref(), "reset@imas.cd", StaffRole::Driver).await;

        svc.forgot_password("ghost@imas.cd", None).await.unwrap();
        svc.forgot_password("reset@imas.cd", Some(StaffRole::Admin)).await.unwrap();
        let untouched = repos.staff().find_by_email("reset@imas.cd").await.unwrap().unwrap();
        assert!(untouched.reset_token.is_none());

        svc.forgot_password("reset@imas.cd", Some(StaffRole::Driver)).await.unwrap();
        let staff = repos.staff().find_by_email("reset@imas.cd").await.unwrap().unwrap();
        let token = staff.reset_token.clone().unwrap();

        assert!(svc.reset_password("reset@imas.cd", "000000x", "new-password").await.is_err());
        assert!(svc.reset_password("reset@imas.cd", &token, "short").await.is_err());
        svc.reset_password("reset@imas.cd", &token, "new-password").await.unwrap();

        let staff = repos.staff().find_by_email("reset@imas.cd").await.unwrap().unwrap();
        assert!(staff.reset_token.is_none());
        assert!(verify_password("new-password", &staff.password_hash));
    }

    #[tokio::test]
    async fn admin_crud_and_analysts() {
        let (svc, _) = service().await;
        let analyst = svc.create_analyst(passenger("an@imas.cd")).await.unwrap();
        assert_eq!(analyst.role, StaffRole::Analyst);
        assert!(matches!(
            svc.create(passenger("an@imas.cd"), StaffRole::Driver).await,
            Err(DomainError::Conflict(_))
        ));

        assert_eq!(svc.analysts(true).await.unwrap().len(), 1);
        svc.update(analyst.id, StaffUpdate { active: Some(false), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(svc.analysts(true).await.unwrap().len(), 0);
        assert_eq!(svc.analysts(false).await.unwrap().len(), 1);
        assert_eq!(svc.list(Some(StaffRole::Analyst)).await.unwrap().len(), 1);

        svc.delete(analyst.id).await.unwrap();
        assert!(matches!(svc.get(analyst.id).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.delete(analyst.id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn default_admin_is_created_once() {
        let (svc, _) = service().await;
        let cfg = AdminConfig::default();
        assert!(svc.ensure_default_admin(&cfg).await.unwrap());
        assert!(!svc.ensure_default_admin(&cfg).await.unwrap());
        assert!(svc.email_exists(&cfg.email).await.unwrap());
    }
}
