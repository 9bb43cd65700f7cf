use chrono::{DateTime, Duration, Utc};

use crate::auth::provider::{AuthProvider, Confirmation};
use crate::auth::session::SessionStore;
use crate::auth::user::{device_info, AuthUser, UserProfile};
use crate::auth::validation;
use crate::config::OtpPolicy;
use crate::error::Result;

/// One flow type drives both the signup and signin screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Signup,
    Signin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CollectDetails,
    AwaitOtpDispatch,
    VerifyOtp,
    SetPassword,
    Authenticated,
    Locked,
}

/// What the detail screen collects. Mobile is sanitized on every keystroke
/// through [`AuthFlow::set_mobile`], so validation never sees free-form text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
}

/// The signup/signin step machine. Per-step validation gates every forward
/// transition; collaborator failures land in the step-scoped error string and
/// never escape to the caller.
pub struct AuthFlow {
    kind: FlowKind,
    policy: OtpPolicy,
    step: Step,
    form: SignupForm,
    confirmation: Option<Confirmation>,
    attempts: u32,
    last_dispatch: Option<DateTime<Utc>>,
    error: Option<String>,
    busy: bool,
    user: Option<AuthUser>,
}

impl AuthFlow {
    pub fn new(kind: FlowKind, policy: OtpPolicy) -> Self {
        AuthFlow {
            kind,
            policy,
            step: Step::CollectDetails,
            form: SignupForm::default(),
            confirmation: None,
            attempts: 0,
            last_dispatch: None,
            error: None,
            busy: false,
            user: None,
        }
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    /// Signed-in user once the flow reaches `Authenticated`.
    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn set_name(&mut self, value: &str) {
        self.form.name = value.to_string();
    }

    pub fn set_mobile(&mut self, raw: &str) {
        self.form.mobile = validation::sanitize_mobile(raw);
    }

    pub fn set_email(&mut self, value: &str) {
        self.form.email = value.to_string();
    }

    pub fn set_address(&mut self, value: &str) {
        self.form.address = value.to_string();
    }

    pub fn set_password(&mut self, value: &str) {
        self.form.password = value.to_string();
    }

    pub fn set_confirm_password(&mut self, value: &str) {
        self.form.confirm_password = value.to_string();
    }

    fn fail(&mut self, result: Result<()>) -> bool {
        match result {
            Ok(()) => false,
            Err(e) => {
                self.error = Some(e.step_message());
                true
            }
        }
    }

    fn validate_details(&self) -> Result<()> {
        match self.kind {
            FlowKind::Signup => {
                validation::validate_required(&self.form.name, "Name")?;
                validation::validate_mobile(&self.form.mobile)?;
                validation::validate_required(&self.form.email, "Email")?;
                validation::validate_required(&self.form.address, "Address")?;
                validation::validate_password(&self.form.password)?;
            }
            FlowKind::Signin => {
                validation::validate_mobile(&self.form.mobile)?;
                validation::validate_password(&self.form.password)?;
            }
        }
        Ok(())
    }

    /// Step 1: validate the collected details. On success the flow is ready
    /// to dispatch an OTP; on failure it stays put with an inline error.
    pub fn submit_details(&mut self) {
        if self.step != Step::CollectDetails {
            return;
        }
        self.error = None;
        let check = self.validate_details();
        if self.fail(check) {
            return;
        }
        self.step = Step::AwaitOtpDispatch;
    }

    /// Step 2: ask the collaborator to send a code. Also serves as "resend"
    /// from the verify screen; a resend issues a fresh code, so the attempt
    /// counter starts over.
    pub async fn dispatch_otp(&mut self, provider: &dyn AuthProvider) {
        if !matches!(self.step, Step::AwaitOtpDispatch | Step::VerifyOtp) {
            return;
        }
        if self.busy {
            return;
        }
        if let Some(last) = self.last_dispatch {
            let cooldown = Duration::seconds(self.policy.resend_cooldown_secs);
            if Utc::now() - last < cooldown {
                self.error = Some("Please wait before requesting another code".to_string());
                return;
            }
        }
        self.busy = true;
        self.error = None;
        match provider.send_code(&self.form.mobile).await {
            Ok(confirmation) => {
                self.confirmation = Some(confirmation);
                self.attempts = 0;
                self.last_dispatch = Some(Utc::now());
                self.step = Step::VerifyOtp;
            }
            Err(e) => {
                self.error = Some(e.step_message());
            }
        }
        self.busy = false;
    }

    /// Step 3: check the entered code with the collaborator. A mismatch stays
    /// on this step with "Invalid OTP"; exhausting the configured attempt
    /// budget locks the flow until the user starts over.
    pub async fn submit_code(
        &mut self,
        provider: &dyn AuthProvider,
        store: &dyn SessionStore,
        code: &str,
    ) {
        if self.step != Step::VerifyOtp {
            return;
        }
        if self.busy {
            return;
        }
        let Some(confirmation) = self.confirmation.clone() else {
            self.error = Some("No code has been sent yet".to_string());
            return;
        };
        self.busy = true;
        self.error = None;
        match provider.verify_code(&confirmation, code).await {
            Ok(true) => match self.kind {
                FlowKind::Signup => {
                    self.step = Step::SetPassword;
                }
                FlowKind::Signin => match provider.fetch_user(&self.form.mobile).await {
                    Ok(user) => {
                        store.set(&user);
                        self.user = Some(user);
                        self.step = Step::Authenticated;
                    }
                    Err(e) => {
                        self.error = Some(e.step_message());
                    }
                },
            },
            Ok(false) => {
                self.attempts += 1;
                match self.policy.max_verify_attempts {
                    Some(max) if self.attempts >= max => {
                        self.step = Step::Locked;
                        self.error = Some(
                            "Too many incorrect attempts. Go back and request a new code"
                                .to_string(),
                        );
                    }
                    _ => {
                        self.error = Some("Invalid OTP".to_string());
                    }
                }
            }
            Err(e) => {
                self.error = Some(e.step_message());
            }
        }
        self.busy = false;
    }

    /// Step 4 (signup only): confirm the password, submit the full record to
    /// the collaborator and persist the session.
    pub async fn submit_password(
        &mut self,
        provider: &dyn AuthProvider,
        store: &dyn SessionStore,
        password: &str,
        confirm: &str,
    ) {
        if self.step != Step::SetPassword || self.kind != FlowKind::Signup {
            return;
        }
        if self.busy {
            return;
        }
        self.error = None;
        let check =
            validation::validate_password(password).and_then(|_| validation::validate_confirm(password, confirm));
        if self.fail(check) {
            return;
        }
        self.form.password = password.to_string();
        self.form.confirm_password = confirm.to_string();

        let profile = UserProfile {
            name: self.form.name.clone(),
            mobile: self.form.mobile.clone(),
            email: self.form.email.clone(),
            address: self.form.address.clone(),
            password: self.form.password.clone(),
            mobile_verified: true,
            device_info: device_info(),
        };
        self.busy = true;
        match provider.register(&profile).await {
            Ok(user) => {
                store.set(&user);
                self.user = Some(user);
                self.step = Step::Authenticated;
            }
            Err(e) => {
                self.error = Some(e.step_message());
            }
        }
        self.busy = false;
    }

    /// Step back to the detail screen. Clears the pending code, the attempt
    /// count and the step error; entered details are kept. The resend
    /// cooldown clock keeps running.
    pub fn back(&mut self) {
        match self.step {
            Step::AwaitOtpDispatch | Step::VerifyOtp | Step::SetPassword | Step::Locked => {
                self.step = Step::CollectDetails;
                self.confirmation = None;
                self.attempts = 0;
                self.error = None;
            }
            Step::CollectDetails | Step::Authenticated => {}
        }
    }
}
