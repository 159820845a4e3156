use crate::core::input::{digits_only, is_admin_token, normalize_emp_id};
use crate::core::navigation::{AdminGrant, Effect, Route, Transition};
use crate::domain::model::{
    EmployeeLookup, Failure, FormMode, FormSettings, RegisterRequest, Registration,
    RegistrationDraft, RegistrationResult,
};

pub const LOOKUP_FAILED: &str = "Error checking Employee ID";
pub const CONNECT_FAILED: &str = "Failed to connect to server";
pub const MISSING_FIELDS: &str = "Please fill in all fields";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const INVALID_PASSWORD: &str = "Invalid password";
pub const LOGIN_NETWORK_ERROR: &str = "Network error. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    EmpIdChanged(String),
    EmpIdBlurred,
    PhoneChanged(String),
    ParticipantsChanged(String),
    PasswordChanged(String),
    Submit,
    Back,
    LookupCompleted {
        emp_id: String,
        result: Result<EmployeeLookup, Failure>,
    },
    RegisterCompleted(Result<Registration, Failure>),
    LoginCompleted(Result<(), Failure>),
}

/// Registration screen state. Every transition goes through [`FormState::reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: RegistrationDraft,
    mode: FormMode,
    password: String,
    login_error: Option<String>,
    checking_id: bool,
    registering: bool,
    logging_in: bool,
    settings: FormSettings,
}

impl FormState {
    pub fn new(settings: FormSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn is_checking_id(&self) -> bool {
        self.checking_id
    }

    pub fn is_registering(&self) -> bool {
        self.registering
    }

    pub fn is_logging_in(&self) -> bool {
        self.logging_in
    }

    /// A lookup or a registration is in flight.
    pub fn is_busy(&self) -> bool {
        self.checking_id || self.registering
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn reduce(&self, event: FormEvent) -> Transition<FormState> {
        let mut next = self.clone();
        match event {
            FormEvent::EmpIdChanged(text) => {
                next.draft.emp_id = normalize_emp_id(&text);
                next.draft.field_error = None;
                next.mode = if is_admin_token(&text, &self.settings.admin_token) {
                    FormMode::Admin
                } else {
                    FormMode::Normal
                };
                Transition::stay(next)
            }
            FormEvent::EmpIdBlurred => next.on_blur(),
            FormEvent::PhoneChanged(text) => {
                next.draft.phone_number = digits_only(&text, None);
                Transition::stay(next)
            }
            FormEvent::ParticipantsChanged(text) => {
                next.draft.participants =
                    digits_only(&text, Some(self.settings.participants_max_len));
                Transition::stay(next)
            }
            FormEvent::PasswordChanged(text) => {
                next.password = text;
                next.login_error = None;
                Transition::stay(next)
            }
            FormEvent::Submit => match self.mode {
                FormMode::Normal => next.on_submit(),
                FormMode::Admin => next.on_admin_submit(),
            },
            FormEvent::Back => Transition::navigate(next, Route::Welcome),
            FormEvent::LookupCompleted { emp_id, result } => next.on_lookup(emp_id, result),
            FormEvent::RegisterCompleted(result) => next.on_registered(result),
            FormEvent::LoginCompleted(result) => next.on_login(result),
        }
    }

    fn on_blur(mut self) -> Transition<FormState> {
        if self.draft.emp_id.is_empty() {
            self.draft.field_error = None;
            return Transition::stay(self);
        }
        if self.mode == FormMode::Admin {
            self.draft.field_error = None;
            return Transition::stay(self);
        }
        if self.is_busy() {
            tracing::debug!("Skipping employee lookup while another request is in flight");
            return Transition::stay(self);
        }

        self.checking_id = true;
        self.draft.field_error = None;
        let emp_id = self.draft.emp_id.clone();
        Transition::with(self, Effect::CheckEmployee(emp_id))
    }

    fn on_lookup(
        mut self,
        emp_id: String,
        result: Result<EmployeeLookup, Failure>,
    ) -> Transition<FormState> {
        self.checking_id = false;
        if emp_id != self.draft.emp_id {
            tracing::debug!("Dropping stale lookup for {}", emp_id);
            return Transition::stay(self);
        }

        match result {
            Ok(EmployeeLookup::AlreadyRegistered {
                registration_number,
                emp_name,
                company_name,
                phone_number,
                participants,
            }) => {
                let result = RegistrationResult {
                    registration_number,
                    already_registered: true,
                    emp_id,
                    emp_name,
                    company_name,
                    phone_number,
                    participants,
                };
                Transition::navigate(self, Route::ThankYou(result))
            }
            Ok(EmployeeLookup::Available {
                emp_name,
                company_name,
            }) => {
                self.draft.emp_name = emp_name;
                self.draft.company_name = company_name;
                self.draft.field_error = None;
                Transition::stay(self)
            }
            Err(failure) => {
                let message = match failure {
                    Failure::Unreachable => CONNECT_FAILED.to_string(),
                    rejected => rejected.message_or(LOOKUP_FAILED),
                };
                self.draft.field_error = Some(message);
                self.draft.emp_name.clear();
                self.draft.company_name.clear();
                Transition::stay(self)
            }
        }
    }

    fn on_submit(mut self) -> Transition<FormState> {
        if self.is_busy() {
            tracing::debug!("Ignoring submit while another request is in flight");
            return Transition::stay(self);
        }
        if let Some(error) = self.draft.field_error.clone() {
            return Transition::with(self, Effect::Alert(error));
        }
        let draft = &self.draft;
        if draft.emp_id.is_empty() || draft.phone_number.is_empty() || draft.participants.is_empty()
        {
            return Transition::with(self, Effect::Alert(MISSING_FIELDS.to_string()));
        }

        self.registering = true;
        let request = RegisterRequest {
            emp_id: self.draft.emp_id.clone(),
            phone_number: self.draft.phone_number.clone(),
            participants: self.draft.participants.clone(),
        };
        Transition::with(self, Effect::Register(request))
    }

    fn on_registered(mut self, result: Result<Registration, Failure>) -> Transition<FormState> {
        self.registering = false;
        let (registration_number, already_registered) = match result {
            Ok(Registration::Created {
                registration_number,
            }) => (registration_number, false),
            Ok(Registration::AlreadyRegistered {
                registration_number,
            }) => (registration_number, true),
            Err(Failure::Unreachable) => {
                return Transition::with(self, Effect::Alert(CONNECT_FAILED.to_string()));
            }
            Err(rejected) => {
                let message = rejected.message_or(REGISTRATION_FAILED);
                return Transition::with(self, Effect::Alert(message));
            }
        };

        let result = self.result_from_draft(registration_number, already_registered);
        Transition::navigate(self, Route::ThankYou(result))
    }

    fn on_admin_submit(mut self) -> Transition<FormState> {
        if self.logging_in {
            return Transition::stay(self);
        }
        if self.password.is_empty() {
            self.login_error = Some(PASSWORD_REQUIRED.to_string());
            return Transition::stay(self);
        }

        self.logging_in = true;
        self.login_error = None;
        let password = self.password.clone();
        Transition::with(self, Effect::AdminLogin(password))
    }

    fn on_login(mut self, result: Result<(), Failure>) -> Transition<FormState> {
        self.logging_in = false;
        match result {
            Ok(()) => {
                // The password is not kept once it has been used.
                self.password.clear();
                Transition::navigate(self, Route::AdminDashboard(AdminGrant::issue()))
            }
            Err(Failure::Unreachable) => {
                self.login_error = Some(LOGIN_NETWORK_ERROR.to_string());
                Transition::stay(self)
            }
            Err(rejected) => {
                self.login_error = Some(rejected.message_or(INVALID_PASSWORD));
                Transition::stay(self)
            }
        }
    }

    fn result_from_draft(
        &self,
        registration_number: String,
        already_registered: bool,
    ) -> RegistrationResult {
        RegistrationResult {
            registration_number,
            already_registered,
            emp_id: self.draft.emp_id.clone(),
            emp_name: self.draft.emp_name.clone(),
            company_name: self.draft.company_name.clone(),
            phone_number: self.draft.phone_number.clone(),
            participants: self.draft.participants.clone(),
        }
    }
}
