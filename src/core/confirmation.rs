use crate::core::navigation::{Route, Transition};
use crate::domain::model::RegistrationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationEvent {
    Done,
}

/// Thank-you screen. Display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    result: RegistrationResult,
}

impl Confirmation {
    pub fn new(result: RegistrationResult) -> Self {
        Self { result }
    }

    pub fn result(&self) -> &RegistrationResult {
        &self.result
    }

    pub fn title(&self) -> &'static str {
        if self.result.already_registered {
            "Already Registered"
        } else {
            "Thank You!"
        }
    }

    pub fn subtitle(&self) -> &'static str {
        if self.result.already_registered {
            "You have already registered for this event."
        } else {
            "Registration Successful"
        }
    }

    pub fn details(&self) -> [(&'static str, &str); 5] {
        [
            ("Emp ID", self.result.emp_id.as_str()),
            ("Name", self.result.emp_name.as_str()),
            ("Company", self.result.company_name.as_str()),
            ("Phone", self.result.phone_number.as_str()),
            ("Participants", self.result.participants.as_str()),
        ]
    }

    pub fn reduce(&self, event: ConfirmationEvent) -> Transition<Confirmation> {
        match event {
            ConfirmationEvent::Done => Transition::navigate(self.clone(), Route::Welcome),
        }
    }
}
