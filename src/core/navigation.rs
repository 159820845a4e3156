use crate::domain::model::{RegisterRequest, RegistrationResult};

/// Proof that an admin login succeeded. Only the form's login transition
/// can mint one, so the dashboard route cannot be reached without it.
#[derive(Debug, PartialEq, Eq)]
pub struct AdminGrant {
    _private: (),
}

impl AdminGrant {
    pub(crate) fn issue() -> Self {
        Self { _private: () }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    Welcome,
    Register,
    ThankYou(RegistrationResult),
    NetworkError,
    AdminDashboard(AdminGrant),
}

/// Side effect a reducer asks the driver to perform.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    ProbeHealth,
    CheckEmployee(String),
    Register(RegisterRequest),
    AdminLogin(String),
    FetchStats,
    /// Blocking alert the user has to acknowledge.
    Alert(String),
    Navigate(Route),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Transition<S> {
    pub state: S,
    pub effect: Option<Effect>,
}

impl<S> Transition<S> {
    pub fn stay(state: S) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    pub fn with(state: S, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }

    pub fn navigate(state: S, route: Route) -> Self {
        Self::with(state, Effect::Navigate(route))
    }
}
