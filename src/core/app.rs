use crate::core::confirmation::{Confirmation, ConfirmationEvent};
use crate::core::dashboard::{DashboardEvent, DashboardState};
use crate::core::form::{FormEvent, FormState};
use crate::core::navigation::{Effect, Route, Transition};
use crate::core::welcome::{WelcomeEvent, WelcomeState};
use crate::domain::model::{Failure, FormSettings};
use crate::domain::ports::RegistrationApi;
use crate::utils::error::RegistrationError;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Welcome(WelcomeState),
    Register(FormState),
    ThankYou(Confirmation),
    NetworkError,
    AdminDashboard(DashboardState),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Welcome(_) => "welcome",
            Screen::Register(_) => "register",
            Screen::ThankYou(_) => "thank-you",
            Screen::NetworkError => "network-error",
            Screen::AdminDashboard(_) => "admin-dashboard",
        }
    }
}

/// User input, addressed to the screen it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Welcome(WelcomeEvent),
    Form(FormEvent),
    Confirmation(ConfirmationEvent),
    TryAgain,
    Dashboard(DashboardEvent),
}

/// Drives the screen flow: reduces events on the current screen and performs
/// the requested effects one at a time against the registration service.
pub struct RegistrationApp<A: RegistrationApi> {
    api: A,
    settings: FormSettings,
    screen: Screen,
    alerts: VecDeque<String>,
}

impl<A: RegistrationApi> RegistrationApp<A> {
    pub fn new(api: A, settings: FormSettings) -> Self {
        Self {
            api,
            settings,
            screen: Screen::Welcome(WelcomeState::default()),
            alerts: VecDeque::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Blocking alerts raised since the last call, oldest first.
    pub fn take_alerts(&mut self) -> Vec<String> {
        self.alerts.drain(..).collect()
    }

    /// Handles one user event to completion. Network calls run sequentially;
    /// their failures end up in screen state or alerts, never in the caller.
    pub async fn dispatch(&mut self, event: AppEvent) {
        let mut pending = self.apply(event);
        while let Some(effect) = pending.take() {
            pending = self.perform(effect).await;
        }
    }

    fn apply(&mut self, event: AppEvent) -> Option<Effect> {
        let current = std::mem::replace(&mut self.screen, Screen::NetworkError);
        let (screen, effect) = match (current, event) {
            (Screen::Welcome(state), AppEvent::Welcome(event)) => {
                let Transition { state, effect } = state.reduce(event);
                (Screen::Welcome(state), effect)
            }
            (Screen::Register(state), AppEvent::Form(event)) => {
                let Transition { state, effect } = state.reduce(event);
                (Screen::Register(state), effect)
            }
            (Screen::ThankYou(state), AppEvent::Confirmation(event)) => {
                let Transition { state, effect } = state.reduce(event);
                (Screen::ThankYou(state), effect)
            }
            (Screen::NetworkError, AppEvent::TryAgain) => {
                (Screen::NetworkError, Some(Effect::Navigate(Route::Welcome)))
            }
            (Screen::AdminDashboard(state), AppEvent::Dashboard(event)) => {
                let Transition { state, effect } = state.reduce(event);
                (Screen::AdminDashboard(state), effect)
            }
            (screen, event) => {
                tracing::debug!("Ignoring {:?} on the {} screen", event, screen.name());
                (screen, None)
            }
        };
        self.screen = screen;
        effect
    }

    async fn perform(&mut self, effect: Effect) -> Option<Effect> {
        match effect {
            Effect::ProbeHealth => {
                let result = self.api.health().await.map_err(failure);
                self.apply(AppEvent::Welcome(WelcomeEvent::HealthChecked(result)))
            }
            Effect::CheckEmployee(emp_id) => {
                let result = self.api.check_employee(&emp_id).await.map_err(failure);
                self.apply(AppEvent::Form(FormEvent::LookupCompleted { emp_id, result }))
            }
            Effect::Register(request) => {
                let result = self.api.register(&request).await.map_err(failure);
                self.apply(AppEvent::Form(FormEvent::RegisterCompleted(result)))
            }
            Effect::AdminLogin(password) => {
                let result = self.api.admin_login(&password).await.map_err(failure);
                self.apply(AppEvent::Form(FormEvent::LoginCompleted(result)))
            }
            Effect::FetchStats => {
                let result = self.api.admin_stats().await.map_err(failure);
                self.apply(AppEvent::Dashboard(DashboardEvent::StatsLoaded(result)))
            }
            Effect::Alert(message) => {
                tracing::info!("Alert: {}", message);
                self.alerts.push_back(message);
                None
            }
            Effect::Navigate(route) => self.navigate(route),
        }
    }

    fn navigate(&mut self, route: Route) -> Option<Effect> {
        let (screen, effect) = match route {
            Route::Welcome => (Screen::Welcome(WelcomeState::default()), None),
            Route::Register => (Screen::Register(FormState::new(self.settings.clone())), None),
            Route::ThankYou(result) => (Screen::ThankYou(Confirmation::new(result)), None),
            Route::NetworkError => (Screen::NetworkError, None),
            Route::AdminDashboard(grant) => {
                let Transition { state, effect } = DashboardState::mount(grant);
                (Screen::AdminDashboard(state), effect)
            }
        };
        tracing::info!("Navigating {} -> {}", self.screen.name(), screen.name());
        self.screen = screen;
        effect
    }
}

fn failure(err: RegistrationError) -> Failure {
    tracing::warn!("Request failed: {} ({:?})", err, err.category());
    err.to_failure()
}
