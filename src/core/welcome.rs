use crate::core::navigation::{Effect, Route, Transition};
use crate::domain::model::Failure;

#[derive(Debug, Clone, PartialEq)]
pub enum WelcomeEvent {
    Proceed,
    HealthChecked(Result<(), Failure>),
}

/// Entry screen; the registration form is only reachable through a
/// successful health probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WelcomeState {
    probing: bool,
}

impl WelcomeState {
    pub fn is_probing(&self) -> bool {
        self.probing
    }

    pub fn reduce(&self, event: WelcomeEvent) -> Transition<WelcomeState> {
        match event {
            WelcomeEvent::Proceed if self.probing => Transition::stay(self.clone()),
            WelcomeEvent::Proceed => Transition::with(Self { probing: true }, Effect::ProbeHealth),
            WelcomeEvent::HealthChecked(result) => {
                let route = match result {
                    Ok(()) => Route::Register,
                    Err(failure) => {
                        tracing::warn!("Health probe failed: {:?}", failure);
                        Route::NetworkError
                    }
                };
                Transition::navigate(Self { probing: false }, route)
            }
        }
    }
}
