use crate::core::navigation::{AdminGrant, Effect, Route, Transition};
use crate::domain::model::{AdminStats, Failure};

pub const STATS_FAILED: &str = "Failed to fetch stats";
pub const STATS_NETWORK_ERROR: &str = "Network error. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Retry,
    Logout,
    StatsLoaded(Result<AdminStats, Failure>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    loading: bool,
    error: Option<String>,
    stats: Option<AdminStats>,
}

impl DashboardState {
    /// Entering the dashboard consumes the grant and always fetches fresh stats.
    pub fn mount(_grant: AdminGrant) -> Transition<DashboardState> {
        let state = Self {
            loading: true,
            error: None,
            stats: None,
        };
        Transition::with(state, Effect::FetchStats)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> Option<&AdminStats> {
        self.stats.as_ref()
    }

    pub fn reduce(&self, event: DashboardEvent) -> Transition<DashboardState> {
        let mut next = self.clone();
        match event {
            DashboardEvent::Retry if self.loading => Transition::stay(next),
            DashboardEvent::Retry => {
                next.loading = true;
                next.error = None;
                Transition::with(next, Effect::FetchStats)
            }
            DashboardEvent::Logout => Transition::navigate(next, Route::Welcome),
            DashboardEvent::StatsLoaded(Ok(stats)) => {
                next.loading = false;
                next.stats = Some(stats);
                Transition::stay(next)
            }
            DashboardEvent::StatsLoaded(Err(failure)) => {
                next.loading = false;
                next.error = Some(match failure {
                    Failure::Unreachable => STATS_NETWORK_ERROR.to_string(),
                    rejected => rejected.message_or(STATS_FAILED),
                });
                Transition::stay(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CompanyStats;

    fn sample_stats() -> AdminStats {
        AdminStats {
            total_participants: 7,
            total_registered: 3,
            per_company: vec![CompanyStats {
                company: "Acme".to_string(),
                registered: 3,
                participants: 7,
            }],
        }
    }

    #[test]
    fn test_mount_fetches_stats() {
        let transition = DashboardState::mount(AdminGrant::issue());
        assert!(transition.state.is_loading());
        assert_eq!(transition.effect, Some(Effect::FetchStats));
    }

    #[test]
    fn test_stats_loaded() {
        let state = DashboardState::mount(AdminGrant::issue()).state;
        let loaded = state.reduce(DashboardEvent::StatsLoaded(Ok(sample_stats())));
        assert!(!loaded.state.is_loading());
        assert_eq!(loaded.state.stats(), Some(&sample_stats()));
        assert_eq!(loaded.state.error(), None);
    }

    #[test]
    fn test_failure_then_retry() {
        let state = DashboardState::mount(AdminGrant::issue()).state;
        let failed = state
            .reduce(DashboardEvent::StatsLoaded(Err(Failure::Rejected {
                message: None,
            })))
            .state;
        assert_eq!(failed.error(), Some(STATS_FAILED));

        let retried = failed.reduce(DashboardEvent::Retry);
        assert_eq!(retried.effect, Some(Effect::FetchStats));
        assert_eq!(retried.state.error(), None);

        let unreachable = retried
            .state
            .reduce(DashboardEvent::StatsLoaded(Err(Failure::Unreachable)));
        assert_eq!(unreachable.state.error(), Some(STATS_NETWORK_ERROR));
    }

    #[test]
    fn test_retry_while_loading_is_ignored() {
        let state = DashboardState::mount(AdminGrant::issue()).state;
        assert_eq!(state.reduce(DashboardEvent::Retry).effect, None);
    }

    #[test]
    fn test_logout_goes_home_without_request() {
        let state = DashboardState::mount(AdminGrant::issue()).state;
        assert_eq!(
            state.reduce(DashboardEvent::Logout).effect,
            Some(Effect::Navigate(Route::Welcome))
        );
    }
}
