use crate::domain::model::{AdminStats, EmployeeLookup, FormSettings, RegisterRequest, Registration};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn health_timeout(&self) -> Duration;
    /// `None` leaves the transport's own defaults in place.
    fn request_timeout(&self) -> Option<Duration>;
    fn form_settings(&self) -> FormSettings;
}

/// The remote registration service.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn health(&self) -> Result<()>;
    async fn check_employee(&self, emp_id: &str) -> Result<EmployeeLookup>;
    async fn register(&self, request: &RegisterRequest) -> Result<Registration>;
    async fn admin_login(&self, password: &str) -> Result<()>;
    async fn admin_stats(&self) -> Result<AdminStats>;
}
