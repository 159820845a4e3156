pub mod app;
pub mod confirmation;
pub mod dashboard;
pub mod form;
pub mod input;
pub mod navigation;
pub mod welcome;

pub use crate::domain::model::{
    AdminStats, CompanyStats, EmployeeLookup, Failure, FormMode, FormSettings, RegisterRequest,
    Registration, RegistrationDraft, RegistrationResult,
};
pub use crate::domain::ports::{ConfigProvider, RegistrationApi};
pub use crate::utils::error::Result;
