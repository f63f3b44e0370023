#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod task_store;

pub use planner_core::Clock;

pub use app_services::{AppServices, SeedReport};
pub use auth_service::{AuthService, AuthStatus, RegistrationDraft};
pub use error::{AppServicesError, AuthError, TaskStoreError};
pub use task_store::TaskStore;
