pub mod config;
pub mod dashboard;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod reconcile;
pub mod routing;
pub mod services;
pub mod session;
