pub mod appointment;
pub mod auth;
pub mod doctor;
pub mod medical_record;
pub mod patient;
