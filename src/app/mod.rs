pub mod auth;
pub mod metrics;
pub mod preview;
pub mod reports;
pub mod triage;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;
