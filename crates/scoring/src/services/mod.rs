pub mod details;
pub mod gating;
pub mod schedule;
pub mod scoring;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures;
