//! Scenario tests over the fixture models.

pub(crate) mod models;
