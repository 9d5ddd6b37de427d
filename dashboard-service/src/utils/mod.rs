//! Pure helpers shared by the data access layer.

pub mod currency;
pub mod search;
