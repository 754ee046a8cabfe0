//! External API clients

pub mod alpha_vantage;
pub mod news;
