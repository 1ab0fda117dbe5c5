//! Toy bank with checking and savings accounts driven by csv scripts

#![deny(missing_docs)]

pub mod account;
pub mod amount;
pub mod auth;
pub mod bank;
pub mod csv;
pub mod errors;
