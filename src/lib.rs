//! Passwordless sign-in readiness for Microsoft Entra ID users
//!
//! Reads a user's registered authentication methods from Microsoft Graph,
//! scores how close the user is to signing in without a password, and
//! recommends the next registration steps.

pub mod cmd;
pub mod config;
pub mod error;
pub mod graph;
pub mod readiness;
pub mod server;
pub mod service;
