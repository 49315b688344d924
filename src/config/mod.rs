//! Application configuration, loaded from environment variables once at
//! startup.
//!
//! - [`auth`]: password policy and admin bootstrap credentials
//! - [`database`]: PostgreSQL pool initialization and migrations
//! - [`jwt`]: token signing secret, issuer, audience, lifetimes
//!
//! Required variables are checked eagerly; a missing `JWT_SECRET`,
//! `JWT_ISSUER`, `JWT_AUDIENCE`, `ADMIN_EMAIL`, `ADMIN_PASSWORD`, or
//! `DATABASE_URL` is fatal and aborts startup.

pub mod auth;
pub mod database;
pub mod jwt;
