pub mod args;
pub mod cert;
pub mod check;
pub mod config;
pub mod container;
pub mod errors;
pub mod expiry;
pub mod status;

#[cfg(test)]
mod testutil;
