//! tally-api: typed HTTP gateway to the tally server.

pub mod client;
pub mod wire;

pub use client::{ApiClient, RegisterForm};
pub use wire::{LoginResponse, RegisterResponse, UserProfile};
