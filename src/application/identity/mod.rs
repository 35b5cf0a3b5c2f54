//! Identity: staff accounts, authentication and one-time login codes

pub mod otp;
pub mod service;

pub use otp::OtpStore;
pub use service::{AuthResult, LoginOutcome, NewStaff, StaffService, StaffUpdate};
