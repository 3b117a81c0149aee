pub mod admin;
pub mod otp;
pub mod profile;
pub mod token;
