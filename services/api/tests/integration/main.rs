mod admin_test;
mod helpers;
mod otp_test;
mod profile_test;
mod token_test;
