//! Auth types shared between the Disha API service and its clients.
//!
//! Provides JWT validation, cookie builders for the `auth_token` /
//! `admin_token` cookies, and bearer-token extraction.

pub mod bearer;
pub mod cookie;
pub mod token;
