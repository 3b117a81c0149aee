//! sea-orm entities for the Disha API database.

pub mod admins;
pub mod otps;
pub mod users;
