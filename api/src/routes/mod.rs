//! Route handlers
//!
//! - `email` - issuing and verifying one-time passcodes
//! - `users` - email confirmation and password reset for registered users

pub mod email;
pub mod users;
