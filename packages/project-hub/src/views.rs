//! Screens of the Project Hub client

pub mod home;
