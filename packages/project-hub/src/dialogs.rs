//! Modal dialogs for Project Hub

pub mod project;
