//! Command implementations for the bundle installer CLI

pub mod install;
