//! Command implementations

pub mod apply;
pub mod create;
pub mod inspect;
