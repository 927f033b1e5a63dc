//! Command implementations for typegraph

pub mod components;
pub mod dispatch;
pub mod path;
pub mod scope;
pub mod traverse;
