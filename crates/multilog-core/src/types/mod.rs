//! Core types shared by the registry, destinations and file store
//!
//! This module contains the level mask, property maps and call-site types.

mod level;
mod properties;
mod event;

pub use level::LogLevel;
pub use properties::{
    Properties, MISSING_MESSAGE,
    merge_into, describe, compose_attributes, properties_from,
};
pub use event::{Location, EventError};
