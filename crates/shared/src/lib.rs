//! Wire types shared between the link directory core and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
