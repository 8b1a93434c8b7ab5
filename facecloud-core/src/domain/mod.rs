//! Domain types

pub mod stack;
