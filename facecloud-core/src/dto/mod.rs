//! Data Transfer Objects for the HTTP service
//!
//! Bodies returned by the face segmentation API and consumed by the client.

pub mod colour;
pub mod error;
