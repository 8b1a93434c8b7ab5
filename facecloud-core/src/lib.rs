//! Facecloud Core
//!
//! Core types shared by the face segmentation service and its deployment tooling.
//!
//! This crate contains:
//! - Domain types: stack settings and the outputs of a rendered deployment
//! - DTOs: request/response bodies exchanged with the HTTP service

pub mod domain;
pub mod dto;
