//! Data Transfer Objects for REST request/response serialization.

pub mod submission_dto;

pub use submission_dto::*;
