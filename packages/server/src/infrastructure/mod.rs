//! Infrastructure layer: concrete repositories and DTOs.

pub mod dto;
pub mod repository;
