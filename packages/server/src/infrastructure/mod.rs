//! Infrastructure layer: in-memory stores, the local broadcast gateway and
//! wire DTOs.

pub mod dto;
pub mod gateway;
pub mod repository;
