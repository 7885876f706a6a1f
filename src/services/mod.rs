//! Business logic services.

pub mod dashboard;
pub mod owner;
pub mod pet;
pub mod vet;
pub mod visit;
