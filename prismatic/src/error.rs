//! Error types for Prismatic

use thiserror::Error;

use crate::world::ObjectId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrismaticError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Unknown object: {0}")]
    UnknownObject(ObjectId),
}

pub type Result<T> = std::result::Result<T, PrismaticError>;
