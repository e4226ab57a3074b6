pub mod location;
pub mod user;

// Re-export all models for easy importing
pub use location::*;
pub use user::*;
