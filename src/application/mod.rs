/// Application layer - Use cases and DTOs
///
/// Orchestrates the identity assigner, the resolver and the batch loader
/// and coordinates with infrastructure through ports.
pub mod dto;
pub mod use_cases;
