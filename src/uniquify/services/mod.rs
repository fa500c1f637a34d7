mod batch_loader;
mod identity_assigner;
mod resolver;

pub use batch_loader::{BatchLoader, BatchReport};
pub use identity_assigner::{IdentityAssigner, Identify};
pub use resolver::{ResolveStats, Resolution, Resolver};
