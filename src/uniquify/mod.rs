/// Report deduplication core: the record model, the node view over a parsed
/// report, and the services that resolve reports against a store.
pub mod domain;
pub mod services;
