//! Contact directory, read-only threads and the message draft.

pub mod directory;
pub mod draft;
pub mod store;

pub use directory::ContactDirectory;
pub use draft::Draft;
pub use store::MessageStore;
