//! Pinning module.

mod provider;
pub mod providers;
mod types;

pub use provider::PinProvider;
pub use types::{upload_file_name, Gateway, PinnedFile, UPLOAD_FORMAT};
