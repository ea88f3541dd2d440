//! Pinning providers.

mod pinata;

pub use pinata::{PinataProvider, PinataProviderBuilder};
