pub mod assets_model;

pub use assets_model::{derive_native_currency, Asset};
