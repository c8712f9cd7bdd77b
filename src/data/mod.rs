//! Question bank file loading.

mod loader;

pub use loader::{load_bank, BankFile, LoadError};
