pub mod config;

pub use config::{AmbiguityPolicy, ClassifierConfig};
