#[macro_use]
mod macros;

pub mod config;

pub mod driver;
pub use driver::Driver;

mod error;
pub use error::{Error, IntoError};

pub mod model;
pub use model::{Descriptor, Identity, Mapper, Model, WriteResult};

pub mod stmt;
pub use stmt::{normalize, Record, Value};

/// A Result type alias that uses Strata's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
