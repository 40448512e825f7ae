pub mod dispatcher;
pub mod helm;
pub mod kubectl;
pub mod manifest;

pub use crate::domain::model::{CommandOutput, DeploySpec, Invocation};
pub use crate::domain::ports::{CommandRunner, Storage};
pub use crate::utils::error::Result;
