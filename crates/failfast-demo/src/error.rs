use thiserror::Error;

use crate::workflow::DemoError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("workflow failed")]
    Workflow(#[from] DemoError),

    #[error("failed to install log subscriber")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

pub type Result<T> = std::result::Result<T, CliError>;
