use thiserror::Error;

/// Programmer-misuse faults. These are raised to the caller immediately;
/// nothing here is retried or swallowed. Soft hook failures are not errors —
/// they are the `false` sentinel on `spawn`/`build`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("render queue `{0}` already exists")]
    QueueExists(String),

    #[error("render queue `{0}` does not exist")]
    UnknownQueue(String),

    #[error("already watching visibility")]
    AlreadyWatchingVisibility,

    #[error("must be watching visibility")]
    NotWatchingVisibility,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
