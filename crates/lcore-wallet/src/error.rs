use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("wallet pool size must be at least 1")]
    EmptyPool,
    #[error("could not generate {requested} distinct wallets after {attempts} attempts")]
    DuplicateKeys { requested: usize, attempts: usize },
}

/// The distribution plan cannot be satisfied by the given devices and wallets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanMismatchError {
    #[error("plan places {planned} devices but the catalog has {actual}")]
    DeviceCount { planned: usize, actual: usize },
    #[error("plan needs {needed} wallets but only {available} are available")]
    WalletShortfall { needed: usize, available: usize },
    #[error("plan bucket sizes must be at least 1")]
    ZeroBucket,
    #[error("plan totals do not fit in a device count")]
    Overflow,
}
