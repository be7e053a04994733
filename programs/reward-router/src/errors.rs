use anchor_lang::prelude::*;

#[error_code]
pub enum RewardRouterError {
    #[msg("Payee list must be non-empty, unique and carry positive shares")]
    InvalidPayees,

    #[msg("Too many payees for one aggregator")]
    TooManyPayees,

    #[msg("Account is not a payee of this aggregator")]
    PayeeNotFound,

    #[msg("Account is not due payment")]
    NothingDue,

    #[msg("Asset transfer was rejected")]
    TransferFailed,

    #[msg("Transfer source is not owned by or delegated to the caller")]
    TransferNotAuthorized,

    #[msg("Insufficient token balance")]
    InsufficientBalance,

    #[msg("Asset does not match the release ledger or token account")]
    InvalidAsset,

    #[msg("Release ledger has not been opened for this asset")]
    LedgerNotOpen,

    #[msg("Aggregator is not the configured fee source")]
    InvalidAggregator,

    #[msg("Program is not the configured conversion router")]
    InvalidConversionRouter,

    #[msg("Pool is not opened for deposits")]
    PoolClosed,

    #[msg("Pool entry is paused")]
    EntryPaused,

    #[msg("Deposit is below the pool minimum entry")]
    BelowMinimum,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Operation would mint or burn zero shares")]
    ZeroShares,

    #[msg("Share balance too low")]
    InsufficientShares,

    #[msg("Boost must be between 1 and the maximum boost")]
    InvalidBoost,

    #[msg("Pool name too long")]
    PoolNameTooLong,

    #[msg("Pool is already linked into the registry")]
    PoolAlreadyLinked,

    #[msg("Pool is not linked into the registry")]
    PoolNotLinked,

    #[msg("Registry is full")]
    TooManyPools,

    #[msg("Pool accounts do not match the registry")]
    PoolAccountsMismatch,

    #[msg("Sum of supply times boost must be greater than zero")]
    NoEligibleWeight,

    #[msg("No pending distribution")]
    NothingPending,

    #[msg("Conversion router returned no base asset")]
    ConversionFailed,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Unauthorized authority for this operation")]
    Unauthorized,
}

/// Failure classes surfaced to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InputValidation,
    StateConflict,
    ConservationViolation,
    CollaboratorFailure,
}

impl RewardRouterError {
    pub fn kind(&self) -> ErrorKind {
        use RewardRouterError::*;
        match self {
            InvalidPayees | TooManyPayees | PayeeNotFound | InvalidAsset | InvalidAggregator
            | InvalidConversionRouter | BelowMinimum | ZeroAmount | ZeroShares | InvalidBoost
            | PoolNameTooLong | PoolAccountsMismatch | Unauthorized => ErrorKind::InputValidation,
            LedgerNotOpen | NothingDue | InsufficientBalance | PoolClosed | EntryPaused
            | InsufficientShares | PoolAlreadyLinked | PoolNotLinked | TooManyPools
            | NothingPending => {
                ErrorKind::StateConflict
            }
            NoEligibleWeight | MathOverflow => ErrorKind::ConservationViolation,
            TransferFailed | TransferNotAuthorized | ConversionFailed => {
                ErrorKind::CollaboratorFailure
            }
        }
    }
}
