use crate::model::CustomerId;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Unknown customer: {0}")]
    UnknownSubject(CustomerId),

    #[error("Customer id {customer_id} or account {account_number} already registered")]
    DuplicateCustomer {
        customer_id: CustomerId,
        account_number: u32,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
