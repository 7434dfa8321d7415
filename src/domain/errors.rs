use std::fmt;

use thiserror::Error;

/// Sub-step of the four-table write that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep {
    InsertOrder,
    InsertPayment,
    InsertItems,
    InsertDelivery,
    Commit,
}

impl fmt::Display for WriteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            WriteStep::InsertOrder => "insert order",
            WriteStep::InsertPayment => "insert payment",
            WriteStep::InsertItems => "insert items",
            WriteStep::InsertDelivery => "insert delivery",
            WriteStep::Commit => "commit transaction",
        };
        f.write_str(step)
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order {0} already exists")]
    AlreadyExists(String),
    #[error("Failed to {step}: {message}")]
    Write { step: WriteStep, message: String },
    #[error("Order {order_uid} has no {part} row")]
    Integrity { order_uid: String, part: &'static str },
    #[error("Internal error: {0}")]
    Internal(String),
}
