mod customer;
mod feedback;
mod loan;
mod staff;
mod transaction;

pub use customer::Customer;
pub use feedback::Feedback;
pub use loan::Loan;
pub use staff::{Employee, Official};
pub use transaction::{Transaction, TIMESTAMP_LEN};

/// Unique customer identifier
pub type CustomerId = u32;

/// Unique staff identifier, shared by employees, managers and admins
pub type EmployeeId = u32;
