mod bill;
mod session;

pub use bill::{Bill, BillStatus, EXPENSE_TYPES};
pub use session::{Session, UserType};
