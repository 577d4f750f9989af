pub(crate) mod bills;
pub(crate) mod new_bill;
