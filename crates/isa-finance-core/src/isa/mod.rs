pub mod projection;
pub mod quote;
pub mod repayment;
