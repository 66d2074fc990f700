pub mod errors;
pub mod order;
pub mod ports;
pub mod pricing;
pub mod rate_limit;
pub mod sanitize;
