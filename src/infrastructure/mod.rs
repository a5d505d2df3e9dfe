//! Infrastructure layer - Store and service implementations

pub mod account;
pub mod logging;
pub mod storage;
