//! Door operation logic: deciding whether and how to kick the relay.

pub mod operator;
