//! Vocabulary shared by the trip board crates: domain records, update/sort/filter tags and the
//! persistence error envelope.

pub mod domain;
pub mod error;
pub mod protocol;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
