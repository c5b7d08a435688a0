//! Unit tests for the expense context.

mod policy_tests;
mod support;
