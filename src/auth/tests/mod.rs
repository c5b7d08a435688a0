//! Unit tests for the sign-on gateway.
