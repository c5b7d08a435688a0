//! Unit tests for member profiles.
