//! Unit tests for the permission oracle.
