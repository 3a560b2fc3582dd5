//! Run-profile parsing for CI and local test overrides.

pub mod property_test_profile;
