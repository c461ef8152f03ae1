//! Tests for the profile repository contract

mod mock_tests;
