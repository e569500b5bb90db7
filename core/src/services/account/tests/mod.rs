//! Tests for account service

mod service_tests;
