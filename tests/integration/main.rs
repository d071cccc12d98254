//! Integration tests for Ripple-Count
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! fetcher and the crawl engine end-to-end.

mod crawl_tests;
mod fetcher_tests;
