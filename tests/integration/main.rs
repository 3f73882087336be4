//! Integration tests for doccrawl
//!
//! `crawl_tests` drives the coordinator with an in-memory fetcher;
//! `http_tests` runs it against a wiremock server.

mod crawl_tests;
