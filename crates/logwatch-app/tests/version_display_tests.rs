//! Integration tests for VERSION propagation into runtime display.

use std::fs;

use logwatch_app::{app_version, render_banner};
use logwatch_core::RetrievalMode;
use url::Url;

#[test]
fn version_display_tests_matches_root_version_file() {
    let root_version_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../VERSION");
    let root_version = fs::read_to_string(root_version_path).expect("VERSION should be readable");
    assert_eq!(app_version(), root_version.trim());
}

#[test]
fn version_display_tests_banner_names_version_and_endpoint() {
    let endpoint = Url::parse("http://127.0.0.1:8000/api/analyze").expect("valid url");
    let banner = render_banner(&endpoint, RetrievalMode::Hybrid);
    assert!(banner.starts_with(&format!("logwatch {}", app_version())));
    assert!(banner.contains("endpoint http://127.0.0.1:8000/api/analyze"));
    assert!(banner.contains("mode hybrid"));
}
