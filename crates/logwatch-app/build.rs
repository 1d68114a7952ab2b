//! Exposes the workspace `VERSION` file as `LOGWATCH_VERSION`.

use std::fs;
use std::path::Path;

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let workspace_root = Path::new(&manifest_dir)
        .ancestors()
        .nth(2)
        .expect("crate lives under <root>/crates/");
    let version_file = workspace_root.join("VERSION");
    println!("cargo:rerun-if-changed={}", version_file.display());

    let contents = fs::read_to_string(&version_file)
        .unwrap_or_else(|error| panic!("cannot read {}: {error}", version_file.display()));
    let version = contents.trim();
    assert!(
        !version.is_empty() && version.split('.').all(|part| !part.is_empty()),
        "VERSION must hold a dotted version string, got {version:?}"
    );

    println!("cargo:rustc-env=LOGWATCH_VERSION={version}");
}
