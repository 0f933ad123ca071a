//! Build script for the storefront crate.
//!
//! Fingerprints `static/css/main.css` so the stylesheet URL changes whenever
//! its content does.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Hex characters of the SHA-256 digest kept in the file name.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").map_or_else(|_| PathBuf::from("."), PathBuf::from);
    fingerprint_css(&manifest_dir);
}

/// Copy main.css to `static/css/derived/main.<hash>.css` and export the hash
/// as `CSS_HASH` for `env!("CSS_HASH")`.
fn fingerprint_css(manifest_dir: &Path) {
    let css_dir = manifest_dir.join("static/css");
    let source = css_dir.join("main.css");
    println!("cargo:rerun-if-changed={}", source.display());

    let content = match fs::read(&source) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", source.display());
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let hash = digest.get(..HASH_LEN).unwrap_or(&digest);
    println!("cargo:rustc-env=CSS_HASH={hash}");

    let derived_dir = css_dir.join("derived");
    if let Err(e) = fs::create_dir_all(&derived_dir) {
        println!("cargo:warning=Could not create {}: {e}", derived_dir.display());
        return;
    }

    remove_stale(&derived_dir, hash);

    let target = derived_dir.join(format!("main.{hash}.css"));
    if let Err(e) = fs::write(&target, &content) {
        println!("cargo:warning=Could not write {}: {e}", target.display());
    }
}

/// Delete fingerprinted copies left over from earlier builds.
fn remove_stale(derived_dir: &Path, current_hash: &str) {
    let Ok(entries) = fs::read_dir(derived_dir) else {
        return;
    };
    let current = format!("main.{current_hash}.css");
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("main.") && name.ends_with(".css") && name != current {
            let _ = fs::remove_file(entry.path());
        }
    }
}
