//! Build script for keydiff - locates a system DuckDB when the bundled copy is disabled

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DUCKDB_LIB_PATH");

    // The duckdb crate compiles and links its own copy
    if env::var_os("CARGO_FEATURE_BUNDLED").is_some() {
        return;
    }

    match find_duckdb_library() {
        Some(lib_path) => {
            println!("cargo:rustc-link-search=native={}", lib_path.display());
            println!("cargo:rustc-link-lib=duckdb");
            println!("cargo:warning=Using system DuckDB from: {}", lib_path.display());
        }
        None => {
            eprintln!("DuckDB library not found.");
            eprintln!();
            eprintln!("Either build with the bundled copy:");
            eprintln!("  cargo build --features bundled");
            eprintln!("or point the build at an installation:");
            eprintln!("  export DUCKDB_LIB_PATH=/path/to/duckdb/lib");
            panic!("DuckDB library not found");
        }
    }
}

fn find_duckdb_library() -> Option<PathBuf> {
    if let Ok(path) = env::var("DUCKDB_LIB_PATH") {
        let path = PathBuf::from(path);
        if has_duckdb_library(&path) {
            return Some(path);
        }
    }

    if let Some(path) = pkg_config_lib_dir() {
        return Some(path);
    }

    standard_paths().into_iter().find(|p| has_duckdb_library(p))
}

fn pkg_config_lib_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return None;
    }

    let output = Command::new("pkg-config")
        .args(["--libs-only-L", "duckdb"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .filter_map(|token| token.strip_prefix("-L"))
        .map(PathBuf::from)
        .find(|p| has_duckdb_library(p))
}

fn standard_paths() -> Vec<PathBuf> {
    let candidates: &[&str] = if cfg!(target_os = "macos") {
        &["/opt/homebrew/lib", "/usr/local/lib", "/opt/local/lib"]
    } else if cfg!(target_os = "windows") {
        &["C:\\Program Files\\DuckDB\\lib", "C:\\duckdb\\lib"]
    } else {
        &["/usr/lib", "/usr/local/lib", "/usr/lib/x86_64-linux-gnu", "/usr/lib64"]
    };
    candidates.iter().map(PathBuf::from).collect()
}

fn has_duckdb_library(path: &Path) -> bool {
    let names: &[&str] = if cfg!(target_os = "windows") {
        &["duckdb.dll", "duckdb.lib"]
    } else if cfg!(target_os = "macos") {
        &["libduckdb.dylib", "libduckdb.a"]
    } else {
        &["libduckdb.so", "libduckdb.so.1", "libduckdb.a"]
    };
    names.iter().any(|name| path.join(name).exists())
}
