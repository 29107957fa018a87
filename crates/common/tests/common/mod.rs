//! Shared test utilities for filesystem integration tests
#![allow(dead_code)]

use ::common::fs::{AccessPolicy, Filesystem, DEFAULT_ADMIN};
use tracing_subscriber::EnvFilter;

pub const ADMIN: &str = DEFAULT_ADMIN;
pub const JOAO: &str = "joao";
pub const MARIA: &str = "maria";

/// Install a test subscriber once; respects RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Set up a fresh filesystem with the default admin
pub fn setup_test_fs() -> Filesystem {
    init_tracing();
    Filesystem::with_policy(AccessPolicy::with_admins([ADMIN]))
}

/// Set up the project layout used by the reference scenario:
/// `/root/projetos` holding two admin-owned files.
pub fn setup_projects() -> Filesystem {
    let mut fs = setup_test_fs();
    fs.create_directory("/root/projetos").unwrap();
    fs.create_file("/root/projetos/projeto1.txt", "documentação inicial", ADMIN)
        .unwrap();
    fs.create_file("/root/projetos/projeto2.txt", "progresso", ADMIN)
        .unwrap();
    fs
}
