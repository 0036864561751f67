//! Wrappers for installing and caching Rust toolchains.

use ghflow_model::step_action;

step_action! {
    /// Installs a Rust toolchain with `rustup`
    pub struct Toolchain("dtolnay/rust-toolchain@master") {
        /// Channel, version or dated nightly, e.g. `stable` or `1.80.0`
        toolchain: String => "toolchain",
        /// Extra targets, comma separated
        targets: String => "targets",
        /// Extra components, comma separated, e.g. `clippy, rustfmt`
        components: String => "components",
    }
}

impl Toolchain {
    /// The `stable` channel
    #[must_use]
    pub fn stable() -> Self {
        Self::new().toolchain("stable")
    }

    /// The `beta` channel
    #[must_use]
    pub fn beta() -> Self {
        Self::new().toolchain("beta")
    }

    /// The `nightly` channel
    #[must_use]
    pub fn nightly() -> Self {
        Self::new().toolchain("nightly")
    }
}

step_action! {
    /// Caches `~/.cargo` and `target/` keyed on the lock file and toolchain
    pub struct RustCache("Swatinem/rust-cache@v2") {
        /// Extra key prefix
        prefix_key: String => "prefix-key",
        /// Extra key shared between jobs
        shared_key: String => "shared-key",
        /// Extra key differentiating this job
        key: String => "key",
        /// Environment variable prefixes that affect the key
        env_vars: String => "env-vars",
        /// `workspace -> target` pairs, one per line
        workspaces: Vec<String> => "workspaces",
        /// Extra directories to cache
        cache_directories: Vec<String> => "cache-directories",
        /// Cache even when the job fails
        cache_on_failure: bool => "cache-on-failure",
        /// Cache every crate, not only dependencies
        cache_all_crates: bool => "cache-all-crates",
        /// Save the cache at the end of the job
        save_if: String => "save-if",
    }
}

step_action! {
    /// Installs prebuilt binaries of development tools
    pub struct InstallAction("taiki-e/install-action@v2") {
        /// Tools to install, comma separated, e.g. `cargo-nextest,cargo-hack`
        tool: String => "tool",
        /// Verify checksums of downloaded archives
        checksum: Option<bool> => "checksum",
        /// Fall back to `cargo-binstall` for unknown tools
        fallback: String => "fallback",
    }
}
