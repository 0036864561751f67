//! Wrappers for the actions published under `actions/*`.

use ghflow_model::step_action;

step_action! {
    /// Checks out a repository into the workspace
    pub struct Checkout("actions/checkout@v4") {
        /// `owner/name` of the repository, defaults to the triggering one
        repository: String => "repository",
        /// Branch, tag or SHA to check out
        git_ref: String => "ref",
        /// Token used to fetch the repository
        token: String => "token",
        /// SSH key used to fetch the repository
        ssh_key: String => "ssh-key",
        /// Keep the token in the local git config
        persist_credentials: Option<bool> => "persist-credentials",
        /// Relative path under the workspace to check out into
        path: String => "path",
        /// Run `git clean -ffdx && git reset --hard HEAD` first
        clean: Option<bool> => "clean",
        /// Sparse checkout patterns
        sparse_checkout: Vec<String> => "sparse-checkout",
        /// Commits to fetch; `Some(0)` fetches all history
        fetch_depth: Option<u32> => "fetch-depth",
        /// Fetch tags even when `fetch-depth` is set
        fetch_tags: bool => "fetch-tags",
        /// Download Git LFS files
        lfs: bool => "lfs",
        /// `true` or `recursive`
        submodules: String => "submodules",
    }
}

step_action! {
    /// Caches dependencies and build outputs between runs
    pub struct Cache("actions/cache@v4") {
        /// Files, directories and globs to cache
        path: Vec<String> => "path",
        /// Key to save and restore with
        key: String => "key",
        /// Fallback key prefixes, in priority order
        restore_keys: Vec<String> => "restore-keys",
        /// Allow restoring a cache saved on another OS
        enable_cross_os_archive: bool => "enableCrossOsArchive",
        /// Fail the step when no cache entry is found
        fail_on_cache_miss: bool => "fail-on-cache-miss",
        /// Check for a cache entry without downloading it
        lookup_only: bool => "lookup-only",
    }
}

step_action! {
    /// Uploads files as a workflow artifact
    pub struct UploadArtifact("actions/upload-artifact@v4") {
        /// Artifact name
        name: String => "name",
        /// Files, directories and globs to upload
        path: String => "path",
        /// `warn`, `error` or `ignore`
        if_no_files_found: String => "if-no-files-found",
        /// Days to keep the artifact; unset keeps the repository default
        retention_days: u32 => "retention-days",
        /// Zlib level from 0 to 9; `Some(0)` disables compression
        compression_level: Option<u8> => "compression-level",
        /// Replace an existing artifact of the same name
        overwrite: bool => "overwrite",
        /// Include files starting with `.`
        include_hidden_files: bool => "include-hidden-files",
    }
}

step_action! {
    /// Downloads artifacts uploaded earlier in the run
    pub struct DownloadArtifact("actions/download-artifact@v4") {
        /// Artifact to download, all artifacts when unset
        name: String => "name",
        /// Destination directory
        path: String => "path",
        /// Glob of artifact names to download
        pattern: String => "pattern",
        /// Extract every matching artifact into the same directory
        merge_multiple: bool => "merge-multiple",
        /// Token for downloading from another repository or run
        github_token: String => "github-token",
        /// Repository the artifacts belong to
        repository: String => "repository",
        /// Run the artifacts belong to
        run_id: String => "run-id",
    }
}

step_action! {
    /// Installs Node.js
    pub struct SetupNode("actions/setup-node@v4") {
        /// Version range, e.g. `20` or `lts/*`
        node_version: String => "node-version",
        /// File holding the version, e.g. `.nvmrc`
        node_version_file: String => "node-version-file",
        /// `npm`, `yarn` or `pnpm`
        cache: String => "cache",
        /// Lock files used for the cache key
        cache_dependency_path: Vec<String> => "cache-dependency-path",
        /// Registry to authenticate against
        registry_url: String => "registry-url",
        /// Always resolve the latest matching version
        check_latest: bool => "check-latest",
    }
}

step_action! {
    /// Installs Python
    pub struct SetupPython("actions/setup-python@v5") {
        /// Version range, e.g. `3.12`
        python_version: String => "python-version",
        /// File holding the version
        python_version_file: String => "python-version-file",
        /// `pip`, `pipenv` or `poetry`
        cache: String => "cache",
        /// Target architecture
        architecture: String => "architecture",
        /// Always resolve the latest matching version
        check_latest: bool => "check-latest",
    }
}

step_action! {
    /// Installs Go
    pub struct SetupGo("actions/setup-go@v5") {
        /// Version range, e.g. `1.22`
        go_version: String => "go-version",
        /// File holding the version, usually `go.mod`
        go_version_file: String => "go-version-file",
        /// Cache modules and build outputs
        cache: Option<bool> => "cache",
        /// Files used for the cache key
        cache_dependency_path: Vec<String> => "cache-dependency-path",
        /// Always resolve the latest matching version
        check_latest: bool => "check-latest",
    }
}

step_action! {
    /// Installs a Java development kit
    pub struct SetupJava("actions/setup-java@v4") {
        /// JDK distribution, e.g. `temurin`
        distribution: String => "distribution",
        /// Version range, e.g. `21`
        java_version: String => "java-version",
        /// `jdk`, `jre` or `jdk+fx`
        java_package: String => "java-package",
        /// `maven`, `gradle` or `sbt`
        cache: String => "cache",
    }
}

step_action! {
    /// Runs a script against the GitHub API client
    pub struct GithubScript("actions/github-script@v7") {
        /// Script body
        script: String => "script",
        /// Token for the API client
        github_token: String => "github-token",
        /// `json` or `string`
        result_encoding: String => "result-encoding",
        /// Retries for failed requests
        retries: u32 => "retries",
    }
}

step_action! {
    /// Configures GitHub Pages and exposes its metadata
    pub struct ConfigurePages("actions/configure-pages@v5") {
        /// Static site generator to configure
        static_site_generator: String => "static_site_generator",
        /// Enable Pages for the repository when it is not yet
        enablement: bool => "enablement",
    }
}

step_action! {
    /// Packages a directory for GitHub Pages
    pub struct UploadPagesArtifact("actions/upload-pages-artifact@v3") {
        /// Artifact name
        name: String => "name",
        /// Directory with the site content
        path: String => "path",
        /// Days to keep the artifact
        retention_days: u32 => "retention-days",
    }
}

step_action! {
    /// Deploys an uploaded Pages artifact
    pub struct DeployPages("actions/deploy-pages@v4") {
        /// Artifact to deploy
        artifact_name: String => "artifact_name",
        /// Deploy as a pull request preview
        preview: bool => "preview",
    }
}
