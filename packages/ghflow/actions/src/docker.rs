//! Wrappers for the actions published under `docker/*`.

use ghflow_model::step_action;

step_action! {
    /// Sets up Docker Buildx
    pub struct SetupBuildx("docker/setup-buildx-action@v3") {
        /// Buildx version
        version: String => "version",
        /// `docker-container`, `kubernetes` or `remote`
        driver: String => "driver",
        /// Driver options, one `key=value` per line
        driver_opts: Vec<String> => "driver-opts",
        /// Platforms the builder supports
        platforms: String => "platforms",
        /// Make this builder the default one
        install: bool => "install",
    }
}

step_action! {
    /// Installs QEMU static binaries for multi-platform builds
    pub struct SetupQemu("docker/setup-qemu-action@v3") {
        /// binfmt image
        image: String => "image",
        /// Platforms to install, e.g. `arm64,riscv64`
        platforms: String => "platforms",
    }
}

step_action! {
    /// Logs in to a container registry
    pub struct Login("docker/login-action@v3") {
        /// Registry host, Docker Hub when unset
        registry: String => "registry",
        /// Registry user name
        username: String => "username",
        /// Registry password or token
        password: String => "password",
        /// Log out at the end of the job
        logout: Option<bool> => "logout",
    }
}

step_action! {
    /// Builds and pushes an image with Buildx
    pub struct BuildPush("docker/build-push-action@v6") {
        /// Build context path or URL
        context: String => "context",
        /// Path to the Dockerfile
        file: String => "file",
        /// Target platforms, comma separated
        platforms: String => "platforms",
        /// Image tags, one per line
        tags: Vec<String> => "tags",
        /// Image labels, one per line
        labels: Vec<String> => "labels",
        /// Build arguments, one `KEY=value` per line
        build_args: Vec<String> => "build-args",
        /// Build stage to target
        target: String => "target",
        /// Push the built image
        push: bool => "push",
        /// Load the built image into the local daemon
        load: bool => "load",
        /// External cache sources, one per line
        cache_from: Vec<String> => "cache-from",
        /// Cache export destinations, one per line
        cache_to: Vec<String> => "cache-to",
    }
}

step_action! {
    /// Derives tags and labels from git refs and events
    pub struct Metadata("docker/metadata-action@v5") {
        /// Base image names, one per line
        images: Vec<String> => "images",
        /// Tag rules, one per line
        tags: Vec<String> => "tags",
        /// `latest` tag behaviour
        flavor: Vec<String> => "flavor",
        /// Extra labels, one per line
        labels: Vec<String> => "labels",
    }
}
