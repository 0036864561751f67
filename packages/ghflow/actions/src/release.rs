//! Wrappers for publishing releases, sites, pull requests and coverage.

use ghflow_model::step_action;

step_action! {
    /// Creates or updates a GitHub release
    pub struct GhRelease("softprops/action-gh-release@v2") {
        /// Release body
        body: String => "body",
        /// File to read the body from
        body_path: String => "body_path",
        /// Release name, defaults to the tag
        name: String => "name",
        /// Tag to release, defaults to the pushed tag
        tag_name: String => "tag_name",
        /// Create the release as a draft
        draft: bool => "draft",
        /// Mark the release as a prerelease
        prerelease: bool => "prerelease",
        /// Assets to upload, one glob per line
        files: Vec<String> => "files",
        /// Fail when an asset glob matches nothing
        fail_on_unmatched_files: bool => "fail_on_unmatched_files",
        /// Let GitHub generate the release notes
        generate_release_notes: bool => "generate_release_notes",
        /// `true`, `false` or `legacy`
        make_latest: String => "make_latest",
        /// Token with `contents: write`
        token: String => "token",
    }
}

step_action! {
    /// Publishes a directory to a GitHub Pages branch
    pub struct GhPages("peaceiris/actions-gh-pages@v4") {
        /// Token of the workflow run
        github_token: String => "github_token",
        /// Deploy key for another repository
        deploy_key: String => "deploy_key",
        /// Branch to publish to
        publish_branch: String => "publish_branch",
        /// Directory to publish
        publish_dir: String => "publish_dir",
        /// Subdirectory of the branch to publish into
        destination_dir: String => "destination_dir",
        /// Custom domain written to `CNAME`
        cname: String => "cname",
        /// Keep existing files on the branch
        keep_files: bool => "keep_files",
        /// Replace the branch history with a single commit
        force_orphan: bool => "force_orphan",
    }
}

step_action! {
    /// Commits workspace changes and opens a pull request
    pub struct CreatePullRequest("peter-evans/create-pull-request@v7") {
        /// Token with `contents` and `pull-requests` write access
        token: String => "token",
        /// Commit message
        commit_message: String => "commit-message",
        /// Pull request branch
        branch: String => "branch",
        /// Pull request base, defaults to the checked out branch
        base: String => "base",
        /// Pull request title
        title: String => "title",
        /// Pull request body
        body: String => "body",
        /// Labels, one per line
        labels: Vec<String> => "labels",
        /// Reviewers, one per line
        reviewers: Vec<String> => "reviewers",
        /// Open the pull request as a draft
        draft: bool => "draft",
        /// Delete the branch once it no longer differs from base
        delete_branch: bool => "delete-branch",
    }
}

step_action! {
    /// Uploads coverage reports to Codecov
    pub struct Codecov("codecov/codecov-action@v5") {
        /// Upload token
        token: String => "token",
        /// Report files, comma separated
        files: String => "files",
        /// Flags to tag the upload with
        flags: String => "flags",
        /// Upload name
        name: String => "name",
        /// Fail the step when the upload fails
        fail_ci_if_error: bool => "fail_ci_if_error",
        /// Verbose uploader output
        verbose: bool => "verbose",
    }
}
