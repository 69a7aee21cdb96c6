//! End-to-end tests for the packaging pipeline against real git repositories.

mod common;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use packer::config::InstallerConfig;
use packer::{ArchiveBackend, PackStage, Packer, PackerConfig, PackerError, PackageSource};

use common::*;

fn packer_for(repo: &GitRepo, out: &Path) -> Packer {
    Packer::builder(PackageSource::new(repo.locator()))
        .output_dir(out)
        .build()
        .unwrap()
}

/// Installer running a shell script with `$VENDOR` set to the vendor dir
fn script_installer(script: &str) -> InstallerConfig {
    let mut env = BTreeMap::new();
    env.insert("VENDOR".to_string(), "{vendor_dir}".to_string());
    InstallerConfig {
        name: "script".to_string(),
        program: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        env,
        ..InstallerConfig::default()
    }
}

#[test]
fn pack_without_manifest_archives_checkout() {
    require_git!();
    let repo = GitRepo::with_files(&[("README", "hello"), ("lib/widget.rb", "class Widget; end")]);
    let out = tempfile::tempdir().unwrap();
    let mut packer = packer_for(&repo, out.path());

    let artifact = packer.pack(None).unwrap();

    let expected = out
        .path()
        .join(format!("widget-{}.tar.gz", repo.short("HEAD")));
    assert_eq!(artifact.path(), expected);
    assert_archived!(artifact.path(), "README");
    assert_archived!(artifact.path(), "lib/widget.rb");
    assert_not_archived!(artifact.path(), ".git");
    assert_not_archived!(artifact.path(), "vendor");
    assert_eq!(
        archive_file(artifact.path(), "README").as_deref(),
        Some("hello")
    );

    assert_eq!(packer.stage(), PackStage::Cleaned);
    assert!(!packer.current_workdir().unwrap().exists());
}

#[test]
fn pinned_revision_is_packaged() {
    require_git!();
    let repo = GitRepo::new();
    repo.write("VERSION", "1");
    repo.commit("first");
    repo.tag("v1");
    repo.write("VERSION", "2");
    repo.commit("second");
    let out = tempfile::tempdir().unwrap();

    let mut packer = Packer::builder(PackageSource::new(repo.locator()).with_revision("v1"))
        .output_dir(out.path())
        .build()
        .unwrap();

    let version = packer.version().unwrap();
    let artifact = packer.pack(None).unwrap();

    assert_eq!(version, repo.short("v1"));
    assert_ne!(version, repo.short("HEAD"));
    assert_eq!(archive_file(artifact.path(), "VERSION").as_deref(), Some("1"));
}

#[test]
fn explicit_output_path_is_used() {
    require_git!();
    let repo = GitRepo::with_files(&[("README", "hello")]);
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("nested").join("custom.tar.gz");
    let mut packer = packer_for(&repo, out.path());

    let artifact = packer.pack(Some(&output)).unwrap();

    assert_eq!(artifact.path(), output);
    assert!(output.is_file());
    assert_eq!(artifact.size(), fs::metadata(&output).unwrap().len());
    assert_eq!(packer.stage(), PackStage::Cleaned);
    assert_eq!(packer.identity().unwrap().version, repo.short("HEAD"));
}

#[test]
fn fetch_twice_and_version_twice_are_stable() {
    require_git!();
    let repo = GitRepo::with_files(&[("README", "hello")]);
    let out = tempfile::tempdir().unwrap();
    let mut packer = packer_for(&repo, out.path());

    packer.fetch().unwrap();
    let app_dir = packer.app_dir().unwrap();
    fs::write(app_dir.join("scratch"), "local change").unwrap();
    packer.fetch().unwrap();

    assert!(app_dir.join("scratch").exists());
    let first = packer.version().unwrap();
    repo.write("README", "changed upstream");
    repo.commit("upstream change");
    assert_eq!(packer.version().unwrap(), first);

    packer.clean().unwrap();
}

#[test]
fn fetch_into_foreign_directory_is_refused() {
    require_git!();
    let repo = GitRepo::with_files(&[("README", "hello")]);
    let parent = tempfile::tempdir().unwrap();
    let ws = parent.path().join("ws");
    fs::create_dir_all(ws.join("app")).unwrap();
    fs::write(ws.join("app").join("notes.txt"), "mine").unwrap();

    let mut packer = Packer::new(PackageSource::new(repo.locator()));
    packer.set_workdir(&ws).unwrap();
    let err = packer.fetch().unwrap_err();

    assert!(matches!(err, PackerError::WorkspaceNotEmpty { .. }));
    assert_eq!(
        fs::read_to_string(ws.join("app").join("notes.txt")).unwrap(),
        "mine"
    );
}

#[test]
fn invalid_source_fails_without_artifact() {
    require_git!();
    let parent = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut packer = Packer::builder(PackageSource::new(
        parent.path().join("no-such-repo").display().to_string(),
    ))
    .output_dir(out.path())
    .build()
    .unwrap();

    let err = packer.pack(None).unwrap_err();

    assert!(err.is_command_failure(), "unexpected error: {err}");
    assert!(dir_entries(out.path()).is_empty());
    let app_dir = packer.app_dir().unwrap();
    assert!(dir_entries(&app_dir).is_empty());

    let root = packer.current_workdir().unwrap().to_path_buf();
    packer.clean().unwrap();
    assert!(!root.exists());
}

#[test]
fn unknown_revision_leaves_app_dir_empty() {
    require_git!();
    let repo = GitRepo::with_files(&[("README", "hello")]);
    let mut packer =
        Packer::new(PackageSource::new(repo.locator()).with_revision("no-such-branch"));

    let err = packer.fetch().unwrap_err();

    assert!(err.is_command_failure());
    assert!(dir_entries(&packer.app_dir().unwrap()).is_empty());
    packer.clean().unwrap();
}

#[test]
fn workdir_with_missing_parent_is_rejected() {
    let parent = tempfile::tempdir().unwrap();
    let mut packer = Packer::new("/srv/widget");

    let err = packer
        .set_workdir(parent.path().join("missing").join("ws"))
        .unwrap_err();

    assert!(matches!(err, PackerError::WorkspaceProblem { .. }));
    assert!(dir_entries(parent.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn manifest_dependencies_are_vendored_into_archive() {
    require_git!();
    let repo = GitRepo::with_files(&[
        ("Gemfile", "source 'https://rubygems.org'\n"),
        ("Gemfile.lock", "GEM\n"),
        ("app.rb", "puts 1"),
    ]);
    let out = tempfile::tempdir().unwrap();
    let mut config = PackerConfig::default();
    config.installer =
        script_installer(r#"mkdir -p "$VENDOR/gems" && echo vendored > "$VENDOR/gems/marker""#);
    config.archive.output_dir = out.path().to_path_buf();

    let mut packer = Packer::builder(PackageSource::new(repo.locator()))
        .config(config)
        .build()
        .unwrap();
    let artifact = packer.pack(None).unwrap();

    assert_archived!(artifact.path(), "app.rb");
    assert_eq!(
        archive_file(artifact.path(), "vendor/bundle/gems/marker").as_deref(),
        Some("vendored\n")
    );
}

#[cfg(unix)]
#[test]
fn installer_failure_keeps_workspace_and_writes_nothing() {
    require_git!();
    let repo = GitRepo::with_files(&[("Gemfile", "gem 'nope'\n")]);
    let out = tempfile::tempdir().unwrap();
    let mut config = PackerConfig::default();
    config.installer = script_installer("echo 'Could not find gem nope' >&2; exit 3");
    config.archive.output_dir = out.path().to_path_buf();

    let mut packer = Packer::builder(PackageSource::new(repo.locator()))
        .config(config)
        .build()
        .unwrap();
    let err = packer.pack(None).unwrap_err();

    match err {
        PackerError::CommandFailed { status, stderr, .. } => {
            assert_eq!(status, Some(3));
            assert!(stderr.contains("Could not find gem nope"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert!(dir_entries(out.path()).is_empty());

    let root = packer.current_workdir().unwrap().to_path_buf();
    assert!(root.join("app").join("Gemfile").is_file());
    packer.clean().unwrap();
    assert!(!root.exists());
}

#[test]
fn external_tar_backend_produces_equivalent_archive() {
    require_git!();
    if !tar_available() {
        eprintln!("skipping: tar not available");
        return;
    }
    let repo = GitRepo::with_files(&[("README", "hello"), ("lib/widget.rb", "code")]);
    let out = tempfile::tempdir().unwrap();
    let mut packer = Packer::builder(PackageSource::new(repo.locator()))
        .output_dir(out.path())
        .backend(ArchiveBackend::Tar)
        .build()
        .unwrap();

    let artifact = packer.pack(None).unwrap();

    assert_archived!(artifact.path(), "README");
    assert_archived!(artifact.path(), "lib/widget.rb");
    assert_not_archived!(artifact.path(), ".git");
}

#[test]
fn kept_workspace_survives_pack_and_is_reusable() {
    require_git!();
    let repo = GitRepo::with_files(&[("README", "hello")]);
    let parent = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let ws = parent.path().join("ws");

    let mut first = Packer::builder(PackageSource::new(repo.locator()))
        .workdir(&ws)
        .keep_workdir(true)
        .output_dir(out.path())
        .build()
        .unwrap();
    first.pack(None).unwrap();
    assert!(ws.join("app").join("README").is_file());

    let mut second = Packer::builder(PackageSource::new(repo.locator()))
        .workdir(&ws)
        .output_dir(out.path())
        .build()
        .unwrap();
    let artifact = second.pack(None).unwrap();

    assert_archived!(artifact.path(), "README");
    assert!(!ws.exists());
}

#[test]
fn steps_after_clean_are_refused() {
    require_git!();
    let repo = GitRepo::with_files(&[("README", "hello")]);
    let out = tempfile::tempdir().unwrap();
    let mut packer = packer_for(&repo, out.path());

    let artifact = packer.pack(None).unwrap();
    packer.clean().unwrap();

    assert!(matches!(
        packer.fetch(),
        Err(PackerError::StageViolation { .. })
    ));
    assert!(matches!(
        packer.assemble(None),
        Err(PackerError::StageViolation { .. })
    ));
    assert!(artifact.path().is_file());
}
