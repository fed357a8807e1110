//! End-to-end packaging runs against temporary project directories.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rpkr_core::{ManifestError, PackError, PackOptions, Packer, Reporter};
use rpkr_schema::{CONFIG_FILE, Config};
use tempfile::{TempDir, tempdir};

/// Records every message with its level.
#[derive(Default)]
struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Recorder {
    fn push(&self, level: &str, msg: &str) {
        self.lines.lock().unwrap().push(format!("{level}: {msg}"));
    }

    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Reporter for Recorder {
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn success(&self, msg: &str) {
        self.push("success", msg);
    }
    fn warning(&self, msg: &str) {
        self.push("warning", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
}

struct Project {
    dir: TempDir,
    recorder: Arc<Recorder>,
}

impl Project {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
            recorder: Arc::new(Recorder::default()),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn touch(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn write_config(&self, json: &str) {
        std::fs::write(self.root().join(CONFIG_FILE), json).unwrap();
    }

    fn packer(&self) -> Packer {
        Packer::new(self.root(), self.recorder.clone())
    }

    fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root().join(rel)).unwrap()
    }
}

fn folder() -> PackOptions {
    PackOptions { zipped: false }
}

fn zip_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(ToString::to_string).collect();
    names.sort();
    names
}

fn zip_entry(path: &Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

const TWEAKS_CONFIG: &str = r#"{
	"name": "Tweaks",
	"packver": "v2",
	"mcver": "1.16.5",
	"description": "<name> <packver> &7for <mcver>",
	"languages": { "en_pt": "Pirate Speak (Seven Seas)" },
	"files": ["pack.png", "pack.mcmeta", "assets/**/*.png", "assets/**/*.json"]
}"#;

#[tokio::test]
async fn test_folder_from_root() {
    let project = Project::new();
    project.write_config(TWEAKS_CONFIG);
    project.touch("pack.png", "icon");
    project.touch("assets/minecraft/textures/block/stone.png", "stone");
    project.touch("assets/minecraft/textures/block/stone.psd", "layers");

    let report = project
        .packer()
        .pack(".", Some("out"), folder())
        .await
        .unwrap();

    assert!(report.success);
    assert!(report.manifest);
    assert_eq!(report.files, 2);
    assert_eq!(report.display, "out/");
    assert_eq!(project.read("out/pack.png"), "icon");
    assert!(project.root().join("out/assets/minecraft/textures/block/stone.png").is_file());
    assert!(!project.root().join("out/assets/minecraft/textures/block/stone.psd").exists());

    let meta: serde_json::Value = serde_json::from_str(&project.read("out/pack.mcmeta")).unwrap();
    assert_eq!(meta["pack"]["pack_format"], 6);
    assert_eq!(meta["pack"]["description"], "Tweaks v2 §7for 1.16.5");
    assert_eq!(meta["language"]["en_pt"]["name"], "Pirate Speak");
    assert_eq!(meta["language"]["en_pt"]["region"], "Seven Seas");

    let lines = project.recorder.lines();
    assert_eq!(lines.first().unwrap(), "info: Packaging version v2 of 'Tweaks'...");
    assert!(lines.contains(&"info: Created automatic pack.mcmeta file".to_string()));
    assert_eq!(
        lines.last().unwrap(),
        "success: Successfully packaged version v2 of 'Tweaks' for Minecraft 1.16.5 to 'out/'"
    );
}

#[tokio::test]
async fn test_folder_from_subdirectory_twice() {
    let project = Project::new();
    project.write_config(TWEAKS_CONFIG);
    project.touch("src/pack.png", "icon");
    project.touch("src/assets/minecraft/models/block/stone.json", "{}");

    for _ in 0..2 {
        let report = project
            .packer()
            .pack("src", Some("out"), folder())
            .await
            .unwrap();
        assert!(report.success);
    }

    assert_eq!(project.read("out/pack.png"), "icon");
    assert!(project.root().join("out/pack.mcmeta").is_file());
    assert!(project.root().join("out/assets/minecraft/models/block/stone.json").is_file());
    assert!(!project.root().join("out/src").exists());
}

#[tokio::test]
async fn test_zip_twice_leaves_no_staged_manifest() {
    let project = Project::new();
    project.write_config(TWEAKS_CONFIG);
    project.touch("src/pack.png", "icon");
    project.touch("src/assets/minecraft/textures/item/apple.png", "apple");

    let packer = project.packer();
    let first = packer.pack("src", None, PackOptions::default()).await.unwrap();
    let second = packer.pack("src", None, PackOptions::default()).await.unwrap();

    assert!(first.success && second.success);
    assert_eq!(second.display, "Tweaks v2 (1.16.5).zip");
    assert_eq!(second.artifact, project.root().join("Tweaks v2 (1.16.5).zip"));
    assert_eq!(
        zip_names(&second.artifact),
        [
            "assets/minecraft/textures/item/apple.png",
            "pack.mcmeta",
            "pack.png"
        ]
    );
    assert!(zip_entry(&second.artifact, "pack.mcmeta").contains("\"pack_format\": 6"));

    assert!(staged_manifests(project.root()).is_empty());

    let lines = project.recorder.lines();
    assert!(
        lines
            .iter()
            .any(|l| l.starts_with("warning: Overwriting existing file"))
    );
}

#[tokio::test]
async fn test_generated_manifest_replaces_source_manifest() {
    let project = Project::new();
    project.write_config(TWEAKS_CONFIG);
    project.touch("pack.mcmeta", r#"{"pack":{"pack_format":1,"description":"old"}}"#);
    project.touch("pack.png", "icon");

    let report = project
        .packer()
        .pack(".", Some("bundle"), PackOptions::default())
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.files, 1);
    let zip_path = project.root().join("bundle.zip");
    assert_eq!(zip_names(&zip_path), ["pack.mcmeta", "pack.png"]);
    assert!(zip_entry(&zip_path, "pack.mcmeta").contains("Tweaks v2"));
}

#[tokio::test]
async fn test_source_manifest_kept_without_description() {
    let project = Project::new();
    project.write_config(r#"{ "name": "Plain", "files": ["pack.mcmeta"] }"#);
    project.touch("pack.mcmeta", "handwritten");

    let report = project
        .packer()
        .pack(".", Some("out"), folder())
        .await
        .unwrap();

    assert!(report.success);
    assert!(!report.manifest);
    assert_eq!(project.read("out/pack.mcmeta"), "handwritten");
}

#[tokio::test]
async fn test_malformed_language_aborts_before_output() {
    let project = Project::new();
    project.write_config(
        r#"{ "name": "Broken", "description": "x", "languages": { "xx": "No Region" } }"#,
    );
    project.touch("pack.png", "icon");

    let err = project
        .packer()
        .pack(".", Some("out"), folder())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PackError::Manifest(ManifestError::MalformedLanguageEntry { .. })
    ));
    assert!(!project.root().join("out").exists());
}

#[tokio::test]
async fn test_malformed_config_aborts() {
    let project = Project::new();
    project.write_config("{ not json");

    let err = project.packer().pack(".", None, folder()).await.unwrap_err();

    assert!(matches!(err, PackError::Config(_)));
    assert_eq!(project.read(CONFIG_FILE), "{ not json");
}

#[tokio::test]
async fn test_bootstrap_when_config_missing() {
    let project = Project::new();
    project.touch("pack.png", "icon");

    let report = project
        .packer()
        .pack(".", Some("out"), folder())
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.version_label, "1.16.5");
    let written = Config::parse(&project.read(CONFIG_FILE)).unwrap();
    assert_eq!(written, Config::default_for_root(project.root()));
    assert!(
        project
            .recorder
            .lines()
            .iter()
            .any(|l| l.starts_with("success: Successfully created .rpkr.json"))
    );
}

#[tokio::test]
async fn test_unknown_version_gets_format_zero() {
    let project = Project::new();
    project.write_config(r#"{ "name": "Future", "mcver": "9.9", "description": "d" }"#);

    let report = project
        .packer()
        .pack(".", Some("out"), folder())
        .await
        .unwrap();

    assert!(report.success);
    let meta: serde_json::Value = serde_json::from_str(&project.read("out/pack.mcmeta")).unwrap();
    assert_eq!(meta["pack"]["pack_format"], 0);
}

#[tokio::test]
async fn test_snapshot_label_names_default_output() {
    let project = Project::new();
    project.write_config(r#"{ "name": "Snap", "mcver": "1.16", "mcsnap": "20w14a" }"#);
    project.touch("pack.png", "icon");

    let report = project
        .packer()
        .pack(".", None, PackOptions::default())
        .await
        .unwrap();

    assert_eq!(report.version_label, "20w14a");
    assert!(project.root().join("Snap v1 (20w14a).zip").is_file());
}

#[tokio::test]
async fn test_absolute_input_inside_root() {
    let project = Project::new();
    project.write_config(TWEAKS_CONFIG);
    project.touch("src/pack.png", "icon");
    project.touch("src/assets/minecraft/textures/item/apple.png", "apple");
    let input = project.root().join("src");
    let input = input.to_str().unwrap();

    let folder_report = project
        .packer()
        .pack(input, Some("out"), folder())
        .await
        .unwrap();
    assert!(folder_report.success);
    assert_eq!(project.read("out/pack.png"), "icon");
    assert!(project.root().join("out/assets/minecraft/textures/item/apple.png").is_file());
    assert!(!project.root().join("out/src").exists());

    let zip_report = project
        .packer()
        .pack(input, Some("bundle"), PackOptions::default())
        .await
        .unwrap();
    assert!(zip_report.success);
    assert_eq!(
        zip_names(&zip_report.artifact),
        [
            "assets/minecraft/textures/item/apple.png",
            "pack.mcmeta",
            "pack.png"
        ]
    );
}

#[tokio::test]
async fn test_null_selectors_use_defaults() {
    let project = Project::new();
    project.write_config(r#"{ "name": "T", "packver": null, "files": null }"#);
    project.touch("pack.png", "icon");

    let report = project
        .packer()
        .pack(".", Some("out"), folder())
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.files, 1);
    assert_eq!(project.read("out/pack.png"), "icon");
}

#[tokio::test]
async fn test_languages_keep_config_order() {
    let project = Project::new();
    project.write_config(
        r#"{ "name": "L", "description": "d",
            "languages": { "zz_zz": "Last (Z)", "aa_aa": "First (A)" } }"#,
    );

    project
        .packer()
        .pack(".", Some("out"), folder())
        .await
        .unwrap();

    let meta = project.read("out/pack.mcmeta");
    assert!(meta.find("zz_zz").unwrap() < meta.find("aa_aa").unwrap());
}

fn staged_manifests(root: &Path) -> Vec<String> {
    std::fs::read_dir(root)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".rpkr-pack-"))
        .collect()
}

#[tokio::test]
async fn test_folder_copy_failure_is_unsuccessful() {
    let project = Project::new();
    project.write_config(TWEAKS_CONFIG);
    project.touch("pack.png", "icon");
    // A directory where the copy has to land.
    std::fs::create_dir_all(project.root().join("out/pack.png")).unwrap();

    let report = project
        .packer()
        .pack(".", Some("out"), folder())
        .await
        .unwrap();

    assert!(!report.success);
    let lines = project.recorder.lines();
    assert!(lines.iter().any(|l| l.starts_with("error: Cannot copy")));
    assert_eq!(
        lines.last().unwrap(),
        "error: Unsuccessfully packaged version v2 of 'Tweaks' for Minecraft 1.16.5 to 'out/'"
    );
}

#[tokio::test]
async fn test_zip_failure_is_unsuccessful_and_cleans_up() {
    let project = Project::new();
    project.write_config(TWEAKS_CONFIG);
    project.touch("pack.png", "icon");
    // The archive path is taken by a directory.
    std::fs::create_dir(project.root().join("bundle.zip")).unwrap();

    let report = project
        .packer()
        .pack(".", Some("bundle"), PackOptions::default())
        .await
        .unwrap();

    assert!(!report.success);
    assert_eq!(report.files, 0);
    assert!(staged_manifests(project.root()).is_empty());
    assert!(project.root().join("bundle.zip").is_dir());
    let lines = project.recorder.lines();
    assert!(lines.iter().any(|l| l.starts_with("error: Cannot write")));
    assert_eq!(
        lines.last().unwrap(),
        "error: Unsuccessfully packaged version v2 of 'Tweaks' for Minecraft 1.16.5 to 'bundle.zip'"
    );
}
