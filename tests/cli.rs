use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn webpreset() -> Command {
    let mut cmd = Command::cargo_bin("webpreset").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("RUST_LOG");
    cmd
}

fn project(config: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("webpreset.toml"), config).unwrap();
    dir
}

fn config_arg(dir: &Path) -> String {
    dir.join("webpreset.toml").display().to_string()
}

#[test]
fn classify_reports_vendor_and_dynamic_chunks() {
    webpreset()
        .args([
            "classify",
            "/app/node_modules/react-dom/cjs",
            "/app/node_modules/foo/intl-messages/index.js",
            "/app/src/pages",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("package: react-dom"))
        .stdout(predicate::str::contains("bundle:  react"))
        .stdout(predicate::str::contains("dynamic: app.cjs.dynamic"))
        .stdout(predicate::str::contains("bundle:  intl"))
        .stdout(predicate::str::contains("application code"));
}

#[test]
fn order_sorts_by_prefix() {
    webpreset()
        .args(["order", "app.x.dynamic", "polyfill.vendor", "main"])
        .assert()
        .success()
        .stdout("polyfill.vendor\napp.x.dynamic\nmain\n");
}

#[test]
fn order_requires_chunks() {
    webpreset().arg("order").assert().failure();
}

#[test]
fn inspect_prints_merged_config() {
    let dir = project(
        r#"
[build]
public_path = "/static/"

[dev.proxy."/api"]
target = "http://localhost:3000"

[custom]
devtool = "source-map"
"#,
    );

    let output = webpreset()
        .args(["inspect", "--production", "--config"])
        .arg(config_arg(dir.path()))
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["mode"], "production");
    assert_eq!(document["devtool"], "source-map");
    assert_eq!(document["output"]["publicPath"], "/static/");
    assert_eq!(document["output"]["filename"], "[name].[chunkhash:8].js");
    assert_eq!(document["devServer"]["proxy"]["/api"]["target"], "http://localhost:3000");
    assert_eq!(
        document["optimization"]["splitChunks"]["cacheGroups"]["initial"]["name"]["value"],
        "app.initial"
    );
}

#[test]
fn inspect_writes_output_file() {
    let dir = project("");
    let out = dir.path().join("config.json");

    webpreset()
        .args(["inspect", "--analyze", "--config"])
        .arg(config_arg(dir.path()))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("BundleAnalyzerPlugin"));
}

#[test]
fn inspect_rejects_invalid_config() {
    let dir = project("[dev.proxy.\"/api\"]\ntarget = \"not a url\"\n");

    webpreset()
        .args(["inspect", "--config"])
        .arg(config_arg(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an absolute URL"));
}

#[test]
fn inspect_requires_config_file() {
    let dir = tempfile::tempdir().unwrap();

    webpreset()
        .args(["inspect", "--config"])
        .arg(config_arg(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn rules_shows_loader_chain() {
    let dir = project("");
    let style = dir.path().join("src").join("app.less");

    webpreset()
        .args(["rules", "--config"])
        .arg(config_arg(dir.path()))
        .arg(&style)
        .assert()
        .success()
        .stdout(predicate::str::contains("style-loader"))
        .stdout(predicate::str::contains("less-loader"));

    webpreset()
        .args(["rules", "--config"])
        .arg(config_arg(dir.path()))
        .arg(dir.path().join("README.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("no rule matches"));
}

#[test]
fn plan_groups_installed_packages() {
    let dir = tempfile::tempdir().unwrap();
    for package in ["core-js", "moment", "react", "@sc/table", "zrender"] {
        fs::create_dir_all(dir.path().join("node_modules").join(package)).unwrap();
    }

    webpreset()
        .args(["plan", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("polyfill (1)\n  core-js\n"))
        .stdout(predicate::str::contains("moment (1)\n  moment\n"))
        .stdout(predicate::str::contains("sc (1)\n  @sc/table\n"))
        .stdout(predicate::str::contains("other (1)\n  zrender\n"));
}

#[test]
fn plan_requires_node_modules() {
    let dir = tempfile::tempdir().unwrap();

    webpreset()
        .args(["plan", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No node_modules directory"));
}

#[test]
fn init_writes_loadable_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());

    webpreset()
        .args(["init", "--typescript", "--config", config.as_str()])
        .assert()
        .success();

    webpreset()
        .args(["inspect", "--config", config.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("./src/index.tsx"));

    webpreset()
        .args(["init", "--config", config.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn inspect_rejects_proxy_target_without_host() {
    let dir = project("[dev.proxy.\"/api\"]\ntarget = \"localhost:3000\"\n");

    webpreset()
        .args(["inspect", "--config"])
        .arg(config_arg(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "proxy target 'localhost:3000' for '/api' is not an absolute URL",
        ));
}

#[test]
fn inspect_warns_on_unknown_section() {
    let dir = project("[biuld]\nis_production = true\n\n[dev]\nport = 9000\n");

    webpreset()
        .args(["inspect", "--config"])
        .arg(config_arg(dir.path()))
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown section 'biuld'"))
        .stderr(predicate::str::contains("http://localhost:9000"));
}

#[test]
fn rules_reports_dropped_moment_locales() {
    let dir = project("");
    let locales = dir.path().join("node_modules").join("moment").join("locale");

    webpreset()
        .args(["rules", "--config"])
        .arg(config_arg(dir.path()))
        .arg(locales.join("fr.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("excluded from its context module"));

    webpreset()
        .args(["rules", "--config"])
        .arg(config_arg(dir.path()))
        .arg(locales.join("zh-cn.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("no rule matches"));
}

#[test]
fn filename_renders_hashed_chunk_name() {
    let dir = project("");
    let chunk = dir.path().join("antd.js");
    fs::write(&chunk, "hello world").unwrap();

    webpreset()
        .args(["filename", "--production", "--config"])
        .arg(config_arg(dir.path()))
        .arg("antd")
        .arg(&chunk)
        .assert()
        .success()
        .stdout("antd.b94d27b9.js\n");

    webpreset()
        .args(["filename", "--config"])
        .arg(config_arg(dir.path()))
        .arg("main")
        .arg(&chunk)
        .assert()
        .success()
        .stdout("main.b94d27b9.js\n");
}
