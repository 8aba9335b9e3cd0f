//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `geoquiz` command isolated from the user's config and environment.
fn geoquiz(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("geoquiz").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("GEOQUIZ_SUPABASE_URL")
        .env_remove("GEOQUIZ_SUPABASE_ANON_KEY")
        .env_remove("GEOQUIZ_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn answers(line: &str, count: usize) -> String {
    format!("{line}\n").repeat(count)
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("World geography quiz"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("geoquiz"));
}

#[test]
fn levels_for_one_domain() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["levels", "--domain", "europe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Europe"))
        .stdout(predicate::str::contains("Découverte"))
        .stdout(predicate::str::contains("Carto Express"))
        .stdout(predicate::str::contains("15s"));
}

#[test]
fn levels_for_every_domain() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .arg("levels")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monde"))
        .stdout(predicate::str::contains("Océanie"))
        .stdout(predicate::str::contains("Expert domaine"));
}

#[test]
fn unknown_domain_fails() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["levels", "--domain", "atlantide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown domain"));
}

#[test]
fn countries_of_a_zone() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["countries", "--zone", "Océanie"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Canberra"))
        .stdout(predicate::str::contains("pays (Océanie)"));
}

#[test]
fn play_first_level_offline() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["play", "--domain", "Europe", "--level", "1", "--seed", "7"])
        .write_stdin(answers("1", 10))
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/10]"))
        .stdout(predicate::str::contains("[10/10]"))
        .stdout(predicate::str::contains("Score :"))
        .stdout(predicate::str::contains("Rang :"));
}

#[test]
fn play_locked_level_fails() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["play", "--domain", "Asie", "--level", "2"])
        .write_stdin(answers("1", 10))
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));
}

#[test]
fn play_unknown_level_fails() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["play", "--domain", "Asie", "--level", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown level 8"));
}

#[test]
fn closed_input_abandons_the_attempt() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["play", "--domain", "Afrique", "--level", "1"])
        .write_stdin(answers("2", 3))
        .assert()
        .success()
        .stdout(predicate::str::contains("[4/10]"))
        .stdout(predicate::str::contains("abandonnée"))
        .stdout(predicate::str::contains("Score :").not());
}

#[test]
fn practice_counts_answers() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["practice", "--theme", "drapeaux", "--zone", "Amériques", "--count", "3"])
        .write_stdin(answers("1", 3))
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode libre · Drapeaux · Amériques"))
        .stdout(predicate::str::contains("/3 ("));
}

#[test]
fn practice_rejects_unknown_theme() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["practice", "--theme", "volcans"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}

#[test]
fn status_offline_starts_fresh() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hors ligne"))
        .stdout(predicate::str::contains("0/300"))
        .stdout(predicate::str::contains("Explorateur"))
        .stdout(predicate::str::contains("Encore 80 points"));
}

#[test]
fn signup_needs_a_backend() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["signup", "--email", "ana@example.com", "--handle", "Ana"])
        .env("GEOQUIZ_PASSWORD", "secret1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no backend configured"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .args(["--config", "nope.toml", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn config_default_domain_is_used() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("geoquiz.toml"), "default_domain = \"Océanie\"\n").unwrap();
    geoquiz(&dir)
        .args(["play", "--level", "1"])
        .write_stdin(answers("1", 10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Océanie · Niveau 1"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created geoquiz.toml"));

    let content = std::fs::read_to_string(dir.path().join("geoquiz.toml")).unwrap();
    assert!(content.contains("[backend]"));
    assert!(content.contains("default_domain"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    geoquiz(&dir).arg("init").assert().success();
    geoquiz(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn status_as_json() {
    let dir = TempDir::new().unwrap();
    let output = geoquiz(&dir)
        .args(["status", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let snapshot: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(snapshot["online"], false);
    assert_eq!(snapshot["total_score"], 0);
    assert_eq!(snapshot["rank"], "Explorateur");
    assert_eq!(snapshot["levels"].as_array().unwrap().len(), 30);
    assert_eq!(snapshot["domain_scores"]["Europe"], 0);
}
