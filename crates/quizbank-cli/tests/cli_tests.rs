//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizbank() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizbank").unwrap()
}

/// A command running in `dir`, isolated from the caller's environment.
fn quizbank_in(dir: &Path) -> Command {
    let mut cmd = quizbank();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("QUIZBANK_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// A directory with the sample config and banks from `quizbank init`.
fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    quizbank_in(dir.path()).arg("init").assert().success();
    dir
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizbank_in(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizbank.toml"))
        .stdout(predicate::str::contains("html.json"));

    assert!(dir.path().join("quizbank.toml").exists());
    for file in ["bases_de_donnees.json", "html.json", "css.json", "javascript.json", "php.json"] {
        assert!(dir.path().join("data").join(file).exists(), "{file}");
    }
}

#[test]
fn init_skips_existing() {
    let dir = initialized();
    std::fs::write(dir.path().join("data/css.json"), "[]").unwrap();

    quizbank_in(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("data/css.json")).unwrap(),
        "[]"
    );
}

#[test]
fn themes_lists_counts() {
    let dir = initialized();

    quizbank_in(dir.path())
        .arg("themes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bases de données"))
        .stdout(predicate::str::contains("intermediaire"))
        .stdout(predicate::str::contains("30 questions in total"));
}

#[test]
fn compose_is_reproducible_with_seed() {
    let dir = initialized();
    let args = ["compose", "--themes", "css", "--length", "4", "--seed", "11", "--format", "json"];

    let first = stdout_json(quizbank_in(dir.path()).args(args));
    let second = stdout_json(quizbank_in(dir.path()).args(args));
    assert_eq!(first, second);

    let questions = first["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 4);
    assert!(questions.iter().all(|q| q["theme"] == "CSS"));
    assert_eq!(first["requested"], 4);
    assert_eq!(first["level"], "mixte");
}

#[test]
fn compose_text_lists_questions() {
    let dir = initialized();

    quizbank_in(dir.path())
        .args(["compose", "--themes", "html,php", "--level", "debutant", "--length", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 3 questions (level debutant)"))
        .stdout(predicate::str::contains("debutant"));
}

#[test]
fn compose_shortfall_warns() {
    let dir = initialized();

    quizbank_in(dir.path())
        .args(["compose", "--themes", "php", "--level", "avance", "--length", "longue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 60 questions"))
        .stderr(predicate::str::contains(
            "only 2 of the 60 requested questions are available",
        ));
}

#[test]
fn compose_with_no_matching_questions_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("banks")).unwrap();
    std::fs::write(
        dir.path().join("banks/rust.json"),
        r#"[{"id": "rs-1", "theme": "Rust", "niveau": "debutant", "type": "zone_saisie",
             "question": "Keyword for an immutable binding?", "reponse": ["let"]}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("quizbank.toml"),
        "[source]\ntype = \"directory\"\npath = \"./banks\"\n\n[[themes]]\nname = \"Rust\"\nfile = \"rust.json\"\n",
    )
    .unwrap();

    quizbank_in(dir.path())
        .args(["compose", "--themes", "rust", "--level", "avance"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no questions found"));
}

fn composed_texts(dir: &Path, themes: &str) -> Vec<String> {
    let json = stdout_json(quizbank_in(dir).args([
        "compose", "--themes", themes, "--level", "debutant", "--length", "10", "--format", "json",
    ]));
    let mut texts: Vec<String> = json["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["question"].as_str().unwrap().to_string())
        .collect();
    texts.sort();
    texts
}

#[test]
fn duplicate_ids_resolve_to_the_first_configured_bank() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data/html.json"),
        r#"[{"id": "dup", "theme": "HTML", "niveau": "debutant", "type": "zone_saisie",
             "question": "html version", "reponse": ["a"]}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("data/css.json"),
        r#"[{"id": "dup", "theme": "CSS", "niveau": "debutant", "type": "zone_saisie",
             "question": "css version", "reponse": ["b"]},
            {"id": "c2", "theme": "CSS", "niveau": "debutant", "type": "zone_saisie",
             "question": "c2", "reponse": ["c"]}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("quizbank.toml"),
        "[[themes]]\nname = \"HTML\"\nfile = \"html.json\"\n\n[[themes]]\nname = \"CSS\"\nfile = \"css.json\"\n",
    )
    .unwrap();

    // The pool always merges every bank in configured order, whatever is selected.
    assert_eq!(composed_texts(dir.path(), "css"), vec!["c2"]);
    assert_eq!(composed_texts(dir.path(), "css,html"), vec!["c2", "html version"]);
    assert_eq!(composed_texts(dir.path(), "html,css"), vec!["c2", "html version"]);
}

#[test]
fn missing_bank_fails_the_load() {
    let dir = initialized();
    std::fs::remove_file(dir.path().join("data/php.json")).unwrap();

    quizbank_in(dir.path())
        .arg("themes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load the question banks"))
        .stderr(predicate::str::contains("php.json"));
}

#[test]
fn unknown_theme_is_rejected() {
    let dir = initialized();

    quizbank_in(dir.path())
        .args(["compose", "--themes", "cobol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme 'cobol'"));
}

#[test]
fn play_through_stdin() {
    let dir = initialized();
    let report = dir.path().join("out/report.json");

    quizbank_in(dir.path())
        .args(["play", "--themes", "html", "--length", "3", "--seed", "5", "--json"])
        .arg(&report)
        .write_stdin(":skip\n\n\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 / 3"))
        .stdout(predicate::str::contains("Score: 0 / 3"))
        .stdout(predicate::str::contains("Mistakes:"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["score"]["total_questions"], 3);
    assert_eq!(json["skipped"], 1);
    assert_eq!(json["quiz"]["level"], "mixte");
}

#[test]
fn play_quit_prints_no_score() {
    let dir = initialized();

    quizbank_in(dir.path())
        .args(["play", "--themes", "css", "--length", "3"])
        .write_stdin(":quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz abandoned."))
        .stdout(predicate::str::contains("Score:").not());
}

fn write_answers(dir: &Path, questions: &[&str]) -> std::path::PathBuf {
    let sheet = serde_json::json!({
        "questions": questions,
        "answers": {
            "html-1": ["<a>"],
            "js-2": [" === "],
            "css-1": ["text-color"],
        }
    });
    let path = dir.join("answers.json");
    std::fs::write(&path, sheet.to_string()).unwrap();
    path
}

#[test]
fn grade_answers_file() {
    let dir = initialized();
    let answers = write_answers(dir.path(), &["html-1", "css-1", "js-2", "sql-2"]);

    let json = stdout_json(
        quizbank_in(dir.path())
            .args(["grade", "--format", "json", "--answers"])
            .arg(&answers),
    );
    assert_eq!(json["score"]["total_correct"], 2);
    assert_eq!(json["score"]["total_questions"], 4);
    assert_eq!(json["score"]["wrong_entries"][0]["question_id"], "css-1");
    assert!(json["score"]["wrong_entries"][1]["user_answer"].is_null());

    quizbank_in(dir.path())
        .args(["grade", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 2 / 4 (50.0%)"))
        .stdout(predicate::str::contains("(no answer)"));
}

#[test]
fn grade_markdown_and_html() {
    let dir = initialized();
    let answers = write_answers(dir.path(), &["html-1", "js-2"]);
    let html = dir.path().join("results.html");

    quizbank_in(dir.path())
        .args(["grade", "--format", "markdown", "--answers"])
        .arg(&answers)
        .arg("--html")
        .arg(&html)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Quiz results"))
        .stdout(predicate::str::contains("**Score:** 2 / 2"));

    let page = std::fs::read_to_string(&html).unwrap();
    assert!(page.contains("No mistakes."));
}

#[test]
fn grade_unknown_question_fails() {
    let dir = initialized();
    let answers = write_answers(dir.path(), &["html-1", "nope-1"]);

    quizbank_in(dir.path())
        .args(["grade", "--answers"])
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown question id 'nope-1'"));
}

#[test]
fn help_output() {
    quizbank()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Themed web-development quizzes"));
}

#[test]
fn version_output() {
    quizbank()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizbank"));
}
