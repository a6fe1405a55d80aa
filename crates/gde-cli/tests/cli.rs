//! Integration tests for the `gde` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use lopdf::{dictionary, Document, Object, Stream};
use predicates::prelude::*;
use tempfile::TempDir;

const FIRST_PAGE: &[u8] = b"BT /F1 10 Tf 72 700 Td (N\xfamero:) Tj ET \
BT /F1 10 Tf 300 700 Td (IF-2023-12345678-GDEBA-DGTYCDPAGP#MJGP) Tj ET \
BT /F1 10 Tf 72 680 Td (Referencia:) Tj ET \
BT /F1 10 Tf 300 680 Td (Expte. 12345-6-7890) Tj ET";

const LAST_PAGE: &[u8] = b"BT /F1 8 Tf 72 100 Td (Digitally signed by PEREZ, Juan Carlos) Tj ET";

/// Run the CLI with an isolated config directory.
fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gde"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

/// Build a signed two-page GDE document.
fn write_sample_pdf(path: &Path) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids = Vec::new();
    for content in [FIRST_PAGE, LAST_PAGE] {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(Object::from(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 2i64,
        }),
    );

    let signature_id = doc.add_object(dictionary! {
        "FT" => "Sig",
        "T" => Object::string_literal("Signature1"),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => dictionary! { "Fields" => vec![Object::from(signature_id)] },
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "ModDate" => Object::string_literal("D:20230615143000-03'00'"),
    });
    doc.trailer.set("Info", info_id);

    doc.save(path).unwrap();
}

#[test]
fn test_read_json() {
    let home = TempDir::new().unwrap();
    let pdf = home.path().join("doc.pdf");
    write_sample_pdf(&pdf);

    cli(&home)
        .arg("read")
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"gde_number\": \"IF-2023-12345678-GDEBA-DGTYCDPAGP#MJGP\"",
        ))
        .stdout(predicate::str::contains("\"surname\": \"PEREZ\""))
        .stdout(predicate::str::contains("\"is_signed\": true"))
        .stdout(predicate::str::contains("2023-06-15T14:30:00"));
}

#[test]
fn test_read_text_to_file() {
    let home = TempDir::new().unwrap();
    let pdf = home.path().join("doc.pdf");
    let out = home.path().join("doc.txt");
    write_sample_pdf(&pdf);

    cli(&home)
        .args(["read", "-f", "text", "-o"])
        .arg(&out)
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("Department: DGTYC DP AGP"));
    assert!(text.contains("Signer: PEREZ, Juan Carlos"));
    assert!(text.contains("Pages: 2 (signed)"));
}

#[test]
fn test_read_base64_input() {
    use base64::Engine;

    let home = TempDir::new().unwrap();
    let pdf = home.path().join("doc.pdf");
    write_sample_pdf(&pdf);

    let encoded = base64::engine::general_purpose::STANDARD.encode(fs::read(&pdf).unwrap());
    let b64 = home.path().join("doc.b64");
    fs::write(&b64, encoded).unwrap();

    cli(&home)
        .args(["read", "--base64", "-f", "csv"])
        .arg(&b64)
        .assert()
        .success()
        .stdout(predicate::str::contains("gde_number,doc_type"))
        .stdout(predicate::str::contains("12345-6-7890"));
}

#[test]
fn test_read_missing_file() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .args(["read", "/nonexistent/doc.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_read_rejects_non_pdf() {
    let home = TempDir::new().unwrap();
    let junk = home.path().join("junk.pdf");
    fs::write(&junk, "not a pdf").unwrap();

    cli(&home).arg("read").arg(&junk).assert().failure();
}

#[test]
fn test_batch_with_summary_continues_on_error() {
    let home = TempDir::new().unwrap();
    let inputs = home.path().join("in");
    let outputs = home.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    write_sample_pdf(&inputs.join("a.pdf"));
    fs::write(inputs.join("b.pdf"), "broken").unwrap();

    cli(&home)
        .arg("batch")
        .arg(format!("{}/*.pdf", inputs.display()))
        .arg("-o")
        .arg(&outputs)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert!(outputs.join("a.json").exists());
    assert!(!outputs.join("b.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.contains("a.pdf,success,IF-2023-12345678-GDEBA-DGTYCDPAGP#MJGP"));
    assert!(summary.contains("b.pdf,error"));
}

#[test]
fn test_batch_stops_on_first_error() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("broken.pdf"), "broken").unwrap();

    cli(&home)
        .arg("batch")
        .arg(format!("{}/*.pdf", home.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed"));
}

#[test]
fn test_config_show_defaults() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"number_label\": \"Número:\""))
        .stdout(predicate::str::contains("\"division_width\": 6"));
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .args(["config", "set", "layout.alignment_bias", "3.5"])
        .assert()
        .success();

    cli(&home)
        .args(["config", "get", "layout.alignment_bias"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3.5"));

    cli(&home)
        .args(["config", "get", "layout.missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_config_commands_follow_explicit_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.json");
    fs::write(&config, r#"{"layout": {"alignment_bias": 4.0}}"#).unwrap();

    cli(&home)
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "layout.alignment_bias"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4.0"));

    cli(&home)
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "layout.number_label", "Numero:"])
        .assert()
        .success();

    let saved = fs::read_to_string(&config).unwrap();
    assert!(saved.contains("\"number_label\": \"Numero:\""));
    assert!(!home.path().join(".config/gde/config.json").exists());

    cli(&home)
        .arg("-c")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"number_label\": \"Numero:\""))
        .stdout(predicate::str::contains("4.0"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("gde.json");

    cli(&home)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    cli(&home)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_explicit_config_file_is_used() {
    let home = TempDir::new().unwrap();
    let pdf = home.path().join("doc.pdf");
    write_sample_pdf(&pdf);

    let config = home.path().join("custom.json");
    fs::write(&config, r#"{"layout": {"number_label": "Numero:"}}"#).unwrap();

    cli(&home)
        .arg("-c")
        .arg(&config)
        .arg("read")
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"gde_number\": null"));
}
