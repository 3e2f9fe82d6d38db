use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TICKETS: &str = "
============================================================
📄 20240305_ticket.pdf
============================================================
MERCADONA, S.A. A-46103834
C/ GUADARRAMA 2
28260 GALAPAGAR
05/03/2024 19:07 OP: 123456
FACTURA SIMPLIFICADA: 2236-011-000001
Descripción P. Unit Importe
1 LECHE ENTERA 1,00
1 PIZZA 4 QUESOS 2,95
TOTAL (€) 3,95
TARJETA BANCARIA 3,95

============================================================
📄 20240412_ticket.pdf
============================================================
MERCADONA, S.A. A-46103834
28250 TORRELODONES
12/04/2024 10:15 OP: 654321
FACTURA SIMPLIFICADA: 2236-011-000002
Descripción P. Unit Importe
2 LECHE ENTERA 1,20 2,40
1 TOMATE PERA 1,20
0,620 kg 1,94 €/kg 1,20
TOTAL (€) 3,60
";

/// Command with the config directory pointed into `home`.
fn cesta(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cesta").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).env("HOME", home);
    cmd
}

fn write_tickets(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("tickets.txt");
    fs::write(&path, TICKETS).unwrap();
    path
}

#[test]
fn test_classify() {
    let home = TempDir::new().unwrap();
    cesta(home.path())
        .args(["classify", "PIZZA 4 QUESOS", "BOLSA PLASTICO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("congelados\tPIZZA 4 QUESOS"))
        .stdout(predicate::str::contains("otros\tBOLSA PLASTICO"));
}

#[test]
fn test_parse_json() {
    let home = TempDir::new().unwrap();
    let input = write_tickets(&home);

    let output = cesta(home.path())
        .args(["parse", "--date", "2024-05-01"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["meta"]["totalTickets"], 2);
    assert_eq!(doc["meta"]["lastUpdated"], "2024-05-01");
    assert_eq!(doc["tickets"][0]["id"], "2236-011-000001");
    assert_eq!(doc["tickets"][0]["store"]["city"], "GALAPAGAR");
    assert_eq!(doc["tickets"][1]["items"][1]["weight"], 0.62);
    assert_eq!(doc["productHistory"]["LECHE ENTERA"].as_array().unwrap().len(), 2);
}

#[test]
fn test_parse_csv_to_file() {
    let home = TempDir::new().unwrap();
    let input = write_tickets(&home);
    let out = home.path().join("out").join("tickets.csv");

    cesta(home.path())
        .args(["parse", "-f", "csv", "-o"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "date,store,total,items");
    assert_eq!(lines[1], "2024-03-05,GALAPAGAR,3.95,2");
    assert_eq!(lines[2], "2024-04-12,TORRELODONES,3.60,2");
}

#[test]
fn test_parse_text_summary() {
    let home = TempDir::new().unwrap();
    let input = write_tickets(&home);

    cesta(home.path())
        .args(["parse", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tickets: 2"))
        .stdout(predicate::str::contains("7,55 €"))
        .stdout(predicate::str::contains("2024-04"));
}

#[test]
fn test_parse_missing_input() {
    let home = TempDir::new().unwrap();
    cesta(home.path())
        .args(["parse", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_prices() {
    let home = TempDir::new().unwrap();
    let input = write_tickets(&home);
    let doc = home.path().join("tickets.json");

    cesta(home.path())
        .args(["parse", "-o"])
        .arg(&doc)
        .arg(&input)
        .assert()
        .success();

    let output = cesta(home.path())
        .args(["prices", "--json", "--alerts"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(output.status.success());

    let alerts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(alerts[0]["product"], "LECHE ENTERA");
    assert_eq!(alerts[0]["changePercent"], 20.0);

    cesta(home.path())
        .args(["prices", "--alerts", "--threshold", "25"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("No price changes found"));
}

#[test]
fn test_rules_export_and_check() {
    let home = TempDir::new().unwrap();
    let rules = home.path().join("rules.json");

    cesta(home.path())
        .args(["rules", "export", "-o"])
        .arg(&rules)
        .assert()
        .success();

    cesta(home.path())
        .args(["rules", "check"])
        .arg(&rules)
        .assert()
        .success()
        .stdout(predicate::str::contains("9 categories"));

    let broken = home.path().join("broken.json");
    fs::write(
        &broken,
        r#"{"categories": [], "priorityRules": [{"pattern": "X", "category": "nope"}]}"#,
    )
    .unwrap();
    cesta(home.path())
        .args(["rules", "check"])
        .arg(&broken)
        .assert()
        .failure();
}

#[test]
fn test_custom_rules_from_config() {
    let home = TempDir::new().unwrap();
    let rules = home.path().join("rules.json");
    fs::write(
        &rules,
        r##"{
            "categories": [
                {"key": "lacteos", "name": "Lácteos", "icon": "🧀", "color": "#fff", "keywords": ["LECHE"]},
                {"key": "resto", "name": "Resto", "icon": "🛒", "color": "#000", "keywords": []}
            ],
            "fallback": "resto"
        }"##,
    )
    .unwrap();
    let config = home.path().join("config.json");

    cesta(home.path())
        .args(["config", "init", "-o"])
        .arg(&config)
        .assert()
        .success();
    cesta(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "parser.rules_path"])
        .arg(&rules)
        .assert()
        .success();

    cesta(home.path())
        .arg("--config")
        .arg(&config)
        .args(["classify", "LECHE ENTERA", "PIZZA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lacteos\tLECHE ENTERA"))
        .stdout(predicate::str::contains("resto\tPIZZA"));
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");

    cesta(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "report.top_alerts", "3"])
        .assert()
        .success();

    cesta(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "report.top_alerts"])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));

    cesta(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "report.no_such_key", "1"])
        .assert()
        .failure();

    cesta(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "report.top_alerts", "many"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");

    cesta(home.path()).args(["config", "init", "-o"]).arg(&config).assert().success();
    cesta(home.path())
        .args(["config", "init", "-o"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    cesta(home.path())
        .args(["config", "init", "--force", "-o"])
        .arg(&config)
        .assert()
        .success();
}

#[test]
fn test_merge_directory() {
    let home = TempDir::new().unwrap();
    let pdfs = home.path().join("pdfs");
    fs::create_dir(&pdfs).unwrap();
    fs::write(pdfs.join("b_broken.pdf"), b"not a pdf").unwrap();
    fs::write(pdfs.join("a_broken.pdf"), b"also not a pdf").unwrap();
    fs::write(pdfs.join("notes.txt"), b"ignored").unwrap();
    let out = home.path().join("merged.txt");

    cesta(home.path())
        .arg("merge")
        .arg(&pdfs)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("0 processed, 2 failed"));

    let text = fs::read_to_string(&out).unwrap();
    let a = text.find("📄 a_broken.pdf").unwrap();
    let b = text.find("📄 b_broken.pdf").unwrap();
    assert!(a < b);
    assert!(text.contains("[Error leyendo PDF: "));
    assert!(!text.contains("notes.txt"));
}

#[test]
fn test_merge_empty_directory() {
    let home = TempDir::new().unwrap();
    cesta(home.path())
        .arg("merge")
        .arg(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No PDF files found"));
}
