use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_pogodex")
}

fn unique_temp_path(name: &str, ext: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("pogodex-{name}-{stamp}.{ext}"))
}

fn pogodex(search_state: &PathBuf) -> Command {
    let mut command = Command::new(bin());
    command
        .env("POGODEX_DATA", "data/pokemon.json")
        .env("POGODEX_SEARCH_STATE", search_state);
    command
}

#[test]
fn no_command_prints_usage() {
    let output = Command::new(bin()).output().expect("pogodex should run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: pogodex"));
}

#[test]
fn list_filters_by_term() {
    let state = unique_temp_path("list-state", "json");
    let output = pogodex(&state)
        .args(["list", "saur"])
        .output()
        .expect("list should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["#001\tBulbasaur", "#002\tIvysaur", "#003\tVenusaur"]);
}

#[test]
fn search_persists_term_for_later_list() {
    let state = unique_temp_path("search-state", "json");
    let output = pogodex(&state)
        .args(["search", "MEW"])
        .output()
        .expect("search should run");
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("#150\tMewtwo"));

    let output = pogodex(&state).arg("list").output().expect("list should run");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["#150\tMewtwo", "#151\tMew"]);

    let _ = fs::remove_file(state);
}

#[test]
fn show_prints_detail_text() {
    let state = unique_temp_path("show-state", "json");
    let output = pogodex(&state)
        .args(["show", "150"])
        .output()
        .expect("show should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("#150 Mewtwo"));
    assert!(stdout.contains("  L40: 4015 - 4178"));
    assert!(stdout.contains("Fundo at L40"));
    assert!(stdout.contains("SHINY RELEASED: Not Released"));
}

#[test]
fn show_json_emits_detail_payload() {
    let state = unique_temp_path("show-json-state", "json");
    let output = pogodex(&state)
        .args(["show", "6", "--json"])
        .output()
        .expect("show should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("show --json should emit json");
    assert_eq!(payload["card"]["name"], "Charizard");
    assert_eq!(payload["cp_ranges"][6]["high"], 3266);
}

#[test]
fn show_unknown_number_fails() {
    let state = unique_temp_path("show-missing-state", "json");
    let output = pogodex(&state)
        .args(["show", "9999"])
        .output()
        .expect("show should run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("species #9999 not found"));

    let output = pogodex(&state).arg("show").output().expect("show should run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn export_writes_csv() {
    let state = unique_temp_path("export-state", "json");
    let path = unique_temp_path("export", "csv");
    let output = pogodex(&state)
        .args(["export", path.to_string_lossy().as_ref()])
        .env("POGODEX_WORKERS", "2")
        .output()
        .expect("export should run");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("export complete: rows=18"));

    let csv = fs::read_to_string(&path).expect("export should be written");
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("number,name,atk,def,hit,cp_l15_min"));
    assert!(lines.next().unwrap().starts_with("1,Bulbasaur,118,111,128,"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_passes_bundled_dataset_and_rejects_broken_one() {
    let state = unique_temp_path("validate-state", "json");
    let output = pogodex(&state).arg("validate").output().expect("validate should run");
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("validation passed"));

    let broken = unique_temp_path("broken", "json");
    fs::write(
        &broken,
        r#"[{"number":1,"name":"","atk":1,"def":1,"hit":1},{"number":1,"name":"Dup","atk":1,"def":1,"hit":1}]"#,
    )
    .expect("fixture should be written");
    let output = pogodex(&state)
        .args(["validate", broken.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("validation failed: 2 issue(s)"));

    let _ = fs::remove_file(broken);
}

#[test]
fn missing_dataset_is_runtime_error() {
    let state = unique_temp_path("missing-state", "json");
    let output = pogodex(&state)
        .env("POGODEX_DATA", "no/such/dataset.json")
        .arg("list")
        .output()
        .expect("list should run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no/such/dataset.json"));
}
