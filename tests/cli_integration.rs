use std::fs;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_solar-audit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("solar-audit process should run")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

#[test]
fn full_report_with_contact() {
    let output = run_cli(&[
        "--region",
        "santiago",
        "--bill",
        "80000",
        "--name",
        "Ana",
        "--email",
        "ana@example.cl",
    ]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = stdout_of(&output);
    assert!(stdout.contains("--- Solar Audit: Santiago ---"));
    assert!(stdout.contains("$987.360/year"));
    assert!(stdout.contains("8 panels"));
    assert!(stdout.contains("4.2 years"));
    assert!(stdout.contains("Bill with solar:       $0/month"));
}

#[test]
fn teaser_only_without_contact() {
    let output = run_cli(&["--region", "santiago"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    // default bill is 80 000
    assert!(stdout.contains("Estimated savings: $987.360/year"));
    assert!(!stdout.contains("Panels needed"));
}

#[test]
fn unknown_region_fails() {
    let output = run_cli(&["--region", "nonexistent-slug"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown region"), "stderr={stderr}");
}

#[test]
fn bill_outside_slider_range_fails() {
    let output = run_cli(&["--region", "santiago", "--bill", "1000"]);
    assert!(!output.status.success());
}

#[test]
fn lists_builtin_regions() {
    let output = run_cli(&["--list-regions"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    // header + 19 regions
    assert_eq!(stdout.lines().count(), 20);
    assert!(stdout.contains("puerto-montt"));
}

#[test]
fn custom_config_replaces_table() {
    let output = run_cli(&["--config", "configs/north.toml", "--list-regions"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).lines().count(), 5);

    let output = run_cli(&["--config", "configs/north.toml", "--region", "santiago"]);
    assert!(!output.status.success());

    let output = run_cli(&["--config", "configs/north.toml", "--region", "calama"]);
    assert!(output.status.success());
}

#[test]
fn projection_csv_export() {
    let path = std::env::temp_dir().join(format!("solar-audit-{}.csv", std::process::id()));
    let path_str = path.to_str().expect("temp path should be UTF-8");
    let output = run_cli(&[
        "--region",
        "calama",
        "--bill",
        "150000",
        "--name",
        "Ana",
        "--email",
        "ana@example.cl",
        "--projection-out",
        path_str,
    ]);
    assert!(output.status.success());

    let csv = fs::read_to_string(&path).expect("CSV should be written");
    let _ = fs::remove_file(&path);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("year,cumulative_grid,cumulative_solar,difference")
    );
    assert_eq!(lines.count(), 21);
}

#[test]
fn unknown_argument_fails() {
    let output = run_cli(&["--frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn oversized_projection_horizon_is_rejected() {
    let path = std::env::temp_dir().join(format!("solar-audit-horizon-{}.toml", std::process::id()));
    fs::write(&path, "[projection]\nyears = 3000000000\n").expect("config should be written");
    let path_str = path.to_str().expect("temp path should be UTF-8");
    let output = run_cli(&[
        "--config",
        path_str,
        "--region",
        "santiago",
        "--name",
        "Ana",
        "--email",
        "ana@example.cl",
    ]);
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("projection.years"), "stderr={stderr}");
}
