//! Thin end-to-end check through the library-equivalent entry point
//! (`tileqr_cli::run`), not the built binary — the identity-matrix
//! scenario from spec §8, checking exit code and output shape.

use clap::Parser;
use tileqr_cli::cli::Cli;
use tileqr_testkit::scenarios;

fn write_matrix(path: &std::path::Path, m: usize, n: usize, data: &[f64]) {
    let mut text = format!("{m} {n}\n");
    for row in data.chunks(n) {
        let line = row.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
        text.push_str(&line);
        text.push('\n');
    }
    std::fs::write(path, text).unwrap();
}

#[test]
fn identity_matrix_runs_clean_and_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("identity.mat");
    let output_path = dir.path().join("out.mat");

    let (m, n, data) = scenarios::identity_4x4();
    write_matrix(&input_path, m, n, &data);

    let cli = Cli::parse_from([
        "tileqr",
        input_path.to_str().unwrap(),
        "--threads",
        "2",
        "--output",
        output_path.to_str().unwrap(),
    ]);

    let code = tileqr_cli::run(cli);
    assert_eq!(format!("{code:?}"), format!("{:?}", std::process::ExitCode::SUCCESS));

    let saved = std::fs::read_to_string(&output_path).unwrap();
    let mut lines = saved.lines();
    let header = lines.next().unwrap();
    assert_eq!(header, "4 4");
    assert_eq!(lines.count(), 4);
}

#[test]
fn missing_input_file_exits_with_load_failure_code() {
    let cli = Cli::parse_from(["tileqr", "/nonexistent/path/to/a.mat"]);
    let code = tileqr_cli::run(cli);
    assert_eq!(format!("{code:?}"), format!("{:?}", std::process::ExitCode::from(3)));
}

#[test]
fn invalid_tile_config_exits_with_config_error_code() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("identity.mat");
    let (m, n, data) = scenarios::identity_4x4();
    write_matrix(&input_path, m, n, &data);

    let cli = Cli::parse_from([
        "tileqr",
        input_path.to_str().unwrap(),
        "--alpha",
        "3",
        "--beta",
        "10",
    ]);

    let code = tileqr_cli::run(cli);
    assert_eq!(format!("{code:?}"), format!("{:?}", std::process::ExitCode::from(2)));
}
