use std::process::{Command, Output};

/// Runs the binary with a clean Weaviate environment plus `vars`.
fn run_embedscope(vars: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_embedscope"));
    command
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .env("RUST_LOG", "off")
        .env_remove("WEAVIATE_URL")
        .env_remove("WEAVIATE_API_KEY")
        .env_remove("WEAVIATE_TIMEOUT_SECS")
        .env_remove("WEAVIATE_COLLECTION")
        .env_remove("WEAVIATE_LABEL_PROPERTY")
        .env_remove("WEAVIATE_VECTOR_NAME")
        .env_remove("WEAVIATE_PAGE_SIZE")
        .env_remove("EMBEDSCOPE_VIEWER_BIN")
        .env_remove("EMBEDSCOPE_VIEWER_PORT");

    for (key, value) in vars {
        command.env(key, value);
    }

    command.output().expect("failed to run embedscope")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_missing_api_key_prints_one_error_line() {
    let output = run_embedscope(&[("WEAVIATE_URL", "http://127.0.0.1:1")]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec!["Error: configuration error: WEAVIATE_API_KEY is not set"]
    );
}

#[test]
fn test_missing_url_is_reported_before_the_key() {
    let output = run_embedscope(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec!["Error: configuration error: WEAVIATE_URL is not set"]
    );
}

#[test]
fn test_malformed_page_size_prints_one_error_line() {
    let output = run_embedscope(&[
        ("WEAVIATE_URL", "http://127.0.0.1:1"),
        ("WEAVIATE_API_KEY", "key"),
        ("WEAVIATE_PAGE_SIZE", "abc"),
    ]);

    assert_eq!(output.status.code(), Some(1));

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Error: configuration error: invalid value 'abc'"));
    assert!(lines[0].contains("--page-size"));
}

#[test]
fn test_out_of_range_viewer_port_prints_one_error_line() {
    let output = run_embedscope(&[
        ("WEAVIATE_URL", "http://127.0.0.1:1"),
        ("WEAVIATE_API_KEY", "key"),
        ("EMBEDSCOPE_VIEWER_PORT", "99999"),
    ]);

    assert_eq!(output.status.code(), Some(1));

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Error: configuration error: "));
    assert!(lines[0].contains("99999"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let output = Command::new(env!("CARGO_BIN_EXE_embedscope"))
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .env("RUST_LOG", "debug")
        .env("WEAVIATE_URL", "http://127.0.0.1:1")
        .env_remove("WEAVIATE_API_KEY")
        .output()
        .expect("failed to run embedscope");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_lines(&output).len(), 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration"));
}
