//! Binary harness: runs the real `pcap-agent` executable.
//!
//! # What this covers
//!
//! - `prompt` from a file and from stdin.
//! - `config path` / `config init` / `config show` against a temp config.
//! - `analyze` in text and JSON modes against the fake services, including
//!   the non-zero exit when only the LLM step fails.
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;
use common::fake_llm_api::FakeLlmApi;
use common::fake_parser_api::FakeParserApi;
use common::*;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

const BIN: &str = env!("CARGO_BIN_EXE_pcap-agent");

fn command(dir: &Path) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(BIN);
    cmd.env("XDG_CONFIG_HOME", dir)
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null());
    cmd
}

/// Config file pointing both services at the fakes.
fn write_config(dir: &Path, parser_url: &str, llm_url: &str) -> PathBuf {
    let path = dir.join("test.toml");
    std::fs::write(
        &path,
        format!(
            "[parser]\nurl = \"{parser_url}\"\ntimeout_secs = 5\n\n\
             [llm]\nurl = \"{llm_url}\"\ntimeout_secs = 5\n"
        ),
    )
    .unwrap();
    path
}

fn capture(dir: &Path) -> PathBuf {
    let path = dir.join("office.pcap");
    std::fs::write(&path, PCAP_BYTES).unwrap();
    path
}

#[tokio::test]
async fn prompt_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let response = dir.path().join("response.json");
    std::fs::write(&response, office_capture().to_string()).unwrap();

    let out = command(dir.path())
        .args(["prompt", response.to_str().unwrap()])
        .output()
        .await
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("You are a network traffic analyst."));
    assert!(stdout.contains("- 10.0.0.1:1 -> 8.8.8.8:53 (UDP, 40000)\n"));
}

#[tokio::test]
async fn prompt_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = command(dir.path())
        .args(["prompt", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    {
        let mut stdin = child.stdin.take().unwrap();
        let body = list_shaped_capture().to_string();
        tokio::io::AsyncWriteExt::write_all(&mut stdin, body.as_bytes()).await.unwrap();
    }
    let out = child.wait_with_output().await.unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout).unwrap().contains("- ARP: 3\n"));
}

#[tokio::test]
async fn prompt_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let response = dir.path().join("broken.json");
    let mut file = std::fs::File::create(&response).unwrap();
    file.write_all(b"{ not json").unwrap();

    let out = command(dir.path())
        .args(["prompt", response.to_str().unwrap()])
        .output()
        .await
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not valid JSON"));
}

#[tokio::test]
async fn config_init_path_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let expected = dir.path().join("pcap-agent").join("config.toml");

    let out = command(dir.path()).args(["config", "path"]).output().await.unwrap();
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim(), expected.display().to_string());

    let out = command(dir.path()).args(["config", "init"]).output().await.unwrap();
    assert!(out.status.success());
    assert!(expected.exists());

    // A second init refuses to clobber the file.
    let out = command(dir.path()).args(["config", "init"]).output().await.unwrap();
    assert!(!out.status.success());

    let out = command(dir.path())
        .args(["config", "show"])
        .env("PCAP_AGENT__LLM__MODEL", "llama3")
        .output()
        .await
        .unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("model        = \"llama3\""), "{stdout}");
    assert!(stdout.contains("[parser]"));
}

#[tokio::test]
async fn analyze_text_output_includes_report() {
    let parser = FakeParserApi::start(office_capture()).await.unwrap();
    let llm = FakeLlmApi::start("All quiet on the wire.").await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &parser.parse_url(), &llm.openai_url());

    let out = command(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("analyze")
        .arg(capture(dir.path()))
        .output()
        .await
        .unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout.contains("  Packets         12,345\n"));
    assert!(stdout.contains("  Total bytes     9.4 MB\n"));
    assert!(stdout.ends_with("Report\nAll quiet on the wire.\n"));
}

#[tokio::test]
async fn analyze_json_without_llm() {
    let parser = FakeParserApi::start(office_capture()).await.unwrap();
    let llm = FakeLlmApi::start("unused").await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &parser.parse_url(), &llm.openai_url());

    let out = command(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["analyze", "--no-llm", "--output", "json"])
        .arg(capture(dir.path()))
        .output()
        .await
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["report"], serde_json::Value::Null);
    assert_eq!(value["charts"]["protocols"][0]["label"], "TCP");
    assert!(llm.requests().await.is_empty());
}

#[tokio::test]
async fn llm_failure_still_prints_statistics() {
    let parser = FakeParserApi::start(office_capture()).await.unwrap();
    let llm = FakeLlmApi::start("unused").await.unwrap();
    llm.fail_with(500).await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &parser.parse_url(), &llm.openai_url());

    let out = command(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("analyze")
        .arg(capture(dir.path()))
        .output()
        .await
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8(out.stdout).unwrap().contains("Protocols\n  TCP"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("LLM report failed"));
}
