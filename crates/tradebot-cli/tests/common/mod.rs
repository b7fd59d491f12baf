use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Isolated token file and backend URL for one test.
pub struct TestEnv {
    _dir: TempDir,
    token_file: PathBuf,
    api_url: String,
}

impl TestEnv {
    pub fn new(api_url: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let token_file = dir.path().join("tokens.json");
        Self {
            _dir: dir,
            token_file,
            api_url: api_url.to_string(),
        }
    }

    pub fn token_file(&self) -> &Path {
        &self.token_file
    }

    /// Write a token pair as if a previous `auth login` had succeeded.
    pub fn seed_tokens(&self, access: &str, refresh: &str) {
        let json = serde_json::json!({
            "access_token": access,
            "refresh_token": refresh
        });
        std::fs::write(&self.token_file, json.to_string()).unwrap();
    }

    /// Read back the token file as JSON.
    pub fn stored_tokens(&self) -> Value {
        let content = std::fs::read_to_string(&self.token_file).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    /// A CLI command pointed at this environment.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tradebot"));
        cmd.args(args);
        cmd.env("TRADEBOT_API_URL", &self.api_url);
        cmd.env("TRADEBOT_TOKEN_FILE", &self.token_file);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("TRADEBOT_PASSWORD");
        cmd.env_remove("RUST_LOG");
        cmd
    }
}

/// Run a command off the async runtime so the mock server keeps serving.
pub async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute CLI"))
        .await
        .unwrap()
}

/// Run a command and expect success, returning stdout.
pub async fn run_success(cmd: Command) -> String {
    let output = run(cmd).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed\nstderr: {}", stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run a command and expect failure, returning stderr.
pub async fn run_failure(cmd: Command) -> String {
    let output = run(cmd).await;
    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("CLI command should have failed\nstdout: {}", stdout);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
