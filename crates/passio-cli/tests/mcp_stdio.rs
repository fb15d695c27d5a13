use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

fn spawn_server() -> std::io::Result<Child> {
    let catalog =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/systems.json");

    Command::new(env!("CARGO_BIN_EXE_passio-cli"))
        .arg("mcp")
        .arg("--catalog")
        .arg(catalog)
        // Lookups must not reach a real provider from tests.
        .arg("--base-url")
        .arg("http://127.0.0.1:9")
        .env("RUST_LOG", "info")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
}

/// Ensures the child process is killed when the guard is dropped to avoid leaking processes on test failure.
struct ProcessGuard(Option<Child>);

impl ProcessGuard {
    fn new(child: Child) -> Self {
        Self(Some(child))
    }

    fn child_mut(&mut self) -> &mut Child {
        self.0.as_mut().expect("child taken")
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if let Some(mut c) = self.0.take() {
            let _ = c.kill();
            let _ = c.wait();
        }
    }
}

/// Line-oriented JSON-RPC session over the child's stdio.
struct Session {
    stdout: BufReader<ChildStdout>,
}

impl Session {
    fn open(child: &mut Child) -> Self {
        let stdout = child
            .stdout
            .take()
            .expect("child process should have stdout piped");
        Self {
            stdout: BufReader::new(stdout),
        }
    }

    fn send(&mut self, child: &mut Child, message: Value) -> std::io::Result<()> {
        let stdin = child
            .stdin
            .as_mut()
            .expect("child process should have stdin piped");
        writeln!(stdin, "{}", message)?;
        stdin.flush()
    }

    /// Read messages until the response with `id` arrives.
    fn response(&mut self, id: u64) -> std::io::Result<Value> {
        loop {
            let mut line = String::new();
            if self.stdout.read_line(&mut line)? == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "server closed stdout",
                ));
            }
            let message: Value = serde_json::from_str(&line).map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Failed to parse JSON response: {}", e),
                )
            })?;
            if message["id"] == json!(id) {
                return Ok(message);
            }
        }
    }

    fn initialize(&mut self, child: &mut Child) -> std::io::Result<Value> {
        self.send(
            child,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "stdio-test", "version": "0.0.0" }
                }
            }),
        )?;
        let response = self.response(1)?;
        self.send(
            child,
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        )?;
        Ok(response)
    }
}

fn wait_for_exit(child: &mut Child) -> std::process::ExitStatus {
    let start = Instant::now();
    loop {
        match child.try_wait().expect("Failed to check server status") {
            Some(status) => break status,
            None => {
                if start.elapsed() > Duration::from_secs(5) {
                    panic!("Server did not exit within timeout");
                }
                std::thread::sleep(Duration::from_millis(10));
            }
        }
    }
}

#[test]
fn test_stdio_isolation_initialize() {
    let mut guard = ProcessGuard::new(spawn_server().expect("Failed to spawn server"));
    let server = guard.child_mut();
    let mut session = Session::open(server);

    let response = session.initialize(server).expect("Failed to get response");

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["serverInfo"]["name"], "passiogo-mcp-server");
    assert!(response["result"]["capabilities"].get("tools").is_some());

    // Close stdin to signal EOF and allow server to exit gracefully
    drop(server.stdin.take());
    let exit_status = wait_for_exit(server);
    assert!(
        exit_status.success(),
        "Server exited with error: {:?}",
        exit_status
    );

    // Logging goes to stderr and never into the protocol stream
    let mut stderr = String::new();
    server
        .stderr
        .as_mut()
        .unwrap()
        .read_to_string(&mut stderr)
        .ok();
    assert!(stderr.contains("MCP server initialized"));

    let mut rest = String::new();
    session.stdout.read_to_string(&mut rest).ok();
    assert!(!rest.contains("MCP server initialized"));
}

#[test]
fn test_tools_list() {
    let mut guard = ProcessGuard::new(spawn_server().expect("Failed to spawn server"));
    let server = guard.child_mut();
    let mut session = Session::open(server);
    session.initialize(server).expect("handshake");

    session
        .send(
            server,
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list", "params": {} }),
        )
        .expect("send tools/list");
    let response = session.response(2).expect("Failed to get tools/list response");

    let tools = response["result"]["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 7);
    assert!(tools
        .iter()
        .any(|tool| tool["name"] == "get_stops_from_route"));

    drop(server.stdin.take());
    wait_for_exit(server);
}

#[test]
fn test_unknown_system_is_tool_error() {
    let mut guard = ProcessGuard::new(spawn_server().expect("Failed to spawn server"));
    let server = guard.child_mut();
    let mut session = Session::open(server);
    session.initialize(server).expect("handshake");

    session
        .send(
            server,
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {
                    "name": "get_routes_from_transportation_system",
                    "arguments": { "transportation_system_name": "Nonexistent University" }
                }
            }),
        )
        .expect("send tools/call");
    let response = session.response(3).expect("Failed to get tools/call response");

    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    let problem: Value = serde_json::from_str(text).unwrap();
    assert_eq!(problem["code"], 404);
    assert_eq!(problem["context"]["query"], "Nonexistent University");

    drop(server.stdin.take());
    wait_for_exit(server);
}
