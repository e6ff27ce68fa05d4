//! Node.js toolchain detection

use anyhow::Result;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn detect_tool(name: &'static str, program: &str) -> RuntimeInfo {
    let program = if cfg!(windows) && program != "node" {
        format!("{}.cmd", program)
    } else {
        program.to_string()
    };
    let output = Command::new(&program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => RuntimeInfo {
            name,
            version: Some(String::from_utf8_lossy(&out.stdout).trim().to_string()),
            available: true,
        },
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    detect_tool("Node.js", "node")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    detect_tool("npm", "npm")
}

/// Fail with one message listing every missing tool
pub fn check_runtimes() -> Result<Vec<RuntimeInfo>> {
    let results = vec![check_node(), check_npm()];
    let missing: Vec<&str> = results
        .iter()
        .filter(|r| !r.available)
        .map(|r| r.name)
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required runtimes:\n{}\nInstall Node.js (which ships npm) from https://nodejs.org",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    for info in &results {
        log::debug!(
            "{} {}",
            info.name,
            info.version.as_deref().unwrap_or("unknown version")
        );
    }
    Ok(results)
}
