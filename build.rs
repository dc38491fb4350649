//! Embeds the git commit the binary was built from, reported by `/status`.
//!
//! Resolution order: WALL_GIT_SHA (CI override), GITHUB_SHA (shortened),
//! the local git checkout, then "unknown".

use std::process::Command;

fn main() {
    let sha = std::env::var("WALL_GIT_SHA")
        .or_else(|_| std::env::var("GITHUB_SHA").map(|s| s.chars().take(7).collect()))
        .unwrap_or_else(|_| local_git_sha());
    println!("cargo:rustc-env=WALL_GIT_SHA={sha}");

    println!("cargo:rerun-if-env-changed=WALL_GIT_SHA");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");
}

fn local_git_sha() -> String {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output();
    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        _ => "unknown".into(),
    }
}
