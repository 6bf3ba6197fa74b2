use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use polrecip::recip::RecipOutput;

/// Options a run was started with, as given on the command line.
#[derive(Debug, Serialize)]
pub struct RunParams {
    pub input: Option<String>,
    pub center: Option<String>,
    pub init_center: Option<String>,
    pub radius: Option<String>,
    pub init_radius: Option<f64>,
    pub invert: bool,
    pub ideal_cap: f64,
    pub extra_ideal_elems: bool,
    pub max_iters: i64,
    pub sig_digits: i32,
    pub append: bool,
}

/// What a run achieved.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub center: [f64; 3],
    pub radius: f64,
    pub iters: Option<usize>,
    pub converged: Option<bool>,
    pub warnings: Vec<String>,
    pub num_verts: usize,
    pub num_faces: usize,
}

impl From<&RecipOutput> for RunResult {
    fn from(out: &RecipOutput) -> Self {
        Self {
            center: [out.center.x, out.center.y, out.center.z],
            radius: out.radius,
            iters: out.ctx.map(|c| c.iters),
            converged: out.ctx.map(|c| c.converged),
            warnings: out.warnings.iter().map(|w| w.to_string()).collect(),
            num_verts: out.mesh.verts.len(),
            num_faces: out.mesh.faces.len(),
        }
    }
}

/// Metadata used to generate a provenance sidecar.
pub struct Payload {
    pub params: Value,
    pub result: Value,
}

impl Payload {
    pub fn new(params: &RunParams, result: &RunResult) -> Result<Self> {
        Ok(Self {
            params: serde_json::to_value(params)?,
            result: serde_json::to_value(result)?,
        })
    }
}

/// Write `<artifact>.provenance.json` containing the git commit, callsite, params, result and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": polrecip::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "result": payload.result,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}
