use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use polrecip::mesh::Mesh;
use polrecip::recip::cfg::{DEFAULT_IDEAL_CAP, DEFAULT_MAX_ITERS};
use polrecip::recip::{
    reciprocate, CenterMode, InitCenter, IterCfg, RadiusMode, RecipConfig, RecipOutput,
};

mod provenance;

/// Read a file in OFF format and make a polar reciprocal from the face planes.
#[derive(Parser, Debug)]
#[command(name = "pol_recip", version)]
struct Cmd {
    /// Input OFF file (stdin if absent)
    input: Option<PathBuf>,

    /// Reciprocation centre: C centroid, R circumcentre, M midsphere,
    /// e/v/a canonical edge, vertex/face or both (E/V/A invert the working
    /// dual), or X,Y,Z
    #[arg(short = 'c', value_name = "cent", allow_hyphen_values = true)]
    center: Option<String>,

    /// Initial centre for the iterative solvers: C centroid, M midsphere, or X,Y,Z
    #[arg(short = 'C', value_name = "init", allow_hyphen_values = true)]
    init_center: Option<String>,

    /// Reciprocation radius: a value, nearest/farthest v/V vertex, e/E edge,
    /// f/F face, or vertex indices whose span the radius touches
    #[arg(short = 'r', value_name = "rad", allow_hyphen_values = true)]
    radius: Option<String>,

    /// Initial radius for the iterative solvers (0 lets them estimate one)
    #[arg(short = 'R', value_name = "rad", allow_negative_numbers = true)]
    init_radius: Option<f64>,

    /// Invert the final dual through the centre
    #[arg(short = 'i')]
    invert: bool,

    /// Maximum distance for ideal or very distant dual vertices; 0 deletes
    /// ideal vertices
    #[arg(short = 'I', value_name = "dist", default_value_t = DEFAULT_IDEAL_CAP, allow_negative_numbers = true)]
    ideal_cap: f64,

    /// Exclude extra elements added to duals with ideal vertices
    #[arg(short = 'x')]
    no_extra: bool,

    /// Maximum number of iterations for the centre solvers
    #[arg(short = 'n', value_name = "itrs", default_value_t = DEFAULT_MAX_ITERS as i64, allow_negative_numbers = true)]
    iters: i64,

    /// Termination limit in significant digits (epsilon = 10^-lim)
    #[arg(short = 'l', value_name = "lim", default_value_t = 12, allow_negative_numbers = true)]
    sig_digits: i32,

    /// Append the dual to the original polyhedron
    #[arg(short = 'a')]
    append: bool,

    /// Write output to file (stdout if absent)
    #[arg(short = 'o', value_name = "file")]
    output: Option<PathBuf>,

    /// Write `<output>.provenance.json` next to the output file
    #[arg(long)]
    provenance: bool,
}

impl Cmd {
    /// Map options onto a `RecipConfig`; range checks happen in `RecipConfig::validate`.
    fn config(&self) -> Result<RecipConfig> {
        let mut cfg = RecipConfig::default();
        if let Some(s) = &self.center {
            cfg.center = s
                .parse::<CenterMode>()
                .with_context(|| format!("option -c '{s}'"))?;
        }
        if let Some(s) = &self.init_center {
            cfg.init_center = s
                .parse::<InitCenter>()
                .with_context(|| format!("option -C '{s}'"))?;
        }
        if let Some(s) = &self.radius {
            cfg.radius = s
                .parse::<RadiusMode>()
                .with_context(|| format!("option -r '{s}'"))?;
        }
        cfg.init_radius = self.init_radius.filter(|r| *r != 0.0);
        cfg.invert = self.invert;
        cfg.ideal_cap = self.ideal_cap;
        cfg.extra_ideal_elems = !self.no_extra;
        cfg.append = self.append;
        cfg.iter.max_iters =
            IterCfg::max_iters_from(self.iters).with_context(|| format!("option -n {}", self.iters))?;
        let (epsilon, warning) = IterCfg::epsilon_from_sig_digits(self.sig_digits);
        if let Some(w) = warning {
            tracing::warn!(lim = self.sig_digits, "{w}");
        }
        cfg.iter.epsilon = epsilon;
        Ok(cfg)
    }

    fn params(&self) -> provenance::RunParams {
        provenance::RunParams {
            input: self.input.as_ref().map(|p| p.display().to_string()),
            center: self.center.clone(),
            init_center: self.init_center.clone(),
            radius: self.radius.clone(),
            init_radius: self.init_radius,
            invert: self.invert,
            ideal_cap: self.ideal_cap,
            extra_ideal_elems: !self.no_extra,
            max_iters: self.iters,
            sig_digits: self.sig_digits,
            append: self.append,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    run(&cmd).map(|_| ())
}

fn run(cmd: &Cmd) -> Result<RecipOutput> {
    let cfg = cmd.config()?;
    let text = read_input(cmd.input.as_deref())?;
    let primal = Mesh::from_off_str(&text).with_context(|| format!("reading {}", input_name(cmd)))?;
    tracing::info!(
        input = %input_name(cmd),
        verts = primal.verts.len(),
        faces = primal.faces.len(),
        "read"
    );

    let out = reciprocate(&primal, &cfg).with_context(|| input_name(cmd))?;
    tracing::info!(
        center = ?[out.center.x, out.center.y, out.center.z],
        radius = out.radius,
        warnings = out.warnings.len(),
        "reciprocated"
    );

    write_output(cmd.output.as_deref(), &out.mesh.to_off_string())?;
    if cmd.provenance {
        match &cmd.output {
            Some(path) => {
                let payload = provenance::Payload::new(
                    &cmd.params(),
                    &provenance::RunResult::from(&out),
                )?;
                let prov = provenance::write_sidecar(path, payload)?;
                tracing::info!(path = %prov.display(), "provenance");
            }
            None => tracing::warn!("--provenance needs an output file (-o); skipped"),
        }
    }
    Ok(out)
}

fn input_name(cmd: &Cmd) -> String {
    cmd.input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("opening {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => {
            if let Some(parent) = p.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating {}", parent.display()))?;
                }
            }
            std::fs::write(p, text).with_context(|| format!("writing {}", p.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .context("writing stdout")
        }
    }
}
