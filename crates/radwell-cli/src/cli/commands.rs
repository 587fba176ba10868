use super::CliError;
use anyhow::Context;
use radwell_core::common::constants::{ALPHA_NEUTRON_REDUCED_MASS_MEV, RADDEG};
use radwell_core::{
    overlap_integral, phase_shift, solve_bound_state, MassCoupling, OriginStart, PotentialParams,
    QuantumLabels, RadialGrid, RadialWavefunction, SearchOptions,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub(super) enum StartArg {
    /// Power-law origin seed u(h) = h^(l+1)
    PowerLaw,
    /// Riccati-Bessel origin seed at the local wavenumber
    RiccatiBessel,
}

impl StartArg {
    fn as_origin_start(self) -> OriginStart {
        match self {
            Self::PowerLaw => OriginStart::PowerLaw,
            Self::RiccatiBessel => OriginStart::RiccatiBessel,
        }
    }
}

#[derive(clap::Args)]
pub(super) struct PotentialArgs {
    /// Well depth V0 in MeV (positive magnitude)
    #[arg(long = "v0")]
    depth_mev: f64,
    /// Well radius R0 in fm
    #[arg(long = "r0")]
    radius_fm: f64,
    /// Diffuseness a0 in fm
    #[arg(long = "a0")]
    diffuseness_fm: f64,
}

impl PotentialArgs {
    fn as_params(&self) -> Result<PotentialParams, CliError> {
        Ok(PotentialParams::new(
            self.depth_mev,
            self.radius_fm,
            self.diffuseness_fm,
        )?)
    }
}

#[derive(clap::Args)]
pub(super) struct GridArgs {
    /// Outer radius r_max in fm
    #[arg(long = "r-max")]
    r_max_fm: f64,
    /// Radial step h in fm
    #[arg(long = "step")]
    step_fm: f64,
}

impl GridArgs {
    fn as_grid(&self) -> Result<RadialGrid, CliError> {
        Ok(RadialGrid::new(self.step_fm, self.r_max_fm)?)
    }
}

#[derive(clap::Args)]
pub(super) struct BoundArgs {
    #[command(flatten)]
    potential: PotentialArgs,
    #[command(flatten)]
    grid: GridArgs,
    /// Orbital angular momentum l
    #[arg(short = 'l', long = "angular-momentum")]
    l: u32,
    /// Principal label n; the state carries n - l - 1 nodes
    #[arg(short = 'n', long = "principal")]
    n: u32,
    /// Reduced mass in MeV/c^2
    #[arg(long = "reduced-mass", default_value_t = ALPHA_NEUTRON_REDUCED_MASS_MEV)]
    reduced_mass_mev: f64,
    /// Write the full result to this JSON path
    #[arg(long = "json")]
    json: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct PhaseArgs {
    #[command(flatten)]
    potential: PotentialArgs,
    #[command(flatten)]
    grid: GridArgs,
    /// Orbital angular momentum l
    #[arg(short = 'l', long = "angular-momentum")]
    l: u32,
    /// First scattering energy in MeV
    #[arg(long = "e-min")]
    e_min_mev: f64,
    /// Last scattering energy in MeV
    #[arg(long = "e-max")]
    e_max_mev: f64,
    /// Energy step in MeV
    #[arg(long = "e-step", default_value_t = 0.1)]
    e_step_mev: f64,
    /// Reduced mass in MeV/c^2
    #[arg(long = "reduced-mass", default_value_t = ALPHA_NEUTRON_REDUCED_MASS_MEV)]
    reduced_mass_mev: f64,
    /// Origin initializer
    #[arg(long = "start", value_enum, default_value = "riccati-bessel")]
    start: StartArg,
    /// Write the table to this JSON path
    #[arg(long = "json")]
    json: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct OverlapArgs {
    /// Bound-state artifact of the initial state
    #[arg(long = "initial")]
    initial: PathBuf,
    /// Bound-state artifact of the final state
    #[arg(long = "final")]
    final_state: PathBuf,
}

/// JSON artifact shared by `bound --json` and `overlap`.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct BoundStateArtifact {
    pub potential: PotentialParams,
    pub l: u32,
    pub n: u32,
    pub reduced_mass_mev: f64,
    pub energy_mev: f64,
    pub node_count: usize,
    pub boundary_value: f64,
    pub converged: bool,
    pub wavefunction: Option<RadialWavefunction>,
}

#[derive(Debug, Serialize)]
struct PhaseTableArtifact {
    potential: PotentialParams,
    l: u32,
    reduced_mass_mev: f64,
    rows: Vec<PhaseRow>,
}

#[derive(Debug, Serialize)]
struct PhaseRow {
    energy_mev: f64,
    delta_rad: f64,
    delta_deg: f64,
}

pub(super) fn run_bound_command(args: BoundArgs) -> Result<i32, CliError> {
    let params = args.potential.as_params()?;
    let grid = args.grid.as_grid()?;
    let coupling = MassCoupling::from_reduced_mass_mev(args.reduced_mass_mev)?;
    let labels = QuantumLabels::new(args.l, args.n)?;

    let result = solve_bound_state(&params, coupling, labels, grid, &SearchOptions::default())?;
    tracing::info!(
        energy_mev = result.energy_mev,
        converged = result.converged,
        bisections = result.bisections,
        "bound-state search finished"
    );

    println!(
        "l={} n={} E={:.6} MeV nodes={} boundary={:.3e} converged={}",
        args.l,
        args.n,
        result.energy_mev,
        result.node_count,
        result.boundary_value,
        result.converged
    );

    if let Some(path) = args.json {
        let artifact = BoundStateArtifact {
            potential: params,
            l: args.l,
            n: args.n,
            reduced_mass_mev: args.reduced_mass_mev,
            energy_mev: result.energy_mev,
            node_count: result.node_count,
            boundary_value: result.boundary_value,
            converged: result.converged,
            wavefunction: result.normalized.clone(),
        };
        let rendered = serde_json::to_string_pretty(&artifact)
            .context("serializing bound-state artifact")?;
        fs::write(&path, rendered)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(0)
}

pub(super) fn run_phase_command(args: PhaseArgs) -> Result<i32, CliError> {
    if !(args.e_step_mev > 0.0) || !(args.e_min_mev > 0.0) || args.e_max_mev < args.e_min_mev {
        return Err(CliError::Usage(format!(
            "energy range must satisfy 0 < e-min <= e-max with a positive e-step, \
             got e-min={}, e-max={}, e-step={}",
            args.e_min_mev, args.e_max_mev, args.e_step_mev
        )));
    }

    let params = args.potential.as_params()?;
    let grid = args.grid.as_grid()?;
    let coupling = MassCoupling::from_reduced_mass_mev(args.reduced_mass_mev)?;
    let start = args.start.as_origin_start();

    let mut rows = Vec::new();
    let mut energy = args.e_min_mev;
    while energy <= args.e_max_mev + 1.0e-9 {
        let result = phase_shift(&params, coupling, energy, args.l, grid, start)?;
        println!(
            "E={:.4} MeV  l={}  delta={:.5} rad ({:.3} deg)",
            energy,
            args.l,
            result.delta_rad,
            result.delta_rad * RADDEG
        );
        rows.push(PhaseRow {
            energy_mev: energy,
            delta_rad: result.delta_rad,
            delta_deg: result.delta_rad * RADDEG,
        });
        energy += args.e_step_mev;
    }

    if let Some(path) = args.json {
        let artifact = PhaseTableArtifact {
            potential: params,
            l: args.l,
            reduced_mass_mev: args.reduced_mass_mev,
            rows,
        };
        let rendered =
            serde_json::to_string_pretty(&artifact).context("serializing phase table")?;
        fs::write(&path, rendered)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(0)
}

pub(super) fn run_overlap_command(args: OverlapArgs) -> Result<i32, CliError> {
    let initial = read_artifact(&args.initial)?;
    let final_state = read_artifact(&args.final_state)?;

    let overlap = overlap_integral(&initial, &final_state)?;
    println!("overlap={overlap:.8}");
    Ok(0)
}

fn read_artifact(path: &PathBuf) -> Result<RadialWavefunction, CliError> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let artifact: BoundStateArtifact = serde_json::from_str(&source)
        .with_context(|| format!("parsing {}", path.display()))?;
    artifact.wavefunction.ok_or_else(|| {
        CliError::Usage(format!(
            "{} carries no normalized wavefunction (search did not converge)",
            path.display()
        ))
    })
}
