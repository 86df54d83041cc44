//! # Terrastat CLI Application
//!
//! Command-line front end for soil_core.
//!
//! ```text
//! terrastat solve --w 0.2 --gs 2.7 --e 0.6667
//! terrastat solve --input sample.json --saturation saturated --json
//! terrastat relative-density --e 0.5 --e-max 0.8 --e-min 0.3
//! terrastat formula --target gamma_dry --known Gs,e
//! terrastat batch --input samples.json
//! terrastat identities
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `--verbose`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use soil_core::calculations::CalculationOutput;
use soil_core::identities::format_number;
use soil_core::{
    find_formulas, load_batch, load_phase_input, relative_density, save_json, solve_with, CalcError, CalculationItem,
    FormulaSearch, PhaseInput, PhaseResult, Quantity, RelativeDensityResult, RuleSet, SaturationCondition,
    SolverOptions,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Soil phase relationship calculator", long_about = None)]
struct Cli {
    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive every phase quantity determined by the known ones
    Solve(SolveArgs),
    /// Relative density and density state from e, e_max and e_min
    RelativeDensity(RelativeDensityArgs),
    /// List the identities that give a target from known quantities
    Formula(FormulaArgs),
    /// Run a JSON array of tagged calculations
    Batch(BatchArgs),
    /// Print the identity reference as markdown
    Identities,
}

#[derive(Args, Debug, Default)]
struct SolveArgs {
    /// Water content (fraction)
    #[arg(long)]
    w: Option<f64>,
    /// Specific gravity of solids
    #[arg(long)]
    gs: Option<f64>,
    /// Void ratio
    #[arg(long)]
    e: Option<f64>,
    /// Porosity
    #[arg(long)]
    n: Option<f64>,
    /// Degree of saturation (fraction)
    #[arg(long)]
    sr: Option<f64>,
    /// Air content (fraction of total volume)
    #[arg(long)]
    na: Option<f64>,
    /// Bulk density (Mg/m³)
    #[arg(long)]
    rho_bulk: Option<f64>,
    /// Dry density (Mg/m³)
    #[arg(long)]
    rho_dry: Option<f64>,
    /// Bulk unit weight (kN/m³)
    #[arg(long)]
    gamma_bulk: Option<f64>,
    /// Dry unit weight (kN/m³)
    #[arg(long)]
    gamma_dry: Option<f64>,
    /// Saturated unit weight (kN/m³)
    #[arg(long)]
    gamma_sat: Option<f64>,
    /// Submerged unit weight (kN/m³)
    #[arg(long)]
    gamma_sub: Option<f64>,

    /// Declared moisture state; overrides the input file
    #[arg(long, value_enum)]
    saturation: Option<SaturationArg>,

    /// Also apply the density and unit weight extensions
    #[arg(long)]
    extended: bool,

    /// Propagation pass cap (1-15)
    #[arg(long)]
    max_passes: Option<usize>,

    /// JSON file with a phase input; flags override its values
    #[arg(long)]
    input: Option<PathBuf>,

    /// Also save the result as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RelativeDensityArgs {
    /// Current void ratio
    #[arg(long)]
    e: f64,
    /// Void ratio in the loosest state
    #[arg(long)]
    e_max: f64,
    /// Void ratio in the densest state
    #[arg(long)]
    e_min: f64,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct FormulaArgs {
    /// Quantity wanted, e.g. gamma_dry
    #[arg(long, value_parser = parse_quantity)]
    target: Quantity,
    /// Quantities known, comma separated, e.g. Gs,e
    #[arg(long, value_parser = parse_quantity, value_delimiter = ',')]
    known: Vec<Quantity>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// JSON array of calculations
    #[arg(long)]
    input: PathBuf,
    /// Also apply the density and unit weight extensions
    #[arg(long)]
    extended: bool,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SaturationArg {
    Partial,
    Saturated,
    Dry,
}

impl From<SaturationArg> for SaturationCondition {
    fn from(arg: SaturationArg) -> Self {
        match arg {
            SaturationArg::Partial => SaturationCondition::PartiallySaturated,
            SaturationArg::Saturated => SaturationCondition::FullySaturated,
            SaturationArg::Dry => SaturationCondition::Dry,
        }
    }
}

fn parse_quantity(s: &str) -> Result<Quantity, String> {
    s.parse().map_err(|e: CalcError| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Solve(args) => run_solve(&args),
        Command::RelativeDensity(args) => run_relative_density(&args),
        Command::Formula(args) => run_formula(&args),
        Command::Batch(args) => run_batch(&args),
        Command::Identities => {
            print!("{}", soil_core::identities::generate_identities_markdown());
            Ok(())
        }
    }
}

// ============================================================================
// Solve
// ============================================================================

impl SolveArgs {
    fn flag_values(&self) -> [(Quantity, Option<f64>); 12] {
        [
            (Quantity::WaterContent, self.w),
            (Quantity::SpecificGravity, self.gs),
            (Quantity::VoidRatio, self.e),
            (Quantity::Porosity, self.n),
            (Quantity::Saturation, self.sr),
            (Quantity::AirContent, self.na),
            (Quantity::BulkDensity, self.rho_bulk),
            (Quantity::DryDensity, self.rho_dry),
            (Quantity::BulkUnitWeight, self.gamma_bulk),
            (Quantity::DryUnitWeight, self.gamma_dry),
            (Quantity::SaturatedUnitWeight, self.gamma_sat),
            (Quantity::SubmergedUnitWeight, self.gamma_sub),
        ]
    }

    /// Input file (if any) with command-line values layered on top
    fn phase_input(&self) -> Result<PhaseInput> {
        let mut input = match &self.input {
            Some(path) => {
                let loaded = load_phase_input(path)
                    .with_context(|| format!("loading phase input from {}", path.display()))?;
                info!(path = %path.display(), known = loaded.values.known_count(), "loaded input file");
                loaded
            }
            None => PhaseInput::new("command line"),
        };

        for (quantity, value) in self.flag_values() {
            if let Some(v) = value {
                if input.values.is_known(quantity) {
                    debug!(quantity = %quantity, value = v, "flag overrides file value");
                }
                input.values.set(quantity, Some(v));
            }
        }
        if let Some(sat) = self.saturation {
            input.condition = sat.into();
        }

        input.validate()?;
        Ok(input)
    }

    fn options(&self) -> SolverOptions {
        let mut options = if self.extended {
            SolverOptions::extended()
        } else {
            SolverOptions::default()
        };
        if let Some(cap) = self.max_passes {
            options.max_passes = cap;
        }
        options
    }
}

fn run_solve(args: &SolveArgs) -> Result<()> {
    let input = args.phase_input()?;
    let options = args.options();
    let result = solve_with(&input, &options);

    if let Some(path) = &args.output {
        save_json(&result, path).with_context(|| format!("saving result to {}", path.display()))?;
        info!(path = %path.display(), "result saved");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_phase(&input, &result, options.rule_set));
    }
    Ok(())
}

fn render_phase(input: &PhaseInput, result: &PhaseResult, rule_set: RuleSet) -> String {
    let mut out = String::new();
    banner(&mut out, &format!("PHASE RELATIONSHIPS: {}", display_label(&input.label)));

    out.push_str(&format!("Condition: {}\n", input.condition.display_name()));
    if rule_set == RuleSet::Extended {
        out.push_str("Rule set:  extended\n");
    }
    out.push('\n');

    out.push_str("Input:\n");
    for (quantity, value) in input.seeded_values().known() {
        out.push_str(&quantity_line(quantity, value));
    }
    out.push('\n');

    if result.is_insufficient() {
        out.push_str("Not enough information to derive any further quantities.\n");
        out.push_str("Try supplying one of: e or n, or w with Gs and e, or Gs and e with a saturation condition.\n");
        return out;
    }

    out.push_str("Derivation:\n");
    for step in &result.log {
        out.push_str(&format!("  [{}] {}\n", step.pass, step.display_line()));
    }
    out.push('\n');

    out.push_str("Result:\n");
    for (quantity, value) in result.values.known() {
        out.push_str(&quantity_line(quantity, value));
    }
    let unknown = result.values.unknown();
    if !unknown.is_empty() {
        let symbols: Vec<&str> = unknown.iter().map(|q| q.symbol()).collect();
        out.push_str(&format!("  Undetermined: {}\n", symbols.join(", ")));
    }

    if !result.warnings.is_empty() {
        out.push('\n');
        out.push_str("Consistency:\n");
        for warning in &result.warnings {
            out.push_str(&format!("  [WARN] {}\n", warning.message()));
        }
    }

    out.push('\n');
    banner(
        &mut out,
        &format!("{} derived in {} pass(es)", result.log.len(), result.passes),
    );
    out
}

// ============================================================================
// Relative density
// ============================================================================

fn run_relative_density(args: &RelativeDensityArgs) -> Result<()> {
    let result = relative_density(args.e, args.e_max, args.e_min)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_relative_density(args.e, args.e_max, args.e_min, &result));
    }
    Ok(())
}

fn render_relative_density(e: f64, e_max: f64, e_min: f64, result: &RelativeDensityResult) -> String {
    let mut out = String::new();
    banner(&mut out, "RELATIVE DENSITY");
    out.push_str(&format!(
        "  Dr = (e_max - e) / (e_max - e_min) = ({} - {}) / ({} - {}) = {}\n",
        format_number(e_max),
        format_number(e),
        format_number(e_max),
        format_number(e_min),
        format_number(result.dr)
    ));
    out.push_str(&format!("  Dr = {:.1}%  [{}]\n", result.dr_percent(), result.state));
    out
}

// ============================================================================
// Formula finder
// ============================================================================

fn run_formula(args: &FormulaArgs) -> Result<()> {
    let search = find_formulas(args.target, &args.known);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&search)?);
    } else {
        print!("{}", render_formulas(&search));
    }
    Ok(())
}

fn render_formulas(search: &FormulaSearch) -> String {
    let mut out = String::new();
    let target = search.target;

    if search.is_found() {
        out.push_str(&format!("Formulas for {} ({}):\n", target.symbol(), target.name()));
        for m in &search.matches {
            out.push_str(&format!("  [OK] {} = {}    ({})\n", target.symbol(), m.formula_plain, m.name));
        }
    } else if search.hints.is_empty() {
        out.push_str(&format!("{} is never derived; it must be supplied.\n", target.symbol()));
    } else {
        out.push_str(&format!("No direct formula for {} from the known quantities.\n", target.symbol()));
        out.push_str("Any of these input sets would work:\n");
        for hint in &search.hints {
            let symbols: Vec<&str> = hint.iter().map(|q| q.symbol()).collect();
            out.push_str(&format!("  - {}\n", symbols.join(", ")));
        }
    }
    out
}

// ============================================================================
// Batch
// ============================================================================

#[derive(Serialize)]
struct BatchEntry<'a> {
    label: &'a str,
    #[serde(rename = "type")]
    calc_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<CalculationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CalcError>,
}

fn run_batch(args: &BatchArgs) -> Result<()> {
    let items = load_batch(&args.input).with_context(|| format!("loading batch from {}", args.input.display()))?;
    let options = if args.extended {
        SolverOptions::extended()
    } else {
        SolverOptions::default()
    };
    info!(count = items.len(), "running batch");

    let entries: Vec<BatchEntry<'_>> = items
        .iter()
        .map(|item| {
            let (output, error) = match item.run(&options) {
                Ok(output) => (Some(output), None),
                Err(e) => (None, Some(e)),
            };
            BatchEntry {
                label: item.label(),
                calc_type: item.calc_type(),
                output,
                error,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (item, entry) in items.iter().zip(&entries) {
        match (item, &entry.output, &entry.error) {
            (CalculationItem::Phase(input), Some(CalculationOutput::Phase(result)), _) => {
                print!("{}", render_phase(input, result, options.rule_set));
            }
            (
                CalculationItem::RelativeDensity(input),
                Some(CalculationOutput::RelativeDensity(result)),
                _,
            ) => {
                print!("{}", render_relative_density(input.e, input.e_max, input.e_min, result));
            }
            (_, _, Some(err)) => {
                println!("{} ({}): [FAIL] {}", display_label(entry.label), entry.calc_type, err);
            }
            _ => {}
        }
        println!();
    }
    Ok(())
}

// ============================================================================
// Formatting helpers
// ============================================================================

fn banner(out: &mut String, title: &str) {
    out.push_str("═══════════════════════════════════════\n");
    out.push_str(&format!("  {}\n", title));
    out.push_str("═══════════════════════════════════════\n");
}

fn display_label(label: &str) -> &str {
    if label.is_empty() {
        "(unlabelled)"
    } else {
        label
    }
}

fn quantity_line(quantity: Quantity, value: f64) -> String {
    let units = match quantity.units() {
        "-" => String::new(),
        u => format!(" {}", u),
    };
    format!(
        "  {:<10} = {:>10}{:<7}  {}\n",
        quantity.symbol(),
        format_number(value),
        units,
        quantity.name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::fs;

    fn solve_args(argv: &[&str]) -> SolveArgs {
        let mut full = vec!["terrastat", "solve"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Solve(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_solve_flags_map_to_input() {
        let args = solve_args(&["--n", "0.4", "--gamma-bulk", "19.0", "--saturation", "saturated"]);
        let input = args.phase_input().unwrap();
        assert_eq!(input.values.n, Some(0.4));
        assert_eq!(input.values.gamma_bulk, Some(19.0));
        assert_eq!(input.condition, SaturationCondition::FullySaturated);
    }

    #[test]
    fn test_flags_override_file() {
        let path = temp_dir().join("terrastat_cli_override.json");
        fs::write(&path, r#"{"label": "BH1", "w": 0.3, "Gs": 2.65, "condition": "dry"}"#).unwrap();

        let path_str = path.display().to_string();
        let args = solve_args(&["--input", &path_str, "--w", "0.25", "--saturation", "partial"]);
        let input = args.phase_input().unwrap();
        assert_eq!(input.label, "BH1");
        assert_eq!(input.values.w, Some(0.25));
        assert_eq!(input.values.gs, Some(2.65));
        assert_eq!(input.condition, SaturationCondition::PartiallySaturated);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_options_from_flags() {
        let args = solve_args(&["--extended", "--max-passes", "3"]);
        let options = args.options();
        assert_eq!(options.rule_set, RuleSet::Extended);
        assert_eq!(options.max_passes, 3);
        assert_eq!(solve_args(&[]).options(), SolverOptions::default());
    }

    #[test]
    fn test_formula_known_list() {
        let cli = Cli::try_parse_from(["terrastat", "formula", "--target", "gamma_dry", "--known", "Gs,e"]).unwrap();
        match cli.command {
            Command::Formula(args) => {
                assert_eq!(args.target, Quantity::DryUnitWeight);
                assert_eq!(args.known, vec![Quantity::SpecificGravity, Quantity::VoidRatio]);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Cli::try_parse_from(["terrastat", "formula", "--target", "phi"]).is_err());
    }

    #[test]
    fn test_render_insufficient() {
        let input = PhaseInput::new("empty").with(Quantity::WaterContent, 0.2);
        let result = soil_core::solve(&input);
        let text = render_phase(&input, &result, RuleSet::Standard);
        assert!(text.contains("Not enough information"));
        assert!(!text.contains("Derivation:"));
    }

    #[test]
    fn test_render_derivation() {
        let input = PhaseInput::new("S1").with(Quantity::Porosity, 0.4);
        let result = soil_core::solve(&input);
        let text = render_phase(&input, &result, RuleSet::Standard);
        assert!(text.contains("[1] e = n / (1 - n) = 0.4 / (1 - 0.4) = 0.6667"));
        assert!(text.contains("PHASE RELATIONSHIPS: S1"));
    }

    #[test]
    fn test_render_relative_density() {
        let result = relative_density(0.5, 0.8, 0.3).unwrap();
        let text = render_relative_density(0.5, 0.8, 0.3, &result);
        assert!(text.contains("= 0.6\n"));
        assert!(text.contains("[Medium Dense]"));
    }

    #[test]
    fn test_render_formula_hints() {
        let search = find_formulas(Quantity::Saturation, &[Quantity::WaterContent]);
        let text = render_formulas(&search);
        assert!(text.contains("w, Gs, e"));

        let search = find_formulas(Quantity::SpecificGravity, &[]);
        assert!(render_formulas(&search).contains("must be supplied"));
    }
}
