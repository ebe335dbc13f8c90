//! TARDIS GUI CLI
//!
//! Entry point for the `tardis-gui` command-line tool.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use std::process;

use tardis_gui::logging::init_logging;
use tardis_gui::viewer::{PopulationTable, ShellRow, ShellSeries, ShellWedges, SpectrumSeries};
use tardis_gui::{
    tardis_template, ConfigEditor, Edit, EffectiveSettings, GraphProperty, LineInfo, Mode,
    ModelViewer, OutputFormat, SpectrumKind, Summary,
};
use tardis_result::SimulationResult;

#[derive(Parser)]
#[command(name = "tardis-gui")]
#[command(about = "Inspect TARDIS simulation results and edit TARDIS configurations", version)]
struct Cli {
    /// Settings file (default: ~/.config/tardis-gui/settings.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a simulation result
    Show {
        /// Result file (.json, .yaml or .yml)
        result: PathBuf,

        /// Shell property to graph (t_rads or ws)
        #[arg(long)]
        property: Option<GraphProperty>,

        /// Spectrum to show (real or virtual)
        #[arg(long)]
        spectrum: Option<SpectrumKind>,

        /// Show the abundance table of this shell (0-based)
        #[arg(long)]
        shell: Option<usize>,

        /// Ion populations of this element (requires --shell)
        #[arg(long, requires = "shell")]
        atom: Option<u32>,

        /// Level populations of this ion (requires --atom)
        #[arg(long, requires = "atom")]
        ion: Option<u32>,

        /// Line interaction tables for a wavelength window in angstrom, e.g. 6000:6400
        #[arg(long, value_name = "START:END", value_parser = parse_window, conflicts_with = "shell")]
        lines: Option<(f64, f64)>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Edit a configuration file and print the result
    Edit {
        /// TARDIS configuration (YAML)
        config: PathBuf,

        /// Select a choice variant, e.g. model.structure.density.type=uniform
        #[arg(long = "select", value_name = "PATH=OPTION")]
        selects: Vec<String>,

        /// Set a value, e.g. montecarlo.seed=42
        #[arg(long = "set", value_name = "PATH=VALUE")]
        sets: Vec<String>,

        /// Print the tree instead of the configuration
        #[arg(long)]
        tree: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in configuration template
    Template,

    /// Edit a configuration and rerun the simulation
    Active {
        /// TARDIS configuration (YAML)
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let overrides = cli_overrides(&cli);
    let settings = match EffectiveSettings::load(cli.settings.as_deref(), Some(overrides)) {
        Ok(s) => s,
        Err(e) => fail("Error loading settings", e),
    };
    init_logging(settings.log_level());

    match cli.command {
        Commands::Show {
            result,
            shell,
            atom,
            ion,
            lines,
            ..
        } => run_show(&settings, result, shell, atom, ion, lines),
        Commands::Edit {
            config,
            selects,
            sets,
            tree,
            ..
        } => run_edit(&settings, config, &selects, &sets, tree),
        Commands::Template => run_template(),
        Commands::Active { config } => run_active(config),
    }
}

/// Flags that map onto settings keys form the CLI layer.
fn cli_overrides(cli: &Cli) -> serde_json::Value {
    let mut overrides = serde_json::json!({});
    if let Some(level) = &cli.log_level {
        overrides["log"] = serde_json::json!({ "level": level });
    }
    match &cli.command {
        Commands::Show {
            property,
            spectrum,
            json,
            ..
        } => {
            let mut viewer = serde_json::Map::new();
            if let Some(p) = property {
                viewer.insert("graph_property".to_string(), p.to_string().into());
            }
            if let Some(s) = spectrum {
                viewer.insert("spectrum".to_string(), s.to_string().into());
            }
            if !viewer.is_empty() {
                overrides["viewer"] = serde_json::Value::Object(viewer);
            }
            if *json {
                overrides["output"] = serde_json::json!({ "format": "json" });
            }
        }
        Commands::Edit { json: true, .. } => {
            overrides["output"] = serde_json::json!({ "format": "json" });
        }
        _ => {}
    }
    overrides
}

fn parse_window(text: &str) -> Result<(f64, f64), String> {
    let (start, end) = text
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", text))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid wavelength '{}': {}", part, e))
    };
    Ok((parse(start)?, parse(end)?))
}

fn fail(context: &str, err: impl Display) -> ! {
    eprintln!("{}: {}", context, err);
    process::exit(1);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail("Error serializing output", e),
    }
}

#[derive(Serialize)]
struct ShowReport {
    summary: Summary,
    shells: ShellSeries,
    wedges: ShellWedges,
    spectrum: SpectrumSeries,
    table: Vec<ShellRow>,
}

fn run_show(
    settings: &EffectiveSettings,
    result_path: PathBuf,
    shell: Option<usize>,
    atom: Option<u32>,
    ion: Option<u32>,
    lines: Option<(f64, f64)>,
) {
    let result = match SimulationResult::from_path(&result_path) {
        Ok(r) => r,
        Err(e) => fail(&format!("Error loading {}", result_path.display()), e),
    };
    let viewer = ModelViewer::new(result).with_selection(settings.graph_property(), settings.spectrum());
    let format = settings.output_format();

    if let Some((start, end)) = lines {
        match viewer.line_info(start, end) {
            Ok(info) if format == OutputFormat::Json => print_json(&info),
            Ok(info) => print_line_info(&info),
            Err(e) => fail("Error", e),
        }
        return;
    }

    if let Some(shell) = shell {
        let info = match viewer.shell_info(shell) {
            Ok(info) => info,
            Err(e) => fail("Error", e),
        };
        let table = match (atom, ion) {
            (Some(z), Some(ion)) => info.levels(z, ion),
            (Some(z), None) => info.ions(z),
            _ => Ok(info.atoms()),
        };
        match table {
            Ok(table) if format == OutputFormat::Json => print_json(&table),
            Ok(table) => print_population_table(&info.title(), &table),
            Err(e) => fail("Error", e),
        }
        return;
    }

    let wedges = match viewer.shell_wedges(settings.shell_scale()) {
        Ok(w) => w,
        Err(e) => fail("Error", e),
    };
    let report = ShowReport {
        summary: viewer.summary(),
        shells: viewer.current_shell_series(),
        wedges,
        spectrum: viewer.current_spectrum_series(),
        table: viewer.shell_table(),
    };

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => print_report(&report),
    }
}

fn print_report(report: &ShowReport) {
    println!("{}", report.summary);
    println!();

    let shells = &report.shells;
    let unit = if shells.unit.is_empty() {
        String::new()
    } else {
        format!(" ({})", shells.unit)
    };
    println!("{} vs Shell{}: min {} max {}", shells.label, unit, shells.min, shells.max);
    println!("  Shell  {:>12}  {:>12}  {:>8}", "t_rad", "w", "colour");
    for (row, position) in report.table.iter().zip(&shells.colour_positions) {
        println!("  {:>5}  {:>12.2}  {:>12.5}  {:>8.3}", row.shell, row.t_rad, row.w, position);
    }
    println!();

    println!(
        "Shell view: {} shells, normalizing factor {:e}, extent {:e}",
        report.wedges.wedges.len(),
        report.wedges.normalizing_factor,
        report.wedges.extent
    );
    println!();

    let spectrum = &report.spectrum;
    println!("Spectrum {}: {} bins", spectrum.name, spectrum.wavelength.len());
    if let Some((start, end)) = spectrum.range() {
        println!("  Wavelength: {} - {} A", start, end);
    }
    if let Some((wavelength, luminosity)) = spectrum.peak() {
        println!("  Peak: {:e} at {} A", luminosity, wavelength);
    }
}

fn print_population_table(title: &str, table: &PopulationTable) {
    println!("{}", title);
    println!("  {:<8} {}", table.index_label.trim(), table.value_label);
    for (index, value) in &table.rows {
        println!("  {:<8} {:e}", index, value);
    }
}

fn print_line_info(info: &LineInfo) {
    println!("{}", info.title);
    for table in &info.tables {
        println!();
        println!("{} ({} packets)", table.description, table.packets);
        for species in &table.species {
            println!("  {:<16} {:.4}", species.label, species.fraction);
            println!("    {}", species.packets_label);
            for transition in &species.transitions {
                println!("    {:<48} {}", transition.label, transition.count);
            }
        }
    }
}

fn run_edit(settings: &EffectiveSettings, config: PathBuf, selects: &[String], sets: &[String], tree: bool) {
    let mut editor = match ConfigEditor::open(&config) {
        Ok(e) => e,
        Err(e) => fail(&format!("Error opening {}", config.display()), e),
    };

    // Selections first so values can target keys they enable.
    let edits = selects
        .iter()
        .map(|s| Edit::parse_select(s))
        .chain(sets.iter().map(|s| Edit::parse_set(s)));
    for edit in edits {
        let result = edit.and_then(|edit| editor.apply(&edit));
        if let Err(e) = result {
            fail("Error applying edit", e);
        }
    }

    let missing = editor.missing_required();
    if !missing.is_empty() {
        eprintln!("Missing required keys: {}", missing.join(", "));
    }

    if tree {
        print!("{}", editor.render_tree());
        return;
    }

    match settings.output_format() {
        OutputFormat::Json => match editor.to_mapping() {
            Ok(mapping) => print_json(&mapping),
            Err(e) => fail("Error", e),
        },
        OutputFormat::Text => match editor.to_yaml() {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => fail("Error", e),
        },
    }
}

fn run_template() {
    let template = match tardis_template() {
        Ok(t) => t,
        Err(e) => fail("Error in built-in template", e),
    };
    match serde_yaml::to_string(&template.to_value()) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => fail("Error serializing output", e),
    }
}

fn run_active(config: PathBuf) {
    if let Err(e) = Mode::from_config(Some(&config)).enter() {
        fail("Error", e);
    }
}
