use std::fs;
use std::path::{
    Path,
    PathBuf
};

use anyhow::{
    Context,
    Result
};
use clap::{
    Args,
    Parser,
    Subcommand,
    ValueEnum
};

use dotgain::compensation::compensationreport::CompensationReport;
use dotgain::compensation::continuouscompensation::compensation_table;
use dotgain::configuration::Configuration;
use dotgain::engine::curveengine::compute_curve;
use dotgain::export::curveexport::{
    compensation_table_to_tsv,
    curve_to_json,
    curve_to_tsv,
    format_tone
};
use dotgain::manager::manager::IManager;
use dotgain::manager::managererror::parse_json_value;
use dotgain::manager::namedobject::NamedJsonObject;
use dotgain::tvi::profilecomparison::ProfileComparison;
use dotgain::tvi::tviprofile::TviProfile;
use dotgain::tvi::tvipreset::TviPreset;

#[derive(Parser)]
#[command(name = "dotgain")]
#[command(version, about = "Dot gain (TVI) compensation curves for flexographic printing", long_about = None)]
struct Cli {
    /// Configuration file with sampling step, targets and named profiles
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ProfileArgs {
    /// Preset or configured profile name (default: medium)
    #[arg(short, long, value_name = "NAME", conflicts_with = "profile")]
    preset: Option<String>,

    /// Profile file: {"name": "...", "points": {"10": 5, ...}}
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Tsv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sampled curve (input, TVI, output, bump)
    Curve {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Sampling step in tone percent
        #[arg(long, value_name = "N")]
        step: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
        format: OutputFormat,
    },

    /// Input tones needed to print the highlight and shadow targets
    Compensate {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Highlight target, 1-50 (default: 50)
        #[arg(long, value_name = "TONE")]
        highlight: Option<f64>,

        /// Shadow target, 50-100 (default: 95)
        #[arg(long, value_name = "TONE")]
        shadow: Option<f64>,

        /// Sampling step in tone percent
        #[arg(long, value_name = "N")]
        step: Option<f64>,
    },

    /// Continuous compensation table (target tone -> plate tone)
    Dgc {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Target tone spacing
        #[arg(long, value_name = "N")]
        step: Option<f64>,
    },

    /// Compare the current profile against a target profile, tone by tone
    Compare {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Target preset or configured profile name
        #[arg(long, value_name = "NAME")]
        against: String,
    },

    /// List preset and configured profile names
    Presets,
}

fn load_profile_file(config: &Configuration, path: &Path) -> Result<(String, TviProfile)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file {}", path.display()))?;
    let json_value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    let named: NamedJsonObject = parse_json_value(json_value.clone())?;
    config.profile_manager().insert_obj_from_json(json_value)?;
    let profile = config.profile(named.name())?;
    Ok((named.name().to_owned(), profile))
}

fn resolve_profile(config: &Configuration, args: &ProfileArgs) -> Result<(String, TviProfile)> {
    if let Some(path) = &args.profile {
        return load_profile_file(config, path);
    }
    let name = args
        .preset
        .clone()
        .unwrap_or_else(|| TviPreset::default().slug().to_owned());
    let profile = config
        .profile(&name)
        .with_context(|| format!("Unknown profile '{}'", name))?;
    Ok((name, profile))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Configuration::new();
    if let Some(path) = &cli.config {
        config
            .from_reader(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?;
    }

    match cli.command {
        Commands::Curve { profile, step, format } => {
            let (name, profile) = resolve_profile(&config, &profile)?;
            log::info!("computing curve for '{}'", name);
            let curve = compute_curve(&profile, step.unwrap_or(config.step()));
            match format {
                OutputFormat::Tsv => println!("{}", curve_to_tsv(&curve)),
                OutputFormat::Json => println!("{}", curve_to_json(&curve)?),
            }
        }
        Commands::Compensate { profile, highlight, shadow, step } => {
            let (name, profile) = resolve_profile(&config, &profile)?;
            let defaults = config.targets();
            let targets = defaults
                .with_highlight(highlight.unwrap_or(defaults.highlight()))
                .with_shadow(shadow.unwrap_or(defaults.shadow()));
            let curve = compute_curve(&profile, step.unwrap_or(config.step()));
            let report = CompensationReport::evaluate(&curve, &targets);
            println!("Profile: {}", name);
            println!("{}", report);
        }
        Commands::Dgc { profile, step } => {
            let (name, profile) = resolve_profile(&config, &profile)?;
            log::info!("solving compensation table for '{}'", name);
            let table = compensation_table(&profile, step.unwrap_or(config.step()))?;
            println!("{}", compensation_table_to_tsv(&table));
        }
        Commands::Compare { profile, against } => {
            let (name, current) = resolve_profile(&config, &profile)?;
            let target = config
                .profile(&against)
                .with_context(|| format!("Unknown profile '{}'", against))?;
            let comparison = ProfileComparison::evaluate(&current, &target);
            println!("{} -> {}", name, against);
            println!("Tone\tCurrent\tTarget\tDelta");
            for d in comparison.deltas() {
                println!("{}\t{}\t{}\t{}",
                    format_tone(d.tone()),
                    format_tone(d.current()),
                    format_tone(d.target()),
                    format_tone(d.delta()));
            }
            println!("Mean |delta|: {:.2}", comparison.mean_abs_delta());
            println!("{}", comparison.difference());
        }
        Commands::Presets => {
            for name in config.profile_manager().names() {
                match name.parse::<TviPreset>() {
                    Ok(preset) => println!("{}\t{}", name, preset.display_name()),
                    Err(_) => println!("{}\t(configured)", name),
                }
            }
        }
    }

    Ok(())
}
