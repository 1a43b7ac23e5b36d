use std::{
    collections::BTreeSet,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use cosmatesque::{
    CoefficientMatrix, FractalParameters, Picture, Preset, RenderThreading, output, render_picture,
};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser, Debug)]
#[command(name = "cosmatesque", version, about = "Render modular recurrence fractals as PNG")]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a picture as a grayscale PNG.
    Render(RenderArgs),
    /// Print the parameter summary used in generated filenames.
    Summary(SummaryArgs),
    /// List the built-in presets.
    Presets,
}

#[derive(Args, Debug)]
struct ParamArgs {
    /// Parameters JSON (`coefficients`, `modulus`, `white_residues`).
    #[arg(long, conflicts_with = "preset")]
    params: Option<PathBuf>,

    /// Start from a built-in preset (see `cosmatesque presets`).
    #[arg(long)]
    preset: Option<String>,

    /// Coefficient rows, `;`-separated, entries `,`-separated (e.g. `0,1;1,0`).
    /// The last row may omit the self coefficient.
    #[arg(long, allow_hyphen_values = true)]
    coefficients: Option<String>,

    /// Modulus (>= 2).
    #[arg(long)]
    modulus: Option<u32>,

    /// White residues, comma-separated. An empty string paints everything black.
    #[arg(long, conflicts_with = "default_white")]
    white: Option<String>,

    /// Use the default white residues `1,2,3,4`.
    #[arg(long)]
    default_white: bool,

    /// Randomize modulus, coefficients and white residues. Explicit flags still win.
    #[arg(long)]
    randomize: bool,

    /// Randomize the coefficients (keeping the matrix size).
    #[arg(long)]
    random_coefficients: bool,

    /// Mirror random coefficients across the main diagonal.
    #[arg(long)]
    symmetric: bool,

    /// Randomize the white residues.
    #[arg(long, conflicts_with = "default_white")]
    random_white: bool,

    /// Seed for the random flags (default: from the OS).
    #[arg(long)]
    seed: Option<u64>,

    /// Reduce every coefficient modulo the modulus.
    #[arg(long)]
    reduce: bool,

    /// Swap black and white for every residue below the modulus.
    #[arg(long)]
    invert: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Picture kind.
    #[arg(long, value_enum, default_value_t = PictureChoice::Bw)]
    picture: PictureChoice,

    /// Side length in pixels. Defaults to the largest power of the modulus up to 1024.
    #[arg(long)]
    size: Option<usize>,

    /// Output PNG path.
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Directory for an automatically named PNG (default: current directory).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Shade rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Print the resolved parameters as JSON instead.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PictureChoice {
    Bw,
    Gradient,
}

impl From<PictureChoice> for Picture {
    fn from(choice: PictureChoice) -> Self {
        match choice {
            PictureChoice::Bw => Picture::BlackWhite,
            PictureChoice::Gradient => Picture::Gradient,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Summary(args) => cmd_summary(args),
        Command::Presets => cmd_presets(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_params_json(path: &Path) -> anyhow::Result<FractalParameters> {
    let f = File::open(path).with_context(|| format!("open parameters '{}'", path.display()))?;
    let params = FractalParameters::from_reader(BufReader::new(f))
        .with_context(|| format!("load parameters '{}'", path.display()))?;
    Ok(params)
}

fn parse_residue_list(text: &str) -> anyhow::Result<BTreeSet<u32>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("invalid white residue '{s}'"))
        })
        .collect()
}

/// Base parameters (file, preset or default) with command-line overrides applied on top.
fn resolve_params(args: &ParamArgs) -> anyhow::Result<FractalParameters> {
    let mut params = match (&args.params, &args.preset) {
        (Some(path), _) => read_params_json(path)?,
        (None, Some(name)) => name.parse::<Preset>()?.parameters(),
        (None, None) => FractalParameters::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(modulus) = args.modulus {
        params = params.with_modulus(modulus)?;
    } else if args.randomize {
        params = params.with_random_modulus(&mut rng);
    }
    if let Some(text) = &args.coefficients {
        let coefficients: CoefficientMatrix = text.parse()?;
        params = params.with_coefficients(coefficients);
    } else if args.randomize || args.random_coefficients {
        params = params.with_random_coefficients(&mut rng, args.symmetric);
    }
    if let Some(text) = &args.white {
        params = params.with_white_residues(parse_residue_list(text)?);
    } else if args.default_white {
        params = params.with_default_white_residues();
    } else if args.randomize || args.random_white {
        params = params.with_random_white_residues(&mut rng);
    }
    if args.reduce {
        params = params.with_reduced_coefficients()?;
    }
    if args.invert {
        params = params.with_inverted_white_residues();
    }

    tracing::info!(summary = %params.summary(), "resolved parameters");
    Ok(params)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args.params)?;
    let picture = Picture::from(args.picture);
    let size = args
        .size
        .unwrap_or_else(|| output::default_picture_size(params.modulus()));

    let out = match (&args.out, &args.out_dir) {
        (Some(path), _) => path.clone(),
        (None, dir) => dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format!("{}.png", output::auto_filename(&params, picture, size))),
    };

    let threading = RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let frame = render_picture(&params, size, picture, &threading)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    frame
        .into_gray_image()?
        .save_with_format(&out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    println!("{}", out.display());
    Ok(())
}

fn cmd_summary(args: SummaryArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args.params)?;
    if args.json {
        println!("{}", params.to_json_pretty()?);
    } else {
        println!("{}", params.summary());
    }
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for preset in Preset::ALL {
        println!(
            "{}\t{}\t{}",
            preset.slug(),
            preset.name(),
            preset.parameters().summary()
        );
    }
    Ok(())
}
