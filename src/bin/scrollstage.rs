use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollstage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate the stage at one scroll fraction and print the scene as JSON.
    Sample(SampleArgs),
    /// Evaluate the stage across the whole scroll range and check the
    /// crossfade coverage invariants.
    Sweep(SweepArgs),
    /// Validate a stage JSON file.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input stage JSON; the built-in deck when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Scroll fraction in [0, 1].
    #[arg(long)]
    fraction: f64,

    /// Splash progress percentage; the splash is treated as done when omitted.
    #[arg(long)]
    loading: Option<u8>,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Input stage JSON; the built-in deck when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Number of evaluation steps across the scroll range.
    #[arg(long, default_value_t = 200)]
    steps: u32,

    /// Write every evaluated scene frame to this JSON file.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input stage JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn read_stage_json(path: &Path) -> anyhow::Result<scrollstage::Stage> {
    let f = File::open(path).with_context(|| format!("open stage '{}'", path.display()))?;
    let r = BufReader::new(f);
    let stage: scrollstage::Stage =
        serde_json::from_reader(r).with_context(|| "parse stage JSON")?;
    Ok(stage)
}

fn load_stage(in_path: Option<&Path>) -> anyhow::Result<scrollstage::Stage> {
    let stage = match in_path {
        Some(path) => read_stage_json(path)?,
        None => scrollstage::deck::canonical()?,
    };
    stage.validate()?;
    Ok(stage)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let stage = load_stage(args.in_path.as_deref())?;

    let splash = match args.loading {
        Some(pct) => scrollstage::SplashState::Loading(scrollstage::Progress::new(pct)),
        None => scrollstage::SplashState::Ready,
    };

    let frame = scrollstage::Evaluator::eval(&stage, scrollstage::ScrollFraction::new(args.fraction))?;
    let scene = scrollstage::compose(&frame, splash);

    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let stage = load_stage(args.in_path.as_deref())?;
    let steps = args.steps.max(1);

    let mut scenes = Vec::new();
    let mut violations = 0u32;

    for step in 0..=steps {
        let fraction = scrollstage::ScrollFraction::new(f64::from(step) / f64::from(steps));
        let frame = scrollstage::Evaluator::eval(&stage, fraction)?;

        let visible = frame.panels.iter().filter(|p| p.opacity > 0.0).count();
        let sum: f64 = frame.panels.iter().map(|p| p.opacity).sum();
        if sum < 1.0 - 1e-9 {
            violations += 1;
            eprintln!("coverage gap at {:.4}: opacity sum {sum:.4}", fraction.get());
        }
        if visible > 2 {
            violations += 1;
            eprintln!("{visible} panels visible at {:.4}", fraction.get());
        }

        if args.out.is_some() {
            scenes.push(scrollstage::compose(&frame, scrollstage::SplashState::Ready));
        }
    }

    if let Some(out) = args.out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&out, serde_json::to_string_pretty(&scenes)?)
            .with_context(|| format!("write sweep '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    if violations > 0 {
        anyhow::bail!("{violations} coverage violations across {steps} steps");
    }
    eprintln!("ok: {} panels, {} steps", stage.panels.len(), steps);
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let stage = read_stage_json(&args.in_path)?;
    stage.validate()?;
    eprintln!(
        "ok: {} panels, {} manifest assets",
        stage.panels.len(),
        stage.manifest.len()
    );
    Ok(())
}
