mod logic;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{PolicySelection, Simulator, TestReport, policy_catalog};

#[derive(Debug, Parser)]
#[command(name = "kumis-tester", version = "0.1.0")]
#[command(about = "Automated playthroughs of Warisan Mbah Kumis across answer policies")]
struct Args {
    /// Policy to run
    #[arg(long, value_enum, default_value_t = PolicySelection::All)]
    policy: PolicySelection,

    /// List the available policies and exit
    #[arg(long)]
    list_policies: bool,

    /// Seeds to run (comma-separated integers, or `random`)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per seed
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    /// Skip the practice-set mini-games
    #[arg(long)]
    skip_practice: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_policies(&args)? {
        return Ok(());
    }

    if args.report == "console" {
        announce_banner();
    }

    let start_time = Instant::now();
    let seeds = parse_seeds(&args.seeds)?;
    let simulator = Simulator::load(args.verbose)?;
    let policies = args.policy.strategies();

    let results: Vec<_> = policies
        .iter()
        .map(|&policy| {
            if args.verbose {
                println!("🧪 Policy {}", policy.as_str().bright_white());
            }
            simulator.run_policy(policy, &seeds, args.iterations)
        })
        .collect();
    let practice = if args.skip_practice {
        Vec::new()
    } else {
        simulator.run_practice(&policies, seeds.first().copied().unwrap_or_default())
    };

    let report = TestReport::new(results, practice);
    write_report(&args, &report, start_time)?;

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_policies(args: &Args) -> Result<bool> {
    if !args.list_policies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available policies:")?;
    for (key, description) in policy_catalog() {
        writeln!(output_target.writer(), "  {key:<8} {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🍄 Warisan Mbah Kumis Automated Tester".bright_cyan().bold());
    println!("{}", "======================================".cyan());
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_seeds(raw: &str) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for token in split_csv(raw) {
        if token.eq_ignore_ascii_case("random") {
            seeds.push(rand::thread_rng().r#gen::<u64>());
            continue;
        }
        let seed = token
            .parse::<u64>()
            .with_context(|| format!("invalid seed '{token}'"))?;
        seeds.push(seed);
    }
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}

fn write_report(args: &Args, report: &TestReport, start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, report)?,
        "markdown" => logic::reports::generate_markdown_report(&mut output_target, report)?,
        _ => {
            logic::reports::generate_console_report(
                &mut output_target,
                report,
                start_time.elapsed(),
            )?;
            writeln!(&mut output_target)?;
            writeln!(
                &mut output_target,
                "🏁 Total time: {:?}",
                start_time.elapsed()
            )?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
