use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::{Style, Term};
use model_scout_core::{
    dataset::{self, Dataset},
    export,
    model::{Entity, Factor},
    score::{ScoredEntity, COST_MAX, INTELLIGENCE_MAX, SPEED_MAX},
    weights::WeightSet,
};
use tracing_subscriber::{fmt, EnvFilter};

// ── Palette ──────────────────────────────────────────────────────────

fn s_header() -> Style { Style::new().color256(252).bold() }  // bright gray, bold
fn s_dim() -> Style    { Style::new().color256(248) }         // light gray
fn s_tree() -> Style   { Style::new().color256(245) }         // mid gray
fn s_hint() -> Style   { Style::new().color256(243) }         // soft gray
fn s_good() -> Style   { Style::new().color256(114) }         // green
fn s_err() -> Style    { Style::new().color256(167) }         // red
fn s_label() -> Style  { Style::new().color256(146) }         // muted lavender

fn sep(width: usize) -> String {
    s_tree().apply_to("\u{2500}".repeat(width)).to_string()
}

/// Green for strong, amber for middling, orange for weak goodness.
fn goodness_color(v: f64) -> Color {
    if v >= 0.7 {
        Color::AnsiValue(114)
    } else if v >= 0.4 {
        Color::AnsiValue(214)
    } else {
        Color::AnsiValue(208)
    }
}

// ── CLI Args ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "model-scout",
    about = "Rank language models by a weighted score of intelligence, speed and cost",
    version,
    after_help = "examples:\n  \
        model-scout                              (rank the example models)\n  \
        model-scout --weights 0.6,0.2,0.2\n  \
        model-scout --weights cost=1,intel=1     (speed ignored)\n  \
        model-scout --data mine.toml --csv out.csv\n  \
        model-scout input                        (enter models interactively)\n  \
        model-scout models\n  \
        model-scout sync https://example.org/models.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    rank: RankOpts,

    /// Log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank models (the default).
    Rank(RankOpts),
    /// Enter models and weights interactively, then rank.
    Input(OutputOpts),
    /// List the dataset without scoring.
    Models {
        /// Dataset TOML instead of the cached or bundled one.
        #[arg(long, short)]
        data: Option<PathBuf>,
    },
    /// Download a dataset TOML into the local cache.
    Sync {
        /// URL of a dataset TOML.
        url: String,
    },
}

#[derive(Args, Clone, Default)]
struct RankOpts {
    /// Dataset TOML instead of the cached or bundled one.
    #[arg(long, short)]
    data: Option<PathBuf>,

    /// Weights as `i,s,c` or `intelligence=..,speed=..,cost=..`; normalized to sum 1.
    #[arg(long, short)]
    weights: Option<String>,

    /// Use --weights as given instead of normalizing them.
    #[arg(long, requires = "weights")]
    raw_weights: bool,

    /// Show only the best N models.
    #[arg(long, short)]
    top: Option<usize>,

    #[command(flatten)]
    out: OutputOpts,
}

#[derive(Args, Clone, Default)]
struct OutputOpts {
    /// Also write results as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Save weights and models as a dataset TOML for later --data runs.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print results as JSON instead of a table.
    #[arg(long, short)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Rank(opts)) => cmd_rank(&opts)?,
        Some(Commands::Input(out)) => cmd_input(&out)?,
        Some(Commands::Models { data }) => cmd_models(data.as_deref())?,
        Some(Commands::Sync { url }) => cmd_sync(&url).await?,
        None => cmd_rank(&cli.rank)?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ── Rank ─────────────────────────────────────────────────────────────

fn load(data: Option<&Path>) -> anyhow::Result<Dataset> {
    match data {
        Some(path) => dataset::load_dataset(path)
            .with_context(|| format!("loading dataset {}", path.display())),
        None => Ok(dataset::load_dataset_cached()?),
    }
}

fn resolve_weights(opts: &RankOpts, ds: &Dataset) -> anyhow::Result<WeightSet> {
    let Some(raw) = opts.weights.as_deref() else {
        return Ok(ds.weights);
    };
    let w: WeightSet = raw
        .parse()
        .with_context(|| format!("parsing --weights '{raw}'"))?;
    if opts.raw_weights {
        Ok(w)
    } else {
        Ok(w.normalized()?)
    }
}

fn cmd_rank(opts: &RankOpts) -> anyhow::Result<()> {
    let mut ds = load(opts.data.as_deref())?;
    ds.weights = resolve_weights(opts, &ds)?;

    let mut results = ds.score();
    tracing::debug!(models = results.len(), weights = %ds.weights, "ranked");
    if let Some(n) = opts.top {
        results.truncate(n);
    }
    emit(&ds, &results, &opts.out)
}

/// Send results to every requested sink.
fn emit(ds: &Dataset, results: &[ScoredEntity], out: &OutputOpts) -> anyhow::Result<()> {
    if out.json {
        println!("{}", export::to_json(results)?);
    } else {
        print_results(results, &ds.weights);
    }

    if let Some(ref path) = out.csv {
        export::write_csv(path, results)?;
        eprintln!("{}", s_hint().apply_to(format!("  csv: {}", path.display())));
    }
    if let Some(ref path) = out.save {
        save_run(path, ds)?;
        eprintln!("{}", s_hint().apply_to(format!("  run: {}", path.display())));
    }
    Ok(())
}

fn save_run(path: &Path, ds: &Dataset) -> anyhow::Result<()> {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let body = ds.to_toml()?;
    let text = format!(
        "# model-scout run, saved {now}\n# reload with: model-scout --data {}\n\n{body}",
        path.display()
    );
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ── Display ──────────────────────────────────────────────────────────

fn print_results(results: &[ScoredEntity], weights: &WeightSet) {
    println!();
    println!("{}", s_header().apply_to("model comparison"));
    println!("{}", s_dim().apply_to(format!("  weights: {weights}")));
    if !weights.is_normalized() {
        println!(
            "{}",
            s_hint().apply_to(format!(
                "  weights sum to {:.2}, totals are not bounded to 0-1",
                weights.sum()
            ))
        );
    }
    println!("{}", sep(96));

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let head = |s: &str| Cell::new(s).fg(Color::AnsiValue(243));
    table.set_header(vec![
        head("  #"),
        head("Model"),
        head("Intel"),
        head("Speed"),
        head("Cost"),
        head("Intel n"),
        head("Speed n"),
        head("Cost n"),
        head("Intel w"),
        head("Speed w"),
        head("Cost w"),
        head("Total"),
    ]);

    for (rank, r) in results.iter().enumerate() {
        let e = &r.entity;
        let total_color = if rank == 0 { Color::AnsiValue(114) } else { Color::AnsiValue(252) };
        let mut row = vec![
            Cell::new(format!("  {}", rank + 1)).fg(Color::AnsiValue(245)),
            Cell::new(&e.name).fg(Color::AnsiValue(252)),
        ];
        for f in Factor::ALL {
            row.push(
                Cell::new(format!("{}", e.raw(f)))
                    .fg(Color::AnsiValue(248))
                    .set_alignment(CellAlignment::Right),
            );
        }
        for f in Factor::ALL {
            let v = r.normalized.get(f);
            row.push(
                Cell::new(format!("{v:.3}"))
                    .fg(goodness_color(v))
                    .set_alignment(CellAlignment::Right),
            );
        }
        for f in Factor::ALL {
            row.push(
                Cell::new(format!("{:.3}", r.weighted.get(f)))
                    .fg(Color::AnsiValue(248))
                    .set_alignment(CellAlignment::Right),
            );
        }
        row.push(
            Cell::new(format!("{:.3}", r.total))
                .fg(total_color)
                .set_alignment(CellAlignment::Right),
        );
        table.add_row(row);
    }
    println!("{table}");
    println!("{}", sep(96));

    if let Some(best) = results.first() {
        println!(
            "  {} {}  {}",
            s_good().apply_to("best:"),
            s_header().apply_to(best.name()),
            s_dim().apply_to(format!("{:.3}", best.total))
        );
    } else {
        println!("{}", s_dim().apply_to("  no models to rank"));
    }
    println!(
        "{}",
        s_hint().apply_to(format!(
            "  n = normalized 0-1 (intelligence /{INTELLIGENCE_MAX}, speed /{SPEED_MAX}, cost inverted /{COST_MAX}), w = weighted"
        ))
    );
    println!();
}

// ── Models ───────────────────────────────────────────────────────────

fn cmd_models(data: Option<&Path>) -> anyhow::Result<()> {
    let ds = load(data)?;

    println!();
    println!(
        "{}  {}",
        s_header().apply_to("models"),
        s_dim().apply_to(format!("{} entries", ds.models.len()))
    );
    println!("{}", sep(64));

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec![Cell::new("  Model").fg(Color::AnsiValue(243))];
    for f in Factor::ALL {
        header.push(Cell::new(format!("{} ({})", f.label(), f.unit())).fg(Color::AnsiValue(243)));
    }
    table.set_header(header);

    for m in &ds.models {
        let mut row = vec![Cell::new(format!("  {}", m.name)).fg(Color::AnsiValue(252))];
        for f in Factor::ALL {
            row.push(
                Cell::new(format!("{}", m.raw(f)))
                    .fg(Color::AnsiValue(248))
                    .set_alignment(CellAlignment::Right),
            );
        }
        table.add_row(row);
    }
    println!("{table}");
    println!("{}", sep(64));
    println!("{}", s_dim().apply_to(format!("  default weights: {}", ds.weights)));
    println!();
    Ok(())
}

// ── Interactive input ────────────────────────────────────────────────

fn cmd_input(out: &OutputOpts) -> anyhow::Result<()> {
    let term = Term::stderr();
    if !term.is_term() {
        anyhow::bail!("`input` needs an interactive terminal; use --data for files");
    }
    term.write_line("")?;
    term.write_line(&format!("{}", s_header().apply_to("model comparison")))?;
    term.write_line(&sep(40))?;

    let ds = if ask_yes_no(&term, "Use example data?")? {
        let mut ds = dataset::load_dataset_cached()?;
        let keep = ask_yes_no(&term, &format!("Use default weights ({})?", ds.weights))?;
        if !keep {
            ds.weights = ask_weights(&term)?;
        }
        ds
    } else {
        let count = ask_count(&term, "Number of models to compare")?;
        let mut models: Vec<Entity> = Vec::with_capacity(count);
        for i in 0..count {
            term.write_line("")?;
            term.write_line(&format!("{}", s_label().apply_to(format!("model {}", i + 1))))?;
            let name = ask_name(&term, &models)?;
            let intelligence =
                ask_number(&term, &format!("Intelligence score (0-{INTELLIGENCE_MAX})"))?;
            let speed = ask_number(&term, &format!("Speed (tokens/s, 0-{SPEED_MAX})"))?;
            let cost = ask_number(&term, &format!("Cost ($/1M tokens, 0-{COST_MAX})"))?;
            models.push(Entity::new(name, intelligence, speed, cost));
        }
        term.write_line("")?;
        let weights = ask_weights(&term)?;
        Dataset::new(weights, models)
    };
    ds.validate()?;

    let results = ds.score();
    emit(&ds, &results, out)
}

fn prompt(term: &Term, label: &str) -> anyhow::Result<String> {
    term.write_str(&format!("{} ", s_dim().apply_to(format!("{label}:"))))?;
    Ok(term.read_line()?.trim().to_string())
}

fn ask_yes_no(term: &Term, question: &str) -> anyhow::Result<bool> {
    loop {
        match prompt(term, &format!("{question} (y/n)"))?.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => term.write_line(&format!("{}", s_err().apply_to("  answer y or n")))?,
        }
    }
}

fn ask_number(term: &Term, label: &str) -> anyhow::Result<f64> {
    loop {
        let raw = prompt(term, label)?;
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => term.write_line(&format!(
                "{}",
                s_err().apply_to(format!("  '{raw}' is not a number"))
            ))?,
        }
    }
}

fn ask_count(term: &Term, label: &str) -> anyhow::Result<usize> {
    loop {
        let raw = prompt(term, label)?;
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => return Ok(n),
            _ => term.write_line(&format!(
                "{}",
                s_err().apply_to("  enter a whole number above 0")
            ))?,
        }
    }
}

fn ask_name(term: &Term, existing: &[Entity]) -> anyhow::Result<String> {
    loop {
        let name = prompt(term, "Model name")?;
        if name.is_empty() {
            term.write_line(&format!("{}", s_err().apply_to("  name cannot be empty")))?;
        } else if existing.iter().any(|m| m.name == name) {
            term.write_line(&format!(
                "{}",
                s_err().apply_to(format!("  '{name}' already entered"))
            ))?;
        } else {
            return Ok(name);
        }
    }
}

/// Read three weights and normalize them to sum 1.
fn ask_weights(term: &Term) -> anyhow::Result<WeightSet> {
    term.write_line(&format!(
        "{}",
        s_hint().apply_to("Enter weights (they'll be normalized to sum to 1.0)")
    ))?;
    loop {
        let i = ask_number(term, "Intelligence weight")?;
        let s = ask_number(term, "Speed weight")?;
        let c = ask_number(term, "Cost weight")?;
        match WeightSet::new(i, s, c).and_then(|w| w.normalized()) {
            Ok(w) => return Ok(w),
            Err(e) => term.write_line(&format!("{}", s_err().apply_to(format!("  {e}"))))?,
        }
    }
}

// ── Sync ─────────────────────────────────────────────────────────────

async fn cmd_sync(url: &str) -> anyhow::Result<()> {
    let term = Term::stderr();
    term.write_line(&format!("{}", s_dim().apply_to("downloading dataset...")))?;

    let result = model_scout_core::sync::sync_dataset(url).await;
    term.clear_last_lines(1)?;
    let result = result?;

    println!();
    println!("  {}", s_good().apply_to("synced"));
    println!(
        "  {}",
        s_dim().apply_to(format!("models.toml: {} models", result.model_count))
    );
    println!(
        "  {}",
        s_hint().apply_to(format!("cached in {}", result.path.display()))
    );
    println!();
    Ok(())
}
