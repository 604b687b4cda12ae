use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chart_lab::page::PageBlock;
use chart_lab::telemetry::init_default_tracing;
use chart_lab::{GraphsPage, Page, PageConfig, SessionState};
use clap::{Parser, ValueHint};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render the data visualizations page", long_about = None)]
struct Cli {
    /// Directory holding `data.csv` and `data.json`
    #[arg(long, value_hint = ValueHint::DirPath)]
    data_dir: Option<PathBuf>,

    /// JSON page config; omitted fields use defaults
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// HTML output path
    #[arg(short, long, default_value = "graphs_page.html", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Optional page JSON contract output path
    #[arg(long, value_hint = ValueHint::FilePath)]
    snapshot: Option<PathBuf>,

    /// Initial keyword filter
    #[arg(long)]
    keyword: Option<String>,

    /// Initial usage threshold
    #[arg(long)]
    threshold: Option<f64>,

    /// Read widget commands from stdin and re-render after each one
    #[arg(long)]
    interactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Keyword(String),
    Threshold(f64),
    Show,
    Quit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _ = init_default_tracing();

    let mut config = match &cli.config {
        Some(path) => PageConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PageConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let page = GraphsPage::new(config).context("invalid page config")?;
    let mut session = page.new_session()?;
    if let Some(keyword) = &cli.keyword {
        session.set_filter_keyword(keyword.clone());
    }
    if let Some(threshold) = cli.threshold {
        session.set_usage_threshold(threshold)?;
    }

    render_and_write(&page, &session, &cli)?;
    if cli.interactive {
        run_session(&page, &mut session, &cli)?;
    }
    Ok(())
}

fn run_session(page: &GraphsPage, session: &mut SessionState, cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_prompt(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                print_prompt(&mut stdout)?;
                continue;
            }
            Err(err) => {
                writeln!(stdout, "error: {err}")?;
                print_prompt(&mut stdout)?;
                continue;
            }
        };

        let changed = match command {
            SessionCommand::Quit => break,
            SessionCommand::Show => true,
            SessionCommand::Keyword(keyword) => session.set_filter_keyword(keyword),
            SessionCommand::Threshold(threshold) => match session.set_usage_threshold(threshold) {
                Ok(changed) => changed,
                Err(err) => {
                    warn!(error = %err, "threshold rejected");
                    writeln!(stdout, "error: {err}")?;
                    false
                }
            },
        };
        if changed {
            render_and_write(page, session, cli)?;
        }
        print_prompt(&mut stdout)?;
    }
    Ok(())
}

fn parse_command(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let command = match name {
        "keyword" => SessionCommand::Keyword(rest.to_owned()),
        "threshold" => SessionCommand::Threshold(
            rest.parse::<f64>()
                .map_err(|_| anyhow!("threshold needs a number, got `{rest}`"))?,
        ),
        "show" => SessionCommand::Show,
        "quit" | "exit" => SessionCommand::Quit,
        other => {
            return Err(anyhow!(
                "unknown command `{other}` (expected keyword <text>, threshold <n>, show, quit)"
            ));
        }
    };
    Ok(Some(command))
}

fn render_and_write(page: &GraphsPage, session: &SessionState, cli: &Cli) -> Result<()> {
    let rendered = page.render(session);
    write_output(&cli.output, &rendered.to_html()?)?;
    if let Some(path) = &cli.snapshot {
        write_output(path, &rendered.to_json_contract_v1_pretty()?)?;
    }
    info!(
        output = %cli.output.display(),
        revision = session.revision(),
        charts = rendered.charts().count(),
        "page rendered"
    );
    print_summary(&rendered)?;
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn print_summary(page: &Page) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for block in &page.blocks {
        match block {
            PageBlock::Subheader { text } => writeln!(stdout, "== {text}")?,
            PageBlock::Status(status) => {
                writeln!(stdout, "[{}] {}", status.level.as_str(), status.text)?
            }
            PageBlock::Chart(chart) => {
                for datum in &chart.data {
                    writeln!(stdout, "  {:<24} {}", datum.label, datum.value)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn print_prompt(stdout: &mut io::Stdout) -> Result<()> {
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}
