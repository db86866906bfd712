use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reroll_renderer::{Config, DEFAULT_API_BASE, DEFAULT_IDENTITY, DEFAULT_TIMEOUT, output};

#[derive(Parser)]
#[command(name = "reroll-renderer")]
#[command(about = "Render a Reroll character's equipped cosmetics into a single image")]
#[command(version)]
struct Cli {
    /// Character to render, as `<user>/<character id>`
    #[arg(default_value = DEFAULT_IDENTITY)]
    identity: String,

    /// Base URL of the character API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Also save the image here (format from extension)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Do not open the image viewer
    #[arg(long)]
    no_display: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            api_base: cli.api_base,
            identity: cli.identity,
            timeout: Duration::from_secs(cli.timeout),
            output: cli.output,
            display: !cli.no_display,
        }
    }
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn run(config: &Config) -> reroll_renderer::Result<()> {
    let image = reroll_renderer::render(config)?;

    if let Some(path) = &config.output {
        output::save(&image, path)?;
    }
    if config.display {
        output::display(&image)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let config = Config::from(Cli::parse());

    if let Err(e) = run(&config) {
        log::error!("render of {} failed: {e}", config.identity);
        return Err(e.into());
    }
    Ok(())
}
