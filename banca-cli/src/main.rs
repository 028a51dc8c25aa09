use std::fs;
use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use banca_cli::config::Overrides;
use banca_cli::config::Settings;
use banca_cli::console::Console;
use banca_cli::paths;
use banca_cli::views;
use banca_lib::BancaClient;
use clap::Parser;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;
use tokio::io::BufReader;

#[derive(Parser)]
#[clap(version, about = "Consola de gestión bancaria")]
struct Opts {
    /// Config file, defaults to config.toml in the platform config directory
    #[clap(short, long, env = "BANCA_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL
    #[clap(short, long, env = "BANCA_API_URL")]
    url: Option<String>,

    /// Request timeout in seconds, 0 disables it
    #[clap(long, env = "BANCA_TIMEOUT")]
    timeout: Option<u64>,

    /// Rows per page
    #[clap(short, long, env = "BANCA_PAGE_SIZE")]
    page_size: Option<usize>,

    /// Log level: off, error, warn, info, debug or trace
    #[clap(long, env = "BANCA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Where downloaded reports are written
    #[clap(long, env = "BANCA_DOWNLOAD_DIR")]
    download_dir: Option<PathBuf>,
}

impl Opts {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.url.clone(),
            timeout_secs: self.timeout,
            page_size: self.page_size,
            log_level: self.log_level.clone(),
            download_dir: self.download_dir.clone(),
        }
    }
}

fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("initializing logger")?;
    Ok(())
}

async fn run(opts: Opts) -> anyhow::Result<()> {
    let config_path = opts.config.clone().or_else(paths::config_file);
    let settings = match &config_path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    };
    let settings = settings.merge(opts.overrides())?;

    init_logging(settings.log_level()?)?;
    log::info!("Starting banca console against {}", settings.api_url);

    let mut builder = BancaClient::builder().url(&settings.api_url);
    if let Some(timeout) = settings.timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().context("building API client")?;

    let views = views::all(settings.download_dir());
    let mut console = Console::new(client, views).with_page_size(settings.page_size);

    let stdin = BufReader::new(tokio::io::stdin());
    console.run(stdin, tokio::io::stdout()).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    run(opts).await
}
