use clap::Parser;
use decksize::app::{self, Capabilities};
use decksize::catalog::update::HttpFetcher;
use decksize::cli::Cli;
use decksize::config::{Config, ProbeKind};
use decksize::platform;
use decksize::scan::discover::FsLister;
use decksize::scan::size::{DuProbe, SizeProbe, WalkProbe};
use decksize::Result;

fn size_probe(config: &Config) -> Box<dyn SizeProbe> {
    match config.size_probe {
        ProbeKind::Du if platform::du_available() => Box::new(DuProbe),
        ProbeKind::Du => {
            log::warn!("du not available, measuring sizes in-process");
            Box::new(WalkProbe)
        }
        ProbeKind::Walk => Box::new(WalkProbe),
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    let fetcher = HttpFetcher::new()?;
    let probe = size_probe(&config);

    let caps = Capabilities {
        fetcher: &fetcher,
        lister: &FsLister,
        probe: probe.as_ref(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app::run(&config, &caps, &mut out, chrono::Utc::now().timestamp())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let _cli = Cli::parse();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
