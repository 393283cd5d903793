use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use histoscope::cli::{self, Command};
use histoscope::config;
use histoscope::fetch::{FetchRequest, HistoryFetcher};
use histoscope::output;
use histoscope::{api, logging};

fn main() -> Result<()> {
    let cli_opts = cli::parse();
    logging::init_logging(cli_opts.log_json);

    let cfg = config::load_config(cli_opts.config_path.as_deref())?;
    let fetcher = HistoryFetcher::from_host(cfg);

    match cli_opts.command {
        Command::Paths => {
            let page = api::index(&fetcher);
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &page)?;
            stdout.write_all(b"\n")?;
        }
        Command::Fetch(args) => {
            let request = FetchRequest {
                browser: args.browser.into(),
                path: args.path,
                limit: args.limit.unwrap_or(fetcher.config().default_limit),
            };
            info!(
                "fetching browser={} limit={}{}",
                request.browser,
                request.limit,
                request
                    .path
                    .as_deref()
                    .map(|p| format!(" path={}", p.display()))
                    .unwrap_or_default()
            );
            let records = fetcher.fetch(&request)?;

            let format = args.format.into();
            match args.output.as_deref() {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    output::write_history(format, &records, file)?;
                    info!("wrote {} records to {}", records.len(), path.display());
                }
                None => output::write_history(format, &records, io::stdout().lock())?,
            }
        }
    }

    Ok(())
}
