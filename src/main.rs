//! # corpusprep
//!
//! Builds a flat, normalized text corpus from conversational datasets,
//! to be used as tokenizer training input.
//!
//! ```sh
//! corpusprep 0.1.0
//! builds a flat text corpus from conversational datasets.
//!
//! USAGE:
//!     corpusprep <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     build      Build a corpus
//!     help       Prints this message or the help of the given subcommand(s)
//!     inspect    Show which fields would be extracted from a dataset
//! ```
//!
//! Logging is controlled by `RUST_LOG` (e.g. `RUST_LOG=info`).
//! A Hugging Face token is read from `HF_TOKEN` when set.
use std::fs::File;

use structopt::StructOpt;

use corpusprep::cli;
use corpusprep::error::Error;
use corpusprep::inspect::inspect;
use corpusprep::pipelines::{CorpusBuilder, Pipeline};
use corpusprep::sources::SourceRouter;

#[macro_use]
extern crate log;

fn hf_token() -> Option<String> {
    std::env::var("HF_TOKEN").ok().filter(|t| !t.trim().is_empty())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Corpusprep::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Corpusprep::Build(b) => {
            let config = b.to_config()?;
            let source = SourceRouter::from_config(&config, hf_token())?;
            let report = CorpusBuilder::new(config, source).run()?;

            if let Some(path) = &b.report {
                let file = File::create(path)?;
                serde_json::to_writer_pretty(file, &report)?;
                info!("report written to {:?}", path);
            }

            for dataset in &report.datasets {
                println!(
                    "{}\t{} lines\t{} records\t{}",
                    dataset.name,
                    dataset.lines_written,
                    dataset.records,
                    dataset.error.as_deref().unwrap_or("ok")
                );
            }
            println!("{} lines written to {:?}", report.nb_lines, report.output);
        }

        cli::Corpusprep::Inspect(i) => {
            let config = i.to_config()?;
            let source = SourceRouter::from_config(&config, hf_token())?;
            for summary in inspect(&source, &config, &i.dataset, i.nb_records)? {
                println!("#{} keys: {:?}", summary.index, summary.keys);
                match summary.preview {
                    Some(preview) => println!(
                        "    fields {:?}, {} unit(s), first: {:?}",
                        summary.fields, summary.nb_units, preview
                    ),
                    None => println!("    no recognized field"),
                }
            }
        }
    };
    Ok(())
}
