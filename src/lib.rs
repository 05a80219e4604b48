/*!
# corpusprep

Builds a single flat text corpus out of conversational datasets,
meant to be fed to a tokenizer trainer.

For each dataset, records are fetched from a [sources::DatasetSource],
their text is located by an [extract::FieldExtractor],
normalized by a [normalize::Normalizer] and appended line by line to the corpus file.

```no_run
use corpusprep::config::Config;
use corpusprep::pipelines::{CorpusBuilder, Pipeline};
use corpusprep::sources::SourceRouter;

let mut config = Config::default();
config.datasets = vec!["daily_dialog".parse()?, "blended_skill_talk".parse()?];

let source = SourceRouter::from_config(&config, None)?;
let report = CorpusBuilder::new(config, source).run()?;
println!("{} lines", report.nb_lines);
# Ok::<(), corpusprep::error::Error>(())
```
!*/
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod filtering;
pub mod inspect;
pub mod io;
pub mod normalize;
pub mod pipelines;
pub mod record;
pub mod sources;
