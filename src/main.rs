#[macro_use]
extern crate slog;
#[macro_use]
extern crate serde_json;

mod errors;
mod logger;
mod settings;
mod html;
mod indexer;
mod query_parser;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use slog::Logger;
use tfidf::Searcher;
use tfidf::store::IndexReader;
use tfidf::store::memory::MemoryIndexStore;

use crate::indexer::{HtmlIndexer, HtmlFields};
use crate::settings::{Settings, SimilarityName};


#[derive(Parser, Debug)]
#[command(
    name = "tfsearch",
    about = "Index HTML files and search them with explainable TF-IDF scores",
    version
)]
struct Cli {
    /// HTML file, or directory of HTML files, to index
    docs: PathBuf,

    /// Queries to run. Quote a phrase to match it exactly.
    queries: Vec<String>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    similarity: Option<SimilarityName>,

    /// Number of hits to show per query
    #[arg(long)]
    top: Option<usize>,

    /// Show how each hit was scored
    #[arg(long)]
    explain: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}


impl Cli {
    fn settings(&self) -> Result<Settings, errors::SettingsError> {
        let mut settings = match self.config {
            Some(ref path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(similarity) = self.similarity {
            settings.similarity = similarity;
        }
        if let Some(top) = self.top {
            settings.top = top;
        }
        if self.explain {
            settings.explain = true;
        }

        Ok(settings)
    }
}


fn run(log: &Logger, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = cli.settings()?;
    let similarity = settings.similarity_model();
    let analyzer = settings.analyzer();

    let mut store = MemoryIndexStore::new(similarity);
    let fields = HtmlFields::create(&mut store, &settings)?;

    let started = Instant::now();
    let count = HtmlIndexer::new(log.new(o!()), &mut store, analyzer.clone(), fields).index_path(&cli.docs)?;
    info!(log, "[indexer] done"; "documents" => count, "path" => cli.docs.display().to_string(), "elapsed_ms" => started.elapsed().as_millis() as u64);

    let searcher = Searcher::new(&store, similarity);
    debug!(log, "[search] ready"; "similarity" => similarity.name(), "max_doc" => store.max_doc());

    for query_text in cli.queries.iter() {
        let query = query_parser::parse_query(query_text, &settings.fields, &analyzer);
        let results = output::run_query(&searcher, &fields, query_text, &query, settings.top, settings.explain);

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&results.to_json())?);
        } else {
            print!("{}", results.to_text());
        }
    }

    Ok(())
}


fn main() -> ExitCode {
    let cli = Cli::parse();
    let (log, _guard) = logger::build(cli.verbose);

    if let Err(err) = logger::init(&log, cli.verbose) {
        warn!(log, "[sys] library logging unavailable"; "error" => err.to_string());
    }

    match run(&log, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            crit!(log, "[sys] {}", err);
            ExitCode::FAILURE
        }
    }
}
