use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ns_analysis::{word_frequencies, LexiconScorer, ResultAggregator, TopicCache, TopicModeler};
use ns_core::{Error, Result, SearchProvider, SentimentLabel, SpeechRecognizer, Translator};
use ns_search::{DummyProvider, EchoTranslator, HttpSpeechRecognizer, HttpTranslator, NewsApiProvider};
use ns_session::{FileHistoryStore, SearchSessionStore};
use ns_views::ViewCoordinator;
use ns_web::AppState;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search history file for this session
    #[arg(long, default_value = "search_history.txt")]
    history_file: PathBuf,
    #[arg(long, default_value = "dummy", help = "Search provider. Available providers: dummy (default), newsapi")]
    provider: String,
    /// API credential for the newsapi provider; falls back to NEWS_API_KEY
    #[arg(long)]
    api_key: Option<String>,
    /// Override the news search endpoint
    #[arg(long)]
    base_url: Option<String>,
    /// Translation service endpoint; omitted means no translation
    #[arg(long)]
    translate_url: Option<String>,
    /// Speech service endpoint, required for --voice
    #[arg(long)]
    speech_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Search for news, label sentiment, and print the aggregate views
    Search {
        /// Keyword to search for; omit when using --voice
        keyword: Option<String>,
        /// Only show articles from this source (use "Unknown" for untagged)
        #[arg(long)]
        source: Option<String>,
        /// Fit and print topics over the result set
        #[arg(long)]
        topics: bool,
        /// Print the word-cloud term frequencies
        #[arg(long)]
        terms: bool,
        /// Recognize the search keyword from this audio file
        #[arg(long)]
        voice: Option<PathBuf>,
    },
    /// Show the recent search history
    History {
        /// Clear the history instead of showing it
        #[arg(long)]
        clear: bool,
    },
    /// Serve the session API over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
        /// Directory for per-session history files; omitted means in-memory
        #[arg(long)]
        history_dir: Option<PathBuf>,
    },
}

fn create_provider(cli: &Cli) -> Result<Arc<dyn SearchProvider>> {
    match cli.provider.as_str() {
        "dummy" => Ok(Arc::new(DummyProvider::sample())),
        "newsapi" => {
            let api_key = cli
                .api_key
                .clone()
                .or_else(|| std::env::var("NEWS_API_KEY").ok())
                .ok_or_else(|| {
                    Error::Validation("the newsapi provider needs --api-key or NEWS_API_KEY".into())
                })?;
            Ok(Arc::new(NewsApiProvider::new(api_key, cli.base_url.clone())?))
        }
        other => Err(Error::Validation(format!("unknown provider: {}", other))),
    }
}

fn create_translator(cli: &Cli) -> Result<Arc<dyn Translator>> {
    match &cli.translate_url {
        Some(url) => Ok(Arc::new(HttpTranslator::new(url.clone())?)),
        None => Ok(Arc::new(EchoTranslator)),
    }
}

async fn resolve_keyword(cli: &Cli, keyword: Option<String>, voice: Option<PathBuf>) -> Result<String> {
    if let Some(path) = voice {
        let url = cli.speech_url.as_ref().ok_or_else(|| {
            Error::Validation("--voice needs --speech-url".into())
        })?;
        let audio = tokio::fs::read(&path).await?;
        let recognizer = HttpSpeechRecognizer::new(url.clone())?;
        let recognized = recognizer.recognize(&audio).await?;
        info!("🎤 Recognized keyword: {}", recognized);
        return Ok(recognized);
    }
    keyword.ok_or_else(|| Error::Validation("a keyword (or --voice) is required".into()))
}

async fn run_search(
    cli: &Cli,
    keyword: Option<String>,
    source: Option<String>,
    topics: bool,
    terms: bool,
    voice: Option<PathBuf>,
) -> Result<()> {
    let keyword = resolve_keyword(cli, keyword, voice).await?;
    let provider = create_provider(cli)?;
    let aggregator = ResultAggregator::new(provider, Arc::new(LexiconScorer::new()));
    let coordinator = ViewCoordinator::new();

    let store = Arc::new(FileHistoryStore::new(cli.history_file.clone()));
    let mut session = SearchSessionStore::open(store).await?;

    session.record_query(&keyword).await?;
    info!("🔍 Searching for {:?}", keyword);

    let outcome = aggregator.fetch_and_label(&keyword).await;
    println!("{}", outcome.notice);
    session.set_results(outcome.results.clone());

    let results = match source {
        Some(ref name) => {
            let filtered = coordinator.filter_by_source(&outcome.results, name);
            if filtered.is_empty() {
                println!("No articles from source {:?}", name);
            }
            filtered
        }
        None => outcome.results,
    };

    let counts = aggregator.aggregate_counts(&results);
    println!(
        "Sentiment: {} positive ({:.0}%), {} negative ({:.0}%), {} neutral ({:.0}%)",
        counts.positive,
        counts.percent(SentimentLabel::Positive),
        counts.negative,
        counts.percent(SentimentLabel::Negative),
        counts.neutral,
        counts.percent(SentimentLabel::Neutral),
    );

    for row in aggregator.to_table(&results) {
        let emoji = match row.sentiment {
            SentimentLabel::Positive => "🟢",
            SentimentLabel::Negative => "🔴",
            SentimentLabel::Neutral => "⚪",
        };
        println!("{} {} - {} ({})", emoji, row.title, row.author, row.link);
    }

    for (name, count) in aggregator.group_by_source(&results) {
        println!("  {}: {}", name, count);
    }

    if terms {
        for (term, count) in word_frequencies(&results, 20) {
            println!("  {} × {}", count, term);
        }
    }

    if topics {
        let mut cache = TopicCache::new();
        match cache.topics_for(&results, &TopicModeler::default()) {
            Some(topics) => {
                for (i, topic) in topics.iter().enumerate() {
                    let words: Vec<&str> =
                        topic.terms.iter().map(|(t, _)| t.as_str()).collect();
                    println!("Topic {}: {}", i + 1, words.join(", "));
                }
            }
            None => println!("Not enough article text to fit topics"),
        }
    }

    Ok(())
}

async fn run_history(cli: &Cli, clear: bool) -> Result<()> {
    let store = Arc::new(FileHistoryStore::new(cli.history_file.clone()));
    let mut session = SearchSessionStore::open(store).await?;

    if clear {
        session.clear_history().await;
        info!("🧹 Search history cleared");
        return Ok(());
    }

    let history = session.load_history().await?;
    if history.is_empty() {
        println!("No recent searches");
    }
    for query in history {
        println!("{}", query);
    }
    Ok(())
}

async fn run_serve(cli: &Cli, addr: &str, history_dir: Option<PathBuf>) -> Result<()> {
    let provider = create_provider(cli)?;
    let aggregator = Arc::new(ResultAggregator::new(provider, Arc::new(LexiconScorer::new())));
    let translator = create_translator(cli)?;

    let state = AppState::new(aggregator, translator, history_dir);
    let app = ns_web::create_app(state).await;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Serving session API on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Search {
            keyword,
            source,
            topics,
            terms,
            voice,
        } => {
            run_search(
                &cli,
                keyword.clone(),
                source.clone(),
                *topics,
                *terms,
                voice.clone(),
            )
            .await
        }
        Commands::History { clear } => run_history(&cli, *clear).await,
        Commands::Serve { addr, history_dir } => {
            run_serve(&cli, addr, history_dir.clone()).await
        }
    }
}
