//! YouTube Comment Sentiment Analysis
//!
//! Command-line front end for the topic analysis pipeline.

use clap::{Parser, Subcommand};
use comment_sentiment::{
    config::Config,
    error::AppError,
    pipeline::{Pipeline, TopicAnalysis},
    sentiment::{
        classifier::load_training_set, AnalysisResult, LexiconAnalyzer, SentimentAggregator,
        TrainedClassifierBundle,
    },
    youtube::YouTubeClient,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "comment-sentiment")]
#[command(about = "Sentiment of YouTube comments for the top videos of a topic")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the top videos for a topic
    Analyze {
        /// Search topic
        topic: String,
        /// Use the trained Naive Bayes classifier when available
        #[arg(long)]
        statistical: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Train the statistical classifier from labeled comments
    Train {
        /// JSON array of {"text": ..., "label": "positive"|"negative"}
        #[arg(short, long)]
        data: String,
        /// Output path (defaults to classifier.model_path)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Score ad-hoc comments
    Score {
        /// Comments to score
        #[arg(required = true)]
        texts: Vec<String>,
        /// Also show the trained classifier's label
        #[arg(long)]
        statistical: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    match cli.command {
        Commands::Analyze {
            topic,
            statistical,
            json,
        } => analyze_topic(config, &topic, statistical, json).await,
        Commands::Train { data, output } => {
            train_model(config, &data, output).map(|_| ExitCode::SUCCESS)
        }
        Commands::Score { texts, statistical } => {
            score_texts(config, &texts, statistical).map(|_| ExitCode::SUCCESS)
        }
    }
}

/// Load the persisted classifier once; absence means lexicon-only mode
fn load_classifier(config: &Config) -> anyhow::Result<Option<Arc<TrainedClassifierBundle>>> {
    let path = config.classifier.expanded_model_path();
    Ok(TrainedClassifierBundle::load_if_present(&path)?.map(Arc::new))
}

/// User-facing message and exit status for a failed analysis
fn failure_report(err: &AppError) -> (String, u8) {
    match err {
        AppError::EmptyTopic => (err.to_string(), 2),
        _ => (format!("An error occurred: {}", err), 1),
    }
}

async fn analyze_topic(
    config: Config,
    topic: &str,
    statistical: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let classifier = load_classifier(&config)?;
    let client = Arc::new(YouTubeClient::new(&config.youtube)?);

    let aggregator = SentimentAggregator::new(client.clone(), Arc::new(LexiconAnalyzer::new()), classifier);
    let pipeline = Pipeline::new(client, aggregator, config.youtube.max_videos);

    let analysis = match pipeline.analyze_topic(topic, statistical).await {
        Ok(analysis) => analysis,
        Err(e) => {
            if !matches!(e, AppError::EmptyTopic) {
                tracing::error!("Analysis failed: {}", e);
            }
            let (message, code) = failure_report(&e);
            println!("{}", message);
            return Ok(ExitCode::from(code));
        }
    };

    match analysis {
        TopicAnalysis::NoVideos => println!("No videos found for this topic."),
        TopicAnalysis::Analyzed(results) if json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        TopicAnalysis::Analyzed(results) => {
            println!("\n📺 Comment sentiment for \"{}\"\n", topic.trim());
            for result in &results {
                print_result(result);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_result(result: &AnalysisResult) {
    println!("{}", result.video.title);
    println!("  {}", result.video.url());
    println!(
        "  Positive: {:>6.2}%  Neutral: {:>6.2}%  Negative: {:>6.2}%",
        result.sentiments.positive, result.sentiments.neutral, result.sentiments.negative
    );
    println!("  Overall: {} - {}", result.overall, result.message);
    println!();
}

fn train_model(config: Config, data: &str, output: Option<String>) -> anyhow::Result<()> {
    let examples = load_training_set(data)?;
    tracing::info!("Loaded {} labeled comments from {}", examples.len(), data);

    let bundle = TrainedClassifierBundle::train_examples(&examples)?;
    let output = match output {
        Some(path) => shellexpand::tilde(&path).into_owned(),
        None => config.classifier.expanded_model_path(),
    };
    bundle.save(&output)?;

    let [negative, positive] = bundle.class_count();
    println!(
        "Trained on {} comments ({} positive, {} negative, {} features, alpha {}), saved to {}",
        examples.len(),
        positive,
        negative,
        bundle.n_features(),
        bundle.alpha(),
        output
    );
    Ok(())
}

fn score_texts(config: Config, texts: &[String], statistical: bool) -> anyhow::Result<()> {
    let analyzer = LexiconAnalyzer::new();
    let classifier = if statistical {
        let classifier = load_classifier(&config)?;
        if classifier.is_none() {
            println!("No trained classifier found; showing lexicon scores only.\n");
        }
        classifier
    } else {
        None
    };

    for text in texts {
        let scores = analyzer.polarity_scores(text);
        println!("{}", text);
        println!(
            "  Lexicon: {} (compound {:+.3}, pos {:.2}, neu {:.2}, neg {:.2})",
            scores.sentiment(),
            scores.compound,
            scores.positive,
            scores.neutral,
            scores.negative
        );

        if let Some(classifier) = &classifier {
            let label = classifier.classify(&[text.as_str()])[0];
            println!(
                "  Statistical: {} (P(positive) {:.2})",
                label,
                classifier.positive_probability(text)
            );
        }
    }

    Ok(())
}
