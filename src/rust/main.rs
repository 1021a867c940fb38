use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use vietsent::history::DEFAULT_HISTORY_LIMIT;
use vietsent::{
    BuiltinModel, ClassificationResult, ClassifyError, Config, ErrorKind, HistoryStore,
    JsonlHistory, ModelManager, OnnxSentimentModel, Sentiment, SentimentClassifier,
};

#[derive(Parser)]
#[command(author, version, about = "Vietnamese sentence sentiment classifier", long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Built-in model to use (phobert or distilbert)
    #[arg(long, global = true)]
    model: Option<BuiltinModel>,

    /// Directory with model.onnx and tokenizer.json, bypassing the model cache
    #[arg(long, global = true)]
    model_dir: Option<PathBuf>,

    /// History file (JSON lines)
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// JSON file replacing the builtin vowels, stopwords and dictionary
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify TEXT, or every line read from stdin when TEXT is omitted
    Classify {
        text: Option<String>,

        /// Do not record results in the history
        #[arg(long)]
        no_history: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recent classifications, newest first
    History {
        #[arg(short, long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,

        #[arg(short, long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
    },
    /// Download the selected built-in model into the cache
    Download {
        /// Force a fresh download of the model files
        #[arg(short, long)]
        fresh: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    All,
    Positive,
    Neutral,
    Negative,
}

impl Filter {
    fn sentiment(self) -> Option<Sentiment> {
        match self {
            Self::All => None,
            Self::Positive => Some(Sentiment::Positive),
            Self::Neutral => Some(Sentiment::Neutral),
            Self::Negative => Some(Sentiment::Negative),
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(model) = args.model {
        config.model = model;
    }
    if args.model_dir.is_some() {
        config.model_dir = args.model_dir.clone();
    }
    if args.history.is_some() {
        config.history_path = args.history.clone();
    }
    if args.reference.is_some() {
        config.reference_path = args.reference.clone();
    }
    Ok(config)
}

async fn resolve_model_dir(config: &Config) -> Result<PathBuf> {
    if let Some(dir) = &config.model_dir {
        return Ok(dir.clone());
    }
    let manager = ModelManager::new(config.models_dir())?;
    let info = config.model.get_model_info();
    info!("Using model {} ({})", config.model, config.model.hub_id());
    let dir = manager
        .ensure_model_downloaded(&info)
        .await
        .with_context(|| format!("Model {} is not available", config.model))?;
    Ok(dir)
}

async fn download(config: &Config, fresh: bool) -> Result<()> {
    let manager = ModelManager::new(config.models_dir())?;
    let info = config.model.get_model_info();

    if fresh {
        info!("Fresh download requested - removing any existing model files...");
        manager.remove_download(&info.name)?;
    }
    let dir = manager.ensure_model_downloaded(&info).await?;
    println!("Model {} ready at {}", config.model, dir.display());
    Ok(())
}

fn label_vi(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "TÍCH CỰC",
        Sentiment::Negative => "TIÊU CỰC",
        Sentiment::Neutral => "TRUNG TÍNH",
    }
}

fn print_result(result: &ClassificationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
        return Ok(());
    }
    println!("Câu gốc:          {}", result.original_text);
    println!("Câu chuẩn hóa:    {}", result.normalized_text);
    println!("Cảm xúc:          {} ({})", label_vi(result.sentiment), result.sentiment);
    println!("Độ tin cậy:       {:.2}", result.score);
    Ok(())
}

fn print_error(err: &ClassifyError) {
    match err.kind() {
        ErrorKind::EmptyInput => eprintln!("Không được để trống. Vui lòng nhập câu tiếng Việt."),
        ErrorKind::NotPlausibleText => {
            eprintln!("Câu nhập vào không giống tiếng Việt hoặc không có nghĩa rõ ràng.")
        }
        ErrorKind::Inference => eprintln!("Đã xảy ra lỗi kỹ thuật khi phân loại: {}", err),
    }
}

fn classify_one(
    classifier: &SentimentClassifier<OnnxSentimentModel>,
    history: Option<&dyn HistoryStore>,
    text: &str,
    json: bool,
) -> Result<bool> {
    match classifier.classify(text) {
        Ok(result) => {
            print_result(&result, json)?;
            if let Some(store) = history {
                if let Err(e) = store.record(&result) {
                    log::error!("Failed to save history: {}", e);
                }
            }
            Ok(true)
        }
        Err(err) => {
            print_error(&err);
            Ok(false)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    vietsent::init_logger();
    let args = Args::parse();
    let config = load_config(&args)?;

    match &args.command {
        Command::Download { fresh } => download(&config, *fresh).await,
        Command::History { limit, filter } => {
            let store = JsonlHistory::open(config.history_path())?;
            let entries = store.query(*limit, filter.sentiment())?;
            if entries.is_empty() {
                println!("Chưa có lịch sử nào khớp với bộ lọc hiện tại.");
            }
            for entry in entries {
                println!(
                    "[{}] {:<10} {}",
                    entry.timestamp,
                    label_vi(entry.sentiment),
                    entry.text
                );
            }
            Ok(())
        }
        Command::Classify {
            text,
            no_history,
            json,
        } => {
            let model_dir = resolve_model_dir(&config).await?;
            let classifier = config.build_classifier(model_dir)?;
            let store = if *no_history {
                None
            } else {
                Some(JsonlHistory::open(config.history_path())?)
            };
            let history = store.as_ref().map(|s| s as &dyn HistoryStore);

            match text {
                Some(text) => {
                    if !classify_one(&classifier, history, text, *json)? {
                        std::process::exit(1);
                    }
                }
                None => {
                    for line in io::stdin().lock().lines() {
                        let line = line?;
                        if line.trim().is_empty() {
                            continue;
                        }
                        classify_one(&classifier, history, &line, *json)?;
                    }
                }
            }
            Ok(())
        }
    }
}
