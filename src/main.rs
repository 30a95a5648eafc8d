use bloodwork::config::{Command, ListFormat};
use bloodwork::domain::ports::{ConfigProvider, JobBroker, RecordStore};
use bloodwork::utils::logger;
use bloodwork::utils::validation::{validate_document_filename, Validate};
use bloodwork::{
    fetch_remote_document, AnalysisPipeline, Analyzer, AnalyzerError, CliConfig, JobStatus,
    JobSubmitter, JsonlStore, LocalStorage, MemoryBroker, PlainTextExtractor, ReferenceTable,
    TomlConfig, Worker,
};
use clap::Parser;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting bloodwork CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {e}");
        std::process::exit(1);
    }

    // A config file, when given, wins over the CLI flags wholesale.
    let file_config = match &cli.config {
        Some(path) => Some(TomlConfig::from_file(path)?),
        None => None,
    };
    let (upload_dir, records_path, workers, ranges) = match &file_config {
        Some(config) => (
            config.upload_dir().to_string(),
            config.records_path().to_string(),
            config.worker_count(),
            config.reference_table(),
        ),
        None => (
            cli.upload_dir.clone(),
            cli.records_path.clone(),
            cli.workers,
            ReferenceTable::default(),
        ),
    };

    let storage = LocalStorage::new(upload_dir);
    let store = JsonlStore::open(&records_path)?;
    let pipeline = AnalysisPipeline::new(ranges);

    let outcome = match cli.command {
        Command::Analyze { ref input } => run_analyze(input, storage, store, pipeline).await,
        Command::Submit { ref inputs } => {
            run_submit(inputs, storage, store, pipeline, workers).await
        }
        Command::List { format } => run_list(&store, format).await,
    };

    if let Err(e) = outcome {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
    Ok(())
}

/// Resolve a local path or http(s) URL into (filename, bytes).
async fn load_document(input: &str) -> bloodwork::Result<(String, Vec<u8>)> {
    if input.starts_with("http://") || input.starts_with("https://") {
        fetch_remote_document(input).await
    } else {
        let filename = Path::new(input)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(input)
            .to_string();
        let bytes = std::fs::read(input)?;
        Ok((filename, bytes))
    }
}

async fn run_analyze(
    input: &str,
    storage: LocalStorage,
    store: JsonlStore,
    pipeline: AnalysisPipeline,
) -> anyhow::Result<()> {
    let (filename, bytes) = load_document(input).await?;
    validate_document_filename(&filename)?;

    let analyzer = Analyzer::new(storage, PlainTextExtractor, store, pipeline);
    let record = analyzer.analyze_upload(&filename, &bytes).await?;

    tracing::info!("✅ Analysis of {} complete", filename);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn run_submit(
    inputs: &[String],
    storage: LocalStorage,
    store: JsonlStore,
    pipeline: AnalysisPipeline,
    workers: usize,
) -> anyhow::Result<()> {
    let broker = MemoryBroker::new();
    let submitter = JobSubmitter::new(broker.clone(), storage.clone());

    let mut jobs = Vec::new();
    for input in inputs {
        let (filename, bytes) = load_document(input).await?;
        validate_document_filename(&filename)?;
        let id = submitter.submit(&filename, &bytes).await?;
        jobs.push((filename, id));
    }
    broker.close();

    let mut handles = Vec::new();
    for worker_id in 0..workers {
        let worker = Worker::new(
            broker.clone(),
            storage.clone(),
            PlainTextExtractor,
            store.clone(),
            pipeline.clone(),
        );
        handles.push(tokio::spawn(async move {
            let processed = worker.run().await?;
            tracing::info!("🔁 Worker {} drained {} jobs", worker_id, processed);
            Ok::<_, AnalyzerError>(processed)
        }));
    }
    for handle in handles {
        handle.await??;
    }

    for (filename, id) in jobs {
        match broker.status(id).await? {
            JobStatus::Succeeded { record_id } => {
                println!("✅ {filename}: job {id} succeeded (record {record_id})");
            }
            JobStatus::Failed { reason } => {
                println!("❌ {filename}: job {id} failed: {reason}");
            }
            status => println!("⏳ {filename}: job {id} is still {status:?}"),
        }
    }
    Ok(())
}

async fn run_list(store: &JsonlStore, format: ListFormat) -> anyhow::Result<()> {
    let records = store.list_records().await?;

    match format {
        ListFormat::Text => {
            for record in &records {
                println!(
                    "#{} {} [{}] {}",
                    record.id,
                    record.filename,
                    record.created_at.format("%Y-%m-%d %H:%M:%S"),
                    record.summary
                );
            }
        }
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        ListFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["id", "filename", "created_at", "summary", "markers"])?;
            for record in &records {
                writer.write_record(&[
                    record.id.to_string(),
                    record.filename.clone(),
                    record.created_at.to_rfc3339(),
                    record.summary.clone(),
                    serde_json::to_string(&record.markers)?,
                ])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
