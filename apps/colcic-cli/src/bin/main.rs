use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use colcic_core::config::Config;
use colcic_core::store::{MemoryAuth, MemoryStore};
use colcic_core::traits::Datastore;
use colcic_core::types::{ChatRequest, DocumentChunk, FaqEntry};
use colcic_inference::get_default_provider;
use colcic_pipeline::ChatService;
use colcic_retrieval::ingest_text;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <ingest|ask|chat> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn load_store(config: &Config) -> anyhow::Result<MemoryStore> {
    let mut store = MemoryStore::new();
    let faq_file: String = config.get("data.faq_file").unwrap_or_else(|_| "data/faq.json".to_string());
    if let Ok(raw) = std::fs::read_to_string(&faq_file) {
        let faq: Vec<FaqEntry> = serde_json::from_str(&raw)?;
        println!("FAQ carregada: {} perguntas ({})", faq.len(), faq_file);
        store = store.with_faq(faq);
    }
    let chunks_file: String =
        config.get("data.chunks_file").unwrap_or_else(|_| "data/chunks.json".to_string());
    if let Ok(raw) = std::fs::read_to_string(&chunks_file) {
        let chunks: Vec<DocumentChunk> = serde_json::from_str(&raw)?;
        println!("Documentos carregados: {} chunks ({})", chunks.len(), chunks_file);
        store = store.with_chunks(chunks);
    }
    Ok(store)
}

fn build_service(config: &Config, store: MemoryStore) -> anyhow::Result<ChatService> {
    let provider = get_default_provider()?;
    let admins: Vec<(String, String)> = config.get("admin.usuarios").unwrap_or_default();
    Ok(ChatService::new(
        Arc::new(store),
        Arc::from(provider),
        Arc::new(MemoryAuth::new(admins)),
        config.pipeline(),
    ))
}

fn source_label(resolution: &colcic_core::types::Resolution) -> String {
    serde_json::to_value(resolution.source)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "?".to_string())
}

async fn ingest_directory(config: &Config, data_dir: PathBuf) -> anyhow::Result<()> {
    let store = load_store(config)?;
    let provider = get_default_provider()?;
    let pipeline_cfg = config.pipeline();

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&data_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    if files.is_empty() {
        println!("Nenhum arquivo .txt encontrado em {}.", data_dir.display());
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} docs {msg}")
            .expect("progress template")
            .progress_chars("#>-"),
    );
    let mut total_chunks = 0usize;
    for file in &files {
        let title = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "documento.txt".to_string());
        pb.set_message(title.clone());
        let text = std::fs::read_to_string(file)
            .unwrap_or_else(|_| String::from_utf8_lossy(&std::fs::read(file).unwrap_or_default()).to_string());
        let report =
            ingest_text(&title, &text, provider.as_ref(), &store, pipeline_cfg.chunk_size).await?;
        total_chunks += report.chunks_inserted;
        pb.inc(1);
    }
    pb.finish_with_message("ingestão concluída");

    let chunks_file: String =
        config.get("data.chunks_file").unwrap_or_else(|_| "data/chunks.json".to_string());
    if let Some(parent) = PathBuf::from(&chunks_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let chunks = store.document_chunks().await?;
    std::fs::write(&chunks_file, serde_json::to_string(&chunks)?)?;
    println!("✅ {} documentos, {} chunks gravados em {}", files.len(), total_chunks, chunks_file);
    Ok(())
}

async fn chat_loop(service: &ChatService) -> anyhow::Result<()> {
    println!("Assistente institucional COLCIC. Linha vazia encerra.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            break;
        }
        match service.chat(&ChatRequest { message: message.to_string() }).await {
            Ok(r) => println!("[{}] {}", source_label(&r), r.reply),
            Err(e) => eprintln!("erro: {e}"),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ingest" => {
            let data_dir = args.first().map(PathBuf::from).unwrap_or_else(|| {
                let dir: String =
                    config.get("data.raw_txt_dir").unwrap_or_else(|_| "data/txt".to_string());
                PathBuf::from(dir)
            });
            println!("Ingestão a partir de {}", data_dir.display());
            ingest_directory(&config, data_dir).await?;
        }
        "ask" => {
            let question = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: colcic-cli ask \"<pergunta>\"");
                std::process::exit(1)
            });
            let service = build_service(&config, load_store(&config)?)?;
            let r = service.chat(&ChatRequest { message: question }).await?;
            println!("{}", serde_json::to_string_pretty(&r)?);
        }
        "chat" => {
            let service = build_service(&config, load_store(&config)?)?;
            chat_loop(&service).await?;
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
