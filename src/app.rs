use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::fetch::{self, FetchOptions, FetchOutcome, Source};
use crate::output::{self, table, OutputFormat};
use crate::server::{self, ServerOptions};

fn print_banner() {
    const BANNER: &str = r#"
     ______          __        _
    / __/ /__  ___  / /__   __(_)__ _    __
   / /_/ / _ \/ _ \/ __/ | / / / _ \ |/|/ /
  / __/ /  __/  __/ /_  | |/ / /  __/ |/|/ /
 /_/ /_/\___/\___/\__/  |___/_/\___/|__,__/

       v0.3.2 - trucking-company feed renderer
    "#;
    eprint!("{}", BANNER);
    eprintln!();
}

// Status output stays on stderr so a stdout render stays clean.
fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

fn format_label(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Html => "html",
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    input: Option<String>,
    endpoint: Option<String>,
    timeout: usize,
    output: Option<String>,
    output_format: Option<String>,
    proxy: Option<String>,
    header: Option<String>,
    serve: bool,
    listen: SocketAddr,
    data_dir: PathBuf,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }

    let endpoint = args.endpoint.or(cfg.endpoint);

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = args.output_format.or(cfg.output_format);
    if let Some(raw) = output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid output_format '{raw}', expected html, json, or text"
            ));
        }
    }

    let proxy = args.proxy.or(cfg.proxy);
    let header = args.header.or(cfg.header);

    let listen_raw = args
        .listen
        .or(cfg.listen)
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());
    let listen = listen_raw
        .parse::<SocketAddr>()
        .map_err(|e| format!("invalid listen address '{listen_raw}': {e}"))?;

    let data_dir = PathBuf::from(config::expand_tilde_string(
        args.data_dir
            .or(cfg.data_dir)
            .unwrap_or_else(|| ".".to_string())
            .as_str(),
    ));

    Ok(RunConfig {
        input: args.input,
        endpoint,
        timeout,
        output,
        output_format,
        proxy,
        header,
        serve: args.serve,
        listen,
        data_dir,
        no_color,
    })
}

fn resolve_output_format(run: &RunConfig) -> OutputFormat {
    run.output_format
        .as_deref()
        .and_then(OutputFormat::parse)
        .or_else(|| {
            run.output
                .as_deref()
                .and_then(output::infer_format_from_path)
        })
        .unwrap_or(OutputFormat::Html)
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleetview=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn write_output(path: Option<&str>, rendered: &[u8]) -> Result<(), String> {
    match path {
        Some(path) => {
            let mut outfile = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .await
                .map_err(|e| format!("failed to open output file: {e}"))?;
            outfile
                .write_all(rendered)
                .await
                .map_err(|_| "failed to write output file".to_string())?;
            Ok(())
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(rendered)
                .await
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
            stdout
                .flush()
                .await
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
            Ok(())
        }
    }
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    if run.serve {
        print_banner();
        init_tracing();
        format_kv_line("Listen", &run.listen.to_string());
        format_kv_line("Data", &run.data_dir.display().to_string());
        eprintln!();
        return server::serve(ServerOptions {
            listen: run.listen,
            data_dir: run.data_dir.clone(),
        })
        .await
        .map_err(|e| e.to_string());
    }

    print_banner();

    let input = run.input.clone().unwrap_or_default();
    let source =
        fetch::resolve_source(&input, run.endpoint.as_deref()).map_err(|e| e.to_string())?;
    let format = resolve_output_format(&run);

    let source_label = match &source {
        Source::Remote(url) => url.to_string(),
        Source::Local(path) => path.display().to_string(),
    };
    format_kv_line("Source", &source_label);
    format_kv_line(
        "HTTP",
        &format!(
            "timeout={}s proxy={}",
            run.timeout,
            if run.proxy.as_deref().unwrap_or("").is_empty() {
                "off"
            } else {
                "on"
            }
        ),
    );
    format_kv_line(
        "Output",
        &format!(
            "dest={} format={}",
            run.output.as_deref().unwrap_or("stdout"),
            format_label(format)
        ),
    );
    eprintln!();

    let options = FetchOptions {
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
        header: run.header.clone(),
    };
    let outcome = fetch::load(&source, &options)
        .await
        .map_err(|e| e.to_string())?;

    match outcome {
        FetchOutcome::Empty { .. } => {
            let message = "No trucking companies found in the JSON file.";
            eprintln!(
                "{}{}{} {}",
                "[".bold().white(),
                "INF".bold().blue(),
                "]".bold().white(),
                message.bold().white()
            );
            if run.output.is_some() {
                let doc = table::render_message_document(message);
                write_output(run.output.as_deref(), doc.as_bytes()).await?;
            }
            Ok(())
        }
        FetchOutcome::Table(loaded) => {
            let records = output::build_records(&loaded.rows, loaded.base_url.as_ref());
            let rendered = match format {
                OutputFormat::Text => output::render_text(&records),
                OutputFormat::Json => output::render_json(&records),
                OutputFormat::Html => {
                    let base_href = loaded.base_url.as_ref().map(|u| u.to_string());
                    output::render_html(&loaded.headers, &records, base_href.as_deref())
                }
            };
            write_output(run.output.as_deref(), &rendered).await?;
            if let Some(path) = run.output.as_deref() {
                eprintln!(
                    ":: Completed :: {} companies -> {} ::",
                    records.len(),
                    path
                );
            }
            Ok(())
        }
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = CliArgs::parse();

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => {
                // First run seeds a commented config; an unwritable home
                // is not fatal.
                let _ = config::ensure_default_config_file(&path);
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
