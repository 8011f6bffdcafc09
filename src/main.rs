use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use publication_catalog::api::{self, AppState};
use publication_catalog::catalog::{page_window, total_pages, MemoryStorage, Storage};
use publication_catalog::config::{
    default_config_path, find_config_file, get_config, init_config_file, load_config, Config,
    LogFormat, LOCAL_CONFIG_FILE,
};
use publication_catalog::models::{
    DatabaseParam, Publication, RawNumber, RawSearchParams, SearchQuery, SearchResult,
};
use publication_catalog::ui::{self, Status};
use publication_catalog::utils::{
    classify, format_bundle, get_structured_citation, normalize_with_limit,
    publication_table_columns, terminal_width, truncate_with_ellipsis, CitationStyle,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// pubcat - Search, cite and export a catalog of academic publications
#[derive(Parser, Debug)]
#[command(name = "pubcat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search, cite and export a catalog of academic publications", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file with the publications to load (overrides [catalog] data_file)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn resolve(self) -> Self {
        match self {
            OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the catalog
    #[command(alias = "s")]
    Search {
        /// Text matched against title, authors and abstract
        query: Option<String>,

        /// Author name (substring)
        #[arg(long)]
        author: Option<String>,

        /// University (matched against the author list)
        #[arg(long)]
        university: Option<String>,

        /// Journal name (substring)
        #[arg(long)]
        journal: Option<String>,

        /// Exact category, or "all"
        #[arg(long)]
        category: Option<String>,

        /// Earliest publication year
        #[arg(long)]
        year_from: Option<String>,

        /// Latest publication year
        #[arg(long)]
        year_to: Option<String>,

        /// Source database; repeat to match any of several
        #[arg(long = "database", short = 'd')]
        databases: Vec<String>,

        /// Page number, starting at 1
        #[arg(long)]
        page: Option<String>,

        /// Results per page
        #[arg(long)]
        limit: Option<String>,

        /// Sort field: year, title or journal
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort direction: asc or desc
        #[arg(long)]
        sort_direction: Option<String>,
    },

    /// Show one publication
    Get {
        id: i64,
    },

    /// Format citations for publications
    Cite {
        /// Publication ids
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Citation style: GOST, APA or BIBTEX
        #[arg(long, short)]
        style: Option<String>,
    },

    /// Show the badge colors of categories
    Classify {
        #[arg(required = true)]
        categories: Vec<String>,
    },

    /// Print the citations of a selection as one block
    Export {
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Citation style: GOST, APA or BIBTEX
        #[arg(long, short)]
        style: Option<String>,
    },

    /// Run the REST server
    Serve {
        /// Address to listen on (overrides [server] bind)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Destination (defaults to the per-user config path)
        path: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(find_config_file);
    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) if cli.config.is_none() => {
            eprintln!("Ignoring unreadable configuration: {}", err);
            get_config()
        }
        Err(err) => return Err(err).context("failed to load configuration"),
    };

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let format = cli.output.resolve();

    match command {
        Commands::Search {
            query,
            author,
            university,
            journal,
            category,
            year_from,
            year_to,
            databases,
            page,
            limit,
            sort_by,
            sort_direction,
        } => {
            let raw = RawSearchParams {
                query,
                author,
                university,
                journal,
                category,
                year_from: year_from.map(RawNumber::Text),
                year_to: year_to.map(RawNumber::Text),
                database: (!databases.is_empty()).then_some(DatabaseParam::Many(databases)),
                page: page.map(RawNumber::Text),
                limit: limit.map(RawNumber::Text),
                sort_by,
                sort_direction,
            };
            let search_query = normalize_with_limit(raw, config.search.default_page_size)?;

            let storage = open_storage(cli.data.as_deref(), &config).await?;
            let result = storage.get_publications(&search_query).await?;
            output_search_result(&result, &search_query, format, cli.quiet)?;
        }

        Commands::Get { id } => {
            let storage = open_storage(cli.data.as_deref(), &config).await?;
            let publication = storage
                .get_publication(id)
                .await?
                .with_context(|| format!("publication {} not found", id))?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&publication)?),
                OutputFormat::Plain => output_plain(std::slice::from_ref(&publication)),
                _ => ui::print_publication_box(&publication),
            }
        }

        Commands::Cite { ids, style } => {
            let style = resolve_style(style.as_deref(), &config);
            let storage = open_storage(cli.data.as_deref(), &config).await?;
            let publications = select(&storage, &ids).await?;

            if format == OutputFormat::Json {
                let citations: Vec<_> = publications
                    .iter()
                    .map(|p| get_structured_citation(p, style))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&citations)?);
            } else {
                for publication in &publications {
                    println!("{}", get_structured_citation(publication, style).formatted);
                    println!();
                }
            }
        }

        Commands::Classify { categories } => {
            let colored = format == OutputFormat::Table;
            if format == OutputFormat::Json {
                let badges: Vec<_> = categories
                    .iter()
                    .map(|c| serde_json::json!({ "category": c, "colors": classify(c) }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&badges)?);
            } else {
                for category in &categories {
                    let colors = classify(category);
                    println!(
                        "{}  {} / {}",
                        ui::category_badge(category, colored),
                        colors.background,
                        colors.foreground
                    );
                }
            }
        }

        Commands::Export { ids, style } => {
            let style = resolve_style(style.as_deref(), &config);
            let storage = open_storage(cli.data.as_deref(), &config).await?;
            let publications = select(&storage, &ids).await?;
            if publications.is_empty() {
                anyhow::bail!("no publications found for the given ids");
            }

            println!("{}", format_bundle(&publications, style));
            if !cli.quiet && format == OutputFormat::Table {
                ui::print_status(
                    Status::Success,
                    &format!("Exported {} publications as {}", publications.len(), style),
                );
            }
        }

        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let storage = open_storage(cli.data.as_deref(), &config).await?;
            if !cli.quiet {
                ui::print_status(
                    Status::Info,
                    &format!(
                        "Serving {} publications at http://{}",
                        storage.len().await,
                        bind
                    ),
                );
            }
            let state =
                AppState::new(Arc::new(storage)).default_limit(config.search.default_page_size);
            api::serve(state, &bind)
                .await
                .with_context(|| format!("server on {} failed", bind))?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => {
                let path = path
                    .or_else(default_config_path)
                    .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
                let written = init_config_file(&path, force)?;
                if !cli.quiet {
                    ui::print_status(
                        Status::Success,
                        &format!("Wrote configuration to {}", written.display()),
                    );
                }
            }
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        },
    }

    Ok(())
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config.logging.level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| format!("publication_catalog={0},pubcat={0}", level)),
    );
    let json = config.logging.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

/// Load the catalog from `--data`, else from `[catalog] data_file`, else start empty
async fn open_storage(data: Option<&Path>, config: &Config) -> Result<MemoryStorage> {
    let Some(path) = data.or(config.catalog.data_file.as_deref()) else {
        tracing::warn!("no data file configured, starting with an empty catalog");
        return Ok(MemoryStorage::new());
    };

    MemoryStorage::load_json(path)
        .await
        .with_context(|| format!("failed to load publications from {}", path.display()))
}

/// Records for `ids` in the order the ids were given; unknown ids are reported and skipped.
///
/// Returns the records and the ids that did not resolve.
async fn fetch_selection(
    storage: &MemoryStorage,
    ids: &[i64],
) -> Result<(Vec<Publication>, Vec<i64>)> {
    let found = storage.get_publications_by_ids(ids).await?;
    let mut ordered = Vec::with_capacity(found.len());
    let mut missing = Vec::new();
    for id in ids {
        match found.iter().find(|p| p.id == *id) {
            Some(publication) => ordered.push(publication.clone()),
            None => missing.push(*id),
        }
    }
    Ok((ordered, missing))
}

/// Fetch a selection, warning about every id that is not in the catalog
async fn select(storage: &MemoryStorage, ids: &[i64]) -> Result<Vec<Publication>> {
    let (publications, missing) = fetch_selection(storage, ids).await?;
    for id in missing {
        ui::print_status(Status::Warning, &format!("Publication {} not found", id));
    }
    Ok(publications)
}

fn resolve_style(style: Option<&str>, config: &Config) -> CitationStyle {
    style
        .map(CitationStyle::parse)
        .unwrap_or(config.citation.default_style)
}

fn output_search_result(
    result: &SearchResult,
    query: &SearchQuery,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Plain => output_plain(&result.data),
        _ => {
            let pages = total_pages(result.total, query.limit);
            if !quiet {
                ui::print_search_header(result.total, query.page, pages);
            }
            output_table(&result.data);
            let strip = page_window(query.page, pages);
            if !quiet && !strip.is_empty() {
                println!();
                println!("  {}", ui::render_page_strip(query.page, &strip));
            }
        }
    }
    Ok(())
}

fn output_plain(publications: &[Publication]) {
    for publication in publications {
        println!(
            "[{}] {} - {} ({})",
            publication.id, publication.title, publication.authors, publication.year
        );
        if let Some(journal) = publication.journal.as_deref().filter(|j| !j.is_empty()) {
            println!("  Journal: {}", journal);
        }
        if let Some(doi) = publication.doi.as_deref().filter(|d| !d.is_empty()) {
            println!("  DOI: {}", doi);
        }
        if let Some(category) = publication.category.as_deref().filter(|c| !c.is_empty()) {
            println!("  Category: {}", category);
        }
        println!();
    }
}

fn output_table(publications: &[Publication]) {
    use comfy_table::{Attribute, Cell, Table};

    let (title_w, authors_w, journal_w, _, category_w) =
        publication_table_columns(terminal_width());

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Title", "Authors", "Journal", "Year", "Category"]);

    for publication in publications {
        let title = format!("#{} {}", publication.id, publication.title);
        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&title, title_w)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&publication.authors, authors_w)),
            Cell::new(truncate_with_ellipsis(
                publication.journal.as_deref().unwrap_or(""),
                journal_w,
            )),
            Cell::new(publication.year),
            Cell::new(truncate_with_ellipsis(
                publication.category.as_deref().unwrap_or(""),
                category_w,
            )),
        ]);
    }
    println!("{table}");
}
