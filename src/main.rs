use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use workshelf::templates::Templates;
use workshelf::{catalog, config, emit, index, output};

#[derive(Parser)]
#[command(name = "workshelf")]
#[command(about = "Static site generator for media catalogs")]
#[command(long_about = "\
Static site generator for media catalogs

One JSON document is the source of truth. Works are indexed by actress and
genre, cross-linked with related works, paginated, and exported with a
client-searchable JSON payload.

Input document (--source):

  {
    \"site_name\": \"Review Catalog\",
    \"works\": [
      {
        \"id\": \"abc00123\",
        \"title\": \"...\",
        \"release_date\": \"2026-05-01\",
        \"official_url\": \"https://...\",
        \"hero_image\": \"https://.../cover.jpg\",
        \"tags\": [\"drama\"],
        \"actresses\": [\"Aoi Yui\"]
      }
    ]
  }

Output tree (--output):

  dist/
  ├── index.html                   # Newest works (capped, see config)
  ├── works/<id>/index.html        # Work detail + related works
  ├── actresses/<slug>/index.html  # Per-actress listings + index
  ├── genres/<slug>/index.html     # Per-genre listings + index
  ├── pages/<n>/index.html         # Full catalog, paginated
  ├── search/index.html            # Client-side search
  └── assets/                      # style.css + works_index.json

An optional config.toml next to the source JSON tunes page sizes and limits.
Run 'workshelf gen-config' to print a documented template.")]
#[command(version)]
struct Cli {
    /// Catalog JSON document
    #[arg(long, default_value = "data/works.json", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the full site from the catalog
    Build,
    /// Load and summarize the catalog without writing output
    Check,
    /// Emit only the search payload (assets/works_index.json)
    SearchIndex,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(source_dir(&cli.source))?;
            init_thread_pool(&config.processing);

            println!("==> Loading {}", cli.source.display());
            let catalog = catalog::load(&cli.source)?;

            println!("==> Emitting site to {}", cli.output.display());
            let summary = emit::emit_site(&catalog, &Templates, &config, &cli.output)?;
            output::print_emit_output(&summary);
        }
        Command::Check => {
            let catalog = catalog::load(&cli.source)?;
            let indexes = index::build_indexes(&catalog.works);
            output::print_check_output(&catalog, &indexes);
        }
        Command::SearchIndex => {
            let catalog = catalog::load(&cli.source)?;
            let records = emit::emit_search_index(&catalog, &cli.output)?;
            println!(
                "Wrote {records} records to {}",
                cli.output.join("assets/works_index.json").display()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Directory the config file is looked up in: next to the source document.
fn source_dir(source: &Path) -> &Path {
    match source.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Initialize the rayon thread pool for page emission.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
