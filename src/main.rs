use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use vps_embed::carousel::{CarouselParameters, DEFAULT_SPEED_MS, build_carousel_tag};
use vps_embed::placeholder::convert_tags_to_placeholders_with;
use vps_embed::{EmbedKind, EmbedReference, build_embed_tag, check, config, output};
use vps_embed::{convert_placeholders_to_tags, parse_embeds};

#[derive(Parser)]
#[command(name = "vps-embed")]
#[command(about = "Parse, build and convert CMS embed tags")]
#[command(long_about = "\
Parse, build and convert CMS embed tags

Page bodies reference galleries, images, hero banners, collapsible page lists
and carousels with HTML comment tags:

  <!--vps:embed:gallery:5-->
  <!--vps:embed:carousel:7:true:false:600-->
                         │  │    │     └ speed (ms)
                         │  │    └ dot duration override
                         │  └ autoplay
                         └ target id

Commands that take a FILE read stdin when FILE is '-'.

Run 'vps-embed gen-config' to generate a documented vps-embed.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = "vps-embed.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a page body into text and embed segments
    Parse {
        file: PathBuf,
        /// Print segments as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical tag for a reference
    Build {
        kind: String,
        id: u64,
        /// Raw trailing payload (kept for carousels only)
        #[arg(long)]
        extra: Option<String>,
    },
    /// Print a carousel tag
    Carousel {
        id: u64,
        #[arg(long)]
        autoplay: bool,
        #[arg(long)]
        dot_duration: bool,
        /// Slide speed in milliseconds
        #[arg(long, default_value_t = DEFAULT_SPEED_MS)]
        speed: u64,
    },
    /// Replace tags with editor placeholders
    ToPlaceholders { file: PathBuf },
    /// Replace editor placeholders with tags
    ToTags { file: PathBuf },
    /// Audit a page body file or directory for unknown kinds and malformed tags
    Check { path: PathBuf },
    /// Print a stock vps-embed.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { file, json } => {
            let document = read_input(&file)?;
            let segments = parse_embeds(&document);
            if json {
                println!("{}", serde_json::to_string_pretty(&segments)?);
            } else {
                output::print_segments(&segments);
            }
        }
        Command::Build { kind, id, extra } => {
            let reference = EmbedReference {
                kind: EmbedKind::from(kind.as_str()),
                target_id: id,
                extra,
            };
            println!("{}", build_embed_tag(&reference));
        }
        Command::Carousel {
            id,
            autoplay,
            dot_duration,
            speed,
        } => {
            let params = CarouselParameters {
                autoplay,
                dot_duration,
                speed,
            };
            println!("{}", build_carousel_tag(id, &params));
        }
        Command::ToPlaceholders { file } => {
            let config = config::load_config(&cli.config)?;
            let document = read_input(&file)?;
            print!(
                "{}",
                convert_tags_to_placeholders_with(&document, &config.placeholder)
            );
        }
        Command::ToTags { file } => {
            let document = read_input(&file)?;
            print!("{}", convert_placeholders_to_tags(&document));
        }
        Command::Check { path } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            println!("==> Checking {}", path.display());
            let report = check::check_path(&path, &config.check)?;
            output::print_check_report(&report);
            if !report.is_clean() {
                return Err(format!("{} problem(s) found", report.problem_count()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Never exceeds the number of available CPU cores; the config can only lower it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Read a whole document from `path`, or stdin for `-`.
fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut document = String::new();
        std::io::stdin().read_to_string(&mut document)?;
        Ok(document)
    } else {
        std::fs::read_to_string(path)
    }
}
