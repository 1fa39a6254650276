// SPDX-License-Identifier: MPL-2.0
use std::process::ExitCode;
use tikdog::api::DogApiClient;
use tikdog::app::{logging, paths};
use tikdog::config::{self, Config};
use tikdog::error::{Error, Result};
use tikdog::grid::{RandomIds, Row, Section, SectionLayout};
use tikdog::media::{ImageLoader, ImageLoaderConfig};
use tikdog::session::{BreedListSession, BreedRow, PhotoSession};

const HELP: &str = "\
tikdog - dog breed photo grid

USAGE:
  tikdog [OPTIONS] breeds
  tikdog [OPTIONS] photos <BREED>

OPTIONS:
  --config-dir <DIR>   Directory holding settings.toml
  --cache-dir <DIR>    Directory for the image disk cache
  --base-url <URL>     Dog API base URL
  --no-images          Only list photo URLs, do not download them
  -h, --help           Print this help
";

enum Command {
    Breeds,
    Photos { breed: String, load_images: bool },
}

struct Args {
    config_dir: Option<String>,
    cache_dir: Option<String>,
    base_url: Option<String>,
    command: Command,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let config_dir = args.opt_value_from_str("--config-dir")?;
    let cache_dir = args.opt_value_from_str("--cache-dir")?;
    let base_url = args.opt_value_from_str("--base-url")?;
    let no_images = args.contains("--no-images");

    let command = match args.subcommand()?.as_deref() {
        Some("breeds") => Command::Breeds,
        Some("photos") => Command::Photos {
            breed: args.free_from_str()?,
            load_images: !no_images,
        },
        _ => return Ok(None),
    };

    Ok(Some(Args {
        config_dir,
        cache_dir,
        base_url,
        command,
    }))
}

async fn print_breeds(client: &DogApiClient) -> Result<()> {
    let mut session = BreedListSession::new();
    session.refresh(client).await;
    if let Some(err) = session.state().error() {
        return Err(Error::Fetch(err.clone()));
    }

    for row in session.rows(&mut RandomIds) {
        if let BreedRow::Item(breed) = row {
            println!("{:<32} {}", breed.identifier, breed.name);
        }
    }
    Ok(())
}

async fn print_photos(
    client: &DogApiClient,
    config: &Config,
    breed: &str,
    load_images: bool,
) -> Result<()> {
    let mut session = PhotoSession::new();
    session.refresh(client, breed).await;
    if let Some(err) = session.state().error() {
        return Err(Error::Fetch(err.clone()));
    }

    if load_images {
        let loader = ImageLoader::new(ImageLoaderConfig::from_config(config))?;
        let attached = session
            .load_images(&loader, loader.max_concurrent())
            .await;
        tracing::info!(attached, stats = ?loader.stats(), "images loaded");
    }

    let mut ids = RandomIds;
    for section in Section::ALL {
        let frames = SectionLayout::for_section(section).tile_frames();
        println!("[{section:?}]");
        for (row, frame) in session.rows(section, &mut ids).into_iter().zip(frames) {
            let Row::Item { index, url, .. } = row else {
                continue;
            };
            let size = session
                .page()
                .and_then(|page| page.get_flat(index))
                .and_then(|photo| photo.image.as_ref())
                .map_or_else(|| "-".to_string(), |img| format!("{}x{}", img.width, img.height));
            println!(
                "  #{index} at ({:.3}, {:.3}) {:.3}x{:.3}  {size:>9}  {url}",
                frame.x, frame.y, frame.width, frame.height
            );
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    paths::init_cli_overrides(args.config_dir, args.cache_dir);

    let (mut config, load_error) = config::load_or_default();
    if args.base_url.is_some() {
        config.base_url = args.base_url;
    }
    logging::init(config.log_filter());
    if let Some(err) = load_error {
        tracing::warn!("using default settings: {err}");
    }

    let client = DogApiClient::from_config(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        match args.command {
            Command::Breeds => print_breeds(&client).await,
            Command::Photos { breed, load_images } => {
                print_photos(&client, &config, &breed, load_images).await
            }
        }
    })
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {e}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
