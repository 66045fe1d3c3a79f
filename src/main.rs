mod cli;

use std::env;
use std::path::PathBuf;

use clap::Parser;
use reqwest::Client;

use cli::Cli;
use kml_photos::error::Error;
use kml_photos::fetch::HttpImageFetcher;
use kml_photos::logging;
use kml_photos::service::{KmlPhotoService, Settings};

#[tokio::main]
async fn main() -> Result<(), Error> {
  logging::init_logging();

  let Cli {
    input_dir,
    output_dir,
    list,
  } = Cli::parse();

  let input_dir = match input_dir {
    Some(dir) => dir,
    None => executable_dir()?,
  };

  let service = KmlPhotoService {
    fetcher: HttpImageFetcher { client: Client::new() },
    settings: Settings {
      input_dir,
      output_dir,
      list_only: list,
    },
  };

  service
    .run()
    .await
    .map(|summary| println!("Done: {summary}"))
}

fn executable_dir() -> Result<PathBuf, Error> {
  let exe = env::current_exe()?.canonicalize()?;
  Ok(exe.parent().map(PathBuf::from).unwrap_or_default())
}
