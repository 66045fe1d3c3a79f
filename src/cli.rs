use std::path::PathBuf;

use clap::Parser;

/// Downloading the photos attached to the placemarks of KML map exports (e.g. from Google My
/// Maps). Every `.kml` file in the input directory is read and each placemark with a name and
/// an image link under `ExtendedData` gets its image saved as `{name}.{extension}`.
#[derive(Parser)]
#[clap(version)]
pub(crate) struct Cli {
  /// Directory that is scanned for `.kml` files (no recursion). Defaults to the directory
  /// the executable lives in.
  #[clap(long, short, env = "KML_PHOTOS_INPUT_DIR")]
  pub(crate) input_dir: Option<PathBuf>,
  /// Directory the images are written to. It is created if missing. Images that already
  /// exist there are not downloaded again.
  #[clap(long, short, env = "KML_PHOTOS_OUTPUT_DIR", default_value = "photos")]
  pub(crate) output_dir: PathBuf,
  /// Only print the extracted placemarks as JSON lines, download nothing.
  #[clap(long, short, env = "KML_PHOTOS_LIST")]
  pub(crate) list: bool,
}
