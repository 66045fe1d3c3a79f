use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Error;
use crate::extract::{placemarks, Placemark};
use crate::fetch::{FetchOutcome, ImageFetcher};
use crate::kml;
use crate::locator::find_kml_files;

#[derive(Debug, Clone)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Print records as JSON lines instead of downloading.
    pub list_only: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub records: usize,
    pub downloaded: usize,
    pub skipped: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s), {} record(s), {} downloaded, {} skipped",
            self.files, self.records, self.downloaded, self.skipped
        )
    }
}

pub struct KmlPhotoService<F> {
    pub fetcher: F,
    pub settings: Settings,
}

impl<F: ImageFetcher + Sync> KmlPhotoService<F> {
    /// Processes every KML file in the input directory, one after the other.
    pub async fn run(&self) -> Result<Summary, Error> {
        let files = find_kml_files(&self.settings.input_dir)?;
        info!(count = files.len(), dir = %self.settings.input_dir.display(), "found KML files");

        let mut summary = Summary::default();
        for file in files {
            self.process_file(&file, &mut summary).await?;
        }
        Ok(summary)
    }

    async fn process_file(&self, file: &Path, summary: &mut Summary) -> Result<(), Error> {
        println!("Processing: {}", file.display());
        let root = kml::parse_file(file)?;
        summary.files += 1;

        for placemark in placemarks(&root) {
            summary.records += 1;

            if self.settings.list_only {
                println!("{}", placemark.to_json_line()?);
                continue;
            }

            println!("{}", placemark.name);
            match self.fetch(&placemark).await? {
                FetchOutcome::Downloaded(_) => summary.downloaded += 1,
                FetchOutcome::Skipped(_) => summary.skipped += 1,
            }
        }

        debug!(file = %file.display(), "done");
        Ok(())
    }

    async fn fetch(&self, placemark: &Placemark) -> Result<FetchOutcome, Error> {
        self.fetcher
            .fetch_image(&placemark.image_url, &placemark.name, &self.settings.output_dir)
            .await
    }
}
