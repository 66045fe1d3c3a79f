//! Reads KML map exports and downloads the image each placemark links to.
//!
//! The pipeline is [`locator`] → [`kml`] → [`extract`] → [`fetch`], driven file by file
//! and record by record by [`service::KmlPhotoService`].

pub mod error;
pub mod extract;
pub mod fetch;
pub mod kml;
pub mod locator;
pub mod logging;
pub mod progress;
pub mod service;
