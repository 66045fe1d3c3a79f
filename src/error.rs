use std::fmt::{Display, Formatter, Result};

#[derive(Debug)]
pub enum Error {
  Reqwest(reqwest::Error),
  Xml(quick_xml::Error),
  Json(serde_json::Error),
  Io(std::io::Error),
  Template(indicatif::style::TemplateError),
  MalformedDocument(String),
}

impl std::error::Error for Error {}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Error::Reqwest(e) => std::fmt::Display::fmt(e, f),
      Error::Xml(e) => std::fmt::Display::fmt(e, f),
      Error::Json(e) => std::fmt::Display::fmt(e, f),
      Error::Io(e) => std::fmt::Display::fmt(e, f),
      Error::Template(e) => std::fmt::Display::fmt(e, f),
      Error::MalformedDocument(e) => std::fmt::Display::fmt(e, f),
    }
  }
}

impl From<reqwest::Error> for Error {
  fn from(reqwest_error: reqwest::Error) -> Self {
    Error::Reqwest(reqwest_error)
  }
}

impl From<quick_xml::Error> for Error {
  fn from(xml_error: quick_xml::Error) -> Self {
    Error::Xml(xml_error)
  }
}

impl From<serde_json::Error> for Error {
  fn from(serde_json_error: serde_json::Error) -> Self {
    Error::Json(serde_json_error)
  }
}

impl From<std::io::Error> for Error {
  fn from(io_error: std::io::Error) -> Self {
    Error::Io(io_error)
  }
}

impl From<indicatif::style::TemplateError> for Error {
  fn from(template_error: indicatif::style::TemplateError) -> Self {
    Error::Template(template_error)
  }
}
