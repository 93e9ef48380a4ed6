//! JSON input loading for the CLI.
//!
//! A sections file is either a bare array of sections or an object with a
//! `sections` array (the shape the content store exports). A post file holds
//! a single post context object.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::types::{PostContext, Section};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SectionsFile {
    Bare(Vec<Section>),
    Wrapped { sections: Vec<Section> },
}

pub fn parse_sections(json: &str) -> Result<Vec<Section>, InputError> {
    Ok(match serde_json::from_str(json)? {
        SectionsFile::Bare(sections) | SectionsFile::Wrapped { sections } => sections,
    })
}

pub fn load_sections(path: &Path) -> Result<Vec<Section>, InputError> {
    parse_sections(&std::fs::read_to_string(path)?)
}

pub fn load_post(path: &Path) -> Result<PostContext, InputError> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}
