//! The `promptfixer parse` command.

use std::path::PathBuf;

use anyhow::Result;

use promptfixer_core::parse_feedback;

use super::{read_file, read_stdin, OutputFormat};
use crate::render;

pub fn execute(file: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let feedback = match file {
        Some(path) => read_file(&path)?,
        None => read_stdin()?,
    };

    let scoring = parse_feedback(&feedback);
    render::print_scoring(&scoring, format)
}
