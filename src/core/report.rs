//! Tabular renderings of a directory for people and spreadsheets.
//!
//! Unlike the interchange lines, reports are sorted by code.

use crate::domain::directory::Directory;
use crate::domain::model::Post;
use crate::utils::error::{InventoryError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PostRow<'a> {
    code: &'a str,
    machine_id: &'a str,
    first_name: &'a str,
    surname: &'a str,
}

#[derive(Debug, Serialize)]
struct RoomReport<'a> {
    prefix: &'a str,
    count: usize,
    posts: Vec<PostRow<'a>>,
}

fn sorted_rows(directory: &Directory) -> Vec<PostRow<'_>> {
    let mut entries: Vec<(&str, &Post)> = directory.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(code, post)| PostRow {
            code,
            machine_id: &post.machine_id,
            first_name: &post.first_name,
            surname: &post.surname,
        })
        .collect()
}

/// Display lines sorted by code.
pub fn sorted_display_lines(directory: &Directory) -> Vec<String> {
    let mut lines = directory.to_display_lines();
    lines.sort();
    lines
}

pub fn render_csv(directory: &Directory) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in sorted_rows(directory) {
        writer.serialize(row)?;
    }
    if directory.is_empty() {
        writer.write_record(["code", "machine_id", "first_name", "surname"])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| InventoryError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        InventoryError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

pub fn render_json(directory: &Directory) -> Result<String> {
    let report = RoomReport {
        prefix: directory.prefix(),
        count: directory.count(),
        posts: sorted_rows(directory),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
