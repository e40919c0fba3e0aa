//! Validated in-memory inventory of the posts of one room.
//!
//! Every code in a [`Directory`] starts with the room prefix. Codes are stored
//! trimmed and upper-cased; post fields are stored trimmed. The mapping is a
//! hash map, so every export below comes out in unspecified order.

use crate::domain::model::Post;
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::{normalize_text, validate_char_length};
use std::collections::HashMap;
use std::fmt;

/// Field separator of the interchange format.
pub const FIELD_SEPARATOR: &str = "##";

pub const MIN_PREFIX_LEN: usize = 2;
pub const MAX_PREFIX_LEN: usize = 4;

const INTERCHANGE_FIELDS: usize = 4;

/// Case mapping applied to prefixes and codes.
///
/// Unicode default upper-casing: independent of the process locale.
pub fn fold_case(text: &str) -> String {
    text.to_uppercase()
}

/// Line template shared by the two exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineFormat {
    Display,
    Interchange,
}

impl LineFormat {
    fn render(self, code: &str, post: &Post) -> String {
        match self {
            Self::Display => format!(
                "{} – {} ({} {})",
                code, post.machine_id, post.first_name, post.surname
            ),
            Self::Interchange => [
                code,
                post.machine_id.as_str(),
                post.first_name.as_str(),
                post.surname.as_str(),
            ]
            .join(FIELD_SEPARATOR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    prefix: String,
    posts: HashMap<String, Post>,
}

impl Directory {
    /// Creates an empty directory for `prefix`.
    ///
    /// The prefix is trimmed and upper-cased; its trimmed length must be
    /// within `[2, 4]` characters.
    pub fn create(prefix: &str) -> Result<Self> {
        let prefix = normalize_prefix(prefix)?;
        Ok(Self {
            prefix,
            posts: HashMap::new(),
        })
    }

    /// Rebuilds a directory from interchange lines.
    ///
    /// Line 0 is the prefix and is the only fatal check. Each following line
    /// must hold exactly four `##`-separated fields; lines that don't, or whose
    /// fields are rejected by [`Directory::add`], are skipped.
    pub fn create_from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let (first, records) = lines
            .split_first()
            .ok_or_else(|| InventoryError::validation("Prefix required on the first line"))?;

        let mut directory = Self::create(first.as_ref())?;

        for (index, line) in records.iter().enumerate() {
            let line = line.as_ref();
            let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            // Trailing separators carry no field.
            while fields.last().is_some_and(|field| field.is_empty()) {
                fields.pop();
            }
            if fields.len() != INTERCHANGE_FIELDS {
                tracing::debug!(
                    "Skipping line {}: expected {} fields, found {}",
                    index + 1,
                    INTERCHANGE_FIELDS,
                    fields.len()
                );
                continue;
            }

            let post = Post::new(fields[1], fields[2], fields[3]);
            if let Err(e) = directory.add(fields[0], post) {
                tracing::debug!("Skipping line {}: {}", index + 1, e);
            }
        }

        Ok(directory)
    }

    /// Inserts `post` under `code`.
    ///
    /// The code is trimmed and upper-cased and must start with the prefix.
    /// Duplicates are rejected, never overwritten.
    pub fn add(&mut self, code: &str, post: Post) -> Result<()> {
        let code = fold_case(&normalize_text(code, "Post code required")?);

        if !code.starts_with(&self.prefix) {
            return Err(InventoryError::validation(format!(
                "Post code '{}' does not belong to this directory '{}'",
                code, self.prefix
            )));
        }

        if self.posts.contains_key(&code) {
            return Err(InventoryError::validation(format!(
                "Duplicate code '{}'",
                code
            )));
        }

        let first_name = normalize_text(&post.first_name, "User first name required")?;
        let surname = normalize_text(&post.surname, "User surname required")?;
        let machine_id = normalize_text(&post.machine_id, "Machine identifier required")?;

        self.posts
            .insert(code, Post::new(machine_id, first_name, surname));
        Ok(())
    }

    /// Exact-key lookup; `code` is not normalized.
    pub fn get(&self, code: &str) -> Option<&Post> {
        self.posts.get(code)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn count(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Read-only view of the stored codes.
    pub fn codes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.posts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Post)> + '_ {
        self.posts.iter().map(|(code, post)| (code.as_str(), post))
    }

    /// One `CODE – MACHINE (FIRST SURNAME)` line per post.
    pub fn to_display_lines(&self) -> Vec<String> {
        self.render_lines(LineFormat::Display)
    }

    /// Prefix line followed by one `CODE##MACHINE##FIRST##SURNAME` line per post.
    ///
    /// Input accepted by [`Directory::create_from_lines`].
    pub fn to_interchange_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.posts.len() + 1);
        lines.push(self.prefix.clone());
        lines.extend(self.render_lines(LineFormat::Interchange));
        lines
    }

    fn render_lines(&self, format: LineFormat) -> Vec<String> {
        self.posts
            .iter()
            .map(|(code, post)| format.render(code, post))
            .collect()
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}* – {} posts", self.prefix, self.count())
    }
}

fn normalize_prefix(prefix: &str) -> Result<String> {
    let trimmed = prefix.trim();
    validate_char_length(
        trimmed,
        MIN_PREFIX_LEN,
        MAX_PREFIX_LEN,
        "Prefix length must be within [2, 4]",
    )?;
    Ok(fold_case(trimmed))
}
