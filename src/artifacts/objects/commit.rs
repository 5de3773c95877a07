//! Commit object
//!
//! A commit is an immutable snapshot node: message, parent id(s), depth in the
//! graph, timestamp and a complete file table (path -> blob id, not a delta).
//! Its identity is the content hash of its serialized fields, so commits are
//! safely shareable by id and can never be edited in place.
//!
//! ## Format
//!
//! On disk: `commit <size>\0<canonical JSON body>`. The file table is a
//! `BTreeMap`, which keeps the body byte-stable for identical field values.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Timezone used for rendering commit dates (fixed UTC-8)
pub fn render_offset() -> FixedOffset {
    FixedOffset::west_opt(8 * 3600).expect("-08:00 is a valid offset")
}

/// Timestamp of the root commit (Unix epoch)
pub fn epoch_timestamp() -> DateTime<FixedOffset> {
    render_offset()
        .timestamp_opt(0, 0)
        .single()
        .expect("epoch is representable")
}

/// Current commit timestamp
///
/// Honors the `NIT_DATE` environment variable (`%Y-%m-%d %H:%M:%S %z`) so
/// tests can pin the clock; otherwise uses the wall clock.
pub fn timestamp_now() -> DateTime<FixedOffset> {
    std::env::var("NIT_DATE")
        .ok()
        .and_then(|date_str| {
            DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z").ok()
        })
        .unwrap_or_else(|| chrono::Utc::now().with_timezone(&render_offset()))
}

/// Immutable commit node
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit message
    message: String,
    /// First parent id; None only for the root commit
    first_parent: Option<ObjectId>,
    /// Second parent id; present only for merge commits
    second_parent: Option<ObjectId>,
    /// 0 for the root; `parent.depth + 1`, or `max` of both parents + 1 for merges
    depth: u64,
    /// Commit timestamp
    timestamp: DateTime<FixedOffset>,
    /// Complete snapshot: file path -> blob id
    files: BTreeMap<String, ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        first_parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
        depth: u64,
        timestamp: DateTime<FixedOffset>,
        files: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            message,
            first_parent,
            second_parent,
            depth,
            timestamp,
            files,
        }
    }

    /// The root commit every repository starts from
    pub fn root() -> Self {
        Commit::new(
            "initial commit".to_string(),
            None,
            None,
            0,
            epoch_timestamp(),
            BTreeMap::new(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.first_parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    /// Both parent ids, first then second, skipping absent ones
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.first_parent.iter().chain(self.second_parent.iter())
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn depth(&self) -> u64 {
        self.depth
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn files(&self) -> &BTreeMap<String, ObjectId> {
        &self.files
    }

    /// Blob id recorded for `path`, if the commit tracks it
    pub fn file(&self, path: &str) -> Option<&ObjectId> {
        self.files.get(path)
    }

    /// Render the commit for log output
    ///
    /// Merge commits get a `Merge: <first7> <second7>` line; the date is
    /// always formatted in fixed UTC-8.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let (Some(first), Some(second)) = (&self.first_parent, &self.second_parent) {
            out.push_str(&format!(
                "Merge: {} {}\n",
                first.to_short_oid(),
                second.to_short_oid()
            ));
        }

        let local = self.timestamp.with_timezone(&render_offset());
        out.push_str(&format!(
            "Date: {}\n",
            local.format("%a %b %-d %H:%M:%S %Y %z")
        ));
        out.push_str(&self.message);
        out.push('\n');

        out
    }
}

/// Borrowed view of a commit carrying only what graph traversal needs
#[derive(Debug, Clone, Default)]
pub struct SlimCommit<'c> {
    pub parents: Vec<&'c ObjectId>,
    pub depth: u64,
}

impl Commit {
    pub fn slim(&self) -> SlimCommit<'_> {
        SlimCommit {
            parents: self.parents().collect(),
            depth: self.depth,
        }
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = serde_json::to_vec(self).context("Unable to serialize commit body")?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), body.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&body)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let body = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        serde_json::from_slice(&body).context("Invalid commit object: malformed body")
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
