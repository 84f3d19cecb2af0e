//! `TextMatrix` (spec §4.11): a whitespace-delimited matrix file.
//!
//! Format: a first line `m n`, followed by `m` lines of `n` space-separated
//! doubles. Chosen for human-editable fixtures over a binary format, since
//! the wire format itself is unspecified beyond "deliver m, n, and a
//! contiguous buffer".

use crate::error::IoError;
use crate::traits::{MatrixSink, MatrixSource};
use std::path::{Path, PathBuf};

pub struct TextMatrix {
    path: PathBuf,
}

impl TextMatrix {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MatrixSource for TextMatrix {
    fn load(&self) -> Result<(usize, usize, Vec<f64>), IoError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                IoError::NotFound(self.path.display().to_string())
            } else {
                IoError::Read {
                    path: self.path.display().to_string(),
                    source,
                }
            }
        })?;
        parse_text_matrix(&text)
    }
}

impl MatrixSink for TextMatrix {
    fn save(&self, m: usize, n: usize, data: &[f64]) -> Result<(), IoError> {
        let mut out = String::with_capacity(data.len() * 8 + 16);
        out.push_str(&format!("{m} {n}\n"));
        for row in data.chunks(n) {
            let line = row
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&line);
            out.push('\n');
        }
        std::fs::write(&self.path, out).map_err(|source| IoError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}

fn parse_text_matrix(text: &str) -> Result<(usize, usize, Vec<f64>), IoError> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines.next().ok_or_else(|| IoError::Malformed {
        line: 1,
        reason: "empty file, expected an \"m n\" header line".to_string(),
    })?;

    let mut header_parts = header.split_whitespace();
    let m: usize = header_parts
        .next()
        .ok_or_else(|| IoError::Malformed {
            line: 1,
            reason: "missing row count".to_string(),
        })?
        .parse()
        .map_err(|_| IoError::Malformed {
            line: 1,
            reason: "row count is not a valid integer".to_string(),
        })?;
    let n: usize = header_parts
        .next()
        .ok_or_else(|| IoError::Malformed {
            line: 1,
            reason: "missing column count".to_string(),
        })?
        .parse()
        .map_err(|_| IoError::Malformed {
            line: 1,
            reason: "column count is not a valid integer".to_string(),
        })?;

    let mut data = Vec::with_capacity(m * n);
    for (idx, line) in lines.by_ref().take(m) {
        let lineno = idx + 1;
        for tok in line.split_whitespace() {
            let v: f64 = tok.parse().map_err(|_| IoError::Malformed {
                line: lineno,
                reason: format!("\"{tok}\" is not a valid float"),
            })?;
            data.push(v);
        }
    }

    if data.len() != m * n {
        return Err(IoError::DimensionMismatch {
            expected: m * n,
            found: data.len(),
        });
    }

    Ok((m, n, data))
}
