// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Multipart/form-data assembly for file uploads
//!
//! Each entry in the files mapping becomes one part: the part name is the
//! mapping key, the filename is the last segment of the local path, the
//! content is the file's full bytes. File handles are scoped to the
//! assembly of one part and never outlive the call. Any per-file failure
//! aborts the whole assembly; the partial buffer is discarded.

use std::path::Path;

use bytes::Bytes;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::media;
use crate::request::Mapping;

/// Finished multipart payload: the encoded body and the matching
/// boundary content-type, which overwrites any caller-set content-type.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Assemble a multipart body from the files mapping.
///
/// Fails fast with [`Error::NoFiles`] when the mapping is empty; a
/// file-upload call with nothing attached is a configuration error, not
/// a silent no-op.
pub async fn assemble(files: &Mapping) -> Result<MultipartBody> {
    if files.is_empty() {
        return Err(Error::NoFiles);
    }

    let boundary = generate_boundary();
    let mut buffer = Vec::new();

    for (name, path) in files.iter() {
        let path = Path::new(path);
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        buffer.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        buffer.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quoted(name),
                escape_quoted(&filename)
            )
            .as_bytes(),
        );
        buffer.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");

        append_file(path, &mut buffer).await?;
        buffer.extend_from_slice(b"\r\n");

        debug!(part = name, file = %path.display(), "assembled multipart part");
    }

    buffer.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    Ok(MultipartBody {
        bytes: Bytes::from(buffer),
        content_type: format!("{}; boundary={}", media::MULTIPART_FORM, boundary),
    })
}

/// Read one file's full contents into the buffer. The handle is dropped
/// on every exit path before the caller moves to the next entry.
async fn append_file(path: &Path, buffer: &mut Vec<u8>) -> Result<()> {
    let mut file = File::open(path)
        .await
        .map_err(|e| Error::file_open(path, e))?;
    file.read_to_end(buffer)
        .await
        .map_err(|e| Error::file_read(path, e))?;
    Ok(())
}

/// Random boundary, new for every assembly
fn generate_boundary() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(30)
        .map(char::from)
        .collect()
}

/// Escape a value for use inside a quoted-string parameter
fn escape_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_empty_files_mapping_fails_fast() {
        let err = assemble(&Mapping::new()).await.unwrap_err();
        assert!(matches!(err, Error::NoFiles));
    }

    #[tokio::test]
    async fn test_single_file_part() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file contents here").unwrap();

        let mut files = Mapping::new();
        files.set("a", file.path().to_str().unwrap());

        let form = assemble(&files).await.unwrap();
        let body = std::str::from_utf8(&form.bytes).unwrap();
        let filename = file.path().file_name().unwrap().to_str().unwrap();

        assert!(form
            .content_type
            .starts_with("multipart/form-data; boundary="));
        assert!(body.contains("Content-Disposition: form-data; name=\"a\""));
        assert!(body.contains(&format!("filename=\"{}\"", filename)));
        assert!(body.contains("file contents here"));

        // Body is framed by the boundary from the content-type
        let boundary = form.content_type.split("boundary=").nth(1).unwrap();
        assert!(body.starts_with(&format!("--{}\r\n", boundary)));
        assert!(body.ends_with(&format!("--{}--\r\n", boundary)));
    }

    #[tokio::test]
    async fn test_every_mapping_entry_becomes_a_part() {
        let mut first = tempfile::NamedTempFile::new().unwrap();
        first.write_all(b"first").unwrap();
        let mut second = tempfile::NamedTempFile::new().unwrap();
        second.write_all(b"second").unwrap();

        let mut files = Mapping::new();
        files.set("a", first.path().to_str().unwrap());
        files.set("b", second.path().to_str().unwrap());

        let form = assemble(&files).await.unwrap();
        let body = std::str::from_utf8(&form.bytes).unwrap();

        assert!(body.contains("name=\"a\""));
        assert!(body.contains("name=\"b\""));
        assert!(body.contains("first"));
        assert!(body.contains("second"));
    }

    #[tokio::test]
    async fn test_unopenable_file_aborts_assembly() {
        let mut files = Mapping::new();
        files.set("a", "/nonexistent/path/to/file.bin");

        let err = assemble(&files).await.unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }));
    }

    #[tokio::test]
    async fn test_unreadable_file_aborts_assembly() {
        // A directory opens fine but fails on read
        let dir = tempfile::tempdir().unwrap();

        let mut files = Mapping::new();
        files.set("a", dir.path().to_str().unwrap());

        let err = assemble(&files).await.unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_boundary_is_fresh_per_call() {
        assert_ne!(generate_boundary(), generate_boundary());
        assert_eq!(generate_boundary().len(), 30);
    }

    #[test]
    fn test_escape_quoted() {
        assert_eq!(escape_quoted(r#"a"b\c"#), r#"a\"b\\c"#);
    }
}
