//! CSV collaborator helpers
//!
//! Thin convenience layer for tabular resources. These functions never reach
//! into a storage backend directly: everything flows through the resolver's
//! handle-retrieval and save contract, the same seam any higher-level format
//! library would use.

use std::io::{self, Seek, SeekFrom};

use csv::StringRecord;

use crate::error::{Error, Result};
use crate::resolver::ResourceResolver;

/// Read every data record of a CSV resource.
///
/// The first row is treated as headers and is not included in the result.
pub fn read_csv_records(
    resolver: &mut ResourceResolver,
    key: &str,
) -> Result<Vec<StringRecord>> {
    tracing::debug!("getting file handle for resource '{}'", key);
    let handle = resolver.handle(key)?;

    let mut reader = csv::Reader::from_reader(handle);
    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }

    tracing::debug!("read {} records from resource '{}'", records.len(), key);
    Ok(records)
}

/// Read the header row of a CSV resource.
pub fn read_csv_headers(
    resolver: &mut ResourceResolver,
    key: &str,
) -> Result<StringRecord> {
    let handle = resolver.handle(key)?;
    let mut reader = csv::Reader::from_reader(handle);
    Ok(reader.headers()?.clone())
}

/// Rewrite a CSV resource in place from headers and rows.
pub fn save_csv_records<R, F>(
    resolver: &mut ResourceResolver,
    key: &str,
    headers: &[&str],
    rows: &[R],
) -> Result<()>
where
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.as_ref().iter().map(|field| field.as_ref()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    tracing::debug!("writing {} bytes to resource '{}'", content.len(), key);
    resolver.save(key, content)
}

/// Append data rows (no headers) to a CSV resource.
///
/// Returns the number of bytes written after the resource's prior end of
/// stream.
pub fn append_csv_records<R, F>(
    resolver: &mut ResourceResolver,
    key: &str,
    rows: &[R],
) -> Result<u64>
where
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    tracing::debug!("getting file handle for resource '{}'", key);
    let handle = resolver.handle(key)?;
    let start = handle.seek(SeekFrom::End(0))?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut *handle);
        for row in rows {
            writer.write_record(row.as_ref().iter().map(|field| field.as_ref()))?;
        }
        writer.flush()?;
    }

    let written = handle.stream_position()?.saturating_sub(start);
    tracing::debug!("appended {} bytes to resource '{}'", written, key);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with(key: &str, content: &str) -> ResourceResolver {
        let mut resolver = ResourceResolver::new();
        resolver.define(key, None).unwrap();
        resolver.save(key, content).unwrap();
        resolver
    }

    #[test]
    fn test_read_csv_records_skips_headers() {
        let mut resolver = resolver_with("t", "name,age\nada,36\ngrace,45\n");

        let records = read_csv_records(&mut resolver, "t").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "ada");
        assert_eq!(&records[1][1], "45");
    }

    #[test]
    fn test_read_csv_headers() {
        let mut resolver = resolver_with("t", "name,age\nada,36\n");

        let headers = read_csv_headers(&mut resolver, "t").unwrap();
        assert_eq!(&headers[0], "name");
        assert_eq!(&headers[1], "age");
    }

    #[test]
    fn test_save_then_read_round_trips() {
        let mut resolver = ResourceResolver::new();
        resolver.define("t", None).unwrap();

        save_csv_records(
            &mut resolver,
            "t",
            &["name", "age"],
            &[vec!["ada", "36"], vec!["grace", "45"]],
        )
        .unwrap();

        let records = read_csv_records(&mut resolver, "t").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "ada");
    }

    #[test]
    fn test_save_overwrites_previous_table() {
        let mut resolver = resolver_with("t", "name,age\nada,36\n");

        save_csv_records(&mut resolver, "t", &["city"], &[vec!["london"]]).unwrap();

        let records = read_csv_records(&mut resolver, "t").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "london");
    }

    #[test]
    fn test_append_preserves_prior_rows_and_counts_bytes() {
        let mut resolver = resolver_with("t", "name,age\nada,36\n");

        let written =
            append_csv_records(&mut resolver, "t", &[vec!["grace", "45"]]).unwrap();
        assert!(written > 0);

        let records = read_csv_records(&mut resolver, "t").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "ada");
        assert_eq!(&records[1][0], "grace");
    }

    #[test]
    fn test_helpers_surface_undefined_resource() {
        let mut resolver = ResourceResolver::new();
        let err = read_csv_records(&mut resolver, "missing").unwrap_err();
        assert!(matches!(err, Error::UndefinedResource(_)));
    }
}
