use crate::records::{NamedBlob, Rowable};
use std::error::Error;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Encode records as CSV bytes
///
/// The header row comes from the first record's keys; empty input yields
/// empty bytes. Values containing delimiters or newlines are quoted by the
/// encoder.
pub fn to_csv<R: Rowable>(records: &[R]) -> Vec<u8> {
    if records.is_empty() {
        return Vec::new();
    }

    match try_to_csv(records) {
        Ok(bytes) => bytes,
        Err(e) => {
            ::log::warn!("CSV encoding failed: {}", e);
            Vec::new()
        }
    }
}

fn try_to_csv<R: Rowable>(records: &[R]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(records[0].keys())?;
    for record in records {
        writer.write_record(record.values())?;
    }

    Ok(writer.into_inner()?)
}

/// Encode records as a single-sheet spreadsheet
///
/// Empty input yields empty bytes. Any encoder failure falls back to CSV
/// bytes rather than surfacing an error.
pub fn to_xlsx<R: Rowable>(records: &[R]) -> Vec<u8> {
    if records.is_empty() {
        return Vec::new();
    }

    match try_to_xlsx(records) {
        Ok(bytes) => bytes,
        Err(e) => {
            ::log::warn!("spreadsheet encoding failed, falling back to CSV: {}", e);
            to_csv(records)
        }
    }
}

fn try_to_xlsx<R: Rowable>(records: &[R]) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, key) in records[0].keys().into_iter().enumerate() {
        worksheet.write_string(0, col as u16, key)?;
    }
    for (row, record) in records.iter().enumerate() {
        for (col, value) in record.values().into_iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, value)?;
        }
    }

    workbook.save_to_buffer()
}

/// Pack named blobs into a deflate-compressed archive
///
/// Entry names are taken from the blobs as supplied; uniqueness is the
/// caller's responsibility.
pub fn to_zip(blobs: &[NamedBlob]) -> Vec<u8> {
    match try_to_zip(blobs) {
        Ok(bytes) => bytes,
        Err(e) => {
            ::log::warn!("archive encoding failed: {}", e);
            Vec::new()
        }
    }
}

fn try_to_zip(blobs: &[NamedBlob]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for blob in blobs {
        zip.start_file(blob.filename.clone(), options)?;
        zip.write_all(&blob.data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ElementRecord, ImageRecord};
    use std::collections::BTreeMap;
    use std::io::Read;

    fn sample_elements() -> Vec<ElementRecord> {
        let mut attrs = BTreeMap::new();
        attrs.insert("class".to_string(), "intro".to_string());

        vec![
            ElementRecord {
                text: "Plain text".to_string(),
                html: "<p class=\"intro\">Plain text</p>".to_string(),
                attrs,
            },
            ElementRecord {
                // Commas, quotes, and newlines must survive the round trip
                text: "Comma, \"quoted\"\nand newline".to_string(),
                html: "<p>Comma</p>".to_string(),
                attrs: BTreeMap::new(),
            },
        ]
    }

    #[test]
    fn test_empty_input_yields_empty_bytes() {
        let none: Vec<ElementRecord> = Vec::new();
        assert!(to_csv(&none).is_empty());
        assert!(to_xlsx(&none).is_empty());
    }

    #[test]
    fn test_csv_round_trip() {
        let records = sample_elements();
        let bytes = to_csv(&records);

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(headers, vec!["text", "html", "attrs"]);

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|row| row.unwrap().iter().map(|cell| cell.to_string()).collect())
            .collect();
        assert_eq!(rows.len(), records.len());
        for (row, record) in rows.iter().zip(&records) {
            assert_eq!(*row, record.values());
        }
    }

    #[test]
    fn test_image_record_header_covers_every_field() {
        let record = ImageRecord {
            index: 1,
            image_url: "https://x.test/pic.png".to_string(),
            filename: "pic.png".to_string(),
            alt: String::new(),
            title: String::new(),
            caption: String::new(),
            parent_text: String::new(),
            prev_sibling_text: String::new(),
            next_sibling_text: String::new(),
            container_text: String::new(),
            ocr_text: String::new(),
        };

        let bytes = to_csv(&[record]);
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        assert_eq!(reader.headers().unwrap().len(), 11);
        // Absent data is an empty cell, never a missing column
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.len(), 11);
    }

    #[test]
    fn test_xlsx_output_is_a_zip_container() {
        let bytes = to_xlsx(&sample_elements());
        // XLSX files are zip archives, so the magic is PK
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_zip_round_trip() {
        let blobs = vec![
            NamedBlob {
                filename: "a.png".to_string(),
                data: vec![1, 2, 3],
            },
            NamedBlob {
                filename: "b.jpg".to_string(),
                data: b"jpeg bytes".to_vec(),
            },
        ];

        let bytes = to_zip(&blobs);
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        for blob in &blobs {
            let mut entry = archive.by_name(&blob.filename).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            assert_eq!(data, blob.data);
        }
    }

    #[test]
    fn test_zip_of_nothing_is_still_an_archive() {
        let bytes = to_zip(&[]);
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
