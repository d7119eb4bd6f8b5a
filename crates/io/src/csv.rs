// CSV grid import

use std::io::Read;
use std::path::Path;

use opsgrid_engine::Grid;

use crate::source::SourceError;

/// Parse CSV text into a grid, keeping every cell as text. Rows stay
/// unpadded; the grid's accessors handle ragged extents.
pub fn grid_from_str(content: &str, delimiter: u8) -> Result<Grid, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SourceError::Csv(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Grid::from_rows(rows))
}

/// Read a file as UTF-8, falling back to Windows-1252 when the bytes
/// don't decode (the usual case for Excel-exported CSVs with accented
/// operator names).
pub fn read_to_utf8(path: &Path) -> Result<String, SourceError> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| SourceError::Io(format!("{}: {e}", path.display())))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| SourceError::Io(format!("{}: {e}", path.display())))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Pick the most likely field delimiter by scoring candidates against
/// the first lines of the content.
///
/// For each of tab, semicolon, comma and pipe: parse up to ten lines,
/// count fields per line, and score the candidate by how many lines
/// agree with the first line's count, weighted by that count. Weighting
/// by width matters for the semicolon exports this tool mostly sees:
/// a decimal-comma sheet splits into nonsense on `,` but consistently
/// on `;`.
pub fn sniff_delimiter(content: &str) -> u8 {
    const CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];

    let sample: Vec<&str> = content.lines().take(10).collect();
    if sample.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;
    for delim in CANDIDATES {
        let widths: Vec<usize> = sample.iter().map(|line| field_count(line, delim)).collect();
        let first = widths[0];
        // A viable delimiter must actually split the first line.
        if first <= 1 {
            continue;
        }
        let agreeing = widths.iter().filter(|&&w| w == first).count() as u64;
        let score = agreeing * first as u64;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }
    best
}

/// Fields in one line under a candidate delimiter, quote-aware.
fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.len())
        .unwrap_or(1)
}
