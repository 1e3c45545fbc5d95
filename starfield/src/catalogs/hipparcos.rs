//! Reader for the Hipparcos main catalog (`hip_main.dat`).
//!
//! Each record is one line of `|`-separated fields. Only four are used:
//!
//! | index | field  | meaning                      |
//! |-------|--------|------------------------------|
//! | 1     | HIP    | Hipparcos number             |
//! | 5     | Vmag   | Johnson V magnitude          |
//! | 8     | RAdeg  | right ascension, ICRS, J1991.25 |
//! | 9     | DEdeg  | declination, ICRS, J1991.25  |
//!
//! A few hundred entries have no astrometric solution, leaving RAdeg/DEdeg
//! blank; those and rows without a magnitude are skipped and counted.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use log::{debug, info};

use super::StarRecord;
use crate::error::CatalogError;

const FIELD_HIP: usize = 1;
const FIELD_VMAG: usize = 5;
const FIELD_RA: usize = 8;
const FIELD_DEC: usize = 9;

/// Result of parsing a Hipparcos file
#[derive(Debug, Clone, Default)]
pub struct HipparcosParse {
    /// Stars brighter than the magnitude limit
    pub stars: Vec<StarRecord>,
    /// Rows without a position or magnitude
    pub skipped: usize,
    /// Rows dropped by the magnitude limit
    pub too_faint: usize,
}

fn optional_f64(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parse Hipparcos records, keeping stars with `magnitude < magnitude_limit`.
///
/// A row that is structurally broken (too few fields or a non-numeric HIP
/// number) aborts the parse with its 1-based line number.
pub fn parse_hipparcos<R: BufRead>(
    reader: R,
    magnitude_limit: f64,
) -> Result<HipparcosParse, CatalogError> {
    let mut result = HipparcosParse::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() <= FIELD_DEC {
            return Err(CatalogError::Parse {
                line: line_no,
                message: format!("expected at least {} fields, found {}", FIELD_DEC + 1, fields.len()),
            });
        }

        let id = fields[FIELD_HIP]
            .trim()
            .parse::<usize>()
            .map_err(|e| CatalogError::Parse {
                line: line_no,
                message: format!("bad HIP number '{}': {}", fields[FIELD_HIP].trim(), e),
            })?;

        let (Some(magnitude), Some(ra), Some(dec)) = (
            optional_f64(fields[FIELD_VMAG]),
            optional_f64(fields[FIELD_RA]),
            optional_f64(fields[FIELD_DEC]),
        ) else {
            result.skipped += 1;
            continue;
        };

        if magnitude >= magnitude_limit {
            result.too_faint += 1;
            continue;
        }

        result.stars.push(StarRecord::new(id, ra, dec, magnitude)?);
    }

    debug!(
        "Hipparcos parse: kept {}, skipped {}, fainter than {}: {}",
        result.stars.len(),
        result.skipped,
        magnitude_limit,
        result.too_faint
    );
    Ok(result)
}

/// Read a Hipparcos file from disk, gunzipping it if the name ends in `.gz`.
pub fn read_hipparcos_file<P: AsRef<Path>>(
    path: P,
    magnitude_limit: f64,
) -> Result<HipparcosParse, CatalogError> {
    let path = path.as_ref();
    info!("Reading Hipparcos catalog from {}", path.display());

    let file = File::open(path)?;
    let is_gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");

    let reader: Box<dyn BufRead> = if is_gzipped {
        debug!("Detected gzipped catalog, decompressing");
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    parse_hipparcos(reader, magnitude_limit)
}
