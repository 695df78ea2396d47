use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use chromcompare_core::models::{ColumnGroup, Track};
use chromcompare_io::TrackWrite;

///
/// Write `track` to `output`, or to stdout when no output path is given.
///
pub fn emit_track<K: ColumnGroup, V: ColumnGroup>(track: &Track<K, V>, output: Option<&String>) -> Result<()> {
    match output {
        Some(path) => track
            .write_tsv(Path::new(path))
            .with_context(|| format!("Failed to write {}", path)),
        None => {
            let mut stdout = io::stdout().lock();
            for row in track.rows() {
                writeln!(stdout, "{}", row)?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}
