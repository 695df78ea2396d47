use std::io::Write;
use std::path::Path;

use log::debug;

use chromcompare_core::models::{ColumnGroup, Track};
use chromcompare_core::utils::get_dynamic_writer;

use crate::error::Result;

pub trait TrackWrite {
    ///
    /// Write the track to disk as tab separated text, one row per line and
    /// no header. Paths ending in `.gz` are gzip compressed.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_tsv<T: AsRef<Path>>(&self, path: T) -> Result<()>;
}

impl<K: ColumnGroup, V: ColumnGroup> TrackWrite for Track<K, V> {
    fn write_tsv<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let path = path.as_ref();
        let mut writer = get_dynamic_writer(path)?;

        for row in self.rows() {
            writeln!(writer, "{}", row)?;
        }
        writer.finish()?;

        debug!("Wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chromcompare_core::models::PositionTrack;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::read::read_bedbase;

    #[fixture]
    fn track() -> PositionTrack {
        PositionTrack::new(
            vec!["chr1".to_string(); 3],
            vec![4, 5, 6],
            vec![0.0, 1.0, 2.0],
        )
        .unwrap()
    }

    #[rstest]
    fn test_write_tsv(track: PositionTrack) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("labels.bedbase");

        track.write_tsv(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "chr1\t4\t0\nchr1\t5\t1\nchr1\t6\t2\n");
    }

    #[rstest]
    fn test_write_tsv_gz(track: PositionTrack) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("nested/labels.bedbase.gz");

        assert!(track.write_tsv(&path).is_ok());

        let reread = read_bedbase(&path).unwrap();
        assert_eq!(reread.base(), track.base());
        assert_eq!(reread.score(), track.score());
    }

    #[rstest]
    fn test_write_tsv_gz_has_trailer(track: PositionTrack) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("labels.bedbase.gz");

        track.write_tsv(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let isize = u32::from_le_bytes(bytes[bytes.len() - 4..].try_into().unwrap());
        assert_eq!(isize as usize, "chr1\t4\t0\nchr1\t5\t1\nchr1\t6\t2\n".len());
    }
}
