use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::errors::Result;

pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Output sink returned by [`get_dynamic_writer`].
///
/// Call [`DynamicWriter::finish`] once writing is done. A gzip stream
/// dropped without it gets its trailer written on drop, with any error
/// discarded.
pub enum DynamicWriter {
    Plain(BufWriter<File>),
    Gz(GzEncoder<BufWriter<File>>),
}

impl Write for DynamicWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            DynamicWriter::Plain(w) => w.write(buf),
            DynamicWriter::Gz(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            DynamicWriter::Plain(w) => w.flush(),
            DynamicWriter::Gz(w) => w.flush(),
        }
    }
}

impl DynamicWriter {
    ///
    /// Flush everything to disk, writing the gzip trailer when compressing.
    ///
    pub fn finish(self) -> Result<()> {
        match self {
            DynamicWriter::Plain(mut w) => w.flush()?,
            DynamicWriter::Gz(encoder) => {
                let mut inner = encoder.finish()?;
                inner.flush()?;
            }
        }
        Ok(())
    }
}

///
/// Get a writer that gzips its output when the path ends in `.gz`.
/// Parent directories are created as needed.
///
/// # Arguments
///
/// - path: path to the file to write
///
pub fn get_dynamic_writer(path: &Path) -> Result<DynamicWriter> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = BufWriter::new(File::create(path)?);
    let writer = match is_gzipped(path) {
        true => DynamicWriter::Gz(GzEncoder::new(file, Compression::best())),
        false => DynamicWriter::Plain(file),
    };

    Ok(writer)
}
