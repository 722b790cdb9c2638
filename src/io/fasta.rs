use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::SynkmerError;

/// One parsed FASTA record.
pub struct FastaRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

/// Open a FASTA file for reading, handles gzipped files automatically.
pub fn open_fasta(path: &str) -> Result<Box<dyn BufRead>, SynkmerError> {
    let file = File::open(path)?;
    if path.ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads every record of a (possibly gzipped) FASTA file.
pub fn read_fasta(path: &str) -> Result<Vec<FastaRecord>, SynkmerError> {
    let reader = fasta::Reader::new(open_fasta(path)?);
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(FastaRecord {
            id: record.id().to_string(),
            seq: record.seq().to_vec(),
        });
    }
    Ok(records)
}

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

impl FastaWriter {
    /// Creates a FASTA writer, gzip-compressing when the path ends in `.gz`.
    pub fn new(path: &str) -> Result<Self, SynkmerError> {
        let file = File::create(path)?;
        if path.ends_with(".gz") {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(FastaWriter::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(FastaWriter::Plain(BufWriter::new(file)))
        }
    }

    pub fn write_record(&mut self, header: &str, sequence: &[u8]) -> Result<(), SynkmerError> {
        match self {
            FastaWriter::Plain(writer) => {
                writeln!(writer, ">{}", header)?;
                writer.write_all(sequence)?;
                writeln!(writer)?;
            }
            FastaWriter::Compressed(writer) => {
                writeln!(writer, ">{}", header)?;
                writer.write_all(sequence)?;
                writeln!(writer)?;
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_fasta_records() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">chrI some description").unwrap();
        writeln!(file, "ACGTACGT").unwrap();
        writeln!(file, "TTGCA").unwrap();
        writeln!(file, ">chrII").unwrap();
        writeln!(file, "GGGG").unwrap();

        let records = read_fasta(file.path().to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "chrI");
        assert_eq!(records[0].seq, b"ACGTACGTTTGCA".to_vec());
        assert_eq!(records[1].id, "chrII");
        assert_eq!(records[1].seq, b"GGGG".to_vec());
    }

    #[test]
    fn test_writer_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fasta");
        let path = path.to_str().unwrap().to_string();
        let mut writer = FastaWriter::new(&path).unwrap();
        writer.write_record("locus1_upstream", b"ACGT").unwrap();
        drop(writer);

        let records = read_fasta(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "locus1_upstream");
        assert_eq!(records[0].seq, b"ACGT".to_vec());
    }
}
