use std::fs::File;
use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::error::SynkmerError;
use crate::kmer::KmerSet;
use crate::locus::DistanceRecord;

/// Writes the per-sample count matrix as `<base>_KmerCounts.tsv`: one row
/// per k-mer label, one column per sample. Counts render as integers until
/// standardization turns them fractional.
pub fn write_counts_matrix(set: &KmerSet, output_base: &str) -> Result<(), SynkmerError> {
    let counters = set.counters();
    let first = match counters.first() {
        Some(counter) => counter,
        None => return Err(SynkmerError::Input("no samples to write".to_string())),
    };

    let path = format!("{output_base}_KmerCounts.tsv");
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "Kmers")?;
    for name in set.names() {
        write!(writer, "\t{}", name)?;
    }
    writeln!(writer)?;

    let labels = first.labels();
    let k = set.k();
    for i in 0..labels.len() {
        write!(writer, "{}", labels.decode(i, k))?;
        for counter in counters {
            if set.is_standardized() {
                write!(writer, "\t{:.4}", counter.counts()[i])?;
            } else {
                write!(writer, "\t{:.0}", counter.counts()[i])?;
            }
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the pairwise distance table as `<base>_KmerDist.tsv`; channels
/// without data render as `NA`.
pub fn write_distance_table(
    records: &[DistanceRecord],
    output_base: &str,
) -> Result<(), SynkmerError> {
    let path = format!("{output_base}_KmerDist.tsv");
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Locus1\tLocus2\tUpstream\tDownstream")?;
    for record in records {
        write!(writer, "{}\t{}", record.a, record.b)?;
        match record.upstream {
            Some(d) => write!(writer, "\t{:.4}", d)?,
            None => write!(writer, "\tNA")?,
        }
        match record.downstream {
            Some(d) => write!(writer, "\t{:.4}", d)?,
            None => write!(writer, "\tNA")?,
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Skip statistics of one counted flanking window.
#[derive(Serialize)]
pub struct ChannelReport {
    pub degenerate_bases: usize,
    pub too_short_bases: usize,
    pub distinct_kmers: usize,
}

#[derive(Serialize)]
pub struct LocusReport {
    pub id: String,
    pub upstream: Option<ChannelReport>,
    pub downstream: Option<ChannelReport>,
}

/// Everything a run produced, for machine consumption.
#[derive(Serialize)]
pub struct RunReport<'a> {
    pub k: usize,
    pub canonical: bool,
    pub metric: String,
    pub standardized: bool,
    pub loci: Vec<LocusReport>,
    pub distances: &'a [DistanceRecord],
}

pub fn write_json_report(report: &RunReport, path: &str) -> Result<(), SynkmerError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .map_err(std::io::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_distance_table_renders_na() {
        let records = vec![
            DistanceRecord {
                a: "g1".to_string(),
                b: "g2".to_string(),
                upstream: Some(1.25),
                downstream: None,
            },
            DistanceRecord {
                a: "g1".to_string(),
                b: "g3".to_string(),
                upstream: None,
                downstream: Some(0.5),
            },
        ];
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("run");
        let base = base.to_str().unwrap();
        write_distance_table(&records, base).unwrap();

        let written = fs::read_to_string(format!("{base}_KmerDist.tsv")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Locus1\tLocus2\tUpstream\tDownstream");
        assert_eq!(lines[1], "g1\tg2\t1.2500\tNA");
        assert_eq!(lines[2], "g1\tg3\tNA\t0.5000");
    }

    #[test]
    fn test_counts_matrix_format() {
        let mut set = KmerSet::new(2, false).unwrap();
        set.add_sample("s1", &[b"ACGTACGT".to_vec()]).unwrap();
        set.add_sample("s2", &[b"TTTTTTTT".to_vec()]).unwrap();
        set.merge().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("run");
        let base = base.to_str().unwrap();
        write_counts_matrix(&set, base).unwrap();

        let written = fs::read_to_string(format!("{base}_KmerCounts.tsv")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Kmers\ts1\ts2");
        // Dense k=2 table: 16 rows, AA first.
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[1], "AA\t0\t0");
        assert!(lines.contains(&"AC\t2\t0"));
        assert!(lines.contains(&"TT\t0\t7"));
    }
}
