use std::fs::File;
use std::io::{BufRead, BufReader};

use tracing::{info, warn};

use crate::error::SynkmerError;

/// One locus selected from the annotation, with its 1-based inclusive
/// coordinates as annotated.
#[derive(Debug, Clone)]
pub struct Locus {
    pub id: String,
    pub seqname: String,
    pub start: u64,
    pub end: u64,
    pub reverse: bool,
}

/// Loads the `feature`-typed records of a GFF3 file, deriving each locus id
/// from the `id_key` attribute.
pub fn load_gff(path: &str, feature: &str, id_key: &str) -> Result<Vec<Locus>, SynkmerError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut loci = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 9 || fields[2] != feature {
            continue;
        }
        let start: u64 = fields[3].parse().map_err(|_| {
            SynkmerError::Input(format!("bad start coordinate '{}' in {path}", fields[3]))
        })?;
        let end: u64 = fields[4].parse().map_err(|_| {
            SynkmerError::Input(format!("bad end coordinate '{}' in {path}", fields[4]))
        })?;
        let id = match attribute(fields[8], id_key) {
            Some(id) => id,
            None => {
                let fallback = format!("{}:{}-{}", fields[0], start, end);
                warn!("no '{id_key}' attribute on a {feature} record, using {fallback}");
                fallback
            }
        };
        loci.push(Locus {
            id,
            seqname: fields[0].to_string(),
            start,
            end,
            reverse: fields[6] == "-",
        });
    }

    if loci.is_empty() {
        return Err(SynkmerError::Input(format!(
            "no '{feature}' features found in {path}"
        )));
    }
    info!("loaded {} loci from {}", loci.len(), path);
    Ok(loci)
}

fn attribute(attrs: &str, key: &str) -> Option<String> {
    attrs.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        if k == key {
            Some(v.trim_matches('"').to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_gff_selects_feature_and_id() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "##gff-version 3").unwrap();
        writeln!(
            file,
            "chrI\ttest\tgene\t1000\t2000\t.\t+\t.\tID=YAL001C;Name=TFC3"
        )
        .unwrap();
        writeln!(file, "chrI\ttest\tmRNA\t1000\t2000\t.\t+\t.\tID=YAL001C.t1").unwrap();
        writeln!(
            file,
            "chrII\ttest\tgene\t500\t900\t.\t-\t.\tID=YBL002W"
        )
        .unwrap();

        let loci = load_gff(file.path().to_str().unwrap(), "gene", "ID").unwrap();
        assert_eq!(loci.len(), 2);
        assert_eq!(loci[0].id, "YAL001C");
        assert_eq!(loci[0].seqname, "chrI");
        assert_eq!(loci[0].start, 1000);
        assert_eq!(loci[0].end, 2000);
        assert!(!loci[0].reverse);
        assert!(loci[1].reverse);
    }

    #[test]
    fn test_missing_feature_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chrI\ttest\texon\t10\t20\t.\t+\t.\tID=x").unwrap();
        assert!(load_gff(file.path().to_str().unwrap(), "gene", "ID").is_err());
    }

    #[test]
    fn test_attribute_lookup() {
        assert_eq!(
            attribute("ID=g1;Name=n1", "Name"),
            Some("n1".to_string())
        );
        assert_eq!(attribute("ID=g1", "Name"), None);
    }
}
