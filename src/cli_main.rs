use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "synkmer",
    version,
    about = "K-mer composition comparison of genomic loci and their flanking sequences",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count k-mers in one or more FASTA samples and write a count matrix
    Count {
        /// Input FASTA(.gz) file(s), one sample each
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// K-mer length
        #[arg(short, long, default_value_t = 4)]
        kmer_length: usize,

        /// Count canonical (strand-collapsed) k-mers
        #[arg(long)]
        canonical: bool,

        /// Standardize counts to z-scores
        #[arg(long)]
        standardize: bool,

        /// Number of threads
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,

        /// Output base path
        #[arg(short, long, default_value = "synkmer")]
        output_base: String,
    },

    /// Compare loci by the k-mer profiles of their flanking windows
    Loci {
        /// GFF3 annotation holding the loci to compare
        #[arg(long)]
        gff: String,

        /// Genome FASTA(.gz) the annotation refers to
        #[arg(long)]
        fasta: String,

        /// GFF feature type to select
        #[arg(long, default_value = "gene")]
        feature: String,

        /// Attribute key holding the locus id
        #[arg(long, default_value = "ID")]
        id_key: String,

        /// K-mer length
        #[arg(short, long, default_value_t = 4)]
        kmer_length: usize,

        /// Flanking window length on each side of a locus
        #[arg(short, long, default_value_t = 1000)]
        window_length: usize,

        /// Distance method: Euclidean, Cosine or Mash
        #[arg(long, default_value = "Euclidean")]
        dist_method: String,

        /// Count canonical (strand-collapsed) k-mers
        #[arg(long)]
        canonical: bool,

        /// Standardize counts before computing distances
        #[arg(long)]
        standardize: bool,

        /// Write the extracted flanking windows as FASTA
        #[arg(long)]
        write_fasta: bool,

        /// Optional heatmap PNG of the pairwise distances
        #[arg(long)]
        heatmap: Option<String>,

        /// Optional JSON run report path
        #[arg(long)]
        json_report: Option<String>,

        /// Number of threads
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,

        /// Output base path
        #[arg(short, long, default_value = "synkmer")]
        output_base: String,
    },
}
