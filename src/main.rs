use ahash::AHashMap;
use clap::Parser;
use rayon::ThreadPoolBuilder;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use synkmer::cli_main::{Cli, Commands};
use synkmer::dist::DistanceMetric;
use synkmer::error::SynkmerError;
use synkmer::io::export;
use synkmer::io::fasta::{read_fasta, FastaWriter};
use synkmer::kmer::{KmerCounter, KmerSet};
use synkmer::locus::LocusSet;
use synkmer::visualize::heatmap;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Setting tracing default failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Count {
            input,
            kmer_length,
            canonical,
            standardize,
            threads,
            output_base,
        } => {
            init_threads(threads);
            if let Err(e) = run_count(&input, kmer_length, canonical, standardize, &output_base) {
                eprintln!("Error during counting: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Loci {
            gff,
            fasta,
            feature,
            id_key,
            kmer_length,
            window_length,
            dist_method,
            canonical,
            standardize,
            write_fasta,
            heatmap,
            json_report,
            threads,
            output_base,
        } => {
            init_threads(threads);
            let args = LociArgs {
                gff,
                fasta,
                feature,
                id_key,
                kmer_length,
                window_length,
                dist_method,
                canonical,
                standardize,
                write_fasta,
                heatmap,
                json_report,
                output_base,
            };
            if let Err(e) = run_loci(&args) {
                eprintln!("Error during locus comparison: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_threads(threads: usize) {
    if let Err(e) = ThreadPoolBuilder::new().num_threads(threads).build_global() {
        warn!("could not configure the thread pool: {}", e);
    }
}

fn run_count(
    inputs: &[String],
    k: usize,
    canonical: bool,
    standardize: bool,
    output_base: &str,
) -> Result<(), SynkmerError> {
    let start = std::time::Instant::now();
    let mut set = KmerSet::new(k, canonical)?;
    set.load_fasta_files(inputs)?;
    set.merge()?;
    if standardize {
        set.standardize();
    }
    export::write_counts_matrix(&set, output_base)?;
    info!(
        "wrote {}_KmerCounts.tsv in {:.2}s",
        output_base,
        start.elapsed().as_secs_f32()
    );
    Ok(())
}

struct LociArgs {
    gff: String,
    fasta: String,
    feature: String,
    id_key: String,
    kmer_length: usize,
    window_length: usize,
    dist_method: String,
    canonical: bool,
    standardize: bool,
    write_fasta: bool,
    heatmap: Option<String>,
    json_report: Option<String>,
    output_base: String,
}

fn run_loci(args: &LociArgs) -> Result<(), SynkmerError> {
    let start = std::time::Instant::now();
    let metric = DistanceMetric::from_name(&args.dist_method, args.kmer_length)?;

    let mut set = LocusSet::new(args.kmer_length, args.window_length, args.canonical)?;
    set.load_gff(&args.gff, &args.feature, &args.id_key)?;

    let mut sequences: AHashMap<String, Vec<u8>> = AHashMap::default();
    for record in read_fasta(&args.fasta)? {
        sequences.insert(record.id, record.seq);
    }
    set.count_windows(&sequences)?;

    for (i, locus) in set.loci().iter().enumerate() {
        let up = set.upstream_counter(i).map_or(0, KmerCounter::skipped_bases);
        let down = set
            .downstream_counter(i)
            .map_or(0, KmerCounter::skipped_bases);
        info!(
            "locus {}: {} bases skipped upstream, {} downstream",
            locus.id, up, down
        );
    }

    set.merge_channels()?;
    if args.standardize {
        set.standardize_counts();
    }

    let distances = set.pairwise_distances(metric)?;
    export::write_distance_table(&distances, &args.output_base)?;
    info!(
        "wrote {} pairwise comparisons to {}_KmerDist.tsv",
        distances.len(),
        args.output_base
    );

    if args.write_fasta {
        write_windows_fasta(&set, &args.output_base)?;
    }

    if let Some(path) = &args.heatmap {
        let labels: Vec<String> = set.loci().iter().map(|l| l.id.clone()).collect();
        let matrix = heatmap::distance_matrix(&labels, &distances);
        if let Err(e) = heatmap::plot_distance_heatmap(&matrix, &labels, path) {
            warn!("could not render the heatmap: {}", e);
        } else {
            info!("wrote heatmap to {}", path);
        }
    }

    if let Some(path) = &args.json_report {
        let report = export::RunReport {
            k: args.kmer_length,
            canonical: args.canonical,
            metric: args.dist_method.clone(),
            standardized: set.is_standardized(),
            loci: set
                .loci()
                .iter()
                .enumerate()
                .map(|(i, locus)| export::LocusReport {
                    id: locus.id.clone(),
                    upstream: set.upstream_counter(i).map(channel_report),
                    downstream: set.downstream_counter(i).map(channel_report),
                })
                .collect(),
            distances: &distances,
        };
        export::write_json_report(&report, path)?;
        info!("wrote JSON report to {}", path);
    }

    info!(
        "compared {} loci in {:.2}s",
        set.loci().len(),
        start.elapsed().as_secs_f32()
    );
    Ok(())
}

fn channel_report(counter: &KmerCounter) -> export::ChannelReport {
    export::ChannelReport {
        degenerate_bases: counter.degenerate_bases(),
        too_short_bases: counter.too_short_bases(),
        distinct_kmers: counter.size(),
    }
}

fn write_windows_fasta(set: &LocusSet, output_base: &str) -> Result<(), SynkmerError> {
    let mut up_writer = FastaWriter::new(&format!("{output_base}_upstream.fasta"))?;
    let mut down_writer = FastaWriter::new(&format!("{output_base}_downstream.fasta"))?;
    for (i, locus) in set.loci().iter().enumerate() {
        if let Some(window) = set.upstream_window(i) {
            up_writer.write_record(&locus.id, window)?;
        }
        if let Some(window) = set.downstream_window(i) {
            down_writer.write_record(&locus.id, window)?;
        }
    }
    Ok(())
}
