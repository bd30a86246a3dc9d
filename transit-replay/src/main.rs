use std::path::PathBuf;

use transit_replay::analysis::{run_analysis, DurationStats};
use transit_replay::network::TransitNetwork;
use transit_replay::segment::{Segmenter, SegmenterConfig};
use transit_replay::sources::{FixtureHistorySource, FixtureTopologySource};
use transit_replay::timing::{JoinConfig, TripTimeJoiner};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(data_dir), Some(from), Some(to)) = (args.next(), args.next(), args.next()) else {
        eprintln!("Usage: transit-replay <data-dir> <from-station> <to-station>");
        std::process::exit(2);
    };
    let data_dir = PathBuf::from(data_dir);

    // Load sources
    let topology =
        FixtureTopologySource::from_dir(&data_dir).expect("Failed to load route topology");
    let history =
        FixtureHistorySource::from_dir(&data_dir).expect("Failed to load historical transit times");

    // Build the network model
    let network = TransitNetwork::build(&topology).expect("Failed to build transit network");
    println!("Loaded network with {} stations", network.station_count());

    let segmenter = Segmenter::new(&SegmenterConfig::default());
    let joiner = TripTimeJoiner::new(&history, JoinConfig::default());

    let timings =
        run_analysis(&network, &segmenter, &joiner, &from, &to).expect("Analysis failed");

    if timings.is_empty() {
        println!("No routes found between {from} and {to}");
        return;
    }

    for timing in &timings {
        println!();
        println!("{}", timing.label);
        println!("  via {}", timing.path);
        match DurationStats::from_trips(&timing.trips) {
            Some(stats) => println!(
                "  {} reconstructed trips: min {}m, mean {}m, max {}m",
                stats.count,
                stats.min.num_minutes(),
                stats.mean.num_minutes(),
                stats.max.num_minutes()
            ),
            None => println!("  no reconstructed trips"),
        }
    }
}
