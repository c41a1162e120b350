use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use crate::resolver::UsZipResolver;

mod aggregate;
mod extract;
mod input;
mod map;
mod record;
mod resolver;

#[derive(Parser, Debug)]
#[command(name = "zipmap")]
#[command(about = "Plot the zip codes from an address spreadsheet on an interactive US map")]
struct Args {
    /// Input spreadsheet (CSV); a file picker opens when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Destination for the HTML map; a save dialog opens when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Header name of the address column
    #[arg(long, default_value = "Address")]
    column: String,
}

fn main() -> color_eyre::Result<()> {
    env_logger::init();
    color_eyre::install()?;

    match run(Args::parse()) {
        Err(e) => {
            log::error!("Error: {:?}", e);
            std::process::exit(1);
        }
        _ => Ok(()),
    }
}

fn run(args: Args) -> color_eyre::Result<()> {
    let Some(input) = args.input.or_else(pick_input_file) else {
        println!("No input file chosen, nothing to do.");
        return Ok(());
    };

    info!("reading addresses from [{}]", input.display());
    let records = input::read_addresses_from_path(&input, &args.column)?;
    let codes: Vec<String> = records
        .iter()
        .filter_map(|r| r.address.as_deref())
        .filter_map(extract::extract_postal_code)
        .map(String::from)
        .collect();
    info!("extracted [{}] postal codes from [{}] address rows", codes.len(), records.len());

    let resolver = UsZipResolver::new();
    let aggregation = aggregate::aggregate(codes, &resolver);
    info!(
        "resolved [{}] places, [{}] codes left unresolved",
        aggregation.groups.len(),
        aggregation.unresolved.len(),
    );

    let Some(output) = args.output.or_else(pick_output_file) else {
        println!("No save destination chosen, map was not written.");
        return Ok(());
    };
    map::save_map(&aggregation.groups, &output)?;
    println!("Map has been saved as {}", output.display());

    if !aggregation.unresolved.is_empty() {
        let unresolved_count = aggregation.unresolved.len();
        let sidecar = record::sidecar_path(&output);
        record::save_unresolved(aggregation.unresolved, &sidecar)?;
        warn!(
            "[{unresolved_count}] postal codes could not be resolved, see [{}]",
            sidecar.display(),
        );
    }
    Ok(())
}

fn pick_input_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Choose the address spreadsheet")
        .add_filter("CSV", &["csv"])
        .pick_file()
}

fn pick_output_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save map as")
        .add_filter("HTML", &["html"])
        .set_file_name("usa_city_map.html")
        .save_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, PlaceKey};
    use crate::extract::extract_postal_code;
    use crate::resolver::{Coordinate, PostalResolver, ResolveError, ResolvedPlace};

    struct StubResolver;

    impl PostalResolver for StubResolver {
        fn resolve(&self, code: &str) -> Result<Option<ResolvedPlace>, ResolveError> {
            if code == "62701" {
                Ok(Some(ResolvedPlace {
                    city: Some("Springfield".to_string()),
                    state: Some("Illinois".to_string()),
                    latitude: Some(39.8),
                    longitude: Some(-89.6),
                }))
            } else {
                Ok(None)
            }
        }
    }

    #[test]
    fn addresses_end_up_as_one_springfield_marker() {
        let addresses = [
            "123 Main St, Springfield, IL 62701",
            "456 Oak Ave 62701-1234",
            "789 Pine Rd, no zip here",
        ];
        let extracted: Vec<_> = addresses.iter().map(|a| extract_postal_code(a)).collect();
        assert_eq!(extracted, vec![Some("62701"), Some("62701"), None]);

        let codes: Vec<String> = extracted.into_iter().flatten().map(String::from).collect();
        let out = aggregate(codes, &StubResolver);

        let key = PlaceKey {
            city: "Springfield".to_string(),
            state: "Illinois".to_string(),
        };
        assert_eq!(out.groups.len(), 1);
        let group = &out.groups[&key];
        assert_eq!(group.codes, vec!["62701".to_string(), "62701".to_string()]);
        assert_eq!(
            group.coordinate,
            Some(Coordinate { latitude: 39.8, longitude: -89.6 }),
        );
        assert!(out.unresolved.is_empty());

        let html = map::render_html(&out.groups);
        assert_eq!(html.matches("L.marker(").count(), 1);
        assert!(html.contains("Springfield, Illinois (2)"));
    }
}
