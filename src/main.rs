use clap::Parser;
use ipcs::{AddressList, Approximation};
use std::error::Error;
use std::io::{self, BufRead};

/// Reads hosts or IPv4 addresses from stdin, one per line, and prints the
/// approximated CIDR blocks.
#[derive(Parser)]
#[command(author = "Daniel Yu", version)]
struct Opts {
    /// Reconcile each /24 group by scanning the last octet only.
    #[arg(long)]
    bit_scan: bool,
}

impl Opts {
    fn mode(&self) -> Approximation {
        if self.bit_scan {
            Approximation::BitScan
        } else {
            Approximation::default()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let option = Opts::parse();

    let stdin = io::stdin();
    let mut inputs = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            inputs.push(line);
        }
    }
    log::info!("read {} inputs", inputs.len());

    let (list, skipped) = AddressList::parse_report(&inputs);
    for (input, e) in skipped.iter() {
        log::warn!("skipped {}: {}", input, e);
    }
    for block in list.approx_with(option.mode()) {
        println!("{}", block);
    }
    Ok(())
}
