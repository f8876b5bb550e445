//! Console consumer for the toptrack sampler: starts a sampler, awaits the
//! availability signal, and prints each committed snapshot. This is the
//! display side of the producer/consumer handoff — it only ever reads.

use anyhow::Context;
use serde::Serialize;
use toptrack::{Probe, ProcessSample, RatedSample, Sampler, SamplerConfig, TopSnapshot};

const USAGE: &str = "\
toptrack_cli — print the top-N resource-using processes

USAGE:
    toptrack_cli [--by mem|io] [--interval SECS] [--top N] [--ticks COUNT] [--json]

OPTIONS:
        --by mem|io      rank by resident memory (mem) or disk transfer rate (io) [default: mem]
    -i, --interval SECS  seconds between samples, 0.5..=20 [default: 1]
    -n, --top N          processes listed per sample, 0..=25 [default: 5]
    -t, --ticks COUNT    exit after COUNT samples; 0 runs until interrupted [default: 0]
        --json           one JSON snapshot per line instead of a table
    -h, --help           print this help
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RankBy {
    Memory,
    DiskIo,
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    by: RankBy,
    interval_secs: f64,
    top_n: usize,
    ticks: u64,
    json: bool,
    help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            by: RankBy::Memory,
            interval_secs: toptrack::config::INTERVAL_DEFAULT_SECS,
            top_n: toptrack::config::TOP_N_DEFAULT,
            ticks: 0,
            json: false,
            help: false,
        }
    }
}

fn value(
    flag: &str,
    inline: Option<String>,
    it: &mut impl Iterator<Item = String>,
) -> Result<String, String> {
    inline
        .or_else(|| it.next())
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliOptions, String> {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut opts = CliOptions::default();
    while let Some(arg) = it.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "--by" => {
                let v = value(&flag, inline, &mut it)?;
                opts.by = match v.as_str() {
                    "mem" => RankBy::Memory,
                    "io" => RankBy::DiskIo,
                    other => return Err(format!("unknown ranking '{other}' (expected mem or io)")),
                };
            }
            "--interval" | "-i" => {
                let v = value(&flag, inline, &mut it)?;
                opts.interval_secs = v.parse().map_err(|_| format!("bad interval '{v}'"))?;
            }
            "--top" | "-n" => {
                let v = value(&flag, inline, &mut it)?;
                opts.top_n = v.parse().map_err(|_| format!("bad process count '{v}'"))?;
            }
            "--ticks" | "-t" => {
                let v = value(&flag, inline, &mut it)?;
                opts.ticks = v.parse().map_err(|_| format!("bad tick count '{v}'"))?;
            }
            "--json" => opts.json = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown flag '{other}'")),
        }
    }
    Ok(opts)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = match parse_args(std::env::args()) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!();
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    };
    if opts.help {
        print!("{USAGE}");
        return Ok(());
    }

    // Logs go to stderr so --json output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SamplerConfig {
        interval_secs: opts.interval_secs,
        top_n: opts.top_n,
    };

    match opts.by {
        RankBy::Memory => {
            let sampler = Sampler::memory(config).context("invalid sampler configuration")?;
            watch(sampler, &opts, |e: &ProcessSample| {
                format!("{:>8}  {:>14}  {}", e.pid, e.bytes, e.name)
            })
            .await
        }
        RankBy::DiskIo => {
            let sampler = Sampler::disk_io(config).context("invalid sampler configuration")?;
            watch(sampler, &opts, |e: &RatedSample| {
                format!(
                    "{:>8}  {:>12.0}  {:>12.0}  {}",
                    e.pid, e.bytes_in_per_sec, e.bytes_out_per_sec, e.name
                )
            })
            .await
        }
    }
}

/// Print every snapshot the sampler commits, at most once per `seq`.
async fn watch<P>(
    sampler: Sampler<P>,
    opts: &CliOptions,
    row: impl Fn(&P::Entry) -> String,
) -> anyhow::Result<()>
where
    P: Probe,
    P::Entry: Serialize,
{
    sampler.start();
    let mut printed = 0u64;
    let mut last_seen = 0u64;
    loop {
        match sampler.latest() {
            Some(snap) if snap.seq > last_seen => {
                last_seen = snap.seq;
                if opts.json {
                    println!("{}", serde_json::to_string(&*snap)?);
                } else {
                    print_table(&snap, &row);
                }
                printed += 1;
                if opts.ticks > 0 && printed >= opts.ticks {
                    break;
                }
            }
            _ => sampler.changed().await,
        }
    }
    sampler.stop();
    Ok(())
}

fn print_table<T>(snap: &TopSnapshot<T>, row: &impl Fn(&T) -> String) {
    println!(
        "# seq {} at {} ({} entries)",
        snap.seq,
        snap.taken_at.format("%H:%M:%S%.3f"),
        snap.entries.len()
    );
    for entry in &snap.entries {
        println!("{}", row(entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, String> {
        let mut argv = vec!["toptrack_cli".to_string()];
        argv.extend(args.iter().map(|s| s.to_string()));
        parse_args(argv)
    }

    #[test]
    fn defaults_when_no_flags() {
        let opts = parse(&[]).unwrap();
        assert_eq!(opts, CliOptions::default());
    }

    #[test]
    fn long_short_and_assign_forms() {
        let a = parse(&["--interval", "2.5", "--top", "10", "--ticks", "3"]).unwrap();
        let b = parse(&["-i", "2.5", "-n", "10", "-t", "3"]).unwrap();
        let c = parse(&["--interval=2.5", "--top=10", "--ticks=3"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.interval_secs, 2.5);
        assert_eq!(a.top_n, 10);
        assert_eq!(a.ticks, 3);
    }

    #[test]
    fn ranking_modes() {
        assert_eq!(parse(&["--by", "mem"]).unwrap().by, RankBy::Memory);
        assert_eq!(parse(&["--by", "io"]).unwrap().by, RankBy::DiskIo);
        assert!(parse(&["--by", "cpu"]).is_err());
    }

    #[test]
    fn json_and_help_flags() {
        assert!(parse(&["--json"]).unwrap().json);
        assert!(parse(&["--help"]).unwrap().help);
        assert!(parse(&["-h"]).unwrap().help);
    }

    #[test]
    fn rejects_unknown_flags_and_bad_values() {
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["--interval", "fast"]).is_err());
        assert!(parse(&["--top"]).is_err());
    }
}
