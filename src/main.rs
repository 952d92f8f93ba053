use std::env;
use std::fs;
use std::process;

use fretwork::{tab, ChartBuilder, Config, NamedChord, ToneSystem};

fn usage() -> ! {
    eprintln!("Usage: fretwork <chord> [options]");
    eprintln!("       fretwork --chart [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tuning E4,B3,G3,D3,A2,E2   open-string tones, first string first");
    eprintln!("  --max-fret N                 fret search window [0, N)");
    eprintln!("  --config file.yaml           tuning/engine/chord config file");
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        usage();
    }

    let mut chord_name: Option<String> = None;
    let mut chart = false;
    let mut config = Config::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--chart" => chart = true,
            "--tuning" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| usage());
                config.tuning = value.split(',').map(|s| s.trim().to_string()).collect();
            }
            "--max-fret" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| usage());
                config.max_fret = match value.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        eprintln!("Invalid --max-fret value: {}", value);
                        process::exit(1);
                    }
                };
            }
            "--config" => {
                i += 1;
                let path = args.get(i).unwrap_or_else(|| usage());
                let source = match fs::read_to_string(path) {
                    Ok(source) => source,
                    Err(e) => {
                        eprintln!("Error reading config '{}': {}", path, e);
                        process::exit(1);
                    }
                };
                config = match Config::from_yaml(&source) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("{}", e);
                        process::exit(1);
                    }
                };
            }
            arg if arg.starts_with("--") => usage(),
            arg => {
                if chord_name.replace(arg.to_string()).is_some() {
                    usage();
                }
            }
        }
        i += 1;
    }

    if chart == chord_name.is_some() {
        usage();
    }

    let system = ToneSystem::western();
    let result = run(&system, &config, chord_name.as_deref(), chart);
    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(
    system: &ToneSystem,
    config: &Config,
    chord_name: Option<&str>,
    chart: bool,
) -> Result<(), fretwork::FretworkError> {
    let catalog = config.catalog()?;
    let fretboard = config.fretboard(system)?;
    let engine = config.engine();

    if chart {
        let chart = ChartBuilder::new(system, &catalog)
            .with_engine(engine)
            .build(&fretboard)?;
        let yaml = serde_yaml::to_string(&chart)
            .map_err(|e| fretwork::FretworkError::Config(e.to_string()))?;
        println!("{}", yaml);
        return Ok(());
    }

    let name = chord_name.expect("checked by the caller");
    let chord = NamedChord::parse(name, system, &catalog)?;
    let best = engine.best_fingering(&chord, &fretboard, system, &catalog)?;
    print!("{}", tab::render(&best, &fretboard)?);
    Ok(())
}
