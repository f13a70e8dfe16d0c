use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};

use weight_balance::io::{csv, json};
use weight_balance::loading::replay;
use weight_balance::types::{MassUnit, UnitPreference, VolumeUnit};
use weight_balance::{compute, presets, AircraftProfile, CalculationResult, LoadingCommand, LoadingInput};

#[derive(Parser, Debug)]
#[command(name = "weight-balance", about = "Weight & balance for a light aircraft loading")]
struct Args {
    /// Aircraft profile JSON (built-in reference single when omitted)
    #[arg(long)]
    profile: Option<String>,

    /// Station load as `<station>=<value>`; repeatable
    #[arg(long = "load", value_parser = parse_load)]
    loads: Vec<(String, f64)>,

    /// Unit of weight loads: pounds or kilograms
    #[arg(long, default_value = "pounds", value_parser = parse_mass_unit)]
    mass_unit: MassUnit,

    /// Unit of fuel loads: gallons or litres
    #[arg(long, default_value = "gallons", value_parser = parse_volume_unit)]
    fuel_unit: VolumeUnit,

    /// Fill all tanks
    #[arg(long)]
    full_fuel: bool,

    /// Fuel burn rate, US gal/h
    #[arg(long, default_value_t = 0.0)]
    burn_rate: f64,

    /// Flight duration, hours
    #[arg(long, default_value_t = 0.0)]
    hours: f64,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print the load path as CSV
    #[arg(long, conflicts_with = "json")]
    csv: bool,
}

fn parse_load(s: &str) -> Result<(String, f64), String> {
    let (id, value) = s.split_once('=').ok_or_else(|| format!("expected <station>=<value>, got '{s}'"))?;
    let value: f64 = value.trim().parse().map_err(|e| format!("bad value in '{s}': {e}"))?;
    Ok((id.trim().to_string(), value))
}

fn parse_mass_unit(s: &str) -> Result<MassUnit, String> {
    match s.to_ascii_lowercase().as_str() {
        "lb" | "lbs" | "pounds" => Ok(MassUnit::Pounds),
        "kg" | "kilograms" => Ok(MassUnit::Kilograms),
        _ => Err(format!("unknown mass unit '{s}'")),
    }
}

fn parse_volume_unit(s: &str) -> Result<VolumeUnit, String> {
    match s.to_ascii_lowercase().as_str() {
        "gal" | "gallons" => Ok(VolumeUnit::Gallons),
        "l" | "litres" | "liters" => Ok(VolumeUnit::Litres),
        _ => Err(format!("unknown fuel unit '{s}'")),
    }
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let profile = match &args.profile {
        Some(path) => match json::read_profile_file(path) {
            Ok(p) => p,
            Err(e) => {
                error!("{path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => presets::reference_single(),
    };
    info!("aircraft: {} ({} stations)", profile.name, profile.stations.len());

    let units = UnitPreference { mass: args.mass_unit, volume: args.fuel_unit };
    let mut commands: Vec<LoadingCommand> = args
        .loads
        .iter()
        .map(|(id, value)| LoadingCommand::SetStation { id: id.clone(), value: *value })
        .collect();
    if args.full_fuel {
        commands.push(LoadingCommand::FillFuel);
    }
    commands.push(LoadingCommand::SetBurnRate(args.burn_rate));
    commands.push(LoadingCommand::SetFlightHours(args.hours));
    let input = replay(&profile, &LoadingInput::new(units), commands);

    let result = compute(&profile, &input);

    let out = if args.json {
        json::write_result(&mut io::stdout().lock(), &profile, &result).map_err(io::Error::from)
    } else if args.csv {
        csv::write_load_path(&mut io::stdout().lock(), &result.load_path)
    } else {
        print_report(&profile, &input, &result);
        Ok(())
    };
    if let Err(e) = out {
        error!("failed to write output: {e}");
        return ExitCode::FAILURE;
    }

    if result.errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn print_report(profile: &AircraftProfile, input: &LoadingInput, r: &CalculationResult) {
    println!();
    println!("====================================================================");
    println!("  WEIGHT & BALANCE — {}", profile.name);
    println!("====================================================================");
    println!();

    println!("  Loading");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:<22} {:>10.1} lb   @ {:>7.1} mm",
        "Empty aircraft", profile.empty_weight_lbs, profile.empty_cg_mm
    );
    for s in &profile.stations {
        let v = input.value(&s.id);
        if v <= 0.0 {
            continue;
        }
        let unit = if s.is_fuel() { input.units.volume.symbol() } else { input.units.mass.symbol() };
        println!("  {:<22} {:>10.1} {:<4} @ {:>7.1} mm", s.name, v, unit, s.arm_mm);
    }
    println!();

    println!("  Totals");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Weight:        {:>8.1} lb    MTOW margin:  {:>8.1} lb",
        r.total_weight_lbs, r.weight_margin_lbs
    );
    println!(
        "  CG:            {:>8.1} mm    MAC:          {:>8.1} %",
        r.cg_mm, r.mac_percent
    );
    println!(
        "  Fwd margin:    {:>8.1} mm    Aft margin:   {:>8.1} mm",
        r.cg_margins.forward_mm, r.cg_margins.aft_mm
    );
    println!(
        "  Zero fuel:     {:>8.1} lb    ZF CG:        {:>8.1} mm",
        r.zero_fuel.weight_lbs, r.zero_fuel.cg_mm
    );
    println!("  Envelope:      {}", if r.within_envelope { "inside" } else { "OUTSIDE" });
    println!();

    if let Some(l) = &r.landing {
        let p = &l.projection;
        println!("  Landing");
        println!("  ──────────────────────────────────────────────────────────────────");
        println!(
            "  Fuel burned:   {:>8.1} lb    Remaining:    {:>8.1} {}",
            p.fuel_burned_lbs,
            p.remaining_fuel_volume,
            p.volume_unit.symbol()
        );
        println!(
            "  Weight:        {:>8.1} lb    CG:           {:>8.1} mm ({:.1} % MAC)",
            p.landing.weight_lbs, p.landing.cg_mm, l.mac_percent
        );
        println!();
    }

    println!("  Load path");
    println!("  ──────────────────────────────────────────────────────────────────");
    for pt in &r.load_path {
        println!("  {:<22} {:>10.1} lb   {:>7.1} mm", pt.label, pt.weight_lbs, pt.cg_mm);
    }
    println!();

    for e in r.error_messages() {
        println!("  ERROR    {e}");
    }
    for w in r.warning_messages() {
        println!("  CAUTION  {w}");
    }
    println!("  Status: {}", r.status().label());
    println!("====================================================================");
    println!();
}
