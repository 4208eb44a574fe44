//! Solar audit entry point: CLI wiring and config-driven calculator construction.

mod cli;

use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use solar_audit::calc::rounding::round_whole;
use solar_audit::config::AuditConfig;
use solar_audit::io::export::export_projection_csv;
use solar_audit::report::format_clp;
use solar_audit::wizard::{BillReaction, WizardSession};
use solar_audit::Calculator;

use cli::{CliOptions, Command};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("solar_audit=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(opts: &CliOptions) -> Result<AuditConfig, String> {
    // --config takes priority, then --preset, then the built-in table
    let cfg = if let Some(ref path) = opts.config {
        AuditConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(ref name) = opts.preset {
        AuditConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        AuditConfig::chile()
    };

    let errors = cfg.validate();
    if !errors.is_empty() {
        let lines: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(lines.join("\n"));
    }
    Ok(cfg)
}

fn print_regions(calculator: &Calculator) {
    println!("{:<14} {:<14} {:>8} {:>8}", "id", "name", "kWh/kWp", "$/kWh");
    for r in calculator.regions().iter() {
        println!(
            "{:<14} {:<14} {:>8} {:>8}",
            r.id(),
            r.name(),
            r.generation_factor(),
            r.price_kwh()
        );
    }
}

/// Walks the wizard with the CLI answers and prints the teaser or full report.
fn run_audit(opts: &CliOptions, cfg: &AuditConfig, calculator: &Calculator) -> Result<(), String> {
    let region_id = opts
        .region
        .as_deref()
        .ok_or_else(|| "missing --region (see --list-regions)".to_string())?;
    let limits = &cfg.wizard;
    let bill = opts.bill.unwrap_or(limits.default_bill);

    let session = WizardSession::new(limits)
        .select_location(calculator, region_id)
        .map_err(|e| e.to_string())?;
    if let Some(region) = session.region() {
        println!(
            "{}: {} kWh/kWp per year, {} per kWh",
            region.name(),
            region.generation_factor(),
            format_clp(round_whole(region.price_kwh()))
        );
    }

    let session = session
        .set_bill(bill, limits)
        .and_then(|s| s.select_property(opts.property))
        .and_then(|s| s.run_analysis(calculator))
        .map_err(|e| e.to_string())?;
    println!(
        "Monthly bill {} ({})",
        format_clp(round_whole(bill)),
        BillReaction::for_bill(bill).label()
    );

    let (Some(name), Some(email)) = (opts.name.as_deref(), opts.email.as_deref()) else {
        println!(
            "Estimated savings: {}/year. Provide --name and --email for the full report.",
            format_clp(session.teaser_savings())
        );
        if opts.projection_out.is_some() {
            warn!("projection export skipped: requires contact details");
        }
        return Ok(());
    };

    let session = session
        .submit_contact(name, email)
        .map_err(|e| e.to_string())?;
    let report = session
        .report(&cfg.projection)
        .ok_or_else(|| "report unavailable".to_string())?;
    info!(region_id, "lead captured");
    println!("\n{report}");

    if let Some(ref path) = opts.projection_out {
        export_projection_csv(&report.projection, path)
            .map_err(|e| format!("failed to write CSV: {e}"))?;
        info!(path = %path.display(), "projection written");
    }
    Ok(())
}

#[cfg(feature = "api")]
fn run_server(opts: &CliOptions, cfg: &AuditConfig, calculator: Calculator) -> Result<(), String> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(solar_audit::api::AppState {
        calculator,
        projection: cfg.projection.clone(),
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], opts.port));
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("failed to create tokio runtime: {e}"))?;
    rt.block_on(solar_audit::api::serve(state, addr))
        .map_err(|e| format!("server error: {e}"))
}

fn run(opts: &CliOptions) -> Result<(), String> {
    let cfg = load_config(opts)?;
    let calculator = cfg.build_calculator().map_err(|e| e.to_string())?;
    info!(regions = calculator.regions().len(), "calculator ready");

    if opts.list_regions {
        print_regions(&calculator);
        return Ok(());
    }

    #[cfg(feature = "api")]
    if opts.serve {
        return run_server(opts, &cfg, calculator);
    }

    run_audit(opts, &cfg, &calculator)
}

fn main() {
    init_logging();

    let opts = match cli::parse_args() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            cli::print_usage();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(&opts) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
