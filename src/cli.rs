use std::env;
use std::path::PathBuf;

use solar_audit::PropertyType;

pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub region: Option<String>,
    pub bill: Option<f64>,
    pub property: PropertyType,
    pub name: Option<String>,
    pub email: Option<String>,
    pub projection_out: Option<PathBuf>,
    pub list_regions: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: u16,
}

pub enum Command {
    Run(CliOptions),
    Help,
}

pub fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<Command, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        config: None,
        preset: None,
        region: None,
        bill: None,
        property: PropertyType::House,
        name: None,
        email: None,
        projection_out: None,
        list_regions: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--region" => {
                i += 1;
                let region = args.next_or_err(i, "missing value for --region (expected a region id)")?;
                opts.region = Some(region.to_string());
            }
            "--bill" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --bill (expected an amount)")?;
                let bill = raw
                    .parse::<f64>()
                    .map_err(|_| format!("--bill value \"{raw}\" is not a number"))?;
                opts.bill = Some(bill);
            }
            "--property" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --property")?;
                opts.property = raw.parse()?;
            }
            "--name" => {
                i += 1;
                opts.name = Some(args.next_or_err(i, "missing value for --name")?.to_string());
            }
            "--email" => {
                i += 1;
                opts.email = Some(args.next_or_err(i, "missing value for --email")?.to_string());
            }
            "--projection-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --projection-out (expected a file path)",
                )?;
                if opts.projection_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--projection-out provided more than once".to_string());
                }
            }
            "--list-regions" => opts.list_regions = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.name.is_some() != opts.email.is_some() {
        return Err("`--name` and `--email` must be given together".to_string());
    }

    Ok(Command::Run(opts))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("solar-audit: solar panel savings audit");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  solar-audit [--config <path> | --preset <name>] --region <id> [--bill <amount>]"
    );
    eprintln!("              [--property house|commercial|apartment] [--name <name> --email <email>]");
    eprintln!("              [--projection-out <path>]");
    eprintln!("  solar-audit --list-regions");
    #[cfg(feature = "api")]
    eprintln!("  solar-audit --serve [--port <u16>]");
    eprintln!();
    eprintln!("Without --name/--email only the estimated annual savings are shown.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, String> {
        let owned: Vec<String> = args.iter().map(|s| (*s).to_string()).collect();
        match parse_options(&owned)? {
            Command::Run(opts) => Ok(opts),
            Command::Help => Err("help".to_string()),
        }
    }

    #[test]
    fn supports_full_audit_cli() {
        let opts = parse(&[
            "--region", "temuco", "--bill", "120000", "--property", "commercial", "--name", "Ana",
            "--email", "ana@example.cl",
        ])
        .expect("parse should succeed");
        assert_eq!(opts.region.as_deref(), Some("temuco"));
        assert_eq!(opts.bill, Some(120_000.0));
        assert_eq!(opts.property, PropertyType::Commercial);
        assert_eq!(opts.email.as_deref(), Some("ana@example.cl"));
    }

    #[test]
    fn defaults_to_house() {
        let opts = parse(&["--region", "santiago"]).expect("parse should succeed");
        assert_eq!(opts.property, PropertyType::House);
        assert!(opts.bill.is_none());
    }

    #[test]
    fn rejects_config_and_preset_together() {
        assert!(parse(&["--config", "a.toml", "--preset", "chile"]).is_err());
    }

    #[test]
    fn rejects_name_without_email() {
        assert!(parse(&["--region", "santiago", "--name", "Ana"]).is_err());
    }

    #[test]
    fn rejects_bad_bill() {
        let err = parse(&["--bill", "lots"]).err().unwrap_or_default();
        assert!(err.contains("not a number"));
    }

    #[test]
    fn help_flag() {
        let args = vec!["--help".to_string()];
        assert!(matches!(parse_options(&args), Ok(Command::Help)));
    }
}
