use chrono::{NaiveDate, Utc};
use std::io;
use tracing::info;
use voxa_metrics::cli::Cli;
use voxa_metrics::config::{Config, ConfigLoader, OutputFormat};
use voxa_metrics::report::{render_text, AnalyticsInput, AnalyticsReport, ClientReport};
use voxa_metrics::utils::{init_logging, DataLoader};
use voxa_metrics::VoxaError;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    // Handle configuration commands
    if cli.init {
        Config::init()?;
        return Ok(());
    }

    if cli.print {
        ConfigLoader::load().print()?;
        return Ok(());
    }

    if cli.check {
        let config = Config::load()?;
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    let config = ConfigLoader::load();
    let format = cli.format.unwrap_or(config.output);

    if cli.analytics {
        return run_analytics(&cli, &config, format);
    }

    let mut input = match cli.input_path() {
        Some(path) => DataLoader::read_input_path(path)?,
        None => DataLoader::read_input(io::stdin().lock())?,
    };

    let mut loader = DataLoader::new();
    loader.remember(&input.calls);
    for pattern in &cli.calls {
        input.calls.extend(loader.load_calls(pattern)?);
    }

    let today = parse_today(cli.today.as_deref())?;
    info!(
        client_id = %input.client.id,
        calls = input.calls.len(),
        %today,
        "building report"
    );

    let report = ClientReport::build(&input.client, &input.plan, &input.calls, today, &config);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => println!("{}", render_text(&report, &config.sections)),
    }

    Ok(())
}

fn run_analytics(
    cli: &Cli,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input: AnalyticsInput = match cli.input_path() {
        Some(path) => serde_json::from_reader(io::BufReader::new(std::fs::File::open(path)?))?,
        None => serde_json::from_reader(io::stdin().lock())?,
    };

    let mut loader = DataLoader::new();
    loader.remember(&input.calls);
    for pattern in &cli.calls {
        input.calls.extend(loader.load_calls(pattern)?);
    }

    info!(
        clients = input.clients.len(),
        calls = input.calls.len(),
        "building analytics"
    );

    let report = AnalyticsReport::build(&input.clients, &input.calls, config);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!(
                "{} calls · {:.0} min · {:.1}% conversion · {:.1}% golden window · €{:.2} est. value",
                report.total_calls,
                report.total_minutes,
                report.conversion.conversion_rate,
                report.golden_window.percentage,
                report.total_revenue
            );
            println!("\nAgents:");
            for agent in &report.agents {
                println!(
                    "  {:<20} {:>4} calls · {:>3} appts · {:>5.1}% conv · {:>5.1}% gw · {:.0} min",
                    agent.agent_name.as_deref().unwrap_or(&agent.agent_id),
                    agent.total_calls,
                    agent.appointments,
                    agent.conversion_rate,
                    agent.golden_window_percentage,
                    agent.total_minutes
                );
            }
            println!("\nTop clients:");
            for client in report.clients.iter().take(10) {
                println!(
                    "  {:<24} {:>4} calls · {:>3} appts · {:>5.1}% conv · €{:.2}",
                    client.company_name,
                    client.total_calls,
                    client.appointments,
                    client.conversion_rate,
                    client.revenue
                );
            }
        }
    }

    Ok(())
}

fn parse_today(input: Option<&str>) -> Result<NaiveDate, VoxaError> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| VoxaError::InvalidDate(s.to_string())),
        // Period boundaries are UTC days
        None => Ok(Utc::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_today() {
        let pinned = parse_today(Some("2024-03-15")).unwrap();
        assert_eq!(pinned, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(matches!(
            parse_today(Some("15/03/2024")),
            Err(VoxaError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_default_today_is_utc_date() {
        let before = Utc::now().date_naive();
        let today = parse_today(None).unwrap();
        let after = Utc::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
