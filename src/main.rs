use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;
use tracing::info;

use san_working_days::{CachedBankHolidays, Config, HolidayEvent, Region, WorkingDayCalculator};

#[derive(Parser, Debug)]
#[command(name = "san-working-days")]
#[command(about = "Working-day calculations against the UK bank holiday calendar")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/san-working-days/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Bank holiday jurisdiction
  #[arg(short, long, default_value = "england-and-wales")]
  region: Region,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Report whether a date is a working day
  IsWorkingDay {
    /// Date as YYYY-MM-DD
    date: NaiveDate,
  },
  /// Date that is N working days after a start date
  NextWorkingDay {
    /// Number of working days to step forward
    #[arg(allow_negative_numbers = true)]
    days: i64,
    /// Start date as YYYY-MM-DD (default: today)
    #[arg(long)]
    from: Option<NaiveDate>,
  },
  /// List published bank holidays
  BankHolidays {
    /// Only show holidays in this year
    #[arg(long)]
    year: Option<i32>,
  },
  /// Check the bank holidays feed is reachable
  Health,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let config = Config::load(args.config.as_deref())?;
  let _log_guard = san_working_days::logging::init(&config.log)?;

  info!(url = %config.bank_holidays.url, region = %args.region, "starting");

  let holidays = CachedBankHolidays::from_config(&config.bank_holidays)?;

  match args.command {
    Command::IsWorkingDay { date } => {
      let calculator = WorkingDayCalculator::new(holidays).with_region(args.region);
      let working = calculator.is_working_day(date).await?;
      println!("{} {}", date, if working { "is a working day" } else { "is not a working day" });
    }
    Command::NextWorkingDay { days, from } => {
      let calculator = WorkingDayCalculator::new(holidays).with_region(args.region);
      let date = match from {
        Some(from) => calculator.next_working_day_n_days_from_date(days, from).await?,
        None => calculator.next_working_day_n_days_from_today(days).await?,
      };
      println!("{}", date);
    }
    Command::BankHolidays { year } => {
      let calendar = holidays.get_bank_holidays().await?;
      let events: Vec<&HolidayEvent> = match year {
        Some(year) => calendar.events_in_year(args.region, year).collect(),
        None => calendar.events(args.region).iter().collect(),
      };
      for event in events {
        if event.notes.is_empty() {
          println!("{}  {}", event.date, event.title);
        } else {
          println!("{}  {} ({})", event.date, event.title, event.notes);
        }
      }
    }
    Command::Health => {
      holidays.health_check().await?;
      println!("bank holidays feed is reachable");
    }
  }

  Ok(())
}
