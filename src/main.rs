use chrono::Utc;
use clap::{Parser, Subcommand};
use eduadmin::application::payroll::PayrollService;
use eduadmin::application::procurement::{ProcurementCommand, ProcurementService};
use eduadmin::domain::budget::Budget;
use eduadmin::domain::staff::{Roster, StaffMember};
use eduadmin::infrastructure::in_memory::{InMemoryPayrollRunStore, InMemoryRequestStore};
use eduadmin::interfaces::csv::events::EventRecord;
use eduadmin::interfaces::csv::reader::RecordReader;
use eduadmin::interfaces::csv::writer::{BudgetRow, PayrollRow, RequestRow, RowWriter};
use eduadmin::interfaces::json::read_rate_cards;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter, e.g. "info" or "eduadmin=debug"
    #[arg(long, env = "EDUADMIN_LOG", default_value = "info", global = true)]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a payroll run and print one breakdown per paid teacher
    Payroll {
        /// Staff CSV file
        #[arg(long)]
        staff: PathBuf,

        /// Rate cards JSON file
        #[arg(long)]
        rate_cards: PathBuf,

        /// Name recorded as the approver of the run
        #[arg(long, env = "EDUADMIN_APPROVER", default_value = "payroll administrator")]
        approver: String,
    },
    /// Replay procurement events and print the resulting requests
    Procurement {
        /// Staff CSV file
        #[arg(long)]
        staff: PathBuf,

        /// Procurement events CSV file
        #[arg(long)]
        events: PathBuf,

        /// Budgets CSV file
        #[arg(long, requires = "budget_report")]
        budgets: Option<PathBuf>,

        /// Where to write the budget usage report
        #[arg(long, requires = "budgets")]
        budget_report: Option<PathBuf>,
    },
}

fn read_staff(path: PathBuf) -> Result<Vec<StaffMember>> {
    let file = File::open(path).into_diagnostic()?;
    Ok(RecordReader::new(file).read_all()?)
}

async fn run_payroll(staff: PathBuf, rate_cards: PathBuf, approver: String) -> Result<()> {
    let staff = read_staff(staff)?;
    let rate_cards = read_rate_cards(File::open(rate_cards).into_diagnostic()?)?;

    let service = PayrollService::new(Box::new(InMemoryPayrollRunStore::new()));
    let run = service.run(&staff, &rate_cards, &approver, Utc::now()).await?;

    let stdout = io::stdout();
    let mut writer = RowWriter::new(stdout.lock());
    writer.write_rows(run.breakdowns().iter().map(PayrollRow::from))?;

    Ok(())
}

async fn run_procurement(
    staff: PathBuf,
    events: PathBuf,
    budgets: Option<PathBuf>,
    budget_report: Option<PathBuf>,
) -> Result<()> {
    let roster = Roster::new(read_staff(staff)?);
    let service = ProcurementService::new(roster, Box::new(InMemoryRequestStore::new()));

    // Process events
    let file = File::open(events).into_diagnostic()?;
    for record in RecordReader::new(file).records::<EventRecord>() {
        let command = match record.and_then(ProcurementCommand::try_from) {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Error reading event");
                continue;
            }
        };
        if let Err(e) = service.handle(command).await {
            warn!(error = %e, "Error processing event");
        }
    }

    let requests = service.requests().await?;
    let stdout = io::stdout();
    let mut writer = RowWriter::new(stdout.lock());
    writer.write_rows(requests.iter().map(RequestRow::from))?;

    if let (Some(budgets), Some(report)) = (budgets, budget_report) {
        let budgets: Vec<Budget> =
            RecordReader::new(File::open(budgets).into_diagnostic()?).read_all()?;
        let mut rows = Vec::with_capacity(budgets.len());
        for budget in &budgets {
            rows.push(BudgetRow::new(budget, service.budget_usage(budget).await?));
        }
        let mut writer = RowWriter::new(File::create(report).into_diagnostic()?);
        writer.write_rows(rows)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_new(&cli.log).into_diagnostic()?)
        .with_ansi(false)
        .with_target(false)
        .init();

    match cli.command {
        Command::Payroll {
            staff,
            rate_cards,
            approver,
        } => run_payroll(staff, rate_cards, approver).await,
        Command::Procurement {
            staff,
            events,
            budgets,
            budget_report,
        } => run_procurement(staff, events, budgets, budget_report).await,
    }
}
