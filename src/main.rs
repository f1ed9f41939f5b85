//! VIP Loan CLI - Main Entry Point
//!
//! Thin command-line wrapper around the VIP loan services. Every subcommand
//! prints the decoded response as JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use binance_vip_loan::config::Config;
use binance_vip_loan::exchange::BinanceClient;
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// VIP Loan CLI
#[derive(Parser)]
#[command(name = "vip-loan")]
#[command(version, about = "Borrow, repay and inspect Binance VIP loans")]
struct Cli {
    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Borrow against one or more collateral accounts
    Borrow {
        #[arg(long)]
        loan_account_id: String,

        #[arg(long)]
        loan_coin: String,

        #[arg(long)]
        loan_amount: Decimal,

        /// Collateral account ids, comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        collateral_account_id: Vec<String>,

        /// Collateral coins, comma-separated, same order as the accounts
        #[arg(long, value_delimiter = ',', required = true)]
        collateral_coin: Vec<String>,

        /// Fixed term in days (30 or 60)
        #[arg(long, required_unless_present = "flexible")]
        loan_term: Option<u32>,

        /// Borrow at the flexible rate instead of a fixed term
        #[arg(long, conflicts_with = "loan_term")]
        flexible: bool,
    },

    /// Repay an ongoing loan order
    Repay {
        #[arg(long)]
        order_id: u64,

        #[arg(long)]
        amount: Decimal,
    },

    /// Renew a fixed-term loan order
    Renew {
        #[arg(long)]
        order_id: u64,

        /// Renewal term in days (30 or 60)
        #[arg(long)]
        loan_term: u32,
    },

    /// List ongoing loan orders
    Orders {
        #[arg(long)]
        order_id: Option<u64>,

        #[arg(long)]
        collateral_account_id: Option<String>,

        #[arg(long)]
        loan_coin: Option<String>,

        #[arg(long)]
        collateral_coin: Option<String>,

        #[arg(long)]
        current: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show repayment history
    RepayHistory {
        #[arg(long)]
        order_id: Option<u64>,

        #[arg(long)]
        loan_coin: Option<String>,

        /// Start date (YYYY-MM-DD, UTC) or Unix ms
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD, UTC, inclusive) or Unix ms
        #[arg(short, long)]
        end: Option<String>,

        #[arg(long)]
        current: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show locked value of collateral accounts
    Collateral {
        #[arg(long)]
        order_id: Option<u64>,

        #[arg(long)]
        collateral_account_id: Option<String>,
    },

    /// List loanable assets and their rates
    Loanable {
        #[arg(long)]
        loan_coin: Option<String>,

        #[arg(long)]
        vip_level: Option<u32>,
    },

    /// Show the status of submitted loan applications
    Applications {
        #[arg(long)]
        current: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show collateral tiers per coin
    CollateralData {
        #[arg(long)]
        collateral_coin: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_dir.as_deref())?;

    let config = Config::load()?;
    config.validate().context("Invalid configuration")?;
    debug!("Loaded configuration: {:?}", config.binance);

    let client = BinanceClient::new(&config.binance).context("Failed to create Binance client")?;

    run(cli.command, &client).await
}

async fn run(command: Commands, client: &BinanceClient) -> Result<()> {
    match command {
        Commands::Borrow {
            loan_account_id,
            loan_coin,
            loan_amount,
            collateral_account_id,
            collateral_coin,
            loan_term,
            flexible,
        } => {
            let mut service = client
                .new_vip_loan_borrow_service()
                .loan_account_id(loan_account_id)
                .loan_coin(loan_coin)
                .loan_amount(loan_amount)
                .is_flexible_rate(flexible);
            for id in collateral_account_id {
                service = service.collateral_account_id(id);
            }
            for coin in collateral_coin {
                service = service.collateral_coin(coin);
            }
            if let Some(days) = loan_term {
                service = service.loan_term(days);
            }

            let res = service.send().await.context("Borrow request failed")?;
            info!("Borrow request {} submitted", res.request_id);
            print_json(&res)
        }
        Commands::Repay { order_id, amount } => {
            let res = client
                .new_vip_loan_repay_service()
                .order_id(order_id)
                .amount(amount)
                .send()
                .await
                .context("Repay request failed")?;
            info!("Repay of order {}: {}", order_id, res.repay_status);
            print_json(&res)
        }
        Commands::Renew {
            order_id,
            loan_term,
        } => {
            let res = client
                .new_vip_loan_renew_service()
                .order_id(order_id)
                .loan_term(loan_term)
                .send()
                .await
                .context("Renew request failed")?;
            print_json(&res)
        }
        Commands::Orders {
            order_id,
            collateral_account_id,
            loan_coin,
            collateral_coin,
            current,
            limit,
        } => {
            let mut service = client.new_vip_loan_ongoing_orders_service();
            if let Some(id) = order_id {
                service = service.order_id(id);
            }
            if let Some(id) = collateral_account_id {
                service = service.collateral_account_id(id);
            }
            if let Some(coin) = loan_coin {
                service = service.loan_coin(coin);
            }
            if let Some(coin) = collateral_coin {
                service = service.collateral_coin(coin);
            }
            if let Some(page) = current {
                service = service.current(page);
            }
            if let Some(limit) = limit {
                service = service.limit(limit);
            }

            let res = service.send().await.context("Ongoing orders request failed")?;
            print_json(&res)
        }
        Commands::RepayHistory {
            order_id,
            loan_coin,
            start,
            end,
            current,
            limit,
        } => {
            let mut service = client.new_vip_loan_repay_history_service();
            if let Some(id) = order_id {
                service = service.order_id(id);
            }
            if let Some(coin) = loan_coin {
                service = service.loan_coin(coin);
            }
            if let Some(start) = start {
                service = service.start_time(parse_time_arg(&start, false)?);
            }
            if let Some(end) = end {
                service = service.end_time(parse_time_arg(&end, true)?);
            }
            if let Some(page) = current {
                service = service.current(page);
            }
            if let Some(limit) = limit {
                service = service.limit(limit);
            }

            let res = service.send().await.context("Repay history request failed")?;
            print_json(&res)
        }
        Commands::Collateral {
            order_id,
            collateral_account_id,
        } => {
            let mut service = client.new_vip_loan_collateral_service();
            if let Some(id) = order_id {
                service = service.order_id(id);
            }
            if let Some(id) = collateral_account_id {
                service = service.collateral_account_id(id);
            }

            let res = service.send().await.context("Collateral request failed")?;
            print_json(&res)
        }
        Commands::Loanable {
            loan_coin,
            vip_level,
        } => {
            let mut service = client.new_vip_loan_loanable_service();
            if let Some(coin) = loan_coin {
                service = service.loan_coin(coin);
            }
            if let Some(level) = vip_level {
                service = service.vip_level(level);
            }

            let res = service.send().await.context("Loanable assets request failed")?;
            print_json(&res)
        }
        Commands::Applications { current, limit } => {
            let mut service = client.new_vip_loan_application_service();
            if let Some(page) = current {
                service = service.current(page);
            }
            if let Some(limit) = limit {
                service = service.limit(limit);
            }

            let res = service.send().await.context("Application status request failed")?;
            print_json(&res)
        }
        Commands::CollateralData { collateral_coin } => {
            let mut service = client.new_vip_loan_collateral_data_service();
            if let Some(coin) = collateral_coin {
                service = service.collateral_coin(coin);
            }

            let res = service.send().await.context("Collateral data request failed")?;
            print_json(&res)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{}", rendered);
    Ok(())
}

/// Accepts Unix milliseconds or a `YYYY-MM-DD` UTC date. Dates resolve to the
/// first millisecond of the day, or the last one when `end_of_day` is set.
fn parse_time_arg(value: &str, end_of_day: bool) -> Result<i64> {
    if let Ok(ms) = value.parse::<i64>() {
        return Ok(ms);
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .context("Invalid time of day")?;

    Ok(date.and_time(time).and_utc().timestamp_millis())
}

/// Initialize logging to stderr, plus a daily rolling file when requested.
fn init_logging(log_dir: Option<&str>) -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("binance_vip_loan=info,warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir))?;

            let file_appender = tracing_appender::rolling::daily(dir, "vip-loan.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            // Leak the guard to keep it alive for the program duration
            Box::leak(Box::new(guard));

            builder
                .with_writer(std::io::stderr.and(file_writer))
                .with_ansi(false)
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
