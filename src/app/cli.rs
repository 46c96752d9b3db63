use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::{
    config::Config,
    db::SqliteStore,
    models::Outcome,
    services::{
        FundLookup, SyntheticProvider,
        trade_csv::{export_trades, import_trades},
    },
};

use super::{
    Ledger,
    benchmarks::{BenchmarkSettings, default_fund_name},
    curve::{annualize, generate_curve},
    history::{HistoryPeriod, TOTAL_RETURN_DAYS},
    query::{HoldingSortKey, filter_holdings, filter_watchlist, watch_tags},
    render,
    utils::{parse_date, today},
    validation::{
        validate_alerts, validate_buy, validate_code, validate_sell, validate_total_assets,
    },
};

const DEFAULT_CURVE_DAYS: usize = 30;
/// Rows printed per week of a daily series.
const SERIES_STEP: usize = 7;

#[derive(Debug, Parser)]
#[command(name = "fundfolio")]
#[command(about = "Track fund holdings and compare them against benchmarks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Totals, today's movers and allocation
    Summary,

    /// List holdings
    Holdings {
        /// Only this fund type
        #[arg(long = "type")]
        fund_type: Option<String>,

        /// Match against name or code
        #[arg(long, default_value = "")]
        search: String,

        /// profit, profitRate, todayProfit, buyDate or buyAmount
        #[arg(long, default_value = "profit")]
        sort: HoldingSortKey,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },

    /// Buy AMOUNT worth of a fund at NAV
    Buy {
        code: String,
        amount: String,
        #[arg(default_value = "")]
        nav: String,
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Sell SHARES of a held fund at NAV
    Sell {
        code: String,
        shares: String,
        #[arg(default_value = "")]
        nav: String,
    },

    /// Set the total asset figure cash is measured against
    SetAssets { value: String },

    /// Manage the watchlist
    Watch {
        #[command(subcommand)]
        action: WatchAction,
    },

    /// Replace a holding's notes and tags
    Annotate {
        code: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Show the trade log
    Trades,

    /// Advance simulated prices by one day
    Refresh,

    /// Print a held fund's NAV and return history
    FundHistory {
        code: String,

        /// 1m, 3m, 6m, 1y or all
        #[arg(long, default_value = "1y")]
        period: HistoryPeriod,

        /// Show annualized instead of cumulative returns
        #[arg(long)]
        annualized: bool,

        /// Leave out the CSI 300 comparison
        #[arg(long)]
        no_csi300: bool,
    },

    /// Print a year of earnings for a held fund
    Earnings { code: String },

    /// Print portfolio profit against the CSI 300 and a deposit
    TotalReturns {
        #[arg(long, default_value_t = TOTAL_RETURN_DAYS)]
        days: usize,
    },

    /// Show the last month of data syncs
    SyncHistory {
        /// Show the quotes synced on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Print a benchmark's cumulative return curve
    Curve {
        id: String,
        #[arg(long, default_value_t = DEFAULT_CURVE_DAYS)]
        days: usize,
    },

    /// Manage comparison benchmarks
    Benchmarks {
        #[command(subcommand)]
        action: BenchmarkAction,
    },

    /// Look up a fund profile
    Lookup { code: String },

    /// Write the trade log to a CSV file
    ExportTrades { path: String },

    /// Replay trades from a CSV file
    ImportTrades { path: String },
}

#[derive(Debug, Subcommand)]
pub enum WatchAction {
    List {
        /// Only items carrying one of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Add {
        code: String,
        #[arg(long, default_value = "")]
        name: String,
    },
    Remove {
        code: String,
    },
    /// Replace an item's tags
    Tag {
        code: String,
        tags: Vec<String>,
    },
    /// Set or clear an item's price alerts
    Alert {
        code: String,
        /// Buy when the NAV falls to this level
        #[arg(long)]
        nav_below: Option<String>,
        /// Take note when the gain reaches this percentage
        #[arg(long)]
        gain_above: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum BenchmarkAction {
    List,
    Toggle {
        id: String,
    },
    Add {
        code: String,
        #[arg(long, default_value = "")]
        name: String,
    },
    Remove {
        code: String,
    },
}

fn report(outcome: Outcome, done: &str) {
    match outcome {
        Outcome::Applied => println!("{}", done),
        Outcome::Closed { clamped: false } => println!("{}; position closed", done),
        Outcome::Closed { clamped: true } => {
            println!("{}; sold all owned shares and closed the position", done)
        }
        Outcome::NoOp(reason) => println!("Nothing to do: {}", reason),
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.config;
    let db_path = config.db_path();
    debug!(db = %db_path, "opening store");

    let store = SqliteStore::open(&db_path).await?;

    match cli.command {
        Command::Benchmarks { action } => {
            let mut settings = BenchmarkSettings::load(store).await;
            run_benchmarks(&mut settings, action).await
        }
        Command::Curve { id, days } => {
            let settings = BenchmarkSettings::load(store).await;
            let benchmark = settings
                .find(&id)
                .with_context(|| format!("Unknown benchmark '{}'", id))?;
            let points = generate_curve(&benchmark, days);
            let annualized = points.last().map(|c| annualize(*c, days)).unwrap_or(0.0);
            print!("{}", render::curve(&benchmark, &points, annualized, 5)?);
            Ok(())
        }
        Command::Lookup { code } => {
            let lookup = FundLookup::new(config.lookup_latency());
            let detail = lookup.search(&code, today()).await?;
            print!("{}", render::fund_detail(&detail)?);
            Ok(())
        }
        command => {
            let provider = SyntheticProvider::from_seed(config.seed);
            let mut ledger = Ledger::load(store, provider).await;
            run_ledger(&mut ledger, command).await
        }
    }
}

async fn run_ledger(
    ledger: &mut Ledger<SqliteStore, SyntheticProvider>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Summary => {
            print!("{}", render::summary(&ledger.summary(), &ledger.overview())?);
            println!();
            print!("{}", render::allocation(&ledger.allocation()));
        }
        Command::Holdings {
            fund_type,
            search,
            sort,
            asc,
        } => {
            let matched =
                filter_holdings(ledger.holdings(), fund_type.as_deref(), &search, sort, asc);
            print!("{}", render::holdings(&matched));
        }
        Command::Buy {
            code,
            amount,
            nav,
            name,
        } => {
            let order = validate_buy(&code, &amount, &nav, ledger.cash_available())?;
            let name = match ledger.holding(order.code()) {
                Some(holding) if name.trim().is_empty() => holding.name().to_string(),
                _ if name.trim().is_empty() => default_fund_name(order.code()),
                _ => name.trim().to_string(),
            };
            let outcome = ledger
                .buy(order.code(), &name, *order.amount(), *order.nav())
                .await;
            report(
                outcome,
                &format!("Bought {} of {} at {}", order.amount(), order.code(), order.nav()),
            );
        }
        Command::Sell { code, shares, nav } => {
            let order = validate_sell(&code, &shares, &nav)?;
            let outcome = ledger
                .sell(order.code(), *order.shares(), *order.nav())
                .await;
            report(
                outcome,
                &format!("Sold {} shares of {} at {}", order.shares(), order.code(), order.nav()),
            );
        }
        Command::SetAssets { value } => {
            let value = validate_total_assets(&value)?;
            let outcome = ledger.set_total_assets(value).await;
            report(outcome, &format!("Total assets set to {}", value));
        }
        Command::Watch { action } => match action {
            WatchAction::List { tags } => {
                let items = filter_watchlist(ledger.watchlist(), &tags);
                print!("{}", render::watchlist(&items));
                let all_tags = watch_tags(ledger.watchlist());
                if !all_tags.is_empty() {
                    println!("Tags: {}", all_tags.join(", "));
                }
            }
            WatchAction::Add { code, name } => {
                let code = validate_code(&code)?;
                let outcome = ledger.add_to_watchlist(&code, &name).await;
                report(outcome, &format!("Watching {}", code));
            }
            WatchAction::Remove { code } => {
                let code = validate_code(&code)?;
                let outcome = ledger.remove_from_watchlist(&code).await;
                report(outcome, &format!("Stopped watching {}", code));
            }
            WatchAction::Tag { code, tags } => {
                let code = validate_code(&code)?;
                let outcome = ledger.set_watch_tags(&code, tags).await;
                report(outcome, &format!("Tagged {}", code));
            }
            WatchAction::Alert {
                code,
                nav_below,
                gain_above,
            } => {
                let code = validate_code(&code)?;
                let (nav_below, gain_above) =
                    validate_alerts(nav_below.as_deref(), gain_above.as_deref())?;
                let outcome = ledger.set_watch_alerts(&code, nav_below, gain_above).await;
                report(outcome, &format!("Alerts updated for {}", code));
            }
        },
        Command::Annotate { code, notes, tags } => {
            let code = validate_code(&code)?;
            let outcome = ledger.annotate(&code, &notes, tags).await;
            report(outcome, &format!("Annotated {}", code));
        }
        Command::Trades => print!("{}", render::trades(ledger.trades())),
        Command::FundHistory {
            code,
            period,
            annualized,
            no_csi300,
        } => {
            let code = validate_code(&code)?;
            let points = ledger
                .fund_history(&code, period, annualized)
                .with_context(|| format!("No holding with code '{}'", code))?;
            if let Some(holding) = ledger.holding(&code) {
                print!(
                    "{}",
                    render::fund_history(holding, &points, !no_csi300, SERIES_STEP)
                );
            }
        }
        Command::Earnings { code } => {
            let code = validate_code(&code)?;
            let points = ledger
                .earnings(&code)
                .with_context(|| format!("No holding with code '{}'", code))?;
            if let Some(holding) = ledger.holding(&code) {
                print!("{}", render::earnings(holding, &points, SERIES_STEP));
            }
        }
        Command::TotalReturns { days } => {
            let points = ledger.total_return_history(days);
            print!("{}", render::total_returns(&points, SERIES_STEP)?);
        }
        Command::SyncHistory { date } => {
            let day = date.as_deref().map(parse_date).transpose()?;
            let records = ledger.sync_history();
            let tracked = ledger.holdings().len() + ledger.watchlist().len();
            print!("{}", render::sync_history(&records, day, tracked)?);
        }
        Command::Refresh => {
            let outcome = ledger.refresh_prices().await;
            report(outcome, "Prices refreshed");
        }
        Command::ExportTrades { path } => {
            export_trades(&path, ledger.trades())?;
            println!("Exported {} trades to {}", ledger.trades().len(), path);
        }
        Command::ImportTrades { path } => {
            let applied = import_trades(&path, ledger).await?;
            println!("Imported {} trades from {}", applied, path);
        }
        Command::Benchmarks { .. } | Command::Curve { .. } | Command::Lookup { .. } => {
            bail!("Command does not operate on the ledger")
        }
    }

    Ok(())
}

async fn run_benchmarks(
    settings: &mut BenchmarkSettings<SqliteStore>,
    action: BenchmarkAction,
) -> Result<()> {
    match action {
        BenchmarkAction::List => {
            print!(
                "{}",
                render::benchmarks(&settings.available(), |id| settings.is_selected(id))
            );
        }
        BenchmarkAction::Toggle { id } => {
            if settings.find(&id).is_none() {
                bail!("Unknown benchmark '{}'", id);
            }
            let selected = settings.toggle(&id).await;
            println!("{} {}", id, if selected { "selected" } else { "deselected" });
        }
        BenchmarkAction::Add { code, name } => {
            let benchmark = settings.add_custom(&code, &name).await?;
            println!("Added {} ({})", benchmark.name(), benchmark.id());
        }
        BenchmarkAction::Remove { code } => {
            if settings.remove_custom(&code).await {
                println!("Removed custom fund {}", code.trim());
            } else {
                println!("Nothing to do: no custom fund {}", code.trim());
            }
        }
    }
    Ok(())
}
