//! Plain-text views printed by the command line. Tables are laid out by
//! ratatui into an off-screen buffer, which is then read back as text.

use std::fmt::{self, Write};

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Row, Table, Widget},
};
use rust_decimal::Decimal;

use crate::models::{
    AllocationSegment, Benchmark, DailyReturn, EarningsPoint, FundDetail, FundNavPoint, Holding,
    PortfolioSummary, SyncRecord, TodayOverview, TradeRecord, WatchItem,
};

use super::calc::seven_day_annualized;

const COLUMN_SPACING: u16 = 2;

struct Column {
    title: &'static str,
    numeric: bool,
}

const fn text(title: &'static str) -> Column {
    Column {
        title,
        numeric: false,
    }
}

const fn number(title: &'static str) -> Column {
    Column {
        title,
        numeric: true,
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

fn cell(content: String, numeric: bool) -> Cell<'static> {
    let line = Line::from(content);
    Cell::from(if numeric {
        line.alignment(Alignment::Right)
    } else {
        line
    })
}

/// Reads each buffer row back as a string. Cells hidden behind a wide
/// character are skipped.
fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::new();
            let mut hidden = 0;
            for x in area.left()..area.right() {
                if hidden > 0 {
                    hidden -= 1;
                    continue;
                }
                let symbol = buffer[(x, y)].symbol();
                line.push_str(symbol);
                hidden = Span::raw(symbol).width().saturating_sub(1);
            }
            line.trim_end().to_string()
        })
        .collect()
}

fn draw(table: Table, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    table.render(area, &mut buffer);
    buffer_lines(&buffer)
}

/// Lays `rows` out under `columns`, each column as wide as its widest cell.
/// Rows are drawn in batches small enough for one buffer.
fn table(columns: &[Column], rows: Vec<Vec<String>>) -> String {
    let widths: Vec<u16> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|value| text_width(value))
                .fold(text_width(column.title), u16::max)
        })
        .collect();
    let constraints: Vec<Constraint> = widths.iter().copied().map(Constraint::Length).collect();
    let gaps = u16::try_from(widths.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let width = widths
        .iter()
        .fold(COLUMN_SPACING.saturating_mul(gaps), |acc, w| acc.saturating_add(*w))
        .max(1);

    let header = Row::new(
        columns
            .iter()
            .map(|column| cell(column.title.to_string(), column.numeric)),
    );
    let mut lines = draw(
        Table::new(Vec::<Row>::new(), constraints.clone())
            .header(header)
            .column_spacing(COLUMN_SPACING),
        width,
        1,
    );

    let batch = (usize::from(u16::MAX) / usize::from(width)).max(1);
    let mut rows = rows.into_iter().peekable();
    while rows.peek().is_some() {
        let body: Vec<Row> = rows
            .by_ref()
            .take(batch)
            .map(|values| {
                Row::new(
                    values
                        .into_iter()
                        .zip(columns)
                        .map(|(value, column)| cell(value, column.numeric)),
                )
            })
            .collect();
        let height = u16::try_from(body.len()).unwrap_or(u16::MAX);
        lines.extend(draw(
            Table::new(body, constraints.clone()).column_spacing(COLUMN_SPACING),
            width,
            height,
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn signed(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn signed_pct(value: f64) -> String {
    format!("{:+.2}%", value)
}

fn date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Indices of every `step`th point plus the last one.
fn sampled(len: usize, step: usize) -> impl Iterator<Item = usize> {
    let step = step.max(1);
    (0..len).filter(move |i| i % step == 0 || i + 1 == len)
}

pub fn summary(summary: &PortfolioSummary, overview: &TodayOverview) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Total assets      {:>14.2}", summary.total_assets())?;
    writeln!(out, "Fund value        {:>14.2}", summary.total_fund_value())?;
    writeln!(out, "Cash available    {:>14.2}", summary.cash_available())?;
    writeln!(out, "Monthly profit    {:>14}", signed(*summary.monthly_profit()))?;
    writeln!(out, "Yearly profit     {:>14}", signed(*summary.yearly_profit()))?;
    writeln!(
        out,
        "Today             {:>14} ({:.2}%), yesterday {}",
        signed(*overview.today_profit()),
        overview.today_rate(),
        signed(*overview.yesterday_profit()),
    )?;
    writeln!(
        out,
        "Total profit      {:>14} ({:.2}%) over {} funds",
        signed(*overview.total_profit()),
        overview.total_profit_rate(),
        overview.fund_count(),
    )?;

    for (label, ranked) in [("Best today", overview.top()), ("Worst today", overview.bottom())] {
        let names: Vec<String> = ranked
            .iter()
            .map(|h| format!("{} {}", h.code(), signed(*h.today_profit())))
            .collect();
        writeln!(out, "{:<18}{}", label, names.join(", "))?;
    }
    Ok(out)
}

pub fn allocation(segments: &[AllocationSegment]) -> String {
    let rows = segments
        .iter()
        .map(|s| {
            vec![
                s.label().clone(),
                format!("{:.2}", s.amount()),
                format!("{:.2}%", s.percent()),
            ]
        })
        .collect();
    table(&[text("Segment"), number("Amount"), number("Share")], rows)
}

pub fn holdings(holdings: &[&Holding]) -> String {
    if holdings.is_empty() {
        return String::from("No holdings to display.\n");
    }

    let rows = holdings
        .iter()
        .map(|h| {
            vec![
                h.code().clone(),
                h.name().clone(),
                h.fund_type().clone(),
                format!("{:.2}", h.buy_shares()),
                format!("{:.4}", h.cost_per_share()),
                format!("{:.4}", h.current_nav()),
                format!("{:.2}", h.current_value()),
                signed(*h.profit()),
                format!("{:.2}%", h.profit_rate()),
                signed(*h.today_profit()),
                format!("{:.2}%", seven_day_annualized(h)),
            ]
        })
        .collect();

    table(
        &[
            text("Code"),
            text("Name"),
            text("Type"),
            number("Shares"),
            number("Cost"),
            number("NAV"),
            number("Value"),
            number("Profit"),
            number("Rate"),
            number("Today"),
            number("7d ann."),
        ],
        rows,
    )
}

pub fn watchlist(items: &[&WatchItem]) -> String {
    if items.is_empty() {
        return String::from("Watchlist is empty.\n");
    }

    let rows = items
        .iter()
        .map(|item| {
            vec![
                item.code().clone(),
                item.name().clone(),
                format!("{:.4}", item.current_nav()),
                signed_pct(item.change_1d()),
                signed_pct(*item.change_1m()),
                signed_pct(*item.change_1y()),
                item.risk_level().to_string(),
                item.tags().join(", "),
                item.alert_summary().unwrap_or_default(),
            ]
        })
        .collect();

    table(
        &[
            text("Code"),
            text("Name"),
            number("NAV"),
            number("1d"),
            number("1m"),
            number("1y"),
            text("Risk"),
            text("Tags"),
            text("Alerts"),
        ],
        rows,
    )
}

pub fn trades(trades: &[TradeRecord]) -> String {
    if trades.is_empty() {
        return String::from("No trades recorded.\n");
    }

    let rows = trades
        .iter()
        .map(|trade| {
            vec![
                trade.id().to_string(),
                date(trade.date()),
                trade.trade_type().to_string(),
                trade.fund_code().clone(),
                trade.fund_name().clone(),
                format!("{:.2}", trade.amount()),
                format!("{:.2}", trade.shares()),
                format!("{:.4}", trade.nav()),
            ]
        })
        .collect();

    table(
        &[
            number("Id"),
            text("Date"),
            text("Type"),
            text("Code"),
            text("Name"),
            number("Amount"),
            number("Shares"),
            number("NAV"),
        ],
        rows,
    )
}

pub fn benchmarks(available: &[Benchmark], is_selected: impl Fn(&str) -> bool) -> String {
    let rows = available
        .iter()
        .map(|b| {
            vec![
                String::from(if is_selected(b.id()) { "[x]" } else { "[ ]" }),
                b.id().clone(),
                b.name().clone(),
                b.category().to_string(),
                format!("{:.2}%", b.annual_return() * 100.0),
                format!("{:.2}%", b.volatility() * 100.0),
            ]
        })
        .collect();

    table(
        &[
            text(""),
            text("Id"),
            text("Name"),
            text("Category"),
            number("Return"),
            number("Volatility"),
        ],
        rows,
    )
}

pub fn curve(
    benchmark: &Benchmark,
    points: &[f64],
    annualized: f64,
    step: usize,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} ({})", benchmark.name(), benchmark.id())?;
    for day in sampled(points.len(), step) {
        writeln!(out, "day {:>4}  {}", day + 1, signed_pct(points[day]))?;
    }
    if !points.is_empty() {
        writeln!(out, "annualized {}", signed_pct(annualized))?;
    }
    Ok(out)
}

pub fn fund_history(
    holding: &Holding,
    points: &[FundNavPoint],
    show_csi300: bool,
    step: usize,
) -> String {
    let rows = sampled(points.len(), step)
        .map(|i| &points[i])
        .map(|p| {
            let mut row = vec![
                date(p.date()),
                format!("{:.4}", p.nav()),
                signed_pct(*p.cumulative_return()),
            ];
            if show_csi300 {
                row.push(signed_pct(*p.csi300_return()));
            }
            row
        })
        .collect();

    let mut columns = vec![text("Date"), number("NAV"), number("Return")];
    if show_csi300 {
        columns.push(number("CSI 300"));
    }
    format!("{} ({})\n{}", holding.name(), holding.code(), table(&columns, rows))
}

pub fn earnings(holding: &Holding, points: &[EarningsPoint], step: usize) -> String {
    let rows = sampled(points.len(), step)
        .map(|i| &points[i])
        .map(|p| {
            vec![
                date(p.date()),
                format!("{:+.2}", p.earnings()),
                signed_pct(*p.earnings_rate()),
            ]
        })
        .collect();

    format!(
        "{} ({}), principal {:.2}\n{}",
        holding.name(),
        holding.code(),
        holding.buy_amount(),
        table(&[text("Date"), number("Earnings"), number("Rate")], rows)
    )
}

pub fn total_returns(points: &[DailyReturn], step: usize) -> Result<String, fmt::Error> {
    let rows = sampled(points.len(), step)
        .map(|i| &points[i])
        .map(|p| {
            vec![
                date(p.date()),
                format!("{:+.2}", p.total_profit()),
                signed_pct(*p.total_rate()),
                format!("{:+.2}", p.csi300()),
                format!("{:.2}", p.deposit()),
            ]
        })
        .collect();

    let mut out = table(
        &[
            text("Date"),
            number("Profit"),
            number("Rate"),
            number("CSI 300"),
            number("Deposit"),
        ],
        rows,
    );
    if let Some(last) = points.last() {
        writeln!(
            out,
            "latest {:+.2} ({})",
            last.total_profit(),
            signed_pct(*last.total_rate())
        )?;
    }
    Ok(out)
}

/// The calendar, or the quotes of a single day when `day` is given.
pub fn sync_history(
    records: &[SyncRecord],
    day: Option<NaiveDate>,
    tracked_funds: usize,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    if let Some(day) = day {
        let Some(record) = records.iter().find(|r| *r.date() == day) else {
            writeln!(out, "No sync record for {}.", date(&day))?;
            return Ok(out);
        };
        if !*record.synced() {
            writeln!(out, "{} was not synced.", date(&day))?;
            return Ok(out);
        }
        let rows = record
            .funds()
            .iter()
            .map(|f| {
                vec![
                    f.code().clone(),
                    f.name().clone(),
                    format!("{:.4}", f.nav()),
                    signed_pct(*f.change()),
                ]
            })
            .collect();
        out.push_str(&table(
            &[text("Code"), text("Name"), number("NAV"), number("Change")],
            rows,
        ));
        return Ok(out);
    }

    let rows = records
        .iter()
        .map(|r| {
            vec![
                date(r.date()),
                r.date().format("%a").to_string(),
                String::from(if *r.synced() { "synced" } else { "missing" }),
                r.sync_time().clone().unwrap_or_default(),
                r.funds().len().to_string(),
            ]
        })
        .collect();
    out.push_str(&table(
        &[
            text("Date"),
            text("Day"),
            text("Status"),
            text("Time"),
            number("Funds"),
        ],
        rows,
    ));

    let synced = records.iter().filter(|r| *r.synced()).count();
    writeln!(
        out,
        "{} of {} days synced, {} funds tracked",
        synced,
        records.len(),
        tracked_funds
    )?;
    Ok(out)
}

pub fn fund_detail(detail: &FundDetail) -> Result<String, fmt::Error> {
    let returns = detail.returns();
    let stats = detail.stats();

    let mut out = String::new();
    writeln!(out, "{} {} ({})", detail.code(), detail.name(), detail.fund_type())?;
    writeln!(
        out,
        "NAV {:.4}  manager {}  since {}  risk {}",
        detail.nav(),
        detail.manager(),
        detail.establish_date(),
        detail.risk_level()
    )?;
    writeln!(
        out,
        "1d {}  1w {}  1m {}  3m {}  6m {}  1y {}  ytd {}",
        signed_pct(*returns.change_1d()),
        signed_pct(*returns.change_1w()),
        signed_pct(*returns.change_1m()),
        signed_pct(*returns.change_3m()),
        signed_pct(*returns.change_6m()),
        signed_pct(*returns.change_1y()),
        signed_pct(*returns.change_ytd()),
    )?;
    writeln!(
        out,
        "sharpe {:.2}  max drawdown {:.1}%  size {:.0}  volatility {:.1}%  beta {:.2}  alpha {:.2}",
        stats.sharpe(),
        stats.max_drawdown(),
        stats.fund_size(),
        stats.volatility(),
        stats.beta(),
        stats.alpha(),
    )?;

    let top: Vec<String> = detail
        .top_holdings()
        .iter()
        .map(|h| format!("{} {:.2}%", h.name(), h.percent()))
        .collect();
    writeln!(out, "top holdings: {}", top.join(", "))?;
    writeln!(out, "score {} -> {}", detail.score(), detail.recommendation())?;
    Ok(out)
}
