#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{Datelike, NaiveDate, Weekday};
    use rust_decimal_macros::dec;

    use crate::{
        app::{
            defaults,
            history::{self, HistoryPeriod},
        },
        models::{FundNavPoint, Holding, SyncedFund},
        services::{MarketDataProvider, SyntheticProvider},
    };

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn quote(code: &str) -> SyncedFund {
        SyncedFund::new(code.to_string(), String::from("Fund"), 1.5, 0.0)
    }

    #[test]
    fn periods_parse_from_short_names() {
        assert_eq!(HistoryPeriod::from_str("1m").unwrap(), HistoryPeriod::OneMonth);
        assert_eq!(HistoryPeriod::from_str("all").unwrap(), HistoryPeriod::SinceInception);
        assert!(HistoryPeriod::from_str("2w").is_err());
        assert_eq!(HistoryPeriod::default().days(), 365);
        assert_eq!(HistoryPeriod::ThreeMonths.days(), 90);
        assert_eq!(HistoryPeriod::SixMonths.to_string(), "6m");
    }

    #[test]
    fn series_ends_the_day_before_today() {
        let start = history::series_start(day(14), 30);

        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 2, 12).unwrap());
        let last = start.iter_days().take(30).last().unwrap();
        assert_eq!(last, day(13));
    }

    #[test]
    fn annualized_rescales_both_returns() {
        let points = vec![FundNavPoint::new(day(1), 1.1, 10.0, -5.0)];

        let out = history::annualized(points, 365);

        assert_eq!(*out[0].nav(), 1.1);
        assert_eq!(*out[0].cumulative_return(), 10.0);
        assert_eq!(*out[0].csi300_return(), -5.0);

        let doubled = history::annualized(vec![FundNavPoint::new(day(1), 1.1, 10.0, 0.0)], 730);
        assert!(*doubled[0].cumulative_return() < 5.0);
    }

    #[test]
    fn earnings_follow_the_principal() {
        let holding = Holding::open(
            "AAA",
            "Alpha",
            dec!(20000),
            dec!(10000),
            dec!(2),
            dec!(2),
            day(1),
        );
        let points = vec![
            FundNavPoint::new(day(1), 1.0, 0.0, 0.0),
            FundNavPoint::new(day(2), 1.0125, 1.25, 0.3),
            FundNavPoint::new(day(3), 0.99, -1.0, 0.1),
        ];

        let earnings = history::earnings(&holding, &points);

        assert_eq!(earnings.len(), 3);
        assert_eq!(*earnings[1].earnings(), 250.0);
        assert_eq!(*earnings[1].earnings_rate(), 1.25);
        assert_eq!(*earnings[2].earnings(), -200.0);
        assert_eq!(*earnings[2].date(), day(3));
    }

    #[test]
    fn quotes_list_holdings_before_watched_funds() {
        let holdings = defaults::holdings();
        let watchlist = defaults::watchlist();

        let quotes = history::current_quotes(&holdings, &watchlist);

        assert_eq!(quotes.len(), holdings.len() + watchlist.len());
        assert_eq!(quotes[0].code(), holdings[0].code());
        assert_eq!(quotes[holdings.len()].code(), watchlist[0].code());
        assert_eq!(quotes[holdings.len()].change(), &watchlist[0].change_1d());
    }

    #[test]
    fn fund_history_is_daily_from_start() {
        let mut provider = SyntheticProvider::seeded(11);

        let points = provider.fund_history(day(1), 90);

        assert_eq!(points.len(), 90);
        assert_eq!(*points[0].date(), day(1));
        assert_eq!(*points[89].date(), NaiveDate::from_ymd_opt(2025, 5, 29).unwrap());
        for p in &points {
            assert!(*p.nav() > 0.0);
            let implied = (p.nav() - 1.0) * 100.0;
            assert!((implied - p.cumulative_return()).abs() < 0.02, "{:?}", p);
        }
    }

    #[test]
    fn total_returns_track_a_deposit_of_the_principal() {
        let mut provider = SyntheticProvider::seeded(5);

        let points = provider.total_return_history(day(1), 20, 73000.0);

        assert_eq!(points.len(), 20);
        assert_eq!(*points[0].deposit(), 0.0);
        assert_eq!(*points[2].deposit(), 10.0);
        for p in &points {
            let implied = p.total_profit() / 73000.0 * 100.0;
            assert!((implied - p.total_rate()).abs() < 0.01, "{:?}", p);
        }

        let empty = provider.total_return_history(day(1), 5, 0.0);
        assert!(empty.iter().all(|p| *p.total_rate() == 0.0));
    }

    #[test]
    fn sync_calendar_skips_weekends_and_today() {
        let mut provider = SyntheticProvider::seeded(9);
        let funds = vec![quote("AAA"), quote("BBB")];

        let records = provider.sync_history(day(14), 30, &funds);

        assert_eq!(records.len(), 30);
        assert_eq!(*records[0].date(), NaiveDate::from_ymd_opt(2025, 2, 13).unwrap());
        assert_eq!(*records[29].date(), day(14));
        assert!(!*records[29].synced());
        for record in &records {
            if matches!(record.date().weekday(), Weekday::Sat | Weekday::Sun) {
                assert!(!*record.synced(), "{}", record.date());
            }
            if *record.synced() {
                assert!(record.sync_time().is_some());
                assert_eq!(record.funds().len(), 2);
                assert_eq!(record.funds()[1].code(), "BBB");
            } else {
                assert!(record.sync_time().is_none());
                assert!(record.funds().is_empty());
            }
        }
        assert!(records.iter().any(|r| *r.synced()));
    }

    #[test]
    fn seeded_series_repeat() {
        let mut a = SyntheticProvider::seeded(21);
        let mut b = SyntheticProvider::seeded(21);

        assert_eq!(a.fund_history(day(1), 30), b.fund_history(day(1), 30));
        assert_eq!(
            a.sync_history(day(14), 30, &[quote("AAA")]),
            b.sync_history(day(14), 30, &[quote("AAA")])
        );
    }
}
