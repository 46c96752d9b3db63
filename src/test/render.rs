#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::text::Span;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        app::{defaults, render},
        models::{Holding, SyncRecord, SyncedFund, TradeRecord, TradeType},
    };

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn holding(code: &str, name: &str, fund_type: &str, shares: Decimal) -> Holding {
        Holding::new(
            code.to_string(),
            name.to_string(),
            fund_type.to_string(),
            day(3),
            shares * dec!(2),
            shares,
            dec!(2),
            dec!(2.5),
            shares * dec!(2.5),
            shares * dec!(0.5),
            dec!(25),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            String::new(),
            Vec::new(),
        )
    }

    fn width(text: &str) -> usize {
        Span::raw(text).width()
    }

    #[test]
    fn long_names_keep_columns_aligned() {
        let long_name = "E Fund Blue Chip Selected Mixed Securities Investment Fund";
        let a = holding("005827", long_name, "Hybrid", dec!(1234.5));
        let b = holding("AAA", "Alpha", "Index", dec!(7));

        let out = render::holdings(&[&a, &b]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(long_name));
        let type_col = lines[0].find("Type").unwrap();
        assert_eq!(lines[1].find("Hybrid").unwrap(), type_col);
        assert_eq!(lines[2].find("Index").unwrap(), type_col);

        // Numbers are right-aligned under their header.
        let shares_end = lines[0].find("Shares").unwrap() + "Shares".len();
        assert_eq!(lines[1].find("1234.50").unwrap() + "1234.50".len(), shares_end);
        assert_eq!(lines[2].find("7.00").unwrap() + "7.00".len(), shares_end);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        let a = holding("320007", "诺安成长混合", "Hybrid", dec!(10));
        let b = holding("AAA", "Alpha", "Index", dec!(10));

        let out = render::holdings(&[&a, &b]);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[1].contains("诺安成长混合"));
        let type_col = width(&lines[0][..lines[0].find("Type").unwrap()]);
        let hybrid_at = lines[1].find("Hybrid").unwrap();
        assert_eq!(width(&lines[1][..hybrid_at]), type_col);
    }

    #[test]
    fn watchlist_shows_alerts() {
        let items = defaults::watchlist();
        let refs: Vec<_> = items.iter().collect();

        let out = render::watchlist(&refs);

        assert!(out.lines().next().unwrap().ends_with("Alerts"));
        let lion = out.lines().find(|l| l.starts_with("320007")).unwrap();
        assert!(lion.ends_with("<= 1.70 buy, >= 8% watch"), "{}", lion);
    }

    #[test]
    fn long_trade_logs_render_every_row() {
        let trades: Vec<TradeRecord> = (1..=2000)
            .map(|id| {
                TradeRecord::new(
                    id,
                    String::from("AAA"),
                    String::from("Alpha"),
                    TradeType::Buy,
                    dec!(100),
                    dec!(10),
                    dec!(10),
                    day(3),
                )
            })
            .collect();

        let out = render::trades(&trades);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2001);
        assert!(lines[1].starts_with("   1  2025-03-03"), "{}", lines[1]);
        assert!(lines[2000].starts_with("2000  2025-03-03"), "{}", lines[2000]);
    }

    #[test]
    fn empty_views_say_so() {
        assert_eq!(render::trades(&[]), "No trades recorded.\n");
        assert_eq!(render::holdings(&[]), "No holdings to display.\n");
    }

    #[test]
    fn sync_history_lists_days_or_one_day() {
        let records = vec![
            SyncRecord::new(
                day(13),
                true,
                Some(String::from("9:05")),
                vec![SyncedFund::new(
                    String::from("AAA"),
                    String::from("Alpha"),
                    1.2345,
                    0.5,
                )],
            ),
            SyncRecord::new(day(14), false, None, Vec::new()),
        ];

        let calendar = render::sync_history(&records, None, 1).unwrap();
        assert!(calendar.contains("2025-03-13  Thu  synced   9:05"), "{}", calendar);
        assert!(calendar.contains("1 of 2 days synced, 1 funds tracked"));

        let detail = render::sync_history(&records, Some(day(13)), 1).unwrap();
        assert!(detail.contains("AAA   Alpha  1.2345  +0.50%"), "{}", detail);

        let missing = render::sync_history(&records, Some(day(14)), 1).unwrap();
        assert_eq!(missing, "2025-03-14 was not synced.\n");
    }
}
