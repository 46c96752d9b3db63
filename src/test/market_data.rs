#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::services::{MarketDataProvider, SyntheticProvider};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn seeded_providers_agree() {
        let mut a = SyntheticProvider::seeded(42);
        let mut b = SyntheticProvider::seeded(42);

        assert_eq!(a.next_nav(dec!(1.5)), b.next_nav(dec!(1.5)));
        assert_eq!(
            a.watch_profile("000001", "", today()),
            b.watch_profile("000001", "", today())
        );
    }

    #[test]
    fn new_holding_quote_stays_near_purchase_nav() {
        let mut provider = SyntheticProvider::seeded(3);

        for _ in 0..200 {
            let quote = provider.quote_for_new_holding(dec!(10));
            assert!(quote > dec!(9.7) && quote < dec!(10.3), "quote {}", quote);
        }
    }

    #[test]
    fn daily_move_is_bounded() {
        let mut provider = SyntheticProvider::seeded(5);

        for _ in 0..200 {
            let nav = provider.next_nav(dec!(2));
            assert!(nav > dec!(1.95) && nav < dec!(2.05), "nav {}", nav);
        }
    }

    #[test]
    fn history_has_requested_length() {
        let mut provider = SyntheticProvider::seeded(9);

        let history = provider.nav_history(dec!(1.8), 30);

        assert_eq!(history.len(), 30);
        assert!(history.iter().all(|nav| nav.scale() <= 4));
        // Walks up from 92% of the current NAV.
        assert!(history[0] > dec!(1.63) && history[0] < dec!(1.69), "{}", history[0]);
    }

    #[test]
    fn watch_profile_defaults() {
        let mut provider = SyntheticProvider::seeded(11);

        let item = provider.watch_profile("123456", "  ", today());

        assert_eq!(item.name(), "Fund 123456");
        assert_eq!(item.fund_type(), "Unknown");
        assert_eq!(item.fund_manager(), "Unknown");
        assert_eq!(*item.added_date(), today());
        assert_eq!(item.nav_history().len(), 30);
        assert!(*item.current_nav() >= dec!(1) && *item.current_nav() <= dec!(2));
        assert!(item.max_drawdown() <= -5.0 && item.max_drawdown() >= -45.0);
        assert!(item.tags().is_empty());
    }
}
