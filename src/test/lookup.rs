#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;

    use crate::{
        app::validation::ValidationError,
        models::{PeriodReturns, Recommendation, RiskStats},
        services::{
            FundLookup,
            fund_lookup::{fund_detail, score},
        },
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn detail_is_deterministic() {
        assert_eq!(fund_detail("110011", today()), fund_detail("110011", today()));
        assert_ne!(
            fund_detail("110011", today()).nav(),
            fund_detail("161725", today()).nav()
        );
    }

    #[test]
    fn known_codes_use_real_names() {
        assert_eq!(
            fund_detail("320007", today()).name(),
            "Lion Growth Hybrid"
        );
        assert_eq!(fund_detail("999999", today()).name(), "Fund 999999");
    }

    #[test]
    fn detail_shape() {
        let detail = fund_detail("519674", today());

        assert_eq!(detail.nav_history().len(), 60);
        assert_eq!(*detail.nav_history().last().unwrap().date(), today());
        assert!(
            detail
                .nav_history()
                .windows(2)
                .all(|w| w[0].date() < w[1].date())
        );
        assert_eq!(detail.top_holdings().len(), 5);
        assert!(*detail.score() <= 100);
        assert!(*detail.stats().max_drawdown() < 0.0);
    }

    #[test]
    fn score_maps_to_recommendation() {
        let returns = PeriodReturns::new(0.5, 1.0, 2.0, 3.0, 8.0, 12.0, 4.0);
        let strong = RiskStats::new(1.8, -12.0, 120.0, 15.0, 1.0, 2.0, 0.5, 3.0);
        let weak = RiskStats::new(0.2, -40.0, 20.0, 30.0, 1.2, -3.0, -0.2, 9.0);

        // 1.8 * 20 + 15 + 10 + 5
        assert!((score(&returns, &strong) - 66.0).abs() < 1e-9);
        assert_eq!(
            Recommendation::from_score(score(&returns, &strong)),
            Recommendation::Buy
        );
        // 0.2 * 20 + 15 - 5 + 0
        assert_eq!(
            Recommendation::from_score(score(&returns, &weak)),
            Recommendation::Cautious
        );
        assert_eq!(Recommendation::from_score(31.0), Recommendation::Watch);
        assert_eq!(Recommendation::from_score(10.0), Recommendation::Avoid);
    }

    #[tokio::test]
    async fn search_validates_code() {
        let lookup = FundLookup::new(Duration::ZERO);

        assert_eq!(
            lookup.search("12", today()).await,
            Err(ValidationError::CodeTooShort(4))
        );

        let detail = lookup.search(" 110011 ", today()).await.unwrap();
        assert_eq!(detail.code(), "110011");
    }
}
