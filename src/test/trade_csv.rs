#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    use crate::{
        app::Ledger,
        db::{MemoryStore, keys, utils::save_json},
        models::{Holding, TradeType},
        services::trade_csv::{export_trades, import_trades},
        test::PinnedProvider,
    };

    async fn empty_ledger() -> Ledger<MemoryStore, PinnedProvider> {
        let store = MemoryStore::new();
        save_json(&store, keys::HOLDINGS, &Vec::<Holding>::new())
            .await
            .unwrap();
        Ledger::load(store, PinnedProvider::new(dec!(0))).await
    }

    #[tokio::test]
    async fn import_replays_rows_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            "date,type,fund_code,fund_name,amount_or_shares,nav\n\
             2025-01-02,buy,AAA,Alpha,1000,10\n\
             2025-01-03,Buy,AAA,Alpha,500,10\n\
             2025-01-04,dividend,AAA,Alpha,12,1\n\
             2025-01-05,sell,AAA,Alpha,150,12\n\
             2025-01-06,sell,ZZZ,Nobody,5,1\n",
        )
        .unwrap();

        let mut ledger = empty_ledger().await;
        let applied = import_trades(path.to_str().unwrap(), &mut ledger).await.unwrap();

        assert_eq!(applied, 3);
        assert!(ledger.holding("AAA").is_none());
        let trades = ledger.trades();
        assert_eq!(trades.len(), 3);
        assert_eq!(*trades[0].date(), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(*trades[2].trade_type(), TradeType::Sell);
        assert_eq!(*trades[2].amount(), dec!(1800));
    }

    #[tokio::test]
    async fn import_reports_bad_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            "date,type,fund_code,fund_name,amount_or_shares,nav\n\
             2025-01-02,buy,AAA,Alpha,1000,10\n\
             2025-01-03,buy,AAA,Alpha,lots,10\n",
        )
        .unwrap();

        let mut ledger = empty_ledger().await;
        let err = import_trades(path.to_str().unwrap(), &mut ledger)
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("row 2"), "{:#}", err);
        assert_eq!(ledger.trades().len(), 1);
    }

    #[tokio::test]
    async fn import_skips_negative_quantities() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            "date,type,fund_code,fund_name,amount_or_shares,nav\n\
             2025-01-02,buy,AAA,Alpha,-1000,10\n\
             2025-01-03,buy,BBB,Beta,1000,10\n\
             2025-01-04,sell,BBB,Beta,-50,10\n\
             2025-01-05,sell,BBB,Beta,20,0\n",
        )
        .unwrap();

        let mut ledger = empty_ledger().await;
        let applied = import_trades(path.to_str().unwrap(), &mut ledger).await.unwrap();

        assert_eq!(applied, 1);
        assert!(ledger.holding("AAA").is_none());
        let beta = ledger.holding("BBB").unwrap();
        assert_eq!(*beta.buy_shares(), dec!(100));
        assert_eq!(*beta.buy_amount(), dec!(1000));
        assert_eq!(ledger.trades().len(), 1);
        assert!(ledger.holdings().iter().all(|h| *h.buy_shares() > Decimal::ZERO));
    }

    #[tokio::test]
    async fn import_skips_rows_that_overflow() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            "date,type,fund_code,fund_name,amount_or_shares,nav\n\
             2025-01-02,buy,AAA,Alpha,1000,0.0000000000000000000000000001\n",
        )
        .unwrap();

        let mut ledger = empty_ledger().await;
        let applied = import_trades(path.to_str().unwrap(), &mut ledger).await.unwrap();

        assert_eq!(applied, 0);
        assert!(ledger.trades().is_empty());
    }

    #[tokio::test]
    async fn import_of_missing_file_fails() {
        let mut ledger = empty_ledger().await;

        assert!(import_trades("/nonexistent/trades.csv", &mut ledger).await.is_err());
    }

    #[tokio::test]
    async fn export_writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let path = path.to_str().unwrap();

        let mut ledger = empty_ledger().await;
        ledger.buy("AAA", "Alpha, Inc", dec!(1000), dec!(10)).await;
        ledger.sell("AAA", dec!(40), dec!(12)).await;
        export_trades(path, ledger.trades()).unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["id", "date", "fund_code", "fund_name", "type", "amount", "shares", "nav"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "Alpha, Inc");
        assert_eq!(&rows[0][4], "buy");
        assert_eq!(&rows[1][4], "sell");
        assert_eq!(rows[1][5].parse::<rust_decimal::Decimal>().unwrap(), dec!(480));
    }
}
