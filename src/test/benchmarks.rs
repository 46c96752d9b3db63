#[cfg(test)]
mod tests {
    use crate::{
        app::{
            BenchmarkSettings,
            benchmarks::{CUSTOM_PREFIX, custom_benchmark, presets},
            validation::ValidationError,
        },
        db::{MemoryStore, keys, utils::save_json},
        models::{BenchmarkCategory, BenchmarkConfig},
    };

    #[test]
    fn presets_are_unique() {
        let all = presets();
        let mut ids: Vec<&str> = all.iter().map(|b| b.id().as_str()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(all.len(), 14);
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn deposits_have_no_noise() {
        for b in presets().iter().filter(|b| b.id().starts_with("deposit_")) {
            assert_eq!(*b.volatility(), 0.0);
            assert_eq!(b.dash_array().as_deref(), Some("6 3"));
        }
    }

    #[test]
    fn custom_benchmark_is_deterministic() {
        let a = custom_benchmark("110011", "", 0);
        let b = custom_benchmark("110011", "", 0);

        assert_eq!(a, b);
        assert_eq!(a.id(), "custom_110011");
        assert_eq!(a.name(), "Fund 110011");
        assert_eq!(*a.category(), BenchmarkCategory::Custom);
        assert!((0.05..0.20).contains(a.annual_return()));
        assert!((0.010..0.030).contains(a.volatility()));
    }

    #[test]
    fn custom_colors_cycle() {
        assert_eq!(
            custom_benchmark("1", "x", 1).color(),
            custom_benchmark("2", "y", 7).color()
        );
        assert_ne!(
            custom_benchmark("1", "x", 0).color(),
            custom_benchmark("1", "x", 1).color()
        );
    }

    #[tokio::test]
    async fn default_selection() {
        let settings = BenchmarkSettings::load(MemoryStore::new()).await;

        assert_eq!(settings.config(), &BenchmarkConfig::default());
        let selected: Vec<String> = settings.selected().iter().map(|b| b.id().clone()).collect();
        assert_eq!(selected, vec![String::from("csi300")]);
    }

    #[tokio::test]
    async fn toggle_flips_and_persists() {
        let store = MemoryStore::new();
        let mut settings = BenchmarkSettings::load(store.clone()).await;

        assert!(settings.toggle("gold").await);
        assert!(!settings.toggle("csi300").await);

        let reloaded = BenchmarkSettings::load(store).await;
        assert_eq!(reloaded.config().selected_ids, vec![String::from("gold")]);
    }

    #[tokio::test]
    async fn custom_funds_are_added_and_removed() {
        let store = MemoryStore::new();
        let mut settings = BenchmarkSettings::load(store.clone()).await;

        let added = settings.add_custom(" 005827 ", "Blue Chip").await.unwrap();
        assert_eq!(added.id(), &format!("{}005827", CUSTOM_PREFIX));
        assert!(settings.is_selected(added.id()));
        assert_eq!(settings.available().len(), 15);

        assert_eq!(
            settings.add_custom("005827", "again").await,
            Err(ValidationError::DuplicateCustomFund(String::from("005827")))
        );
        assert_eq!(
            settings.add_custom("  ", "").await,
            Err(ValidationError::EmptyCode)
        );

        assert!(settings.remove_custom("005827").await);
        assert!(!settings.remove_custom("005827").await);
        assert!(!settings.is_selected(added.id()));

        let reloaded = BenchmarkSettings::load(store).await;
        assert!(reloaded.config().custom_funds.is_empty());
    }

    #[tokio::test]
    async fn unknown_selected_ids_are_skipped() {
        let store = MemoryStore::new();
        let config = BenchmarkConfig {
            selected_ids: vec![String::from("gone"), String::from("sp500")],
            custom_funds: Vec::new(),
        };
        save_json(&store, keys::BENCHMARK_CONFIG, &config).await.unwrap();

        let settings = BenchmarkSettings::load(store).await;

        let selected: Vec<String> = settings.selected().iter().map(|b| b.id().clone()).collect();
        assert_eq!(selected, vec![String::from("sp500")]);
    }
}
