#[cfg(test)]
mod tests {
    use crate::{
        app::{
            benchmarks::presets,
            curve::{annualize, generate_curve, seed_from_id, seeded_unit},
        },
        models::{Benchmark, BenchmarkCategory},
    };

    fn benchmark(id: &str, annual_return: f64, volatility: f64) -> Benchmark {
        Benchmark::new(
            id.to_string(),
            id.to_uppercase(),
            BenchmarkCategory::Index,
            String::from("hsl(0, 0%, 50%)"),
            None,
            annual_return,
            volatility,
        )
    }

    #[test]
    fn seed_is_char_code_sum() {
        assert_eq!(seed_from_id("ab"), 97 + 98);
        assert_eq!(seed_from_id(""), 0);
    }

    #[test]
    fn seeded_unit_stays_in_range() {
        for i in 0..500 {
            let u = seeded_unit(seed_from_id("csi300"), i);
            assert!((0.0..1.0).contains(&u), "unit {} out of range", u);
        }
    }

    #[test]
    fn same_arguments_same_curve() {
        let b = benchmark("csi500", 0.10, 0.022);

        assert_eq!(generate_curve(&b, 90), generate_curve(&b, 90));
    }

    #[test]
    fn shorter_curve_is_prefix_of_longer() {
        let b = benchmark("gem", 0.14, 0.028);

        let long = generate_curve(&b, 60);
        let short = generate_curve(&b, 20);

        assert_eq!(short.as_slice(), &long[..20]);
    }

    #[test]
    fn zero_volatility_is_straight_line() {
        let b = benchmark("deposit_3y", 0.026, 0.0);
        let daily = 0.026 / 252.0 * 100.0;

        let curve = generate_curve(&b, 30);

        assert_eq!(curve.len(), 30);
        let mut running = 0.0_f64;
        for (i, value) in curve.iter().enumerate() {
            running += daily;
            let expected = (running * 100.0).round() / 100.0;
            assert!((value - expected).abs() < 1e-9, "day {}: {} != {}", i, value, expected);
        }
        assert!(curve.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn negative_return_without_noise_only_falls() {
        let b = benchmark("short", -0.5, 0.0);

        let curve = generate_curve(&b, 40);

        assert!(curve.windows(2).all(|w| w[1] <= w[0]));
        assert!(curve.last().unwrap() < &0.0);
    }

    #[test]
    fn zero_days_is_empty() {
        let b = benchmark("csi300", 0.08, 0.018);

        assert!(generate_curve(&b, 0).is_empty());
    }

    #[test]
    fn same_parameters_different_ids_differ() {
        let a = benchmark("alpha", 0.08, 0.02);
        let b = benchmark("omega", 0.08, 0.02);

        assert_ne!(generate_curve(&a, 30), generate_curve(&b, 30));
    }

    #[test]
    fn values_have_two_decimals() {
        let b = benchmark("nasdaq", 0.16, 0.020);

        for value in generate_curve(&b, 120) {
            assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn every_preset_renders() {
        for b in presets() {
            assert_eq!(generate_curve(&b, 10).len(), 10, "{}", b.id());
        }
    }

    #[test]
    fn annualize_scales_by_period() {
        assert_eq!(annualize(0.0, 30), 0.0);
        assert_eq!(annualize(10.0, 365), 10.0);
        assert!(annualize(1.0, 30) > 12.0);
        assert_eq!(annualize(5.0, 0), annualize(5.0, 1));
    }

    #[test]
    fn annualize_total_loss_is_minus_hundred() {
        assert_eq!(annualize(-100.0, 30), -100.0);
        assert_eq!(annualize(-140.0, 90), -100.0);
        assert!(annualize(-99.0, 365).is_finite());
    }
}
