//! Unit tests for sv-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DomainId, ObjectId, OverlayId};

    #[test]
    fn index_roundtrip() {
        let id = ObjectId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ObjectId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(ObjectId(0) < ObjectId(1));
        assert!(DomainId(100) > DomainId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(ObjectId::INVALID.0, u32::MAX);
        assert_eq!(DomainId::INVALID.0, u32::MAX);
        assert_eq!(OverlayId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(DomainId(7).to_string(), "DomainId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_advance_and_reset() {
        let mut clock = SimClock::new(1.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.elapsed_secs(), 2.0);
        clock.reset();
        assert_eq!(clock.current_tick, Tick::ZERO);
    }
}

#[cfg(test)]
mod config {
    use crate::{GroupSizeDistribution, SimConfig, TransitionRowDistribution};

    fn base_config() -> SimConfig {
        SimConfig {
            time_limit: 100,
            time_step: 1.0,
            domain_size: 6,
            min_weight: 1,
            max_weight: 100,
            objects_count: 3,
            object_speed_exp: 1.0,
            object_speed_sigma: 0.5,
            moving_degree: 0.5,
            max_await: 10,
            min_transition_group_size: 2,
            transition_group_distribution: GroupSizeDistribution::Plain,
            transition_probabilities_distribution: TransitionRowDistribution::Plain,
            alpha: 1.0,
            surveillance_target_count: 1,
            seed: 42,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn alpha_out_of_range_rejected() {
        let mut cfg = base_config();
        cfg.alpha = 0.0;
        assert!(cfg.validate().is_err());
        cfg.alpha = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn group_size_exceeding_domains_rejected() {
        let mut cfg = base_config();
        cfg.min_transition_group_size = 7; // > domain_size
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn target_count_exceeding_objects_rejected() {
        let mut cfg = base_config();
        cfg.surveillance_target_count = 4; // > objects_count
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn moving_degree_range_enforced() {
        let mut cfg = base_config();
        cfg.moving_degree = 1.01;
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{ObjectId, ObjectRng, SimRng};

    #[test]
    fn object_rngs_are_deterministic() {
        let mut a = ObjectRng::new(7, ObjectId(3));
        let mut b = ObjectRng::new(7, ObjectId(3));
        for _ in 0..10 {
            assert_eq!(a.gen_range(0..1000), b.gen_range(0..1000));
        }
    }

    #[test]
    fn distinct_objects_get_distinct_streams() {
        let mut a = ObjectRng::new(7, ObjectId(0));
        let mut b = ObjectRng::new(7, ObjectId(1));
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..u32::MAX)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..u32::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn unit_draws_stay_in_range() {
        let mut rng = ObjectRng::new(1, ObjectId(0));
        for _ in 0..100 {
            let u = rng.gen_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn sim_rng_children_diverge() {
        let mut root = SimRng::new(42);
        let mut c1 = root.child(1);
        let mut c2 = root.child(2);
        let a: u64 = c1.gen_range(0..u64::MAX);
        let b: u64 = c2.gen_range(0..u64::MAX);
        assert_ne!(a, b);
    }
}
