#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::num::NonZero;

    use crate::builder::{BuilderInvalidReason, ConfigurationBuilder};
    use crate::color::Palette;
    use crate::configuration::Configuration;
    use crate::estimate::{Estimate, Tally};
    use crate::pour::Pour;
    use crate::search::{SearchError, SearchOptions, Solution};
    use crate::vial::Vial;

    fn build(max_height: usize, vials: Vec<Vec<u8>>) -> Configuration {
        let mut builder = ConfigurationBuilder::with_dims(NonZero::new(vials.len()).unwrap(), NonZero::new(max_height).unwrap());
        for (slot, vial) in vials.into_iter().enumerate() {
            builder.set_vial(slot, vial);
        }
        builder.build().unwrap()
    }

    fn hash_of(configuration: &Configuration) -> u64 {
        let mut hasher = DefaultHasher::new();
        configuration.hash(&mut hasher);
        hasher.finish()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn add_vial_fills_first_empty_slot() {
        let start = ConfigurationBuilder::with_dims(NonZero::new(3).unwrap(), NonZero::new(2).unwrap())
            .add_vial([Palette::Red, Palette::Gray])
            .add_vial(Vec::<u8>::new())
            .add_vial([Palette::Gray])
            .build()
            .unwrap();

        assert_eq!(format!("{}", start), "11 2
2
.
");
        assert_eq!(start.vial(1), Some(&Vial::from([2u8])));
        assert_eq!(start.last_pour(), None);
    }

    #[test]
    fn pop_vial() {
        let start = ConfigurationBuilder::with_dims(NonZero::new(2).unwrap(), NonZero::new(2).unwrap())
            .add_vial([1u8, 1])
            .add_vial([2u8])
            .pop_vial()
            .build()
            .unwrap();

        assert_eq!(format!("{}", start), "1 1
.
");
    }

    #[test]
    fn pop_vial_keeps_overwritten_slot() {
        let start = ConfigurationBuilder::with_dims(NonZero::new(2).unwrap(), NonZero::new(2).unwrap())
            .add_vial([1u8])
            .set_vial(0, [2u8, 2])
            .pop_vial()
            .build()
            .unwrap();

        assert_eq!(format!("{}", start), "2 2
.
");
    }

    #[test]
    fn pop_vial_skips_overwritten_slot() {
        let start = ConfigurationBuilder::with_dims(NonZero::new(3).unwrap(), NonZero::new(2).unwrap())
            .add_vial([1u8])
            .add_vial([2u8])
            .set_vial(1, [3u8, 3])
            .pop_vial()
            .build()
            .unwrap();

        assert_eq!(format!("{}", start), ".
3 3
.
");
    }

    #[test]
    fn vial_too_tall() {
        let mut builder = ConfigurationBuilder::with_dims(NonZero::new(2).unwrap(), NonZero::new(2).unwrap());
        builder.add_vial([1u8, 1, 1]);

        assert_eq!(builder.build().unwrap_err(), &vec![BuilderInvalidReason::VialTooTall { slot: 0, len: 3, max_height: 2 }]);
    }

    #[test]
    fn invalid_builder_ignores_further_calls() {
        let mut builder = ConfigurationBuilder::with_dims(NonZero::new(2).unwrap(), NonZero::new(2).unwrap());
        builder.set_vial(5, [1u8])
            .add_vial([1u8, 1, 1])
            .add_vial([2u8]);

        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::SlotOutOfBounds { slot: 5, vial_count: 2 }]));
    }

    #[test]
    fn no_empty_slot() {
        let mut builder = ConfigurationBuilder::with_dims(NonZero::new(1).unwrap(), NonZero::new(2).unwrap());
        builder.add_vial([1u8]).add_vial([2u8]);

        assert_eq!(builder.build().unwrap_err(), &vec![BuilderInvalidReason::NoEmptySlot]);
    }

    #[test]
    fn can_pour_boundaries() {
        let start = build(2, vec![vec![1, 2], vec![2], vec![1, 1], vec![]]);

        for slot in 0..4 {
            assert!(!start.can_pour(slot, slot));
        }
        // empty source
        assert!(!start.can_pour(3, 0));
        // empty destination
        assert!(start.can_pour(0, 3));
        assert!(start.can_pour(2, 3));
        // matching top with room
        assert!(start.can_pour(0, 1));
        // matching top, destination full
        assert!(!start.can_pour(1, 0));
        // mismatched tops
        assert!(!start.can_pour(0, 2));
        assert!(!start.can_pour(9, 3));
        assert!(!start.can_pour(0, 9));
    }

    #[test]
    fn pour_moves_whole_run() {
        let start = build(4, vec![vec![1, 2, 2], vec![2], vec![]]);
        let poured = start.apply_pour(0, 1).unwrap();

        assert_eq!(format!("{}", poured), "1
2 2 2
.
");
        assert_eq!(poured.last_pour(), Some(Pour::new(0, 1)));
        assert_eq!(poured.unit_count(), start.unit_count());
        // the parent is untouched
        assert_eq!(start.vial(0), Some(&Vial::from([1u8, 2, 2])));
    }

    #[test]
    fn pour_stops_when_destination_fills() {
        let start = build(3, vec![vec![2, 2, 2], vec![1, 2]]);
        let poured = start.apply_pour(0, 1).unwrap();

        assert_eq!(format!("{}", poured), "2 2
1 2 2
");
        assert!(start.apply_pour(1, 0).is_none());
    }

    #[test]
    fn equality_ignores_slots() {
        let a = build(2, vec![vec![1, 2], vec![], vec![2, 1]]);
        let b = build(2, vec![vec![], vec![2, 1], vec![1, 2]]);
        let c = build(2, vec![vec![1, 2], vec![2], vec![1]]);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
        // pour metadata is not part of identity
        assert_eq!(b.apply_pour(1, 0).unwrap(), a.apply_pour(2, 1).unwrap());
    }

    #[test]
    fn successors_are_distinct() {
        let start = build(2, vec![vec![1], vec![1], vec![]]);
        let successors = start.successors();

        // 0 -> 2 and 1 -> 2 only shuffle slots and 1 -> 0 repeats 0 -> 1
        assert_eq!(successors.len(), 1);
        assert_eq!(successors[0].last_pour(), Some(Pour::new(0, 1)));
        assert_eq!(format!("{}", successors[0]), ".
1 1
.
");
    }

    #[test]
    fn tallies_with_full_vials() {
        let start = build(2, vec![vec![1, 2], vec![2, 1], vec![]]);

        assert_eq!(start.tally(Tally::PerVial), Estimate { breaks: 2, unsettled: 0, empties: 1 });
        assert_close(start.estimate(Tally::PerVial), 4.0 / 3.0);
        // an empty vial is never seen by the per-pair tally
        assert_eq!(start.tally(Tally::PerPair), Estimate { breaks: 2, unsettled: 0, empties: 0 });
        assert_close(start.estimate(Tally::PerPair), 2.0);
    }

    #[test]
    fn per_pair_tally_counts_unsettled_per_pair() {
        let start = build(4, vec![vec![1, 1, 2], vec![]]);

        assert_eq!(start.tally(Tally::PerPair), Estimate { breaks: 1, unsettled: 2, empties: 0 });
        assert_close(start.estimate(Tally::PerPair), 3.0);
        assert_eq!(start.tally(Tally::PerVial), Estimate { breaks: 1, unsettled: 1, empties: 1 });
        assert_close(start.estimate(Tally::PerVial), 4.0 / 3.0);
    }

    #[test]
    fn singleton_vials_depend_on_tally() {
        let start = build(2, vec![vec![1], vec![1], vec![]]);

        // a lone unit is invisible to the per-pair tally, so this counts as solved
        assert!(start.is_solved(Tally::PerPair));
        assert_close(start.estimate(Tally::PerPair), 0.0);
        assert!(!start.is_solved(Tally::PerVial));
        assert_close(start.estimate(Tally::PerVial), 4.0 / 3.0);

        let per_pair = start.solve_with(SearchOptions::default().with_tally(Tally::PerPair)).unwrap();
        assert!(per_pair.moves.is_empty());

        let per_vial = start.solve_with(SearchOptions::default().with_tally(Tally::PerVial)).unwrap();
        assert_eq!(per_vial.moves, vec![Pour::new(0, 1)]);
    }

    #[test]
    fn solved_configuration() {
        let start = build(2, vec![vec![3, 3], vec![], vec![4, 4]]);

        for tally in [Tally::PerVial, Tally::PerPair] {
            assert!(start.is_solved(tally));
            assert_close(start.estimate(tally), 0.0);
        }
    }

    #[test]
    fn already_solved_gives_no_moves() {
        let start = build(2, vec![vec![7, 7], vec![]]);
        let solution = start.solve().unwrap();

        assert!(solution.moves.is_empty());
        assert_eq!(solution.explored, 1);
        assert_eq!(solution.generated, 0);
    }

    #[test]
    fn solve_small() {
        let start = build(2, vec![vec![1, 2], vec![2, 1], vec![]]);
        let solution = start.solve().unwrap();

        assert!(solution.moves.len() >= 3);
        let end = solution.replay(&start).unwrap();
        assert!(end.is_solved(Tally::PerVial));
        assert_eq!(end.unit_count(), start.unit_count());
    }

    #[test]
    fn solve_three_colors() {
        let start = ConfigurationBuilder::with_dims(NonZero::new(5).unwrap(), NonZero::new(3).unwrap())
            .add_vial([Palette::DryGreen, Palette::Gray, Palette::LushGreen])
            .add_vial([Palette::Gray, Palette::LushGreen, Palette::DryGreen])
            .add_vial([Palette::LushGreen, Palette::DryGreen, Palette::Gray])
            .build()
            .unwrap();

        let solution = start.solve().unwrap();
        let end = solution.replay(&start).unwrap();
        assert!(end.is_solved(Tally::PerVial));
        assert!(end.vials().iter().all(|vial| vial.is_empty() || (vial.is_uniform() && vial.is_full(3))));
    }

    #[test]
    fn solution_survives_pour_metadata_on_start() {
        let parent = build(2, vec![vec![1, 2], vec![2, 1], vec![], vec![]]);
        let start = parent.apply_pour(0, 2).unwrap();
        let solution = start.solve().unwrap();

        assert!(solution.replay(&start).unwrap().is_solved(Tally::PerVial));
    }

    #[test]
    fn no_legal_pours_is_unsolvable() {
        let start = build(2, vec![vec![1, 2], vec![2, 1]]);

        assert_eq!(start.solve(), Err(SearchError::Unsolvable { explored: 1 }));
    }

    #[test]
    fn short_colors_are_unsolvable() {
        // two units of each color can never fill a vial of three
        let start = build(3, vec![vec![1, 2, 3], vec![3, 2, 1], vec![]]);

        assert!(matches!(start.solve(), Err(SearchError::Unsolvable { .. })));
    }

    #[test]
    fn node_budget() {
        let start = build(2, vec![vec![1, 2], vec![2, 1], vec![]]);

        assert_eq!(
            start.solve_with(SearchOptions::default().with_node_budget(0)),
            Err(SearchError::BudgetExhausted { generated: 1 }),
        );
    }

    #[test]
    fn replay_rejects_illegal_pours() {
        let start = build(2, vec![vec![1, 2], vec![2, 1], vec![]]);
        let solution = Solution { moves: vec![Pour::new(2, 0)], explored: 0, generated: 0 };

        assert!(solution.replay(&start).is_none());
    }

    #[test]
    fn one_based_display() {
        assert_eq!(Pour::new(0, 6).one_based(), (1, 7));
        assert_eq!(format!("{}", Pour::new(2, 4)), "2 -> 4");
    }

    #[test]
    fn palette_round_trip() {
        assert_eq!(u8::from(Palette::DryGreen), 1);
        assert_eq!(Palette::from_id(12), Some(Palette::BlueBlue));
        assert_eq!(Palette::from_id(0), None);
        assert_eq!(Palette::LightBlue.to_string(), "light_blue");
    }
}
