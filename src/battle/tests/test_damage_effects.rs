#[cfg(test)]
mod tests {
    use crate::battle::engine::resolve_turn;
    use crate::battle::move_effects::{BattleMoveEffectExt, EffectContext, EffectResult};
    use crate::battle::state::{BattleEvent, EventBus, TurnRng};
    use crate::battle::tests::common::{
        assert_ok, create_test_field, has_message, hp, TestCreatureBuilder,
    };
    use crate::move_data::get_move_data;
    use crate::trainer::TrainerAction;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{MoveEffect, PokemonType};

    const FIRST_MOVE: TrainerAction = TrainerAction::Attack { move_index: 0 };

    fn attacker(name: &str, move_name: &str) -> TestCreatureBuilder {
        TestCreatureBuilder::new(name)
            .with_speed(100)
            .with_moves(&[move_name])
    }

    fn splasher(name: &str) -> TestCreatureBuilder {
        TestCreatureBuilder::new(name)
            .with_speed(50)
            .with_moves(&["Splash"])
    }

    #[test]
    fn test_multi_hit_distribution() {
        let mut field = create_test_field(
            attacker("Primeape", "Comet Punch").build(),
            splasher("Magikarp").build(),
        );
        let context = EffectContext::new(0, 1, get_move_data("Comet Punch").unwrap());
        let mut rng = TurnRng::seeded(7);
        let mut counts = [0i64; 6];

        for _ in 0..10_000 {
            let mut bus = EventBus::new();
            let result = MoveEffect::MultiHit.apply(&context, &mut field, 7, &mut rng, &mut bus);
            let hits = match bus.events() {
                [BattleEvent::MultiHit { hits }] => *hits,
                other => panic!("unexpected events {:?}", other),
            };
            assert_eq!(result, EffectResult::Continue(7 * u16::from(hits)));
            counts[usize::from(hits)] += 1;
        }

        // (hits, expected count, tolerance)
        for (hits, expected, tolerance) in [
            (1, 100, 60),
            (2, 3700, 250),
            (3, 3700, 250),
            (4, 1200, 200),
            (5, 1300, 200),
        ] {
            let observed = counts[hits];
            assert!(
                (observed - expected).abs() <= tolerance,
                "{} hits: observed {}, expected about {}",
                hits,
                observed,
                expected
            );
        }
        assert_eq!(counts[0], 0);
    }

    #[test]
    fn test_multi_hit_total_is_per_hit_times_count() {
        let mut field = create_test_field(
            attacker("Primeape", "Comet Punch").build(),
            splasher("Magikarp").build(),
        );
        // hit, no crit, top factor, 80 -> four hits, then Splash
        let mut rng = TurnRng::new_for_test(vec![0, 255, 255, 80, 0]);

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Damage effect events:");

        // floor(6 * 18 / 50 + 2) = 4, STAB 6, four hits
        assert!(has_message(&report.messages, "Hit 4 times!"));
        assert!(has_message(&report.messages, "Magikarp took 24 damage!"));
        assert_eq!(hp(&field, 1), 76);
    }

    #[test]
    fn test_double_kick_hits_twice() {
        let mut field = create_test_field(
            attacker("Nidorino", "Double Kick").build(),
            splasher("Rattata").build(),
        );
        let mut rng = TurnRng::new_for_test(vec![0, 255, 255, 0]);

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Damage effect events:");

        // floor(6 * 30 / 50 + 2) = 5, super effective 10, twice
        assert!(has_message(&report.messages, "It's super effective!"));
        assert!(has_message(&report.messages, "Hit 2 times!"));
        assert_eq!(hp(&field, 1), 80);
    }

    #[test]
    fn test_recoil_is_a_quarter_of_damage_dealt() {
        let mut field = create_test_field(
            attacker("Tauros", "Double-Edge").build(),
            splasher("Magikarp").build(),
        );
        let mut rng = TurnRng::new_for_test(vec![0, 255, 255, 0]);

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Damage effect events:");

        // floor(6 * 100 / 50 + 2) = 14, STAB 21, recoil 21 / 4 = 5
        assert_eq!(hp(&field, 1), 79);
        assert_eq!(hp(&field, 0), 95);
        assert!(has_message(&report.messages, "Tauros is hit with recoil! (5 damage)"));
    }

    #[test]
    fn test_struggle_recoil_is_half_of_damage_dealt() {
        let mut field = create_test_field(
            attacker("Tauros", "Struggle").build(),
            splasher("Magikarp").build(),
        );
        // Struggle carries no PP of its own
        field.active_mut(0).unwrap().creature.moves[0].pp = 1;
        let mut rng = TurnRng::new_for_test(vec![0, 255, 255, 0]);

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Damage effect events:");

        // Typeless, so no STAB: floor(6 * 50 / 50 + 2) = 8, recoil 8 / 2 = 4
        assert_eq!(hp(&field, 1), 92);
        assert_eq!(hp(&field, 0), 96);
        assert!(has_message(&report.messages, "Tauros is hit with recoil! (4 damage)"));
    }

    #[test]
    fn test_drain_heals_half_of_damage_dealt() {
        let mut field = create_test_field(
            attacker("Oddish", "Absorb")
                .with_type(PokemonType::Grass)
                .with_hp(50)
                .build(),
            splasher("Magikarp").build(),
        );
        let mut rng = TurnRng::new_for_test(vec![0, 255, 255, 0]);

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Damage effect events:");

        // floor(6 * 20 / 50 + 2) = 4, STAB 6, drain 3
        assert_eq!(hp(&field, 1), 94);
        assert_eq!(hp(&field, 0), 53);
        assert!(has_message(&report.messages, "Oddish recovered 3 HP!"));
    }

    #[rstest]
    #[case("Seismic Toss", 10, PokemonType::Normal, 90)]
    #[case("Night Shade", 25, PokemonType::Water, 75)]
    fn test_level_damage(
        #[case] move_name: &str,
        #[case] level: u8,
        #[case] target_type: PokemonType,
        #[case] remaining: u16,
    ) {
        let mut field = create_test_field(
            attacker("Gengar", move_name).with_level(level).build(),
            splasher("Magikarp").with_type(target_type).build(),
        );
        let mut rng = TurnRng::new_for_test(vec![0, 0]);

        assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));

        assert_eq!(hp(&field, 1), remaining);
    }

    #[rstest]
    #[case(0, 95)]
    #[case(100, 90)]
    #[case(150, 85)]
    fn test_psywave_scales_with_level(#[case] roll: u16, #[case] remaining: u16) {
        let mut field = create_test_field(
            attacker("Abra", "Psywave").build(),
            splasher("Magikarp").build(),
        );
        // hit, then the 50..=150 power roll (0 clamps to 50)
        let mut rng = TurnRng::new_for_test(vec![0, roll, 0]);

        assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));

        assert_eq!(hp(&field, 1), remaining);
    }

    #[test]
    fn test_super_fang_halves_current_hp() {
        let mut field = create_test_field(
            attacker("Raticate", "Super Fang").build(),
            splasher("Magikarp").with_hp(61).build(),
        );
        let mut rng = TurnRng::new_for_test(vec![0, 0]);

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Damage effect events:");

        assert!(has_message(&report.messages, "Magikarp took 30 damage!"));
        assert_eq!(hp(&field, 1), 31);
    }

    #[rstest]
    #[case(80, 80)]
    #[case(50, 100)]
    fn test_one_hit_ko_never_lands_on_a_faster_or_equal_target(
        #[case] attacker_speed: u16,
        #[case] defender_speed: u16,
    ) {
        let mut failures = 0;
        for seed in 0..200 {
            let mut field = create_test_field(
                attacker("Dugtrio", "Fissure").with_speed(attacker_speed).build(),
                splasher("Rhydon").with_speed(defender_speed).build(),
            );
            let mut rng = TurnRng::seeded(seed);

            let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
            report.events.print_debug_with_message("Damage effect events:");

            assert_eq!(hp(&field, 1), 100, "seed {}", seed);
            assert!(report.continue_battle);
            if has_message(&report.messages, "But it failed!") {
                failures += 1;
            }
        }
        // Roughly 30% of the attempts hit and then fail on speed
        assert!(failures > 20, "only {} attempts got past accuracy", failures);
    }

    #[test]
    fn test_one_hit_ko_on_a_slower_target() {
        let mut field = create_test_field(
            attacker("Kingler", "Guillotine").build(),
            splasher("Rhydon").build(),
        );
        let mut rng = TurnRng::new_for_test(vec![0]);

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Damage effect events:");

        assert!(has_message(&report.messages, "Rhydon took 100 damage!"));
        assert!(has_message(&report.messages, "Rhydon was defeated!"));
        assert_eq!(report.winner, Some(0));
    }

    #[test]
    fn test_one_hit_ko_respects_immunity() {
        let mut field = create_test_field(
            attacker("Dugtrio", "Fissure").build(),
            splasher("Pidgeot").with_type(PokemonType::Flying).build(),
        );
        let mut rng = TurnRng::new_for_test(vec![0, 0]);

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Damage effect events:");

        assert!(has_message(&report.messages, "It had no effect!"));
        assert!(!has_message(&report.messages, "But it failed!"));
        assert_eq!(hp(&field, 1), 100);
    }

    #[test]
    fn test_immune_damaging_move_skips_its_effects() {
        // Headbutt into a Ghost: no damage and no flinch roll
        let mut field = create_test_field(
            attacker("Tauros", "Headbutt").build(),
            splasher("Gastly").with_type(PokemonType::Ghost).build(),
        );
        let mut rng = TurnRng::new_for_test(vec![0, 255, 255, 0]);

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Damage effect events:");

        assert!(has_message(&report.messages, "It had no effect!"));
        assert!(!report
            .events
            .events()
            .iter()
            .any(|event| matches!(event, BattleEvent::DamageDealt { .. })));
        assert_eq!(hp(&field, 1), 100);
        assert_eq!(field.active(1).unwrap().status, None);
    }
}
