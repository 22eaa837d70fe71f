#[cfg(test)]
mod tests {
    use crate::battle::conditions::StatusCondition;
    use crate::battle::engine::resolve_turn;
    use crate::battle::state::{ActionFailureReason, BattleEvent, GameState};
    use crate::battle::tests::common::{
        assert_ok, create_team_field, create_test_field, has_message, hp, predictable_rng,
        TestCreatureBuilder,
    };
    use crate::errors::{ActionError, BattleEngineError, BattleStateError};
    use crate::trainer::TrainerAction;
    use pretty_assertions::assert_eq;
    use schema::{BaseStats, PokemonType};

    const FIRST_MOVE: TrainerAction = TrainerAction::Attack { move_index: 0 };

    #[test]
    fn test_faint_with_backup_requests_replacement() {
        // Arrange
        let mut field = create_team_field(
            vec![TestCreatureBuilder::new("Machamp").with_speed(100).build()],
            vec![
                TestCreatureBuilder::new("Weedle").with_speed(50).with_hp(5).build(),
                TestCreatureBuilder::new("Caterpie").build(),
            ],
        );
        let mut rng = predictable_rng();

        // Act
        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Faint turn events:");

        // Assert: Weedle never gets to act
        assert!(has_message(&report.messages, "Weedle was defeated!"));
        assert!(has_message(&report.messages, "Blue must choose another Pokémon!"));
        assert!(!has_message(&report.messages, "Weedle used Tackle!"));
        assert!(report.continue_battle);
        assert_eq!(report.needs_switch, [false, true]);
        assert_eq!(report.winner, None);
        assert_eq!(field.game_state, GameState::WaitingForTrainer2Replacement);
        assert_eq!(field.trainers[1].team.len(), 1);
        assert_eq!(field.trainers[1].active_index, None);
    }

    #[test]
    fn test_turn_waits_for_replacement() {
        let mut field = create_team_field(
            vec![TestCreatureBuilder::new("Machamp").with_speed(100).build()],
            vec![
                TestCreatureBuilder::new("Weedle").with_speed(50).with_hp(5).build(),
                TestCreatureBuilder::new("Caterpie").build(),
            ],
        );
        let mut rng = predictable_rng();
        assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));

        assert_eq!(
            resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng),
            Err(BattleEngineError::BattleState(BattleStateError::ReplacementPending(1)))
        );
        assert_eq!(
            field.replace_active(1, 5),
            Err(BattleEngineError::Action(ActionError::InvalidCreatureIndex(5)))
        );

        assert_ok(field.replace_active(1, 0));
        assert_eq!(field.game_state, GameState::WaitingForActions);
        assert_eq!(field.active(1).unwrap().name(), "Caterpie");

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Faint turn events:");
        assert!(has_message(&report.messages, "Caterpie took 7 damage!"));
        assert_eq!(field.turn_number, 2);
    }

    #[test]
    fn test_switch_out_dodges_the_faint() {
        let mut field = create_team_field(
            vec![TestCreatureBuilder::new("Machamp").with_speed(100).build()],
            vec![
                TestCreatureBuilder::new("Weedle").with_hp(5).build(),
                TestCreatureBuilder::new("Caterpie").build(),
            ],
        );
        let mut rng = predictable_rng();

        let report = assert_ok(resolve_turn(
            &mut field,
            FIRST_MOVE,
            TrainerAction::Switch { team_index: 1 },
            &mut rng,
        ));

        assert!(has_message(&report.messages, "Blue sent out Caterpie!"));
        assert!(has_message(&report.messages, "Caterpie took 7 damage!"));
        assert_eq!(report.needs_switch, [false, false]);
        assert_eq!(field.trainers[1].team[0].ledger.hp(), 5);
        assert_eq!(hp(&field, 1), 93);
    }

    #[test]
    fn test_last_creature_fainting_ends_battle() {
        let mut field = create_test_field(
            TestCreatureBuilder::new("Machamp").with_speed(100).build(),
            TestCreatureBuilder::new("Weedle").with_speed(50).with_hp(5).build(),
        );
        let mut rng = predictable_rng();

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Faint turn events:");

        let tail = report.messages[report.messages.len() - 3..].to_vec();
        assert_eq!(
            tail,
            vec!["Weedle was defeated!", "Blue has no Pokémon left!", "Red won the battle!"]
        );
        assert!(!report.continue_battle);
        assert_eq!(report.winner, Some(0));
        assert_eq!(report.needs_switch, [false, false]);
        assert_eq!(field.game_state, GameState::Trainer1Win);

        assert_eq!(
            resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng),
            Err(BattleEngineError::BattleState(BattleStateError::BattleOver))
        );
        assert_eq!(
            field.replace_active(1, 0),
            Err(BattleEngineError::BattleState(BattleStateError::BattleOver))
        );
    }

    #[test]
    fn test_double_knockout_is_a_draw() {
        let mut field = create_test_field(
            TestCreatureBuilder::new("Electrode")
                .with_speed(100)
                .with_moves(&["Explosion"])
                .build(),
            TestCreatureBuilder::new("Weedle").with_speed(50).with_hp(5).build(),
        );
        let mut rng = predictable_rng();

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Faint turn events:");

        assert!(has_message(&report.messages, "Electrode was defeated!"));
        assert!(has_message(&report.messages, "Weedle was defeated!"));
        assert_eq!(
            report.messages.last().map(String::as_str),
            Some("The battle ended in a draw!")
        );
        assert_eq!(report.winner, None);
        assert!(!report.continue_battle);
        assert_eq!(field.game_state, GameState::Draw);
    }

    #[test]
    fn test_double_faint_with_backups_waits_for_both() {
        let mut field = create_team_field(
            vec![
                TestCreatureBuilder::new("Electrode")
                    .with_speed(100)
                    .with_moves(&["Explosion"])
                    .build(),
                TestCreatureBuilder::new("Voltorb").build(),
            ],
            vec![
                TestCreatureBuilder::new("Weedle").with_speed(50).with_hp(5).build(),
                TestCreatureBuilder::new("Caterpie").build(),
            ],
        );
        let mut rng = predictable_rng();

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Faint turn events:");

        assert_eq!(report.needs_switch, [true, true]);
        assert_eq!(field.game_state, GameState::WaitingForBothReplacements);

        assert_ok(field.replace_active(0, 0));
        assert_eq!(field.game_state, GameState::WaitingForTrainer2Replacement);
        assert_ok(field.replace_active(1, 0));
        assert_eq!(field.game_state, GameState::WaitingForActions);
    }

    #[test]
    fn test_second_attacker_has_no_target_after_self_faint() {
        // Onix survives the blast; Electrode does not
        let mut field = create_test_field(
            TestCreatureBuilder::new("Electrode")
                .with_speed(100)
                .with_moves(&["Explosion"])
                .build(),
            TestCreatureBuilder::new("Onix")
                .with_stats(BaseStats::new(200, 80, 250, 80, 80, 50))
                .build(),
        );
        let mut rng = predictable_rng();

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Faint turn events:");

        // Defense 250 halves to 125: floor(6 * 170 * 80/125 / 50 + 2) = 15,
        // STAB 22, lowest factor 18
        assert_eq!(hp(&field, 1), 182);
        assert!(report.events.events().contains(&BattleEvent::ActionFailed {
            creature: "Onix".to_string(),
            reason: ActionFailureReason::NoTarget,
        }));
        assert!(has_message(&report.messages, "But there was no target..."));
        assert_eq!(report.winner, Some(1));
        assert!(has_message(&report.messages, "Blue won the battle!"));
    }

    #[test]
    fn test_explosion_into_a_ghost_still_knocks_out_the_user() {
        let mut field = create_test_field(
            TestCreatureBuilder::new("Electrode")
                .with_speed(100)
                .with_moves(&["Explosion"])
                .build(),
            TestCreatureBuilder::new("Gastly")
                .with_type(PokemonType::Ghost)
                .with_speed(50)
                .with_moves(&["Splash"])
                .build(),
        );
        let mut rng = predictable_rng();

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Faint turn events:");

        assert!(has_message(&report.messages, "It had no effect!"));
        assert!(has_message(&report.messages, "Electrode was defeated!"));
        assert!(!has_message(&report.messages, "Gastly used Splash!"));
        assert!(report.events.events().contains(&BattleEvent::ActionFailed {
            creature: "Gastly".to_string(),
            reason: ActionFailureReason::NoTarget,
        }));
        assert_eq!(hp(&field, 1), 100);
        assert_eq!(report.winner, Some(1));
        assert_eq!(field.game_state, GameState::Trainer2Win);
    }

    #[test]
    fn test_status_still_ticks_when_there_is_no_target() {
        let mut field = create_test_field(
            TestCreatureBuilder::new("Electrode")
                .with_speed(100)
                .with_moves(&["Explosion"])
                .build(),
            TestCreatureBuilder::new("Onix")
                .with_stats(BaseStats::new(200, 80, 250, 80, 80, 50))
                .with_status(StatusCondition::Poisoned)
                .build(),
        );
        let mut rng = predictable_rng();

        let report = assert_ok(resolve_turn(&mut field, FIRST_MOVE, FIRST_MOVE, &mut rng));
        report.events.print_debug_with_message("Faint turn events:");

        // 200 - 18 from the blast, then 200 / 16 = 12 from poison
        assert!(has_message(&report.messages, "But there was no target..."));
        assert!(report.events.events().contains(&BattleEvent::StatusDamage {
            target: "Onix".to_string(),
            status: StatusCondition::Poisoned,
            damage: 12,
            remaining_hp: 170,
        }));
        assert_eq!(hp(&field, 1), 170);
    }

    #[test]
    fn test_replace_active_without_pending_faint() {
        let mut field = create_team_field(
            vec![
                TestCreatureBuilder::new("Machamp").build(),
                TestCreatureBuilder::new("Machoke").build(),
            ],
            vec![TestCreatureBuilder::new("Caterpie").build()],
        );

        assert_eq!(
            field.replace_active(0, 1),
            Err(BattleEngineError::BattleState(BattleStateError::NoReplacementPending(0)))
        );
        assert_eq!(
            field.replace_active(2, 0),
            Err(BattleEngineError::BattleState(BattleStateError::InvalidSideIndex(2)))
        );
    }
}
