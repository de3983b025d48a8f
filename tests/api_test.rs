//! Тесты API-слоя HUD: сессия, команды, история отмены,
//! документ статуса и конфиг.

use std::path::PathBuf;

use poker_hud::api::{
    cards_from_tokens, ApiError, BoardDto, Command, CommandResponse, EquityDto, PlayerDto, Query,
    QueryResponse, Session, SidePotDto, StatusDocument, TurnOutcomeDto,
};
use poker_hud::config::HudConfig;
use poker_hud::domain::{
    card::Card,
    card_codec::CardParseError,
    chips::Chips,
    hand::Street,
    player::{Equity, PlayerStatus},
};
use poker_hud::engine::{EngineError, PlayerActionKind, WinnerSelection};
use poker_hud::infra::{
    document_to_snapshot, load_document, snapshot_to_document, InMemoryStatusStorage,
    StatusStorage,
};

/// Утилита: конфиг с воспроизводимым RNG и быстрым эквити.
fn test_config() -> HudConfig {
    HudConfig {
        equity_trials: 200,
        rng_seed: Some(7),
        ..HudConfig::default()
    }
}

fn cards(list: &str) -> Vec<Card> {
    list.split_whitespace()
        .map(|s| s.parse().expect("valid card literal"))
        .collect()
}

/// Уникальный путь во временной директории.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("poker_hud_{}_{name}", std::process::id()))
}

/// Сессия: 3 игрока 100/50/30, карты на руках, все в олл-ине.
fn three_way_all_in_session() -> Session {
    let mut session = Session::new(test_config());
    session.apply(Command::SetPlayerCount { count: 3 }).unwrap();
    for (seat, stack) in [(0, 100), (1, 50), (2, 30)] {
        session
            .apply(Command::SetStack {
                seat,
                amount: Chips(stack),
            })
            .unwrap();
    }
    for (seat, hole) in [(0, "As Ah"), (1, "Ks Kh"), (2, "Qs Qh")] {
        session
            .apply(Command::SetHoleCards {
                seat,
                cards: cards(hole),
            })
            .unwrap();
    }
    for _ in 0..3 {
        session
            .apply(Command::Action(PlayerActionKind::AllIn))
            .unwrap();
    }
    session
}

// ====================== COMMANDS ======================

#[test]
fn commands_drive_the_hand() {
    let mut session = Session::new(test_config());
    session.apply(Command::SetPlayerCount { count: 4 }).unwrap();
    session
        .apply(Command::SetAllStacks {
            amount: Chips(1000),
        })
        .unwrap();
    session
        .apply(Command::SetBlinds {
            small_blind: Chips(5),
            big_blind: Chips(10),
        })
        .unwrap();

    let table = session.table();
    assert_eq!(table.visible_count(), 4);
    assert_eq!(table.seats[1].stack, Chips(995));
    assert_eq!(table.seats[2].stack, Chips(990));
    assert_eq!(session.engine().current_actor, Some(3));

    let response = session
        .apply(Command::Action(PlayerActionKind::Call))
        .unwrap();
    assert_eq!(response, CommandResponse::Turn(TurnOutcomeDto::NextActor(0)));

    let response = session
        .apply(Command::NextStreet {
            cards: Some(cards("2c 7d 9h")),
        })
        .unwrap();
    assert_eq!(response, CommandResponse::Street(Street::Flop));
    assert_eq!(session.engine().pot.pot, Chips(25));
}

#[test]
fn set_all_stacks_accounts_for_posted_blinds() {
    let mut session = Session::new(test_config());
    session.apply(Command::SetPlayerCount { count: 3 }).unwrap();
    session
        .apply(Command::SetAllStacks { amount: Chips(500) })
        .unwrap();
    session
        .apply(Command::SetBlinds {
            small_blind: Chips(5),
            big_blind: Chips(10),
        })
        .unwrap();
    session
        .apply(Command::SetAllStacks {
            amount: Chips(200),
        })
        .unwrap();

    let table = session.table();
    assert_eq!(table.seats[0].stack, Chips(200));
    assert_eq!(table.seats[1].stack, Chips(195));
    assert_eq!(table.seats[2].stack, Chips(190));
}

#[test]
fn failed_command_leaves_state_and_history_untouched() {
    let mut session = Session::new(test_config());
    session.apply(Command::SetPlayerCount { count: 3 }).unwrap();
    let before = session.current_state();
    let history_len = session.history().len();

    let err = session
        .apply(Command::SetHoleCards {
            seat: 0,
            cards: cards("As Ad Ah"),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::EngineError(_)));

    assert!(session.apply(Command::SetPlayerCount { count: 9 }).is_err());
    assert!(session
        .apply(Command::SetBlinds {
            small_blind: Chips(20),
            big_blind: Chips(10),
        })
        .is_err());

    assert_eq!(session.current_state(), before);
    assert_eq!(session.history().len(), history_len);
}

#[test]
fn hole_cards_cannot_duplicate_other_known_cards() {
    let mut session = Session::new(test_config());
    session
        .apply(Command::SetHoleCards {
            seat: 0,
            cards: cards("As Ad"),
        })
        .unwrap();

    let err = session
        .apply(Command::SetHoleCards {
            seat: 1,
            cards: cards("Ad Kc"),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::EngineError(_)));

    // Переустановка своих же карт – не конфликт.
    session
        .apply(Command::SetHoleCards {
            seat: 0,
            cards: cards("Ad As"),
        })
        .unwrap();
}

#[test]
fn set_board_moves_the_street_and_refreshes_equity() {
    let mut session = Session::new(test_config());
    session.apply(Command::SetPlayerCount { count: 2 }).unwrap();
    session
        .apply(Command::SetHoleCards {
            seat: 0,
            cards: cards("As Ks"),
        })
        .unwrap();
    session
        .apply(Command::SetBoard {
            cards: cards("Qs Js Ts 2d"),
        })
        .unwrap();

    let table = session.table();
    assert_eq!(table.street, Street::Turn);
    assert_eq!(table.seats[0].equity, Equity::Value(100.0), "Роял-флеш не проигрывает");
    assert_eq!(table.seats[1].equity, Equity::Pending);

    assert!(session
        .apply(Command::SetBoard {
            cards: cards("2c 3c")
        })
        .is_err());
}

#[test]
fn card_tokens_parse_strictly_for_commands() {
    assert_eq!(cards_from_tokens(&["16,14", "HT"]).unwrap(), cards("As Th"));
    assert!(matches!(
        cards_from_tokens(&["16,14", "zz"]),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn next_hand_through_session_reports_payouts() {
    let mut session = three_way_all_in_session();
    assert_eq!(session.table().street, Street::Showdown);

    let response = session
        .apply(Command::NextHand(WinnerSelection::Showdown))
        .unwrap();
    let payouts = match response {
        CommandResponse::HandFinished(payouts) => payouts,
        other => panic!("ожидались выплаты, получили {other:?}"),
    };

    let paid: u64 = payouts.iter().map(|p| p.amount.0).sum();
    assert_eq!(paid, 180);
    let stacks: u64 = session.table().seats.iter().map(|p| p.stack.0 + p.current_bet.0).sum();
    assert_eq!(stacks, 180, "Фишки не создаются и не пропадают");
}

// ====================== UNDO ======================

#[test]
fn undo_at_earliest_entry_fails_and_keeps_state() {
    let mut session = Session::new(test_config());
    let before = session.current_state();

    assert_eq!(
        session.undo(),
        Err(ApiError::EngineError(EngineError::NoHistory.to_string()))
    );
    assert_eq!(session.current_state(), before);

    let mut history = session.history().clone();
    assert_eq!(history.undo().err(), Some(EngineError::NoHistory));
}

#[test]
fn undo_walks_back_to_the_first_action() {
    let mut session = Session::new(test_config());

    session.apply(Command::SetPlayerCount { count: 3 }).unwrap();
    let after_first = session.current_state();

    session
        .apply(Command::SetAllStacks { amount: Chips(100) })
        .unwrap();
    session
        .apply(Command::SetBlinds {
            small_blind: Chips(5),
            big_blind: Chips(10),
        })
        .unwrap();
    session
        .apply(Command::Action(PlayerActionKind::Call))
        .unwrap();

    for _ in 0..3 {
        session.undo().unwrap();
    }
    assert!(session.current_state().same_state(&after_first));
    assert_eq!(session.current_state(), after_first);

    // Ещё один шаг – к начальному снимку, дальше отмены нет.
    session.undo().unwrap();
    assert!(session.undo().is_err());
}

#[test]
fn unchanged_state_is_not_recorded() {
    let mut session = Session::new(test_config());
    session.apply(Command::SetPlayerCount { count: 3 }).unwrap();
    let len = session.history().len();

    session.apply(Command::SetPlayerCount { count: 3 }).unwrap();
    session.apply(Command::RecomputeEquity).unwrap();
    assert_eq!(session.history().len(), len);
}

#[test]
fn history_is_bounded() {
    let mut session = Session::new(HudConfig {
        history_capacity: 3,
        ..test_config()
    });
    for stack in 1..=6 {
        session
            .apply(Command::SetStack {
                seat: 0,
                amount: Chips(stack * 100),
            })
            .unwrap();
    }

    assert_eq!(session.history().len(), 3);
    session.undo().unwrap();
    session.undo().unwrap();
    assert_eq!(session.table().seats[0].stack, Chips(400));
    assert!(session.undo().is_err());
}

// ====================== STATUS DOCUMENT ======================

#[test]
fn exported_document_matches_the_table() {
    let session = three_way_all_in_session();
    let doc = session.export_document();

    assert_eq!(doc.players.len(), 3, "Только видимые игроки");
    assert_eq!(doc.players[0].name, "P1");
    assert_eq!(doc.players[0].position, "BU");
    assert_eq!(doc.players[0].action, "All-in 100");
    assert_eq!(doc.players[0].cards, vec!["16,14", "08,14"]);
    assert!(matches!(doc.players[0].equity, Some(EquityDto::Percent(_))));

    assert_eq!(doc.board.pot, 180);
    assert_eq!(doc.board.main_pot, 90);
    assert_eq!(doc.board.blinds, "0/0");
    assert_eq!(doc.board.street, "Showdown");
    assert_eq!(doc.board.cards.len(), 5);
    assert_eq!(
        doc.board.side_pots,
        vec![
            SidePotDto {
                amount: 40,
                players: vec!["P1".to_string(), "P2".to_string()],
            },
            SidePotDto {
                amount: 50,
                players: vec!["P1".to_string()],
            },
        ]
    );
}

#[test]
fn document_json_uses_the_wire_shape() {
    let doc = StatusDocument {
        players: vec![
            PlayerDto {
                name: "Alice".to_string(),
                stack: 90,
                position: "SB".to_string(),
                action: "Fold".to_string(),
                cards: Vec::new(),
                equity: Some(EquityDto::fold()),
            },
            PlayerDto {
                name: "Bob".to_string(),
                stack: 120,
                position: "BB".to_string(),
                action: String::new(),
                cards: vec!["16,14".to_string(), "08,13".to_string()],
                equity: None,
            },
        ],
        board: BoardDto {
            pot: 30,
            main_pot: 30,
            blinds: "5/10".to_string(),
            side_pots: Vec::new(),
            cards: Vec::new(),
            street: "Preflop".to_string(),
        },
    };

    let json: serde_json::Value = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["players"][0]["equity"], "Fold");
    assert!(json["players"][1]["equity"].is_null());
    assert_eq!(json["board"]["blinds"], "5/10");

    let text = r#"{"players":[{"name":"X","stack":5,"position":"BU","action":"Call 5",
        "cards":["16,14","16,13"],"equity":42.5}],
        "board":{"pot":0,"main_pot":0,"blinds":"1/2","side_pots":[],"cards":[],"street":"Preflop"}}"#;
    let parsed: StatusDocument = serde_json::from_str(text).unwrap();
    assert_eq!(parsed.players[0].equity, Some(EquityDto::Percent(42.5)));
}

#[test]
fn export_then_load_reproduces_the_document() {
    let source = three_way_all_in_session();
    let doc = source.export_document();

    let mut target = Session::new(test_config());
    let dropped = target.load_document(&doc);
    assert!(dropped.is_empty());

    assert_eq!(target.export_document(), doc);
    assert_eq!(target.engine().pot.pot, Chips(180));
    assert_eq!(target.table().board, source.table().board);
    assert_eq!(target.table().street, Street::Showdown);
    assert!(target.table().seats[..3]
        .iter()
        .all(|p| p.status == PlayerStatus::AllIn));
    assert!(!target.table().seats[3].visible);
}

#[test]
fn mapping_round_trip_without_a_session() {
    let session = three_way_all_in_session();
    let doc = snapshot_to_document(&session.current_state());
    let loaded = document_to_snapshot(&doc);

    assert!(loaded.dropped_cards.is_empty());
    assert_eq!(snapshot_to_document(&loaded.snapshot), doc);
}

#[test]
fn session_round_trips_through_any_storage() {
    let source = three_way_all_in_session();
    let mut storage = InMemoryStatusStorage::new();

    let mut target = Session::new(test_config());
    assert!(matches!(target.load_from(&storage), Err(ApiError::Storage(_))));

    source.export_into(&mut storage).unwrap();
    assert_eq!(storage.load().unwrap(), source.export_document());

    let dropped = target.load_from(&storage).unwrap();
    assert!(dropped.is_empty());
    assert_eq!(target.export_document(), source.export_document());
}

#[test]
fn loaded_pot_keeps_growing_with_new_bets() {
    let mut doc = StatusDocument::default();
    doc.board.blinds = "5/10".to_string();
    doc.board.pot = 60;
    doc.board.main_pot = 60;
    doc.board.cards = vec!["02,02".into(), "04,07".into(), "08,09".into()];
    doc.board.street = "Flop".to_string();
    for (name, position) in [("A", "BU"), ("B", "SB"), ("C", "BB")] {
        doc.players.push(PlayerDto {
            name: name.to_string(),
            stack: 500,
            position: position.to_string(),
            ..PlayerDto::default()
        });
    }

    let mut session = Session::new(test_config());
    session.load_document(&doc);
    assert_eq!(session.table().dealer_button, 0);
    assert_eq!(session.engine().current_actor, Some(1), "После флопа первым ходит SB");

    session
        .apply(Command::Action(PlayerActionKind::Bet(Chips(20))))
        .unwrap();
    session
        .apply(Command::Action(PlayerActionKind::Call))
        .unwrap();
    session
        .apply(Command::Action(PlayerActionKind::Call))
        .unwrap();
    session.apply(Command::NextStreet { cards: None }).unwrap();

    assert_eq!(session.engine().pot.pot, Chips(120));
    assert_eq!(session.engine().pot.main_pot, Chips(120));
    assert_eq!(session.table().street, Street::Turn);
}

/// Документ на флопе: банк 60, A=BU, B=SB, C=BB, стеки по 500.
fn flop_document_with_pot() -> StatusDocument {
    let mut doc = StatusDocument::default();
    doc.board.blinds = "5/10".to_string();
    doc.board.pot = 60;
    doc.board.main_pot = 60;
    doc.board.cards = vec!["02,02".into(), "04,07".into(), "08,09".into()];
    doc.board.street = "Flop".to_string();
    for (name, position) in [("A", "BU"), ("B", "SB"), ("C", "BB")] {
        doc.players.push(PlayerDto {
            name: name.to_string(),
            stack: 500,
            position: position.to_string(),
            ..PlayerDto::default()
        });
    }
    doc
}

#[test]
fn fold_after_load_loses_claim_on_loaded_pot() {
    let mut session = Session::new(test_config());
    session.load_document(&flop_document_with_pot());
    assert_eq!(session.engine().current_actor, Some(1));

    for kind in [
        PlayerActionKind::Fold,
        PlayerActionKind::Check,
        PlayerActionKind::Check,
    ] {
        session.apply(Command::Action(kind)).unwrap();
    }
    session.apply(Command::NextStreet { cards: None }).unwrap();

    let tiers = &session.engine().pot.tiers;
    assert_eq!(tiers.len(), 1);
    assert_eq!(tiers[0].amount, Chips(60));
    assert_eq!(tiers[0].eligible, vec![0, 2], "Сфолдивший B не претендует на банк");

    let err = session
        .apply(Command::NextHand(WinnerSelection::Manual(vec![1])))
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::EngineError(EngineError::InvalidWinner { tier: 0, seat: 1 }.to_string())
    );
    assert_eq!(session.table().seats[1].stack, Chips(500));
    assert_eq!(session.engine().pot.pot, Chips(60), "Банк не должен быть выплачен");

    session
        .apply(Command::NextHand(WinnerSelection::Manual(vec![2])))
        .unwrap();
    let total: u64 = session.table().seats[..3]
        .iter()
        .map(|p| p.stack.0 + p.current_bet.0)
        .sum();
    assert_eq!(total, 1560, "Банк 60 должен уйти в стеки");
}

#[test]
fn board_without_main_pot_blinds_or_street_still_loads() {
    let json = r#"{
        "players": [
            { "name": "A", "stack": 100 },
            { "name": "B", "stack": 100 }
        ],
        "board": { "pot": 40 }
    }"#;
    let doc: StatusDocument = serde_json::from_str(json).unwrap();
    assert_eq!(doc.board.main_pot, 0);
    assert_eq!(doc.board.blinds, "0/0");
    assert_eq!(doc.board.street, "Preflop");

    let mut session = Session::new(test_config());
    let dropped = session.load_document(&doc);
    assert!(dropped.is_empty());

    assert_eq!(session.engine().pot.pot, Chips(40));
    assert_eq!(session.engine().pot.main_pot, Chips(40), "Без main_pot основной банк = pot");
    assert_eq!(session.table().street, Street::Preflop);
}

#[test]
fn malformed_cards_are_dropped_on_load() {
    let mut doc = StatusDocument::default();
    doc.players.push(PlayerDto {
        name: "Hero".to_string(),
        stack: 100,
        cards: vec!["16,14".to_string(), "99,99".to_string()],
        ..PlayerDto::default()
    });
    doc.players.push(PlayerDto {
        name: "Villain".to_string(),
        stack: 100,
        action: "Fold".to_string(),
        ..PlayerDto::default()
    });
    doc.board.cards = vec!["S10".to_string(), "H5".to_string(), "1614x".to_string()];

    let mut session = Session::new(test_config());
    let dropped = session.load_document(&doc);

    assert_eq!(
        dropped,
        vec![
            CardParseError::MalformedCardToken("99,99".to_string()),
            CardParseError::MalformedCardToken("1614x".to_string()),
        ]
    );
    let table = session.table();
    assert_eq!(table.seats[0].hole_cards, cards("As"));
    assert_eq!(table.board, cards("Ts 5h"));
    assert_eq!(table.seats[1].status, PlayerStatus::Folded);
    assert_eq!(table.seats[1].equity, Equity::Folded);
    assert_eq!(table.visible_count(), 2);
}

#[test]
fn file_round_trip_and_failed_load() {
    let path = temp_path("status.json");
    let source = three_way_all_in_session();
    source.export_to(&path).unwrap();

    let on_disk = load_document(&path).unwrap();
    assert_eq!(on_disk.board, source.export_document().board);

    let mut target = Session::new(test_config());
    target.load(&path).unwrap();
    assert_eq!(target.engine().pot.pot, Chips(180));
    assert_eq!(target.table().board, source.table().board);

    // Битый файл: ошибка, состояние прежнее.
    std::fs::write(&path, "{ not json").unwrap();
    let before = target.current_state();
    assert!(matches!(target.load(&path), Err(ApiError::Storage(_))));
    assert_eq!(target.current_state(), before);

    std::fs::remove_file(&path).unwrap();
    assert!(matches!(target.load(&path), Err(ApiError::Storage(_))));
}

#[test]
fn queries_report_seats_and_document() {
    let session = three_way_all_in_session();

    let QueryResponse::Seats(seats) = session.query(Query::Seats) else {
        panic!("ожидалась сводка по местам");
    };
    assert_eq!(seats.len(), 3);
    assert!(seats.iter().all(|s| !s.to_act), "На шоудауне никто не ходит");

    assert_eq!(
        session.query(Query::Document),
        QueryResponse::Document(session.export_document())
    );
}

// ====================== CONFIG ======================

#[test]
fn config_is_created_with_defaults() {
    let path = temp_path("hud_default.toml");
    let _ = std::fs::remove_file(&path);

    let cfg = HudConfig::load_or_create(&path).unwrap();
    assert_eq!(cfg, HudConfig::default());
    assert!(path.exists());
    assert_eq!(HudConfig::load_or_create(&path).unwrap(), cfg);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn partial_config_keeps_other_defaults() {
    let path = temp_path("hud_partial.toml");
    std::fs::write(&path, "equity_trials = 50\nrng_seed = 3\n").unwrap();

    let cfg = HudConfig::load_or_create(&path).unwrap();
    assert_eq!(cfg.equity_trials, 50);
    assert_eq!(cfg.rng_seed, Some(3));
    assert_eq!(cfg.history_capacity, 10);
    assert!(cfg.runout_on_no_actor);
    assert_eq!(cfg.engine_settings().equity_trials, 50);

    std::fs::write(&path, "equity_trials = \"many\"\n").unwrap();
    assert!(HudConfig::load_or_create(&path).is_err());

    std::fs::remove_file(&path).unwrap();
}
