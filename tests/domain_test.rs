//! Тесты доменной модели HUD.
//!
//! Здесь мы проверяем:
//! - карты и их строковые формы (лог, статус, устаревшие записи);
//! - колоду: исключение известных карт, выборку без возвращения, пустую колоду;
//! - метки действий, позиций и улиц.

use poker_hud::domain::{
    card::{Card, Rank, Suit},
    card_codec::{normalize_card_token, parse_card, parse_cards_lenient, CardParseError},
    chips::Chips,
    deck::Deck,
    hand::Street,
    player::{ActionLabel, Player, PlayerStatus, Position},
    table::Table,
};
use poker_hud::engine::EngineError;
use poker_hud::infra::rng::DeterministicRng;

/// Утилита: карта из записи вида "Ah".
fn card(s: &str) -> Card {
    s.parse().expect("valid card literal")
}

// ====================== CARDS & WIRE FORMAT ======================

#[test]
fn card_wire_format_uses_suit_and_rank_codes() {
    assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_wire(), "16,14");
    assert_eq!(Card::new(Rank::Two, Suit::Clubs).to_wire(), "02,02");
    assert_eq!(Card::new(Rank::Jack, Suit::Hearts).to_wire(), "08,11");
    assert_eq!(Card::new(Rank::Ten, Suit::Diamonds).to_wire(), "04,10");
}

#[test]
fn every_card_survives_wire_format() {
    for card in Deck::standard_52().cards {
        let parsed = parse_card(&card.to_wire()).expect("canonical form must parse");
        assert_eq!(parsed, card, "Карта {card} должна читаться из своего формата");
    }
}

#[test]
fn display_and_from_str_use_short_form() {
    let c = card("Td");
    assert_eq!(c, Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(c.to_string(), "Td");
    assert!("Xx".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
}

#[test]
fn legacy_letter_tokens_are_normalized() {
    assert_eq!(normalize_card_token("S10").unwrap(), "16,10");
    assert_eq!(normalize_card_token("HT").unwrap(), "08,10");
    assert_eq!(normalize_card_token("H5").unwrap(), "08,05");
    assert_eq!(parse_card("SA").unwrap(), card("As"));
    assert_eq!(parse_card("dk").unwrap(), card("Kd"));
}

#[test]
fn legacy_compact_tokens_are_normalized() {
    assert_eq!(parse_card("1614").unwrap(), card("As"));
    assert_eq!(parse_card("811").unwrap(), card("Jh"));
    assert_eq!(parse_card("85").unwrap(), card("5h"));
    assert_eq!(parse_card("412").unwrap(), card("Qd"));
    assert_eq!(parse_card("168").unwrap(), card("8s"));
}

#[test]
fn malformed_tokens_are_rejected() {
    for bad in ["", "XYZ", "16,15", "99,99", "16,", "Z5"] {
        assert!(
            matches!(parse_card(bad), Err(CardParseError::MalformedCardToken(_))),
            "Запись {bad:?} должна отвергаться"
        );
    }
}

#[test]
fn lenient_parse_drops_only_bad_tokens() {
    let (cards, dropped) = parse_cards_lenient(&["16,14", "oops", "08,13"]);
    assert_eq!(cards, vec![card("As"), card("Kh")]);
    assert_eq!(
        dropped,
        vec![CardParseError::MalformedCardToken("oops".to_string())]
    );
}

// ====================== DECK ======================

#[test]
fn deck_excluding_known_cards() {
    let known = [card("As"), card("Kd"), card("2c")];
    let deck = Deck::excluding(&known).unwrap();

    assert_eq!(deck.len(), 49);
    for c in &known {
        assert!(!deck.contains(c), "Известная карта {c} не должна быть в колоде");
    }
}

#[test]
fn deck_excluding_rejects_duplicates() {
    let err = Deck::excluding(&[card("As"), card("As")]).unwrap_err();
    assert_eq!(err, EngineError::DuplicateCard(card("As")));
}

#[test]
fn drawing_is_without_replacement_until_empty() {
    let mut rng = DeterministicRng::from_seed(11);
    let mut deck = Deck::standard_52();
    let mut seen = std::collections::HashSet::new();

    for _ in 0..52 {
        let c = deck.draw(&mut rng).unwrap();
        assert!(seen.insert(c), "Карта {c} вытянута дважды");
    }
    assert!(deck.is_empty());
    assert_eq!(deck.draw(&mut rng), Err(EngineError::EmptyDeck));
}

#[test]
fn failed_draw_n_keeps_the_deck_intact() {
    let mut rng = DeterministicRng::from_seed(5);
    let mut deck = Deck::excluding(&Deck::standard_52().cards[..50]).unwrap();
    assert_eq!(deck.len(), 2);

    assert_eq!(deck.draw_n(3, &mut rng), Err(EngineError::EmptyDeck));
    assert_eq!(deck.len(), 2, "Взятые карты должны вернуться в колоду");
}

// ====================== LABELS ======================

#[test]
fn action_labels_round_trip_through_text() {
    let labels = [
        (ActionLabel::None, ""),
        (ActionLabel::SmallBlind(Chips(5)), "SB 5"),
        (ActionLabel::BigBlind(Chips(10)), "BB 10"),
        (ActionLabel::Fold, "Fold"),
        (ActionLabel::Check, "Check"),
        (ActionLabel::Call(Chips(20)), "Call 20"),
        (ActionLabel::Bet(Chips(40)), "Bet 40"),
        (ActionLabel::Raise(Chips(120)), "Raise 120"),
        (ActionLabel::AllIn(Chips(300)), "All-in 300"),
    ];

    for (label, text) in labels {
        assert_eq!(label.to_string(), text);
        assert_eq!(text.parse::<ActionLabel>().unwrap(), label);
    }
    assert!("Shove 10".parse::<ActionLabel>().is_err());
}

#[test]
fn position_and_street_labels() {
    assert_eq!(Position::UtgPlus1.to_string(), "+1");
    assert_eq!("BU".parse::<Position>().unwrap(), Position::Bu);
    assert!("MP".parse::<Position>().is_err());

    assert_eq!(Street::Preflop.to_string(), "Preflop");
    assert_eq!("showdown".parse::<Street>().unwrap(), Street::Showdown);
    assert_eq!(Street::Preflop.next(), Some((Street::Flop, 3)));
    assert_eq!(Street::River.next(), Some((Street::Showdown, 0)));
    assert_eq!(Street::Showdown.next(), None);
    assert_eq!(Street::from_board_len(4), Some(Street::Turn));
    assert_eq!(Street::from_board_len(2), None);
}

// ====================== PLAYER & TABLE ======================

#[test]
fn commit_is_clamped_to_stack_and_marks_all_in() {
    let mut p = Player::new("Hero", Chips(30));

    let paid = p.commit(Chips(50));
    assert_eq!(paid, Chips(30));
    assert_eq!(p.stack, Chips::ZERO);
    assert_eq!(p.current_bet, Chips(30));
    assert_eq!(p.status, PlayerStatus::AllIn);
    assert!(!p.can_act());
    assert!(p.is_live());
}

#[test]
fn new_table_has_eight_visible_empty_seats() {
    let table = Table::new();
    assert_eq!(table.seats.len(), 8);
    assert_eq!(table.visible_count(), 8);
    assert_eq!(table.seats[0].name, "P1");
    assert_eq!(table.seats[7].name, "P8");
    assert!(table.seats.iter().all(|p| p.stack.is_zero()));
    assert_eq!(table.street, Street::Preflop);
}
