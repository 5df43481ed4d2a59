// tests/eval_compare_tests.rs

use big_two_engine::domain::card::{parse_cards, Card};
use big_two_engine::domain::hand::Hand;
use big_two_engine::eval::{classify, contains_bomb, is_greater, legal_plays};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn beats(table: &str, candidate: &str) -> bool {
    is_greater(&cards(table), &cards(candidate))
}

//
// Одиночки, пары, тройки
//
#[test]
fn singles_compare_rank_then_suit() {
    assert!(beats("3d", "4d"));
    assert!(beats("9d", "9s"));
    assert!(beats("Ah", "2d"));
    assert!(beats("2h", "2s"));
    assert!(!beats("2s", "2h"));
    assert!(!beats("4d", "3s"));
}

#[test]
fn pairs_and_triples_compare_top_card() {
    assert!(beats("9d 9c", "Td Tc"));
    assert!(beats("9d 9h", "9c 9s"));
    assert!(!beats("9c 9s", "9d 9h"));
    assert!(beats("Kd Kc Kh", "Ad Ac Ah"));
    assert!(!beats("2d 2c 2h", "Ad Ac Ah"));
}

//
// Пятикарточные
//
#[test]
fn higher_category_wins_among_five_card_hands() {
    // флеш бьёт стрит, фулл-хаус бьёт флеш, каре бьёт фулл-хаус, стрит-флеш бьёт каре
    assert!(beats("Td Jc Qh Ks Ad", "3d 5d 7d 9d Jd"));
    assert!(beats("3s 5s 7s 9s Js", "3d 3c 3h 4s 4d"));
    assert!(beats("Ad Ac Ah Ks Kd", "4d 4c 4h 4s 3d"));
    assert!(beats("2d 2c 2h 2s Ad", "3h 4h 5h 6h 7h"));
    assert!(!beats("3h 4h 5h 6h 7h", "2d 2c 2h 2s Ad"));
}

#[test]
fn straight_flush_compares_suit_before_rank() {
    assert!(beats("3d 4d 5d 6d 7d", "3c 4c 5c 6c 7c"));
    assert!(beats("9d Td Jd Qd Kd", "3c 4c 5c 6c 7c"));
    assert!(beats("3h 4h 5h 6h 7h", "4h 5h 6h 7h 8h"));
    assert!(!beats("4h 5h 6h 7h 8h", "3h 4h 5h 6h 7h"));
}

#[test]
fn four_of_a_kind_and_full_house_compare_group_rank() {
    assert!(!beats("5d 5c 5h 5s 3d", "4d 4c 4h 4s Ad"));
    assert!(beats("4d 4c 4h 4s Ad", "5d 5c 5h 5s 3d"));
    assert!(beats("3d 3c 3h Ks Kd", "4d 4c 4h 5s 5d"));
    assert!(!beats("Qd Qc Qh 3s 3d", "Jd Jc Jh 2s 2d"));
}

#[test]
fn flush_compares_suit_then_ranks_from_top() {
    assert!(!beats("3s 5s 7s 9s Js", "4h 6h 8h Th Ah"));
    assert!(beats("4h 6h 8h Th Ah", "3s 5s 7s 9s Js"));
    assert!(beats("3h 5h 7h 9h Jh", "3h 5h 7h 9h Qh"));
    assert!(beats("3h 5h 7h 9h Jh", "3h 5h 8h 9h Jh"));
}

#[test]
fn straight_compares_ranks_then_top_suit() {
    assert!(beats("3d 4c 5h 6s 7d", "4d 5c 6h 7s 8d"));
    assert!(beats("3d 4c 5h 6s 7d", "3c 4d 5s 6h 7s"));
    assert!(!beats("3c 4d 5s 6h 7s", "3d 4c 5h 6s 7d"));
}

//
// Граничные случаи
//
#[test]
fn mismatched_or_invalid_inputs_never_win() {
    assert!(!beats("3d", "4d 4c"));
    assert!(!beats("4d 4c", "5d"));
    assert!(!beats("3d", "4d 5c"), "недопустимый кандидат");
    assert!(!beats("3d 4c", "5d"), "недопустимый стол");
    assert!(!beats("3d", "3d 4c 5h 6s"));
}

#[test]
fn thirteen_card_hands_are_never_compared() {
    let dragon = "3d 4c 5h 6s 7d 8c 9h Ts Jd Qc Kh As 2d";
    let same_suit = "3s 4s 5s 6s 7s 8s 9s Ts Js Qs Ks As 2s";
    assert!(!beats(dragon, same_suit));
    assert!(!beats(same_suit, dragon));
    assert!(is_greater(&[], &cards(dragon)), "пустой стол бьётся и драконом");
}

#[test]
fn no_combination_beats_itself() {
    for s in [
        "3d",
        "2s",
        "7d 7s",
        "Kd Kh Ks",
        "3d 4c 5h 6s 7d",
        "3d 5d 7d 9d Jd",
        "3d 3c 3h 5s 5d",
        "9d 9c 9h 9s 4d",
        "3d 4d 5d 6d 7d",
    ] {
        assert!(!beats(s, s), "{s} не должен бить сам себя");
    }
}

#[test]
fn empty_table_accepts_any_valid_combination() {
    assert!(is_greater(&[], &cards("3d 4d 5d 6d 7d")));
    assert!(is_greater(&[], &cards("Kd Kh Ks")));
    assert!(!is_greater(&[], &cards("3d 5h")));
    assert!(!is_greater(&[], &[]));
}

//
// legal_plays / contains_bomb
//
#[test]
fn legal_plays_on_opening_must_include_three_of_diamonds() {
    let hand = cards("3d 3c 4h 5s 6d 7c 9s");
    let three = Card::THREE_OF_DIAMONDS;
    let plays = legal_plays(&hand, None, Some(three));

    assert!(!plays.is_empty());
    assert!(plays.iter().all(|p| p.contains(&three)));
    assert!(plays.contains(&vec![three]));
    assert!(plays.contains(&cards("3d 3c")));
    assert!(plays.contains(&cards("3d 4h 5s 6d 7c")));
    assert!(plays.iter().all(|p| classify(p).is_some()));
}

#[test]
fn legal_plays_against_active_single() {
    let hand = cards("3d 3c 4h 5s 6d 7c");
    let active = Hand::new(cards("5s")).unwrap();
    // 5s в руке не важна: ищем только то, что бьёт стол
    let plays = legal_plays(&hand, Some(&active), None);
    assert_eq!(plays, vec![cards("6d"), cards("7c")]);
}

#[test]
fn legal_plays_empty_when_nothing_beats() {
    let hand = cards("3d 3c 4h 5s 6d 7c");
    let active = Hand::new(cards("4d 4s")).unwrap();
    assert!(legal_plays(&hand, Some(&active), None).is_empty());
}

#[test]
fn legal_plays_free_lead_lists_every_size() {
    let hand = cards("3s 4s 5s 6s 7s 8s 9s Ts Js Qs Ks As 2s");
    let plays = legal_plays(&hand, None, None);
    assert_eq!(plays.iter().filter(|p| p.len() == 1).count(), 13);
    assert_eq!(plays.iter().filter(|p| p.len() == 2).count(), 0);
    assert_eq!(plays.iter().filter(|p| p.len() == 5).count(), 1287, "все пятёрки: флеши");
    assert_eq!(plays.last().map(Vec::len), Some(13));
}

#[test]
fn contains_bomb_finds_hidden_bombs() {
    assert!(!contains_bomb(&cards("9d 9c 9h 9s")), "каре без пятой карты не бомба");
    assert!(contains_bomb(&cards("9d 9c 9h 9s 4d")));
    assert!(contains_bomb(&cards("3h Kd 4h 5h 6h 7h")));
    assert!(!contains_bomb(&cards("3d 4c 5h 6s 7d 8c")));
    assert!(!contains_bomb(&cards("3d 3c 3h 5s 5d Jd")));
    assert!(!contains_bomb(&[]));
}
