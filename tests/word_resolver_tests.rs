use fallter::core::words::{find_candidates, find_words};
use fallter::core::{calculate_score, resolve, Board, Dictionary, Orientation, WordList};

#[test]
fn test_longest_word_swallows_nested_readings() {
    let dict = WordList::from_words(["cart", "carts", "arts"]);
    let board = Board::from_rows(&["CARTS"]);

    assert_eq!(find_candidates(&board, &dict).len(), 3);

    let words = find_words(&board, &dict);
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].word, "CARTS");
    assert_eq!(words[0].orientation, Orientation::Horizontal);
    assert_eq!((words[0].line, words[0].start, words[0].len), (8, 0, 5));
}

#[test]
fn test_reverse_reading_counts() {
    let dict = WordList::from_words(["rots"]);
    let board = Board::from_rows(&["..STOR"]);

    let words = find_words(&board, &dict);
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].word, "ROTS");
    assert!(words[0].reversed);
    assert_eq!(words[0].start, 2);
}

#[test]
fn test_short_runs_never_match() {
    let dict = WordList::from_words(["cat", "at"]);
    let board = Board::from_rows(&["CAT.AT"]);
    assert!(find_words(&board, &dict).is_empty());
}

#[test]
fn test_gap_splits_words() {
    let dict = WordList::from_words(["stone"]);
    let board = Board::from_rows(&["ST.ONE"]);
    assert!(find_words(&board, &dict).is_empty());
}

#[test]
fn test_crossing_words_share_a_cell() {
    let dict = WordList::from_words(["tile", "earn"]);
    let board = Board::from_rows(&["T", "I", "L", "EARN"]);

    let res = resolve(&board, &dict, 0);
    assert_eq!(res.words.len(), 2);
    assert!(res
        .words
        .iter()
        .any(|w| w.word == "TILE" && w.orientation == Orientation::Vertical));
    assert!(res
        .words
        .iter()
        .any(|w| w.word == "EARN" && w.orientation == Orientation::Horizontal));

    // The shared E is cleared once.
    assert_eq!(res.cleared.len(), 7);
    assert!(res.cleared.contains(0, 8));
    assert_eq!(res.points, 80);
    assert_eq!(res.combo, 2);
    assert_eq!(res.score_delta, 160);
}

#[test]
fn test_clear_set_covers_every_kept_word() {
    let dict = WordList::from_words(["stone", "meat"]);
    let board = Board::from_rows(&["MEAT", "STONE"]);

    let res = resolve(&board, &dict, 0);
    for word in &res.words {
        for (x, y) in word.cells() {
            assert!(res.cleared.contains(x, y), "{} at ({}, {})", word.word, x, y);
        }
    }
    assert_eq!(res.cleared.len(), 9);
}

#[test]
fn test_combo_multiplies_points() {
    let score = calculate_score([4, 5], 1);
    assert_eq!(score.points, 90);
    assert_eq!(score.combo, 3);
    assert_eq!(score.total, 270);

    let nothing = calculate_score(Vec::<usize>::new(), 4);
    assert_eq!(nothing.combo, 0);
    assert_eq!(nothing.total, 0);
}

#[test]
fn test_nothing_found_is_empty_resolution() {
    let dict = WordList::from_words(["stone"]);
    let res = resolve(&Board::from_rows(&["QZXJ"]), &dict, 3);
    assert!(res.is_empty());
    assert!(res.cleared.is_empty());
    assert_eq!(res.combo, 0);
    assert_eq!(res.score_delta, 0);
}

#[test]
fn test_dictionary_is_case_insensitive() {
    let dict = WordList::from_words(["Stone", " EARN "]);
    assert!(dict.contains("stone"));
    assert!(dict.contains("STONE"));
    assert!(dict.contains("earn"));
    assert_eq!(dict.len(), 2);

    let loaded = WordList::from_reader("tile\n\nLITE\n".as_bytes()).unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.contains("lite"));
}
