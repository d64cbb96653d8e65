//! Config files and session records on disk.

use std::io::Write;
use tabletop::{AppConfig, Outcome, SessionReport, line_channel};
use tabletop::{PlayerKind, PlayerSpec, SessionSpec, console};
use tabletop_core::GameKind;

#[test]
fn test_loads_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "smart_depth = 2\nthink_delay_ms = 0\nmax_turns = 40\nseed = 17").unwrap();

    let config = AppConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.smart_depth(), 2);
    assert_eq!(*config.think_delay_ms(), 0);
    assert_eq!(config.limits().max_turns, 40);
    assert_eq!(config.limits().max_rejections, 3);
    assert_eq!(*config.seed(), Some(17));
}

#[test]
fn test_missing_or_broken_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(AppConfig::from_file(dir.path().join("absent.toml")).is_err());

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "smart_depth = \"deep\"").unwrap();
    let err = AppConfig::from_file(&broken).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_word_list_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "cat dog\nhorse\n").unwrap();

    let options = AppConfig::default()
        .with_dictionary(words)
        .game_options()
        .unwrap();
    let dictionary = options.dictionary.unwrap();
    assert_eq!(dictionary.len(), 2);
    assert!(dictionary.contains("CAT"));

    let empty = dir.path().join("empty.txt");
    std::fs::write(&empty, "horse zebra").unwrap();
    assert!(AppConfig::default().with_dictionary(empty).game_options().is_err());
}

#[tokio::test]
async fn test_recorded_session_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("game.json");
    let config = AppConfig::default().with_seed(5).with_think_delay_ms(0);
    let spec = SessionSpec {
        game: GameKind::Misere,
        x: PlayerSpec::new(PlayerKind::Random, None, "X"),
        o: PlayerSpec::new(PlayerKind::Smart, None, "O"),
    };
    let (_tx, input) = line_channel();

    let report = console::play_session(&spec, &config, &input, Some(&record))
        .await
        .unwrap();
    assert!(matches!(report.outcome(), Outcome::Won(_) | Outcome::Draw));

    let text = std::fs::read_to_string(&record).unwrap();
    let loaded: SessionReport = serde_json::from_str(&text).unwrap();
    assert_eq!(loaded, report);
    assert_eq!(loaded.player_x(), "Random X");
    assert_eq!(loaded.moves()[0].turn(), &1);
}
