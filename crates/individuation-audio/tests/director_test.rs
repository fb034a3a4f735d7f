//! Integration tests for the audio director subscribed to a journey store.

mod common;

use common::SinkCall;
use individuation_audio::domain::tracks::BgmTrack;
use individuation_narrative::domain::chapter::Chapter;
use individuation_narrative::domain::commands::JourneyCommand;
use individuation_narrative::domain::phase::Phase;
use individuation_narrative::domain::script::Milestone;

fn loop_of(key: &str) -> SinkCall {
    SinkCall::Loop(format!("/audio/{key}"))
}

#[test]
fn test_title_music_waits_for_the_first_interaction() {
    // Arrange
    let (mut store, director, sink) = common::store_with_director();

    // Act
    director.lock().unwrap().on_first_interaction();
    store
        .dispatch(JourneyCommand::advance(Phase::Prologue))
        .unwrap();

    // Assert
    assert_eq!(
        sink.calls(),
        vec![
            loop_of("bgm-title.mp3"),
            SinkCall::Stop,
            loop_of("bgm-prologue.mp3"),
        ]
    );
}

#[test]
fn test_listening_sequence_pauses_and_resumes_the_chapter_track() {
    // Arrange
    let (mut store, director, sink) = common::store_with_director();
    common::walk_to(&mut store, Phase::Chapter2Intro);
    sink.clear();

    // Act
    common::walk_to(&mut store, Phase::Chapter2Imprint);

    // Assert
    assert_eq!(sink.calls(), vec![SinkCall::Pause, SinkCall::Resume]);
    assert_eq!(
        director.lock().unwrap().current_track(),
        Some(BgmTrack::Chapter2)
    );
}

#[test]
fn test_reward_events_cue_item_and_knowledge() {
    // Arrange
    let (mut store, _director, sink) = common::store_with_director();
    common::walk_to(&mut store, Phase::Chapter2Choice);
    sink.clear();

    // Act
    store.dispatch(Milestone::InnerVoice.beat()).unwrap();

    // Assert
    assert_eq!(
        sink.calls(),
        vec![
            SinkCall::Once("/audio/sfx-item.mp3".to_owned()),
            SinkCall::Once("/audio/sfx-knowledge.mp3".to_owned()),
            SinkCall::Stop,
            loop_of("bgm-jitan.wav"),
        ]
    );
}

#[test]
fn test_replayed_reward_cues_nothing() {
    // Arrange
    let (mut store, _director, sink) = common::store_with_director();
    common::walk_to(&mut store, Phase::PrologueQuest);
    store.dispatch(Milestone::PrologueQuest.beat()).unwrap();
    sink.clear();

    // Act
    store.dispatch(Milestone::PrologueQuest.beat()).unwrap();

    // Assert
    assert!(sink.calls().is_empty());
}

#[test]
fn test_navigating_within_the_same_chapter_keeps_the_track_playing() {
    // Arrange
    let (mut store, _director, sink) = common::store_with_director();
    common::walk_to(&mut store, Phase::Chapter3RootQ);
    sink.clear();

    // Act
    store
        .dispatch(JourneyCommand::navigate_to_chapter(Chapter::Chapter3))
        .unwrap();

    // Assert
    assert!(sink.calls().is_empty());
}

#[test]
fn test_restart_stops_the_background_and_silences_the_title() {
    // Arrange
    let (mut store, director, sink) = common::store_with_director();
    common::walk_to(&mut store, Phase::Chapter1Intro);
    sink.clear();

    // Act
    store.restart();

    // Assert
    assert_eq!(sink.calls(), vec![SinkCall::Stop]);
    assert_eq!(director.lock().unwrap().current_track(), None);

    director.lock().unwrap().on_first_interaction();
    assert_eq!(sink.calls().last(), Some(&loop_of("bgm-title.mp3")));
}
