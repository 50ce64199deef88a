//! The synchronous lessons, exercised through the public API.

use std::sync::Arc;

use idiomkit::announcer::{CompletionSignal, RecordingSink, SharedAnnouncer};
use idiomkit::config::AnnouncerConfig;
use idiomkit::executor::{SchedulingPolicy, SteppedExecutor};
use idiomkit::fixtures::{
    catalog_updater_fixture, test_data_path, CatalogUpdater, DirFilesContainer, MANIFEST,
    MANIFEST_NO_ENTRY,
};
use idiomkit::introducer::{
    verify_introduction, who_is_it, LessSimpleIntroducer, SafeIntroducer, SimpleIntroducer,
};
use idiomkit::mock::{MockDownloader, Spy};
use idiomkit::tweets::{
    search_url, ComposedTweetList, JsonResponseParser, StiffTweetGetter, TweetGetter,
};
use idiomkit::Error;

#[test]
fn introducers_follow_their_templates() {
    verify_introduction("It's Poppy", &who_is_it("Poppy")).unwrap();
    verify_introduction("It's Poppy", &SimpleIntroducer.who_is_it("Poppy")).unwrap();
    verify_introduction(
        "Taylor Swift says \"It's Poppy\"",
        &LessSimpleIntroducer::default().who_is_it("Poppy"),
    )
    .unwrap();
    verify_introduction("It's Poppy", &SafeIntroducer::who_is_it("Poppy")).unwrap();
}

#[test]
fn introductions_are_idempotent() {
    let introducer = LessSimpleIntroducer::new("Beyonce");
    let spy = Spy::new(|name: String| introducer.who_is_it(&name));

    for _ in 0..5 {
        spy.call("Poppy".to_string());
    }

    let calls = spy.calls();
    assert_eq!(calls.len(), 5);
    assert!(calls.windows(2).all(|w| w[0].result == w[1].result));
    assert_eq!(calls[0].result, "Beyonce says \"It's Poppy\"");
}

#[test]
fn mismatched_introduction_halts() {
    let err = verify_introduction("It's Poppy", &who_is_it("Kanye")).unwrap_err();
    assert!(matches!(err, Error::AssertionFailed(_)));
}

#[test]
fn injected_mock_replaces_the_network() {
    let mock = MockDownloader::new();
    let getter = TweetGetter::new(mock.clone(), JsonResponseParser);
    let url = search_url().unwrap();

    let tweets = getter.get_tweets(&url).unwrap();

    assert_eq!(tweets.len(), 3);
    assert_eq!(tweets[2].author, "beyonce");
    assert!(mock.was_asked_for(&url));
}

#[test]
fn composed_list_survives_a_failing_download() {
    let mock = MockDownloader::new();
    let mut list = ComposedTweetList::new(
        search_url().unwrap(),
        TweetGetter::new(mock.clone(), JsonResponseParser),
    );

    assert_eq!(list.load().unwrap(), 3);

    mock.set_failure("rate limited");
    assert!(matches!(list.load(), Err(Error::Mock(_))));
    assert_eq!(list.displayed().len(), 3);
    assert_eq!(mock.request_count(), 2);
}

#[test]
fn stiff_getter_cannot_be_tested_offline() {
    assert!(matches!(
        StiffTweetGetter::new().get_tweets(&search_url().unwrap()),
        Err(Error::Network(_))
    ));
}

#[test]
fn manifests_from_test_data_directory() {
    let updater = CatalogUpdater::new(DirFilesContainer::test_data());

    assert!(test_data_path(MANIFEST).is_file());
    assert_eq!(updater.load_manifest(MANIFEST).unwrap().entries.len(), 2);
    assert!(updater.load_manifest(MANIFEST_NO_ENTRY).unwrap().is_empty());
    assert!(matches!(
        updater.load_manifest("missing.json"),
        Err(Error::MissingTestData(_))
    ));
}

#[test]
fn composed_fixture_matches_test_data() {
    let fixture = catalog_updater_fixture();
    let on_disk = CatalogUpdater::new(DirFilesContainer::test_data());

    assert_eq!(
        fixture.updater.load_manifest(MANIFEST).unwrap(),
        on_disk.load_manifest(MANIFEST).unwrap()
    );
    assert_eq!(fixture.files.reads(), vec![MANIFEST.to_string()]);
}

/// Schedules Taylor then Beyonce, lets the executor run exactly one task,
/// writes Kanye, then drains. Returns the announcer each handle emitted, in
/// scheduling order.
fn one_step_between_writes(policy: SchedulingPolicy) -> Vec<String> {
    let config = AnnouncerConfig::new().catchphrase("hi");
    let executor = SteppedExecutor::with_policy(policy);
    let signal = Arc::new(CompletionSignal::new());
    let announcer = SharedAnnouncer::new(
        executor.clone(),
        Arc::clone(&signal),
        Arc::new(RecordingSink::new()),
        &config,
    );

    announcer.set_announcer("Taylor Swift");
    let first = announcer.announce();
    announcer.set_announcer("Beyonce");
    let second = announcer.announce();

    assert!(executor.step());
    announcer.set_announcer("Kanye West");
    assert_eq!(executor.run_until_stalled(), 1);
    assert_eq!(signal.signaled_total(), 2);

    [first, second]
        .iter()
        .map(|handle| {
            let line = handle.line().unwrap();
            line.split(" says ").next().unwrap().to_string()
        })
        .collect()
}

#[test]
fn schedule_decides_which_announcement_sees_the_late_write() {
    assert_eq!(
        one_step_between_writes(SchedulingPolicy::Fifo),
        vec!["Beyonce", "Kanye West"]
    );
    assert_eq!(
        one_step_between_writes(SchedulingPolicy::Lifo),
        vec!["Kanye West", "Beyonce"]
    );
}

#[test]
fn seeded_schedule_replays_and_differs_across_seeds() {
    let seed_one = one_step_between_writes(SchedulingPolicy::SeededRandom(1));
    let seed_two = one_step_between_writes(SchedulingPolicy::SeededRandom(2));

    assert_eq!(seed_one, one_step_between_writes(SchedulingPolicy::SeededRandom(1)));
    assert_eq!(seed_two, one_step_between_writes(SchedulingPolicy::SeededRandom(2)));

    // Seed 1 runs the second announcement first, seed 2 the first.
    assert_eq!(seed_one, vec!["Kanye West", "Beyonce"]);
    assert_eq!(seed_two, vec!["Beyonce", "Kanye West"]);
    assert_ne!(seed_one, seed_two);
}
