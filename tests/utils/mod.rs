use std::path::{Path, PathBuf};

use perf_trends::{Event, EventDataset, WorkPerformance};

/// Three events in 1920 (jazz, opera, jazz)
#[must_use]
pub fn genre_events_1920() -> Vec<Event> {
    vec![
        Event::new("A", 1920).with_genre("jazz"),
        Event::new("B", 1920).with_genre("opera"),
        Event::new("C", 1920).with_genre("jazz"),
    ]
}

/// A mixed dataset spanning several years, with nested works
#[must_use]
pub fn mixed_events() -> Vec<Event> {
    let mozart = |work: &str| {
        WorkPerformance::new("42", work)
            .with_nationalities(["Austria"])
            .with_labels(Some("Mozart".to_string()), None)
    };
    let ravel = |work: &str| WorkPerformance::new("7", work).with_nationalities(["France"]);
    let weill = |work: &str| {
        WorkPerformance::new("9", work).with_nationalities(["Germany", "United States"])
    };

    let mut events = genre_events_1920();
    events[0] = events[0].clone().with_work(ravel("w-bolero"));
    events.extend([
        Event::new("D", 1950)
            .with_genre("symphony")
            .with_work(mozart("w-40"))
            .with_work(mozart("w-41")),
        Event::new("E", 1950).with_genre("Opera").with_work(weill("w-mahagonny")),
        Event::new("F", 1951).with_genre("chamber"),
        Event::new("G", 1951)
            .with_genre("symphony")
            .with_work(ravel("w-bolero"))
            .with_work(WorkPerformance::default()),
    ]);
    events
}

#[must_use]
pub fn dataset(events: &[Event]) -> EventDataset {
    EventDataset::from_events(events).expect("fixture events form a valid dataset")
}

/// Write a file into a directory and return its path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write fixture file");
    path
}

/// A raw export with one row per (event, work), including a repeated event
/// and an undated one
pub const RAW_EVENTS_CSV: &str = "\
event,date,genreLabel,composer,composerLabel,workperformed,title
http://data/event/1,1920-02-01,Jazz,http://data/composer/Q7,Ravel,http://data/work/W1,Bolero
http://data/event/2,1920-03-01,Opera,,,,
http://data/event/3,1920-04-01,jazz,,,,
http://data/event/4,1950-05-01,Symphony,http://data/composer/Q42,Mozart,http://data/work/W40,Symphony No. 40
http://data/event/4,1950-05-01,Symphony,http://data/composer/Q42,Mozart,http://data/work/W41,Symphony No. 41
http://data/event/5,1950-06-01,Opera,http://data/composer/Q9,Weill,http://data/work/W9,Mahagonny
http://data/event/6,unknown,Opera,http://data/composer/Q42,Mozart,http://data/work/W40,Symphony No. 40
";

/// Nationality table for the composers of [`RAW_EVENTS_CSV`]
pub const NATIONALITIES_CSV: &str = "\
composer,nationality
http://data/composer/Q7,France
http://data/composer/Q42,Austria
http://data/composer/Q9,Germany
http://data/composer/Q9,United States
";
