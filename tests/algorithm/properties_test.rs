//! Property-based tests for the frequency engine

use perf_trends::{
    Catalog, Category, Event, EventDataset, WorkPerformance, compute_frequencies,
};
use proptest::prelude::*;

/// Genres as stored, in the mixed case external data may carry
const GENRES: [&str; 6] = ["jazz", "Jazz", "Opera", "opera", "symphony", "CHAMBER"];
const COMPOSERS: [&str; 3] = ["7", "9", "42"];
const NATIONS: [&str; 3] = ["Austria", "France", "Germany"];

fn work_strategy() -> impl Strategy<Value = WorkPerformance> {
    (
        prop::sample::select(COMPOSERS.to_vec()),
        0usize..4,
        prop::sample::subsequence(NATIONS.to_vec(), 0..=NATIONS.len()),
    )
        .prop_map(|(composer, work, nations)| {
            WorkPerformance::new(composer, format!("w{work}")).with_nationalities(nations)
        })
}

fn events_strategy() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(
        (
            1900i32..1905,
            prop::sample::select(GENRES.to_vec()),
            prop::collection::vec(work_strategy(), 0..4),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (year, genre, works))| {
                let mut event = Event::new(format!("e{i}"), year);
                event.genre = Some(genre.to_string());
                works.into_iter().fold(event, Event::with_work)
            })
            .collect()
    })
}

fn events_in(events: &[Event], year: i32) -> usize {
    events.iter().filter(|e| e.year == year).count()
}

const YEARS: [i32; 6] = [1899, 1900, 1901, 1902, 1903, 1904];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_normalized_values_are_proportions(
        events in events_strategy(),
        nation in prop::sample::select(NATIONS.to_vec()),
        composer in prop::sample::select(COMPOSERS.to_vec()),
    ) {
        let dataset = EventDataset::from_events(&events).unwrap();
        let selections = [
            ("Nationality", nation),
            ("Composer", composer),
            ("Genre", "jazz"),
            ("Work", "w1"),
        ];
        for (category, value) in selections {
            let counts = compute_frequencies(&dataset, &YEARS, category, value, false).unwrap();
            let shares = compute_frequencies(&dataset, &YEARS, category, value, true).unwrap();
            for ((year, count), share) in YEARS.iter().zip(&counts).zip(&shares) {
                prop_assert!((0.0..=1.0).contains(share));
                let total = events_in(&events, *year);
                if total == 0 {
                    prop_assert_eq!(*share, 0.0);
                    prop_assert_eq!(*count, 0.0);
                } else {
                    prop_assert!((share - count / total as f64).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn prop_genres_partition_each_year(events in events_strategy()) {
        let dataset = EventDataset::from_events(&events).unwrap();
        let genres = Catalog::from_dataset(&dataset).unwrap().values(Category::Genre);

        let mut sums = vec![0.0; YEARS.len()];
        for genre in &genres {
            let counts =
                compute_frequencies(&dataset, &YEARS, "Genre", genre.as_str(), false).unwrap();
            for (sum, count) in sums.iter_mut().zip(counts) {
                *sum += count;
            }
        }

        for (year, sum) in YEARS.iter().zip(sums) {
            prop_assert_eq!(sum, events_in(&events, *year) as f64);
        }
    }

    #[test]
    fn prop_composer_counts_match_a_row_scan(
        events in events_strategy(),
        composer in prop::sample::select(COMPOSERS.to_vec()),
    ) {
        let dataset = EventDataset::from_events(&events).unwrap();
        let counts = compute_frequencies(&dataset, &YEARS, "Composer", composer, false).unwrap();

        for (year, count) in YEARS.iter().zip(counts) {
            let expected = events
                .iter()
                .filter(|e| e.year == *year)
                .filter(|e| {
                    e.works
                        .iter()
                        .any(|w| w.composer_id.as_deref() == Some(composer))
                })
                .count();
            prop_assert_eq!(count, expected as f64);
        }
    }

    #[test]
    fn prop_nationality_union_is_monotone(
        events in events_strategy(),
        first in prop::sample::select(NATIONS.to_vec()),
        second in prop::sample::select(NATIONS.to_vec()),
    ) {
        let dataset = EventDataset::from_events(&events).unwrap();
        let single = compute_frequencies(&dataset, &YEARS, "Nationality", [first], false).unwrap();
        let union =
            compute_frequencies(&dataset, &YEARS, "Nationality", [first, second], false).unwrap();
        for (one, both) in single.iter().zip(&union) {
            prop_assert!(one <= both);
        }
    }
}
