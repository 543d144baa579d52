use crate::utils::{dataset, genre_events_1920, mixed_events};
use perf_trends::{
    Catalog, Category, Error, Event, EventDataset, FrequencyEngine, FrequencySeries,
    YearSelection, compute_frequencies, compute_resolved, resolve,
};

#[test]
fn test_genre_counts_for_1920() -> perf_trends::Result<()> {
    let dataset = dataset(&genre_events_1920());

    assert_eq!(
        compute_frequencies(&dataset, &[1920], "Genre", "jazz", false)?,
        vec![2.0]
    );

    let normalized = compute_frequencies(&dataset, &[1920], "Genre", "jazz", true)?;
    assert_eq!(normalized.len(), 1);
    assert!((normalized[0] - 2.0 / 3.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_composer_by_identifier() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());

    let query = resolve("Composer", "Mozart (#42)")?;
    assert_eq!(query.field(), "composer_id");
    assert_eq!(query.label(), "42");

    assert_eq!(
        compute_frequencies(&dataset, &[1950], "Composer", "42", false)?,
        vec![1.0]
    );
    assert_eq!(compute_resolved(&dataset, &[1950], &query, false)?, vec![1.0]);
    Ok(())
}

#[test]
fn test_results_follow_input_year_order() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    let result = compute_frequencies(&dataset, &[1951, 1800, 1920], "Work", "w-bolero", false)?;
    assert_eq!(result, vec![1.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn test_empty_year_sequence() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    assert!(compute_frequencies(&dataset, &[], "Genre", "jazz", true)?.is_empty());
    Ok(())
}

#[test]
fn test_years_without_events_are_zero() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    for category in ["Genre", "Nationality", "Work", "Composer"] {
        for normalize in [false, true] {
            let result = compute_frequencies(&dataset, &[1800, 2100], category, "x", normalize)?;
            assert_eq!(result, vec![0.0, 0.0], "{category} normalize={normalize}");
        }
    }
    Ok(())
}

#[test]
fn test_years_without_works_are_zero() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    // 1920 has works only on event A; event F in 1951 has none at all
    assert_eq!(
        compute_frequencies(&dataset, &[1920], "Composer", "42", false)?,
        vec![0.0]
    );
    assert_eq!(
        compute_frequencies(&dataset, &[1951], "Nationality", "Austria", true)?,
        vec![0.0]
    );
    Ok(())
}

#[test]
fn test_genre_is_case_insensitive() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    let years = [1920, 1950, 1951];
    let lower = compute_frequencies(&dataset, &years, "Genre", "opera", false)?;
    assert_eq!(compute_frequencies(&dataset, &years, "Genre", "Opera", false)?, lower);
    assert_eq!(compute_frequencies(&dataset, &years, "Genre", "OPERA", false)?, lower);
    assert_eq!(lower, vec![1.0, 1.0, 0.0]);
    Ok(())
}

#[test]
fn test_mixed_case_stored_genres_partition_the_year() -> perf_trends::Result<()> {
    let events: Vec<Event> = [("a", "Jazz"), ("b", "jazz"), ("c", "OPERA")]
        .into_iter()
        .map(|(id, genre)| {
            let mut event = Event::new(id, 1920);
            event.genre = Some(genre.to_string());
            event
        })
        .collect();
    let dataset = dataset(&events);

    let genres = Catalog::from_dataset(&dataset)?.values(Category::Genre);
    assert_eq!(genres, vec!["jazz", "opera"]);

    let mut total = 0.0;
    for genre in &genres {
        total += compute_frequencies(&dataset, &[1920], "Genre", genre.as_str(), false)?[0];
    }
    assert_eq!(total, 3.0);
    assert_eq!(
        compute_frequencies(&dataset, &[1920], "Genre", "Jazz", false)?,
        vec![2.0]
    );
    Ok(())
}

#[test]
fn test_identifiers_are_case_sensitive() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    assert_eq!(
        compute_frequencies(&dataset, &[1920], "Work", "W-BOLERO", false)?,
        vec![0.0]
    );
    Ok(())
}

#[test]
fn test_nationality_is_a_union() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    let years = [1920];

    let either = ["France", "Germany"];
    assert_eq!(
        compute_frequencies(&dataset, &years, "Nationality", either, false)?,
        vec![1.0]
    );
    assert_eq!(
        compute_frequencies(&dataset, &years, "Nationality", ["Germany"], false)?,
        vec![0.0]
    );
    assert_eq!(
        compute_frequencies(&dataset, &years, "Nationality", "France", false)?,
        vec![1.0]
    );

    // Event E's composer holds both nationalities; it still counts once
    let both = ["Germany", "United States"];
    assert_eq!(
        compute_frequencies(&dataset, &[1950], "Nationality", both, false)?,
        vec![1.0]
    );
    Ok(())
}

#[test]
fn test_multiple_matching_works_count_once() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    // Event D performs two Mozart works
    assert_eq!(
        compute_frequencies(&dataset, &[1950], "Composer", "42", false)?,
        vec![1.0]
    );
    assert_eq!(
        compute_frequencies(&dataset, &[1950], "Nationality", "Austria", true)?,
        vec![0.5]
    );
    Ok(())
}

#[test]
fn test_calls_are_idempotent() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    let before = dataset.batch().clone();
    let years = [1920, 1950, 1951];

    let first = compute_frequencies(&dataset, &years, "Work", "w-bolero", true)?;
    let second = compute_frequencies(&dataset, &years, "Work", "w-bolero", true)?;
    assert_eq!(first, second);
    assert_eq!(dataset.batch(), &before);
    Ok(())
}

#[test]
fn test_caller_errors() {
    let dataset = dataset(&mixed_events());
    assert!(matches!(
        compute_frequencies(&dataset, &[1920], "Decade", "1920s", false),
        Err(Error::UnknownCategory(_))
    ));
    assert!(matches!(resolve("Work", "Bolero"), Err(Error::MalformedIdentifier { .. })));
    assert!(matches!(
        compute_frequencies(&dataset, &[1920], "Nationality", Vec::<String>::new(), false),
        Err(Error::EmptySelection { .. })
    ));
}

#[test]
fn test_engine_on_an_empty_dataset() -> perf_trends::Result<()> {
    let dataset = EventDataset::empty();
    let query = resolve("Genre", "jazz")?;
    let tallies = FrequencyEngine::new(&dataset).tally(&[1920], &query)?;
    assert_eq!(tallies[0].events, 0);
    assert_eq!(tallies[0].frequency(true), 0.0);
    Ok(())
}

#[test]
fn test_series_over_all_dataset_years() -> perf_trends::Result<()> {
    let dataset = dataset(&mixed_events());
    let query = resolve("Composer", "Mozart (#42)")?;
    let series = FrequencySeries::compute(&dataset, YearSelection::All, &query, false)?;

    assert_eq!(series.title, "Performances of Composer: 42 by Year");
    let years: Vec<i32> = series.points.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![1920, 1950, 1951]);
    let counts: Vec<f64> = series.points.iter().map(|p| p.frequency).collect();
    assert_eq!(counts, vec![0.0, 1.0, 0.0]);
    Ok(())
}
