use fanfold::prelude::*;
use proptest::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct Reading {
    sensor: &'static str,
    celsius: Option<i32>,
}

const fn reading(sensor: &'static str, celsius: Option<i32>) -> Reading {
    Reading { sensor, celsius }
}

#[test]
fn prelude_covers_a_full_request() {
    let readings = vec![
        reading("north", Some(18)),
        reading("south", None),
        reading("east", Some(24)),
        reading("west", Some(24)),
    ];

    let (count, hottest, mean) = readings
        .get_count()
        .and_maximums_by(|r: &Reading| r.celsius)
        .and_nullable_average_by(|r: &Reading| r.celsius)
        .into_results()
        .expect("pass should complete");

    assert_eq!(count, 4);
    assert_eq!(
        hottest.iter().map(|r| r.sensor).collect::<Vec<_>>(),
        vec!["east", "west"]
    );
    assert_eq!(mean, Some(22.0));
}

#[test]
fn custom_consumer_plugs_into_a_request() {
    // Longest word, ties resolved to the earliest.
    struct Longest(Option<String>);

    impl Consumer<&str> for Longest {
        type Output = Option<String>;

        fn accept(&mut self, element: &&str) {
            let longer = self.0.as_ref().is_none_or(|best| element.len() > best.len());
            if longer {
                self.0 = Some((*element).to_string());
            }
        }

        fn finish(self) -> Result<Option<String>, AggregateError> {
            Ok(self.0)
        }
    }

    let mut request = Request::new(vec!["fan", "folds", "words"], Longest(None))
        .add(ConsumerFactory::count());

    assert_eq!(request.results(), Ok((Some("folds".to_string()), 3)));
    assert_eq!(request.phase(), Phase::Evaluated);
}

// Indices of the elements holding the largest key; NaN ranks lowest.
fn top_indices(keys: &[f64]) -> Vec<usize> {
    let numbers = keys.iter().copied().filter(|key| !key.is_nan());
    match numbers.reduce(f64::max) {
        Some(top) => (0..keys.len()).filter(|&i| keys[i] == top).collect(),
        None => (0..keys.len()).collect(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean_of(values: &[i16]) -> Option<f64> {
    let total: i64 = values.iter().copied().map(i64::from).sum();

    (!values.is_empty()).then(|| total as f64 / values.len() as f64)
}

proptest! {
    #[test]
    fn prelude_request_matches_iterator_reference(
        keys in proptest::collection::vec(prop_oneof![Just(f64::NAN), -1e3f64..1e3], 0..48),
        readings in proptest::collection::vec(any::<Option<i16>>(), 48),
    ) {
        let rows: Vec<(usize, f64, Option<i16>)> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (i, *key, readings[i]))
            .collect();
        let present: Vec<i16> = rows.iter().filter_map(|row| row.2).collect();

        let (count, top, mean) = rows
            .get_count()
            .and_maximums_by(|row: &(usize, f64, Option<i16>)| row.1)
            .and_nullable_average_by(|row: &(usize, f64, Option<i16>)| row.2)
            .into_results()
            .expect("pass should complete");

        prop_assert_eq!(count, keys.len());
        prop_assert_eq!(top.iter().map(|row| row.0).collect::<Vec<_>>(), top_indices(&keys));
        prop_assert_eq!(mean, mean_of(&present));
    }
}

#[test]
fn version_is_exposed() {
    assert!(!fanfold::VERSION.is_empty());
    assert_eq!(fanfold::MAX_ARITY, 16);
}
