use super::*;
use crate::{
    config::EvaluationConfig,
    consumer::{AggregateKind, Count},
    error::ErrorClass,
    factory::ConsumerFactory,
};
use std::{
    cell::{Cell, RefCell},
    panic::{AssertUnwindSafe, catch_unwind},
    rc::Rc,
};

///
/// Probe
///
/// Shared counters for a `CountingSource`: how many times it was turned
/// into an iterator and how many elements were pulled from it.
///

#[derive(Clone, Default)]
struct Probe {
    iterations: Rc<Cell<usize>>,
    pulled: Rc<Cell<usize>>,
}

impl Probe {
    fn source<T>(&self, items: Vec<T>) -> CountingSource<T> {
        CountingSource {
            items,
            probe: self.clone(),
        }
    }

    fn iterations(&self) -> usize {
        self.iterations.get()
    }

    fn pulled(&self) -> usize {
        self.pulled.get()
    }
}

struct CountingSource<T> {
    items: Vec<T>,
    probe: Probe,
}

impl<T> IntoIterator for CountingSource<T> {
    type Item = T;
    type IntoIter = CountingIter<T>;

    fn into_iter(self) -> CountingIter<T> {
        self.probe.iterations.set(self.probe.iterations() + 1);

        CountingIter {
            inner: self.items.into_iter(),
            pulled: self.probe.pulled,
        }
    }
}

struct CountingIter<T> {
    inner: std::vec::IntoIter<T>,
    pulled: Rc<Cell<usize>>,
}

impl<T> Iterator for CountingIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let next = self.inner.next();
        if next.is_some() {
            self.pulled.set(self.pulled.get() + 1);
        }

        next
    }
}

///
/// Tap
///
/// Consumer that logs `(slot, element)` for every element it accepts.
///

struct Tap {
    slot: usize,
    log: Rc<RefCell<Vec<(usize, i32)>>>,
}

impl Consumer<i32> for Tap {
    type Output = usize;

    fn accept(&mut self, element: &i32) {
        self.log.borrow_mut().push((self.slot, *element));
    }

    fn finish(self) -> Result<usize, AggregateError> {
        let seen = self
            .log
            .borrow()
            .iter()
            .filter(|(slot, _)| *slot == self.slot)
            .count();

        Ok(seen)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Order {
    customer: &'static str,
    total: i32,
    discount: Option<i32>,
}

const fn order(customer: &'static str, total: i32, discount: Option<i32>) -> Order {
    Order {
        customer,
        total,
        discount,
    }
}

//
// Typed requests
//

#[test]
fn results_follow_the_order_consumers_were_added() {
    let mut request = Request::new(vec![1, 2, 3, 4], ConsumerFactory::sum::<i32>())
        .add(ConsumerFactory::average::<i32>())
        .add(ConsumerFactory::count());

    assert_eq!(request.results(), Ok((10, 2.5, 4)));
}

#[test]
fn every_slot_accepts_every_element() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let tap = |slot: usize| Tap {
        slot,
        log: Rc::clone(&log),
    };

    let mut request = Request::new(vec![1, 2, 3, 4], ConsumerFactory::sum::<i32>())
        .add(tap(1))
        .add(ConsumerFactory::average::<i32>())
        .add(tap(3))
        .add(ConsumerFactory::count())
        .add(tap(5));

    assert_eq!(request.results(), Ok((10, 4, 2.5, 4, 4, 4)));
    assert_eq!(log.borrow().len(), 12);
}

#[test]
fn source_is_enumerated_once_for_every_consumer() {
    let probe = Probe::default();
    let mut request = Request::new(probe.source(vec![5, 1, 4]), ConsumerFactory::count())
        .add(ConsumerFactory::max::<i32>())
        .add(ConsumerFactory::min::<i32>())
        .add(ConsumerFactory::collect::<i32>());

    let (count, max, min, all) = request.evaluate().expect("pass should complete").clone();

    assert_eq!((count, max, min), (3, 5, 1));
    assert_eq!(all, vec![5, 1, 4]);
    assert_eq!(probe.iterations(), 1);
    assert_eq!(probe.pulled(), 3);
}

#[test]
fn consumers_advance_in_lock_step() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let tap = |slot| Tap {
        slot,
        log: Rc::clone(&log),
    };
    let request = Request::new(vec![7, 8], tap(0)).add(tap(1)).add(tap(2));

    assert_eq!(request.into_results(), Ok((2, 2, 2)));
    assert_eq!(
        *log.borrow(),
        vec![(0, 7), (1, 7), (2, 7), (0, 8), (1, 8), (2, 8)]
    );
}

#[test]
fn nothing_is_read_before_evaluation() {
    let probe = Probe::default();
    let request = Request::new(probe.source(vec![1, 2]), ConsumerFactory::count())
        .add(ConsumerFactory::sum::<i32>());

    assert_eq!(request.phase(), Phase::Unevaluated);
    assert_eq!(request.arity(), 2);
    assert_eq!(probe.iterations(), 0);
}

#[test]
fn repeated_reads_return_the_cached_tuple() {
    let probe = Probe::default();
    let mut request = Request::new(probe.source(vec![2, 4]), ConsumerFactory::sum::<i32>())
        .add(ConsumerFactory::count());

    let first = request.results();
    let second = request.results();
    let third = request.evaluate().cloned();

    assert_eq!(first, Ok((6, 2)));
    assert_eq!(first, second);
    assert_eq!(second, third);
    assert!(request.is_evaluated());
    assert_eq!(probe.iterations(), 1);
    assert_eq!(probe.pulled(), 2);
}

#[test]
fn failed_evaluation_is_cached_without_touching_the_source() {
    let probe = Probe::default();
    let mut request = Request::new(probe.source(Vec::<i32>::new()), ConsumerFactory::count())
        .add(ConsumerFactory::average::<i32>());

    let first = request.evaluate().expect_err("empty average must fail");
    let second = request.evaluate().expect_err("failure is cached");

    assert_eq!(first, second);
    assert!(first.is_empty_sequence());
    assert_eq!(request.phase(), Phase::Evaluated);
    assert_eq!(probe.iterations(), 1);
}

#[test]
fn first_failing_slot_is_reported() {
    let request = Request::new(Vec::<i32>::new(), ConsumerFactory::count())
        .add(ConsumerFactory::max::<i32>())
        .add(ConsumerFactory::average::<i32>());

    let err = request.into_results().expect_err("empty max must fail");

    assert_eq!(err.slot, Some(1));
    assert_eq!(err.kind, Some(AggregateKind::Max));
    assert_eq!(err.class, ErrorClass::EmptySequence);
}

#[test]
fn adding_after_evaluation_yields_an_invalid_node() {
    let probe = Probe::default();
    let mut request = Request::new(probe.source(vec![1, 2, 3]), ConsumerFactory::count());
    request.evaluate().expect("count never fails");

    let mut extended = request.add(ConsumerFactory::sum::<i32>());
    let err = extended.evaluate().expect_err("evaluated nodes cannot grow");

    assert!(err.is_invalid_argument());
    assert_eq!(extended.arity(), 2);
    assert_eq!(probe.iterations(), 1);
}

#[test]
fn absent_arguments_are_rejected_before_iteration() {
    let probe = Probe::default();

    let err = Request::<CountingSource<i32>, (Count,)>::try_new(None, Some(Count::new()))
        .expect_err("absent source must be rejected");
    assert!(err.is_invalid_argument());

    let err = Request::<_, (Count,)>::try_new(Some(probe.source(vec![1])), None)
        .expect_err("absent consumer must be rejected");
    assert!(err.is_invalid_argument());

    let request = Request::new(probe.source(vec![1]), ConsumerFactory::count());
    let err = request
        .try_add::<Count>(None)
        .expect_err("absent consumer must be rejected");
    assert!(err.is_invalid_argument());

    assert_eq!(probe.iterations(), 0);
}

#[test]
fn absent_key_selector_is_rejected_before_the_source_is_touched() {
    let probe = Probe::default();

    let err = ConsumerFactory::try_maximums_by::<i32, i32, fn(&i32) -> i32>(None)
        .and_then(|winners| Request::try_new(Some(probe.source(vec![3, 1, 3])), Some(winners)))
        .and_then(Request::into_results)
        .expect_err("absent key selector must be rejected");

    assert!(err.is_invalid_argument());
    assert_eq!(err.kind, Some(AggregateKind::MaximumsBy));
    assert_eq!(probe.iterations(), 0);
    assert_eq!(probe.pulled(), 0);
}

#[test]
fn element_limit_fails_the_pass() {
    let limited = EvaluationConfig::with_element_limit(2);

    let mut within = Request::new(vec![1, 2], ConsumerFactory::count()).with_config(limited);
    assert_eq!(within.results(), Ok((2,)));

    let mut over = Request::new(vec![1, 2, 3], ConsumerFactory::count()).with_config(limited);
    let err = over.evaluate().expect_err("third element exceeds the limit");

    assert_eq!(err.class, ErrorClass::LimitExceeded);
    assert_eq!(err.kind, None);
    assert_eq!(over.config().element_limit(), 2);
}

#[test]
fn panicking_consumer_leaves_the_node_interrupted() {
    let probe = Probe::default();
    let exploding = ConsumerFactory::fold((), |_: &mut (), value: &i32| {
        assert!(*value < 2, "boom");
    });
    let mut request = Request::new(probe.source(vec![1, 2, 3]), exploding);

    let unwound = catch_unwind(AssertUnwindSafe(|| request.evaluate().map(|_| ())));
    assert!(unwound.is_err());
    assert_eq!(request.phase(), Phase::Evaluating);

    let err = request.evaluate().expect_err("interrupted pass is not retried");
    assert_eq!(err.class, ErrorClass::Interrupted);
    assert_eq!(probe.iterations(), 1);
}

#[test]
fn maximum_arity_holds_sixteen_consumers() {
    let mut request = vec![1_i32, 2, 3]
        .get_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_count()
        .and_sum();

    assert_eq!(request.arity(), crate::MAX_ARITY);

    let results = request.evaluate().expect("pass should complete");
    assert_eq!(results.0, 3);
    assert_eq!(results.14, 3);
    assert_eq!(results.15, 6);
}

#[test]
fn debug_reports_phase_without_consumers() {
    let request = Request::new(vec![1], ConsumerFactory::count());
    let rendered = format!("{request:?}");

    assert!(rendered.contains("Unevaluated"));
    assert!(rendered.contains("arity: 1"));
}

//
// Fluent entry points
//

#[test]
fn fluent_chain_matches_explicit_adds() {
    let orders = vec![
        order("ada", 40, Some(5)),
        order("bob", 70, None),
        order("cy", 70, Some(10)),
        order("dee", 20, None),
    ];

    let (count, total, average, top, average_discount) = orders
        .clone()
        .get_count()
        .and_sum_by(|o: &Order| o.total)
        .and_average_by(|o: &Order| o.total)
        .and_maximums_by(|o: &Order| o.total)
        .and_nullable_average_by(|o: &Order| o.discount)
        .into_results()
        .expect("pass should complete");

    assert_eq!(count, 4);
    assert_eq!(total, 200);
    assert!((average - 50.0).abs() < f64::EPSILON);
    assert_eq!(
        top.iter().map(|o| o.customer).collect::<Vec<_>>(),
        vec!["bob", "cy"]
    );
    assert_eq!(average_discount, Some(7.5));
}

#[test]
fn fluent_nullable_average_of_all_missing_is_none() {
    let orders = vec![order("ada", 10, None), order("bob", 20, None)];

    let result = orders
        .get_nullable_average_by(|o: &Order| o.discount)
        .into_results();

    assert_eq!(result, Ok((None,)));
}

#[test]
fn fluent_aggregate_accepts_custom_consumers() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let tap = Tap {
        slot: 0,
        log: Rc::clone(&log),
    };

    let result = vec![3, 4].aggregate(tap).and_last().into_results();

    assert_eq!(result, Ok((2, 4)));
}

#[test]
fn fluent_extrema_rank_nan_lowest() {
    assert_eq!(vec![1.0, f64::NAN, 3.0].get_max().into_results(), Ok((3.0,)));

    let (min,) = vec![1.0, f64::NAN, 3.0]
        .get_min()
        .into_results()
        .expect("NaN is the minimum");
    assert!(min.is_nan());

    let rows = vec![(1.0, "a"), (f64::NAN, "b"), (3.0, "c"), (3.0, "d")];
    let (top,) = rows
        .get_maximums_by(|row: &(f64, &str)| row.0)
        .into_results()
        .expect("NaN keys still order");
    assert_eq!(top, vec![(3.0, "c"), (3.0, "d")]);
}

//
// Dynamic requests
//

#[test]
fn dyn_request_reads_typed_slots() {
    let probe = Probe::default();
    let mut request = DynRequest::new(probe.source(vec![3, 9, 9, 1]));
    let count = request.push(ConsumerFactory::count()).expect("pending");
    let max = request.push(ConsumerFactory::max::<i32>()).expect("pending");
    let ties = request
        .push(ConsumerFactory::maximums_by(|value: &i32| *value))
        .expect("pending");

    assert_eq!(request.arity(), 3);
    assert_eq!(count.index(), 0);
    assert_eq!(request.get(count), Ok(&4));
    assert_eq!(request.get(max), Ok(&9));
    assert_eq!(request.get(ties), Ok(&vec![9, 9]));
    assert_eq!(probe.iterations(), 1);
}

#[test]
fn dyn_request_has_no_arity_cap() {
    let probe = Probe::default();
    let mut request = DynRequest::new(probe.source(vec![1, 2, 3]));
    let slots: Vec<_> = (0..40)
        .map(|_| request.push(ConsumerFactory::sum::<i32>()))
        .collect::<Result<_, _>>()
        .expect("pending");

    let results = request.into_results().expect("pass should complete");

    assert_eq!(results.len(), 40);
    for slot in slots {
        assert_eq!(results.get(slot), Ok(&6));
    }
    assert_eq!(probe.iterations(), 1);
    assert_eq!(probe.pulled(), 3);
}

#[test]
fn dyn_request_without_consumers_is_rejected_before_iteration() {
    let probe = Probe::default();
    let mut request = DynRequest::new(probe.source(vec![1]));

    let err = request.evaluate().expect_err("no consumers");
    assert!(err.is_invalid_argument());
    assert_eq!(request.phase(), Phase::Unevaluated);
    assert_eq!(probe.iterations(), 0);

    let count = request.push(ConsumerFactory::count()).expect("still pending");
    assert_eq!(request.get(count), Ok(&1));
}

#[test]
fn dyn_request_rejects_push_after_evaluation() {
    let mut request = DynRequest::new(vec![1, 2]);
    request.push(ConsumerFactory::count()).expect("pending");
    request.evaluate().expect("pass should complete");

    let err = request
        .push(ConsumerFactory::sum::<i32>())
        .expect_err("evaluated nodes cannot grow");

    assert!(err.is_invalid_argument());
    assert_eq!(request.arity(), 1);
}

#[test]
fn dyn_results_reject_foreign_and_taken_slots() {
    let mut left = DynRequest::new(vec![1, 2]);
    let mut right = DynRequest::new(vec![5]);
    let left_count = left.push(ConsumerFactory::count()).expect("pending");
    let right_count = right.push(ConsumerFactory::count()).expect("pending");

    let mut results = left.into_results().expect("pass should complete");

    let err = results.get(right_count).expect_err("slot from another request");
    assert!(err.is_invalid_argument());

    assert_eq!(results.take(left_count), Ok(2));
    let err = results.get(left_count).expect_err("slot was taken");
    assert!(err.is_invalid_argument());
}

#[test]
fn dyn_request_caches_tagged_failures() {
    let probe = Probe::default();
    let mut request = DynRequest::new(probe.source(Vec::<i32>::new()));
    request.push(ConsumerFactory::count()).expect("pending");
    request
        .push(ConsumerFactory::first::<i32>())
        .expect("pending");

    let first = request.evaluate().expect_err("empty first must fail");
    let second = request.evaluate().expect_err("failure is cached");

    assert_eq!(first.slot, Some(1));
    assert_eq!(first, second);
    assert_eq!(probe.iterations(), 1);
}

#[test]
fn try_push_rejects_absent_consumer() {
    let mut request = DynRequest::new(vec![1]);
    let err = request
        .try_push::<Count>(None)
        .expect_err("absent consumer must be rejected");

    assert!(err.is_invalid_argument());
    assert_eq!(request.arity(), 0);
}
